//! Bitmap font metrics and glyph generation for the preview backend.
//!
//! Uses the Spleen font family. All three faces share a 1:2 cell aspect,
//! so glyph advance is half the em height — that single fact is what the
//! layout engine consumes through [`GlyphMetrics`]; everything else here
//! serves rasterization.

use spleen_font::{FONT_6X12, FONT_8X16, FONT_12X24, PSF2Font};

use crate::layout::measure::GlyphMetrics;

/// Centimeters per point.
const PT_CM: f32 = 2.54 / 72.0;

/// A rasterized character cell. Each byte is 0 (white) or 1 (black).
pub struct Glyph {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Pick the Spleen face whose native height is closest below the target,
/// returning `(font_data, native_width, native_height)`.
fn face_for_height(height_px: usize) -> (&'static [u8], usize, usize) {
    if height_px <= 13 {
        (FONT_6X12, 6, 12)
    } else if height_px <= 19 {
        (FONT_8X16, 8, 16)
    } else {
        (FONT_12X24, 12, 24)
    }
}

/// Rasterize `ch` into a cell `height_px` tall (width is half the height).
///
/// Characters missing from the font fall back to a box outline.
pub fn glyph(ch: char, height_px: usize) -> Glyph {
    let height = height_px.max(2);
    let width = height.div_ceil(2);
    let mut data = vec![0u8; width * height];

    if ch == ' ' {
        return Glyph {
            width,
            height,
            data,
        };
    }

    let (face, src_w, src_h) = face_for_height(height);
    let mut font = PSF2Font::new(face).unwrap();
    let utf8 = ch.to_string();

    if let Some(spleen_glyph) = font.glyph_for_utf8(utf8.as_bytes()) {
        let mut src = vec![0u8; src_w * src_h];
        for (y, row) in spleen_glyph.enumerate() {
            for (x, on) in row.enumerate() {
                if y < src_h && x < src_w {
                    src[y * src_w + x] = if on { 1 } else { 0 };
                }
            }
        }
        scale_bitmap(&src, src_w, src_h, &mut data, width, height);
    } else {
        draw_box(&mut data, width, height);
    }

    Glyph {
        width,
        height,
        data,
    }
}

/// Scale a bitmap between cell sizes using nearest neighbor.
fn scale_bitmap(src: &[u8], src_w: usize, src_h: usize, dst: &mut [u8], dst_w: usize, dst_h: usize) {
    for dy in 0..dst_h {
        for dx in 0..dst_w {
            let sx = dx * src_w / dst_w;
            let sy = dy * src_h / dst_h;
            let src_idx = sy * src_w + sx;
            let dst_idx = dy * dst_w + dx;
            if src_idx < src.len() && dst_idx < dst.len() {
                dst[dst_idx] = src[src_idx];
            }
        }
    }
}

/// Box outline for characters the font doesn't cover.
fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    for x in 0..width {
        glyph[x] = 1;
        glyph[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        glyph[y * width] = 1;
        glyph[y * width + width - 1] = 1;
    }
}

/// Fixed-advance metrics of the Spleen faces, in physical units.
///
/// The faces are monospace with a 1:2 cell, so every glyph advances by
/// half the em height regardless of the codepoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpleenMetrics;

impl GlyphMetrics for SpleenMetrics {
    fn advance_cm(&self, _ch: char, font_size_pt: f32) -> f32 {
        font_size_pt * PT_CM / 2.0
    }
}
