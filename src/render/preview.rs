//! Raster preview backend: draws a composed label onto a grayscale page.
//!
//! Consumes the engine's cell grid exactly as the contract hands it over
//! — text cells become wrapped bitmap-font lines, image cells blit their
//! fitted raster, empty cells draw nothing. The page is the full sticker
//! with the content grid at the top, inside the outer border.

use image::imageops::FilterType;
use image::{GrayImage, Luma};

use super::font::{self, SpleenMetrics};
use crate::EtiquetaError;
use crate::label::LabelRecord;
use crate::layout::compose::{Cell, CellAlign, CellContent};
use crate::layout::config::LayoutConfig;
use crate::layout::measure;

/// Renders [`LabelRecord`]s to grayscale pages at the config DPI.
#[derive(Debug, Clone)]
pub struct LabelRenderer {
    config: LayoutConfig,
}

impl LabelRenderer {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Glyph metrics matching this backend, for the composer.
    pub fn metrics(&self) -> SpleenMetrics {
        SpleenMetrics
    }

    /// Draw one label onto a fresh page.
    pub fn render(&self, record: &LabelRecord) -> GrayImage {
        let config = &self.config;
        let page_w = config.cm_to_px(config.sticker_width_cm);
        let page_h = config.cm_to_px(config.sticker_height_cm);
        let mut page = GrayImage::from_pixel(page_w, page_h, Luma([255]));

        let x0_cm = (config.sticker_width_cm - config.content_width()) / 2.0;
        let y0_cm = config.content_inset_cm;
        let x0 = config.cm_to_px(x0_cm);
        let y0 = config.cm_to_px(y0_cm);

        // Outer content-box border
        draw_rect(
            &mut page,
            x0,
            y0,
            config.cm_to_px(config.content_width()),
            config.cm_to_px(config.content_height_cm),
            config.pt_to_px(1.5).max(1),
        );

        // Cell grid, top to bottom. Positions accumulate in centimeters
        // and convert once, so rounding never drifts across rows.
        let mut row_offset_cm = 0.0f32;
        for row in record.grid.rows() {
            let row_y = y0 + config.cm_to_px(row_offset_cm);
            let mut col_offset_cm = 0.0f32;
            for cell in &row.cells {
                let cell_x = x0 + config.cm_to_px(col_offset_cm);
                self.draw_cell(&mut page, cell, cell_x, row_y);
                col_offset_cm += cell.width_cm;
            }
            row_offset_cm += row.height_cm;
        }

        page
    }

    /// Draw one label and encode it as PNG bytes.
    pub fn render_png(&self, record: &LabelRecord) -> Result<Vec<u8>, EtiquetaError> {
        let page = self.render(record);
        let mut buf = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buf);
        page.write_to(&mut cursor, image::ImageFormat::Png)
            .map_err(|e| EtiquetaError::Render(format!("PNG encoding failed: {e}")))?;
        Ok(buf)
    }

    fn draw_cell(&self, page: &mut GrayImage, cell: &Cell, x: u32, y: u32) {
        let config = &self.config;
        let w = config.cm_to_px(cell.width_cm);
        let h = config.cm_to_px(cell.height_cm);
        draw_rect(page, x, y, w, h, 1);

        match &cell.content {
            CellContent::Text(text) => {
                self.draw_text(page, cell, text, x, y, w, h);
            }
            CellContent::Image { fit, handle } => {
                let img_w = config.cm_to_px(fit.width_cm);
                let img_h = config.cm_to_px(fit.height_cm);
                if img_w == 0 || img_h == 0 {
                    return;
                }
                let resized =
                    image::imageops::resize(handle.as_ref(), img_w, img_h, FilterType::Lanczos3);
                let dst_x = x + w.saturating_sub(img_w) / 2;
                let dst_y = y + h.saturating_sub(img_h) / 2;
                blit(page, &resized, dst_x, dst_y);
            }
            CellContent::Empty => {}
        }
    }

    fn draw_text(
        &self,
        page: &mut GrayImage,
        cell: &Cell,
        text: &str,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
    ) {
        let config = &self.config;
        let pad = config.cm_to_px(config.cell_padding_cm);
        let inner_cm = (cell.width_cm - 2.0 * config.cell_padding_cm).max(0.0);
        let lines = measure::wrap_lines(text, &cell.style, inner_cm, &SpleenMetrics);
        if lines.is_empty() {
            return;
        }

        let glyph_h = config.pt_to_px(cell.style.font_size_pt).max(2) as usize;
        let glyph_w = glyph_h.div_ceil(2);
        let leading = config.cm_to_px(cell.style.leading_cm).max(1);

        let block_h = leading * lines.len() as u32;
        let mut line_y = y + h.saturating_sub(block_h) / 2;

        for line in &lines {
            let line_w = (glyph_w * line.chars().count()) as u32;
            let line_x = match cell.align {
                CellAlign::Left => x + pad,
                CellAlign::Center => x + w.saturating_sub(line_w) / 2,
            };
            let mut cursor_x = line_x;
            for ch in line.chars() {
                let glyph = font::glyph(ch, glyph_h);
                blit_glyph(page, &glyph, cursor_x, line_y);
                cursor_x += glyph.width as u32;
            }
            line_y += leading;
        }
    }
}

/// Border rectangle of the given line thickness.
fn draw_rect(page: &mut GrayImage, x: u32, y: u32, w: u32, h: u32, thickness: u32) {
    if w == 0 || h == 0 {
        return;
    }
    for t in 0..thickness {
        for dx in 0..w {
            put(page, x + dx, y + t);
            put(page, x + dx, (y + h).saturating_sub(1 + t));
        }
        for dy in 0..h {
            put(page, x + t, y + dy);
            put(page, (x + w).saturating_sub(1 + t), y + dy);
        }
    }
}

fn put(page: &mut GrayImage, x: u32, y: u32) {
    if x < page.width() && y < page.height() {
        page.put_pixel(x, y, Luma([0]));
    }
}

fn blit(page: &mut GrayImage, img: &GrayImage, x: u32, y: u32) {
    for (sx, sy, pixel) in img.enumerate_pixels() {
        let px = x + sx;
        let py = y + sy;
        if px < page.width() && py < page.height() {
            page.put_pixel(px, py, *pixel);
        }
    }
}

fn blit_glyph(page: &mut GrayImage, glyph: &font::Glyph, x: u32, y: u32) {
    for gy in 0..glyph.height {
        for gx in 0..glyph.width {
            if glyph.data[gy * glyph.width + gx] != 0 {
                put(page, x + gx as u32, y + gy as u32);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Composer;
    use crate::render::qr::QrRaster;
    use crate::source::MemoryTable;

    fn one_row_table() -> MemoryTable {
        MemoryTable::new(
            ["Assy Name", "PART", "DESC"],
            vec![vec!["Engine", "P001", "Block"]],
        )
    }

    fn record() -> LabelRecord {
        let composer = Composer::new(LayoutConfig::sticker_10x15(), SpleenMetrics).unwrap();
        composer
            .compose_dataset_dated(&one_row_table(), Some(&QrRaster::default()), "01-01-2024")
            .unwrap()
            .remove(0)
    }

    #[test]
    fn test_page_matches_sticker_dimensions() {
        let config = LayoutConfig::sticker_10x15();
        let renderer = LabelRenderer::new(config.clone());
        let page = renderer.render(&record());
        assert_eq!(page.width(), config.cm_to_px(10.0));
        assert_eq!(page.height(), config.cm_to_px(15.0));
    }

    #[test]
    fn test_render_produces_ink() {
        let renderer = LabelRenderer::new(LayoutConfig::sticker_10x15());
        let page = renderer.render(&record());
        let dark = page.pixels().filter(|p| p.0[0] == 0).count();
        // Borders, text, and QR modules all contribute
        assert!(dark > 1000, "only {dark} dark pixels");
    }

    #[test]
    fn test_png_magic_bytes() {
        let renderer = LabelRenderer::new(LayoutConfig::sticker_10x15());
        let png = renderer.render_png(&record()).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
