//! # Preview Rendering Backend
//!
//! One concrete implementation of the rendering collaborator: grayscale
//! raster pages, bitmap-font text, QR modules, and logo blitting. The
//! composition engine never depends on anything in here beyond the
//! [`GlyphMetrics`](crate::layout::measure::GlyphMetrics) and
//! [`QrEncoder`](crate::label::QrEncoder) traits.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`font`] | Spleen bitmap fonts: metrics and glyph rasters |
//! | [`qr`] | payload → QR module raster |
//! | [`preview`] | label grid → PNG page |

pub mod font;
pub mod preview;
pub mod qr;

pub use font::SpleenMetrics;
pub use preview::LabelRenderer;
pub use qr::QrRaster;

use std::path::Path;
use std::sync::Arc;

use image::{DynamicImage, GrayImage, Luma};

use crate::EtiquetaError;
use crate::layout::compose::ImageHandle;

/// Decode a logo file into a grayscale handle for the composer.
///
/// Transparency is flattened onto a white background first, so alpha
/// edges don't render as black smears on the label.
pub fn load_logo(path: impl AsRef<Path>) -> Result<ImageHandle, EtiquetaError> {
    let img = image::open(path.as_ref())
        .map_err(|e| EtiquetaError::Image(format!("failed to decode logo: {e}")))?;
    Ok(Arc::new(flatten_onto_white(&img)))
}

/// Composite an image over white and convert to grayscale.
pub fn flatten_onto_white(img: &DynamicImage) -> GrayImage {
    let rgba = img.to_rgba8();
    let mut out = GrayImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
        let alpha = a as f32 / 255.0;
        let value = luma * alpha + 255.0 * (1.0 - alpha);
        out.put_pixel(x, y, Luma([value.round() as u8]));
    }
    out
}
