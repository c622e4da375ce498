//! QR encoding for label payloads.
//!
//! Produces a grayscale module raster the engine treats as an opaque
//! image handle; sizing into the label happens through the normal
//! aspect-preserving fit.

use std::sync::Arc;

use image::{GrayImage, Luma};
use qrcode::{EcLevel, QrCode};

use crate::EtiquetaError;
use crate::label::QrEncoder;
use crate::layout::compose::ImageHandle;

/// QR rasterizer with medium error correction.
#[derive(Debug, Clone, Copy)]
pub struct QrRaster {
    /// Pixels per QR module.
    pub cell_px: u32,
    /// Quiet zone width in modules on each side.
    pub quiet_zone: u32,
}

impl Default for QrRaster {
    fn default() -> Self {
        Self {
            cell_px: 8,
            quiet_zone: 2,
        }
    }
}

impl QrEncoder for QrRaster {
    fn encode(&self, payload: &str) -> Result<ImageHandle, EtiquetaError> {
        let code = QrCode::with_error_correction_level(payload, EcLevel::M)
            .map_err(|e| EtiquetaError::Render(format!("QR encoding failed: {e}")))?;

        let modules = code.width() as u32;
        let cell = self.cell_px.max(1);
        let total = (modules + 2 * self.quiet_zone) * cell;
        let mut img = GrayImage::from_pixel(total, total, Luma([255]));

        for qy in 0..modules {
            for qx in 0..modules {
                if code[(qx as usize, qy as usize)] != qrcode::Color::Dark {
                    continue;
                }
                let x0 = (self.quiet_zone + qx) * cell;
                let y0 = (self.quiet_zone + qy) * cell;
                for dy in 0..cell {
                    for dx in 0..cell {
                        img.put_pixel(x0 + dx, y0 + dy, Luma([0]));
                    }
                }
            }
        }

        Ok(Arc::new(img))
    }
}
