//! # Layout Configuration
//!
//! One struct owns every physical constant of the sticker layout: page and
//! content-box dimensions, row heights, column width ratios, text styles,
//! and the DPI used for physical/pixel conversions. Callers pass a config
//! into the composer instead of the engine reading module-level globals,
//! so alternative geometries are plain data.
//!
//! ## Units
//!
//! All physical lengths are centimeters (`f32`). Pixel conversions use
//! `px = cm * dpi / 2.54`, truncating — the same conversion the fit
//! algorithm uses, so a box converted to pixels never exceeds its
//! physical size.

use serde::{Deserialize, Serialize};

use crate::EtiquetaError;

/// Centimeters per point (1pt = 1/72 inch).
const PT_CM: f32 = 2.54 / 72.0;

/// Tolerance when checking that a row group's ratios sum to at most 1.0.
const RATIO_TOLERANCE: f32 = 1e-3;

/// Sizing-relevant text style for one label region.
///
/// Only the metrics that affect layout live here; visual styling (weight,
/// color) belongs to the rendering backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in points.
    pub font_size_pt: f32,
    /// Line advance in centimeters.
    pub leading_cm: f32,
}

impl TextStyle {
    /// A style with leading derived from a point value.
    pub const fn pt(font_size_pt: f32, leading_pt: f32) -> Self {
        Self {
            font_size_pt,
            leading_cm: leading_pt * PT_CM,
        }
    }
}

/// Text styles for each label region.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StyleSet {
    /// Box header labels ("ASSLY", "PART NO", ...).
    pub header: TextStyle,
    /// Assembly name value.
    pub assembly: TextStyle,
    /// Part number value.
    pub part_number: TextStyle,
    /// Part description value.
    pub description: TextStyle,
    /// Quantity, type, and date values.
    pub detail: TextStyle,
    /// Line location segments.
    pub location: TextStyle,
}

impl Default for StyleSet {
    fn default() -> Self {
        Self {
            header: TextStyle::pt(10.0, 10.0),
            assembly: TextStyle::pt(9.0, 16.0),
            part_number: TextStyle::pt(12.0, 16.0),
            description: TextStyle::pt(8.0, 16.0),
            detail: TextStyle::pt(10.0, 12.0),
            location: TextStyle::pt(9.0, 10.0),
        }
    }
}

/// # Layout Configuration
///
/// Physical geometry of one sticker label.
///
/// ```text
/// ├──────── 10cm ────────┤
/// ┌──────────────────────┐ ┬
/// │ ┌──────────────────┐ │ │   content box 10 × 5cm,
/// │ │  [logo][ASSLY][v]│ │ │   grid inset 0.2cm
/// │ │  [PART NO ][val ]│ │ │
/// │ │  ...       [QR ] │ │ 15cm
/// │ └──────────────────┘ │ │
/// │                      │ │
/// └──────────────────────┘ ┴
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Sticker page width in centimeters.
    pub sticker_width_cm: f32,
    /// Sticker page height in centimeters.
    pub sticker_height_cm: f32,
    /// Content box width in centimeters.
    pub content_width_cm: f32,
    /// Content box height in centimeters.
    pub content_height_cm: f32,
    /// Width taken off the content box before computing cell widths.
    pub content_inset_cm: f32,

    /// Minimum height of the assembly identity row.
    pub identity_row_min_cm: f32,
    /// Minimum height of the part number / description rows.
    pub value_row_min_cm: f32,
    /// Height of the quantity / type / date rows.
    pub quantity_row_cm: f32,
    /// Height of the line location row.
    pub location_row_cm: f32,

    /// Target box for the QR code (square).
    pub qr_size_cm: f32,
    /// Padding factor applied to a fitted logo inside its cell.
    pub logo_padding: f32,
    /// Inner padding between a cell border and its content.
    pub cell_padding_cm: f32,

    /// Raster resolution for physical/pixel conversions.
    pub dpi: u16,

    /// Identity group: logo, header, assembly value.
    pub identity_ratios: [f32; 3],
    /// Key/value group: header, value.
    pub key_value_ratios: [f32; 2],
    /// Quantity group: header, value, QR column.
    pub quantity_ratios: [f32; 3],
    /// Location group: header plus four segment boxes.
    pub location_ratios: [f32; 5],

    /// Text styles per region.
    pub styles: StyleSet,
}

impl LayoutConfig {
    /// The standard 10 × 15cm sticker with a 10 × 5cm content box at 300 DPI.
    pub fn sticker_10x15() -> Self {
        Self {
            sticker_width_cm: 10.0,
            sticker_height_cm: 15.0,
            content_width_cm: 10.0,
            content_height_cm: 5.0,
            content_inset_cm: 0.2,
            identity_row_min_cm: 0.7,
            value_row_min_cm: 0.7,
            quantity_row_cm: 0.6,
            location_row_cm: 0.6,
            qr_size_cm: 1.8,
            logo_padding: 0.9,
            cell_padding_cm: 0.1,
            dpi: 300,
            identity_ratios: [0.20, 0.25, 0.55],
            key_value_ratios: [0.30, 0.70],
            quantity_ratios: [0.30, 0.30, 0.40],
            location_ratios: [0.30, 0.175, 0.175, 0.175, 0.175],
            styles: StyleSet::default(),
        }
    }

    /// Usable width shared by every row group.
    #[inline]
    pub fn content_width(&self) -> f32 {
        self.content_width_cm - self.content_inset_cm
    }

    /// Target bounding box for the logo: first identity cell.
    pub fn logo_box(&self) -> (f32, f32) {
        (
            self.content_width() * self.identity_ratios[0],
            self.identity_row_min_cm,
        )
    }

    /// Convert centimeters to pixels at the configured DPI (truncating).
    #[inline]
    pub fn cm_to_px(&self, cm: f32) -> u32 {
        (cm * self.dpi as f32 / 2.54) as u32
    }

    /// Convert pixels back to centimeters at the configured DPI.
    #[inline]
    pub fn px_to_cm(&self, px: u32) -> f32 {
        px as f32 * 2.54 / self.dpi as f32
    }

    /// Convert points to pixels at the configured DPI.
    #[inline]
    pub fn pt_to_px(&self, pt: f32) -> u32 {
        (pt / 72.0 * self.dpi as f32).round() as u32
    }

    /// Validate dimensions and ratio sums.
    ///
    /// Width ratios are checked per row group: every ratio must be positive
    /// and each group must sum to at most 1.0 (within tolerance). Sums are
    /// rejected rather than auto-normalized, so a bad configuration fails
    /// here instead of producing overflowing boxes mid-render.
    pub fn validate(&self) -> Result<(), EtiquetaError> {
        let dims = [
            ("sticker width", self.sticker_width_cm),
            ("sticker height", self.sticker_height_cm),
            ("content width", self.content_width_cm),
            ("content height", self.content_height_cm),
            ("identity row", self.identity_row_min_cm),
            ("value row", self.value_row_min_cm),
            ("quantity row", self.quantity_row_cm),
            ("location row", self.location_row_cm),
            ("qr size", self.qr_size_cm),
        ];
        for (name, value) in dims {
            if value <= 0.0 {
                return Err(EtiquetaError::Layout(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.dpi == 0 {
            return Err(EtiquetaError::Layout("dpi must be positive".into()));
        }
        if self.content_width() <= 0.0 {
            return Err(EtiquetaError::Layout(
                "content inset leaves no usable width".into(),
            ));
        }

        check_ratios("identity", &self.identity_ratios)?;
        check_ratios("key/value", &self.key_value_ratios)?;
        check_ratios("quantity", &self.quantity_ratios)?;
        check_ratios("location", &self.location_ratios)?;
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::sticker_10x15()
    }
}

fn check_ratios(group: &str, ratios: &[f32]) -> Result<(), EtiquetaError> {
    for &r in ratios {
        if r <= 0.0 || r > 1.0 {
            return Err(EtiquetaError::Layout(format!(
                "{group} group has ratio {r} outside (0, 1]"
            )));
        }
    }
    let sum: f32 = ratios.iter().sum();
    if sum > 1.0 + RATIO_TOLERANCE {
        return Err(EtiquetaError::Layout(format!(
            "{group} group ratios sum to {sum:.3} (> 1.0)"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        LayoutConfig::default().validate().unwrap();
    }

    #[test]
    fn test_content_width() {
        let config = LayoutConfig::sticker_10x15();
        assert!((config.content_width() - 9.8).abs() < 1e-6);
    }

    #[test]
    fn test_cm_px_round_trip() {
        let config = LayoutConfig::sticker_10x15();
        // 1.8cm at 300 DPI ≈ 212px
        let px = config.cm_to_px(1.8);
        assert_eq!(px, 212);
        assert!((config.px_to_cm(px) - 1.8).abs() < 0.01);
    }

    #[test]
    fn test_logo_box() {
        let config = LayoutConfig::sticker_10x15();
        let (w, h) = config.logo_box();
        assert!((w - 9.8 * 0.2).abs() < 1e-6);
        assert!((h - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_ratio_sum_over_one_rejected() {
        let mut config = LayoutConfig::sticker_10x15();
        config.location_ratios = [0.5, 0.2, 0.2, 0.2, 0.2];
        let err = config.validate().unwrap_err();
        assert!(matches!(err, EtiquetaError::Layout(_)));
        assert!(err.to_string().contains("location"));
    }

    #[test]
    fn test_ratio_sum_under_one_accepted() {
        let mut config = LayoutConfig::sticker_10x15();
        config.location_ratios = [0.2, 0.1, 0.1, 0.1, 0.1];
        config.validate().unwrap();
    }

    #[test]
    fn test_negative_ratio_rejected() {
        let mut config = LayoutConfig::sticker_10x15();
        config.quantity_ratios = [0.5, -0.1, 0.4];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let mut config = LayoutConfig::sticker_10x15();
        config.qr_size_cm = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = LayoutConfig::sticker_10x15();
        let json = serde_json::to_string(&config).unwrap();
        let back: LayoutConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.dpi, config.dpi);
        assert_eq!(back.location_ratios, config.location_ratios);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LayoutConfig = serde_json::from_str(r#"{"dpi": 203}"#).unwrap();
        assert_eq!(config.dpi, 203);
        assert!((config.sticker_width_cm - 10.0).abs() < 1e-6);
    }
}
