//! # Aspect-Preserving Image Fit
//!
//! Sizes a source raster into a physical bounding box without distortion:
//! the result is as large as possible while staying inside the box on both
//! axes and keeping the source width:height ratio. This is the only sizing
//! discipline in the crate — every image (logo, QR) goes through it.

use crate::EtiquetaError;

/// Final render dimensions for an image, in centimeters.
///
/// Always within the requested box on both axes, with the source aspect
/// ratio preserved up to integer pixel rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub width_cm: f32,
    pub height_cm: f32,
}

/// Fit a `source_w_px` × `source_h_px` raster into a physical box.
///
/// The box is converted to pixels at `dpi` (`px = cm * dpi / 2.54`,
/// truncating), the constraining axis is chosen by comparing aspect
/// ratios, and the resulting pixel dimensions are converted back with the
/// same factor.
///
/// Fails with [`EtiquetaError::Image`] when the source has a zero
/// dimension or the target box truncates to zero pixels.
pub fn fit(
    source_w_px: u32,
    source_h_px: u32,
    target_w_cm: f32,
    target_h_cm: f32,
    dpi: u16,
) -> Result<FitResult, EtiquetaError> {
    if source_w_px == 0 || source_h_px == 0 {
        return Err(EtiquetaError::Image(format!(
            "source has zero dimension ({source_w_px}x{source_h_px})"
        )));
    }

    let dots_per_cm = dpi as f32 / 2.54;
    let target_w_px = (target_w_cm * dots_per_cm) as u32;
    let target_h_px = (target_h_cm * dots_per_cm) as u32;
    if target_w_px == 0 || target_h_px == 0 {
        return Err(EtiquetaError::Image(format!(
            "target box {target_w_cm}x{target_h_cm}cm has zero area at {dpi} dpi"
        )));
    }

    let source_aspect = source_w_px as f32 / source_h_px as f32;
    let target_aspect = target_w_px as f32 / target_h_px as f32;

    let (render_w_px, render_h_px) = if source_aspect > target_aspect {
        // Source is relatively wider: width is the constraint.
        let w = target_w_px;
        let h = (w as f32 / source_aspect).round() as u32;
        (w, h)
    } else {
        // Source is relatively taller (or equal): height is the constraint.
        let h = target_h_px;
        let w = (h as f32 * source_aspect).round() as u32;
        (w, h)
    };

    Ok(FitResult {
        width_cm: render_w_px as f32 / dots_per_cm,
        height_cm: render_h_px as f32 / dots_per_cm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DPI: u16 = 300;

    fn assert_fits(result: FitResult, target_w: f32, target_h: f32) {
        // Truncating cm→px conversion means the box in pixels never
        // exceeds the physical box, so a small epsilon suffices here.
        assert!(result.width_cm <= target_w + 1e-4, "{result:?} wider than box");
        assert!(result.height_cm <= target_h + 1e-4, "{result:?} taller than box");
    }

    fn assert_aspect(result: FitResult, src_w: u32, src_h: u32) {
        let got = result.width_cm / result.height_cm;
        let want = src_w as f32 / src_h as f32;
        // Relative tolerance: the constrained axis rounds to whole pixels.
        assert!(
            ((got - want) / want).abs() < 0.05,
            "aspect {got} drifted from source {want}"
        );
    }

    #[test]
    fn test_wide_source_constrained_by_width() {
        let result = fit(800, 200, 2.0, 2.0, DPI).unwrap();
        assert_fits(result, 2.0, 2.0);
        assert_aspect(result, 800, 200);
        // Width should reach (almost exactly) the full box
        assert!((result.width_cm - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_tall_source_constrained_by_height() {
        let result = fit(200, 800, 2.0, 2.0, DPI).unwrap();
        assert_fits(result, 2.0, 2.0);
        assert_aspect(result, 200, 800);
        assert!((result.height_cm - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_square_source_in_square_box() {
        let result = fit(512, 512, 1.8, 1.8, DPI).unwrap();
        assert_fits(result, 1.8, 1.8);
        assert!((result.width_cm - result.height_cm).abs() < 1e-4);
    }

    #[test]
    fn test_fit_never_upscales_past_box() {
        // A sweep of shapes against a wide logo box
        for (w, h) in [(1, 1), (3000, 500), (500, 3000), (640, 480), (7, 13)] {
            let result = fit(w, h, 1.96, 0.7, DPI).unwrap();
            assert_fits(result, 1.96, 0.7);
            assert_aspect(result, w, h);
        }
    }

    #[test]
    fn test_zero_source_dimension_fails() {
        let err = fit(0, 100, 2.0, 2.0, DPI).unwrap_err();
        assert!(matches!(err, EtiquetaError::Image(_)));
        assert!(fit(100, 0, 2.0, 2.0, DPI).is_err());
    }

    #[test]
    fn test_zero_area_target_fails() {
        let err = fit(100, 100, 0.0, 2.0, DPI).unwrap_err();
        assert!(matches!(err, EtiquetaError::Image(_)));
        // A box smaller than one pixel also truncates to zero
        assert!(fit(100, 100, 0.005, 2.0, DPI).is_err());
    }
}
