//! # Wrapped Text Measurement
//!
//! Computes the height a text value needs inside a cell of known width.
//! Glyph advance widths come from the rendering backend through the
//! [`GlyphMetrics`] trait — this module owns only the greedy wrap and the
//! floor policy: a measurement is never less than one line of the style's
//! leading, so a row cannot collapse to zero height.

use super::config::TextStyle;

/// Slack for accumulated float error when comparing against the
/// available width (a tenth of a typical pixel at 300 DPI).
const WRAP_EPS: f32 = 1e-4;

/// Glyph-width oracle implemented by the rendering backend.
pub trait GlyphMetrics {
    /// Advance width of `ch` in centimeters at `font_size_pt`.
    fn advance_cm(&self, ch: char, font_size_pt: f32) -> f32;

    /// Width of a whole string in centimeters. The default sums advances;
    /// backends with kerning can override.
    fn line_width_cm(&self, text: &str, font_size_pt: f32) -> f32 {
        text.chars().map(|c| self.advance_cm(c, font_size_pt)).sum()
    }
}

/// Greedily wrap `text` to fit `available_cm`.
///
/// Words are whitespace-separated; a word wider than the full width is
/// split hard rather than overflowing. Returns no lines for blank input.
pub fn wrap_lines(
    text: &str,
    style: &TextStyle,
    available_cm: f32,
    metrics: &dyn GlyphMetrics,
) -> Vec<String> {
    let space = metrics.advance_cm(' ', style.font_size_pt);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0f32;

    for word in text.split_whitespace() {
        let word_width = metrics.line_width_cm(word, style.font_size_pt);

        if word_width > available_cm {
            // Oversized word: flush the current line, then hard-split
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            for ch in word.chars() {
                let advance = metrics.advance_cm(ch, style.font_size_pt);
                if !current.is_empty() && current_width + advance > available_cm + WRAP_EPS {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(ch);
                current_width += advance;
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_width
        } else {
            space + word_width
        };
        if !current.is_empty() && current_width + needed > available_cm + WRAP_EPS {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
            current.push_str(word);
            current_width += word_width;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width += needed;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Height required to render `text` wrapped at `available_cm`.
///
/// Floored at one line of `style.leading_cm`, including for empty input.
pub fn measure(
    text: &str,
    style: &TextStyle,
    available_cm: f32,
    metrics: &dyn GlyphMetrics,
) -> f32 {
    let lines = wrap_lines(text, style, available_cm, metrics).len().max(1);
    lines as f32 * style.leading_cm
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-advance metrics: every glyph is `advance` cm wide.
    struct FixedMetrics(f32);

    impl GlyphMetrics for FixedMetrics {
        fn advance_cm(&self, _ch: char, _font_size_pt: f32) -> f32 {
            self.0
        }
    }

    fn style() -> TextStyle {
        TextStyle {
            font_size_pt: 9.0,
            leading_cm: 0.5,
        }
    }

    #[test]
    fn test_empty_text_measures_one_line() {
        let metrics = FixedMetrics(0.1);
        assert_eq!(measure("", &style(), 2.0, &metrics), 0.5);
    }

    #[test]
    fn test_whitespace_only_measures_one_line() {
        let metrics = FixedMetrics(0.1);
        assert_eq!(measure("   ", &style(), 2.0, &metrics), 0.5);
        assert!(wrap_lines("   ", &style(), 2.0, &metrics).is_empty());
    }

    #[test]
    fn test_short_text_single_line() {
        let metrics = FixedMetrics(0.1);
        // "abc def" = 7 glyphs = 0.7cm, fits in 1.0cm
        let lines = wrap_lines("abc def", &style(), 1.0, &metrics);
        assert_eq!(lines, vec!["abc def"]);
        assert_eq!(measure("abc def", &style(), 1.0, &metrics), 0.5);
    }

    #[test]
    fn test_wraps_at_word_boundary() {
        let metrics = FixedMetrics(0.1);
        // 10 glyphs per line: "aaaa aaaa" is 9, the next word forces a wrap
        let lines = wrap_lines("aaaa aaaa aaaa", &style(), 1.0, &metrics);
        assert_eq!(lines, vec!["aaaa aaaa", "aaaa"]);
        assert_eq!(measure("aaaa aaaa aaaa", &style(), 1.0, &metrics), 1.0);
    }

    #[test]
    fn test_oversized_word_hard_splits() {
        let metrics = FixedMetrics(0.1);
        let word = "x".repeat(25);
        let lines = wrap_lines(&word, &style(), 1.0, &metrics);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 10);
        assert_eq!(lines[1].len(), 10);
        assert_eq!(lines[2].len(), 5);
    }

    #[test]
    fn test_collapses_inner_whitespace() {
        let metrics = FixedMetrics(0.1);
        let lines = wrap_lines("a\t b \n c", &style(), 2.0, &metrics);
        assert_eq!(lines, vec!["a b c"]);
    }

    #[test]
    fn test_height_scales_with_lines() {
        let metrics = FixedMetrics(0.1);
        let text = "aaaa ".repeat(6); // 6 words, 2 per line at 1.0cm
        let height = measure(text.trim(), &style(), 1.0, &metrics);
        assert_eq!(height, 1.5);
    }
}
