//! Line-location parsing: one raw string into exactly four display
//! segments.

/// The four display segments of a line location, in order.
///
/// Always exactly four elements; missing segments are empty strings and
/// extra segments are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocationSegments([String; 4]);

/// Delimiter between segments in the raw column value.
const DELIMITER: char = '_';

impl LocationSegments {
    /// Split `raw` on the delimiter, truncating or padding to four.
    pub fn parse(raw: &str) -> Self {
        let mut segments: [String; 4] = Default::default();
        if raw.is_empty() {
            return Self(segments);
        }
        for (slot, part) in segments.iter_mut().zip(raw.split(DELIMITER)) {
            *slot = part.to_string();
        }
        Self(segments)
    }

    /// Segment values as string slices, for cell composition.
    pub fn as_strs(&self) -> [&str; 4] {
        [
            self.0[0].as_str(),
            self.0[1].as_str(),
            self.0[2].as_str(),
            self.0[3].as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn segs(parts: [&str; 4]) -> LocationSegments {
        LocationSegments(parts.map(String::from))
    }

    #[test]
    fn test_four_segments_pass_through() {
        assert_eq!(
            LocationSegments::parse("A1_B2_C3_D4"),
            segs(["A1", "B2", "C3", "D4"])
        );
    }

    #[test]
    fn test_short_input_pads_with_empty() {
        assert_eq!(LocationSegments::parse("A1_B2"), segs(["A1", "B2", "", ""]));
    }

    #[test]
    fn test_empty_input_is_all_empty() {
        assert_eq!(LocationSegments::parse(""), segs(["", "", "", ""]));
    }

    #[test]
    fn test_extra_segments_truncated() {
        assert_eq!(
            LocationSegments::parse("A1_B2_C3_D4_E5"),
            segs(["A1", "B2", "C3", "D4"])
        );
    }

    #[test]
    fn test_consecutive_delimiters_yield_empty_segments() {
        assert_eq!(LocationSegments::parse("A1__C3"), segs(["A1", "", "C3", ""]));
    }
}
