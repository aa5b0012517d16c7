//! Heuristic text metrics for laying out chart text.
//!
//! The SVG is rasterized with whatever sans-serif font the target provides, so layout uses
//! stable ratios instead of real glyph tables. The ratios are tuned for Inter.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FontWeight {
    Regular,
    SemiBold,
    Bold,
}

impl FontWeight {
    pub(crate) fn css_value(self) -> u16 {
        match self {
            FontWeight::Regular => 400,
            FontWeight::SemiBold => 600,
            FontWeight::Bold => 800,
        }
    }

    fn advance_ratio(self) -> f64 {
        match self {
            FontWeight::Regular => 0.54,
            FontWeight::SemiBold => 0.57,
            FontWeight::Bold => 0.60,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct TextMetrics {
    /// Vertical distance between baselines.
    pub line_h: f64,
    /// Distance from the top of the line box to the baseline.
    pub asc: f64,
}

pub(crate) fn measure(size_px: f64) -> TextMetrics {
    TextMetrics {
        line_h: (size_px * 1.28).round(),
        asc: (size_px * 0.92).round(),
    }
}

/// How many average glyphs fit in `width_px`.
pub(crate) fn chars_per_line(width_px: f64, size_px: f64, weight: FontWeight) -> usize {
    let advance = size_px * weight.advance_ratio();
    if advance <= 0.0 {
        return 1;
    }
    ((width_px / advance).floor() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_increase_with_size() {
        let small = measure(12.0);
        let large = measure(48.0);
        assert!(large.line_h > small.line_h);
        assert!(large.asc > small.asc);
    }

    #[test]
    fn bold_fits_fewer_characters() {
        let regular = chars_per_line(600.0, 16.0, FontWeight::Regular);
        let bold = chars_per_line(600.0, 16.0, FontWeight::Bold);
        assert!(bold < regular);
        assert_eq!(chars_per_line(1.0, 16.0, FontWeight::Bold), 1);
    }
}
