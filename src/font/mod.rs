//! # Font Management
//!
//! Reports are set in the standard PDF Helvetica faces, which every viewer
//! ships, so nothing is embedded. This module names those faces and measures
//! text against their published metrics.

pub mod metrics;

pub use metrics::StandardFontMetrics;

use crate::style::TextStyle;

/// The standard PDF fonts used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    /// All fonts the writer registers, in resource order (`/F0`, `/F1`).
    pub const ALL: [StandardFont; 2] = [StandardFont::Helvetica, StandardFont::HelveticaBold];

    /// The PDF base font name.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used in page content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "F0",
            Self::HelveticaBold => "F1",
        }
    }

    pub fn metrics(&self) -> &'static StandardFontMetrics {
        match self {
            Self::Helvetica => &metrics::HELVETICA,
            Self::HelveticaBold => &metrics::HELVETICA_BOLD,
        }
    }
}

/// Text measurement shared by the formatter and the layout engine.
///
/// Built fresh for every render; it holds no state across documents.
#[derive(Debug, Default)]
pub struct FontContext;

impl FontContext {
    pub fn new() -> Self {
        Self
    }

    /// Get the advance width of a single character in points.
    pub fn char_width(&self, ch: char, font: StandardFont, font_size: f64) -> f64 {
        font.metrics().char_width(ch, font_size)
    }

    /// Measure the width of a string in points.
    pub fn measure_string(&self, text: &str, font: StandardFont, font_size: f64) -> f64 {
        font.metrics().measure_string(text, font_size)
    }

    /// Measure a string set in the given text style.
    pub fn measure(&self, text: &str, style: &TextStyle) -> f64 {
        self.measure_string(text, style.font(), style.font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_context_helvetica() {
        let ctx = FontContext::new();
        let w = ctx.char_width(' ', StandardFont::Helvetica, 12.0);
        assert!((w - 3.336).abs() < 0.001);
    }

    #[test]
    fn test_font_context_bold_wider() {
        let ctx = FontContext::new();
        let regular = ctx.measure_string("abcdefg", StandardFont::Helvetica, 12.0);
        let bold = ctx.measure_string("abcdefg", StandardFont::HelveticaBold, 12.0);
        assert!(bold > regular, "Bold text should be wider than regular");
    }

    #[test]
    fn test_measure_scales_with_size() {
        let ctx = FontContext::new();
        let small = ctx.measure_string("Hello", StandardFont::Helvetica, 10.0);
        let large = ctx.measure_string("Hello", StandardFont::Helvetica, 20.0);
        assert!((large - 2.0 * small).abs() < 1e-9);
    }

    #[test]
    fn test_non_ascii_uses_fallback_width() {
        let ctx = FontContext::new();
        assert!(ctx.char_width('é', StandardFont::Helvetica, 10.0) > 0.0);
        assert!((ctx.char_width('\u{2014}', StandardFont::Helvetica, 10.0) - 10.0).abs() < 1e-9);
    }
}
