//! # Styling
//!
//! Colours, text roles, and the theme that maps every role to a concrete
//! font, size, line height, and colour.
//!
//! Report documents only have a handful of visual roles (a heading is a
//! heading, a value is a value) so there is no cascade here: the layout
//! engine asks the theme for the style of a role and draws with it.

use serde::{Deserialize, Serialize};

use crate::font::StandardFont;

/// An RGBA color.
///
/// Deserializes from either a `"#rrggbb"` / `"#rgb"` string or an
/// `{ "r": .., "g": .., "b": .., "a": .. }` object with channels in 0..1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ColorRepr")]
pub struct Color {
    pub r: f64, // 0.0 - 1.0
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Rgba {
        r: f64,
        g: f64,
        b: f64,
        #[serde(default = "opaque")]
        a: f64,
    },
}

fn opaque() -> f64 {
    1.0
}

impl From<ColorRepr> for Color {
    fn from(repr: ColorRepr) -> Self {
        match repr {
            ColorRepr::Hex(s) => Color::hex(&s),
            ColorRepr::Rgba { r, g, b, a } => Color { r, g, b, a },
        }
    }
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rgb` or `#rrggbb`. Anything else is black.
    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        let channel = |s: &str| u8::from_str_radix(s, 16).unwrap_or(0);
        let (r, g, b) = match hex.len() {
            3 if hex.is_ascii() => (
                channel(&hex[0..1].repeat(2)),
                channel(&hex[1..2].repeat(2)),
                channel(&hex[2..3].repeat(2)),
            ),
            6 if hex.is_ascii() => (channel(&hex[0..2]), channel(&hex[2..4]), channel(&hex[4..6])),
            _ => (0, 0, 0),
        };
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// The semantic role of a piece of text. Each role has its own style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextRole {
    /// Report title inside the header band.
    Title,
    /// Secondary line inside the header band.
    Subtitle,
    /// Top-level section heading, underlined with a rule.
    SectionHeading,
    /// Nested object or list heading.
    SubHeading,
    /// The label half of a key/value field.
    Key,
    /// Field values and prose paragraphs.
    Body,
    /// A bulleted list line.
    ListItem,
    /// Page footer.
    Footer,
}

/// Concrete text styling for one role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub bold: bool,
    pub font_size: f64,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
    pub color: Color,
}

impl TextStyle {
    pub const fn new(bold: bool, font_size: f64, line_height: f64, color: Color) -> Self {
        Self {
            bold,
            font_size,
            line_height,
            color,
        }
    }

    pub fn font(&self) -> StandardFont {
        if self.bold {
            StandardFont::HelveticaBold
        } else {
            StandardFont::Helvetica
        }
    }

    /// Vertical space one line of this style consumes, in points.
    pub fn line_advance(&self) -> f64 {
        self.font_size * self.line_height
    }
}

const DARK: Color = Color {
    r: 0.11,
    g: 0.13,
    b: 0.2,
    a: 1.0,
};
const MUTED: Color = Color {
    r: 0.33,
    g: 0.37,
    b: 0.45,
    a: 1.0,
};
const BODY: Color = Color {
    r: 0.2,
    g: 0.22,
    b: 0.26,
    a: 1.0,
};
const FAINT: Color = Color {
    r: 0.55,
    g: 0.58,
    b: 0.63,
    a: 1.0,
};

/// Role styles plus the spacing rules the layout engine applies between
/// blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub title: TextStyle,
    pub subtitle: TextStyle,
    pub section_heading: TextStyle,
    pub sub_heading: TextStyle,
    pub key: TextStyle,
    pub body: TextStyle,
    pub list_item: TextStyle,
    pub footer: TextStyle,
    /// Colour of the rule drawn under section headings.
    pub rule_color: Color,
    /// Horizontal indentation per nesting level, in points.
    pub indent: f64,
    /// Space above a section heading.
    pub section_spacing: f64,
    /// Space above a sub-heading.
    pub sub_heading_spacing: f64,
    /// Space below every key/value field, list item, and paragraph.
    pub block_spacing: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: TextStyle::new(true, 20.0, 1.2, Color::WHITE),
            subtitle: TextStyle::new(false, 11.0, 1.3, Color::rgb(0.85, 0.88, 0.95)),
            section_heading: TextStyle::new(true, 15.0, 1.4, DARK),
            sub_heading: TextStyle::new(true, 12.0, 1.4, MUTED),
            key: TextStyle::new(true, 10.0, 1.5, MUTED),
            body: TextStyle::new(false, 10.0, 1.5, BODY),
            list_item: TextStyle::new(false, 10.0, 1.5, BODY),
            footer: TextStyle::new(false, 8.0, 1.2, FAINT),
            rule_color: Color::rgb(0.82, 0.85, 0.9),
            indent: 12.0,
            section_spacing: 14.0,
            sub_heading_spacing: 6.0,
            block_spacing: 3.0,
        }
    }
}

impl Theme {
    /// The style for a text role.
    pub fn style(&self, role: TextRole) -> &TextStyle {
        match role {
            TextRole::Title => &self.title,
            TextRole::Subtitle => &self.subtitle,
            TextRole::SectionHeading => &self.section_heading,
            TextRole::SubHeading => &self.sub_heading,
            TextRole::Key => &self.key,
            TextRole::Body => &self.body,
            TextRole::ListItem => &self.list_item,
            TextRole::Footer => &self.footer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colors() {
        let c = Color::hex("#ff8000");
        assert!((c.r - 1.0).abs() < 1e-9);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(c.b, 0.0);
        assert_eq!(Color::hex("#fff"), Color::WHITE);
        assert_eq!(Color::hex("nonsense"), Color::BLACK);
    }

    #[test]
    fn test_color_deserializes_from_hex_or_object() {
        let c: Color = serde_json::from_str("\"#000000\"").unwrap();
        assert_eq!(c, Color::BLACK);
        let c: Color = serde_json::from_str(r#"{"r": 1, "g": 1, "b": 1}"#).unwrap();
        assert_eq!(c, Color::WHITE);
    }

    #[test]
    fn test_roles_have_distinct_styling() {
        let theme = Theme::default();
        let heading = theme.style(TextRole::SectionHeading);
        let key = theme.style(TextRole::Key);
        let body = theme.style(TextRole::Body);
        assert!(heading.bold && key.bold && !body.bold);
        assert!(heading.font_size > key.font_size);
        assert_ne!(heading.color, key.color);
        assert_ne!(key.color, body.color);
    }
}
