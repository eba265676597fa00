//! # Text Formatting
//!
//! Label formatting for raw data keys, greedy line wrapping, and single-line
//! truncation.
//!
//! Wrapping only ever happens at whitespace. A word wider than the available
//! width is placed alone on its own line and allowed to overflow; splitting
//! inside words would mangle identifiers, URLs and amounts.

use crate::font::FontContext;
use crate::style::TextStyle;

/// Turn a raw object key into a display label.
///
/// `projectName` → `Project Name`, `token_supply` → `Token supply`,
/// `ROIValue` → `ROI Value`. Acronyms written in capitals stay intact, and a
/// label that is already formatted comes back unchanged. Hyphens and interior
/// spacing are left alone; only the ends are trimmed.
pub fn format_label(key: &str) -> String {
    let chars: Vec<char> = key.chars().map(|c| if c == '_' { ' ' } else { c }).collect();

    let mut spaced = String::with_capacity(key.len() + 4);
    for (i, &ch) in chars.iter().enumerate() {
        if i > 0 && ch.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                spaced.push(' ');
            }
        }
        spaced.push(ch);
    }

    let trimmed = spaced.trim();
    let mut rest = trimmed.chars();
    let Some(first) = rest.next() else {
        return String::new();
    };
    // Characters whose capital spans several chars (`ß` → `SS`) stay as written.
    let mut upper = first.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(cap), None) => std::iter::once(cap).chain(rest).collect(),
        _ => trimmed.to_string(),
    }
}

/// Wrap `value` into lines no wider than `max_width` under `style`.
///
/// Explicit newlines always start a new line; blank lines between paragraphs
/// are kept as empty strings. A blank value produces no lines at all, which
/// callers take as "skip this field".
pub fn wrap_text(fonts: &FontContext, value: &str, max_width: f64, style: &TextStyle) -> Vec<String> {
    let value = value.trim();
    if value.is_empty() {
        return Vec::new();
    }

    let space_width = fonts.measure(" ", style);
    let mut lines = Vec::new();

    for paragraph in value.lines() {
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in paragraph.split_whitespace() {
            let word_width = fonts.measure(word, style);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space_width + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += space_width + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            }
        }

        // An empty `current` here is a blank line between paragraphs.
        lines.push(current);
    }

    lines
}

/// Shorten `text` to fit `max_width` on one line, ending it with an ellipsis
/// when anything had to be cut.
pub fn truncate_to_width(fonts: &FontContext, text: &str, max_width: f64, style: &TextStyle) -> String {
    if fonts.measure(text, style) <= max_width {
        return text.to_string();
    }

    let ellipsis = '\u{2026}';
    let budget = max_width - fonts.measure(&ellipsis.to_string(), style);
    let mut out = String::new();
    let mut width = 0.0;
    for ch in text.chars() {
        let w = fonts.char_width(ch, style.font(), style.font_size);
        if width + w > budget {
            break;
        }
        out.push(ch);
        width += w;
    }

    let mut out = out.trim_end().to_string();
    out.push(ellipsis);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Theme;

    fn body() -> TextStyle {
        Theme::default().body
    }

    #[test]
    fn test_format_label_camel_case() {
        assert_eq!(format_label("projectName"), "Project Name");
        assert_eq!(format_label("ProjectName"), "Project Name");
        assert_eq!(format_label("tokenSupplyTotal"), "Token Supply Total");
    }

    #[test]
    fn test_format_label_underscores() {
        assert_eq!(format_label("token_supply"), "Token supply");
        assert_eq!(format_label("__weird__key__"), "Weird  key");
    }

    #[test]
    fn test_format_label_acronyms() {
        assert_eq!(format_label("ROI"), "ROI");
        assert_eq!(format_label("ROIValue"), "ROI Value");
        assert_eq!(format_label("expectedROI"), "Expected ROI");
        assert_eq!(format_label("q1Revenue"), "Q1 Revenue");
    }

    #[test]
    fn test_format_label_is_idempotent() {
        for key in ["projectName", "ROIValue", "token_supply", "Already Clean", "a", "", "expectedROI"] {
            let once = format_label(key);
            assert_eq!(format_label(&once), once, "not idempotent for {key:?}");
        }
        assert_eq!(format_label("Monthly revenue"), "Monthly revenue");
    }

    #[test]
    fn test_format_label_keeps_hyphens() {
        assert_eq!(format_label("Follow-up Date"), "Follow-up Date");
        assert_eq!(format_label("Year-over-year Growth"), "Year-over-year Growth");
        assert_eq!(format_label("follow-upDate"), "Follow-up Date");
    }

    #[test]
    fn test_format_label_multi_char_capital() {
        assert_eq!(format_label("ßeta"), "ßeta");
        assert_eq!(format_label(&format_label("ßeta")), "ßeta");
        assert_eq!(format_label("éclair_count"), "Éclair count");
    }

    #[test]
    fn test_wrap_short_value_single_line() {
        let fc = FontContext::new();
        let lines = wrap_text(&fc, "Hello world", 200.0, &body());
        assert_eq!(lines, vec!["Hello world"]);
    }

    #[test]
    fn test_wrap_breaks_at_whitespace() {
        let fc = FontContext::new();
        let style = body();
        let text = "the quick brown fox jumps over the lazy dog again and again";
        let lines = wrap_text(&fc, text, 80.0, &style);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(fc.measure(line, &style) <= 80.0, "line too wide: {line:?}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_is_greedy_minimal() {
        let fc = FontContext::new();
        let style = body();
        let width = fc.measure("aaa bbb", &style) + 0.5;
        let lines = wrap_text(&fc, "aaa bbb ccc ddd", width, &style);
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn test_wrap_oversized_word_stays_whole() {
        let fc = FontContext::new();
        let long = "supercalifragilisticexpialidocious";
        let lines = wrap_text(&fc, &format!("a {long} b"), 30.0, &body());
        assert_eq!(lines, vec!["a", long, "b"]);
    }

    #[test]
    fn test_wrap_empty_value_has_no_lines() {
        let fc = FontContext::new();
        assert!(wrap_text(&fc, "", 100.0, &body()).is_empty());
        assert!(wrap_text(&fc, "   \n  ", 100.0, &body()).is_empty());
    }

    #[test]
    fn test_wrap_keeps_paragraph_breaks() {
        let fc = FontContext::new();
        let lines = wrap_text(&fc, "first\n\nsecond", 200.0, &body());
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn test_truncate_to_width() {
        let fc = FontContext::new();
        let style = body();
        assert_eq!(truncate_to_width(&fc, "short", 200.0, &style), "short");
        let cut = truncate_to_width(&fc, "a rather long report title that will not fit", 60.0, &style);
        assert!(cut.ends_with('\u{2026}'));
        assert!(fc.measure(&cut, &style) <= 60.0);
    }
}
