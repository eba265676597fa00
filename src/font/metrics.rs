//! Advance widths for the standard Helvetica faces, taken from the Adobe
//! Font Metrics files. Widths are in 1/1000 em.

/// Width table for one standard font.
pub struct StandardFontMetrics {
    /// Widths for U+0020..=U+007E.
    ascii: &'static [u16; 95],
    /// Width used for Latin-1 and other WinAnsi characters not listed below.
    default_width: u16,
}

#[rustfmt::skip]
static HELVETICA_ASCII: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

pub static HELVETICA: StandardFontMetrics = StandardFontMetrics {
    ascii: &HELVETICA_ASCII,
    default_width: 556,
};

pub static HELVETICA_BOLD: StandardFontMetrics = StandardFontMetrics {
    ascii: &HELVETICA_BOLD_ASCII,
    default_width: 611,
};

impl StandardFontMetrics {
    /// Advance width of `ch` in 1/1000 em.
    pub fn char_units(&self, ch: char) -> u16 {
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) {
            return self.ascii[(cp - 0x20) as usize];
        }
        match ch {
            '\u{00A0}' => self.ascii[0],
            '\u{2022}' => 350,             // bullet
            '\u{2013}' => 556,             // en dash
            '\u{2014}' | '\u{2026}' => 1000, // em dash, ellipsis
            '\u{2018}' | '\u{2019}' => 222,
            '\u{201C}' | '\u{201D}' => 333,
            '\u{20AC}' => 556,
            _ => self.default_width,
        }
    }

    /// Width of a character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        self.char_units(ch) as f64 / 1000.0 * font_size
    }

    /// Width of a string in points.
    pub fn measure_string(&self, text: &str, font_size: f64) -> f64 {
        let units: u32 = text.chars().map(|c| self.char_units(c) as u32).sum();
        units as f64 / 1000.0 * font_size
    }
}
