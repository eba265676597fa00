//! # Page Layout
//!
//! Places walker instructions onto fixed-size pages.
//!
//! Layout is strictly top to bottom. Before anything is drawn the engine asks
//! the [`PageCursor`] for room; if the block does not fit, the cursor opens a
//! new page and the block lands at its top margin. Multi-line blocks are
//! placed one line at a time, so a long value flows across pages instead of
//! overrunning the bottom margin.
//!
//! Headings reserve room for the first line that follows them so a heading
//! is never left alone at the bottom of a page.

pub mod cursor;

pub use cursor::PageCursor;

use crate::font::{FontContext, StandardFont};
use crate::style::{Color, TextRole, TextStyle, Theme};
use crate::text::wrap_text;
use crate::walker::{HeadingLevel, Instruction};

/// Physical page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    /// Uniform margin on all sides.
    pub margin: f64,
}

impl PageGeometry {
    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }
}

/// One finished page: its geometry and everything drawn on it.
#[derive(Debug, Clone)]
pub struct LayoutPage {
    pub geometry: PageGeometry,
    pub commands: Vec<DrawCommand>,
}

impl LayoutPage {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            commands: Vec::new(),
        }
    }

    /// Every text line on the page, in drawing order.
    pub fn text_lines(&self) -> impl Iterator<Item = &TextLine> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text(line) => Some(line),
            _ => None,
        })
    }

    /// Text content of every line on the page.
    pub fn texts(&self) -> Vec<&str> {
        self.text_lines().map(|l| l.text.as_str()).collect()
    }
}

/// A primitive to paint. Coordinates are top-down points from the page's
/// top-left corner; the PDF writer flips them.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Filled rectangle; `y` is its top edge.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Color,
    },
    /// Horizontal rule.
    Rule {
        x1: f64,
        x2: f64,
        y: f64,
        thickness: f64,
        color: Color,
    },
    Text(TextLine),
}

/// A single line of text, positioned at its baseline.
#[derive(Debug, Clone)]
pub struct TextLine {
    pub x: f64,
    /// Baseline, top-down.
    pub baseline: f64,
    pub text: String,
    pub font: StandardFont,
    pub font_size: f64,
    pub color: Color,
    pub role: TextRole,
}

const BULLET: &str = "\u{2022} ";
const RULE_THICKNESS: f64 = 0.75;
const RULE_GAP: f64 = 6.0;

/// Lays walker output onto a cursor.
pub struct LayoutEngine<'a> {
    fonts: &'a FontContext,
    theme: &'a Theme,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(fonts: &'a FontContext, theme: &'a Theme) -> Self {
        Self { fonts, theme }
    }

    /// Place every instruction, in order.
    pub fn layout(&self, cursor: &mut PageCursor, instructions: &[Instruction]) {
        for (i, instruction) in instructions.iter().enumerate() {
            let next = &instructions[i + 1..];
            match instruction {
                Instruction::Heading { text, level, depth } => {
                    self.layout_heading(cursor, text, *level, *depth, next)
                }
                Instruction::KeyValue { label, value, depth } => {
                    self.layout_key_value(cursor, label, value, *depth)
                }
                Instruction::ListItem { text, depth } => self.layout_list_item(cursor, text, *depth),
                Instruction::Paragraph { text, depth } => self.layout_paragraph(cursor, text, *depth),
            }
        }
    }

    fn layout_heading(
        &self,
        cursor: &mut PageCursor,
        text: &str,
        level: HeadingLevel,
        depth: usize,
        next: &[Instruction],
    ) {
        let (role, spacing) = heading_role(self.theme, level);
        let x = self.indent_x(cursor, depth);
        let lines = wrap_text(self.fonts, text, self.available_width(cursor, depth), self.theme.style(role));
        if lines.is_empty() {
            return;
        }

        let reserve = spacing + self.heading_block(lines.len(), level) + self.lead_height(cursor, next);
        if !cursor.ensure_space(reserve) {
            cursor.advance(spacing);
        }
        for line in &lines {
            self.place_line(cursor, x, line, role);
        }

        if level == HeadingLevel::Section {
            let y = cursor.y() + RULE_GAP / 2.0;
            let x2 = cursor.geometry().width - cursor.geometry().margin;
            cursor.draw(DrawCommand::Rule {
                x1: x,
                x2,
                y,
                thickness: RULE_THICKNESS,
                color: self.theme.rule_color,
            });
            cursor.advance(RULE_GAP);
        }
    }

    fn layout_key_value(&self, cursor: &mut PageCursor, label: &str, value: &str, depth: usize) {
        let key = self.theme.style(TextRole::Key);
        let body = self.theme.style(TextRole::Body);
        let x = self.indent_x(cursor, depth);
        let width = self.available_width(cursor, depth);

        let label_text = format!("{}:", label);
        let label_width = self.fonts.measure(&label_text, key) + self.fonts.measure(" ", key);
        let value = value.trim();

        if self.key_value_fits_one_line(label_width, value, width) {
            let height = key.line_advance().max(body.line_advance());
            cursor.ensure_space(height);
            let baseline = cursor.y() + baseline_offset(height, key.font_size.max(body.font_size));
            cursor.draw(self.text_at(x, baseline, &label_text, TextRole::Key));
            cursor.draw(self.text_at(x + label_width, baseline, value, TextRole::Body));
            cursor.advance(height);
        } else {
            let label_lines = wrap_text(self.fonts, &label_text, width, key);
            let value_lines = wrap_text(self.fonts, value, width - self.theme.indent, body);
            cursor.ensure_space(self.stacked_key_value_lead(label_lines.len()));
            for line in &label_lines {
                self.place_line(cursor, x, line, TextRole::Key);
            }
            for line in &value_lines {
                self.place_line(cursor, x + self.theme.indent, line, TextRole::Body);
            }
        }
        cursor.advance(self.theme.block_spacing);
    }

    fn layout_list_item(&self, cursor: &mut PageCursor, text: &str, depth: usize) {
        let style = self.theme.style(TextRole::ListItem);
        let x = self.indent_x(cursor, depth);
        let bullet_width = self.fonts.measure(BULLET, style);
        let lines = wrap_text(self.fonts, text, self.available_width(cursor, depth) - bullet_width, style);

        for (i, line) in lines.iter().enumerate() {
            if i == 0 {
                self.place_line(cursor, x, &format!("{}{}", BULLET, line), TextRole::ListItem);
            } else {
                self.place_line(cursor, x + bullet_width, line, TextRole::ListItem);
            }
        }
        if !lines.is_empty() {
            cursor.advance(self.theme.block_spacing);
        }
    }

    fn layout_paragraph(&self, cursor: &mut PageCursor, text: &str, depth: usize) {
        let style = self.theme.style(TextRole::Body);
        let x = self.indent_x(cursor, depth);
        let lines = wrap_text(self.fonts, text, self.available_width(cursor, depth), style);
        for line in &lines {
            self.place_line(cursor, x, line, TextRole::Body);
        }
        if !lines.is_empty() {
            cursor.advance(self.theme.block_spacing * 2.0);
        }
    }

    /// Reserve one line, draw it (blank lines only take up space), advance.
    fn place_line(&self, cursor: &mut PageCursor, x: f64, text: &str, role: TextRole) {
        let style = self.theme.style(role);
        let height = style.line_advance();
        cursor.ensure_space(height);
        if !text.is_empty() {
            let baseline = cursor.y() + baseline_offset(height, style.font_size);
            cursor.draw(self.text_at(x, baseline, text, role));
        }
        cursor.advance(height);
    }

    /// Build a text line in the given role's style.
    pub fn text_at(&self, x: f64, baseline: f64, text: &str, role: TextRole) -> DrawCommand {
        let style: &TextStyle = self.theme.style(role);
        DrawCommand::Text(TextLine {
            x,
            baseline,
            text: text.to_string(),
            font: style.font(),
            font_size: style.font_size,
            color: style.color,
            role,
        })
    }

    /// The space the first of `instructions` reserves before it draws
    /// anything: its leading spacing and first line, plus whatever a heading
    /// in turn keeps with itself. Zero when nothing follows.
    fn lead_height(&self, cursor: &PageCursor, instructions: &[Instruction]) -> f64 {
        let Some(instruction) = instructions.first() else {
            return 0.0;
        };
        let depth = instruction.depth();
        let width = self.available_width(cursor, depth);
        match instruction {
            Instruction::Heading { text, level, .. } => {
                let (role, spacing) = heading_role(self.theme, *level);
                let lines = wrap_text(self.fonts, text, width, self.theme.style(role)).len();
                if lines == 0 {
                    return self.lead_height(cursor, &instructions[1..]);
                }
                spacing + self.heading_block(lines, *level) + self.lead_height(cursor, &instructions[1..])
            }
            Instruction::KeyValue { label, value, .. } => {
                let key = self.theme.style(TextRole::Key);
                let body = self.theme.style(TextRole::Body);
                let label_text = format!("{}:", label);
                let label_width = self.fonts.measure(&label_text, key) + self.fonts.measure(" ", key);
                if self.key_value_fits_one_line(label_width, value.trim(), width) {
                    key.line_advance().max(body.line_advance())
                } else {
                    self.stacked_key_value_lead(wrap_text(self.fonts, &label_text, width, key).len())
                }
            }
            Instruction::ListItem { .. } => self.theme.style(TextRole::ListItem).line_advance(),
            Instruction::Paragraph { .. } => self.theme.style(TextRole::Body).line_advance(),
        }
    }

    /// Height of a heading's lines plus the gap under a section rule.
    fn heading_block(&self, lines: usize, level: HeadingLevel) -> f64 {
        let (role, _) = heading_role(self.theme, level);
        let rule = if level == HeadingLevel::Section {
            RULE_GAP
        } else {
            0.0
        };
        lines as f64 * self.theme.style(role).line_advance() + rule
    }

    fn key_value_fits_one_line(&self, label_width: f64, value: &str, width: f64) -> bool {
        !value.contains('\n') && label_width + self.fonts.measure(value, self.theme.style(TextRole::Body)) <= width
    }

    /// Label lines plus the first value line of a key/value that wraps below
    /// its label.
    fn stacked_key_value_lead(&self, label_lines: usize) -> f64 {
        label_lines as f64 * self.theme.style(TextRole::Key).line_advance()
            + self.theme.style(TextRole::Body).line_advance()
    }

    fn indent_x(&self, cursor: &PageCursor, depth: usize) -> f64 {
        cursor.geometry().margin + self.indent(cursor, depth)
    }

    fn available_width(&self, cursor: &PageCursor, depth: usize) -> f64 {
        cursor.geometry().content_width() - self.indent(cursor, depth)
    }

    /// Indentation for a nesting depth, capped at half the content width.
    fn indent(&self, cursor: &PageCursor, depth: usize) -> f64 {
        (depth as f64 * self.theme.indent).min(cursor.geometry().content_width() / 2.0)
    }
}

fn heading_role(theme: &Theme, level: HeadingLevel) -> (TextRole, f64) {
    match level {
        HeadingLevel::Section => (TextRole::SectionHeading, theme.section_spacing),
        HeadingLevel::SubSection => (TextRole::SubHeading, theme.sub_heading_spacing),
    }
}

/// Baseline position within a line slot of `height` for text of `font_size`:
/// glyphs are centred in the slot and the baseline never leaves it.
pub fn baseline_offset(height: f64, font_size: f64) -> f64 {
    ((height - font_size) / 2.0 + 0.8 * font_size).min(height)
}
