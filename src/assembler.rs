//! # Document Assembler
//!
//! Runs one complete render: opens the first page, paints the header band,
//! walks the input into instructions, lays them out, stamps `Page i of N`
//! footers on every page, and serializes the result.
//!
//! Each call builds its own font context, cursor and writer. Nothing is
//! shared between renders, so two renders of the same input are fully
//! independent and may run on different threads at once.

use std::path::{Path, PathBuf};

use crate::config::ReportConfig;
use crate::error::DossierError;
use crate::font::FontContext;
use crate::layout::{baseline_offset, DrawCommand, LayoutEngine, LayoutPage, PageCursor, PageGeometry};
use crate::model::ReportInput;
use crate::pdf::{Metadata, PdfWriter};
use crate::style::TextRole;
use crate::text::truncate_to_width;
use crate::walker::{sections_to_instructions, Instruction, StructureWalker};

/// A finished document.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Suggested file name, derived from the title.
    pub file_name: String,
    /// The PDF file contents.
    pub bytes: Vec<u8>,
    /// The laid-out pages the PDF was written from.
    pub pages: Vec<LayoutPage>,
}

impl RenderedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Write the PDF into `dir` under [`RenderedDocument::file_name`].
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf, DossierError> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes).map_err(|e| DossierError::io(&path, e))?;
        log::info!("wrote {} bytes to {}", self.bytes.len(), path.display());
        Ok(path)
    }
}

/// Renders titled reports under one configuration.
pub struct DocumentAssembler {
    config: ReportConfig,
}

impl DocumentAssembler {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Render `input` under `title` to a PDF.
    pub fn render(&self, title: &str, input: &ReportInput) -> RenderedDocument {
        let pages = self.layout(title, input);
        let metadata = Metadata {
            title: Some(title.to_string()),
            subject: self.config.subtitle.clone(),
            creator: Some(self.config.product_name.clone()),
        };
        let bytes = PdfWriter::new().write(&pages, &metadata);
        log::info!("rendered {:?}: {} page(s), {} bytes", title, pages.len(), bytes.len());

        RenderedDocument {
            file_name: file_name_for(title),
            bytes,
            pages,
        }
    }

    /// Lay out `input` without serializing it.
    pub fn layout(&self, title: &str, input: &ReportInput) -> Vec<LayoutPage> {
        let fonts = FontContext::new();
        let engine = LayoutEngine::new(&fonts, &self.config.theme);
        let mut cursor = PageCursor::new(self.geometry());

        self.draw_header(&mut cursor, &engine, &fonts, title);
        engine.layout(&mut cursor, &self.instructions(input));

        let mut pages = cursor.into_pages();
        self.stamp_footers(&mut pages, &engine, &fonts);
        pages
    }

    /// The walker output for an input, whichever shape it has.
    pub fn instructions(&self, input: &ReportInput) -> Vec<Instruction> {
        match input {
            ReportInput::Data(root) => {
                let excluded = self.config.exclusion_set();
                StructureWalker::new(&excluded, self.config.max_depth).walk(root)
            }
            ReportInput::Sections(sections) => sections_to_instructions(sections),
        }
    }

    fn geometry(&self) -> PageGeometry {
        let (width, height) = self.config.page.size.dimensions();
        PageGeometry {
            width,
            height,
            margin: self.config.page.margin,
        }
    }

    /// Paint the band with title and subtitle and move the cursor below it.
    fn draw_header(&self, cursor: &mut PageCursor, engine: &LayoutEngine<'_>, fonts: &FontContext, title: &str) {
        let header = &self.config.header;
        let theme = &self.config.theme;
        let geometry = *cursor.geometry();

        cursor.draw(DrawCommand::Rect {
            x: 0.0,
            y: 0.0,
            width: geometry.width,
            height: header.height,
            fill: header.background,
        });

        let mut lines: Vec<(String, TextRole)> = Vec::new();
        let title = title.trim();
        if !title.is_empty() {
            lines.push((
                truncate_to_width(fonts, title, geometry.content_width(), &theme.title),
                TextRole::Title,
            ));
        }
        if let Some(subtitle) = self.config.subtitle.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            lines.push((
                truncate_to_width(fonts, subtitle, geometry.content_width(), &theme.subtitle),
                TextRole::Subtitle,
            ));
        }

        let block: f64 = lines.iter().map(|(_, role)| theme.style(*role).line_advance()).sum();
        let mut y = ((header.height - block) / 2.0).max(0.0);
        for (text, role) in &lines {
            let style = theme.style(*role);
            let height = style.line_advance();
            cursor.draw(engine.text_at(geometry.margin, y + baseline_offset(height, style.font_size), text, *role));
            y += height;
        }

        cursor.advance(header.height + header.spacing_after - geometry.margin);
    }

    /// Stamp `Page i of N — product` centred below the bottom margin.
    fn stamp_footers(&self, pages: &mut [LayoutPage], engine: &LayoutEngine<'_>, fonts: &FontContext) {
        let total = pages.len();
        let style = &self.config.theme.footer;
        for (i, page) in pages.iter_mut().enumerate() {
            let text = footer_text(i + 1, total, &self.config.product_name);
            let width = fonts.measure(&text, style);
            let x = ((page.geometry.width - width) / 2.0).max(0.0);
            let baseline = page.geometry.height - page.geometry.margin / 2.0;
            page.commands.push(engine.text_at(x, baseline, &text, TextRole::Footer));
        }
    }
}

/// Footer text for one page.
pub fn footer_text(page: usize, total: usize, product_name: &str) -> String {
    let product_name = product_name.trim();
    if product_name.is_empty() {
        format!("Page {} of {}", page, total)
    } else {
        format!("Page {} of {} \u{2014} {}", page, total, product_name)
    }
}

/// File name for a report title: whitespace runs and characters that are
/// unsafe in file names become underscores, and `.pdf` is appended.
pub fn file_name_for(title: &str) -> String {
    let joined = title.split_whitespace().collect::<Vec<_>>().join("_");
    let stem: String = joined
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim_matches('.');
    if stem.is_empty() {
        "document.pdf".to_string()
    } else {
        format!("{}.pdf", stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TextLine;
    use crate::model::{DataNode, Section};
    use serde_json::json;

    fn data(value: serde_json::Value) -> ReportInput {
        ReportInput::Data(DataNode::from(value))
    }

    #[test]
    fn test_file_name_for() {
        assert_eq!(file_name_for("Test Report"), "Test_Report.pdf");
        assert_eq!(file_name_for("  Business   Plan 2026 "), "Business_Plan_2026.pdf");
        assert_eq!(file_name_for("a/b: c"), "a_b__c.pdf");
        assert_eq!(file_name_for("   "), "document.pdf");
        assert_eq!(file_name_for(".."), "document.pdf");
    }

    #[test]
    fn test_footer_text() {
        assert_eq!(footer_text(1, 3, "Dossier"), "Page 1 of 3 \u{2014} Dossier");
        assert_eq!(footer_text(2, 2, ""), "Page 2 of 2");
    }

    #[test]
    fn test_header_band_on_first_page_only() {
        let assembler = DocumentAssembler::new(ReportConfig::default().with_subtitle("Plan"));
        let many: serde_json::Map<String, serde_json::Value> =
            (0..120).map(|i| (format!("field{i}"), json!("value"))).collect();
        let pages = assembler.layout("Title", &data(serde_json::Value::Object(many)));
        assert!(pages.len() > 1);
        assert!(matches!(pages[0].commands[0], DrawCommand::Rect { y, .. } if y == 0.0));
        assert!(!pages[1].commands.iter().any(|c| matches!(c, DrawCommand::Rect { .. })));

        let first: Vec<&TextLine> = pages[0].text_lines().collect();
        assert_eq!(first[0].text, "Title");
        assert_eq!(first[0].role, TextRole::Title);
        assert_eq!(first[1].text, "Plan");
        assert_eq!(first[1].role, TextRole::Subtitle);
    }

    #[test]
    fn test_body_starts_below_header() {
        let config = ReportConfig::default();
        let band = config.header.height;
        let pages = DocumentAssembler::new(config).layout("T", &data(json!({"a": 1})));
        let key = pages[0].text_lines().find(|l| l.role == TextRole::Key).unwrap();
        assert!(key.baseline > band);
    }

    #[test]
    fn test_every_page_gets_a_footer() {
        let assembler = DocumentAssembler::new(ReportConfig::default().with_product_name("Sim"));
        let many: serde_json::Map<String, serde_json::Value> =
            (0..150).map(|i| (format!("k{i}"), json!(i))).collect();
        let pages = assembler.layout("T", &data(serde_json::Value::Object(many)));
        let total = pages.len();
        for (i, page) in pages.iter().enumerate() {
            let footers: Vec<&TextLine> = page.text_lines().filter(|l| l.role == TextRole::Footer).collect();
            assert_eq!(footers.len(), 1);
            assert_eq!(footers[0].text, format!("Page {} of {} \u{2014} Sim", i + 1, total));
            assert!(footers[0].baseline > page.geometry.height - page.geometry.margin);
            assert!(footers[0].baseline < page.geometry.height);
        }
    }

    #[test]
    fn test_sections_mode_renders_prose_verbatim() {
        let assembler = DocumentAssembler::new(ReportConfig::default());
        let input = ReportInput::Sections(vec![Section::new("Executive Summary", "Tokenize the asset.")]);
        let pages = assembler.layout("Plan", &input);
        let texts = pages[0].texts();
        assert!(texts.contains(&"Executive Summary"));
        assert!(texts.contains(&"Tokenize the asset."));
    }

    #[test]
    fn test_long_title_is_truncated_in_header() {
        let assembler = DocumentAssembler::new(ReportConfig::default());
        let title = "An extremely long report title ".repeat(10);
        let pages = assembler.layout(&title, &data(json!({})));
        let line = pages[0].text_lines().next().unwrap();
        assert!(line.text.ends_with('\u{2026}'));
    }

    #[test]
    fn test_render_produces_pdf_and_file_name() {
        let doc = DocumentAssembler::new(ReportConfig::default()).render("Test Report", &data(json!({"a": 1})));
        assert_eq!(doc.file_name, "Test_Report.pdf");
        assert_eq!(doc.page_count(), 1);
        assert!(doc.bytes.starts_with(b"%PDF-1.7"));
    }

    #[test]
    fn test_save_reports_failures() {
        let doc = DocumentAssembler::new(ReportConfig::default()).render("x", &data(json!({})));
        let err = doc.save("/nonexistent/dir/for/dossier").unwrap_err();
        assert!(matches!(err, DossierError::IoError { .. }));
    }
}
