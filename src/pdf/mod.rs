//! # PDF Serializer
//!
//! Takes laid-out pages and writes a valid PDF file.
//!
//! This is a from-scratch PDF 1.7 writer. Reports only need filled
//! rectangles, rules, and text in the standard Helvetica faces, so the
//! subset of the format involved is small and we write the bytes directly.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- catalog, page tree, fonts, pages, content streams
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Output is deterministic: the same pages always produce the same bytes.

use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::font::StandardFont;
use crate::layout::{DrawCommand, LayoutPage, TextLine};
use crate::style::Color;

/// Document-level information recorded in the Info dictionary.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
}

pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    /// Object bodies; index is the object number, index 0 is unused.
    objects: Vec<Vec<u8>>,
}

impl PdfBuilder {
    fn new() -> Self {
        Self {
            objects: vec![Vec::new()],
        }
    }

    /// Reserve an object number to be filled in later.
    fn reserve(&mut self) -> usize {
        self.objects.push(Vec::new());
        self.objects.len() - 1
    }

    fn add(&mut self, data: Vec<u8>) -> usize {
        self.objects.push(data);
        self.objects.len() - 1
    }

    fn set(&mut self, id: usize, data: Vec<u8>) {
        self.objects[id] = data;
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write laid-out pages to a PDF byte vector.
    pub fn write(&self, pages: &[LayoutPage], metadata: &Metadata) -> Vec<u8> {
        let mut builder = PdfBuilder::new();

        let catalog_id = builder.reserve();
        let pages_id = builder.reserve();

        let font_ids: Vec<(StandardFont, usize)> = StandardFont::ALL
            .iter()
            .map(|font| {
                let dict = format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    font.pdf_name()
                );
                (*font, builder.add(dict.into_bytes()))
            })
            .collect();
        let font_resources: String = font_ids
            .iter()
            .map(|(font, id)| format!("/{} {} 0 R", font.resource_name(), id))
            .collect::<Vec<_>>()
            .join(" ");

        let mut page_obj_ids: Vec<usize> = Vec::with_capacity(pages.len());
        for page in pages {
            let content = self.build_content_stream(page);
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            let content_obj_id = builder.add(content_data);

            let page_dict = format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << /Font << {} >> >> >>",
                pages_id, page.geometry.width, page.geometry.height, content_obj_id, font_resources
            );
            page_obj_ids.push(builder.add(page_dict.into_bytes()));
        }

        builder.set(
            catalog_id,
            format!("<< /Type /Catalog /Pages {} 0 R >>", pages_id).into_bytes(),
        );

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.set(
            pages_id,
            format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, page_obj_ids.len()).into_bytes(),
        );

        let mut info = String::from("<< ");
        if let Some(ref title) = metadata.title {
            let _ = write!(info, "/Title {} ", Self::text_string(title));
        }
        if let Some(ref subject) = metadata.subject {
            let _ = write!(info, "/Subject {} ", Self::text_string(subject));
        }
        if let Some(ref creator) = metadata.creator {
            let _ = write!(info, "/Creator {} ", Self::text_string(creator));
        }
        let _ = write!(info, "/Producer (Dossier {}) >>", env!("CARGO_PKG_VERSION"));
        let info_id = builder.add(info.into_bytes());

        self.serialize(&builder, catalog_id, info_id)
    }

    /// Build the PDF content stream for a single page.
    fn build_content_stream(&self, page: &LayoutPage) -> String {
        let mut stream = String::new();
        let page_height = page.geometry.height;

        for command in &page.commands {
            match command {
                DrawCommand::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                } => {
                    let pdf_y = page_height - y - height;
                    let _ = write!(
                        stream,
                        "q\n{}{:.2} {:.2} {:.2} {:.2} re\nf\nQ\n",
                        Self::fill_color(fill),
                        x,
                        pdf_y,
                        width,
                        height
                    );
                }
                DrawCommand::Rule {
                    x1,
                    x2,
                    y,
                    thickness,
                    color,
                } => {
                    let pdf_y = page_height - y;
                    let _ = write!(
                        stream,
                        "q\n{:.3} {:.3} {:.3} RG\n{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                        color.r, color.g, color.b, thickness, x1, pdf_y, x2, pdf_y
                    );
                }
                DrawCommand::Text(line) => self.write_text(&mut stream, line, page_height),
            }
        }

        stream
    }

    fn write_text(&self, stream: &mut String, line: &TextLine, page_height: f64) {
        let _ = write!(
            stream,
            "BT\n{}/{} {:.1} Tf\n{:.2} {:.2} Td\n{} Tj\nET\n",
            Self::fill_color(&line.color),
            line.font.resource_name(),
            line.font_size,
            line.x,
            page_height - line.baseline,
            Self::encode_winansi(&line.text)
        );
    }

    fn fill_color(color: &Color) -> String {
        format!("{:.3} {:.3} {:.3} rg\n", color.r, color.g, color.b)
    }

    /// Encode text as a WinAnsi literal string for a `Tj` operator.
    /// Characters outside WinAnsi become `?`.
    fn encode_winansi(text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 2);
        out.push('(');
        for ch in text.chars() {
            let b = Self::unicode_to_winansi(ch).unwrap_or(b'?');
            match b {
                b'\\' => out.push_str("\\\\"),
                b'(' => out.push_str("\\("),
                b')' => out.push_str("\\)"),
                0x20..=0x7E => out.push(b as char),
                _ => {
                    // Octal escape for bytes outside ASCII printable range
                    let _ = write!(out, "\\{:03o}", b);
                }
            }
        }
        out.push(')');
        out
    }

    /// Encode an Info dictionary string: plain literal for ASCII,
    /// UTF-16BE hex with BOM otherwise.
    fn text_string(s: &str) -> String {
        if s.chars().all(|c| (' '..='~').contains(&c)) {
            format!("({})", Self::escape_pdf_string(s))
        } else {
            let mut hex = String::from("<FEFF");
            for unit in s.encode_utf16() {
                let _ = write!(hex, "{:04X}", unit);
            }
            hex.push('>');
            hex
        }
    }

    fn escape_pdf_string(s: &str) -> String {
        s.replace('\\', "\\\\").replace('(', "\\(").replace(')', "\\)")
    }

    fn unicode_to_winansi(ch: char) -> Option<u8> {
        let cp = ch as u32;
        // ASCII printable and Latin-1 map directly
        if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
            return Some(cp as u8);
        }
        // Windows-1252 special mappings (0x80-0x9F)
        match cp {
            0x20AC => Some(0x80), // Euro sign
            0x201A => Some(0x82), // Single low-9 quotation mark
            0x0192 => Some(0x83), // Latin small letter f with hook
            0x201E => Some(0x84), // Double low-9 quotation mark
            0x2026 => Some(0x85), // Horizontal ellipsis
            0x2020 => Some(0x86), // Dagger
            0x2021 => Some(0x87), // Double dagger
            0x02C6 => Some(0x88), // Modifier letter circumflex accent
            0x2030 => Some(0x89), // Per mille sign
            0x0160 => Some(0x8A), // Latin capital letter S with caron
            0x2039 => Some(0x8B), // Single left-pointing angle quotation
            0x0152 => Some(0x8C), // Latin capital ligature OE
            0x017D => Some(0x8E), // Latin capital letter Z with caron
            0x2018 => Some(0x91), // Left single quotation mark
            0x2019 => Some(0x92), // Right single quotation mark
            0x201C => Some(0x93), // Left double quotation mark
            0x201D => Some(0x94), // Right double quotation mark
            0x2022 => Some(0x95), // Bullet
            0x2013 => Some(0x96), // En dash
            0x2014 => Some(0x97), // Em dash
            0x02DC => Some(0x98), // Small tilde
            0x2122 => Some(0x99), // Trade mark sign
            0x0161 => Some(0x9A), // Latin small letter s with caron
            0x203A => Some(0x9B), // Single right-pointing angle quotation
            0x0153 => Some(0x9C), // Latin small ligature oe
            0x017E => Some(0x9E), // Latin small letter z with caron
            0x0178 => Some(0x9F), // Latin capital letter Y with diaeresis
            _ => None,
        }
    }

    fn serialize(&self, builder: &PdfBuilder, catalog_id: usize, info_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        // Header
        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let _ = write!(output, "{} 0 obj\n", i);
            output.extend_from_slice(obj);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            catalog_id,
            info_id,
            xref_offset
        );

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageGeometry;
    use crate::style::TextRole;

    fn page_with(commands: Vec<DrawCommand>) -> LayoutPage {
        LayoutPage {
            geometry: PageGeometry {
                width: 200.0,
                height: 100.0,
                margin: 10.0,
            },
            commands,
        }
    }

    fn content_of(pdf: &[u8]) -> String {
        let start = pdf.windows(7).position(|w| w == b"stream\n").unwrap() + 7;
        let end = pdf.windows(10).position(|w| w == b"\nendstream").unwrap();
        let raw = miniz_oxide::inflate::decompress_to_vec_zlib(&pdf[start..end]).unwrap();
        String::from_utf8_lossy(&raw).into_owned()
    }

    #[test]
    fn test_escape_pdf_string() {
        assert_eq!(PdfWriter::escape_pdf_string("a(b)c\\d"), "a\\(b\\)c\\\\d");
    }

    #[test]
    fn test_winansi_encoding() {
        assert_eq!(PdfWriter::encode_winansi("Hi (x)"), "(Hi \\(x\\))");
        assert_eq!(PdfWriter::encode_winansi("\u{2022} a"), "(\\225 a)");
        assert_eq!(PdfWriter::encode_winansi("1 \u{2014} 2"), "(1 \\227 2)");
        assert_eq!(PdfWriter::encode_winansi("\u{4e2d}"), "(?)");
    }

    #[test]
    fn test_text_string_unicode_uses_utf16() {
        assert_eq!(PdfWriter::text_string("Plain"), "(Plain)");
        assert_eq!(PdfWriter::text_string("é"), "<FEFF00E9>");
    }

    #[test]
    fn test_empty_document_produces_valid_pdf() {
        let bytes = PdfWriter::new().write(&[page_with(vec![])], &Metadata::default());
        assert!(bytes.starts_with(b"%PDF-1.7"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Type /Catalog"));
        assert!(text.contains("/Count 1"));
        assert!(text.contains("/BaseFont /Helvetica-Bold"));
        assert!(text.ends_with("%%EOF\n"));
    }

    #[test]
    fn test_metadata_in_pdf() {
        let metadata = Metadata {
            title: Some("Test Report".into()),
            subject: None,
            creator: Some("Simulator".into()),
        };
        let bytes = PdfWriter::new().write(&[page_with(vec![])], &metadata);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Title (Test Report)"));
        assert!(text.contains("/Creator (Simulator)"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let bytes = PdfWriter::new().write(&[page_with(vec![]), page_with(vec![])], &Metadata::default());
        let xref = bytes.windows(6).rposition(|w| w == b"\nxref\n").unwrap() + 1;
        let table = String::from_utf8_lossy(&bytes[xref..]).into_owned();
        let entries: Vec<usize> = table
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().unwrap())
            .collect();
        assert!(!entries.is_empty());
        for (i, offset) in entries.iter().enumerate() {
            let expected = format!("{} 0 obj", i + 1);
            assert!(bytes[*offset..].starts_with(expected.as_bytes()), "object {} misplaced", i + 1);
        }
    }

    #[test]
    fn test_content_stream_flips_coordinates() {
        let line = TextLine {
            x: 10.0,
            baseline: 30.0,
            text: "Hello".into(),
            font: StandardFont::HelveticaBold,
            font_size: 12.0,
            color: Color::BLACK,
            role: TextRole::Body,
        };
        let bytes = PdfWriter::new().write(&[page_with(vec![DrawCommand::Text(line)])], &Metadata::default());
        let content = content_of(&bytes);
        assert!(content.contains("/F1 12.0 Tf"));
        assert!(content.contains("10.00 70.00 Td"));
        assert!(content.contains("(Hello) Tj"));
    }

    #[test]
    fn test_rect_and_rule_operators() {
        let bytes = PdfWriter::new().write(
            &[page_with(vec![
                DrawCommand::Rect {
                    x: 0.0,
                    y: 0.0,
                    width: 200.0,
                    height: 20.0,
                    fill: Color::WHITE,
                },
                DrawCommand::Rule {
                    x1: 10.0,
                    x2: 190.0,
                    y: 50.0,
                    thickness: 1.0,
                    color: Color::BLACK,
                },
            ])],
            &Metadata::default(),
        );
        let content = content_of(&bytes);
        assert!(content.contains("0.00 80.00 200.00 20.00 re\nf"));
        assert!(content.contains("10.00 50.00 m\n190.00 50.00 l\nS"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let pages = [page_with(vec![])];
        let a = PdfWriter::new().write(&pages, &Metadata::default());
        let b = PdfWriter::new().write(&pages, &Metadata::default());
        assert_eq!(a, b);
    }
}
