//! # Dossier
//!
//! Renders nested report data into paginated PDF documents.
//!
//! Give it a title and either a data object or a list of prose sections.
//! Objects become headed sections, arrays become bulleted lists, scalar
//! fields become `Label: value` lines. The first page carries a coloured
//! header band and every page gets a `Page i of N` footer.
//!
//! ## Architecture
//!
//! ```text
//! title + input (JSON / DataNode / sections)
//!       ↓
//!   [walker]    : data tree → ordered draw instructions
//!       ↓
//!   [layout]    : instructions → positioned lines on pages (cursor, wrapping)
//!       ↓
//!   [assembler] : header band, footers, orchestration
//!       ↓
//!   [pdf]       : serialize to PDF bytes
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod store;
pub mod style;
pub mod text;
pub mod walker;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use assembler::{file_name_for, DocumentAssembler, RenderedDocument};
pub use config::ReportConfig;
pub use error::DossierError;
pub use model::{DataNode, ReportInput, Section};

/// Render a report to PDF.
///
/// This is the primary entry point. `input` may be a data tree or a list of
/// sections; the result carries the PDF bytes and a file name derived from
/// the title.
pub fn render(title: &str, input: impl Into<ReportInput>, config: &ReportConfig) -> RenderedDocument {
    DocumentAssembler::new(config.clone()).render(title, &input.into())
}

/// Render a report whose input is given as JSON text.
///
/// A JSON array of `{"heading", "content"}` objects is rendered as prose
/// sections; any other JSON value is rendered as data.
pub fn render_json(title: &str, json: &str, config: &ReportConfig) -> Result<RenderedDocument, DossierError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(render(title, ReportInput::from_value(value), config))
}
