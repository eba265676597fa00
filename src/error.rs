//! Structured error types for the report renderer.
//!
//! Rendering itself cannot fail: any data tree lays out into some document.
//! Errors come from the edges: parsing JSON input, reading configuration,
//! and writing the finished PDF to disk.

use std::path::PathBuf;

use thiserror::Error;

/// The unified error type returned by the fallible public API.
#[derive(Debug, Error)]
pub enum DossierError {
    /// JSON input or configuration failed to parse.
    #[error("Failed to parse JSON: {}{}", .source, format_hint(.hint))]
    ParseError {
        #[source]
        source: serde_json::Error,
        hint: String,
    },
    /// Configuration parsed but describes an impossible page.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
    /// There was nothing to render.
    #[error("Missing input: {0}")]
    MissingInput(String),
    /// Reading input or writing the document failed.
    #[error("I/O error on {}: {}", .path.display(), .source)]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn format_hint(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for DossierError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the expected shape. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => "Unexpected end of input. Is the JSON truncated?".to_string(),
            serde_json::error::Category::Io => String::new(),
        };
        DossierError::ParseError { source: e, hint }
    }
}

impl DossierError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DossierError::IoError {
            path: path.into(),
            source,
        }
    }
}
