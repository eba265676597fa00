//! # Report Configuration
//!
//! Everything that differs between report variants lives here rather than
//! in the renderer: product name for the footer, subtitle, which keys to
//! hide, page geometry, header band, and the theme. Every field has a
//! default, so a configuration file only needs to name what it changes.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DossierError;
use crate::style::{Color, Theme};

/// Standard page sizes in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom {
        width: f64,
        height: f64,
    },
}

impl PageSize {
    /// Returns (width, height) in points.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::A3 => (841.89, 1190.55),
            PageSize::A5 => (419.53, 595.28),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Page size and the uniform margin around the body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageConfig {
    pub size: PageSize,
    /// Margin on all four sides, in points.
    pub margin: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            margin: 48.0,
        }
    }
}

/// The coloured band across the top of the first page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderConfig {
    /// Height of the band, measured from the top edge of the page.
    pub height: f64,
    pub background: Color,
    /// Gap between the band and the first line of body content.
    pub spacing_after: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            height: 84.0,
            background: Color::rgb(0.15, 0.23, 0.45),
            spacing_after: 20.0,
        }
    }
}

/// Configuration for one kind of report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportConfig {
    /// Shown in every page footer and recorded as the PDF creator.
    pub product_name: String,
    /// Second line of the header band.
    pub subtitle: Option<String>,
    /// Keys omitted from data reports at every nesting level.
    pub exclude_keys: Vec<String>,
    /// Objects nested deeper than this are cut off with a truncation marker.
    pub max_depth: usize,
    pub page: PageConfig,
    pub header: HeaderConfig,
    pub theme: Theme,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            product_name: "Dossier".to_string(),
            subtitle: None,
            exclude_keys: vec!["id".to_string(), "uuid".to_string()],
            max_depth: 16,
            page: PageConfig::default(),
            header: HeaderConfig::default(),
            theme: Theme::default(),
        }
    }
}

impl ReportConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, DossierError> {
        let config: ReportConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DossierError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| DossierError::io(path, e))?;
        Self::from_json(&json)
    }

    /// Reject geometry that leaves no room for content.
    pub fn validate(&self) -> Result<(), DossierError> {
        let (width, height) = self.page.size.dimensions();
        if !(width > 0.0 && height > 0.0) {
            return Err(DossierError::ConfigError(format!(
                "page size must be positive, got {width}x{height}"
            )));
        }
        if !(self.page.margin >= 0.0) || self.page.margin * 2.0 >= width.min(height) {
            return Err(DossierError::ConfigError(format!(
                "margin {} leaves no content area on a {width}x{height} page",
                self.page.margin
            )));
        }
        if !(self.header.height >= 0.0) || self.header.height >= height - self.page.margin {
            return Err(DossierError::ConfigError(format!(
                "header height {} does not fit on the page",
                self.header.height
            )));
        }
        Ok(())
    }

    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = name.into();
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Replace the excluded key set.
    pub fn with_exclusions<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.exclude_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_page(mut self, page: PageConfig) -> Self {
        self.page = page;
        self
    }

    /// The excluded keys as a lookup set.
    pub fn exclusion_set(&self) -> HashSet<String> {
        self.exclude_keys.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.exclude_keys, vec!["id", "uuid"]);
        assert_eq!(config.page.size, PageSize::A4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = ReportConfig::from_json(
            r##"{
                "productName": "Academy",
                "excludeKeys": ["id", "uuid", "status"],
                "page": { "size": "Letter" },
                "header": { "background": "#102030" }
            }"##,
        )
        .unwrap();
        assert_eq!(config.product_name, "Academy");
        assert!(config.exclusion_set().contains("status"));
        assert_eq!(config.page.size, PageSize::Letter);
        assert_eq!(config.page.margin, 48.0);
        assert_eq!(config.header.background, Color::hex("#102030"));
        assert_eq!(config.header.height, 84.0);
    }

    #[test]
    fn test_custom_page_size() {
        let config = ReportConfig::from_json(r#"{"page": {"size": {"Custom": {"width": 300, "height": 400}}, "margin": 20}}"#)
            .unwrap();
        assert_eq!(config.page.size.dimensions(), (300.0, 400.0));
    }

    #[test]
    fn test_rejects_oversized_margin() {
        let err = ReportConfig::from_json(r#"{"page": {"margin": 400}}"#).unwrap_err();
        assert!(matches!(err, DossierError::ConfigError(_)));
    }

    #[test]
    fn test_builders() {
        let config = ReportConfig::default()
            .with_product_name("Simulator")
            .with_subtitle("Business plan")
            .with_exclusions(["secret"]);
        assert_eq!(config.product_name, "Simulator");
        assert_eq!(config.subtitle.as_deref(), Some("Business plan"));
        assert_eq!(config.exclude_keys, vec!["secret"]);
    }
}
