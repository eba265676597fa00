use wasm_bindgen::prelude::*;

use crate::config::ReportConfig;

/// Render a report from JSON input with the default configuration.
#[wasm_bindgen]
pub fn render_pdf(title: &str, json: &str) -> Result<Vec<u8>, JsValue> {
    crate::render_json(title, json, &ReportConfig::default())
        .map(|doc| doc.bytes)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Suggested download name for a report title.
#[wasm_bindgen]
pub fn pdf_file_name(title: &str) -> String {
    crate::file_name_for(title)
}
