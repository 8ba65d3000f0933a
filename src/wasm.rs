//! WebAssembly bindings for rendering in the browser, next to the form.

use wasm_bindgen::prelude::*;

use crate::config::TemplateConfig;
use crate::model::ItineraryData;

/// Render an itinerary passed as a JS object to PDF bytes.
#[wasm_bindgen]
pub fn render_itinerary_pdf(itinerary: JsValue) -> Result<Vec<u8>, JsValue> {
    let data: ItineraryData = serde_wasm_bindgen::from_value(itinerary)
        .map_err(|e| JsValue::from_str(&format!("Invalid itinerary: {}", e)))?;
    crate::render_pdf(&data, &TemplateConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render an itinerary passed as a JSON string to PDF bytes.
#[wasm_bindgen]
pub fn render_itinerary_json(json: &str) -> Result<Vec<u8>, JsValue> {
    crate::render_json(json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The filename the browser should offer for the download.
#[wasm_bindgen]
pub fn itinerary_filename(destination: &str) -> String {
    crate::export_filename(destination, "pdf", crate::FilenamePolicy::Sanitize)
}
