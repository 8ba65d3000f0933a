//! # Itinera
//!
//! A page-native itinerary renderer.
//!
//! A trip-planning form collects one [`ItineraryData`] record: who is
//! travelling, where, day-by-day activities, flights, hotels, payment terms.
//! Itinera lays that record out onto fixed-size pages in a fixed template
//! and writes the result as a PDF.
//!
//! The page is the unit of layout. Every block is measured before it is
//! drawn, and if it would cross into the footer band the engine starts a new
//! page first. Nothing is sliced after the fact.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]    ItineraryData and its value records
//!       ↓
//!   [layout]   Section plan, content pass, footer pass
//!       ↓
//!   [canvas]   Paged drawing surface; RecordingCanvas builds a Document
//!       ↓
//!   [pdf]      Serialize the Document to PDF bytes
//!       ↓
//!   [export]   {destination}_Itinerary.pdf
//! ```

pub mod canvas;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod font;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod style;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use canvas::{Canvas, Document, RecordingCanvas};
pub use config::TemplateConfig;
pub use error::ItineraError;
pub use export::{export_filename, FilenamePolicy};
pub use layout::LayoutEngine;
pub use model::ItineraryData;

use font::FontContext;
use pdf::{Metadata, PdfWriter};

/// Lay `data` out with the stock template.
pub fn render(data: &ItineraryData) -> Result<Document, ItineraError> {
    render_with_config(data, &TemplateConfig::default())
}

/// Lay `data` out with `config` into a recorded document.
pub fn render_with_config(
    data: &ItineraryData,
    config: &TemplateConfig,
) -> Result<Document, ItineraError> {
    let mut canvas = RecordingCanvas::new(config.page.width, config.page.height);
    if let Some(limit) = config.max_pages {
        canvas = canvas.with_page_limit(limit);
    }
    LayoutEngine::new(config).render(data, &mut canvas)?;
    Ok(canvas.finish())
}

/// Render `data` straight to PDF bytes.
pub fn render_pdf(data: &ItineraryData, config: &TemplateConfig) -> Result<Vec<u8>, ItineraError> {
    let document = render_with_config(data, config)?;
    let metadata = Metadata {
        title: Some(format!("{} Itinerary", data.trip_details.destination)),
        author: Some(config.branding.company.clone()),
        subject: Some(format!("Trip plan for {}", data.trip_details.customer_name)),
        creator: None,
    };
    Ok(PdfWriter::new().write(&document, &metadata, &FontContext::new()))
}

/// Parse an itinerary record from the form's JSON.
pub fn parse_itinerary(json: &str) -> Result<ItineraryData, ItineraError> {
    Ok(serde_json::from_str(json)?)
}

/// Render an itinerary described as JSON to PDF bytes with the stock
/// template.
pub fn render_json(json: &str) -> Result<Vec<u8>, ItineraError> {
    let data = parse_itinerary(json)?;
    render_pdf(&data, &TemplateConfig::default())
}
