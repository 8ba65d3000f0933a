//! # Font Management
//!
//! The itinerary template draws everything in Helvetica, one of the 14
//! standard PDF fonts, so nothing is embedded. What the engine and the
//! writer still need is measurement: headings place their coloured half
//! right after the plain half, and centred text has to know its width.

pub mod metrics;

pub use metrics::StandardFontMetrics;

/// The standard PDF fonts the renderer can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
}

impl StandardFont {
    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
        }
    }

    pub fn metrics(&self) -> StandardFontMetrics {
        match self {
            Self::Helvetica => StandardFontMetrics::HELVETICA,
        }
    }
}

/// Shared font context used by layout and PDF serialization.
#[derive(Debug, Clone)]
pub struct FontContext {
    font: StandardFont,
}

impl Default for FontContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FontContext {
    pub fn new() -> Self {
        Self {
            font: StandardFont::Helvetica,
        }
    }

    /// The face every text run is set in.
    pub fn font(&self) -> StandardFont {
        self.font
    }

    /// Get the advance width of a single character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        self.font.metrics().char_width(ch, font_size)
    }

    /// Measure the width of a string in points.
    pub fn measure_string(&self, text: &str, font_size: f64) -> f64 {
        self.font.metrics().measure_string(text, font_size, 0.0)
    }
}
