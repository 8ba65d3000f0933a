//! Structured error types for the itinerary renderer.
//!
//! The layout engine itself never fails on its own account; it passes
//! canvas errors through. Everything else here comes from the edges:
//! reading JSON, checking the record, loading configuration, writing files.

use thiserror::Error;

use crate::canvas::CanvasError;
use crate::model::ValidationError;

/// The unified error type returned by the public API.
#[derive(Debug, Error)]
pub enum ItineraError {
    /// JSON input failed to parse as an itinerary record.
    #[error("Failed to parse itinerary: {source}{}", hint_suffix(.hint))]
    Parse {
        source: serde_json::Error,
        hint: String,
    },
    /// The record is missing something the form would have required.
    #[error("Itinerary is incomplete: {}", join(.0))]
    Validation(Vec<ValidationError>),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {hint}")
    }
}

fn join(problems: &[ValidationError]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<serde_json::Error> for ItineraError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the itinerary schema. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        ItineraError::Parse { source: e, hint }
    }
}

impl From<Vec<ValidationError>> for ItineraError {
    fn from(problems: Vec<ValidationError>) -> Self {
        ItineraError::Validation(problems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_get_a_hint() {
        let err: ItineraError = serde_json::from_str::<serde_json::Value>("{,}")
            .unwrap_err()
            .into();
        let message = err.to_string();
        assert!(message.starts_with("Failed to parse itinerary"));
        assert!(message.contains("Hint: Check for trailing commas"));
    }

    #[test]
    fn truncated_input_is_eof() {
        let err: ItineraError = serde_json::from_str::<serde_json::Value>("{\"a\": ")
            .unwrap_err()
            .into();
        assert!(err.to_string().contains("truncated"));
    }

    #[test]
    fn validation_lists_every_problem() {
        let err = ItineraError::from(vec![
            ValidationError::MissingCustomerName,
            ValidationError::NoDays,
        ]);
        assert_eq!(
            err.to_string(),
            "Itinerary is incomplete: customer name is required; trip must last at least one day"
        );
    }

    #[test]
    fn canvas_errors_pass_through() {
        let err = ItineraError::from(CanvasError::PageLimit { limit: 3 });
        assert_eq!(err.to_string(), "page limit of 3 reached");
    }
}
