//! Structured errors for callers that render or transmit failures
//!
//! Conversion failures are values, never panics. Each carries a
//! machine-readable code next to the human-readable message shown to users.

use crate::NumberError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_INPUT: &str = "INVALID_INPUT";
    pub const INVALID_CATEGORY: &str = "INVALID_CATEGORY";
    pub const INVALID_UNIT: &str = "INVALID_UNIT";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Structured conversion error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Which input was rejected ("value", "category", "from", "to")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl GaugeError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            field: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: name the rejected input
    pub fn for_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    // ========== Common Error Constructors ==========

    pub fn invalid_input(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_INPUT, details)
            .for_field("value")
    }

    pub fn invalid_category(name: &str) -> Self {
        Self::new(codes::INVALID_CATEGORY, format!("Invalid category: {}", name))
            .with_suggestion("Use one of: Length, Mass, Temperature, Time, Speed")
            .for_field("category")
    }

    pub fn invalid_unit(unit: &str, category: &str) -> Self {
        Self::new(codes::INVALID_UNIT, format!("Invalid unit for {}: {}", category, unit))
            .with_suggestion(format!("Use list_units(\"{}\") to see valid units", category))
    }

    pub fn is_input_error(&self) -> bool {
        self.code == codes::INVALID_INPUT
    }

    /// Serialize for transport. Falls back to an INTERNAL payload, never panics.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            serde_json::json!({ "code": codes::INTERNAL, "message": e.to_string() })
        })
    }
}

impl std::fmt::Display for GaugeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for GaugeError {}

impl From<NumberError> for GaugeError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::Empty => Self::invalid_input(err.to_string()),
            NumberError::ParseError(_) => Self::invalid_input(err.to_string())
                .with_suggestion("Enter a plain decimal number such as 12.5 or 1e3"),
            NumberError::NonFinite(_) => Self::invalid_input(err.to_string())
                .with_suggestion("NaN and infinities cannot be converted"),
        }
    }
}
