//! Gauge Core - Fundamental types
//!
//! This crate provides the core types used throughout Gauge:
//! - `parse_value`: Validation of free-form numeric input
//! - `format_fixed`: Fixed-decimal rendering of results
//! - `GaugeError`: Structured errors for display and transport

mod number;
mod error;

pub use number::{NumberError, parse_value, ensure_finite, format_fixed, DEFAULT_DECIMALS};
pub use error::{GaugeError, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{GaugeError, NumberError, parse_value, format_fixed, DEFAULT_DECIMALS};
    pub use crate::error::codes;
}
