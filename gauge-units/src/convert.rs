//! Conversion engine
//!
//! Every conversion is normalized into the category's base unit and then
//! projected into the target unit, so adding a unit needs one rule and no
//! pairwise factors.

use gauge_core::{NumberError, parse_value, ensure_finite, format_fixed, DEFAULT_DECIMALS};
use crate::{Category, Unit, ConversionError};
use crate::parse::Selector;

/// Convert `value` from one unit to another within `category`
///
/// Identical units return `value` untouched. Non-finite inputs and results
/// are rejected as `InvalidInput`.
pub fn convert(category: Category, from: Unit, to: Unit, value: f64) -> Result<f64, ConversionError> {
    ensure_finite(value)?;

    if !category.contains(from) {
        return Err(ConversionError::invalid_unit(from, category));
    }
    if !category.contains(to) {
        return Err(ConversionError::invalid_unit(to, category));
    }

    if from == to {
        return Ok(value);
    }

    let base = from.rule()?.to_base(value);
    let result = to.rule()?.from_base(base);

    if !result.is_finite() {
        tracing::debug!(%category, %from, %to, value, "conversion overflowed");
        return Err(NumberError::NonFinite(format!("{} {} in {}", value, from, to)).into());
    }

    tracing::debug!(%category, %from, %to, value, base, result, "converted");
    Ok(result)
}

/// A completed conversion
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub category: Category,
    pub from: Unit,
    pub to: Unit,
    pub value: f64,
    pub result: f64,
    /// `result` with the converter's fixed number of decimals
    pub text: String,
}

/// Text-level front door: parses raw input, resolves selectors, formats output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converter {
    decimals: usize,
}

impl Converter {
    pub fn new() -> Self {
        Self { decimals: DEFAULT_DECIMALS }
    }

    /// Builder: digits after the decimal point in formatted results
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn decimals(&self) -> usize {
        self.decimals
    }

    /// Convert raw text between typed units
    pub fn convert_text(&self, category: Category, from: Unit, to: Unit, raw: &str) -> Result<String, ConversionError> {
        // Input is validated before any selector or arithmetic work
        let value = parse_value(raw)?;
        let result = convert(category, from, to, value)?;
        Ok(format_fixed(result, self.decimals))
    }

    /// Convert with selectors given by name or display position
    ///
    /// The raw value is parsed before any selector is resolved.
    pub fn convert_selected(&self, category: &Selector, from: &Selector, to: &Selector, raw: &str) -> Result<Conversion, ConversionError> {
        let value = parse_value(raw)?;
        let category = category.category()?;
        let from = from.unit(category)?;
        let to = to.unit(category)?;
        let result = convert(category, from, to, value)?;

        Ok(Conversion {
            category,
            from,
            to,
            value,
            result,
            text: format_fixed(result, self.decimals),
        })
    }

    /// Convert using category and unit names (e.g., "Length", "km", "Mile")
    pub fn convert_by_name(&self, category: &str, from: &str, to: &str, raw: &str) -> Result<String, ConversionError> {
        self.convert_selected(&category.into(), &from.into(), &to.into(), raw)
            .map(|c| c.text)
    }

    /// Convert using display positions (category menu, then unit menus)
    pub fn convert_by_index(&self, category: usize, from: usize, to: usize, raw: &str) -> Result<String, ConversionError> {
        self.convert_selected(&category.into(), &from.into(), &to.into(), raw)
            .map(|c| c.text)
    }

    /// Result line to show the user: the number, or the error message
    pub fn display_by_index(&self, category: usize, from: usize, to: usize, raw: &str) -> String {
        render(self.convert_by_index(category, from, to, raw))
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render an outcome as display text
pub fn render(outcome: Result<String, ConversionError>) -> String {
    match outcome {
        Ok(text) => text,
        Err(e) => e.to_string(),
    }
}
