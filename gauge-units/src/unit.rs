//! Unit representation with conversion rules

use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use gauge_core::{GaugeError, NumberError};
use crate::Category;
use crate::units::TAXONOMY;

/// A unit of measurement. Each variant belongs to exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    // Length
    Centimeter,
    Meter,
    Kilometer,
    Mile,
    Yard,
    Foot,
    // Mass
    Gram,
    Kilogram,
    Pound,
    Ounce,
    // Temperature
    Celsius,
    Fahrenheit,
    Kelvin,
    // Time
    Second,
    Minute,
    Hour,
    Day,
    // Speed
    MeterPerSecond,
    KilometerPerHour,
    MilePerHour,
}

impl Unit {
    pub fn category(self) -> Category {
        use Unit::*;
        match self {
            Centimeter | Meter | Kilometer | Mile | Yard | Foot => Category::Length,
            Gram | Kilogram | Pound | Ounce => Category::Mass,
            Celsius | Fahrenheit | Kelvin => Category::Temperature,
            Second | Minute | Hour | Day => Category::Time,
            MeterPerSecond | KilometerPerHour | MilePerHour => Category::Speed,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        use Unit::*;
        match self {
            Centimeter => "Centimeter",
            Meter => "Meter",
            Kilometer => "Kilometer",
            Mile => "Mile",
            Yard => "Yard",
            Foot => "Foot",
            Gram => "Gram",
            Kilogram => "Kilogram",
            Pound => "Pound",
            Ounce => "Ounce",
            Celsius => "Celsius",
            Fahrenheit => "Fahrenheit",
            Kelvin => "Kelvin",
            Second => "Second",
            Minute => "Minute",
            Hour => "Hour",
            Day => "Day",
            MeterPerSecond => "Meter per second",
            KilometerPerHour => "Kilometer per hour",
            MilePerHour => "Mile per hour",
        }
    }

    /// Short symbol (e.g., "km", "°F", "m/s")
    pub fn symbol(self) -> &'static str {
        use Unit::*;
        match self {
            Centimeter => "cm",
            Meter => "m",
            Kilometer => "km",
            Mile => "mi",
            Yard => "yd",
            Foot => "ft",
            Gram => "g",
            Kilogram => "kg",
            Pound => "lb",
            Ounce => "oz",
            Celsius => "°C",
            Fahrenheit => "°F",
            Kelvin => "K",
            Second => "s",
            Minute => "min",
            Hour => "h",
            Day => "d",
            MeterPerSecond => "m/s",
            KilometerPerHour => "km/h",
            MilePerHour => "mph",
        }
    }

    /// Conversion rule relative to the category's base unit
    pub fn rule(self) -> Result<Rule, ConversionError> {
        TAXONOMY.rule(self)
            .ok_or_else(|| ConversionError::invalid_unit(self, self.category()))
    }

    /// Check if this is the base unit of its category
    pub fn is_base(self) -> bool {
        self.category().base_unit() == self
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a unit relates to its category's base unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Rule {
    /// value_base = value * factor
    Linear { factor: f64 },
    /// value = value_base * scale + offset
    Affine { scale: f64, offset: f64 },
}

impl Rule {
    /// Convert a value in this unit into the base unit
    pub fn to_base(&self, value: f64) -> f64 {
        match *self {
            Rule::Linear { factor } => value * factor,
            Rule::Affine { scale, offset } => (value - offset) / scale,
        }
    }

    /// Convert a base-unit value into this unit
    pub fn from_base(&self, base: f64) -> f64 {
        match *self {
            Rule::Linear { factor } => base / factor,
            Rule::Affine { scale, offset } => base * scale + offset,
        }
    }

    pub fn is_identity(&self) -> bool {
        match *self {
            Rule::Linear { factor } => factor == 1.0,
            Rule::Affine { scale, offset } => scale == 1.0 && offset == 0.0,
        }
    }
}

/// Errors that can occur during unit conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Value is empty, non-numeric, or not finite
    #[error("{0}")]
    InvalidInput(#[from] NumberError),

    /// Category selector not among the defined categories
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// Unit selector not a member of the category
    #[error("Invalid unit for {category}: {unit}")]
    InvalidUnit { unit: String, category: String },
}

impl ConversionError {
    pub fn invalid_unit(unit: impl fmt::Display, category: Category) -> Self {
        ConversionError::InvalidUnit {
            unit: unit.to_string(),
            category: category.name().to_string(),
        }
    }
}

impl From<ConversionError> for GaugeError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::InvalidInput(e) => e.into(),
            ConversionError::InvalidCategory(name) => GaugeError::invalid_category(&name),
            ConversionError::InvalidUnit { unit, category } => GaugeError::invalid_unit(&unit, &category),
        }
    }
}
