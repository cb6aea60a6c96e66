//! Selector parsing - resolve names and display positions to typed values
//!
//! Callers holding menu positions or free text go through here; the engine
//! itself only ever sees `Category` and `Unit`.

use serde::Deserialize;
use crate::{Category, Unit, ConversionError};
use crate::units::TAXONOMY;

/// Category or unit picked by display position or by name
///
/// Positions are signed so that a caller's `-1` is reported as an invalid
/// selection rather than failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Selector {
    Index(i64),
    Name(String),
}

impl Selector {
    pub fn category(&self) -> Result<Category, ConversionError> {
        match self {
            Selector::Index(i) => usize::try_from(*i)
                .map_err(|_| ConversionError::InvalidCategory(i.to_string()))
                .and_then(Category::from_index),
            Selector::Name(name) => parse_category(name),
        }
    }

    pub fn unit(&self, category: Category) -> Result<Unit, ConversionError> {
        match self {
            Selector::Index(i) => usize::try_from(*i)
                .map_err(|_| ConversionError::invalid_unit(format!("#{}", i), category))
                .and_then(|i| unit_at(category, i)),
            Selector::Name(name) => parse_unit(category, name),
        }
    }
}

impl From<usize> for Selector {
    fn from(index: usize) -> Self {
        // Positions past i64::MAX are out of range for every category anyway
        Selector::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Selector::Name(name.to_string())
    }
}

/// Parse a category name (case-insensitive)
pub fn parse_category(s: &str) -> Result<Category, ConversionError> {
    let s = s.trim();
    Category::ALL.iter()
        .copied()
        .find(|c| c.name().eq_ignore_ascii_case(s))
        .ok_or_else(|| ConversionError::InvalidCategory(s.to_string()))
}

/// Parse a unit name, symbol or alias and check it belongs to `category`
///
/// Supported forms: "Kilometer", "km", "kilometres", "km/h", "°F", "mph"
pub fn parse_unit(category: Category, s: &str) -> Result<Unit, ConversionError> {
    let s = s.trim();
    match TAXONOMY.lookup(s) {
        Some(unit) if category.contains(unit) => Ok(unit),
        _ => Err(ConversionError::invalid_unit(s, category)),
    }
}

/// Unit at a display position within a category
pub fn unit_at(category: Category, index: usize) -> Result<Unit, ConversionError> {
    category.units()
        .get(index)
        .copied()
        .ok_or_else(|| ConversionError::invalid_unit(format!("#{}", index), category))
}

/// Display position of a unit within a category
pub fn unit_index(category: Category, unit: Unit) -> Result<usize, ConversionError> {
    category.units()
        .iter()
        .position(|u| *u == unit)
        .ok_or_else(|| ConversionError::invalid_unit(unit, category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("Length").unwrap(), Category::Length);
        assert_eq!(parse_category(" speed ").unwrap(), Category::Speed);
        assert_eq!(parse_category("TIME").unwrap(), Category::Time);
    }

    #[test]
    fn test_parse_category_unknown() {
        assert_eq!(
            parse_category("Volume"),
            Err(ConversionError::InvalidCategory("Volume".to_string()))
        );
        assert!(parse_category("").is_err());
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!(parse_unit(Category::Length, "Kilometer").unwrap(), Unit::Kilometer);
        assert_eq!(parse_unit(Category::Length, "ft").unwrap(), Unit::Foot);
        assert_eq!(parse_unit(Category::Speed, "km/h").unwrap(), Unit::KilometerPerHour);
        assert_eq!(parse_unit(Category::Speed, "Mile per hour").unwrap(), Unit::MilePerHour);
        assert_eq!(parse_unit(Category::Temperature, "°f").unwrap(), Unit::Fahrenheit);
    }

    #[test]
    fn test_parse_unit_wrong_category() {
        let err = parse_unit(Category::Mass, "km").unwrap_err();
        assert_eq!(err, ConversionError::InvalidUnit {
            unit: "km".to_string(),
            category: "Mass".to_string(),
        });
    }

    #[test]
    fn test_parse_unit_unknown() {
        assert!(matches!(
            parse_unit(Category::Length, "furlong"),
            Err(ConversionError::InvalidUnit { .. })
        ));
    }

    #[test]
    fn test_unit_at() {
        assert_eq!(unit_at(Category::Length, 0).unwrap(), Unit::Centimeter);
        assert_eq!(unit_at(Category::Speed, 2).unwrap(), Unit::MilePerHour);
        assert_eq!(unit_at(Category::Temperature, 1).unwrap(), Unit::Fahrenheit);
    }

    #[test]
    fn test_unit_at_out_of_range() {
        // Temperature has three units; index 3 is valid for Time but not here
        let err = unit_at(Category::Temperature, 3).unwrap_err();
        assert_eq!(err.to_string(), "Invalid unit for Temperature: #3");
        assert!(unit_at(Category::Time, 3).is_ok());
    }

    #[test]
    fn test_selector_by_index() {
        assert_eq!(Selector::Index(2).category().unwrap(), Category::Temperature);
        assert_eq!(Selector::Index(1).unit(Category::Temperature).unwrap(), Unit::Fahrenheit);
        assert_eq!(Selector::from(4).category().unwrap(), Category::Speed);
    }

    #[test]
    fn test_selector_by_name() {
        assert_eq!(Selector::from("mass").category().unwrap(), Category::Mass);
        assert_eq!(Selector::from("lbs").unit(Category::Mass).unwrap(), Unit::Pound);
    }

    #[test]
    fn test_selector_negative_index() {
        assert_eq!(
            Selector::Index(-1).category(),
            Err(ConversionError::InvalidCategory("-1".to_string()))
        );
        assert_eq!(
            Selector::Index(-1).unit(Category::Length),
            Err(ConversionError::invalid_unit("#-1", Category::Length))
        );
        assert!(Selector::Index(i64::MIN).category().is_err());
    }

    #[test]
    fn test_selector_index_too_large() {
        assert_eq!(
            Selector::Index(5).category(),
            Err(ConversionError::InvalidCategory("5".to_string()))
        );
        assert!(Selector::Index(i64::MAX).unit(Category::Time).is_err());
    }

    #[test]
    fn test_selector_decodes_negative_numbers() {
        let selector: Selector = serde_json::from_str("-1").unwrap();
        assert_eq!(selector, Selector::Index(-1));
        let selector: Selector = serde_json::from_str("\"km/h\"").unwrap();
        assert_eq!(selector, Selector::Name("km/h".to_string()));
    }

    #[test]
    fn test_unit_index() {
        for category in Category::ALL {
            for (i, unit) in category.units().iter().enumerate() {
                assert_eq!(unit_index(category, *unit).unwrap(), i);
            }
        }
        assert!(unit_index(Category::Mass, Unit::Meter).is_err());
    }
}
