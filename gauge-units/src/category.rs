//! Measurement categories

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::{Unit, ConversionError};
use crate::units::TAXONOMY;

/// A closed group of mutually convertible units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Length,
    Mass,
    Temperature,
    Time,
    Speed,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 5] = [
        Category::Length,
        Category::Mass,
        Category::Temperature,
        Category::Time,
        Category::Speed,
    ];

    /// Position in display order
    pub fn index(self) -> usize {
        match self {
            Category::Length => 0,
            Category::Mass => 1,
            Category::Temperature => 2,
            Category::Time => 3,
            Category::Speed => 4,
        }
    }

    /// Category at a display position
    pub fn from_index(index: usize) -> Result<Category, ConversionError> {
        Self::ALL.get(index)
            .copied()
            .ok_or_else(|| ConversionError::InvalidCategory(index.to_string()))
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Mass => "Mass",
            Category::Temperature => "Temperature",
            Category::Time => "Time",
            Category::Speed => "Speed",
        }
    }

    /// Reference unit every conversion in this category is routed through
    pub fn base_unit(self) -> Unit {
        match self {
            Category::Length => Unit::Meter,
            Category::Mass => Unit::Gram,
            Category::Temperature => Unit::Celsius,
            Category::Time => Unit::Second,
            Category::Speed => Unit::MeterPerSecond,
        }
    }

    /// Units of this category in display order
    pub fn units(self) -> &'static [Unit] {
        TAXONOMY.units_of(self)
    }

    /// Check membership
    pub fn contains(self, unit: Unit) -> bool {
        unit.category() == self
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse_category(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_order() {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["Length", "Mass", "Temperature", "Time", "Speed"]);
    }

    #[test]
    fn test_index_round_trip() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
            assert_eq!(Category::from_index(i).unwrap(), *category);
        }
    }

    #[test]
    fn test_index_out_of_range() {
        assert_eq!(
            Category::from_index(5),
            Err(ConversionError::InvalidCategory("5".to_string()))
        );
        assert!(Category::from_index(usize::MAX).is_err());
    }

    #[test]
    fn test_base_unit_belongs_to_category() {
        for category in Category::ALL {
            assert!(category.contains(category.base_unit()));
            assert!(category.units().contains(&category.base_unit()));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("temperature".parse::<Category>().unwrap(), Category::Temperature);
        assert!("Volume".parse::<Category>().is_err());
    }
}
