//! Unit definitions, organized by category
//!
//! Linear factors are "base units per one unit" (1 km = 1000 m). Temperature
//! is affine and routed through Celsius.

use std::collections::HashMap;
use std::sync::LazyLock;
use crate::{Category, Rule, Unit};

/// Global unit taxonomy, built on first access and read-only afterwards
pub static TAXONOMY: LazyLock<Taxonomy> = LazyLock::new(Taxonomy::new);

/// Ordered units and conversion rules for every category
pub struct Taxonomy {
    /// Display-ordered units, indexed by `Category::index()`
    ordered: [Vec<Unit>; 5],
    rules: HashMap<Unit, Rule>,
    /// Lowercased names, symbols and aliases
    aliases: HashMap<String, Unit>,
}

impl Taxonomy {
    pub fn new() -> Self {
        let mut taxonomy = Taxonomy {
            ordered: Default::default(),
            rules: HashMap::new(),
            aliases: HashMap::new(),
        };
        taxonomy.register_all_units();
        tracing::trace!(units = taxonomy.rules.len(), aliases = taxonomy.aliases.len(), "unit taxonomy built");
        taxonomy
    }

    /// Units of a category in display order
    pub fn units_of(&self, category: Category) -> &[Unit] {
        &self.ordered[category.index()]
    }

    pub fn rule(&self, unit: Unit) -> Option<Rule> {
        self.rules.get(&unit).copied()
    }

    /// Get a unit by name, symbol or alias (case-insensitive)
    pub fn lookup(&self, name: &str) -> Option<Unit> {
        self.aliases.get(&normalize(name)).copied()
    }

    /// Number of registered units
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn register(&mut self, unit: Unit, rule: Rule) {
        self.ordered[unit.category().index()].push(unit);
        self.rules.insert(unit, rule);
        self.alias(unit.name(), unit);
        self.alias(unit.symbol(), unit);
    }

    fn linear(&mut self, unit: Unit, factor: f64) {
        self.register(unit, Rule::Linear { factor });
    }

    fn affine(&mut self, unit: Unit, scale: f64, offset: f64) {
        self.register(unit, Rule::Affine { scale, offset });
    }

    fn alias(&mut self, alias: &str, unit: Unit) {
        self.aliases.insert(normalize(alias), unit);
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_mass_units();
        self.register_temperature_units();
        self.register_time_units();
        self.register_speed_units();
    }

    fn register_length_units(&mut self) {
        // Base: meter
        self.linear(Unit::Centimeter, 0.01);
        self.linear(Unit::Meter, 1.0);
        self.linear(Unit::Kilometer, 1000.0);
        self.linear(Unit::Mile, 1609.34);
        self.linear(Unit::Yard, 0.9144);
        self.linear(Unit::Foot, 0.3048);

        // Aliases
        self.alias("centimeters", Unit::Centimeter);
        self.alias("centimetre", Unit::Centimeter);
        self.alias("centimetres", Unit::Centimeter);
        self.alias("meters", Unit::Meter);
        self.alias("metre", Unit::Meter);
        self.alias("metres", Unit::Meter);
        self.alias("kilometers", Unit::Kilometer);
        self.alias("kilometre", Unit::Kilometer);
        self.alias("kilometres", Unit::Kilometer);
        self.alias("miles", Unit::Mile);
        self.alias("yards", Unit::Yard);
        self.alias("feet", Unit::Foot);
    }

    fn register_mass_units(&mut self) {
        // Base: gram
        self.linear(Unit::Gram, 1.0);
        self.linear(Unit::Kilogram, 1000.0);
        self.linear(Unit::Pound, 453.592);
        self.linear(Unit::Ounce, 28.3495);

        self.alias("grams", Unit::Gram);
        self.alias("kilograms", Unit::Kilogram);
        self.alias("kilo", Unit::Kilogram);
        self.alias("pounds", Unit::Pound);
        self.alias("lbs", Unit::Pound);
        self.alias("ounces", Unit::Ounce);
    }

    fn register_temperature_units(&mut self) {
        // Base: Celsius. value = celsius * scale + offset
        self.affine(Unit::Celsius, 1.0, 0.0);
        self.affine(Unit::Fahrenheit, 1.8, 32.0);
        self.affine(Unit::Kelvin, 1.0, 273.15);

        self.alias("c", Unit::Celsius);
        self.alias("degc", Unit::Celsius);
        self.alias("f", Unit::Fahrenheit);
        self.alias("degf", Unit::Fahrenheit);
        self.alias("kelvins", Unit::Kelvin);
    }

    fn register_time_units(&mut self) {
        // Base: second
        self.linear(Unit::Second, 1.0);
        self.linear(Unit::Minute, 60.0);
        self.linear(Unit::Hour, 3600.0);
        self.linear(Unit::Day, 86400.0);

        self.alias("seconds", Unit::Second);
        self.alias("sec", Unit::Second);
        self.alias("minutes", Unit::Minute);
        self.alias("hours", Unit::Hour);
        self.alias("hr", Unit::Hour);
        self.alias("days", Unit::Day);
    }

    fn register_speed_units(&mut self) {
        // Base: meter per second
        self.linear(Unit::MeterPerSecond, 1.0);
        self.linear(Unit::KilometerPerHour, 0.277778);
        self.linear(Unit::MilePerHour, 0.44704);

        self.alias("meters per second", Unit::MeterPerSecond);
        self.alias("mps", Unit::MeterPerSecond);
        self.alias("kilometers per hour", Unit::KilometerPerHour);
        self.alias("kph", Unit::KilometerPerHour);
        self.alias("kmh", Unit::KilometerPerHour);
        self.alias("miles per hour", Unit::MilePerHour);
        self.alias("mi/h", Unit::MilePerHour);
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase and collapse inner whitespace ("Meter  per Second" -> "meter per second")
fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(category: Category) -> Vec<&'static str> {
        TAXONOMY.units_of(category).iter().map(|u| u.name()).collect()
    }

    #[test]
    fn test_length_order() {
        assert_eq!(names(Category::Length),
            ["Centimeter", "Meter", "Kilometer", "Mile", "Yard", "Foot"]);
    }

    #[test]
    fn test_mass_order() {
        assert_eq!(names(Category::Mass), ["Gram", "Kilogram", "Pound", "Ounce"]);
    }

    #[test]
    fn test_temperature_order() {
        assert_eq!(names(Category::Temperature), ["Celsius", "Fahrenheit", "Kelvin"]);
    }

    #[test]
    fn test_time_order() {
        assert_eq!(names(Category::Time), ["Second", "Minute", "Hour", "Day"]);
    }

    #[test]
    fn test_speed_order() {
        assert_eq!(names(Category::Speed),
            ["Meter per second", "Kilometer per hour", "Mile per hour"]);
    }

    #[test]
    fn test_every_unit_has_rule_in_its_own_category() {
        let mut total = 0;
        for category in Category::ALL {
            for unit in TAXONOMY.units_of(category) {
                assert_eq!(unit.category(), category);
                assert!(TAXONOMY.rule(*unit).is_some(), "missing rule for {}", unit);
                total += 1;
            }
        }
        assert_eq!(total, TAXONOMY.len());
        assert_eq!(total, 20);
    }

    #[test]
    fn test_base_rules_are_identity() {
        for category in Category::ALL {
            let base = category.base_unit();
            assert!(TAXONOMY.rule(base).unwrap().is_identity(), "{} base is not identity", category);
        }
    }

    #[test]
    fn test_temperature_is_affine() {
        for unit in TAXONOMY.units_of(Category::Temperature) {
            assert!(matches!(TAXONOMY.rule(*unit), Some(Rule::Affine { .. })));
        }
        assert!(matches!(TAXONOMY.rule(Unit::Mile), Some(Rule::Linear { .. })));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(TAXONOMY.lookup("km"), Some(Unit::Kilometer));
        assert_eq!(TAXONOMY.lookup("Feet"), Some(Unit::Foot));
        assert_eq!(TAXONOMY.lookup("  meter   PER second "), Some(Unit::MeterPerSecond));
        assert_eq!(TAXONOMY.lookup("°F"), Some(Unit::Fahrenheit));
        assert_eq!(TAXONOMY.lookup("K"), Some(Unit::Kelvin));
        assert_eq!(TAXONOMY.lookup("min"), Some(Unit::Minute));
        assert_eq!(TAXONOMY.lookup("furlong"), None);
    }

    #[test]
    fn test_symbols_and_names_are_unique() {
        for category in Category::ALL {
            for unit in TAXONOMY.units_of(category) {
                assert_eq!(TAXONOMY.lookup(unit.name()), Some(*unit));
                assert_eq!(TAXONOMY.lookup(unit.symbol()), Some(*unit));
            }
        }
    }
}
