//! Gauge Units - Unit Conversion Engine
//!
//! Converts values between units of one measurement category. Each unit
//! carries a rule relative to its category's base unit; conversions go
//! value -> base -> target.
//!
//! Categories (base unit first):
//! - Length (m, cm, km, mi, yd, ft)
//! - Mass (g, kg, lb, oz)
//! - Temperature (°C, °F, K) - affine
//! - Time (s, min, h, d)
//! - Speed (m/s, km/h, mph)

mod category;
mod unit;
mod units;
mod parse;
mod convert;

pub use category::Category;
pub use unit::{Unit, Rule, ConversionError};
pub use units::{Taxonomy, TAXONOMY};
pub use parse::{Selector, parse_category, parse_unit, unit_at, unit_index};
pub use convert::{convert, render, Conversion, Converter};

/// All categories in display order
pub fn categories() -> &'static [Category] {
    &Category::ALL
}

/// Units of a category in display order
pub fn units_of(category: Category) -> &'static [Unit] {
    category.units()
}
