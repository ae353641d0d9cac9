//! Unit tokens used by apcaccess for numeric fields

use strum::{AsRefStr, Display, EnumString};

/// Trailing unit token of a numeric apcaccess field, e.g. the `Watts` in `330 Watts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
pub enum Unit {
    Watts,
    Percent,
}

/// Split a raw field value on its last space into `(number, unit)`.
///
/// Returns `None` when the value carries no space-separated unit token.
pub fn split_quantity(raw: &str) -> Option<(&str, &str)> {
    raw.rsplit_once(' ')
}

/// Scale a percentage of `total` back into the unit of `total`.
pub fn percent_of(total: f64, percent: f64) -> f64 {
    total * percent / 100.0
}

/// Format a watt value the way the plugin protocol expects it (two decimals).
pub fn format_watts(value: f64) -> String {
    format!("{value:.2}")
}
