use std::str::FromStr;

use crate::units::{split_quantity, Unit};

const SEPARATOR: &str = ": ";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StatusError {
    #[error("malformed status line: {0:?}")]
    Parse(String),
    #[error("status field {0} is missing")]
    MissingField(String),
    #[error("unit mismatch for {key}: value {raw:?} is not in {expected}")]
    UnitMismatch {
        key: String,
        raw: String,
        expected: Unit,
    },
    #[error("status field {key} has invalid number {number:?}")]
    NumberFormat { key: String, number: String },
}

/// Key/value fields reported by one apcaccess run, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusTable {
    fields: Vec<(String, String)>,
}

impl StatusTable {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get(&self, key: &str) -> Result<&str, StatusError> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .ok_or_else(|| StatusError::MissingField(key.to_string()))
    }

    /// Read a numeric field whose value must end in the `expected` unit token.
    pub fn get_float(&self, key: &str, expected: Unit) -> Result<f64, StatusError> {
        let raw = self.get(key)?;
        let number = match split_quantity(raw) {
            Some((number, unit)) if unit == expected.as_ref() => number,
            _ => {
                return Err(StatusError::UnitMismatch {
                    key: key.to_string(),
                    raw: raw.to_string(),
                    expected,
                })
            }
        };
        number
            .trim()
            .parse::<f64>()
            .map_err(|_| StatusError::NumberFormat {
                key: key.to_string(),
                number: number.to_string(),
            })
    }

    fn insert(&mut self, key: &str, value: &str) {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.fields.push((key.to_string(), value.to_string())),
        }
    }
}

/// Parse apcaccess output. Blank lines are skipped; every other line must be
/// `KEY : VALUE` and a repeated key keeps its last value.
pub fn parse_status(raw: &str) -> Result<StatusTable, StatusError> {
    let mut table = StatusTable::default();
    for line in raw.lines() {
        if line.trim_end().is_empty() {
            continue;
        }
        let (key, value) = line
            .split_once(SEPARATOR)
            .ok_or_else(|| StatusError::Parse(line.to_string()))?;
        table.insert(key.trim(), value.trim_end());
    }
    Ok(table)
}

impl FromStr for StatusTable {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_status(s)
    }
}
