//! Record identifiers
//!
//! Selections carry whatever identifier the hosting page rendered into its
//! row checkboxes: integer primary keys for most tables, opaque strings for
//! a few (SKU-addressed rows). Both forms round-trip through the wire
//! format unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A record identifier, integer or string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Integer primary key
    Int(i64),
    /// Opaque string identifier
    Str(String),
}

impl RecordId {
    /// Parse an identifier from user input, preferring the integer form
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(n) => RecordId::Int(n),
            Err(_) => RecordId::Str(raw.trim().to_string()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Str(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Str(s)
    }
}
