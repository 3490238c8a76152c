//! Order and batch number generation.
//!
//! Numbers are a pure function of the current date plus a random suffix.
//! No uniqueness check is made against the store before insert; the store's
//! unique constraint, if any, is the only backstop. Two orders created the
//! same day may carry the same display number (1-in-10000 per pair). This
//! matches the reference behavior and is an accepted risk.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-facing order number, format `ORD-YYYYMMDD-RRRR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Generate a number for the given date with a random 4-digit suffix.
    #[must_use]
    pub fn generate(date: NaiveDate) -> Self {
        let suffix = rand::rng().random_range(0..10_000u32);
        Self(format!("ORD-{}-{suffix:04}", date.format("%Y%m%d")))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderNumber {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Human-facing production batch number, format `BATCH-YYYYMMDD-RRR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchNumber(String);

impl BatchNumber {
    /// Generate a number for the given date with a random 3-digit suffix.
    #[must_use]
    pub fn generate(date: NaiveDate) -> Self {
        let suffix = rand::rng().random_range(0..1_000u32);
        Self(format!("BATCH-{}-{suffix:03}", date.format("%Y%m%d")))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BatchNumber {
    fn from(value: String) -> Self {
        Self(value)
    }
}
