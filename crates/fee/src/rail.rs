//! Payment Rails.
//!
//! A rail is the class of payment method a transaction settles over. It decides which fee formula
//! and which amount bounds apply.

use std::{fmt, str::FromStr};

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::{ACH_MAXIMUM_DEBIT_AMOUNT, ACH_MIN_AMOUNT, CARD_MAX_AMOUNT, CARD_MIN_AMOUNT};

/// The payment rail a transaction is charged on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rail {
    /// Card payments: percentage plus a fixed fee.
    Card,
    /// ACH bank debits: percentage fee with a hard cap.
    Ach,
}

/// Inclusive bounds on the amount a rail accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountBounds {
    /// The smallest accepted amount.
    pub min: &'static BigDecimal,
    /// The largest accepted amount.
    pub max: &'static BigDecimal,
}

impl AmountBounds {
    /// Whether `amount` lies within the bounds.
    #[must_use]
    pub fn contains(&self, amount: &BigDecimal) -> bool {
        amount >= self.min && amount <= self.max
    }
}

impl Rail {
    /// All supported rails.
    pub const ALL: [Rail; 2] = [Rail::Card, Rail::Ach];

    /// The amount bounds for the rail.
    #[must_use]
    pub fn bounds(self) -> AmountBounds {
        match self {
            Rail::Card => AmountBounds { min: &CARD_MIN_AMOUNT, max: &CARD_MAX_AMOUNT },
            Rail::Ach => AmountBounds { min: &ACH_MIN_AMOUNT, max: &ACH_MAXIMUM_DEBIT_AMOUNT },
        }
    }

    /// The lowercase name of the rail.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Rail::Card => "card",
            Rail::Ach => "ach",
        }
    }
}

impl fmt::Display for Rail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known rail.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown payment rail: {0} (expected `card` or `ach`)")]
pub struct ParseRailError(pub String);

impl FromStr for Rail {
    type Err = ParseRailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(Rail::Card),
            "ach" => Ok(Rail::Ach),
            _ => Err(ParseRailError(s.to_string())),
        }
    }
}
