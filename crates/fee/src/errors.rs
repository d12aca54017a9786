//! Errors.
//!
//! This module contains error types that can be emitted by the crate.

use bigdecimal::BigDecimal;
use thiserror::Error;

use crate::{format::format_currency, rail::AmountBounds};

/// The error that can be emitted by any of the fee calculations.
#[derive(Debug, Error, PartialEq)]
#[allow(missing_docs)]
pub enum FeeError {
    #[error(
        "{param} is out of range: {value} is outside {} to {}",
        format_currency(.bounds.min),
        format_currency(.bounds.max)
    )]
    OutOfRange { param: &'static str, value: BigDecimal, bounds: AmountBounds },

    #[error("{param} must be positive: {value}")]
    NonPositiveNet { param: &'static str, value: BigDecimal },
}

impl FeeError {
    /// The name of the parameter that was rejected.
    #[must_use]
    pub fn param(&self) -> &'static str {
        match self {
            FeeError::OutOfRange { param, .. } | FeeError::NonPositiveNet { param, .. } => param,
        }
    }

    /// The value that was rejected.
    #[must_use]
    pub fn value(&self) -> &BigDecimal {
        match self {
            FeeError::OutOfRange { value, .. } | FeeError::NonPositiveNet { value, .. } => value,
        }
    }
}
