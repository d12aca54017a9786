//! Payment Processor Fee Library.
//!
//! Computes the fee a payment processor charges on a single transaction, the net amount left after
//! the fee, and the gross amount to charge so that a desired net is received. Two rails are
//! supported: card payments (percentage plus fixed fee) and ACH debits (percentage with a cap).
//!
//! All amounts are [`BigDecimal`] values in major currency units and every result is rounded to
//! cents, ties away from zero.
//!
//! ```
//! use std::str::FromStr;
//!
//! use payfee::{calculate_fee, calculate_net_after_fee, BigDecimal, Rail};
//!
//! let amount = BigDecimal::from_str("100.00").unwrap();
//! assert_eq!(calculate_fee(&amount, Rail::Card).unwrap(), BigDecimal::from_str("3.20").unwrap());
//! assert_eq!(
//!     calculate_net_after_fee(&amount, Rail::Card).unwrap(),
//!     BigDecimal::from_str("96.80").unwrap()
//! );
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![warn(missing_docs)]

pub mod calculator;
pub mod errors;
pub mod format;
pub mod params;
pub mod rail;

pub use bigdecimal::BigDecimal;
pub use calculator::*;
pub use errors::FeeError;
pub use format::format_currency;
pub use rail::{AmountBounds, ParseRailError, Rail};
