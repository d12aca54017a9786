//! Fee Parameters.
//!
//! The processor's published pricing. These are fixed for the lifetime of the process and are
//! never loaded from configuration.

use bigdecimal::BigDecimal;
use lazy_static::lazy_static;

lazy_static! {
    /// Percentage charged on card payments (2.9%).
    pub static ref CARD_FEE_PERCENTAGE: BigDecimal = BigDecimal::new(29.into(), 3);
    /// Fixed fee added to every card payment ($0.30).
    pub static ref CARD_FIXED_FEE: BigDecimal = BigDecimal::new(30.into(), 2);
    /// Smallest chargeable card amount, inclusive ($0.50).
    pub static ref CARD_MIN_AMOUNT: BigDecimal = BigDecimal::new(50.into(), 2);
    /// Largest chargeable card amount, inclusive ($999,999.99).
    pub static ref CARD_MAX_AMOUNT: BigDecimal = BigDecimal::new(99_999_999.into(), 2);

    /// Percentage charged on ACH debits (0.8%).
    pub static ref ACH_FEE_PERCENTAGE: BigDecimal = BigDecimal::new(8.into(), 3);
    /// Cap on the ACH fee ($5.00).
    pub static ref ACH_MAX_FEE: BigDecimal = BigDecimal::new(500.into(), 2);
    /// Fixed zero floor on ACH debit amounts, inclusive. Not a pricing parameter.
    pub static ref ACH_MIN_AMOUNT: BigDecimal = BigDecimal::new(0.into(), 2);
    /// Largest ACH debit amount, inclusive ($1,000,000.00).
    pub static ref ACH_MAXIMUM_DEBIT_AMOUNT: BigDecimal = BigDecimal::new(100_000_000.into(), 2);
}
