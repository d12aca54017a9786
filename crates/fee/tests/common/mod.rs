#![allow(dead_code)]

use std::str::FromStr;

use payfee::BigDecimal;

/// Parses a decimal literal.
pub fn dec(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

/// Builds an amount from a whole number of cents.
pub fn cents(value: i64) -> BigDecimal {
    BigDecimal::new(value.into(), 2)
}

/// Asserts that two amounts are within `tolerance` of each other.
pub fn assert_within(actual: &BigDecimal, expected: &BigDecimal, tolerance: &str) {
    let deviation = (actual - expected).abs();
    assert!(
        deviation <= dec(tolerance),
        "Expected {actual} to be within {tolerance} of {expected}, deviation was {deviation}"
    );
}
