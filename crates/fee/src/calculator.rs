//! Fee Calculation.
//!
//! This module contains the functions that compute the processor fee for a single transaction,
//! the net amount left after the fee, and the gross amount to charge for a desired net.
//!
//! Every monetary value leaving this module is rounded to cents with [`round_currency`].

use bigdecimal::{BigDecimal, RoundingMode};
use serde::Serialize;

use crate::{
    errors::FeeError,
    params::{ACH_FEE_PERCENTAGE, ACH_MAX_FEE, CARD_FEE_PERCENTAGE, CARD_FIXED_FEE},
    rail::Rail,
};

/// Number of decimal places kept for currency amounts.
pub const CURRENCY_SCALE: i64 = 2;

/// A total charge together with the fee included in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeTotal {
    /// The base amount plus the fee.
    pub total: BigDecimal,
    /// The fee component.
    pub fee: BigDecimal,
}

/// The amount received after the fee, together with the fee deducted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetAndFee {
    /// The amount minus the fee.
    pub net: BigDecimal,
    /// The fee deducted.
    pub fee: BigDecimal,
}

/// The fee split into its percentage and fixed parts.
///
/// On the card rail `total` is computed from the already rounded `percentage_portion`, so it can
/// differ by a cent from [`calculate_fee`]. Callers that reconcile against the charged fee should
/// use [`calculate_fee`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeBreakdown {
    /// The sum of both portions.
    pub total: BigDecimal,
    /// The part of the fee proportional to the amount.
    pub percentage_portion: BigDecimal,
    /// The flat part of the fee. Always zero for ACH.
    pub fixed_portion: BigDecimal,
}

/// Rounds a value to cents, with ties rounded away from zero.
///
/// `2.005` becomes `2.01` and `-1.235` becomes `-1.24`.
#[must_use]
pub fn round_currency(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(CURRENCY_SCALE, RoundingMode::HalfUp)
}

/// Checks that `amount` is accepted by `rail`.
pub fn validate_range(amount: &BigDecimal, rail: Rail) -> Result<(), FeeError> {
    ensure_in_range(amount, rail, "amount", amount)
}

/// Checks `checked` against the rail bounds, reporting `reported` under `param` on failure.
fn ensure_in_range(
    checked: &BigDecimal,
    rail: Rail,
    param: &'static str,
    reported: &BigDecimal,
) -> Result<(), FeeError> {
    let bounds = rail.bounds();
    if bounds.contains(checked) {
        Ok(())
    } else {
        Err(FeeError::OutOfRange { param, value: reported.clone(), bounds })
    }
}

/// The card percentage fee on an amount already rounded to cents, unrounded.
fn card_percentage_fee(rounded_base: &BigDecimal) -> BigDecimal {
    rounded_base * &*CARD_FEE_PERCENTAGE
}

/// The ACH fee on an amount already rounded to cents, capped and unrounded.
fn capped_ach_fee(rounded_base: &BigDecimal) -> BigDecimal {
    let fee = rounded_base * &*ACH_FEE_PERCENTAGE;
    if fee > *ACH_MAX_FEE {
        ACH_MAX_FEE.clone()
    } else {
        fee
    }
}

/// Calculates the fee the processor charges on `amount`.
pub fn calculate_fee(amount: &BigDecimal, rail: Rail) -> Result<BigDecimal, FeeError> {
    validate_range(amount, rail)?;

    let rounded_base = round_currency(amount);
    let fee = match rail {
        Rail::Card => card_percentage_fee(&rounded_base) + &*CARD_FIXED_FEE,
        Rail::Ach => capped_ach_fee(&rounded_base),
    };

    Ok(round_currency(&fee))
}

/// Calculates what is left of `amount` once the fee is deducted.
pub fn calculate_net_after_fee(amount: &BigDecimal, rail: Rail) -> Result<BigDecimal, FeeError> {
    validate_range(amount, rail)?;

    let fee = calculate_fee(amount, rail)?;
    Ok(round_currency(&(amount - &fee)))
}

/// Calculates the gross amount to charge so that `desired_net` is received after the fee.
///
/// The card inverse is exact. The ACH fee is piecewise, so once the uncapped fee on the desired
/// net reaches the cap the cap is simply added on. Just below the cap this overshoots and a
/// round trip through [`calculate_net_after_fee`] can land a few cents above `desired_net`.
pub fn calculate_gross_for_net(
    desired_net: &BigDecimal,
    rail: Rail,
) -> Result<BigDecimal, FeeError> {
    if *desired_net <= BigDecimal::from(0) {
        return Err(FeeError::NonPositiveNet { param: "desired_net", value: desired_net.clone() });
    }

    // The gross is never below the net, so a net above the maximum is rejected before any
    // arithmetic on it.
    let bounds = rail.bounds();
    if desired_net > bounds.max {
        return Err(FeeError::OutOfRange {
            param: "desired_net",
            value: desired_net.clone(),
            bounds,
        });
    }

    let one = BigDecimal::from(1);
    let gross = match rail {
        Rail::Card => (desired_net + &*CARD_FIXED_FEE) / &(one - &*CARD_FEE_PERCENTAGE),
        Rail::Ach => {
            let uncapped_fee = desired_net * &*ACH_FEE_PERCENTAGE;
            if uncapped_fee >= *ACH_MAX_FEE {
                desired_net + &*ACH_MAX_FEE
            } else {
                desired_net / &(one - &*ACH_FEE_PERCENTAGE)
            }
        }
    };

    let gross = round_currency(&gross);
    ensure_in_range(&gross, rail, "desired_net", desired_net)?;
    Ok(gross)
}

/// Adds the fee on `base_amount` to it.
pub fn add_fee(base_amount: &BigDecimal, rail: Rail) -> Result<BigDecimal, FeeError> {
    add_fee_with_breakdown(base_amount, rail).map(|charge| charge.total)
}

/// Adds the fee on `base_amount` to it, returning the fee as well.
pub fn add_fee_with_breakdown(
    base_amount: &BigDecimal,
    rail: Rail,
) -> Result<FeeTotal, FeeError> {
    let fee = calculate_fee(base_amount, rail)?;
    let total = round_currency(&(base_amount + &fee));
    Ok(FeeTotal { total, fee })
}

/// Calculates both the net amount and the fee on `amount`.
pub fn calculate_net_and_fee(amount: &BigDecimal, rail: Rail) -> Result<NetAndFee, FeeError> {
    let net = calculate_net_after_fee(amount, rail)?;
    let fee = calculate_fee(amount, rail)?;
    Ok(NetAndFee { net, fee })
}

/// Splits the fee on `amount` into its percentage and fixed portions.
pub fn calculate_fee_breakdown(
    amount: &BigDecimal,
    rail: Rail,
) -> Result<FeeBreakdown, FeeError> {
    validate_range(amount, rail)?;

    let rounded_base = round_currency(amount);
    match rail {
        Rail::Card => {
            let percentage_portion = round_currency(&card_percentage_fee(&rounded_base));
            let fixed_portion = CARD_FIXED_FEE.clone();
            let total = round_currency(&(&percentage_portion + &fixed_portion));
            Ok(FeeBreakdown { total, percentage_portion, fixed_portion })
        }
        Rail::Ach => {
            let percentage_portion = round_currency(&capped_ach_fee(&rounded_base));
            Ok(FeeBreakdown {
                total: percentage_portion.clone(),
                percentage_portion,
                fixed_portion: round_currency(&BigDecimal::from(0)),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    #[test]
    fn test_round_currency() {
        let test_cases = vec![
            ("1.235", "1.24"),
            ("2.005", "2.01"),
            ("1.234", "1.23"),
            ("0.000", "0.00"),
            ("0.004", "0.00"),
            ("0.005", "0.01"),
            ("-1.235", "-1.24"),
            ("-2.005", "-2.01"),
            ("-1.234", "-1.23"),
            ("10", "10.00"),
            ("2.9957", "3.00"),
        ];

        for (value, expected) in test_cases {
            let rounded = round_currency(&dec(value));
            assert_eq!(rounded, dec(expected), "Incorrect rounding for {value}");
            assert_eq!(rounded.as_bigint_and_exponent().1, CURRENCY_SCALE);
        }
    }

    #[test]
    fn test_card_fee() {
        let test_cases = vec![
            // amount, expected fee
            ("0.50", "0.31"),   // 0.0145 + 0.30
            ("1.00", "0.33"),   // 0.029 + 0.30
            ("10.00", "0.59"),  // 0.29 + 0.30
            ("100.00", "3.20"), // 2.90 + 0.30
            ("103.30", "3.30"), // 2.9957 + 0.30
            ("999999.99", "29000.30"),
        ];

        for (amount, expected) in test_cases {
            let fee = calculate_fee(&dec(amount), Rail::Card).unwrap();
            assert_eq!(fee, dec(expected), "Incorrect card fee for {amount}");
        }
    }

    #[test]
    fn test_card_fee_uses_rounded_base() {
        // 100.004 is charged as 100.00.
        assert_eq!(calculate_fee(&dec("100.004"), Rail::Card).unwrap(), dec("3.20"));
        // 17.245 is charged as 17.25: 0.50025 + 0.30.
        assert_eq!(calculate_fee(&dec("17.245"), Rail::Card).unwrap(), dec("0.80"));
        // 4.995 is charged as 5.00: 0.145 + 0.30. The raw amount would give 0.44.
        assert_eq!(calculate_fee(&dec("4.995"), Rail::Card).unwrap(), dec("0.45"));
    }

    #[test]
    fn test_ach_fee_uses_rounded_base() {
        // 624.995 is charged as 625.00, which reaches the cap.
        assert_eq!(calculate_fee(&dec("624.995"), Rail::Ach).unwrap(), dec("5.00"));
        // 100.004 is charged as 100.00.
        assert_eq!(calculate_fee(&dec("100.004"), Rail::Ach).unwrap(), dec("0.80"));

        let breakdown = calculate_fee_breakdown(&dec("624.995"), Rail::Ach).unwrap();
        assert_eq!(breakdown.percentage_portion, dec("5.00"));
        assert_eq!(breakdown.total, dec("5.00"));
    }

    #[test]
    fn test_ach_fee() {
        let test_cases = vec![
            ("0.00", "0.00"),
            ("0.01", "0.00"),
            ("100.00", "0.80"),
            ("624.99", "5.00"), // 4.99992 rounds up to the cap
            ("625.00", "5.00"),
            ("800.00", "5.00"), // 6.40 capped
            ("1000000.00", "5.00"),
        ];

        for (amount, expected) in test_cases {
            let fee = calculate_fee(&dec(amount), Rail::Ach).unwrap();
            assert_eq!(fee, dec(expected), "Incorrect ACH fee for {amount}");
        }
    }

    #[test]
    fn test_net_after_fee() {
        assert_eq!(calculate_net_after_fee(&dec("100.00"), Rail::Card).unwrap(), dec("96.80"));
        assert_eq!(calculate_net_after_fee(&dec("800.00"), Rail::Ach).unwrap(), dec("795.00"));
        assert_eq!(calculate_net_after_fee(&dec("0.00"), Rail::Ach).unwrap(), dec("0.00"));
    }

    #[test]
    fn test_range_validation() {
        let rejected = vec![
            ("0.00", Rail::Card),
            ("0.01", Rail::Card),
            ("0.49", Rail::Card),
            ("1000000.00", Rail::Card),
            ("-0.01", Rail::Ach),
            ("1000000.01", Rail::Ach),
        ];
        for (amount, rail) in rejected {
            let err = calculate_fee(&dec(amount), rail).unwrap_err();
            assert_eq!(
                err,
                FeeError::OutOfRange { param: "amount", value: dec(amount), bounds: rail.bounds() },
                "Expected {amount} to be rejected on {rail}"
            );
        }

        let accepted = vec![
            ("0.50", Rail::Card),
            ("999999.99", Rail::Card),
            ("0.00", Rail::Ach),
            ("0.01", Rail::Ach),
            ("1000000.00", Rail::Ach),
        ];
        for (amount, rail) in accepted {
            assert!(validate_range(&dec(amount), rail).is_ok(), "Expected {amount} on {rail}");
        }
    }

    #[test]
    fn test_gross_for_net() {
        let test_cases = vec![
            // desired net, rail, expected gross
            ("100.00", Rail::Card, "103.30"), // 100.30 / 0.971 = 103.2956
            ("96.80", Rail::Card, "100.00"),
            ("100.00", Rail::Ach, "100.81"), // 100 / 0.992 = 100.8064
            ("620.00", Rail::Ach, "625.00"),
            ("625.00", Rail::Ach, "630.00"), // fee reaches the cap
            ("795.00", Rail::Ach, "800.00"),
        ];

        for (net, rail, expected) in test_cases {
            let gross = calculate_gross_for_net(&dec(net), rail).unwrap();
            assert_eq!(gross, dec(expected), "Incorrect gross for {net} on {rail}");
        }
    }

    #[test]
    fn test_gross_for_net_rejects_non_positive() {
        for net in ["0", "0.00", "-5"] {
            for rail in Rail::ALL {
                let err = calculate_gross_for_net(&dec(net), rail).unwrap_err();
                assert_eq!(err, FeeError::NonPositiveNet { param: "desired_net", value: dec(net) });
            }
        }
    }

    #[test]
    fn test_gross_for_net_validates_result() {
        // 0.31 / 0.971 = 0.3193, below the card minimum.
        let err = calculate_gross_for_net(&dec("0.01"), Rail::Card).unwrap_err();
        assert_eq!(
            err,
            FeeError::OutOfRange {
                param: "desired_net",
                value: dec("0.01"),
                bounds: Rail::Card.bounds()
            }
        );

        // 999999.99 + 5.00 exceeds the ACH maximum.
        let err = calculate_gross_for_net(&dec("999999.99"), Rail::Ach).unwrap_err();
        assert_eq!(err.param(), "desired_net");
        assert_eq!(err.value(), &dec("999999.99"));
    }

    #[test]
    fn test_add_fee() {
        assert_eq!(add_fee(&dec("100.00"), Rail::Card).unwrap(), dec("103.20"));
        assert_eq!(add_fee(&dec("800.00"), Rail::Ach).unwrap(), dec("805.00"));

        let charge = add_fee_with_breakdown(&dec("100.00"), Rail::Card).unwrap();
        assert_eq!(charge, FeeTotal { total: dec("103.20"), fee: dec("3.20") });

        assert!(add_fee(&dec("0.10"), Rail::Card).is_err());
    }

    #[test]
    fn test_net_and_fee() {
        let result = calculate_net_and_fee(&dec("100.00"), Rail::Card).unwrap();
        assert_eq!(result, NetAndFee { net: dec("96.80"), fee: dec("3.20") });

        let result = calculate_net_and_fee(&dec("800.00"), Rail::Ach).unwrap();
        assert_eq!(result, NetAndFee { net: dec("795.00"), fee: dec("5.00") });
    }

    #[test]
    fn test_fee_breakdown() {
        let card = calculate_fee_breakdown(&dec("100.00"), Rail::Card).unwrap();
        assert_eq!(
            card,
            FeeBreakdown {
                total: dec("3.20"),
                percentage_portion: dec("2.90"),
                fixed_portion: dec("0.30")
            }
        );

        let ach = calculate_fee_breakdown(&dec("800.00"), Rail::Ach).unwrap();
        assert_eq!(
            ach,
            FeeBreakdown {
                total: dec("5.00"),
                percentage_portion: dec("5.00"),
                fixed_portion: dec("0.00")
            }
        );

        assert!(calculate_fee_breakdown(&dec("0.01"), Rail::Card).is_err());
    }

    #[test]
    fn test_fee_breakdown_uses_rounded_base() {
        // 4.995 is split as 5.00: the percentage portion 0.145 rounds to 0.15, where the raw
        // amount would give 0.144855 and 0.14.
        let card = calculate_fee_breakdown(&dec("4.995"), Rail::Card).unwrap();
        assert_eq!(
            card,
            FeeBreakdown {
                total: dec("0.45"),
                percentage_portion: dec("0.15"),
                fixed_portion: dec("0.30")
            }
        );
    }

    #[test]
    fn test_gross_for_net_rejects_huge_net_early() {
        for rail in Rail::ALL {
            let net = dec("1e10000000");
            let err = calculate_gross_for_net(&net, rail).unwrap_err();
            assert_eq!(
                err,
                FeeError::OutOfRange { param: "desired_net", value: net, bounds: rail.bounds() }
            );
        }

        // A net at the maximum still goes through the gross calculation before being rejected.
        let err = calculate_gross_for_net(&dec("999999.99"), Rail::Card).unwrap_err();
        assert_eq!(err.value(), &dec("999999.99"));
    }
}
