//! Currency Formatting.

use bigdecimal::BigDecimal;

use crate::calculator::round_currency;

/// Formats an amount as dollars with 2 decimal places and thousands separators.
///
/// The value is rounded with [`round_currency`] first, so `1234.565` renders as `$1,234.57` and
/// `-0.5` as `-$0.50`.
#[must_use]
pub fn format_currency(value: &BigDecimal) -> String {
    let rounded = round_currency(value);
    let (cents, _) = rounded.as_bigint_and_exponent();
    let digits = format!("{:0>3}", cents.magnitude().to_string());
    let (whole, fraction) = digits.split_at(digits.len() - 2);

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // Handle negative values (refunds, adjustments).
    let sign = if rounded < BigDecimal::from(0) { "-" } else { "" };
    format!("{sign}${grouped}.{fraction}")
}
