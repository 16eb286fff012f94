//! Display formatting of monetary amounts stored in minor currency units (cents).
//!
//! Formatting uses a single fixed locale: a decimal comma, a dot as the
//! thousands separator and a trailing euro sign, e.g. `105000` cents
//! becomes `"1.050,00 €"`.

use thiserror::Error;


const CENTS_PER_UNIT: i64 = 100;

const DECIMAL_SEPARATOR: char = ',';

const THOUSANDS_SEPARATOR: char = '.';

const CURRENCY_SUFFIX: &str = " €";


#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PriceFormattingError {
    #[error("price cannot be negative (got {cents} cents)")]
    NegativeAmount { cents: i64 },
}


/// Formats an amount given in cents for display, e.g. `1` becomes `"0,01 €"`.
///
/// Negative amounts are rejected with [`PriceFormattingError::NegativeAmount`]
/// instead of being formatted with a sign.
pub fn format_price(cents: i64) -> Result<String, PriceFormattingError> {
    if cents < 0 {
        return Err(PriceFormattingError::NegativeAmount { cents });
    }

    let whole_units = cents / CENTS_PER_UNIT;
    let fractional_cents = cents % CENTS_PER_UNIT;

    let mut formatted = group_thousands(whole_units);
    formatted.push(DECIMAL_SEPARATOR);
    formatted.push_str(&format!("{:02}", fractional_cents));
    formatted.push_str(CURRENCY_SUFFIX);

    Ok(formatted)
}


fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let digit_count = digits.len();

    let mut grouped = String::with_capacity(digit_count + digit_count / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digit_count - index) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }

        grouped.push(digit);
    }

    grouped
}
