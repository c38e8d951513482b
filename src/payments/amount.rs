//! Conversion between host major-unit amounts and gateway minor units
//!
//! Every path that crosses the gateway boundary (initiate, refund, verify,
//! webhook) goes through these two functions.

use crate::error::{PaymentError, PaymentResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// ISO 4217 currencies without a minor subdivision.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &[
    "BIF", "CLP", "DJF", "GNF", "ISK", "JPY", "KMF", "KRW", "PYG", "RWF", "UGX", "UYI", "VND",
    "VUV", "XAF", "XOF", "XPF",
];

/// Number of decimal places the gateway expects for `currency`.
pub fn minor_unit_exponent(currency: &str) -> u32 {
    let code = currency.trim();
    if ZERO_DECIMAL_CURRENCIES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(code))
    {
        0
    } else {
        2
    }
}

/// Convert a major-unit amount into the integer the gateway expects,
/// rounding half away from zero.
pub fn to_minor_units(amount: Decimal, currency: &str) -> PaymentResult<i64> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PaymentError::invalid_argument(format!(
            "Amount must not be negative, got {}",
            amount
        )));
    }

    let scale = Decimal::from(10_i64.pow(minor_unit_exponent(currency)));
    amount
        .checked_mul(scale)
        .map(|v| v.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|v| v.to_i64())
        .ok_or_else(|| {
            PaymentError::invalid_argument(format!(
                "Amount {} {} is out of range",
                amount, currency
            ))
        })
}

/// Convert a gateway integer amount back into major units.
pub fn to_major_units(minor: i64, currency: &str) -> Decimal {
    Decimal::new(minor, minor_unit_exponent(currency)).normalize()
}
