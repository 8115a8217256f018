//! Overflow-checked Decimal arithmetic
//!
//! `Decimal` operators panic past ~7.9e28; a snapshot can hold values that
//! parse fine and still overflow once multiplied or summed.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{AdvisorError, Result};

pub fn mul(a: Decimal, b: Decimal, what: &str) -> Result<Decimal> {
    a.checked_mul(b).ok_or_else(|| AdvisorError::Overflow(what.to_string()))
}

pub fn sub(a: Decimal, b: Decimal, what: &str) -> Result<Decimal> {
    a.checked_sub(b).ok_or_else(|| AdvisorError::Overflow(what.to_string()))
}

pub fn sum<I>(values: I, what: &str) -> Result<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .ok_or_else(|| AdvisorError::Overflow(what.to_string()))
}

/// `part / whole`; `whole` must be non-zero
pub fn ratio(part: Decimal, whole: Decimal, what: &str) -> Result<Decimal> {
    part.checked_div(whole).ok_or_else(|| AdvisorError::Overflow(what.to_string()))
}

/// `part / whole * 100`; `whole` must be non-zero
pub fn percent(part: Decimal, whole: Decimal, what: &str) -> Result<Decimal> {
    mul(ratio(part, whole, what)?, dec!(100), what)
}
