//! Monetary rounding helpers.
//!
//! The currency has no fractional subunit, so every rate-times-base
//! product collapses to whole KRW here and nothing carries fractional
//! remainders between fields. Two policies exist in statute: standard
//! half-away-from-zero rounding for contributions, and truncation to
//! 10-KRW units for tax amounts.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to the nearest whole currency unit, half away from zero.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::round_half_away;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_half_away(Decimal::new(1125, 1)), 113); // 112.5
/// assert_eq!(round_half_away(Decimal::new(1124, 1)), 112); // 112.4
/// assert_eq!(round_half_away(Decimal::new(-1125, 1)), -113);
/// ```
pub fn round_half_away(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// Rounds the ratio of two whole amounts to the nearest whole unit.
///
/// The caller guarantees a non-zero denominator; division-by-zero guards
/// live at the call sites where an explicit error is meaningful.
pub fn round_ratio(numerator: i64, denominator: i64) -> i64 {
    round_half_away(Decimal::from(numerator) / Decimal::from(denominator))
}

/// Truncates to a 10-KRW unit, dropping the ones digit.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::truncate_to_10;
/// use rust_decimal::Decimal;
///
/// assert_eq!(truncate_to_10(Decimal::new(539969, 1)), 53_990); // 53,996.9
/// assert_eq!(truncate_to_10(Decimal::from(53_999)), 53_990);
/// ```
pub fn truncate_to_10(value: Decimal) -> i64 {
    let tens = (value / Decimal::from(10)).floor();
    (tens * Decimal::from(10)).to_i64().unwrap_or(0)
}
