//! Gross severance pay from average wage and tenure.

use rust_decimal::Decimal;

use super::rounding::round_half_away;
use super::tenure::DAYS_PER_SERVICE_YEAR;

/// Days of average wage owed per year of service.
pub const DAYS_PER_YEAR_OF_SERVICE_PAY: i64 = 30;

/// Computes gross severance pay.
///
/// The standard one-month-average-wage-per-year-of-service formula:
/// `average daily wage × 30 × (tenure days / 365)`, rounded to whole
/// KRW. Pay scales linearly with tenure for a fixed average wage.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_severance_pay;
///
/// // 1082 days of tenure at an average daily wage of 81,522.
/// assert_eq!(calculate_severance_pay(81_522, 1082), 7_249_874);
/// ```
pub fn calculate_severance_pay(average_daily_wage: i64, total_days: i64) -> i64 {
    let pay = Decimal::from(average_daily_wage)
        * Decimal::from(DAYS_PER_YEAR_OF_SERVICE_PAY)
        * Decimal::from(total_days)
        / Decimal::from(DAYS_PER_SERVICE_YEAR);
    round_half_away(pay)
}
