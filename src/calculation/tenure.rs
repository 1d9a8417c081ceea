//! Tenure arithmetic for a separating employment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Days of tenure that amount to one full year of service.
pub const DAYS_PER_SERVICE_YEAR: i64 = 365;

/// The tenure of one employment, leave date inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TenureResult {
    /// Total days from join date through leave date, inclusive.
    pub total_days: i64,
    /// Tenure in fractional years (days / 365).
    pub total_years: f64,
    /// Tenure rounded up to whole years, never less than one; the key
    /// into the service-year deduction table.
    pub whole_years: u32,
}

/// Computes tenure from the employment dates.
///
/// The leave date counts as a worked day. A leave date before the join
/// date is invalid input.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_tenure;
/// use chrono::NaiveDate;
///
/// let tenure = calculate_tenure(
///     NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
/// ).unwrap();
/// assert_eq!(tenure.total_days, 1082);
/// assert_eq!(tenure.whole_years, 3);
/// ```
pub fn calculate_tenure(join_date: NaiveDate, leave_date: NaiveDate) -> EngineResult<TenureResult> {
    if leave_date < join_date {
        return Err(EngineError::InvalidEmployment {
            field: "leave_date".to_string(),
            message: format!("leave date {leave_date} precedes join date {join_date}"),
        });
    }

    let total_days = (leave_date - join_date).num_days() + 1;
    let total_years = total_days as f64 / DAYS_PER_SERVICE_YEAR as f64;
    let whole_years = (total_days as u64)
        .div_ceil(DAYS_PER_SERVICE_YEAR as u64)
        .max(1) as u32;

    Ok(TenureResult {
        total_days,
        total_years,
        whole_years,
    })
}

impl TenureResult {
    /// Whether the tenure meets the statutory one-year severance
    /// eligibility threshold. Gating on this is caller policy; the
    /// calculators compute for any tenure.
    pub fn is_eligible(&self) -> bool {
        self.total_days >= DAYS_PER_SERVICE_YEAR
    }
}
