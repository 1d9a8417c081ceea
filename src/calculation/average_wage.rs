//! Average daily wage over the trailing three calendar months.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{MonthlyWage, Period};

use super::rounding::round_ratio;

/// Number of trailing calendar months in the average-wage window.
pub const WINDOW_MONTHS: usize = 3;

/// The trailing-window figures behind an average daily wage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AverageWageResult {
    /// The three window periods, most recent first.
    pub window: [Period; WINDOW_MONTHS],
    /// Gross wage total across the window periods.
    pub trailing_wages: i64,
    /// Calendar day count of the window; the leave month counts only
    /// through the leave day.
    pub trailing_days: i64,
    /// `trailing_wages / trailing_days`, rounded to whole KRW.
    pub average_daily_wage: i64,
}

/// Computes the average daily wage for an employment leaving on
/// `leave_date`.
///
/// The window is the three whole calendar months ending with the leave
/// month. All three periods must carry a ledger entry, otherwise the
/// calculation fails with `InsufficientWageHistory`; a zero-day window
/// fails explicitly instead of dividing.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_average_wage;
/// use payroll_engine::models::MonthlyWage;
/// use chrono::{NaiveDate, Utc};
///
/// let wages: Vec<MonthlyWage> = ["2025-10", "2025-11", "2025-12"]
///     .iter()
///     .map(|period| {
///         let period = period.parse().unwrap();
///         MonthlyWage {
///             id: MonthlyWage::entry_id("emp-001", period),
///             employment_id: "emp-001".to_string(),
///             period,
///             components: Default::default(),
///             total_wage: 2_500_000,
///             pension: None,
///             health: None,
///             long_term_care: None,
///             employment: None,
///             income_tax: None,
///             local_tax: None,
///             net_wage: None,
///             work_days: None,
///             deduction_days: None,
///             deduction_hours: None,
///             created_at: Utc::now(),
///         }
///     })
///     .collect();
///
/// let result = calculate_average_wage(
///     "emp-001",
///     NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
///     &wages,
/// ).unwrap();
/// assert_eq!(result.trailing_wages, 7_500_000);
/// assert_eq!(result.trailing_days, 92);
/// assert_eq!(result.average_daily_wage, 81_522);
/// ```
pub fn calculate_average_wage(
    employment_id: &str,
    leave_date: NaiveDate,
    wages: &[MonthlyWage],
) -> EngineResult<AverageWageResult> {
    let leave_period = Period::from_date(leave_date);
    let window = [leave_period, leave_period.pred(), leave_period.pred().pred()];

    let mut trailing_wages = 0i64;
    let mut trailing_days = 0i64;
    let mut periods_found = 0usize;

    for (i, period) in window.iter().enumerate() {
        if let Some(entry) = wages
            .iter()
            .find(|mw| mw.employment_id == employment_id && mw.period == *period)
        {
            trailing_wages += entry.total_wage;
            periods_found += 1;
        }

        trailing_days += if i == 0 {
            i64::from(leave_date.day())
        } else {
            i64::from(period.days_in_month())
        };
    }

    if periods_found < WINDOW_MONTHS {
        return Err(EngineError::InsufficientWageHistory {
            employment_id: employment_id.to_string(),
            periods_found,
        });
    }
    if trailing_days == 0 {
        return Err(EngineError::EmptyAverageWindow {
            employment_id: employment_id.to_string(),
        });
    }

    Ok(AverageWageResult {
        window,
        trailing_wages,
        trailing_days,
        average_daily_wage: round_ratio(trailing_wages, trailing_days),
    })
}
