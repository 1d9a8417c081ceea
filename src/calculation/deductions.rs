//! The four mandatory insurance contributions and payroll tax
//! withholding for one ledger entry.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{MonthlyWage, SchemeEnrollment};
use crate::config::WageClassification;
use crate::rates::RateTableSet;

use super::rounding::{round_half_away, truncate_to_10};
use super::wage_base::{ContributionBase, contribution_base};

/// The deduction breakdown for one ledger entry.
///
/// Each contribution is rounded independently to whole KRW; no
/// fractional remainder carries between fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionResult {
    /// How the contribution base was derived.
    pub base: ContributionBase,
    /// National pension contribution.
    pub pension: i64,
    /// Health insurance contribution.
    pub health: i64,
    /// Long-term care contribution.
    pub long_term_care: i64,
    /// Employment insurance contribution.
    pub employment: i64,
    /// Income tax withheld.
    pub income_tax: i64,
    /// Local income tax withheld.
    pub local_tax: i64,
}

impl DeductionResult {
    /// Sum of all deductions.
    pub fn total(&self) -> i64 {
        self.pension
            + self.health
            + self.long_term_care
            + self.employment
            + self.income_tax
            + self.local_tax
    }

    /// Net pay after all deductions.
    pub fn net_of(&self, total_wage: i64) -> i64 {
        total_wage - self.total()
    }
}

/// Computes the four contributions and tax withholding for one entry.
///
/// The rate table is selected by the entry's period's calendar year;
/// an unsupported year fails with `RateTableMissing` rather than
/// silently using a stale table. Each of the four contributions is
/// independently zero when its enrollment flag is false. The pension
/// base is additionally clamped to the statutory floor/ceiling, and the
/// long-term care contribution is a fraction of the (pre-rounding)
/// health premium regardless of the health flag.
///
/// Withholding approximates the statutory simplified table: the base is
/// annualized through the progressive brackets, de-annualized, and
/// truncated to 10-KRW units; local tax is 10% of that, truncated
/// likewise.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_deductions;
/// use payroll_engine::config::WageClassification;
/// use payroll_engine::models::{MonthlyWage, SchemeEnrollment};
/// use payroll_engine::rates::RateTableSet;
/// use chrono::Utc;
///
/// let entry = MonthlyWage {
///     id: "mw-emp-001-2026-01".to_string(),
///     employment_id: "emp-001".to_string(),
///     period: "2026-01".parse().unwrap(),
///     components: Default::default(),
///     total_wage: 2_500_000,
///     pension: None,
///     health: None,
///     long_term_care: None,
///     employment: None,
///     income_tax: None,
///     local_tax: None,
///     net_wage: None,
///     work_days: None,
///     deduction_days: None,
///     deduction_hours: None,
///     created_at: Utc::now(),
/// };
///
/// let result = calculate_deductions(
///     &entry,
///     SchemeEnrollment::all(),
///     &WageClassification::standard(),
///     &RateTableSet::bundled(),
/// ).unwrap();
/// assert_eq!(result.pension, 118_750);
/// assert_eq!(result.health, 89_875);
/// ```
pub fn calculate_deductions(
    entry: &MonthlyWage,
    enrollment: SchemeEnrollment,
    classification: &WageClassification,
    rates: &RateTableSet,
) -> EngineResult<DeductionResult> {
    let table = rates.get(entry.period.year())?;
    let insurance = &table.insurance;
    let base = contribution_base(entry, classification);
    let base_amount = Decimal::from(base.base);

    let pension = if enrollment.pension && base.base > 0 {
        let clamped = base
            .base
            .clamp(insurance.pension_base_floor, insurance.pension_base_ceiling);
        round_half_away(Decimal::from(clamped) * insurance.pension)
    } else {
        0
    };

    let health_premium = base_amount * insurance.health;
    let health = if enrollment.health {
        round_half_away(health_premium)
    } else {
        0
    };
    let long_term_care = if enrollment.long_term_care {
        round_half_away(health_premium * insurance.long_term_care_of_health)
    } else {
        0
    };

    let employment = if enrollment.employment {
        round_half_away(base_amount * insurance.employment)
    } else {
        0
    };

    let annual_tax = table.severance.progressive_tax(base.base.saturating_mul(12));
    let income_tax = truncate_to_10(annual_tax / Decimal::from(12));
    let local_tax = truncate_to_10(Decimal::from(income_tax) * table.severance.local_tax_rate);

    Ok(DeductionResult {
        base,
        pension,
        health,
        long_term_care,
        employment,
        income_tax,
        local_tax,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::WageComponents;
    use chrono::Utc;

    fn entry(period: &str, total: i64) -> MonthlyWage {
        MonthlyWage {
            id: "mw-e1".to_string(),
            employment_id: "e1".to_string(),
            period: period.parse().unwrap(),
            components: WageComponents::default(),
            total_wage: total,
            pension: None,
            health: None,
            long_term_care: None,
            employment: None,
            income_tax: None,
            local_tax: None,
            net_wage: None,
            work_days: None,
            deduction_days: None,
            deduction_hours: None,
            created_at: Utc::now(),
        }
    }

    fn calculate(period: &str, total: i64, enrollment: SchemeEnrollment) -> DeductionResult {
        calculate_deductions(
            &entry(period, total),
            enrollment,
            &WageClassification::standard(),
            &RateTableSet::bundled(),
        )
        .unwrap()
    }

    #[test]
    fn test_2026_rates_on_a_plain_total() {
        let result = calculate("2026-01", 2_500_000, SchemeEnrollment::all());
        assert_eq!(result.base.base, 2_500_000);
        assert_eq!(result.pension, 118_750); // 4.75%
        assert_eq!(result.health, 89_875); // 3.595%
        assert_eq!(result.long_term_care, 11_810); // 13.14% of the premium
        assert_eq!(result.employment, 22_500); // 0.9%
        assert_eq!(result.income_tax, 270_000);
        assert_eq!(result.local_tax, 27_000);
    }

    #[test]
    fn test_2025_rates_differ_by_year() {
        let result = calculate("2025-01", 2_500_000, SchemeEnrollment::all());
        assert_eq!(result.pension, 112_500); // 4.5%
        assert_eq!(result.health, 88_625); // 3.545%
        assert_eq!(result.long_term_care, 11_477); // 12.95% of the premium
        assert_eq!(result.employment, 22_500);
    }

    #[test]
    fn test_pension_base_is_clamped() {
        let high = calculate("2026-01", 10_000_000, SchemeEnrollment::all());
        assert_eq!(high.pension, 293_075); // ceiling 6,170,000 × 4.75%

        let low = calculate("2026-01", 100_000, SchemeEnrollment::all());
        assert_eq!(low.pension, 18_525); // floor 390,000 × 4.75%
        // The other contributions use the unclamped base.
        assert_eq!(low.employment, 900);
    }

    #[test]
    fn test_each_flag_zeroes_its_own_contribution() {
        let mut enrollment = SchemeEnrollment::all();
        enrollment.health = false;

        let result = calculate("2026-01", 2_500_000, enrollment);
        assert_eq!(result.health, 0);
        // Long-term care rides on its own flag, not the health flag.
        assert_eq!(result.long_term_care, 11_810);
        assert_eq!(result.pension, 118_750);
    }

    #[test]
    fn test_all_flags_false_yields_zero_contributions() {
        let result = calculate("2026-01", 2_500_000, SchemeEnrollment::none());
        assert_eq!(result.pension, 0);
        assert_eq!(result.health, 0);
        assert_eq!(result.long_term_care, 0);
        assert_eq!(result.employment, 0);
        // Withholding is not an insurance contribution and still applies.
        assert_eq!(result.income_tax, 270_000);
    }

    #[test]
    fn test_zero_base_yields_zero_everything() {
        let result = calculate("2026-01", 0, SchemeEnrollment::all());
        assert_eq!(result.total(), 0);
    }

    #[test]
    fn test_missing_year_aborts() {
        let err = calculate_deductions(
            &entry("2019-06", 2_500_000),
            SchemeEnrollment::all(),
            &WageClassification::standard(),
            &RateTableSet::bundled(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::RateTableMissing { year: 2019 }));
    }

    #[test]
    fn test_net_of_matches_total() {
        let result = calculate("2026-01", 2_500_000, SchemeEnrollment::all());
        assert_eq!(
            result.net_of(2_500_000),
            2_500_000 - result.total()
        );
    }
}
