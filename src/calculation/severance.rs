//! Full severance settlement for a separating employment.

use chrono::Utc;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employment, MonthlyWage, SeveranceReport, Worker};
use crate::rates::RateTableSet;

use super::average_wage::calculate_average_wage;
use super::severance_pay::calculate_severance_pay;
use super::severance_tax::calculate_severance_tax;
use super::tenure::calculate_tenure;

/// Computes a complete severance report for one separation.
///
/// Idempotent given identical inputs and recomputed from scratch on any
/// input change — a fresh report supersedes, never patches, a prior one.
/// The severance tax tables come from the rate table of the leave year;
/// an unsupported year aborts with `RateTableMissing`. The employment
/// must carry a leave date.
///
/// Tenure under one year is computed, not refused; the statutory
/// one-year eligibility gate is the caller's policy (see
/// [`TenureResult::is_eligible`](super::TenureResult::is_eligible)).
pub fn calculate_severance(
    employment: &Employment,
    worker: &Worker,
    wages: &[MonthlyWage],
    rates: &RateTableSet,
) -> EngineResult<SeveranceReport> {
    let leave_date = employment
        .leave_date
        .ok_or_else(|| EngineError::InvalidEmployment {
            field: "leave_date".to_string(),
            message: format!("employment '{}' has not separated", employment.id),
        })?;

    let table = rates.get(chrono::Datelike::year(&leave_date))?;

    let tenure = calculate_tenure(employment.join_date, leave_date)?;
    let average = calculate_average_wage(&employment.id, leave_date, wages)?;
    let severance_pay = calculate_severance_pay(average.average_daily_wage, tenure.total_days);
    let tax = calculate_severance_tax(severance_pay, tenure.whole_years, &table.severance);

    Ok(SeveranceReport {
        id: Uuid::new_v4(),
        employment_id: employment.id.clone(),
        worker_id: worker.id.clone(),
        business_id: employment.business_id.clone(),
        join_date: employment.join_date,
        leave_date,
        total_days: tenure.total_days,
        total_years: tenure.total_years,
        trailing_wages: average.trailing_wages,
        trailing_days: average.trailing_days,
        average_daily_wage: average.average_daily_wage,
        severance_pay,
        service_year_deduction: tax.service_year_deduction,
        converted_income: tax.converted_income,
        converted_deduction: tax.converted_deduction,
        taxable_income: tax.taxable_income,
        severance_tax: tax.severance_tax,
        local_severance_tax: tax.local_severance_tax,
        net_severance_pay: severance_pay - tax.total_tax(),
        calculated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmploymentStatus, SchemeEnrollment, WageComponents};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn worker() -> Worker {
        Worker {
            id: "w1".to_string(),
            name: "김철수".to_string(),
            resident_no: "9010101234567".to_string(),
            nationality: None,
            phone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn employment(join: &str, leave: Option<&str>) -> Employment {
        Employment {
            id: "e1".to_string(),
            worker_id: "w1".to_string(),
            business_id: "biz-a".to_string(),
            status: if leave.is_some() {
                EmploymentStatus::Inactive
            } else {
                EmploymentStatus::Active
            },
            join_date: date(join),
            leave_date: leave.map(date),
            leave_reason: None,
            monthly_wage: 2_500_000,
            job_code: "532".to_string(),
            weekly_hours: 40,
            enrollment: SchemeEnrollment::all(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn wage(period: &str, total: i64) -> MonthlyWage {
        let period = period.parse().unwrap();
        MonthlyWage {
            id: MonthlyWage::entry_id("e1", period),
            employment_id: "e1".to_string(),
            period,
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

    fn trailing_wages() -> Vec<MonthlyWage> {
        vec![
            wage("2025-10", 2_500_000),
            wage("2025-11", 2_500_000),
            wage("2025-12", 2_500_000),
        ]
    }

    #[test]
    fn test_full_settlement() {
        let report = calculate_severance(
            &employment("2023-01-15", Some("2025-12-31")),
            &worker(),
            &trailing_wages(),
            &RateTableSet::bundled(),
        )
        .unwrap();

        assert_eq!(report.total_days, 1082);
        assert_eq!(report.trailing_wages, 7_500_000);
        assert_eq!(report.trailing_days, 92);
        assert_eq!(report.average_daily_wage, 81_522);
        assert_eq!(report.severance_pay, 7_249_874);
        assert_eq!(report.service_year_deduction, 3_000_000);
        assert_eq!(report.severance_tax, 53_990);
        assert_eq!(report.local_severance_tax, 5_390);
        assert_eq!(report.net_severance_pay, 7_190_494);
    }

    #[test]
    fn test_identical_inputs_give_identical_figures() {
        let employment = employment("2023-01-15", Some("2025-12-31"));
        let wages = trailing_wages();
        let rates = RateTableSet::bundled();

        let first = calculate_severance(&employment, &worker(), &wages, &rates).unwrap();
        let second = calculate_severance(&employment, &worker(), &wages, &rates).unwrap();

        // A fresh report (new id, new timestamp) with the same figures.
        assert_ne!(first.id, second.id);
        assert_eq!(first.severance_pay, second.severance_pay);
        assert_eq!(first.net_severance_pay, second.net_severance_pay);
    }

    #[test]
    fn test_active_employment_is_invalid() {
        let err = calculate_severance(
            &employment("2023-01-15", None),
            &worker(),
            &trailing_wages(),
            &RateTableSet::bundled(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidEmployment { field, .. }
            if field == "leave_date"));
    }

    #[test]
    fn test_missing_rate_year_aborts() {
        let err = calculate_severance(
            &employment("2017-01-01", Some("2019-12-31")),
            &worker(),
            &trailing_wages(),
            &RateTableSet::bundled(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::RateTableMissing { year: 2019 }));
    }

    #[test]
    fn test_sparse_history_propagates() {
        let err = calculate_severance(
            &employment("2023-01-15", Some("2025-12-31")),
            &worker(),
            &trailing_wages()[1..].to_vec(),
            &RateTableSet::bundled(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EngineError::InsufficientWageHistory { .. }
        ));
    }
}
