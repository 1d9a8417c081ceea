//! Severance calculation report model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point-in-time severance calculation for one employment's separation.
///
/// Immutable once computed: a new computation supersedes, never patches, a
/// prior report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeveranceReport {
    /// Report identifier.
    pub id: Uuid,
    /// The employment being settled.
    pub employment_id: String,
    /// The worker being settled.
    pub worker_id: String,
    /// The business paying out.
    pub business_id: String,

    /// Hire date.
    pub join_date: NaiveDate,
    /// Separation date.
    pub leave_date: NaiveDate,
    /// Total tenure in days, leave date inclusive.
    pub total_days: i64,
    /// Tenure in fractional years (days / 365).
    pub total_years: f64,

    /// Gross wages over the trailing three calendar months.
    pub trailing_wages: i64,
    /// Calendar days in the trailing three-month window.
    pub trailing_days: i64,
    /// Average daily wage over the window.
    pub average_daily_wage: i64,

    /// Gross severance pay before tax.
    pub severance_pay: i64,

    /// Service-year deduction applied to the gross pay.
    pub service_year_deduction: i64,
    /// Annualized-equivalent income after the service-year deduction.
    pub converted_income: i64,
    /// Deduction applied to the converted income.
    pub converted_deduction: i64,
    /// Taxable base after both deductions.
    pub taxable_income: i64,
    /// National severance income tax.
    pub severance_tax: i64,
    /// Local severance income tax (10% of the national tax).
    pub local_severance_tax: i64,

    /// Net payout after both taxes.
    pub net_severance_pay: i64,

    /// When this report was computed.
    pub calculated_at: DateTime<Utc>,
}
