//! Request types for the payroll engine API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::extract::Workbook;
use crate::models::{
    Employment, MonthlyWage, Period, SchemeEnrollment, WageComponents, Worker,
};

/// Request body for the `/import/preview` endpoint.
///
/// Carries the raw workbook plus the caller's snapshot of the chain —
/// persistence is a collaborator, so the engine never fetches state
/// itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPreviewRequest {
    /// The business the import belongs to.
    pub business_id: String,
    /// The period the sheet reports.
    pub period: Period,
    /// The raw workbook, as ordered rows of ordered cells per sheet.
    pub workbook: Workbook,
    /// Known workers, for resident-number matching.
    #[serde(default)]
    pub workers: Vec<Worker>,
    /// Known employments, for (worker, business) matching.
    #[serde(default)]
    pub employments: Vec<Employment>,
    /// Existing ledger entries, for (employment, period) matching.
    #[serde(default)]
    pub entries: Vec<MonthlyWage>,
}

/// Request body for the `/deductions` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionRequest {
    /// Business whose wage classification applies; the standard
    /// classification is used when omitted or unresolved.
    #[serde(default)]
    pub business_id: Option<String>,
    /// The period the wage belongs to; selects the rate-table year.
    pub period: Period,
    /// Total gross wage.
    pub total_wage: i64,
    /// Component breakdown, where known.
    #[serde(default)]
    pub components: WageComponents,
    /// Scheme enrollment flags of the employment.
    pub enrollment: SchemeEnrollment,
}

/// One period of wage history in a severance request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WageHistoryItem {
    /// The reporting period.
    pub period: Period,
    /// Total gross wage for the period.
    pub total_wage: i64,
}

/// Request body for the `/severance` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveranceRequest {
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
    /// Ledger history for the employment.
    pub wages: Vec<WageHistoryItem>,
}
