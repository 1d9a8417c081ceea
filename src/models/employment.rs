//! Employment (worker–business relationship) model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Whether an employment relationship is currently in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentStatus {
    /// The worker is currently employed.
    Active,
    /// The worker has separated; `leave_date` records when.
    Inactive,
}

/// Enrollment flags for the four mandatory social-insurance schemes.
///
/// The four flags are independent: each contribution in the deduction
/// calculator is zero exactly when its flag is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeEnrollment {
    /// National pension.
    pub pension: bool,
    /// Health insurance.
    pub health: bool,
    /// Long-term care insurance.
    pub long_term_care: bool,
    /// Employment insurance.
    pub employment: bool,
}

impl SchemeEnrollment {
    /// Enrollment in all four schemes, the common case for regular hires.
    pub fn all() -> Self {
        Self {
            pension: true,
            health: true,
            long_term_care: true,
            employment: true,
        }
    }

    /// No enrollment in any scheme.
    pub fn none() -> Self {
        Self {
            pension: false,
            health: false,
            long_term_care: false,
            employment: false,
        }
    }
}

/// A relationship between a [`Worker`](super::Worker) and a
/// [`Business`](super::Business).
///
/// Created on hire, mutated on wage change or separation, never physically
/// deleted — leaving sets the status and `leave_date`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Employment, EmploymentStatus, SchemeEnrollment};
/// use chrono::{NaiveDate, Utc};
///
/// let employment = Employment {
///     id: "emp-001".to_string(),
///     worker_id: "worker-001".to_string(),
///     business_id: "biz-bupyeong".to_string(),
///     status: EmploymentStatus::Active,
///     join_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
///     leave_date: None,
///     leave_reason: None,
///     monthly_wage: 2_500_000,
///     job_code: "532".to_string(),
///     weekly_hours: 40,
///     enrollment: SchemeEnrollment::all(),
///     created_at: Utc::now(),
///     updated_at: Utc::now(),
/// };
/// assert!(employment.leave_date.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employment {
    /// Stable identifier.
    pub id: String,
    /// The worker side of the relationship.
    pub worker_id: String,
    /// The business side of the relationship.
    pub business_id: String,
    /// Current status.
    pub status: EmploymentStatus,
    /// Hire date.
    pub join_date: NaiveDate,
    /// Separation date, once the worker has left.
    #[serde(default)]
    pub leave_date: Option<NaiveDate>,
    /// Separation reason code, once the worker has left.
    #[serde(default)]
    pub leave_reason: Option<String>,
    /// Declared monthly wage baseline in KRW.
    pub monthly_wage: i64,
    /// Job classification code.
    pub job_code: String,
    /// Contracted weekly hours.
    pub weekly_hours: u32,
    /// Per-scheme enrollment flags.
    pub enrollment: SchemeEnrollment,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}
