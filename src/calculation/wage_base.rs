//! Contribution base derivation from a ledger entry.
//!
//! The base for the percentage-of-base contributions is the sum of the
//! ordinary-wage components designated by the business's wage
//! classification, minus non-taxable allowances up to their monthly
//! caps. Entries imported without a component breakdown fall back to the
//! total gross figure.

use serde::{Deserialize, Serialize};

use crate::config::WageClassification;
use crate::models::MonthlyWage;

/// The derived contribution base and how it was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionBase {
    /// Sum of the designated ordinary-wage components.
    pub ordinary_total: i64,
    /// Non-taxable allowance total actually excluded (post-cap).
    pub exempt_total: i64,
    /// The base the contribution rates apply to.
    pub base: i64,
    /// True when the entry carried no component breakdown and the total
    /// gross figure stood in for the ordinary total.
    pub used_total_fallback: bool,
}

/// Derives the contribution base for one ledger entry.
///
/// Each tax-exempt item excludes at most its monthly cap, and only as
/// much as the entry actually reports for that component. The base never
/// goes below zero.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::contribution_base;
/// use payroll_engine::config::WageClassification;
/// use payroll_engine::models::{MonthlyWage, WageField};
/// use chrono::Utc;
///
/// let mut entry = MonthlyWage {
///     id: "mw-emp-001-2026-01".to_string(),
///     employment_id: "emp-001".to_string(),
///     period: "2026-01".parse().unwrap(),
///     components: Default::default(),
///     total_wage: 2_800_000,
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
/// entry.components.set(WageField::Basic, 2_500_000);
/// entry.components.set(WageField::MealAllowance, 300_000);
///
/// let mut classification = WageClassification::standard();
/// classification.ordinary_wage_items =
///     vec![WageField::Basic, WageField::MealAllowance];
///
/// let result = contribution_base(&entry, &classification);
/// assert_eq!(result.ordinary_total, 2_800_000);
/// // The meal allowance is exempt only up to its 200,000 monthly cap.
/// assert_eq!(result.exempt_total, 200_000);
/// assert_eq!(result.base, 2_600_000);
/// ```
pub fn contribution_base(
    entry: &MonthlyWage,
    classification: &WageClassification,
) -> ContributionBase {
    let used_total_fallback = entry.components.is_empty();

    let ordinary_total = if used_total_fallback {
        entry.total_wage
    } else {
        classification
            .ordinary_wage_items
            .iter()
            .filter_map(|field| entry.components.get(*field))
            .sum()
    };

    let exempt_total = if used_total_fallback {
        0
    } else {
        classification
            .tax_exempt_items
            .iter()
            .filter_map(|item| {
                let reported = entry.components.get(item.field)?;
                Some(reported.max(0).min(item.monthly_limit))
            })
            .sum()
    };

    ContributionBase {
        ordinary_total,
        exempt_total,
        base: (ordinary_total - exempt_total).max(0),
        used_total_fallback,
    }
}
