//! Monthly wage ledger entry and its component breakdown.
//!
//! A [`MonthlyWage`] is the reconciliation target: at most one entry exists
//! per (employment, period) key, and the reconciler only ever inserts new
//! entries or patches the total of existing ones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Period;

/// Identifies one optional gross-pay component of a ledger entry.
///
/// Wage classifications reference components by this key to designate the
/// ordinary-wage base and the non-taxable allowances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WageField {
    /// Base pay.
    Basic,
    /// Weekday overtime pay.
    OvertimeWeekday,
    /// Weekend / holiday overtime pay.
    OvertimeWeekend,
    /// Night work premium.
    Night,
    /// Holiday work pay.
    Holiday,
    /// Unused annual leave pay.
    AnnualLeave,
    /// Bonus.
    Bonus,
    /// Meal allowance.
    MealAllowance,
    /// Vehicle maintenance allowance.
    CarAllowance,
    /// Childcare allowance.
    ChildcareAllowance,
    /// Anything not covered by the named components.
    Other,
}

impl WageField {
    /// All component fields, in ledger column order.
    pub const ALL: [WageField; 11] = [
        WageField::Basic,
        WageField::OvertimeWeekday,
        WageField::OvertimeWeekend,
        WageField::Night,
        WageField::Holiday,
        WageField::AnnualLeave,
        WageField::Bonus,
        WageField::MealAllowance,
        WageField::CarAllowance,
        WageField::ChildcareAllowance,
        WageField::Other,
    ];
}

/// The optional gross-pay component breakdown of a ledger entry.
///
/// An unmapped or unreported component stays `None`, preserving the
/// distinction between "not reported" and "reported as zero".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageComponents {
    /// Base pay.
    #[serde(default)]
    pub basic: Option<i64>,
    /// Weekday overtime pay.
    #[serde(default)]
    pub overtime_weekday: Option<i64>,
    /// Weekend / holiday overtime pay.
    #[serde(default)]
    pub overtime_weekend: Option<i64>,
    /// Night work premium.
    #[serde(default)]
    pub night: Option<i64>,
    /// Holiday work pay.
    #[serde(default)]
    pub holiday: Option<i64>,
    /// Unused annual leave pay.
    #[serde(default)]
    pub annual_leave: Option<i64>,
    /// Bonus.
    #[serde(default)]
    pub bonus: Option<i64>,
    /// Meal allowance.
    #[serde(default)]
    pub meal_allowance: Option<i64>,
    /// Vehicle maintenance allowance.
    #[serde(default)]
    pub car_allowance: Option<i64>,
    /// Childcare allowance.
    #[serde(default)]
    pub childcare_allowance: Option<i64>,
    /// Anything not covered by the named components.
    #[serde(default)]
    pub other: Option<i64>,
}

impl WageComponents {
    /// Returns the value of one component field.
    pub fn get(&self, field: WageField) -> Option<i64> {
        match field {
            WageField::Basic => self.basic,
            WageField::OvertimeWeekday => self.overtime_weekday,
            WageField::OvertimeWeekend => self.overtime_weekend,
            WageField::Night => self.night,
            WageField::Holiday => self.holiday,
            WageField::AnnualLeave => self.annual_leave,
            WageField::Bonus => self.bonus,
            WageField::MealAllowance => self.meal_allowance,
            WageField::CarAllowance => self.car_allowance,
            WageField::ChildcareAllowance => self.childcare_allowance,
            WageField::Other => self.other,
        }
    }

    /// Sets the value of one component field.
    pub fn set(&mut self, field: WageField, value: i64) {
        let slot = match field {
            WageField::Basic => &mut self.basic,
            WageField::OvertimeWeekday => &mut self.overtime_weekday,
            WageField::OvertimeWeekend => &mut self.overtime_weekend,
            WageField::Night => &mut self.night,
            WageField::Holiday => &mut self.holiday,
            WageField::AnnualLeave => &mut self.annual_leave,
            WageField::Bonus => &mut self.bonus,
            WageField::MealAllowance => &mut self.meal_allowance,
            WageField::CarAllowance => &mut self.car_allowance,
            WageField::ChildcareAllowance => &mut self.childcare_allowance,
            WageField::Other => &mut self.other,
        };
        *slot = Some(value);
    }

    /// True when no component has been reported at all.
    pub fn is_empty(&self) -> bool {
        WageField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

/// One ledger entry: the wage record of one employment for one period.
///
/// Key = (`employment_id`, `period`). The total gross figure is required
/// and non-negative; everything else is optional. Entries are created and
/// patched by the reconciler, never deleted by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyWage {
    /// Stable identifier, conventionally `mw-{employment_id}-{period}`.
    pub id: String,
    /// The employment this entry belongs to.
    pub employment_id: String,
    /// The reporting window.
    pub period: Period,
    /// Gross-pay component breakdown, where reported.
    #[serde(default)]
    pub components: WageComponents,
    /// Total gross wage in KRW (pre-deduction). Required and non-negative.
    pub total_wage: i64,
    /// National pension deduction, where reported.
    #[serde(default)]
    pub pension: Option<i64>,
    /// Health insurance deduction, where reported.
    #[serde(default)]
    pub health: Option<i64>,
    /// Long-term care deduction, where reported.
    #[serde(default)]
    pub long_term_care: Option<i64>,
    /// Employment insurance deduction, where reported.
    #[serde(default)]
    pub employment: Option<i64>,
    /// Income tax withheld, where reported.
    #[serde(default)]
    pub income_tax: Option<i64>,
    /// Local income tax withheld, where reported.
    #[serde(default)]
    pub local_tax: Option<i64>,
    /// Net wage actually paid out, where reported.
    #[serde(default)]
    pub net_wage: Option<i64>,
    /// Days worked in the period, where reported.
    #[serde(default)]
    pub work_days: Option<u32>,
    /// Days deducted for absence, where reported.
    #[serde(default)]
    pub deduction_days: Option<u32>,
    /// Hours deducted for absence, where reported.
    #[serde(default)]
    pub deduction_hours: Option<u32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl MonthlyWage {
    /// Conventional entry id for a (employment, period) key.
    pub fn entry_id(employment_id: &str, period: Period) -> String {
        format!("mw-{employment_id}-{period}")
    }

    /// Sum of the deduction fields that have been reported, or `None` when
    /// none of them have.
    pub fn reported_deduction_total(&self) -> Option<i64> {
        let fields = [
            self.pension,
            self.health,
            self.long_term_care,
            self.employment,
            self.income_tax,
            self.local_tax,
        ];
        if fields.iter().all(Option::is_none) {
            return None;
        }
        Some(fields.iter().flatten().sum())
    }

    /// Signed difference between the reported net wage and
    /// `total_wage - reported deductions`, when both sides are present.
    ///
    /// A non-zero value beyond rounding tolerance is an inconsistency to be
    /// reported, never auto-corrected.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::MonthlyWage;
    /// use chrono::Utc;
    ///
    /// let mut entry = MonthlyWage {
    ///     id: "mw-emp-001-2025-01".to_string(),
    ///     employment_id: "emp-001".to_string(),
    ///     period: "2025-01".parse().unwrap(),
    ///     components: Default::default(),
    ///     total_wage: 2_500_000,
    ///     pension: Some(112_500),
    ///     health: None,
    ///     long_term_care: None,
    ///     employment: None,
    ///     income_tax: None,
    ///     local_tax: None,
    ///     net_wage: Some(2_387_500),
    ///     work_days: None,
    ///     deduction_days: None,
    ///     deduction_hours: None,
    ///     created_at: Utc::now(),
    /// };
    /// assert_eq!(entry.net_discrepancy(), Some(0));
    ///
    /// entry.net_wage = Some(2_400_000);
    /// assert_eq!(entry.net_discrepancy(), Some(12_500));
    /// ```
    pub fn net_discrepancy(&self) -> Option<i64> {
        let net = self.net_wage?;
        let deductions = self.reported_deduction_total()?;
        Some(net - (self.total_wage - deductions))
    }
}
