//! Configuration types for per-business payroll imports.
//!
//! Two generations of mapping configuration exist side by side: the rich
//! [`PayrollConfig`] (spreadsheet layout + wage classification + business
//! defaults) and the minimal [`LegacyMapping`] it superseded. The resolver
//! upgrades legacy mappings in memory; nothing is ever merged across
//! sources.

use serde::{Deserialize, Serialize};

use crate::models::WageField;

/// Current schema version written into new configs.
pub const CONFIG_VERSION: u32 = 1;

/// Global default job classification code (food service worker).
pub const DEFAULT_JOB_CODE: &str = "532";

/// Global default contracted weekly hours.
pub const DEFAULT_WEEKLY_HOURS: u32 = 40;

/// Global default nationality code (domestic).
pub const DEFAULT_NATIONALITY: &str = "100";

/// Sheet-name keywords used when the configured sheet name is absent.
pub const DEFAULT_SHEET_KEYWORDS: [&str; 3] = ["임금대장", "급여대장", "급여"];

/// Monthly non-taxable cap for the standard allowance items, in KRW.
pub const STANDARD_ALLOWANCE_CAP: i64 = 200_000;

/// Field → 1-indexed column assignments for a spreadsheet layout.
///
/// Unmapped fields are simply omitted from extracted records, preserving
/// the distinction between "not reported" and "reported as zero".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    /// Worker name column.
    #[serde(default)]
    pub name: Option<u32>,
    /// Resident registration number column (a split front/back pair is
    /// joined with the following column).
    #[serde(default)]
    pub resident_no: Option<u32>,
    /// Join date column.
    #[serde(default)]
    pub join_date: Option<u32>,
    /// Leave date column.
    #[serde(default)]
    pub leave_date: Option<u32>,
    /// Total gross wage column.
    #[serde(default)]
    pub total_wage: Option<u32>,
    /// Base pay column.
    #[serde(default)]
    pub basic: Option<u32>,
    /// Weekday overtime column.
    #[serde(default)]
    pub overtime_weekday: Option<u32>,
    /// Weekend overtime column.
    #[serde(default)]
    pub overtime_weekend: Option<u32>,
    /// Night premium column.
    #[serde(default)]
    pub night: Option<u32>,
    /// Holiday work pay column.
    #[serde(default)]
    pub holiday: Option<u32>,
    /// Annual-leave pay column.
    #[serde(default)]
    pub annual_leave: Option<u32>,
    /// Bonus column.
    #[serde(default)]
    pub bonus: Option<u32>,
    /// Meal allowance column.
    #[serde(default)]
    pub meal_allowance: Option<u32>,
    /// Vehicle maintenance allowance column.
    #[serde(default)]
    pub car_allowance: Option<u32>,
    /// Childcare allowance column.
    #[serde(default)]
    pub childcare_allowance: Option<u32>,
    /// Other pay column.
    #[serde(default)]
    pub other: Option<u32>,
    /// National pension deduction column.
    #[serde(default)]
    pub pension: Option<u32>,
    /// Health insurance deduction column.
    #[serde(default)]
    pub health: Option<u32>,
    /// Long-term care deduction column.
    #[serde(default)]
    pub long_term_care: Option<u32>,
    /// Employment insurance deduction column.
    #[serde(default)]
    pub employment: Option<u32>,
    /// Income tax column.
    #[serde(default)]
    pub income_tax: Option<u32>,
    /// Local income tax column.
    #[serde(default)]
    pub local_tax: Option<u32>,
    /// Net wage column.
    #[serde(default)]
    pub net_wage: Option<u32>,
    /// Work-day counter column.
    #[serde(default)]
    pub work_days: Option<u32>,
    /// Absence-day counter column.
    #[serde(default)]
    pub deduction_days: Option<u32>,
    /// Absence-hour counter column.
    #[serde(default)]
    pub deduction_hours: Option<u32>,
}

impl ColumnMap {
    /// The column mapped to one gross-pay component, if any.
    pub fn component(&self, field: WageField) -> Option<u32> {
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
}

/// Spreadsheet shape: which sheet to read and where the data lives.
///
/// Row and column numbers are 1-indexed, matching how the layouts were
/// written down from the source spreadsheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    /// Preferred sheet name.
    pub sheet_name: String,
    /// Keywords tried against sheet names when `sheet_name` is absent.
    #[serde(default)]
    pub sheet_keywords: Vec<String>,
    /// 1-indexed header row.
    pub header_row: u32,
    /// 1-indexed first data row.
    pub data_start_row: u32,
    /// Field → column assignments.
    pub columns: ColumnMap,
}

/// A non-taxable allowance item with its monthly cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxExemptItem {
    /// The component this exemption applies to.
    pub field: WageField,
    /// Display label.
    pub label: String,
    /// Monthly non-taxable cap in KRW.
    pub monthly_limit: i64,
}

/// Which components make up the ordinary wage and which allowances are
/// non-taxable, per business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageClassification {
    /// Components forming the ordinary-wage base for contributions and
    /// severance.
    pub ordinary_wage_items: Vec<WageField>,
    /// Non-taxable allowances with monthly caps.
    pub tax_exempt_items: Vec<TaxExemptItem>,
}

impl WageClassification {
    /// The standard classification used when upgrading legacy mappings:
    /// base pay ordinary, meal and vehicle allowances non-taxable up to
    /// the standard monthly cap each.
    pub fn standard() -> Self {
        Self {
            ordinary_wage_items: vec![WageField::Basic],
            tax_exempt_items: vec![
                TaxExemptItem {
                    field: WageField::MealAllowance,
                    label: "식대".to_string(),
                    monthly_limit: STANDARD_ALLOWANCE_CAP,
                },
                TaxExemptItem {
                    field: WageField::CarAllowance,
                    label: "차량유지비".to_string(),
                    monthly_limit: STANDARD_ALLOWANCE_CAP,
                },
            ],
        }
    }
}

/// Per-business default attributes applied to new employments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessDefaults {
    /// Job classification code.
    pub job_code: String,
    /// Contracted weekly hours.
    pub weekly_hours: u32,
    /// Nationality code.
    pub nationality: String,
}

impl Default for BusinessDefaults {
    fn default() -> Self {
        Self {
            job_code: DEFAULT_JOB_CODE.to_string(),
            weekly_hours: DEFAULT_WEEKLY_HOURS,
            nationality: DEFAULT_NATIONALITY.to_string(),
        }
    }
}

/// The rich per-business payroll configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// The business this config belongs to.
    pub business_id: String,
    /// Display name of the business.
    pub business_name: String,
    /// Schema version.
    pub version: u32,
    /// Last update, ISO 8601, when known.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Spreadsheet shape and column assignments.
    pub sheet: SheetLayout,
    /// Ordinary-wage and non-taxable classification.
    pub wage_classification: WageClassification,
    /// Business defaults.
    #[serde(default)]
    pub defaults: BusinessDefaults,
}

/// The required columns of a legacy mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyColumns {
    /// Worker name column.
    pub name: u32,
    /// Resident registration number column.
    pub resident_no: u32,
    /// Join date column.
    pub join_date: u32,
    /// Leave date column.
    pub leave_date: u32,
    /// Total gross wage column.
    pub total_wage: u32,
    /// National pension deduction column.
    #[serde(default)]
    pub pension: Option<u32>,
    /// Health insurance deduction column.
    #[serde(default)]
    pub health: Option<u32>,
    /// Long-term care deduction column.
    #[serde(default)]
    pub long_term_care: Option<u32>,
    /// Employment insurance deduction column.
    #[serde(default)]
    pub employment: Option<u32>,
    /// Income tax column.
    #[serde(default)]
    pub income_tax: Option<u32>,
    /// Local income tax column.
    #[serde(default)]
    pub local_tax: Option<u32>,
    /// Net wage column.
    #[serde(default)]
    pub net_wage: Option<u32>,
}

/// The minimal first-generation mapping: sheet coordinates plus a handful
/// of required columns. Kept only for stores that predate
/// [`PayrollConfig`]; the resolver upgrades it in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyMapping {
    /// The business this mapping belongs to.
    pub business_id: String,
    /// Sheet name to read.
    pub sheet_name: String,
    /// 1-indexed header row.
    pub header_row: u32,
    /// 1-indexed first data row.
    pub data_start_row: u32,
    /// Column assignments.
    pub columns: LegacyColumns,
}
