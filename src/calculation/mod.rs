//! Deduction and severance calculation logic.
//!
//! All calculations here are pure, synchronous, CPU-bound transforms:
//! contribution base derivation, the four insurance contributions and
//! tax withholding, tenure arithmetic, the trailing average wage, gross
//! severance pay and the progressive severance tax chain.

mod average_wage;
mod deductions;
mod rounding;
mod severance;
mod severance_pay;
mod severance_tax;
mod tenure;
mod wage_base;

pub use average_wage::{AverageWageResult, WINDOW_MONTHS, calculate_average_wage};
pub use deductions::{DeductionResult, calculate_deductions};
pub use rounding::{round_half_away, round_ratio, truncate_to_10};
pub use severance::calculate_severance;
pub use severance_pay::{DAYS_PER_YEAR_OF_SERVICE_PAY, calculate_severance_pay};
pub use severance_tax::{SeveranceTaxResult, calculate_severance_tax};
pub use tenure::{DAYS_PER_SERVICE_YEAR, TenureResult, calculate_tenure};
pub use wage_base::{ContributionBase, contribution_base};
