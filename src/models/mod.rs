//! Core domain models for the payroll engine.

mod business;
mod employment;
mod monthly_wage;
mod period;
mod severance;
mod worker;

pub use business::Business;
pub use employment::{Employment, EmploymentStatus, SchemeEnrollment};
pub use monthly_wage::{MonthlyWage, WageComponents, WageField};
pub use period::Period;
pub use severance::SeveranceReport;
pub use worker::Worker;
