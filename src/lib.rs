//! Payroll Ledger Engine
//!
//! This crate turns irregular spreadsheet payroll exports into a canonical
//! wage ledger and derives statutory insurance deductions and severance pay
//! from that ledger. The pipeline is: column-mapping resolution → record
//! extraction → ledger reconciliation → deduction / severance calculation,
//! all pure synchronous transforms over year-versioned rate tables.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod rates;
pub mod reconcile;
