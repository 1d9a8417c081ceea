//! HTTP API module for the payroll engine.
//!
//! The REST surface around the pure core: import preview, deduction
//! calculation and severance calculation. All persistence stays with the
//! caller.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DeductionRequest, ImportPreviewRequest, SeveranceRequest, WageHistoryItem};
pub use response::{ApiError, ApiErrorResponse, ImportPreviewResponse};
pub use state::AppState;
