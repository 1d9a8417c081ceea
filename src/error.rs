//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions in the import and calculation pipeline.
//! Row-level problems are not errors: they are collected as
//! [`RowRejection`](crate::extract::RowRejection) values alongside the
//! successful rows of a batch.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Config- and rate-table-level failures abort the whole operation for the
/// affected business; there is no meaningful partial result without a
/// mapping or a rate basis.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::RateTableMissing { year: 2030 };
/// assert_eq!(error.to_string(), "No rate table for year 2030");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No mapping source (rich config or legacy mapping) resolved for a
    /// business; the import must fall back to heuristic detection or be
    /// rejected by the caller.
    #[error("No payroll config resolved for business '{business_id}'")]
    ConfigUnresolved {
        /// The business that could not be resolved.
        business_id: String,
    },

    /// No statutory rate table exists for the requested calendar year.
    #[error("No rate table for year {year}")]
    RateTableMissing {
        /// The year with no rate table entry.
        year: i32,
    },

    /// Fewer than three of the trailing periods before a separation carry a
    /// ledger entry, so an average wage cannot be established.
    #[error(
        "Insufficient wage history for employment '{employment_id}': \
         {periods_found} of 3 trailing periods present"
    )]
    InsufficientWageHistory {
        /// The employment whose history was inspected.
        employment_id: String,
        /// How many of the three trailing periods had entries.
        periods_found: usize,
    },

    /// The average-wage window contained zero calendar days; dividing would
    /// produce a meaningless result.
    #[error("Average wage window for employment '{employment_id}' has zero days")]
    EmptyAverageWindow {
        /// The employment whose window was empty.
        employment_id: String,
    },

    /// A write chunk exceeded the persistence collaborator's maximum
    /// transactional batch size.
    #[error("Write chunk of {size} exceeds the maximum batch size of {max}")]
    ChunkTooLarge {
        /// Number of writes in the offending chunk.
        size: usize,
        /// The maximum the store accepts.
        max: usize,
    },

    /// A period string was not a valid `YYYY-MM` value.
    #[error("Invalid period '{value}'")]
    InvalidPeriod {
        /// The rejected input.
        value: String,
    },

    /// An employment record was invalid for the requested operation.
    #[error("Invalid employment field '{field}': {message}")]
    InvalidEmployment {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/biz.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/biz.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_config_unresolved_displays_business() {
        let error = EngineError::ConfigUnresolved {
            business_id: "biz-bupyeong".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "No payroll config resolved for business 'biz-bupyeong'"
        );
    }

    #[test]
    fn test_rate_table_missing_displays_year() {
        let error = EngineError::RateTableMissing { year: 2019 };
        assert_eq!(error.to_string(), "No rate table for year 2019");
    }

    #[test]
    fn test_insufficient_wage_history_displays_counts() {
        let error = EngineError::InsufficientWageHistory {
            employment_id: "emp-001".to_string(),
            periods_found: 1,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient wage history for employment 'emp-001': 1 of 3 trailing periods present"
        );
    }

    #[test]
    fn test_invalid_period_displays_value() {
        let error = EngineError::InvalidPeriod {
            value: "2025/01".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid period '2025/01'");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_rate_table_missing() -> EngineResult<()> {
            Err(EngineError::RateTableMissing { year: 1999 })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_rate_table_missing()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
