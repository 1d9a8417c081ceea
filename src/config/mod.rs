//! Per-business payroll configuration: types, YAML loading, and the
//! fallback-chain resolver.

mod loader;
mod resolver;
mod types;

pub use loader::ConfigStore;
pub use resolver::{ConfigResolution, ConfigSource, migrate_legacy_mapping, resolve_config};
pub use types::{
    BusinessDefaults, CONFIG_VERSION, ColumnMap, DEFAULT_JOB_CODE, DEFAULT_NATIONALITY,
    DEFAULT_SHEET_KEYWORDS, DEFAULT_WEEKLY_HOURS, LegacyColumns, LegacyMapping, PayrollConfig,
    STANDARD_ALLOWANCE_CAP, SheetLayout, TaxExemptItem, WageClassification,
};
