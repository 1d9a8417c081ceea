//! Fallback-chain resolution of per-business mapping configuration.
//!
//! Resolution is a pure function of its inputs — no store handles, no
//! clock — so the chain is trivially repeatable in tests: rich config
//! first, then a legacy mapping upgraded in memory, then a definitive
//! unresolved signal.

use crate::error::{EngineError, EngineResult};
use crate::models::Business;

use super::types::{
    BusinessDefaults, ColumnMap, DEFAULT_NATIONALITY, DEFAULT_SHEET_KEYWORDS, CONFIG_VERSION,
    LegacyMapping, PayrollConfig, SheetLayout, WageClassification,
};

/// Which source a resolved config came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// An explicit rich config was found and returned unchanged.
    Rich,
    /// Only a legacy mapping existed; it was upgraded in memory.
    MigratedLegacy,
}

/// The outcome of the fallback chain.
///
/// Expressed as a tagged variant rather than a nullable return so the
/// reason for non-resolution survives to the caller, which must then fall
/// back to heuristic detection or reject the import.
#[derive(Debug, Clone)]
pub enum ConfigResolution {
    /// A usable config was found.
    Resolved {
        /// The resolved configuration.
        config: PayrollConfig,
        /// Where it came from.
        source: ConfigSource,
    },
    /// Neither source had an entry for the business.
    Unresolved,
}

impl ConfigResolution {
    /// Converts the resolution into a result, mapping `Unresolved` to
    /// [`EngineError::ConfigUnresolved`] for callers that cannot proceed
    /// without a mapping.
    pub fn into_result(self, business_id: &str) -> EngineResult<PayrollConfig> {
        match self {
            ConfigResolution::Resolved { config, .. } => Ok(config),
            ConfigResolution::Unresolved => Err(EngineError::ConfigUnresolved {
                business_id: business_id.to_string(),
            }),
        }
    }
}

/// Upgrades a legacy mapping to a rich config in memory.
///
/// The wage classification defaults to the standard non-taxable-allowance
/// table; business defaults come from the `Business` record when supplied,
/// else from the global constants.
pub fn migrate_legacy_mapping(mapping: &LegacyMapping, business: Option<&Business>) -> PayrollConfig {
    let columns = ColumnMap {
        name: Some(mapping.columns.name),
        resident_no: Some(mapping.columns.resident_no),
        join_date: Some(mapping.columns.join_date),
        leave_date: Some(mapping.columns.leave_date),
        total_wage: Some(mapping.columns.total_wage),
        pension: mapping.columns.pension,
        health: mapping.columns.health,
        long_term_care: mapping.columns.long_term_care,
        employment: mapping.columns.employment,
        income_tax: mapping.columns.income_tax,
        local_tax: mapping.columns.local_tax,
        net_wage: mapping.columns.net_wage,
        ..ColumnMap::default()
    };

    let mut defaults = BusinessDefaults::default();
    if let Some(business) = business {
        if let Some(job_code) = &business.default_job_code {
            defaults.job_code = job_code.clone();
        }
        if let Some(hours) = business.default_weekly_hours {
            defaults.weekly_hours = hours;
        }
    }
    defaults.nationality = DEFAULT_NATIONALITY.to_string();

    PayrollConfig {
        business_id: mapping.business_id.clone(),
        business_name: business
            .map(|b| b.name.clone())
            .unwrap_or_else(|| mapping.business_id.clone()),
        version: CONFIG_VERSION,
        updated_at: None,
        sheet: SheetLayout {
            sheet_name: mapping.sheet_name.clone(),
            sheet_keywords: DEFAULT_SHEET_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            header_row: mapping.header_row,
            data_start_row: mapping.data_start_row,
            columns,
        },
        wage_classification: WageClassification::standard(),
        defaults,
    }
}

/// Resolves the mapping configuration for one business.
///
/// Ordered, first match wins, no merging across sources:
/// 1. a rich config, returned unchanged;
/// 2. a legacy mapping, upgraded via [`migrate_legacy_mapping`];
/// 3. [`ConfigResolution::Unresolved`].
///
/// # Example
///
/// ```
/// use payroll_engine::config::{resolve_config, ConfigResolution};
///
/// let resolution = resolve_config("biz-unknown", &[], &[], None);
/// assert!(matches!(resolution, ConfigResolution::Unresolved));
/// ```
pub fn resolve_config(
    business_id: &str,
    configs: &[PayrollConfig],
    mappings: &[LegacyMapping],
    businesses: Option<&[Business]>,
) -> ConfigResolution {
    if let Some(config) = configs.iter().find(|c| c.business_id == business_id) {
        return ConfigResolution::Resolved {
            config: config.clone(),
            source: ConfigSource::Rich,
        };
    }

    if let Some(mapping) = mappings.iter().find(|m| m.business_id == business_id) {
        let business = businesses.and_then(|all| all.iter().find(|b| b.id == business_id));
        return ConfigResolution::Resolved {
            config: migrate_legacy_mapping(mapping, business),
            source: ConfigSource::MigratedLegacy,
        };
    }

    ConfigResolution::Unresolved
}
