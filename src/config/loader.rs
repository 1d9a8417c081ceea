//! Configuration loading from YAML files.
//!
//! The [`ConfigStore`] reads per-business configs, legacy mappings and
//! rate-table overrides from a directory tree and hands the in-memory
//! slices to the pure resolver.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::Business;
use crate::rates::{RateTable, RateTableSet};

use super::resolver::{ConfigResolution, resolve_config};
use super::types::{LegacyMapping, PayrollConfig};

/// Loads and provides access to payroll configuration.
///
/// # Directory structure
///
/// ```text
/// config/
/// ├── businesses/      rich per-business configs (*.yaml)
/// ├── mappings/        legacy column mappings (*.yaml)
/// └── rates/           rate tables (*.yaml), merged over the bundled years
/// ```
///
/// The root directory must exist; each subdirectory is optional. Rate
/// files override bundled years when they collide.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigStore;
///
/// let store = ConfigStore::load("./config")?;
/// let resolution = store.resolve("biz-bupyeong", None);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigStore {
    configs: Vec<PayrollConfig>,
    mappings: Vec<LegacyMapping>,
    rates: RateTableSet,
}

impl ConfigStore {
    /// Loads configuration from the specified directory.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(EngineError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let configs = Self::load_dir::<PayrollConfig>(&path.join("businesses"))?;
        let mappings = Self::load_dir::<LegacyMapping>(&path.join("mappings"))?;

        let mut rates = RateTableSet::bundled();
        for table in Self::load_dir::<RateTable>(&path.join("rates"))? {
            rates.insert(table);
        }

        Ok(Self {
            configs,
            mappings,
            rates,
        })
    }

    /// An in-memory store built from already-loaded parts, for callers
    /// that do not read the filesystem.
    pub fn from_parts(
        configs: Vec<PayrollConfig>,
        mappings: Vec<LegacyMapping>,
        rates: RateTableSet,
    ) -> Self {
        Self {
            configs,
            mappings,
            rates,
        }
    }

    /// Loads every `*.yaml` file in a directory; an absent directory
    /// yields an empty list.
    fn load_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> EngineResult<Vec<T>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let dir_str = dir.display().to_string();
        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut items = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                items.push(Self::load_yaml(&path)?);
            }
        }
        Ok(items)
    }

    /// Loads and parses one YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// All loaded rich configs.
    pub fn configs(&self) -> &[PayrollConfig] {
        &self.configs
    }

    /// All loaded legacy mappings.
    pub fn mappings(&self) -> &[LegacyMapping] {
        &self.mappings
    }

    /// The rate tables (bundled years plus file overrides).
    pub fn rates(&self) -> &RateTableSet {
        &self.rates
    }

    /// Runs the fallback chain for one business against the loaded
    /// sources.
    pub fn resolve(&self, business_id: &str, businesses: Option<&[Business]>) -> ConfigResolution {
        resolve_config(business_id, &self.configs, &self.mappings, businesses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("payroll-engine-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    const CONFIG_YAML: &str = r#"
business_id: biz-bupyeong
business_name: 부평점
version: 1
sheet:
  sheet_name: 임금대장
  sheet_keywords: [임금대장]
  header_row: 4
  data_start_row: 6
  columns:
    name: 2
    resident_no: 4
    total_wage: 20
wage_classification:
  ordinary_wage_items: [basic]
  tax_exempt_items: []
defaults:
  job_code: "532"
  weekly_hours: 40
  nationality: "100"
"#;

    const MAPPING_YAML: &str = r#"
business_id: biz-gangdong
sheet_name: 임금대장
header_row: 4
data_start_row: 6
columns:
  name: 2
  resident_no: 4
  join_date: 5
  leave_date: 6
  total_wage: 20
"#;

    #[test]
    fn test_missing_root_directory_is_an_error() {
        let err = ConfigStore::load("/definitely/not/here").unwrap_err();
        assert!(matches!(err, EngineError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_empty_directory_loads_bundled_rates_only() {
        let dir = scratch_dir("empty");
        let store = ConfigStore::load(&dir).unwrap();
        assert!(store.configs().is_empty());
        assert!(store.mappings().is_empty());
        assert!(store.rates().get(2026).is_ok());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_loads_configs_and_mappings() {
        let dir = scratch_dir("full");
        fs::create_dir_all(dir.join("businesses")).unwrap();
        fs::create_dir_all(dir.join("mappings")).unwrap();
        fs::write(dir.join("businesses/biz-bupyeong.yaml"), CONFIG_YAML).unwrap();
        fs::write(dir.join("mappings/biz-gangdong.yaml"), MAPPING_YAML).unwrap();

        let store = ConfigStore::load(&dir).unwrap();
        assert_eq!(store.configs().len(), 1);
        assert_eq!(store.mappings().len(), 1);

        assert!(matches!(
            store.resolve("biz-bupyeong", None),
            ConfigResolution::Resolved { .. }
        ));
        assert!(matches!(
            store.resolve("biz-gangdong", None),
            ConfigResolution::Resolved { .. }
        ));
        assert!(matches!(
            store.resolve("biz-none", None),
            ConfigResolution::Unresolved
        ));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_yaml_is_a_parse_error() {
        let dir = scratch_dir("bad");
        fs::create_dir_all(dir.join("businesses")).unwrap();
        fs::write(dir.join("businesses/broken.yaml"), "business_id: [unclosed").unwrap();

        let err = ConfigStore::load(&dir).unwrap_err();
        assert!(matches!(err, EngineError::ConfigParseError { .. }));
        let _ = fs::remove_dir_all(&dir);
    }
}
