//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::resolver::PolicyResolver;
use super::types::{CompensationPolicy, EngineSettings, PayrollConfig};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/payroll/
/// ├── engine.yaml          # Engine settings
/// └── policies/
///     ├── fy2024.yaml      # One compensation policy per file
///     └── fy2025.yaml
/// ```
///
/// The `policies` directory may be missing or empty, in which case every
/// period resolves to the built-in default policy.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll")?;
/// println!("Loaded {} policies", loader.config().policies().len());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if `engine.yaml` is missing
    /// - `ConfigParseError` if any file contains invalid YAML
    /// - `InvalidPolicy` if any policy breaks its invariants
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let policies = Self::load_policies(&path.join("policies"))?;

        let config = PayrollConfig::new(settings, policies)?;
        tracing::info!(
            path = %path.display(),
            policies = config.policies().len(),
            unrecorded_days = ?config.settings().unrecorded_days,
            "Loaded payroll configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PayrollConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
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

    /// Loads all policy files from the policies directory.
    fn load_policies(policies_dir: &Path) -> EngineResult<Vec<CompensationPolicy>> {
        if !policies_dir.exists() {
            tracing::warn!(
                path = %policies_dir.display(),
                "No policies directory, the default policy will apply to every period"
            );
            return Ok(Vec::new());
        }

        let dir_str = policies_dir.display().to_string();
        let entries = fs::read_dir(policies_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut policies = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                policies.push(Self::load_yaml::<CompensationPolicy>(&path)?);
            }
        }

        Ok(policies)
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }

    /// Builds a policy resolver over the loaded policies.
    pub fn policy_resolver(&self) -> PolicyResolver {
        PolicyResolver::from_config(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnrecordedDays;
    use crate::models::PayPeriod;
    use rust_decimal::Decimal;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/payroll"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "payroll-engine-{}-{}",
            name,
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.settings().unrecorded_days, UnrecordedDays::Ignore);
        assert_eq!(loader.config().policies().len(), 2);
    }

    #[test]
    fn test_loaded_policies_are_ordered() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let policies = loader.config().policies();
        assert!(policies[0].effective_from < policies[1].effective_from);
    }

    #[test]
    fn test_loaded_policy_resolves_for_period() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let resolver = loader.policy_resolver();

        let resolved = resolver.resolve(&PayPeriod::new(6, 2025).unwrap());
        assert_eq!(resolved.policy.name, "fy2025");
        assert_eq!(resolved.policy.pf_percentage, dec("12"));
        assert_eq!(resolved.policy.tax_slabs.len(), 4);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("engine.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_policies_directory_is_allowed() {
        let dir = scratch_dir("no-policies");
        fs::write(dir.join("engine.yaml"), "name: bare\nunrecorded_days: absent\n").unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert!(loader.config().policies().is_empty());
        assert_eq!(loader.settings().unrecorded_days, UnrecordedDays::Absent);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_malformed_policy_reports_parse_error() {
        let dir = scratch_dir("bad-policy");
        fs::write(dir.join("engine.yaml"), "name: bad\n").unwrap();
        fs::create_dir_all(dir.join("policies")).unwrap();
        fs::write(dir.join("policies/broken.yaml"), "name: [unterminated\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("broken.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_policy_violating_invariants_is_rejected_on_load() {
        let dir = scratch_dir("gap-policy");
        fs::write(dir.join("engine.yaml"), "name: gap\n").unwrap();
        fs::create_dir_all(dir.join("policies")).unwrap();
        fs::write(
            dir.join("policies/gap.yaml"),
            r#"
name: gap
effective_from: 2025-04-01
pf_percentage: "12"
insurance_percentage: "0.75"
tax_slabs:
  - { min: "0", max: "100000", rate_percent: "0" }
  - { min: "200000", rate_percent: "10" }
"#,
        )
        .unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::InvalidPolicy { name, .. }) => assert_eq!(name, "gap"),
            other => panic!("Expected InvalidPolicy, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }
}
