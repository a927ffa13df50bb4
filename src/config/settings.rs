//! Process settings read from the environment.
//!
//! A `.env` file in the working directory is honoured through `dotenvy`.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::info;

use crate::error::{EngineError, EngineResult};

/// Default address the HTTP server binds to.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default YAML configuration directory.
pub const DEFAULT_CONFIG_DIR: &str = "./config/payroll";

/// Settings for running the payroll service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Socket address for the HTTP server.
    pub bind_addr: SocketAddr,
    /// Directory holding `engine.yaml` and `policies/`.
    pub config_dir: PathBuf,
    /// Optional JSON file with employees and attendance to preload.
    pub seed_file: Option<PathBuf>,
}

impl ServerSettings {
    /// Reads `PAYROLL_BIND_ADDR`, `PAYROLL_CONFIG_DIR` and `PAYROLL_SEED_FILE`.
    pub fn from_env() -> EngineResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        info!("Loading environment `PAYROLL_BIND_ADDR`");
        let bind = lookup("PAYROLL_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.parse().map_err(|_| EngineError::ConfigParseError {
            path: "PAYROLL_BIND_ADDR".to_string(),
            message: format!("'{}' is not a socket address", bind),
        })?;

        let config_dir = lookup("PAYROLL_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));

        let seed_file = lookup("PAYROLL_SEED_FILE")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            config_dir,
            seed_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let settings = ServerSettings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(settings.config_dir, PathBuf::from(DEFAULT_CONFIG_DIR));
        assert!(settings.seed_file.is_none());
    }

    #[test]
    fn test_values_from_environment() {
        let settings = ServerSettings::from_lookup(lookup_from(&[
            ("PAYROLL_BIND_ADDR", "0.0.0.0:8080"),
            ("PAYROLL_CONFIG_DIR", "/etc/payroll"),
            ("PAYROLL_SEED_FILE", "./data/seed.json"),
        ]))
        .unwrap();
        assert_eq!(settings.bind_addr.port(), 8080);
        assert_eq!(settings.config_dir, PathBuf::from("/etc/payroll"));
        assert_eq!(settings.seed_file, Some(PathBuf::from("./data/seed.json")));
    }

    #[test]
    fn test_invalid_bind_address_is_rejected() {
        let result = ServerSettings::from_lookup(lookup_from(&[("PAYROLL_BIND_ADDR", "nowhere")]));
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }
}
