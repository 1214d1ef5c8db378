//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::PayrollConfig;

/// The file name a configuration directory must contain.
pub const PAYROLL_CONFIG_FILE: &str = "payroll.yaml";

/// Loads and provides access to a payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/italy/
/// └── payroll.yaml   # Schedules, contribution rates, credit bands, bonus taper
/// ```
///
/// # Example
///
/// ```no_run
/// use netpay_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/italy").unwrap();
/// println!("Loaded configuration: {}", loader.config().metadata.name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `payroll.yaml` is missing (`ConfigNotFound`)
    /// - the file is not valid YAML, misses a field, or contains an invalid
    ///   schedule (`ConfigParseError`)
    /// - a value violates a configuration constraint (`Configuration`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let config_path = path.as_ref().join(PAYROLL_CONFIG_FILE);
        let config = Self::load_yaml::<PayrollConfig>(&config_path)?;
        config.validate()?;

        debug!(
            path = %config_path.display(),
            name = %config.metadata.name,
            "Loaded payroll configuration"
        );

        Ok(Self { config })
    }

    /// Parses a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParseError` (with `<inline>` as the path) or
    /// `Configuration` like [`ConfigLoader::load`].
    pub fn from_yaml_str(yaml: &str) -> EngineResult<Self> {
        let config: PayrollConfig =
            serde_yaml::from_str(yaml).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(Self { config })
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

    /// Returns the loaded payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> PayrollConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/italy"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.config().metadata.region, "Lombardia");
    }

    #[test]
    fn test_file_matches_builtin_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.config(), &PayrollConfig::default());
    }

    #[test]
    fn test_loaded_schedule_values() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let tiers = loader.config().income_tax.schedule.tiers();

        assert_eq!(tiers.len(), 5);
        assert_eq!(tiers[2].threshold, dec("28000"));
        assert_eq!(tiers[2].rate, dec("0.38"));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains(PAYROLL_CONFIG_FILE));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_unsorted_schedule_fails_to_parse() {
        let yaml = include_str!("../../config/italy/payroll.yaml");
        let broken = yaml.replacen(r#"threshold: "15000""#, r#"threshold: "90000""#, 1);
        assert_ne!(yaml, broken);

        match ConfigLoader::from_yaml_str(&broken) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("ascending"), "unexpected message: {}", message);
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_taper_fails_validation() {
        let mut config = PayrollConfig::default();
        config.bonus.taper_low = dec("30000");
        let yaml = serde_yaml::to_string(&config).unwrap();

        assert!(matches!(
            ConfigLoader::from_yaml_str(&yaml),
            Err(EngineError::Configuration { .. })
        ));
    }

    #[test]
    fn test_yaml_roundtrip_of_defaults() {
        let yaml = serde_yaml::to_string(&PayrollConfig::default()).unwrap();
        let loader = ConfigLoader::from_yaml_str(&yaml).unwrap();
        assert_eq!(loader.into_config(), PayrollConfig::default());
    }
}
