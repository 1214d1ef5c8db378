//! Configuration loading and management for the payroll rule set.
//!
//! This module provides the typed payroll configuration (tax schedules,
//! contribution rates, tax credit bands, bonus taper) and the loader that
//! reads it from YAML.
//!
//! # Example
//!
//! ```no_run
//! use netpay_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/italy").unwrap();
//! println!("Loaded: {}", loader.config().metadata.name);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, PAYROLL_CONFIG_FILE};
pub use types::{
    BonusConfig, ContributionConfig, IncomeTaxConfig, PayrollConfig, PayrollMetadata,
    TaxCreditConfig,
};
