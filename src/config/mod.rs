//! Configuration loading and management for the Payroll Engine.
//!
//! This module loads engine settings and effective-dated compensation
//! policies from YAML files, resolves the policy in force for a pay period,
//! and reads process settings from the environment.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//! use payroll_engine::models::PayPeriod;
//!
//! let loader = ConfigLoader::load("./config/payroll").unwrap();
//! let resolved = loader.policy_resolver().resolve(&PayPeriod::new(4, 2025).unwrap());
//! println!("Using policy: {}", resolved.label());
//! ```

mod loader;
mod resolver;
mod settings;
mod types;

pub use loader::ConfigLoader;
pub use resolver::{PolicyResolver, PolicySource, ResolvedPolicy};
pub use settings::{DEFAULT_BIND_ADDR, DEFAULT_CONFIG_DIR, ServerSettings};
pub use types::{
    BonusTier, CompensationPolicy, DEFAULT_INSURANCE_PERCENTAGE, DEFAULT_PF_PERCENTAGE,
    DEFAULT_TAX_RATE_PERCENT, EngineSettings, PayrollConfig, TaxSlab, UnrecordedDays,
    VariablePayRules,
};
