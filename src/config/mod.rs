//! Configuration loading and management for the payroll engine.
//!
//! This module loads default wage parameters and public holiday tables from
//! YAML files.
//!
//! # Example
//!
//! ```no_run
//! use kr_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/kr").unwrap();
//! println!("Loaded: {}", config.locale().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineConfig, HolidayFile, LocaleMetadata, PayrollConfiguration, PayrollSettingsFile,
};
