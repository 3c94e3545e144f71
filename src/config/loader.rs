//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! settings and holiday tables from YAML files.

use std::fs;
use std::path::Path;

use chrono::Datelike;
use tracing::debug;

use crate::calendar::StaticHolidayCalendar;
use crate::error::{EngineError, EngineResult};

use super::types::{
    EngineConfig, HolidayFile, LocaleMetadata, PayrollConfiguration, PayrollSettingsFile,
};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/kr/
/// ├── payroll.yaml      # Locale metadata and default wage parameters
/// └── holidays/
///     ├── 2025.yaml     # Public holidays of 2025
///     └── 2026.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use kr_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/kr").unwrap();
/// println!("Hourly wage: {}", loader.payroll().hourly_wage);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `payroll.yaml` or the `holidays` directory is missing
    /// - Any file contains invalid YAML
    /// - A holiday file lists a date outside its declared year
    /// - The default wage parameters are negative
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<PayrollSettingsFile>(&path.join("payroll.yaml"))?;
        settings.payroll.validate()?;

        let calendar = Self::load_holidays(&path.join("holidays"))?;

        debug!(
            path = %path.display(),
            holidays = calendar.len(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: EngineConfig::new(settings.locale, settings.payroll, calendar),
        })
    }

    /// Builds a loader from in-memory parts.
    pub fn from_parts(
        locale: LocaleMetadata,
        payroll: PayrollConfiguration,
        calendar: StaticHolidayCalendar,
    ) -> Self {
        Self {
            config: EngineConfig::new(locale, payroll, calendar),
        }
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

    /// Loads every holiday file from the holidays directory.
    fn load_holidays(holidays_dir: &Path) -> EngineResult<StaticHolidayCalendar> {
        let dir_str = holidays_dir.display().to_string();

        let entries = fs::read_dir(holidays_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut calendar = StaticHolidayCalendar::default();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "yaml") {
                continue;
            }

            let file = Self::load_yaml::<HolidayFile>(&path)?;
            for holiday in file.holidays {
                if holiday.date.year() != file.year {
                    return Err(EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!(
                            "holiday {} ({}) is outside year {}",
                            holiday.date, holiday.name, file.year
                        ),
                    });
                }
                calendar.insert(holiday);
            }
        }

        Ok(calendar)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the locale metadata.
    pub fn locale(&self) -> &LocaleMetadata {
        self.config.locale()
    }

    /// Returns the default wage parameters.
    pub fn payroll(&self) -> &PayrollConfiguration {
        self.config.payroll()
    }

    /// Returns the holiday calendar.
    pub fn calendar(&self) -> &StaticHolidayCalendar {
        self.config.calendar()
    }
}
