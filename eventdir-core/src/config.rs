//! Validation settings.

use std::fmt::Write as _;

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::calendar_day::{CalendarDay, DEFAULT_DAY_FORMAT};
use crate::error::{EventDirError, EventDirResult};

/// Longest description an event may carry, in characters.
pub const DEFAULT_MAX_DESCRIPTION_CHARS: usize = 2048;

fn default_max_description_chars() -> usize {
    DEFAULT_MAX_DESCRIPTION_CHARS
}

fn default_report_date_format() -> String {
    DEFAULT_DAY_FORMAT.to_string()
}

/// Settings that tune event validation.
///
/// Every field has a default, so an empty document is a valid config:
///
/// ```toml
/// max_description_chars = 2048
/// report_date_format = "%B %d"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_max_description_chars")]
    pub max_description_chars: usize,

    /// chrono format string used for days in collision reports.
    #[serde(default = "default_report_date_format")]
    pub report_date_format: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            max_description_chars: default_max_description_chars(),
            report_date_format: default_report_date_format(),
        }
    }
}

impl ValidationConfig {
    /// Load settings from TOML text, filling in defaults for missing keys.
    pub fn from_toml_str(text: &str) -> EventDirResult<Self> {
        let config: ValidationConfig = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .map_err(|e| EventDirError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EventDirError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> EventDirResult<String> {
        toml::to_string_pretty(self).map_err(|e| EventDirError::Config(e.to_string()))
    }

    /// Reject settings the validators cannot work with.
    pub fn validate(&self) -> EventDirResult<()> {
        if self.max_description_chars == 0 {
            return Err(EventDirError::Config(
                "max_description_chars must be at least 1".into(),
            ));
        }

        if self.report_date_format.trim().is_empty() {
            return Err(EventDirError::Config(
                "report_date_format must not be empty".into(),
            ));
        }

        // chrono reports bad specifiers only when the format is rendered.
        let mut rendered = String::new();
        write!(rendered, "{}", CalendarDay::FIRST.format(&self.report_date_format)).map_err(|_| {
            EventDirError::Config(format!(
                "report_date_format '{}' is not a valid date format",
                self.report_date_format
            ))
        })?;

        Ok(())
    }
}
