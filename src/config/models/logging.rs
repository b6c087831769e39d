//! Logging configuration

use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level (`trace`, `debug`, `info`, `warn`, `error`)
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of human readable output
    #[serde(default)]
    pub json: bool,
    /// Include the event target in each line
    #[serde(default)]
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            with_target: false,
        }
    }
}

impl LoggingConfig {
    /// Merge logging configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.level != default_level() {
            self.level = other.level;
        }
        if other.json {
            self.json = other.json;
        }
        if other.with_target {
            self.with_target = other.with_target;
        }
        self
    }
}

fn default_level() -> String {
    "info".to_string()
}
