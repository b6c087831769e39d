//! Configuration management for the permission engine
//!
//! This module handles loading, validation, and merging of engine configuration.

mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{RbacError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Permission engine configuration
    #[serde(default)]
    pub rbac: RbacConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RbacError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| RbacError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self::default().with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Get permission engine configuration
    pub fn rbac(&self) -> &RbacConfig {
        &self.rbac
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.rbac
            .validate()
            .map_err(|e| RbacError::Config(format!("RBAC config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| RbacError::Config(format!("Logging config error: {}", e)))?;

        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.rbac = self.rbac.merge(other.rbac);
        self.logging = self.logging.merge(other.logging);
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RbacError::Config(format!("Failed to serialize config to JSON: {}", e)))
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| RbacError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
