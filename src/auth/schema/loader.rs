//! Loading a schema from JSON or YAML

use super::types::PermissionSchema;
use crate::utils::error::{RbacError, Result};
use std::path::Path;
use tracing::{debug, info};

impl PermissionSchema {
    /// Parse and validate a JSON schema document
    pub fn from_json_str(content: &str) -> Result<Self> {
        let schema: Self = serde_json::from_str(content)
            .map_err(|e| RbacError::schema(format!("Failed to parse JSON schema: {}", e)))?;
        schema.validate()?;
        Ok(schema)
    }

    /// Parse and validate a YAML schema document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let schema: Self = serde_yaml::from_str(content)
            .map_err(|e| RbacError::schema(format!("Failed to parse YAML schema: {}", e)))?;
        schema.validate()?;
        Ok(schema)
    }

    /// Load a schema file; `.yaml`/`.yml` are read as YAML, anything else as JSON
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading permission schema from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RbacError::schema(format!("Failed to read schema file: {}", e)))?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let schema = if is_yaml {
            Self::from_yaml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };

        debug!("Loaded permission schema with {} modules", schema.modules().len());
        Ok(schema)
    }
}
