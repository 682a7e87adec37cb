//! Converter configuration loading

use crate::core::error::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Knobs for the conversion layer
///
/// ```yaml
/// audit_privileged_access: true
/// preserve_zero_created_at: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Emit a warning-level audit event whenever an organisation is
    /// converted with its credentials included
    pub audit_privileged_access: bool,

    /// Keep an explicit zero-epoch organisation `createdAt` instead of
    /// replacing it with the current time. Off by default, which keeps the
    /// long-standing behaviour of treating a zero timestamp as missing.
    pub preserve_zero_created_at: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            audit_privileged_access: true,
            preserve_zero_created_at: false,
        }
    }
}

impl ConverterConfig {
    /// Load configuration from a YAML file; an empty file yields the defaults
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })?;
        Ok(config)
    }
}
