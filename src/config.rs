//! Analytics configuration
//!
//! Loaded from YAML at startup:
//!
//! ```yaml
//! environment: production
//!
//! prediction:
//!   base_url: "http://ml.internal:8000"
//!   timeout_ms: 5000
//! ```
//!
//! The `prediction` section (and its `base_url`) may be omitted entirely;
//! an absent prediction service is a valid deployment, not an error.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::predict::PredictionConfig;

/// Errors loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error in {file}: {error}")]
    Yaml {
        file: String,
        error: serde_yaml::Error,
    },
}

/// Deployment environment, controlling how much error detail the envelope
/// exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Top-level analytics configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub environment: Environment,

    /// External prediction service; absent when no service is deployed
    #[serde(default)]
    pub prediction: Option<PredictionConfig>,
}

impl AnalyticsConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|error| ConfigError::Yaml {
            file: path.display().to_string(),
            error,
        })
    }
}
