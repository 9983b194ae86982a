//! CLI configuration file.
//!
//! ```toml
//! [evaluator]
//! edit_resolution = "mirror-read"
//! group_resolution = "first-match"
//!
//! [logging]
//! level = "info"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use board_acl::EvaluatorConfig;
use serde::{Deserialize, Serialize};

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when neither `RUST_LOG` nor `--verbose` is set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Top-level CLI configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Evaluator settings.
    pub evaluator: EvaluatorConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load from an optional path; no path means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}
