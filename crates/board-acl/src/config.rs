//! Evaluator configuration.
//!
//! Two tunables control how entries are interpreted:
//!
//! - [`EditResolution`]: how `evaluate_all` derives the edit permission.
//!   Deployments written against the web application's permission report get
//!   the read match mirrored into edit; `own-flag` reads each entry's own edit
//!   flag instead.
//! - [`GroupResolution`]: whether the first group the actor belongs to decides,
//!   or any member group that grants the permission.
//!
//! ```toml
//! edit_resolution = "own-flag"
//! group_resolution = "first-match"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How the edit permission is resolved when reporting all permissions at once.
///
/// Single-permission checks always use the entry's edit flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditResolution {
    /// Edit is reported as whatever the read match yields.
    #[default]
    MirrorRead,
    /// Edit is reported from the matching entry's edit flag.
    OwnFlag,
}

/// How group entries are combined when no user entry matched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupResolution {
    /// The first group entry (in list order) whose group contains the actor
    /// decides, granted or not.
    #[default]
    FirstMatch,
    /// Granted if any group entry whose group contains the actor grants it.
    /// Matches the web application's historical group scan.
    AnyGrant,
}

/// Settings for [`AccessEvaluator`](crate::AccessEvaluator).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Edit resolution used by `evaluate_all`.
    pub edit_resolution: EditResolution,
    /// Group entry combination used by every check.
    pub group_resolution: GroupResolution,
}

impl EvaluatorConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::config(format!("Invalid evaluator config: {e}")))
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        log::debug!("Loaded evaluator config from {}", path.display());
        Ok(config)
    }

    /// Builder-style setter for the edit resolution.
    pub fn with_edit_resolution(mut self, edit_resolution: EditResolution) -> Self {
        self.edit_resolution = edit_resolution;
        self
    }

    /// Builder-style setter for the group resolution.
    pub fn with_group_resolution(mut self, group_resolution: GroupResolution) -> Self {
        self.group_resolution = group_resolution;
        self
    }
}
