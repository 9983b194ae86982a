//! Permission kinds, per-entry flag sets and evaluation results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

// ============================================================================
// PermissionKind
// ============================================================================

/// One of the four independent permissions on a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionKind {
    /// View the board and its content.
    Read,
    /// Change board content.
    Edit,
    /// Change board settings.
    Manage,
    /// Grant access to others.
    Share,
}

impl PermissionKind {
    /// All kinds in canonical order.
    pub const ALL: [PermissionKind; 4] = [Self::Read, Self::Edit, Self::Manage, Self::Share];

    /// Lowercase name, e.g. `read`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Edit => "edit",
            Self::Manage => "manage",
            Self::Share => "share",
        }
    }

    /// Key used by the web application when reporting permissions,
    /// e.g. `PERMISSION_READ`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Read => "PERMISSION_READ",
            Self::Edit => "PERMISSION_EDIT",
            Self::Manage => "PERMISSION_MANAGE",
            Self::Share => "PERMISSION_SHARE",
        }
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionKind {
    type Err = Error;

    /// Accepts `read`/`edit`/`manage`/`share` in any case, or the
    /// `PERMISSION_*` key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed) || kind.key() == trimmed)
            .ok_or_else(|| Error::UnknownPermission(s.to_string()))
    }
}

// ============================================================================
// PermissionSet
// ============================================================================

/// Flags carried by a single access control entry.
///
/// The flags are independent: nothing here implies read from edit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionSet {
    /// Read flag.
    pub read: bool,
    /// Edit flag.
    pub edit: bool,
    /// Manage flag.
    pub manage: bool,
    /// Share flag.
    pub share: bool,
}

impl PermissionSet {
    /// No permissions.
    pub const NONE: PermissionSet = PermissionSet {
        read: false,
        edit: false,
        manage: false,
        share: false,
    };

    /// Every permission.
    pub const ALL: PermissionSet = PermissionSet {
        read: true,
        edit: true,
        manage: true,
        share: true,
    };

    /// Return a copy with `kind` granted.
    pub fn with(mut self, kind: PermissionKind) -> Self {
        match kind {
            PermissionKind::Read => self.read = true,
            PermissionKind::Edit => self.edit = true,
            PermissionKind::Manage => self.manage = true,
            PermissionKind::Share => self.share = true,
        }
        self
    }

    /// The flag for `kind`.
    pub fn grants(&self, kind: PermissionKind) -> bool {
        match kind {
            PermissionKind::Read => self.read,
            PermissionKind::Edit => self.edit,
            PermissionKind::Manage => self.manage,
            PermissionKind::Share => self.share,
        }
    }
}

impl FromIterator<PermissionKind> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = PermissionKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

// ============================================================================
// PermissionMap
// ============================================================================

/// Effective permissions of one actor on one resource.
///
/// Serializes with the web application's `PERMISSION_*` keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionMap {
    /// Effective read permission.
    #[serde(rename = "PERMISSION_READ")]
    pub read: bool,
    /// Effective edit permission.
    #[serde(rename = "PERMISSION_EDIT")]
    pub edit: bool,
    /// Effective manage permission.
    #[serde(rename = "PERMISSION_MANAGE")]
    pub manage: bool,
    /// Effective share permission.
    #[serde(rename = "PERMISSION_SHARE")]
    pub share: bool,
}

impl PermissionMap {
    /// Everything granted.
    pub fn all() -> Self {
        Self {
            read: true,
            edit: true,
            manage: true,
            share: true,
        }
    }

    /// Everything denied.
    pub fn none() -> Self {
        Self::default()
    }

    /// Effective value for `kind`.
    pub fn get(&self, kind: PermissionKind) -> bool {
        match kind {
            PermissionKind::Read => self.read,
            PermissionKind::Edit => self.edit,
            PermissionKind::Manage => self.manage,
            PermissionKind::Share => self.share,
        }
    }

    /// Set the effective value for `kind`.
    pub fn set(&mut self, kind: PermissionKind, granted: bool) {
        match kind {
            PermissionKind::Read => self.read = granted,
            PermissionKind::Edit => self.edit = granted,
            PermissionKind::Manage => self.manage = granted,
            PermissionKind::Share => self.share = granted,
        }
    }

    /// Iterate `(kind, granted)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (PermissionKind, bool)> + '_ {
        PermissionKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    /// Returns `true` if all four permissions are granted.
    pub fn is_all_granted(&self) -> bool {
        self.iter().all(|(_, granted)| granted)
    }
}
