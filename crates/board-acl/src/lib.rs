//! # board-acl
//!
//! Permission evaluation for shared boards.
//!
//! An actor may read, edit, manage or share a board when:
//! - they own it (owners hold every permission), or
//! - the first user entry naming them grants it, or
//! - no user entry names them and a group entry for one of their groups
//!   grants it.
//!
//! Everything else is denied, including boards that do not exist.
//!
//! # Modules
//!
//! - [`evaluator`]: [`AccessEvaluator`] and its per-actor [`ActorScope`]
//! - [`traits`]: collaborator seams (resource lookup, ACL listing, groups)
//! - [`memory`]: in-memory directory and TOML snapshots
//! - [`config`]: evaluator settings
//! - [`permission`], [`types`]: domain types
//! - [`error`]: Error types and Result alias

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod evaluator;
pub mod memory;
pub mod permission;
pub mod traits;
pub mod types;

// Re-export key types at crate root for convenience
pub use config::{EditResolution, EvaluatorConfig, GroupResolution};
pub use error::{Error, Result};
pub use evaluator::{AccessEvaluator, ActorScope};
pub use memory::{AclId, MemoryDirectory, Snapshot};
pub use permission::{PermissionKind, PermissionMap, PermissionSet};
pub use traits::{AclListing, GroupMembership, ResourceLookup};
pub use types::{AccessControlEntry, ActorId, GroupId, Resource, ResourceId, Subject};
