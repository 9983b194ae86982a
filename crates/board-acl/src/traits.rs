//! Collaborator traits consumed by the evaluator.
//!
//! The evaluator owns no data. Board storage, ACL persistence and group
//! membership all live in the hosting application and are reached through
//! these traits:
//!
//! - [`ResourceLookup`]: find a resource and its owner
//! - [`AclListing`]: list a resource's access control entries in order
//! - [`GroupMembership`]: ask whether an actor belongs to a group
//!
//! [`MemoryDirectory`](crate::memory::MemoryDirectory) implements all three.

use crate::error::Result;
use crate::types::{AccessControlEntry, ActorId, GroupId, Resource, ResourceId};

/// Resolves a resource id to its record.
pub trait ResourceLookup: Send + Sync {
    /// Find a resource.
    ///
    /// Returns `Ok(None)` when the resource does not exist. `Err` is reserved
    /// for backend faults and is passed through to the caller unchanged.
    fn find(&self, id: &ResourceId) -> Result<Option<Resource>>;
}

/// Lists the access control entries of a resource.
pub trait AclListing: Send + Sync {
    /// All entries for `resource`, in stored order.
    ///
    /// Order matters: the first matching user entry and the first matching
    /// group entry decide the outcome. Unknown resources yield an empty list.
    fn find_all(&self, resource: &ResourceId) -> Result<Vec<AccessControlEntry>>;
}

/// Answers group membership questions.
pub trait GroupMembership: Send + Sync {
    /// Returns `true` if `actor` is a member of `group`.
    fn is_member(&self, actor: &ActorId, group: &GroupId) -> Result<bool>;
}
