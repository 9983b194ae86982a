//! In-memory directory of resources, ACL entries and group memberships.
//!
//! [`MemoryDirectory`] implements every collaborator trait, so it can back an
//! [`AccessEvaluator`](crate::AccessEvaluator) on its own. It also carries the
//! ACL management operations (add, update, delete) and can be loaded from or
//! exported to a TOML [`Snapshot`].
//!
//! ```toml
//! [[resources]]
//! id = "1"
//! owner = "bob"
//!
//! [[acl]]
//! resource = "1"
//! subject = { type = "user", id = "alice" }
//! permissions = { read = true }
//!
//! [groups]
//! team1 = ["alice", "carol"]
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::permission::PermissionSet;
use crate::traits::{AclListing, GroupMembership, ResourceLookup};
use crate::types::{AccessControlEntry, ActorId, GroupId, Resource, ResourceId};

// ============================================================================
// AclId
// ============================================================================

/// Handle of a stored ACL entry, assigned by [`MemoryDirectory::add_acl`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AclId(u64);

impl AclId {
    /// Wrap a raw id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Serializable contents of a [`MemoryDirectory`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Known resources and their owners.
    pub resources: Vec<Resource>,
    /// ACL entries in evaluation order.
    pub acl: Vec<AccessControlEntry>,
    /// Group id to member list.
    pub groups: BTreeMap<GroupId, Vec<ActorId>>,
}

impl Snapshot {
    /// Parse a snapshot from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::config(format!("Invalid snapshot: {e}")))
    }

    /// Load a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let snapshot = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        log::info!(
            "Loaded snapshot: {} resources, {} ACL entries, {} groups from {}",
            snapshot.resources.len(),
            snapshot.acl.len(),
            snapshot.groups.len(),
            path.display()
        );
        Ok(snapshot)
    }

    /// Render the snapshot as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// MemoryDirectory
// ============================================================================

#[derive(Default)]
struct DirectoryState {
    resources: BTreeMap<ResourceId, ActorId>,
    acl: Vec<(AclId, AccessControlEntry)>,
    groups: BTreeMap<GroupId, BTreeSet<ActorId>>,
    next_acl_id: u64,
}

/// Thread-safe in-memory backend for all evaluator collaborators.
///
/// ACL entries keep insertion order. Nothing enforces one entry per subject;
/// duplicates are stored and the evaluator's first-match rule applies.
#[derive(Default)]
pub struct MemoryDirectory {
    state: RwLock<DirectoryState>,
}

impl MemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from a snapshot. Entries receive ids in snapshot
    /// order, starting at 1.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut state = DirectoryState::default();
        for resource in snapshot.resources {
            state.resources.insert(resource.id, resource.owner);
        }
        for entry in snapshot.acl {
            state.next_acl_id += 1;
            state.acl.push((AclId(state.next_acl_id), entry));
        }
        for (group, members) in snapshot.groups {
            state
                .groups
                .entry(group)
                .or_default()
                .extend(members);
        }
        Self {
            state: RwLock::new(state),
        }
    }

    /// Export the current contents.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let state = self.read()?;
        Ok(Snapshot {
            resources: state
                .resources
                .iter()
                .map(|(id, owner)| Resource::new(id.clone(), owner.clone()))
                .collect(),
            acl: state.acl.iter().map(|(_, entry)| entry.clone()).collect(),
            groups: state
                .groups
                .iter()
                .map(|(group, members)| (group.clone(), members.iter().cloned().collect()))
                .collect(),
        })
    }

    // ------------------------------------------------------------------------
    // Resources
    // ------------------------------------------------------------------------

    /// Insert or replace a resource and its owner.
    pub fn insert_resource(
        &self,
        id: impl Into<ResourceId>,
        owner: impl Into<ActorId>,
    ) -> Result<()> {
        let (id, owner) = (id.into(), owner.into());
        log::debug!("Registering resource '{id}' owned by '{owner}'");
        self.write()?.resources.insert(id, owner);
        Ok(())
    }

    /// Remove a resource. Its ACL entries are removed with it.
    ///
    /// Returns the removed record, if there was one.
    pub fn remove_resource(&self, id: &ResourceId) -> Result<Option<Resource>> {
        let mut state = self.write()?;
        let removed = state
            .resources
            .remove(id)
            .map(|owner| Resource::new(id.clone(), owner));
        state.acl.retain(|(_, entry)| &entry.resource != id);
        Ok(removed)
    }

    // ------------------------------------------------------------------------
    // ACL management
    // ------------------------------------------------------------------------

    /// Append an entry and return its id.
    pub fn add_acl(&self, entry: AccessControlEntry) -> Result<AclId> {
        let mut state = self.write()?;
        state.next_acl_id += 1;
        let id = AclId(state.next_acl_id);
        log::debug!(
            "Adding ACL {id} on '{}' for {}",
            entry.resource,
            entry.subject
        );
        state.acl.push((id, entry));
        Ok(id)
    }

    /// Replace the permissions of an entry, keeping its position.
    ///
    /// Returns the updated entry.
    pub fn update_acl(&self, id: AclId, permissions: PermissionSet) -> Result<AccessControlEntry> {
        let mut state = self.write()?;
        let (_, entry) = state
            .acl
            .iter_mut()
            .find(|(acl_id, _)| *acl_id == id)
            .ok_or(Error::AclNotFound(id))?;
        entry.permissions = permissions;
        Ok(entry.clone())
    }

    /// Delete an entry and return it.
    pub fn delete_acl(&self, id: AclId) -> Result<AccessControlEntry> {
        let mut state = self.write()?;
        let position = state
            .acl
            .iter()
            .position(|(acl_id, _)| *acl_id == id)
            .ok_or(Error::AclNotFound(id))?;
        let (_, entry) = state.acl.remove(position);
        log::debug!("Deleted ACL {id} on '{}'", entry.resource);
        Ok(entry)
    }

    /// Entries of a resource together with their ids, in order.
    pub fn acl_with_ids(&self, resource: &ResourceId) -> Result<Vec<(AclId, AccessControlEntry)>> {
        Ok(self
            .read()?
            .acl
            .iter()
            .filter(|(_, entry)| &entry.resource == resource)
            .cloned()
            .collect())
    }

    // ------------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------------

    /// Add `actor` to `group`, creating the group if needed.
    pub fn add_member(&self, actor: impl Into<ActorId>, group: impl Into<GroupId>) -> Result<()> {
        self.write()?
            .groups
            .entry(group.into())
            .or_default()
            .insert(actor.into());
        Ok(())
    }

    /// Remove `actor` from `group`. Returns `true` if they were a member.
    pub fn remove_member(&self, actor: &ActorId, group: &GroupId) -> Result<bool> {
        Ok(self
            .write()?
            .groups
            .get_mut(group)
            .is_some_and(|members| members.remove(actor)))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, DirectoryState>> {
        self.state
            .read()
            .map_err(|_| Error::backend("memory directory lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, DirectoryState>> {
        self.state
            .write()
            .map_err(|_| Error::backend("memory directory lock poisoned"))
    }
}

impl fmt::Debug for MemoryDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("MemoryDirectory");
        if let Ok(state) = self.state.read() {
            debug
                .field("resources", &state.resources.len())
                .field("acl", &state.acl.len())
                .field("groups", &state.groups.len());
        }
        debug.finish()
    }
}

impl ResourceLookup for MemoryDirectory {
    fn find(&self, id: &ResourceId) -> Result<Option<Resource>> {
        Ok(self
            .read()?
            .resources
            .get(id)
            .map(|owner| Resource::new(id.clone(), owner.clone())))
    }
}

impl AclListing for MemoryDirectory {
    fn find_all(&self, resource: &ResourceId) -> Result<Vec<AccessControlEntry>> {
        Ok(self
            .read()?
            .acl
            .iter()
            .filter(|(_, entry)| &entry.resource == resource)
            .map(|(_, entry)| entry.clone())
            .collect())
    }
}

impl GroupMembership for MemoryDirectory {
    fn is_member(&self, actor: &ActorId, group: &GroupId) -> Result<bool> {
        Ok(self
            .read()?
            .groups
            .get(group)
            .is_some_and(|members| members.contains(actor)))
    }
}
