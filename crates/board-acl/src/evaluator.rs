//! Permission evaluation over owners, user entries and group entries.
//!
//! Precedence, strongest first:
//!
//! 1. The resource owner holds every permission.
//! 2. The first user entry naming the actor decides. Later user entries and
//!    all group entries are ignored.
//! 3. Group entries the actor belongs to, combined per
//!    [`GroupResolution`].
//! 4. Otherwise denied.
//!
//! Unknown resources and empty entry lists are denied, never reported as
//! errors. Nothing is cached: every call reads the current owner, entries and
//! memberships from the collaborators.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use board_acl::{AccessControlEntry, AccessEvaluator, ActorId, MemoryDirectory, PermissionKind, PermissionSet};
//!
//! let directory = Arc::new(MemoryDirectory::new());
//! directory.insert_resource("1", "bob")?;
//! directory.add_acl(AccessControlEntry::user("1", "alice", PermissionSet::NONE.with(PermissionKind::Read)))?;
//!
//! let evaluator = AccessEvaluator::from_directory(directory);
//! let alice = ActorId::from("alice");
//! assert!(evaluator.evaluate(&alice, &"1".into(), PermissionKind::Read)?);
//! assert!(!evaluator.evaluate(&alice, &"1".into(), PermissionKind::Manage)?);
//! # Ok::<(), board_acl::Error>(())
//! ```

use std::fmt;
use std::sync::Arc;

use crate::config::{EditResolution, EvaluatorConfig, GroupResolution};
use crate::error::Result;
use crate::permission::{PermissionKind, PermissionMap};
use crate::traits::{AclListing, GroupMembership, ResourceLookup};
use crate::types::{AccessControlEntry, ActorId, ResourceId};

// ============================================================================
// AccessEvaluator
// ============================================================================

/// Decides what an actor may do with a resource.
///
/// Holds only its collaborators and configuration; the acting identity is
/// passed to every call. Cheap to clone.
#[derive(Clone)]
pub struct AccessEvaluator {
    resources: Arc<dyn ResourceLookup>,
    acl: Arc<dyn AclListing>,
    groups: Arc<dyn GroupMembership>,
    config: EvaluatorConfig,
}

impl AccessEvaluator {
    /// Create an evaluator with the default configuration.
    pub fn new(
        resources: Arc<dyn ResourceLookup>,
        acl: Arc<dyn AclListing>,
        groups: Arc<dyn GroupMembership>,
    ) -> Self {
        Self {
            resources,
            acl,
            groups,
            config: EvaluatorConfig::default(),
        }
    }

    /// Create an evaluator backed by a single type that provides all three
    /// collaborators.
    pub fn from_directory<D>(directory: Arc<D>) -> Self
    where
        D: ResourceLookup + AclListing + GroupMembership + 'static,
    {
        Self::new(directory.clone(), directory.clone(), directory)
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: EvaluatorConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Bind an actor for a series of checks.
    pub fn for_actor<'a>(&'a self, actor: &'a ActorId) -> ActorScope<'a> {
        ActorScope {
            evaluator: self,
            actor,
        }
    }

    /// Returns `true` if `actor` owns `resource`. Unknown resources are not
    /// owned by anyone.
    pub fn is_owner(&self, actor: &ActorId, resource: &ResourceId) -> Result<bool> {
        match self.resources.find(resource)? {
            Some(found) => Ok(found.is_owned_by(actor)),
            None => {
                log::debug!("Resource '{resource}' not found; treating '{actor}' as non-owner");
                Ok(false)
            }
        }
    }

    /// Check a single permission.
    pub fn evaluate(
        &self,
        actor: &ActorId,
        resource: &ResourceId,
        kind: PermissionKind,
    ) -> Result<bool> {
        if self.is_owner(actor, resource)? {
            log::debug!("'{actor}' owns '{resource}'; {kind} granted");
            return Ok(true);
        }
        let entries = self.acl.find_all(resource)?;
        log::trace!("'{resource}' has {} ACL entries", entries.len());
        self.user_can(actor, &entries, kind)
    }

    /// Report all four permissions.
    ///
    /// The entry list is fetched once. The edit value follows
    /// [`EditResolution`].
    pub fn evaluate_all(&self, actor: &ActorId, resource: &ResourceId) -> Result<PermissionMap> {
        if self.is_owner(actor, resource)? {
            log::debug!("'{actor}' owns '{resource}'; all permissions granted");
            return Ok(PermissionMap::all());
        }
        let entries = self.acl.find_all(resource)?;
        log::trace!("'{resource}' has {} ACL entries", entries.len());

        let mut map = PermissionMap::none();
        for kind in PermissionKind::ALL {
            let granted = match (kind, self.config.edit_resolution) {
                // Read is evaluated first, so the mirrored value is final.
                (PermissionKind::Edit, EditResolution::MirrorRead) => map.read,
                _ => self.user_can(actor, &entries, kind)?,
            };
            map.set(kind, granted);
        }
        Ok(map)
    }

    /// Match `actor` against an entry list, ignoring ownership.
    ///
    /// The first user entry naming the actor decides. Failing that, group
    /// entries are checked in order; membership is only queried until the
    /// outcome is settled.
    pub fn user_can(
        &self,
        actor: &ActorId,
        entries: &[AccessControlEntry],
        kind: PermissionKind,
    ) -> Result<bool> {
        if let Some(entry) = entries.iter().find(|entry| entry.names_user(actor)) {
            let granted = entry.grants(kind);
            log::debug!("User entry for '{actor}' decides {kind}: {granted}");
            return Ok(granted);
        }

        for entry in entries {
            let Some(group) = entry.group_id() else {
                continue;
            };
            if self.config.group_resolution == GroupResolution::AnyGrant && !entry.grants(kind) {
                continue;
            }
            if self.groups.is_member(actor, group)? {
                let granted = entry.grants(kind);
                log::debug!("Group entry '{group}' decides {kind} for '{actor}': {granted}");
                return Ok(granted);
            }
        }

        log::debug!("No entry matches '{actor}'; {kind} denied");
        Ok(false)
    }
}

impl fmt::Debug for AccessEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessEvaluator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// ActorScope
// ============================================================================

/// An [`AccessEvaluator`] bound to one acting identity.
#[derive(Clone, Copy, Debug)]
pub struct ActorScope<'a> {
    evaluator: &'a AccessEvaluator,
    actor: &'a ActorId,
}

impl ActorScope<'_> {
    /// The bound actor.
    pub fn actor(&self) -> &ActorId {
        self.actor
    }

    /// See [`AccessEvaluator::is_owner`].
    pub fn is_owner(&self, resource: &ResourceId) -> Result<bool> {
        self.evaluator.is_owner(self.actor, resource)
    }

    /// See [`AccessEvaluator::evaluate`].
    pub fn evaluate(&self, resource: &ResourceId, kind: PermissionKind) -> Result<bool> {
        self.evaluator.evaluate(self.actor, resource, kind)
    }

    /// See [`AccessEvaluator::evaluate_all`].
    pub fn evaluate_all(&self, resource: &ResourceId) -> Result<PermissionMap> {
        self.evaluator.evaluate_all(self.actor, resource)
    }
}

// ============================================================================
// Tests
// ============================================================================
