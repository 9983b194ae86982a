//! Identifiers, resources and access control entries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::permission::{PermissionKind, PermissionSet};

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from anything string-like.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id! {
    /// Identity of an actor (a user account).
    ActorId
}

string_id! {
    /// Identity of a group of actors.
    GroupId
}

string_id! {
    /// Opaque identifier of a shared resource (a board).
    ResourceId
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

// ============================================================================
// Resource
// ============================================================================

/// A shared resource as seen by the permission layer: its id and its single
/// owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource identifier.
    pub id: ResourceId,
    /// The owning actor. Owners implicitly hold every permission.
    pub owner: ActorId,
}

impl Resource {
    /// Create a resource record.
    pub fn new(id: impl Into<ResourceId>, owner: impl Into<ActorId>) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
        }
    }

    /// Returns `true` if `actor` owns this resource.
    pub fn is_owned_by(&self, actor: &ActorId) -> bool {
        &self.owner == actor
    }
}

// ============================================================================
// Access control entries
// ============================================================================

/// Who an access control entry applies to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum Subject {
    /// A single actor.
    User(ActorId),
    /// Every member of a group.
    Group(GroupId),
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(actor) => write!(f, "user:{actor}"),
            Self::Group(group) => write!(f, "group:{group}"),
        }
    }
}

/// A single rule granting a permission set to one user or group on one
/// resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlEntry {
    /// The resource this entry belongs to.
    pub resource: ResourceId,
    /// The user or group the entry applies to.
    pub subject: Subject,
    /// Granted flags.
    #[serde(default)]
    pub permissions: PermissionSet,
}

impl AccessControlEntry {
    /// Entry for a single user.
    pub fn user(
        resource: impl Into<ResourceId>,
        actor: impl Into<ActorId>,
        permissions: PermissionSet,
    ) -> Self {
        Self {
            resource: resource.into(),
            subject: Subject::User(actor.into()),
            permissions,
        }
    }

    /// Entry for a group.
    pub fn group(
        resource: impl Into<ResourceId>,
        group: impl Into<GroupId>,
        permissions: PermissionSet,
    ) -> Self {
        Self {
            resource: resource.into(),
            subject: Subject::Group(group.into()),
            permissions,
        }
    }

    /// Returns `true` if this is a user entry naming `actor`.
    pub fn names_user(&self, actor: &ActorId) -> bool {
        matches!(&self.subject, Subject::User(id) if id == actor)
    }

    /// The group this entry applies to, if it is a group entry.
    pub fn group_id(&self) -> Option<&GroupId> {
        match &self.subject {
            Subject::Group(group) => Some(group),
            Subject::User(_) => None,
        }
    }

    /// The entry's flag for `kind`.
    pub fn grants(&self, kind: PermissionKind) -> bool {
        self.permissions.grants(kind)
    }
}
