//! Resolved account holders.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::Entity;
use crate::id::{HolderId, ProviderKey};
use crate::permission::PermissionPolicy;
use crate::value_object::ValueObject;

/// Identity of a holder: its category plus its stable id within that category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HolderRef {
    pub kind: ProviderKey,
    pub id: HolderId,
}

impl HolderRef {
    pub fn new(kind: ProviderKey, id: HolderId) -> Self {
        Self { kind, id }
    }
}

impl core::fmt::Display for HolderRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl ValueObject for HolderRef {}

/// Platform user reference (what the host hands us for "this player").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRef {
    pub uuid: Uuid,
    pub name: Option<String>,
}

impl PlayerRef {
    pub fn new(uuid: Uuid) -> Self {
        Self { uuid, name: None }
    }

    pub fn named(uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: Some(name.into()),
        }
    }

    pub fn holder_id(&self) -> HolderId {
        HolderId::from_uuid(self.uuid)
    }
}

impl ValueObject for PlayerRef {}

/// A resolved account owner.
///
/// Immutable snapshot produced by a provider on every resolution call. The
/// category is set once by the producing provider, so routing never has to
/// guess it back from the holder's shape. Equality and hashing use
/// `(kind, id)` only; display names can collide or change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holder {
    reference: HolderRef,
    name: String,
    permissions: PermissionPolicy,
}

impl Holder {
    pub fn new(kind: ProviderKey, id: HolderId, name: impl Into<String>) -> Self {
        Self {
            reference: HolderRef::new(kind, id),
            name: name.into(),
            permissions: PermissionPolicy::default(),
        }
    }

    pub fn with_permissions(mut self, permissions: PermissionPolicy) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn kind(&self) -> &ProviderKey {
        &self.reference.kind
    }

    pub fn holder_id(&self) -> &HolderId {
        &self.reference.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference(&self) -> &HolderRef {
        &self.reference
    }

    pub fn permissions(&self) -> &PermissionPolicy {
        &self.permissions
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.allows(permission)
    }

    /// Whether this holder belongs to the default (player) category.
    pub fn is_player(&self) -> bool {
        self.reference.kind.is_player()
    }
}

impl PartialEq for Holder {
    fn eq(&self, other: &Self) -> bool {
        self.reference == other.reference
    }
}

impl Eq for Holder {}

impl core::hash::Hash for Holder {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.reference.hash(state);
    }
}

impl Entity for Holder {
    type Id = HolderRef;

    fn id(&self) -> &Self::Id {
        &self.reference
    }
}

impl core::fmt::Display for Holder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.name, self.reference)
    }
}
