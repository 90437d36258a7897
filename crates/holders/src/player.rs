//! Default category: the platform's own player directory.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use coffer_core::{Holder, HolderId, PermissionPolicy, PlayerRef, ProviderKey, parse_uuid};

use crate::provider::HolderProvider;

/// What the host knows about one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub uuid: Uuid,
    pub name: Option<String>,
    pub has_played_before: bool,
    #[serde(default)]
    pub permissions: PermissionPolicy,
}

impl PlayerRecord {
    pub fn new(uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: Some(name.into()),
            has_played_before: true,
            permissions: PermissionPolicy::default(),
        }
    }

    pub fn with_permissions(mut self, permissions: PermissionPolicy) -> Self {
        self.permissions = permissions;
        self
    }

    /// A player counts as an account holder once they have played or have a name.
    pub fn is_known(&self) -> bool {
        self.has_played_before || self.name.is_some()
    }

    fn to_holder(&self) -> Holder {
        let id = HolderId::from_uuid(self.uuid);
        let name = self.name.clone().unwrap_or_else(|| id.to_string());
        Holder::new(ProviderKey::PLAYER, id, name).with_permissions(self.permissions.clone())
    }
}

/// Host-side player lookup (always available).
pub trait PlayerDirectory: Send + Sync {
    fn by_uuid(&self, uuid: Uuid) -> Option<PlayerRecord>;

    /// Case-insensitive lookup by last known name.
    fn by_name(&self, name: &str) -> Option<PlayerRecord>;

    fn players(&self) -> Vec<PlayerRecord>;
}

/// Provider for the default "player" category.
///
/// Opaque ids are tried as UUIDs first and fall back to names, so a player
/// literally named like a UUID string still resolves.
pub struct PlayerProvider {
    directory: Arc<dyn PlayerDirectory>,
}

impl PlayerProvider {
    pub fn new(directory: Arc<dyn PlayerDirectory>) -> Self {
        Self { directory }
    }

    fn known(record: Option<PlayerRecord>) -> Option<Holder> {
        record.filter(PlayerRecord::is_known).map(|r| r.to_holder())
    }
}

impl HolderProvider for PlayerProvider {
    fn key(&self) -> ProviderKey {
        ProviderKey::PLAYER
    }

    fn resolve(&self, id: &str) -> Option<Holder> {
        if let Some(uuid) = parse_uuid(id) {
            if let Some(holder) = self.resolve_uuid(uuid) {
                return Some(holder);
            }
        }
        Self::known(self.directory.by_name(id))
    }

    fn resolve_uuid(&self, uuid: Uuid) -> Option<Holder> {
        Self::known(self.directory.by_uuid(uuid))
    }

    fn resolve_player(&self, player: &PlayerRef) -> Option<Holder> {
        self.resolve_uuid(player.uuid)
    }

    fn account_names(&self) -> BTreeSet<String> {
        self.directory
            .players()
            .into_iter()
            .filter_map(|p| p.name)
            .collect()
    }
}

/// In-memory player directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryPlayerDirectory {
    players: RwLock<HashMap<Uuid, PlayerRecord>>,
}

impl InMemoryPlayerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: PlayerRecord) {
        if let Ok(mut players) = self.players.write() {
            players.insert(record.uuid, record);
        }
    }

    /// Record a player joining under `name`; returns their reference.
    pub fn join(&self, uuid: Uuid, name: impl Into<String>) -> PlayerRef {
        let name = name.into();
        self.insert(PlayerRecord::new(uuid, name.clone()));
        PlayerRef::named(uuid, name)
    }
}

impl PlayerDirectory for InMemoryPlayerDirectory {
    fn by_uuid(&self, uuid: Uuid) -> Option<PlayerRecord> {
        let players = self.players.read().ok()?;
        players.get(&uuid).cloned()
    }

    fn by_name(&self, name: &str) -> Option<PlayerRecord> {
        let players = self.players.read().ok()?;
        players
            .values()
            .find(|p| p.name.as_deref().is_some_and(|n| n.eq_ignore_ascii_case(name)))
            .cloned()
    }

    fn players(&self) -> Vec<PlayerRecord> {
        match self.players.read() {
            Ok(players) => players.values().cloned().collect(),
            Err(_) => vec![],
        }
    }
}
