//! Collective holder categories (towns, nations, ...) backed by an optional
//! external source.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use coffer_core::{Holder, HolderId, PermissionPolicy, PlayerRef, ProviderKey, parse_uuid};

use crate::provider::HolderProvider;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub uuid: Uuid,
    pub name: String,
}

/// Lookup surface of one group category in the external source.
pub trait GroupDirectory: Send + Sync {
    fn by_name(&self, name: &str) -> Option<GroupRecord>;

    /// `None` also when the source does not key groups by UUID.
    fn by_uuid(&self, uuid: Uuid) -> Option<GroupRecord>;

    /// The group a player belongs to in this category.
    fn group_of(&self, player: Uuid) -> Option<GroupRecord>;

    fn groups(&self) -> Vec<GroupRecord>;
}

/// Provider for one group category.
///
/// Holders are keyed by the group's UUID and answer every permission check
/// with "allowed": a group has no single permission-bearing owner.
pub struct GroupProvider {
    key: ProviderKey,
    directory: Arc<dyn GroupDirectory>,
}

impl GroupProvider {
    pub fn new(key: ProviderKey, directory: Arc<dyn GroupDirectory>) -> Self {
        Self { key, directory }
    }

    fn to_holder(&self, group: GroupRecord) -> Holder {
        Holder::new(self.key.clone(), HolderId::from_uuid(group.uuid), group.name)
            .with_permissions(PermissionPolicy::AllowAll)
    }
}

impl HolderProvider for GroupProvider {
    fn key(&self) -> ProviderKey {
        self.key.clone()
    }

    fn resolve(&self, id: &str) -> Option<Holder> {
        if let Some(uuid) = parse_uuid(id) {
            if let Some(holder) = self.resolve_uuid(uuid) {
                return Some(holder);
            }
        }
        self.directory.by_name(id).map(|g| self.to_holder(g))
    }

    fn resolve_uuid(&self, uuid: Uuid) -> Option<Holder> {
        self.directory.by_uuid(uuid).map(|g| self.to_holder(g))
    }

    fn resolve_player(&self, player: &PlayerRef) -> Option<Holder> {
        self.directory.group_of(player.uuid).map(|g| self.to_holder(g))
    }

    fn account_names(&self) -> BTreeSet<String> {
        self.directory.groups().into_iter().map(|g| g.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Source that only knows groups by name.
    struct NameOnly {
        groups: HashMap<String, GroupRecord>,
    }

    impl GroupDirectory for NameOnly {
        fn by_name(&self, name: &str) -> Option<GroupRecord> {
            self.groups.get(name).cloned()
        }

        fn by_uuid(&self, _uuid: Uuid) -> Option<GroupRecord> {
            None
        }

        fn group_of(&self, _player: Uuid) -> Option<GroupRecord> {
            None
        }

        fn groups(&self) -> Vec<GroupRecord> {
            self.groups.values().cloned().collect()
        }
    }

    fn guild(name: &str) -> GroupRecord {
        GroupRecord {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    #[test]
    fn name_keyed_source_still_resolves_by_name() {
        let record = guild("Miners");
        let provider = GroupProvider::new(
            ProviderKey::new("guild").unwrap(),
            Arc::new(NameOnly {
                groups: HashMap::from([(record.name.clone(), record.clone())]),
            }),
        );

        let holder = provider.resolve("Miners").unwrap();
        assert_eq!(holder.kind().as_str(), "guild");
        assert_eq!(holder.holder_id(), &HolderId::from_uuid(record.uuid));
        assert!(holder.has_permission("anything"));

        assert!(provider.resolve(&record.uuid.to_string()).is_none());
        assert!(provider.resolve_player(&PlayerRef::new(Uuid::new_v4())).is_none());
        assert_eq!(provider.account_names().len(), 1);
    }
}
