//! In-memory towns and nations: the optional group source used by tests and
//! embedders without a real settlement plugin.
//!
//! Players reside in at most one town; a town belongs to at most one nation,
//! and a player's nation is their town's nation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use coffer_core::ProviderKey;

use crate::dependency::OptionalProvider;
use crate::group::{GroupDirectory, GroupProvider, GroupRecord};

#[derive(Debug, Clone)]
struct Town {
    name: String,
    nation: Option<Uuid>,
}

#[derive(Debug, Default)]
struct State {
    towns: HashMap<Uuid, Town>,
    nations: HashMap<Uuid, String>,
    residents: HashMap<Uuid, Uuid>,
}

impl State {
    fn town_record(&self, uuid: Uuid) -> Option<GroupRecord> {
        self.towns.get(&uuid).map(|t| GroupRecord {
            uuid,
            name: t.name.clone(),
        })
    }

    fn nation_record(&self, uuid: Uuid) -> Option<GroupRecord> {
        self.nations.get(&uuid).map(|name| GroupRecord {
            uuid,
            name: name.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Settlements {
    state: Arc<RwLock<State>>,
}

impl Settlements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn found_town(&self, name: impl Into<String>) -> Uuid {
        let uuid = Uuid::new_v4();
        if let Ok(mut state) = self.state.write() {
            state.towns.insert(
                uuid,
                Town {
                    name: name.into(),
                    nation: None,
                },
            );
        }
        uuid
    }

    pub fn found_nation(&self, name: impl Into<String>) -> Uuid {
        let uuid = Uuid::new_v4();
        if let Ok(mut state) = self.state.write() {
            state.nations.insert(uuid, name.into());
        }
        uuid
    }

    /// Move `player` into `town` (leaving any previous town).
    pub fn settle(&self, player: Uuid, town: Uuid) {
        if let Ok(mut state) = self.state.write() {
            state.residents.insert(player, town);
        }
    }

    pub fn join_nation(&self, town: Uuid, nation: Uuid) {
        if let Ok(mut state) = self.state.write() {
            if let Some(t) = state.towns.get_mut(&town) {
                t.nation = Some(nation);
            }
        }
    }

    pub fn towns(&self) -> TownDirectory {
        TownDirectory {
            state: Arc::clone(&self.state),
        }
    }

    pub fn nations(&self) -> NationDirectory {
        NationDirectory {
            state: Arc::clone(&self.state),
        }
    }
}

/// Town view of a [`Settlements`] source.
#[derive(Debug, Clone)]
pub struct TownDirectory {
    state: Arc<RwLock<State>>,
}

impl GroupDirectory for TownDirectory {
    fn by_name(&self, name: &str) -> Option<GroupRecord> {
        let state = self.state.read().ok()?;
        state
            .towns
            .iter()
            .find(|(_, t)| t.name.eq_ignore_ascii_case(name))
            .and_then(|(uuid, _)| state.town_record(*uuid))
    }

    fn by_uuid(&self, uuid: Uuid) -> Option<GroupRecord> {
        self.state.read().ok()?.town_record(uuid)
    }

    fn group_of(&self, player: Uuid) -> Option<GroupRecord> {
        let state = self.state.read().ok()?;
        let town = *state.residents.get(&player)?;
        state.town_record(town)
    }

    fn groups(&self) -> Vec<GroupRecord> {
        match self.state.read() {
            Ok(state) => state
                .towns
                .keys()
                .filter_map(|uuid| state.town_record(*uuid))
                .collect(),
            Err(_) => vec![],
        }
    }
}

/// Nation view of a [`Settlements`] source.
#[derive(Debug, Clone)]
pub struct NationDirectory {
    state: Arc<RwLock<State>>,
}

impl GroupDirectory for NationDirectory {
    fn by_name(&self, name: &str) -> Option<GroupRecord> {
        let state = self.state.read().ok()?;
        state
            .nations
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .and_then(|(uuid, _)| state.nation_record(*uuid))
    }

    fn by_uuid(&self, uuid: Uuid) -> Option<GroupRecord> {
        self.state.read().ok()?.nation_record(uuid)
    }

    fn group_of(&self, player: Uuid) -> Option<GroupRecord> {
        let state = self.state.read().ok()?;
        let town = state.residents.get(&player)?;
        let nation = state.towns.get(town)?.nation?;
        state.nation_record(nation)
    }

    fn groups(&self) -> Vec<GroupRecord> {
        match self.state.read() {
            Ok(state) => state
                .nations
                .keys()
                .filter_map(|uuid| state.nation_record(*uuid))
                .collect(),
            Err(_) => vec![],
        }
    }
}

/// Town then nation providers, both gated on `dependency` being available.
pub fn settlement_providers(dependency: &str, settlements: &Settlements) -> Vec<OptionalProvider> {
    let towns = settlements.towns();
    let nations = settlements.nations();
    vec![
        OptionalProvider::new(dependency, ProviderKey::TOWN, move || {
            Arc::new(GroupProvider::new(ProviderKey::TOWN, Arc::new(towns.clone())))
        }),
        OptionalProvider::new(dependency, ProviderKey::NATION, move || {
            Arc::new(GroupProvider::new(ProviderKey::NATION, Arc::new(nations.clone())))
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::HolderProvider;
    use coffer_core::{HolderId, PlayerRef};

    #[test]
    fn player_maps_to_town_and_nation() {
        let settlements = Settlements::new();
        let oakvale = settlements.found_town("Oakvale");
        let avalon = settlements.found_nation("Avalon");
        settlements.join_nation(oakvale, avalon);
        let alex = Uuid::new_v4();
        settlements.settle(alex, oakvale);

        let towns = GroupProvider::new(ProviderKey::TOWN, Arc::new(settlements.towns()));
        let nations = GroupProvider::new(ProviderKey::NATION, Arc::new(settlements.nations()));
        let player = PlayerRef::new(alex);

        let town = towns.resolve_player(&player).unwrap();
        assert_eq!(town.holder_id(), &HolderId::from_uuid(oakvale));
        assert_eq!(town.name(), "Oakvale");

        let nation = nations.resolve_player(&player).unwrap();
        assert_eq!(nation.holder_id(), &HolderId::from_uuid(avalon));
        assert_eq!(nation.kind(), &ProviderKey::NATION);
    }

    #[test]
    fn town_without_nation_has_no_nation_holder() {
        let settlements = Settlements::new();
        let hamlet = settlements.found_town("Hamlet");
        let alex = Uuid::new_v4();
        settlements.settle(alex, hamlet);

        let nations = GroupProvider::new(ProviderKey::NATION, Arc::new(settlements.nations()));
        assert!(nations.resolve_player(&PlayerRef::new(alex)).is_none());
    }

    #[test]
    fn towns_resolve_by_uuid_or_name() {
        let settlements = Settlements::new();
        let oakvale = settlements.found_town("Oakvale");
        let towns = GroupProvider::new(ProviderKey::TOWN, Arc::new(settlements.towns()));

        let by_uuid = towns.resolve(&oakvale.to_string()).unwrap();
        let by_name = towns.resolve("OAKVALE").unwrap();
        assert_eq!(by_uuid, by_name);
        assert!(towns.resolve("Elsewhere").is_none());
        assert_eq!(
            towns.account_names().into_iter().collect::<Vec<_>>(),
            vec!["Oakvale".to_string()]
        );
    }

    #[test]
    fn settlement_providers_are_town_then_nation() {
        let keys: Vec<_> = settlement_providers("towny", &Settlements::new())
            .iter()
            .map(|p| p.key().clone())
            .collect();
        assert_eq!(keys, vec![ProviderKey::TOWN, ProviderKey::NATION]);
    }
}
