use std::collections::BTreeSet;
use std::sync::Arc;

use uuid::Uuid;

use coffer_core::{Holder, PlayerRef, ProviderKey};

/// Resolver for one holder category.
///
/// Every holder a provider returns carries the provider's own key as its
/// kind. "Not found" is `None`, never an error.
pub trait HolderProvider: Send + Sync {
    fn key(&self) -> ProviderKey;

    /// Resolve an opaque string (UUID string or display name).
    fn resolve(&self, id: &str) -> Option<Holder>;

    fn resolve_uuid(&self, uuid: Uuid) -> Option<Holder>;

    /// Holder this category associates with a platform player, if any.
    fn resolve_player(&self, _player: &PlayerRef) -> Option<Holder> {
        None
    }

    /// Display names of every holder this provider knows about.
    fn account_names(&self) -> BTreeSet<String>;
}

impl<P> HolderProvider for Arc<P>
where
    P: HolderProvider + ?Sized,
{
    fn key(&self) -> ProviderKey {
        (**self).key()
    }

    fn resolve(&self, id: &str) -> Option<Holder> {
        (**self).resolve(id)
    }

    fn resolve_uuid(&self, uuid: Uuid) -> Option<Holder> {
        (**self).resolve_uuid(uuid)
    }

    fn resolve_player(&self, player: &PlayerRef) -> Option<Holder> {
        (**self).resolve_player(player)
    }

    fn account_names(&self) -> BTreeSet<String> {
        (**self).account_names()
    }
}
