//! Ordered provider registry and the resolution algorithm.
//!
//! ## Ordering
//!
//! Providers are kept in registration order, which is the resolution priority:
//! the default player provider first, then optional providers in the order
//! they became available. An identifier that matches several categories
//! therefore always resolves to the earliest-registered one. The first match
//! wins; there is no scoring.
//!
//! ## Registration
//!
//! `register` is add-if-absent under a single write lock, so concurrent
//! "ensure registered" probes can never produce two providers for one key.
//! Providers are never removed.

use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

use coffer_core::{Holder, PlayerRef, ProviderKey};

use crate::provider::HolderProvider;

struct Entry {
    key: ProviderKey,
    provider: Arc<dyn HolderProvider>,
}

#[derive(Default)]
pub struct ProviderRegistry {
    entries: RwLock<Vec<Entry>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the always-available default provider registered first.
    pub fn with_default(provider: Arc<dyn HolderProvider>) -> Self {
        let registry = Self::new();
        registry.register(provider.key(), provider);
        registry
    }

    /// Add `provider` under `key` unless the key is taken.
    ///
    /// Returns whether it was newly added. A provider whose own key differs
    /// from `key` is refused.
    pub fn register(&self, key: ProviderKey, provider: Arc<dyn HolderProvider>) -> bool {
        self.register_with(key, move || provider)
    }

    /// Like [`register`](Self::register), but only builds the provider when
    /// the key is actually free.
    pub fn register_with<F>(&self, key: ProviderKey, build: F) -> bool
    where
        F: FnOnce() -> Arc<dyn HolderProvider>,
    {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.iter().any(|e| e.key == key) {
            tracing::debug!(provider = %key, "holder provider already registered");
            return false;
        }

        let provider = build();
        if provider.key() != key {
            tracing::warn!(
                provider = %key,
                produces = %provider.key(),
                "rejected holder provider whose key does not match its registration"
            );
            return false;
        }
        entries.push(Entry { key: key.clone(), provider });
        tracing::info!(provider = %key, position = entries.len(), "registered holder provider");
        true
    }

    /// Resolve an opaque id against every provider in priority order.
    pub fn resolve(&self, id: &str) -> Option<Holder> {
        let found = self
            .snapshot()
            .into_iter()
            .find_map(|(_, provider)| provider.resolve(id));
        if found.is_none() {
            tracing::debug!(id, "no holder provider resolved id");
        }
        found
    }

    /// Resolve `id` with the provider registered under `kind` only.
    pub fn resolve_typed(&self, kind: &str, id: &str) -> Option<Holder> {
        self.provider(kind)?.resolve(id)
    }

    /// Resolve the holder associated with a platform player, in priority order.
    pub fn resolve_player(&self, player: &PlayerRef) -> Option<Holder> {
        self.snapshot()
            .into_iter()
            .find_map(|(_, provider)| provider.resolve_player(player))
    }

    pub fn provider(&self, kind: &str) -> Option<Arc<dyn HolderProvider>> {
        let key = ProviderKey::new(kind).ok()?;
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| Arc::clone(&e.provider))
    }

    pub fn has_provider(&self, kind: &str) -> bool {
        self.provider(kind).is_some()
    }

    /// Registered keys in priority order.
    pub fn types(&self) -> Vec<ProviderKey> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.iter().map(|e| e.key.clone()).collect()
    }

    /// Known display names for `kind`; empty for an unknown kind.
    pub fn account_names(&self, kind: &str) -> BTreeSet<String> {
        self.provider(kind)
            .map(|p| p.account_names())
            .unwrap_or_default()
    }

    /// Category of an already resolved holder (diagnostics only).
    ///
    /// Holders carry the key of the provider that produced them, so this is
    /// exact rather than inferred.
    pub fn kind_of(&self, holder: &Holder) -> ProviderKey {
        holder.kind().clone()
    }

    /// Clone the provider list so no lock is held while providers run.
    fn snapshot(&self) -> Vec<(ProviderKey, Arc<dyn HolderProvider>)> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .map(|e| (e.key.clone(), Arc::clone(&e.provider)))
            .collect()
    }
}

impl core::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("types", &self.types())
            .finish()
    }
}
