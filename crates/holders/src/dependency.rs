//! Optional-dependency providers.
//!
//! Some categories only exist when an external plugin is installed, and that
//! plugin may appear after startup. Registration is split into a pure plan
//! (`plan_registration`) over a point-in-time [`DependencySnapshot`] and an
//! apply step (`ensure_registered`) that goes through the registry's atomic
//! add-if-absent. Callers may probe as often as they like.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use coffer_core::ProviderKey;

use crate::provider::HolderProvider;
use crate::registry::ProviderRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyStatus {
    Available,
    Missing,
}

/// Host capability check ("is plugin X loaded?").
pub trait DependencyProbe: Send + Sync {
    fn status(&self, dependency: &str) -> DependencyStatus;
}

impl<F> DependencyProbe for F
where
    F: Fn(&str) -> DependencyStatus + Send + Sync,
{
    fn status(&self, dependency: &str) -> DependencyStatus {
        self(dependency)
    }
}

/// Availability of a set of dependencies at one instant.
///
/// Names compare case-insensitively; unknown names count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySnapshot {
    statuses: BTreeMap<String, DependencyStatus>,
}

impl DependencySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dependency: &str, status: DependencyStatus) -> Self {
        self.statuses.insert(dependency.to_lowercase(), status);
        self
    }

    /// Probe every dependency named by `candidates`.
    pub fn capture(probe: &dyn DependencyProbe, candidates: &[OptionalProvider]) -> Self {
        candidates.iter().fold(Self::new(), |snapshot, candidate| {
            let status = probe.status(&candidate.dependency);
            snapshot.with(&candidate.dependency, status)
        })
    }

    pub fn status(&self, dependency: &str) -> DependencyStatus {
        self.statuses
            .get(&dependency.to_lowercase())
            .copied()
            .unwrap_or(DependencyStatus::Missing)
    }

    pub fn is_available(&self, dependency: &str) -> bool {
        self.status(dependency) == DependencyStatus::Available
    }
}

type ProviderFactory = Arc<dyn Fn() -> Arc<dyn HolderProvider> + Send + Sync>;

/// A provider that may only be registered once `dependency` is available.
#[derive(Clone)]
pub struct OptionalProvider {
    dependency: String,
    key: ProviderKey,
    build: ProviderFactory,
}

impl OptionalProvider {
    pub fn new<F>(dependency: impl Into<String>, key: ProviderKey, build: F) -> Self
    where
        F: Fn() -> Arc<dyn HolderProvider> + Send + Sync + 'static,
    {
        Self {
            dependency: dependency.into(),
            key,
            build: Arc::new(build),
        }
    }

    pub fn dependency(&self) -> &str {
        &self.dependency
    }

    pub fn key(&self) -> &ProviderKey {
        &self.key
    }
}

impl core::fmt::Debug for OptionalProvider {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OptionalProvider")
            .field("dependency", &self.dependency)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Keys to add, in candidate order: available, not yet registered, first
/// candidate per key.
pub fn plan_registration(
    registered: &[ProviderKey],
    snapshot: &DependencySnapshot,
    candidates: &[OptionalProvider],
) -> Vec<ProviderKey> {
    let mut planned: Vec<ProviderKey> = Vec::new();
    for candidate in candidates {
        if !snapshot.is_available(&candidate.dependency) {
            continue;
        }
        if registered.contains(&candidate.key) || planned.contains(&candidate.key) {
            continue;
        }
        planned.push(candidate.key.clone());
    }
    planned
}

/// Register every candidate whose dependency is currently available.
///
/// Returns the keys this call actually added; concurrent callers racing on
/// the same key see it added exactly once between them.
pub fn ensure_registered(
    registry: &ProviderRegistry,
    probe: &dyn DependencyProbe,
    candidates: &[OptionalProvider],
) -> Vec<ProviderKey> {
    let snapshot = DependencySnapshot::capture(probe, candidates);
    let planned = plan_registration(&registry.types(), &snapshot, candidates);

    let mut added = Vec::new();
    for key in planned {
        let Some(candidate) = candidates.iter().find(|c| c.key == key) else {
            continue;
        };
        if registry.register_with(key.clone(), || (candidate.build)()) {
            added.push(key);
        }
    }

    if !added.is_empty() {
        tracing::info!(added = ?added, "registered optional holder providers");
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{InMemoryPlayerDirectory, PlayerProvider};
    use crate::settlements::{Settlements, settlement_providers};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn registry() -> ProviderRegistry {
        ProviderRegistry::with_default(Arc::new(PlayerProvider::new(Arc::new(
            InMemoryPlayerDirectory::new(),
        ))))
    }

    #[test]
    fn plan_skips_missing_and_registered() {
        let candidates = settlement_providers("Towny", &Settlements::new());

        let missing = DependencySnapshot::new();
        assert!(plan_registration(&[ProviderKey::PLAYER], &missing, &candidates).is_empty());

        let available = DependencySnapshot::new().with("towny", DependencyStatus::Available);
        assert_eq!(
            plan_registration(&[ProviderKey::PLAYER], &available, &candidates),
            vec![ProviderKey::TOWN, ProviderKey::NATION]
        );
        assert_eq!(
            plan_registration(
                &[ProviderKey::PLAYER, ProviderKey::TOWN],
                &available,
                &candidates
            ),
            vec![ProviderKey::NATION]
        );
    }

    #[test]
    fn plan_takes_first_candidate_per_key() {
        let settlements = Settlements::new();
        let mut candidates = settlement_providers("towny", &settlements);
        candidates.extend(settlement_providers("other", &settlements));
        let snapshot = DependencySnapshot::new()
            .with("towny", DependencyStatus::Available)
            .with("other", DependencyStatus::Available);

        assert_eq!(
            plan_registration(&[], &snapshot, &candidates),
            vec![ProviderKey::TOWN, ProviderKey::NATION]
        );
    }

    #[test]
    fn late_dependency_is_registered_after_default() {
        let registry = registry();
        let candidates = settlement_providers("Towny", &Settlements::new());
        let loaded = AtomicBool::new(false);
        let probe = |name: &str| {
            if name.eq_ignore_ascii_case("towny") && loaded.load(Ordering::SeqCst) {
                DependencyStatus::Available
            } else {
                DependencyStatus::Missing
            }
        };

        assert!(ensure_registered(&registry, &probe, &candidates).is_empty());
        assert_eq!(registry.types(), vec![ProviderKey::PLAYER]);

        loaded.store(true, Ordering::SeqCst);
        assert_eq!(
            ensure_registered(&registry, &probe, &candidates),
            vec![ProviderKey::TOWN, ProviderKey::NATION]
        );
        assert!(ensure_registered(&registry, &probe, &candidates).is_empty());
        assert_eq!(
            registry.types(),
            vec![ProviderKey::PLAYER, ProviderKey::TOWN, ProviderKey::NATION]
        );
    }

    #[test]
    fn concurrent_probes_register_each_key_once() {
        let registry = registry();
        let candidates = settlement_providers("towny", &Settlements::new());
        let probe = |_: &str| DependencyStatus::Available;

        let total: usize = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| ensure_registered(&registry, &probe, &candidates).len()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(total, 2);
        assert_eq!(registry.types().len(), 3);
    }

    #[test]
    fn snapshot_is_case_insensitive_and_defaults_to_missing() {
        let snapshot = DependencySnapshot::new().with("Towny", DependencyStatus::Available);
        assert!(snapshot.is_available("TOWNY"));
        assert_eq!(snapshot.status("vault"), DependencyStatus::Missing);
    }
}
