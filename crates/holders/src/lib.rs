//! `coffer-holders`: turns opaque identifiers into typed account holders.
//!
//! Providers resolve one holder category each; the registry owns their
//! priority order and the resolution algorithm.

pub mod dependency;
pub mod group;
pub mod player;
pub mod provider;
pub mod registry;
pub mod settlements;

pub use dependency::{
    DependencyProbe, DependencySnapshot, DependencyStatus, OptionalProvider, ensure_registered,
    plan_registration,
};
pub use group::{GroupDirectory, GroupProvider, GroupRecord};
pub use player::{InMemoryPlayerDirectory, PlayerDirectory, PlayerProvider, PlayerRecord};
pub use provider::HolderProvider;
pub use registry::ProviderRegistry;
pub use settlements::{Settlements, settlement_providers};
