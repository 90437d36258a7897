//! Entity trait: identity that survives changes to other attributes.

/// Entity marker + minimal interface.
///
/// Holders are entities: two snapshots with the same identity are the same
/// account owner even if the display name changed in between.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
