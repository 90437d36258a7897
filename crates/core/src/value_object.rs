//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. In this
/// crate that covers permissions, permission policies, platform player
/// references and holder references.
///
/// ```ignore
/// let a = HolderRef::new(ProviderKey::TOWN, HolderId::new("Oakvale"));
/// let b = HolderRef::new(ProviderKey::TOWN, HolderId::new("Oakvale"));
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
