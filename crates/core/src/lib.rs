//! `coffer-core`: shared account-holder vocabulary.
//!
//! Pure values only: no storage, no provider lookups, no IO.

pub mod entity;
pub mod error;
pub mod holder;
pub mod id;
pub mod permission;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use holder::{Holder, HolderRef, PlayerRef};
pub use id::{HolderId, ProviderKey, parse_uuid};
pub use permission::{Permission, PermissionPolicy};
pub use value_object::ValueObject;
