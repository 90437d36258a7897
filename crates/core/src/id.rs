//! Strongly-typed identifiers: provider keys and stable holder ids.

use std::borrow::Cow;

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Category key of a holder provider ("player", "town", "nation", ...).
///
/// Keys are stored lowercase, so equality is case-insensitive with respect to
/// whatever the caller typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderKey(Cow<'static, str>);

impl ProviderKey {
    /// Default category, always registered first.
    pub const PLAYER: ProviderKey = ProviderKey(Cow::Borrowed("player"));
    pub const TOWN: ProviderKey = ProviderKey(Cow::Borrowed("town"));
    pub const NATION: ProviderKey = ProviderKey(Cow::Borrowed("nation"));

    /// Normalize `name` into a key. Empty (or whitespace-only) names are rejected.
    pub fn new(name: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("ProviderKey: empty"));
        }
        Ok(Self(Cow::Owned(trimmed.to_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_player(&self) -> bool {
        *self == Self::PLAYER
    }
}

impl core::fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProviderKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ProviderKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProviderKey> for String {
    fn from(value: ProviderKey) -> Self {
        value.0.into_owned()
    }
}

/// Stable identifier of a holder within its category.
///
/// Players and groups use their UUID rendered as a hyphenated string; the
/// type stays a string because backing sources are free to key otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolderId(String);

impl HolderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.hyphenated().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id as a UUID, when it is one.
    pub fn as_uuid(&self) -> Option<Uuid> {
        parse_uuid(&self.0)
    }
}

impl core::fmt::Display for HolderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Uuid> for HolderId {
    fn from(value: Uuid) -> Self {
        Self::from_uuid(value)
    }
}

/// Parse a hyphenated 8-4-4-4-12 hex UUID.
///
/// Only the hyphenated form counts: a 32-character hex player name must keep
/// resolving as a name.
pub fn parse_uuid(s: &str) -> Option<Uuid> {
    if s.len() != 36 {
        return None;
    }
    Uuid::try_parse(s).ok()
}
