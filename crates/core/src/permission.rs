use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Permission identifier.
///
/// Permissions are opaque strings (e.g. "coffer.balance.other"). The special
/// wildcard `"*"` grants everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const WILDCARD: Permission = Permission(Cow::Borrowed("*"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ValueObject for Permission {}

/// How a holder answers permission checks.
///
/// Captured at resolution time so that a `Holder` stays a plain value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy", content = "permissions")]
pub enum PermissionPolicy {
    /// Collective holders with no single permission-bearing owner.
    AllowAll,
    #[default]
    DenyAll,
    /// Explicit grants; `*` acts as a wildcard.
    Granted(BTreeSet<Permission>),
}

impl PermissionPolicy {
    pub fn granted<I, P>(permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Cow<'static, str>>,
    {
        Self::Granted(permissions.into_iter().map(Permission::new).collect())
    }

    pub fn allows(&self, permission: &str) -> bool {
        match self {
            Self::AllowAll => true,
            Self::DenyAll => false,
            Self::Granted(set) => set
                .iter()
                .any(|p| p.is_wildcard() || p.as_str() == permission),
        }
    }
}

impl ValueObject for PermissionPolicy {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granted_policy_checks_membership() {
        let policy = PermissionPolicy::granted(["coffer.pay"]);
        assert!(policy.allows("coffer.pay"));
        assert!(!policy.allows("coffer.admin"));
    }

    #[test]
    fn wildcard_grants_everything() {
        let policy = PermissionPolicy::granted(["*"]);
        assert!(policy.allows("anything.at.all"));
        assert!(Permission::WILDCARD.is_wildcard());
    }

    #[test]
    fn allow_and_deny_all() {
        assert!(PermissionPolicy::AllowAll.allows("coffer.pay"));
        assert!(!PermissionPolicy::DenyAll.allows("coffer.pay"));
        assert_eq!(PermissionPolicy::default(), PermissionPolicy::DenyAll);
    }
}
