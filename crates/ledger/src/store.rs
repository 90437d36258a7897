//! Ledger Store abstraction.
//!
//! Two access paths share the same persisted balance:
//!
//! - **Record path**: `get_or_create_account` / `minor_units` / `set_minor_units`.
//!   Raw integer minor units, no validation. The caller owns any
//!   read-modify-write serialization.
//! - **Standard path**: `standard_account_for` hands out a per-holder account
//!   view whose `add` / `remove` apply domain validation (funds, capacity).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use coffer_core::{DomainError, Holder, HolderRef};

use crate::outcome::TransactionOutcome;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("balance overflow")]
    Overflow,

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl From<LedgerError> for DomainError {
    fn from(value: LedgerError) -> Self {
        match value {
            LedgerError::AccountNotFound(_) => DomainError::NotFound,
            LedgerError::InvalidAmount(msg) => DomainError::InvalidInput(msg),
            LedgerError::Overflow => DomainError::backing_store("balance overflow"),
            LedgerError::Storage(msg) => DomainError::BackingStore(msg),
        }
    }
}

/// Handle to a persisted balance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub account_id: u64,
    pub owner: HolderRef,
    pub created_at: DateTime<Utc>,
}

/// Per-holder account view with domain validation.
pub trait StandardAccount: Send + Sync {
    fn owner(&self) -> &HolderRef;

    /// Whether the backing record exists. Views may be handed out for
    /// holders that were never opened.
    fn exists(&self) -> LedgerResult<bool>;

    fn balance(&self) -> LedgerResult<Decimal>;

    fn has(&self, amount: Decimal) -> LedgerResult<bool> {
        Ok(self.balance()? >= amount)
    }

    fn add(&self, amount: Decimal) -> LedgerResult<TransactionOutcome>;

    fn remove(&self, amount: Decimal) -> LedgerResult<TransactionOutcome>;
}

/// Balance persistence consumed by the transaction bridge.
pub trait LedgerStore: Send + Sync {
    /// Idempotent get-or-create of the holder's balance record.
    fn get_or_create_account(&self, holder: &Holder) -> LedgerResult<AccountRecord>;

    fn minor_units(&self, record: &AccountRecord) -> LedgerResult<i64>;

    fn set_minor_units(&self, record: &AccountRecord, minor_units: i64) -> LedgerResult<()>;

    /// Standard account view for `holder`, or `None` when the store has no
    /// standard representation for it.
    fn standard_account_for(&self, holder: &Holder)
    -> LedgerResult<Option<Box<dyn StandardAccount>>>;
}

impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    fn get_or_create_account(&self, holder: &Holder) -> LedgerResult<AccountRecord> {
        (**self).get_or_create_account(holder)
    }

    fn minor_units(&self, record: &AccountRecord) -> LedgerResult<i64> {
        (**self).minor_units(record)
    }

    fn set_minor_units(&self, record: &AccountRecord, minor_units: i64) -> LedgerResult<()> {
        (**self).set_minor_units(record, minor_units)
    }

    fn standard_account_for(
        &self,
        holder: &Holder,
    ) -> LedgerResult<Option<Box<dyn StandardAccount>>> {
        (**self).standard_account_for(holder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_errors_fold_into_domain_taxonomy() {
        assert_eq!(
            DomainError::from(LedgerError::AccountNotFound("x".into())),
            DomainError::NotFound
        );
        assert!(matches!(
            DomainError::from(LedgerError::InvalidAmount("neg".into())),
            DomainError::InvalidInput(_)
        ));
        assert!(!DomainError::from(LedgerError::Storage("io".into())).is_expected());
        assert!(!DomainError::from(LedgerError::Overflow).is_expected());
    }
}
