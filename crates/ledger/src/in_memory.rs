use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use coffer_core::{Holder, HolderRef};

use crate::currency::Currency;
use crate::outcome::TransactionOutcome;
use crate::store::{AccountRecord, LedgerError, LedgerResult, LedgerStore, StandardAccount};

#[derive(Debug, Clone)]
struct Record {
    account_id: u64,
    created_at: DateTime<Utc>,
    minor_units: i64,
    /// Storage limit in minor units (`None` = unbounded).
    capacity: Option<i64>,
}

impl Record {
    fn handle(&self, owner: &HolderRef) -> AccountRecord {
        AccountRecord {
            account_id: self.account_id,
            owner: owner.clone(),
            created_at: self.created_at,
        }
    }
}

struct Inner {
    records: RwLock<HashMap<HolderRef, Record>>,
    next_id: AtomicU64,
    currency: Arc<dyn Currency>,
}

impl Inner {
    fn poisoned() -> LedgerError {
        LedgerError::Storage("lock poisoned".to_string())
    }

    fn open(&self, owner: &HolderRef, capacity: Option<i64>) -> LedgerResult<AccountRecord> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        let record = records.entry(owner.clone()).or_insert_with(|| {
            let account_id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
            tracing::debug!(account_id, owner = %owner, "opened ledger record");
            Record {
                account_id,
                created_at: Utc::now(),
                minor_units: 0,
                capacity,
            }
        });
        Ok(record.handle(owner))
    }
}

/// In-memory Ledger Store.
///
/// Intended for tests/dev and for hosts that persist elsewhere. Standard
/// account mutations are atomic per call under the store lock; record-path
/// read-modify-write sequences are not (callers serialize those).
#[derive(Clone)]
pub struct InMemoryLedgerStore {
    inner: Arc<Inner>,
}

impl InMemoryLedgerStore {
    pub fn new(currency: Arc<dyn Currency>) -> Self {
        Self {
            inner: Arc::new(Inner {
                records: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(0),
                currency,
            }),
        }
    }

    /// Open an unbounded standard account (idempotent).
    pub fn open_account(&self, holder: &Holder) -> LedgerResult<AccountRecord> {
        self.inner.open(holder.reference(), None)
    }

    /// Open a standard account whose balance may not exceed `capacity`.
    ///
    /// An already open account keeps its existing capacity.
    pub fn open_account_with_capacity(
        &self,
        holder: &Holder,
        capacity: Decimal,
    ) -> LedgerResult<AccountRecord> {
        let limit = self.inner.currency.minor_units_of(capacity)?;
        if limit < 0 {
            return Err(LedgerError::InvalidAmount("negative capacity".to_string()));
        }
        self.inner.open(holder.reference(), Some(limit))
    }

    pub fn account_count(&self) -> usize {
        self.inner
            .records
            .read()
            .map(|records| records.len())
            .unwrap_or(0)
    }
}

impl core::fmt::Debug for InMemoryLedgerStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemoryLedgerStore")
            .field("accounts", &self.account_count())
            .finish()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn get_or_create_account(&self, holder: &Holder) -> LedgerResult<AccountRecord> {
        self.inner.open(holder.reference(), None)
    }

    fn minor_units(&self, record: &AccountRecord) -> LedgerResult<i64> {
        let records = self.inner.records.read().map_err(|_| Inner::poisoned())?;
        records
            .get(&record.owner)
            .map(|r| r.minor_units)
            .ok_or_else(|| LedgerError::AccountNotFound(record.owner.to_string()))
    }

    fn set_minor_units(&self, record: &AccountRecord, minor_units: i64) -> LedgerResult<()> {
        let mut records = self.inner.records.write().map_err(|_| Inner::poisoned())?;
        let stored = records
            .get_mut(&record.owner)
            .ok_or_else(|| LedgerError::AccountNotFound(record.owner.to_string()))?;
        stored.minor_units = minor_units;
        Ok(())
    }

    fn standard_account_for(
        &self,
        holder: &Holder,
    ) -> LedgerResult<Option<Box<dyn StandardAccount>>> {
        Ok(Some(Box::new(InMemoryAccount {
            inner: Arc::clone(&self.inner),
            owner: holder.reference().clone(),
        })))
    }
}

/// Standard account view over one in-memory record.
struct InMemoryAccount {
    inner: Arc<Inner>,
    owner: HolderRef,
}

impl InMemoryAccount {
    fn amount_in_units(&self, amount: Decimal) -> LedgerResult<i64> {
        let units = self.inner.currency.minor_units_of(amount)?;
        if units < 0 {
            return Err(LedgerError::InvalidAmount(format!("negative amount {amount}")));
        }
        Ok(units)
    }

    fn mutate<F>(&self, apply: F) -> LedgerResult<TransactionOutcome>
    where
        F: FnOnce(&mut Record) -> LedgerResult<TransactionOutcome>,
    {
        let mut records = self.inner.records.write().map_err(|_| Inner::poisoned())?;
        let record = records
            .get_mut(&self.owner)
            .ok_or_else(|| LedgerError::AccountNotFound(self.owner.to_string()))?;
        apply(record)
    }
}

impl StandardAccount for InMemoryAccount {
    fn owner(&self) -> &HolderRef {
        &self.owner
    }

    fn exists(&self) -> LedgerResult<bool> {
        let records = self.inner.records.read().map_err(|_| Inner::poisoned())?;
        Ok(records.contains_key(&self.owner))
    }

    fn balance(&self) -> LedgerResult<Decimal> {
        let records = self.inner.records.read().map_err(|_| Inner::poisoned())?;
        let units = records.get(&self.owner).map(|r| r.minor_units).unwrap_or(0);
        Ok(self.inner.currency.decimal_of(units))
    }

    fn add(&self, amount: Decimal) -> LedgerResult<TransactionOutcome> {
        let units = self.amount_in_units(amount)?;
        self.mutate(|record| {
            let next = record.minor_units.checked_add(units).ok_or(LedgerError::Overflow)?;
            if record.capacity.is_some_and(|cap| next > cap) {
                return Ok(TransactionOutcome::InsufficientSpace);
            }
            record.minor_units = next;
            Ok(TransactionOutcome::Success)
        })
    }

    fn remove(&self, amount: Decimal) -> LedgerResult<TransactionOutcome> {
        let units = self.amount_in_units(amount)?;
        self.mutate(|record| {
            if record.minor_units < units {
                return Ok(TransactionOutcome::InsufficientFunds);
            }
            record.minor_units -= units;
            Ok(TransactionOutcome::Success)
        })
    }
}
