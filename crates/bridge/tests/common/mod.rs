#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rust_decimal::Decimal;
use uuid::Uuid;

use coffer_bridge::{Economy, Messages, TransactionBridge};
use coffer_core::{Holder, HolderRef, PlayerRef};
use coffer_holders::{
    DependencyStatus, InMemoryPlayerDirectory, PlayerProvider, ProviderRegistry, Settlements,
    ensure_registered, settlement_providers,
};
use coffer_ledger::{
    AccountRecord, Currency, CurrencyDescriptor, InMemoryLedgerStore, LedgerError, LedgerResult,
    LedgerStore, StandardAccount, TransactionOutcome,
};

/// Ledger store wrapper that counts writes and can be switched to fail.
pub struct RecordingStore {
    inner: InMemoryLedgerStore,
    writes: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl RecordingStore {
    pub fn new(inner: InMemoryLedgerStore) -> Self {
        Self {
            inner,
            writes: Arc::new(AtomicUsize::new(0)),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> LedgerResult<()> {
        check(&self.failing)
    }
}

fn check(failing: &AtomicBool) -> LedgerResult<()> {
    if failing.load(Ordering::SeqCst) {
        Err(LedgerError::Storage("connection reset".to_string()))
    } else {
        Ok(())
    }
}

impl LedgerStore for RecordingStore {
    fn get_or_create_account(&self, holder: &Holder) -> LedgerResult<AccountRecord> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.get_or_create_account(holder)
    }

    fn minor_units(&self, record: &AccountRecord) -> LedgerResult<i64> {
        self.check()?;
        self.inner.minor_units(record)
    }

    fn set_minor_units(&self, record: &AccountRecord, minor_units: i64) -> LedgerResult<()> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set_minor_units(record, minor_units)
    }

    fn standard_account_for(
        &self,
        holder: &Holder,
    ) -> LedgerResult<Option<Box<dyn StandardAccount>>> {
        self.check()?;
        Ok(self.inner.standard_account_for(holder)?.map(|account| {
            Box::new(RecordingAccount {
                inner: account,
                writes: Arc::clone(&self.writes),
                failing: Arc::clone(&self.failing),
            }) as Box<dyn StandardAccount>
        }))
    }
}

struct RecordingAccount {
    inner: Box<dyn StandardAccount>,
    writes: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl StandardAccount for RecordingAccount {
    fn owner(&self) -> &HolderRef {
        self.inner.owner()
    }

    fn exists(&self) -> LedgerResult<bool> {
        check(&self.failing)?;
        self.inner.exists()
    }

    fn balance(&self) -> LedgerResult<Decimal> {
        check(&self.failing)?;
        self.inner.balance()
    }

    fn add(&self, amount: Decimal) -> LedgerResult<TransactionOutcome> {
        check(&self.failing)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.add(amount)
    }

    fn remove(&self, amount: Decimal) -> LedgerResult<TransactionOutcome> {
        check(&self.failing)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(amount)
    }
}

/// A bridge over players plus towns and nations.
pub struct World {
    pub economy: Arc<TransactionBridge>,
    pub store: Arc<RecordingStore>,
    pub ledger: InMemoryLedgerStore,
    pub registry: Arc<ProviderRegistry>,
    pub players: Arc<InMemoryPlayerDirectory>,
    pub settlements: Settlements,
}

pub fn world() -> World {
    coffer_observability::init();

    let currency: Arc<dyn Currency> = Arc::new(CurrencyDescriptor::default());
    let players = Arc::new(InMemoryPlayerDirectory::new());
    let settlements = Settlements::new();

    let registry = Arc::new(ProviderRegistry::with_default(Arc::new(PlayerProvider::new(
        players.clone(),
    ))));
    let probe = |_: &str| DependencyStatus::Available;
    ensure_registered(&registry, &probe, &settlement_providers("towny", &settlements));

    let ledger = InMemoryLedgerStore::new(currency.clone());
    let store = Arc::new(RecordingStore::new(ledger.clone()));
    let economy = Arc::new(TransactionBridge::new(
        "Coffer",
        registry.clone(),
        store.clone(),
        currency,
        Arc::new(Messages::default()),
    ));

    World {
        economy,
        store,
        ledger,
        registry,
        players,
        settlements,
    }
}

impl World {
    /// Join a player and open their standard account.
    pub fn player_with_account(&self, seed: u128, name: &str, balance: Decimal) -> PlayerRef {
        let player = self.players.join(Uuid::from_u128(seed), name);
        let holder = self
            .registry
            .resolve_player(&player)
            .expect("joined player resolves");
        self.ledger.open_account(&holder).expect("open account");
        if balance > Decimal::ZERO {
            assert!(self.economy.deposit_player(&player, balance).transaction_success());
        }
        player
    }

    /// Minor units currently stored for a resolved id.
    pub fn stored_units(&self, id: &str) -> i64 {
        let holder = self.registry.resolve(id).expect("id resolves");
        let record = self.ledger.get_or_create_account(&holder).expect("record");
        self.ledger.minor_units(&record).expect("units")
    }
}
