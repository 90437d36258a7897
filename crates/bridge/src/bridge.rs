//! Transaction bridge: resolves a holder, then mutates its balance along the
//! path its category calls for.
//!
//! - Non-player holders (towns, nations, ...) are credited on the **bypass
//!   path**: get-or-create the ledger record and add raw minor units, with no
//!   capacity validation.
//! - Player holders go through the store's standard account view, which can
//!   refuse for domain reasons.
//!
//! Every balance read-modify-write runs under the holder's lock from
//! [`HolderLocks`]. Errors from the store or the currency bubble up with `?`
//! and are converted exactly once, in [`TransactionBridge::transact`] or
//! [`TransactionBridge::query`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rust_decimal::Decimal;

use coffer_core::{Holder, PlayerRef, ProviderKey};
use coffer_holders::ProviderRegistry;
use coffer_ledger::{
    Currency, LedgerError, LedgerResult, LedgerStore, StandardAccount, TransactionOutcome,
};

use crate::config::{BridgeConfig, ConfigError};
use crate::error::BridgeError;
use crate::locks::HolderLocks;
use crate::mapping::{deposit_response, withdraw_response};
use crate::messages::{MessageKey, MessageSource};
use crate::response::EconomyResponse;

type BridgeResult<T> = Result<T, BridgeError>;

pub struct TransactionBridge {
    name: String,
    enabled: AtomicBool,
    registry: Arc<ProviderRegistry>,
    store: Arc<dyn LedgerStore>,
    currency: Arc<dyn Currency>,
    messages: Arc<dyn MessageSource>,
    locks: HolderLocks,
}

impl TransactionBridge {
    pub fn new(
        name: impl Into<String>,
        registry: Arc<ProviderRegistry>,
        store: Arc<dyn LedgerStore>,
        currency: Arc<dyn Currency>,
        messages: Arc<dyn MessageSource>,
    ) -> Self {
        Self {
            name: name.into(),
            enabled: AtomicBool::new(true),
            registry,
            store,
            currency,
            messages,
            locks: HolderLocks::new(),
        }
    }

    /// Build a bridge whose name, currency and messages come from `config`.
    pub fn from_config(
        config: &BridgeConfig,
        registry: Arc<ProviderRegistry>,
        store: Arc<dyn LedgerStore>,
    ) -> Result<Self, ConfigError> {
        let currency = config.currency()?;
        Ok(Self::new(
            config.display_name(),
            registry,
            store,
            Arc::new(currency),
            Arc::new(config.messages.clone()),
        ))
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    pub(crate) fn enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub(crate) fn display_name(&self) -> &str {
        &self.name
    }

    pub(crate) fn currency(&self) -> &dyn Currency {
        self.currency.as_ref()
    }

    pub(crate) fn message(&self, key: MessageKey) -> String {
        self.messages.message(key)
    }

    // ---- mutations ----

    pub(crate) fn deposit_to(&self, id: &str, amount: Decimal) -> EconomyResponse {
        self.transact("deposit", || {
            if amount < Decimal::ZERO {
                return Ok(self.reject(MessageKey::NegativeAmount));
            }
            let Some(holder) = self.registry.resolve(id) else {
                tracing::warn!(id, "deposit to unknown account");
                return Ok(self.reject(MessageKey::UnknownAccount));
            };

            if holder.is_player() {
                match self.existing_account(&holder)? {
                    Some(account) => self.deposit_account(&holder, account.as_ref(), amount),
                    None => {
                        tracing::warn!(
                            holder_type = %holder.kind(),
                            holder_id = %holder.holder_id(),
                            "deposit to holder without a ledger account"
                        );
                        Ok(self.reject(MessageKey::UnknownAccount))
                    }
                }
            } else {
                self.credit_bypass(&holder, amount)
            }
        })
    }

    pub(crate) fn withdraw_from(&self, id: &str, amount: Decimal) -> EconomyResponse {
        self.transact("withdraw", || {
            if amount < Decimal::ZERO {
                return Ok(self.reject(MessageKey::NegativeAmount));
            }
            let Some(holder) = self.registry.resolve(id) else {
                tracing::warn!(id, "withdraw from unknown account");
                return Ok(self.reject(MessageKey::UnknownAccount));
            };
            self.withdraw_holder(&holder, amount)
        })
    }

    pub(crate) fn withdraw_for_player(&self, player: &PlayerRef, amount: Decimal) -> EconomyResponse {
        self.transact("withdraw_player", || {
            if amount < Decimal::ZERO {
                return Ok(self.reject(MessageKey::NegativeAmount));
            }
            let Some(holder) = self.player_holder(player) else {
                tracing::warn!(player = %player.uuid, "withdraw from unknown player");
                return Ok(self.reject(MessageKey::UnknownAccount));
            };
            self.withdraw_holder(&holder, amount)
        })
    }

    pub(crate) fn deposit_bank(&self, name: &str, amount: Decimal) -> EconomyResponse {
        self.transact("bank_deposit", || {
            if amount < Decimal::ZERO {
                return Ok(self.reject(MessageKey::NegativeAmount));
            }
            match self.named_account(name)? {
                Some((holder, account)) => self.deposit_account(&holder, account.as_ref(), amount),
                None => Ok(self.unknown_bank(name)),
            }
        })
    }

    pub(crate) fn withdraw_bank(&self, name: &str, amount: Decimal) -> EconomyResponse {
        self.transact("bank_withdraw", || {
            if amount < Decimal::ZERO {
                return Ok(self.reject(MessageKey::NegativeAmount));
            }
            match self.named_account(name)? {
                Some((holder, account)) => self.withdraw_account(&holder, account.as_ref(), amount),
                None => Ok(self.unknown_bank(name)),
            }
        })
    }

    /// Bypass path: raw minor-unit credit on the holder's ledger record.
    fn credit_bypass(&self, holder: &Holder, amount: Decimal) -> BridgeResult<EconomyResponse> {
        let units = self.currency.minor_units_of(amount)?;

        let stored = self.locks.with_lock(holder.reference(), || -> LedgerResult<i64> {
            let record = self.store.get_or_create_account(holder)?;
            let current = self.store.minor_units(&record)?;
            let next = current.checked_add(units).ok_or(LedgerError::Overflow)?;
            self.store.set_minor_units(&record, next)?;
            self.store.minor_units(&record)
        })?;

        let balance = self.currency.decimal_of(stored);
        tracing::info!(
            holder_type = %holder.kind(),
            holder_id = %holder.holder_id(),
            %amount,
            minor_units = units,
            %balance,
            outcome = "SUCCESS",
            "credited holder on bypass path"
        );
        Ok(EconomyResponse::success(amount, balance))
    }

    fn deposit_account(
        &self,
        holder: &Holder,
        account: &dyn StandardAccount,
        amount: Decimal,
    ) -> BridgeResult<EconomyResponse> {
        let (outcome, balance) = self.locks.with_lock(
            holder.reference(),
            || -> LedgerResult<(TransactionOutcome, Decimal)> {
                let outcome = account.add(amount)?;
                Ok((outcome, account.balance()?))
            },
        )?;

        tracing::info!(
            holder_type = %holder.kind(),
            holder_id = %holder.holder_id(),
            %amount,
            %outcome,
            "deposit"
        );
        Ok(deposit_response(outcome, amount, balance, self.messages.as_ref()))
    }

    fn withdraw_holder(&self, holder: &Holder, amount: Decimal) -> BridgeResult<EconomyResponse> {
        match self.existing_account(holder)? {
            Some(account) => self.withdraw_account(holder, account.as_ref(), amount),
            None => {
                tracing::warn!(
                    holder_type = %holder.kind(),
                    holder_id = %holder.holder_id(),
                    "withdraw from holder without a ledger account"
                );
                Ok(self.reject(MessageKey::UnknownAccount))
            }
        }
    }

    fn withdraw_account(
        &self,
        holder: &Holder,
        account: &dyn StandardAccount,
        amount: Decimal,
    ) -> BridgeResult<EconomyResponse> {
        let (outcome, balance) = self.locks.with_lock(
            holder.reference(),
            || -> LedgerResult<(TransactionOutcome, Decimal)> {
                let outcome = account.remove(amount)?;
                Ok((outcome, account.balance()?))
            },
        )?;

        tracing::info!(
            holder_type = %holder.kind(),
            holder_id = %holder.holder_id(),
            %amount,
            %outcome,
            "withdraw"
        );
        Ok(withdraw_response(outcome, amount, balance, self.messages.as_ref()))
    }

    // ---- queries ----

    pub(crate) fn exists_by_id(&self, id: &str) -> bool {
        self.query("has_account", false, || {
            Ok(self.account_of(self.registry.resolve(id))?.is_some())
        })
    }

    pub(crate) fn exists_for_player(&self, player: &PlayerRef) -> bool {
        self.query("has_account_player", false, || {
            Ok(self.account_of(self.player_holder(player))?.is_some())
        })
    }

    pub(crate) fn balance_by_id(&self, id: &str) -> Decimal {
        self.query("balance", Decimal::ZERO, || {
            self.balance_of(self.registry.resolve(id))
        })
    }

    pub(crate) fn balance_for_player(&self, player: &PlayerRef) -> Decimal {
        self.query("balance_player", Decimal::ZERO, || {
            self.balance_of(self.player_holder(player))
        })
    }

    pub(crate) fn has_by_id(&self, id: &str, amount: Decimal) -> bool {
        self.query("has", false, || self.has_of(self.registry.resolve(id), amount))
    }

    pub(crate) fn has_for_player(&self, player: &PlayerRef, amount: Decimal) -> bool {
        self.query("has_player", false, || {
            self.has_of(self.player_holder(player), amount)
        })
    }

    fn balance_of(&self, holder: Option<Holder>) -> BridgeResult<Decimal> {
        match self.account_of(holder)? {
            Some(account) => Ok(account.balance()?),
            None => Ok(Decimal::ZERO),
        }
    }

    fn has_of(&self, holder: Option<Holder>, amount: Decimal) -> BridgeResult<bool> {
        match self.account_of(holder)? {
            Some(account) => Ok(account.has(amount)?),
            None => Ok(false),
        }
    }

    // ---- resolution helpers ----

    /// The player's own holder, from the default provider only.
    fn player_holder(&self, player: &PlayerRef) -> Option<Holder> {
        self.registry
            .provider(ProviderKey::PLAYER.as_str())?
            .resolve_player(player)
    }

    fn account_of(&self, holder: Option<Holder>) -> BridgeResult<Option<Box<dyn StandardAccount>>> {
        match holder {
            Some(holder) => self.existing_account(&holder),
            None => Ok(None),
        }
    }

    /// Standard account view for `holder`, only if its backing record exists.
    fn existing_account(&self, holder: &Holder) -> BridgeResult<Option<Box<dyn StandardAccount>>> {
        let Some(account) = self.store.standard_account_for(holder)? else {
            return Ok(None);
        };
        if account.exists()? {
            Ok(Some(account))
        } else {
            Ok(None)
        }
    }

    fn named_account(&self, name: &str) -> BridgeResult<Option<(Holder, Box<dyn StandardAccount>)>> {
        let Some(holder) = self.registry.resolve(name) else {
            return Ok(None);
        };
        Ok(self.existing_account(&holder)?.map(|account| (holder, account)))
    }

    // ---- boundary ----

    fn reject(&self, key: MessageKey) -> EconomyResponse {
        EconomyResponse::failure(Decimal::ZERO, self.message(key))
    }

    fn unknown_bank(&self, name: &str) -> EconomyResponse {
        EconomyResponse::failure(
            Decimal::ZERO,
            self.message(MessageKey::UnknownBank).replace("{name}", name),
        )
    }

    /// Run a mutating operation; an error becomes a generic FAILURE.
    fn transact<F>(&self, op: &'static str, f: F) -> EconomyResponse
    where
        F: FnOnce() -> BridgeResult<EconomyResponse>,
    {
        f().unwrap_or_else(|err| {
            tracing::error!(op, error = %err, "economy operation failed");
            self.reject(MessageKey::Error)
        })
    }

    /// Run a read-only operation; an error yields `default`.
    fn query<T, F>(&self, op: &'static str, default: T, f: F) -> T
    where
        F: FnOnce() -> BridgeResult<T>,
    {
        f().unwrap_or_else(|err| {
            tracing::error!(op, error = %err, "economy query failed");
            default
        })
    }
}

impl core::fmt::Debug for TransactionBridge {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TransactionBridge")
            .field("name", &self.name)
            .field("enabled", &self.enabled())
            .field("registry", &self.registry)
            .field("locks", &self.locks)
            .finish_non_exhaustive()
    }
}
