//! `coffer-ledger`: the Ledger Store boundary.
//!
//! Defines what the transaction bridge needs from balance persistence and from
//! the configured currency, plus an in-memory store for tests and embedding.

pub mod currency;
pub mod in_memory;
pub mod outcome;
pub mod store;

pub use currency::{Currency, CurrencyDescriptor, MAX_FRACTIONAL_DIGITS};
pub use in_memory::InMemoryLedgerStore;
pub use outcome::TransactionOutcome;
pub use store::{AccountRecord, LedgerError, LedgerResult, LedgerStore, StandardAccount};
