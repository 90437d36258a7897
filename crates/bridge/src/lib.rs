//! `coffer-bridge`: the economy contract on top of holders and the ledger.
//!
//! Resolves a target holder through the provider registry, mutates the
//! Ledger Store along either the bypass or the standard path, and translates
//! the outcome into an [`EconomyResponse`]. No public operation returns an
//! error; failures are carried in the response classification.

pub mod bridge;
pub mod config;
pub mod economy;
pub mod error;
pub mod locks;
pub mod mapping;
pub mod messages;
pub mod response;

pub use bridge::TransactionBridge;
pub use config::{BridgeConfig, ConfigError, CurrencySettings};
pub use economy::Economy;
pub use error::BridgeError;
pub use locks::HolderLocks;
pub use messages::{MessageKey, MessageSource, Messages};
pub use response::{EconomyResponse, ResponseType};
