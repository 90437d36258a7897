//! Bridge configuration.
//!
//! Sources, lowest to highest precedence: built-in defaults, a JSON document
//! (`from_json`), then environment variables (`from_env`):
//!
//! - `COFFER_NAME`: economy name reported to callers
//! - `COFFER_CURRENCY_NAME` / `COFFER_CURRENCY_NAME_PLURAL`
//! - `COFFER_CURRENCY_DIGITS`: fractional digits (0..=8)
//! - `COFFER_MESSAGES_PATH`: JSON file with message overrides

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use coffer_ledger::{CurrencyDescriptor, MAX_FRACTIONAL_DIGITS};

use crate::messages::Messages;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid currency: {0}")]
    Currency(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencySettings {
    pub name: String,
    pub name_plural: String,
    pub fractional_digits: u32,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            name: "Emerald".to_string(),
            name_plural: "Emeralds".to_string(),
            fractional_digits: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub name: String,
    pub currency: CurrencySettings,
    pub messages: Messages,
}

impl BridgeConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.currency()?;
        Ok(config)
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Apply `COFFER_*` overrides read through `lookup`.
    ///
    /// Malformed digit counts are logged and ignored; a message file that
    /// cannot be read or parsed is an error.
    pub fn overlay<F>(mut self, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("COFFER_NAME") {
            self.name = name;
        }
        if let Some(name) = lookup("COFFER_CURRENCY_NAME") {
            self.currency.name = name;
        }
        if let Some(plural) = lookup("COFFER_CURRENCY_NAME_PLURAL") {
            self.currency.name_plural = plural;
        }
        if let Some(raw) = lookup("COFFER_CURRENCY_DIGITS") {
            match raw.trim().parse::<u32>() {
                Ok(digits) => self.currency.fractional_digits = digits,
                Err(_) => tracing::warn!(
                    value = %raw,
                    default = self.currency.fractional_digits,
                    "ignoring malformed COFFER_CURRENCY_DIGITS"
                ),
            }
        }
        if let Some(path) = lookup("COFFER_MESSAGES_PATH") {
            self.messages = load_messages(Path::new(&path))?;
        }

        self.currency()?;
        Ok(self)
    }

    /// Validated currency descriptor for this configuration.
    pub fn currency(&self) -> Result<CurrencyDescriptor, ConfigError> {
        if self.currency.fractional_digits > MAX_FRACTIONAL_DIGITS {
            return Err(ConfigError::Currency(format!(
                "fractional_digits must be at most {MAX_FRACTIONAL_DIGITS}, got {}",
                self.currency.fractional_digits
            )));
        }
        CurrencyDescriptor::new(
            self.currency.name.clone(),
            self.currency.name_plural.clone(),
            self.currency.fractional_digits,
        )
        .map_err(|e| ConfigError::Currency(e.to_string()))
    }

    /// Economy name, falling back to the crate name when unset.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { "coffer" } else { &self.name }
    }
}

fn load_messages(path: &Path) -> anyhow::Result<Messages> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading messages from {}", path.display()))?;
    Messages::from_json(&raw).with_context(|| format!("parsing messages in {}", path.display()))
}
