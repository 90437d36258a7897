//! User-facing response messages.

use serde::{Deserialize, Serialize};

/// Fixed message keys used by the outcome mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    InsufficientFunds,
    InsufficientSpace,
    Unsupported,
    Error,
    NegativeAmount,
    UnknownAccount,
    /// Template; `{name}` is replaced with the bank name.
    UnknownBank,
    NotImplemented,
}

/// Keyed lookup of localized strings.
pub trait MessageSource: Send + Sync {
    fn message(&self, key: MessageKey) -> String;
}

/// Message table, English by default. Loaded from JSON, any key may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub insufficient_funds: String,
    pub insufficient_space: String,
    pub unsupported: String,
    pub error: String,
    pub negative_amount: String,
    pub unknown_account: String,
    pub unknown_bank: String,
    pub not_implemented: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            insufficient_funds: "Insufficient funds.".to_string(),
            insufficient_space: "Insufficient storage space.".to_string(),
            unsupported: "Operation not supported.".to_string(),
            error: "Error processing transaction.".to_string(),
            negative_amount: "Negative amount".to_string(),
            unknown_account: "Unknown account".to_string(),
            unknown_bank: "Unknown bank: {name}".to_string(),
            not_implemented: "Bank accounts are not supported.".to_string(),
        }
    }
}

impl Messages {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl MessageSource for Messages {
    fn message(&self, key: MessageKey) -> String {
        let text = match key {
            MessageKey::InsufficientFunds => &self.insufficient_funds,
            MessageKey::InsufficientSpace => &self.insufficient_space,
            MessageKey::Unsupported => &self.unsupported,
            MessageKey::Error => &self.error,
            MessageKey::NegativeAmount => &self.negative_amount,
            MessageKey::UnknownAccount => &self.unknown_account,
            MessageKey::UnknownBank => &self.unknown_bank,
            MessageKey::NotImplemented => &self.not_implemented,
        };
        text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_overrides_keep_defaults() {
        let messages = Messages::from_json(r#"{"insufficient_funds": "Pas assez d'argent."}"#).unwrap();
        assert_eq!(
            messages.message(MessageKey::InsufficientFunds),
            "Pas assez d'argent."
        );
        assert_eq!(
            messages.message(MessageKey::UnknownAccount),
            Messages::default().unknown_account
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Messages::from_json("{not json").is_err());
    }
}
