use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Classification of an economy response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseType {
    Success,
    Failure,
    NotImplemented,
}

/// Answer to a balance-changing economy call.
///
/// `amount` is what was actually transacted (zero unless successful);
/// `balance` is the holder's balance after the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomyResponse {
    pub amount: Decimal,
    pub balance: Decimal,
    pub kind: ResponseType,
    pub message: Option<String>,
}

impl EconomyResponse {
    pub fn success(amount: Decimal, balance: Decimal) -> Self {
        Self {
            amount,
            balance,
            kind: ResponseType::Success,
            message: None,
        }
    }

    pub fn failure(balance: Decimal, message: impl Into<String>) -> Self {
        Self {
            amount: Decimal::ZERO,
            balance,
            kind: ResponseType::Failure,
            message: Some(message.into()),
        }
    }

    pub fn not_implemented(balance: Decimal, message: impl Into<String>) -> Self {
        Self {
            amount: Decimal::ZERO,
            balance,
            kind: ResponseType::NotImplemented,
            message: Some(message.into()),
        }
    }

    pub fn transaction_success(&self) -> bool {
        self.kind == ResponseType::Success
    }
}
