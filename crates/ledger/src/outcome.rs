use serde::{Deserialize, Serialize};

/// Result of a ledger mutation attempt.
///
/// Closed set; the bridge translates each variant into the external response
/// vocabulary and nothing else leaks across that boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionOutcome {
    Success,
    InsufficientFunds,
    /// No room left in the holder's capacity-constrained storage.
    InsufficientSpace,
    Unsupported,
    Error,
}

impl TransactionOutcome {
    pub const ALL: [TransactionOutcome; 5] = [
        TransactionOutcome::Success,
        TransactionOutcome::InsufficientFunds,
        TransactionOutcome::InsufficientSpace,
        TransactionOutcome::Unsupported,
        TransactionOutcome::Error,
    ];

    pub fn is_success(self) -> bool {
        self == TransactionOutcome::Success
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionOutcome::Success => "SUCCESS",
            TransactionOutcome::InsufficientFunds => "INSUFFICIENT_FUNDS",
            TransactionOutcome::InsufficientSpace => "INSUFFICIENT_SPACE",
            TransactionOutcome::Unsupported => "UNSUPPORTED",
            TransactionOutcome::Error => "ERROR",
        }
    }
}

impl core::fmt::Display for TransactionOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
