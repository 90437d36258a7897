use thiserror::Error;

use coffer_ledger::LedgerError;

/// Failure inside a bridge operation.
///
/// Never crosses the public boundary: the operation that owns it logs it once
/// and answers with a generic FAILURE response.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
