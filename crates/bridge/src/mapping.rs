//! Outcome mapping: ledger outcomes to economy responses.
//!
//! | op       | outcome            | response        | message            |
//! |----------|--------------------|-----------------|--------------------|
//! | withdraw | SUCCESS            | SUCCESS         | -                  |
//! | withdraw | INSUFFICIENT_FUNDS | FAILURE         | insufficient funds |
//! | withdraw | anything else      | FAILURE         | error              |
//! | deposit  | SUCCESS            | SUCCESS         | -                  |
//! | deposit  | INSUFFICIENT_SPACE | FAILURE         | insufficient space |
//! | deposit  | INSUFFICIENT_FUNDS | FAILURE         | insufficient funds |
//! | deposit  | UNSUPPORTED        | NOT_IMPLEMENTED | unsupported        |
//! | deposit  | ERROR              | FAILURE         | error              |
//!
//! Successful responses transact the requested amount; failures transact zero.
//! `balance` is always the balance read after the attempt.

use rust_decimal::Decimal;

use coffer_ledger::TransactionOutcome;

use crate::messages::{MessageKey, MessageSource};
use crate::response::EconomyResponse;

pub fn withdraw_response(
    outcome: TransactionOutcome,
    amount: Decimal,
    balance: Decimal,
    messages: &dyn MessageSource,
) -> EconomyResponse {
    match outcome {
        TransactionOutcome::Success => EconomyResponse::success(amount, balance),
        TransactionOutcome::InsufficientFunds => {
            EconomyResponse::failure(balance, messages.message(MessageKey::InsufficientFunds))
        }
        TransactionOutcome::InsufficientSpace
        | TransactionOutcome::Unsupported
        | TransactionOutcome::Error => {
            EconomyResponse::failure(balance, messages.message(MessageKey::Error))
        }
    }
}

pub fn deposit_response(
    outcome: TransactionOutcome,
    amount: Decimal,
    balance: Decimal,
    messages: &dyn MessageSource,
) -> EconomyResponse {
    match outcome {
        TransactionOutcome::Success => EconomyResponse::success(amount, balance),
        TransactionOutcome::InsufficientSpace => {
            EconomyResponse::failure(balance, messages.message(MessageKey::InsufficientSpace))
        }
        TransactionOutcome::InsufficientFunds => {
            EconomyResponse::failure(balance, messages.message(MessageKey::InsufficientFunds))
        }
        TransactionOutcome::Unsupported => {
            EconomyResponse::not_implemented(balance, messages.message(MessageKey::Unsupported))
        }
        TransactionOutcome::Error => {
            EconomyResponse::failure(balance, messages.message(MessageKey::Error))
        }
    }
}
