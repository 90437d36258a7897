//! The economy contract exposed to host plugins.
//!
//! Mirrors the shape of the common server-economy API: queries and mutations
//! by raw identifier or by player reference, each with a world-scoped
//! overload. Balances are not partitioned by world, so every `_in` method is
//! the world-less call with the world ignored.

use rust_decimal::Decimal;

use coffer_core::PlayerRef;

use crate::bridge::TransactionBridge;
use crate::messages::MessageKey;
use crate::response::EconomyResponse;

pub trait Economy: Send + Sync {
    fn is_enabled(&self) -> bool;

    fn name(&self) -> String;

    fn has_bank_support(&self) -> bool {
        false
    }

    fn fractional_digits(&self) -> u32;

    fn format(&self, amount: Decimal) -> String;

    fn currency_name_plural(&self) -> String;

    fn currency_name_singular(&self) -> String;

    fn has_account(&self, id: &str) -> bool;

    fn has_account_player(&self, player: &PlayerRef) -> bool;

    fn has_account_in(&self, id: &str, _world: &str) -> bool {
        self.has_account(id)
    }

    fn has_account_player_in(&self, player: &PlayerRef, _world: &str) -> bool {
        self.has_account_player(player)
    }

    fn balance(&self, id: &str) -> Decimal;

    fn balance_player(&self, player: &PlayerRef) -> Decimal;

    fn balance_in(&self, id: &str, _world: &str) -> Decimal {
        self.balance(id)
    }

    fn balance_player_in(&self, player: &PlayerRef, _world: &str) -> Decimal {
        self.balance_player(player)
    }

    fn has(&self, id: &str, amount: Decimal) -> bool;

    fn has_player(&self, player: &PlayerRef, amount: Decimal) -> bool;

    fn has_in(&self, id: &str, _world: &str, amount: Decimal) -> bool {
        self.has(id, amount)
    }

    fn has_player_in(&self, player: &PlayerRef, _world: &str, amount: Decimal) -> bool {
        self.has_player(player, amount)
    }

    fn withdraw(&self, id: &str, amount: Decimal) -> EconomyResponse;

    fn withdraw_player(&self, player: &PlayerRef, amount: Decimal) -> EconomyResponse;

    fn withdraw_in(&self, id: &str, _world: &str, amount: Decimal) -> EconomyResponse {
        self.withdraw(id, amount)
    }

    fn withdraw_player_in(
        &self,
        player: &PlayerRef,
        _world: &str,
        amount: Decimal,
    ) -> EconomyResponse {
        self.withdraw_player(player, amount)
    }

    fn deposit(&self, id: &str, amount: Decimal) -> EconomyResponse;

    /// Same as [`Economy::deposit`] with the player's UUID as the id.
    fn deposit_player(&self, player: &PlayerRef, amount: Decimal) -> EconomyResponse {
        self.deposit(&player.uuid.to_string(), amount)
    }

    fn deposit_in(&self, id: &str, _world: &str, amount: Decimal) -> EconomyResponse {
        self.deposit(id, amount)
    }

    fn deposit_player_in(
        &self,
        player: &PlayerRef,
        _world: &str,
        amount: Decimal,
    ) -> EconomyResponse {
        self.deposit_player(player, amount)
    }

    // Shared accounts. Only deposit and withdraw by name are supported.

    fn create_bank(&self, name: &str, owner: &str) -> EconomyResponse;

    fn create_bank_player(&self, name: &str, owner: &PlayerRef) -> EconomyResponse;

    fn delete_bank(&self, name: &str) -> EconomyResponse;

    fn bank_balance(&self, name: &str) -> EconomyResponse;

    fn bank_has(&self, name: &str, amount: Decimal) -> EconomyResponse;

    fn bank_withdraw(&self, name: &str, amount: Decimal) -> EconomyResponse;

    fn bank_deposit(&self, name: &str, amount: Decimal) -> EconomyResponse;

    fn is_bank_owner(&self, name: &str, player: &str) -> EconomyResponse;

    fn is_bank_owner_player(&self, name: &str, player: &PlayerRef) -> EconomyResponse;

    fn is_bank_member(&self, name: &str, player: &str) -> EconomyResponse;

    fn is_bank_member_player(&self, name: &str, player: &PlayerRef) -> EconomyResponse;

    fn banks(&self) -> Vec<String> {
        Vec::new()
    }

    /// Existence check; storage is never created eagerly.
    fn create_player_account(&self, id: &str) -> bool {
        self.has_account(id)
    }

    fn create_player_account_player(&self, player: &PlayerRef) -> bool {
        self.has_account_player(player)
    }

    fn create_player_account_in(&self, id: &str, _world: &str) -> bool {
        self.create_player_account(id)
    }

    fn create_player_account_player_in(&self, player: &PlayerRef, _world: &str) -> bool {
        self.create_player_account_player(player)
    }
}

impl TransactionBridge {
    fn bank_not_implemented(&self) -> EconomyResponse {
        EconomyResponse::not_implemented(Decimal::ZERO, self.message(MessageKey::NotImplemented))
    }
}

impl Economy for TransactionBridge {
    fn is_enabled(&self) -> bool {
        self.enabled()
    }

    fn name(&self) -> String {
        self.display_name().to_string()
    }

    fn fractional_digits(&self) -> u32 {
        self.currency().fractional_digits()
    }

    fn format(&self, amount: Decimal) -> String {
        self.currency().format(amount)
    }

    fn currency_name_plural(&self) -> String {
        self.currency().name_plural().to_string()
    }

    fn currency_name_singular(&self) -> String {
        self.currency().name_singular().to_string()
    }

    fn has_account(&self, id: &str) -> bool {
        self.exists_by_id(id)
    }

    fn has_account_player(&self, player: &PlayerRef) -> bool {
        self.exists_for_player(player)
    }

    fn balance(&self, id: &str) -> Decimal {
        self.balance_by_id(id)
    }

    fn balance_player(&self, player: &PlayerRef) -> Decimal {
        self.balance_for_player(player)
    }

    fn has(&self, id: &str, amount: Decimal) -> bool {
        self.has_by_id(id, amount)
    }

    fn has_player(&self, player: &PlayerRef, amount: Decimal) -> bool {
        self.has_for_player(player, amount)
    }

    fn withdraw(&self, id: &str, amount: Decimal) -> EconomyResponse {
        self.withdraw_from(id, amount)
    }

    fn withdraw_player(&self, player: &PlayerRef, amount: Decimal) -> EconomyResponse {
        self.withdraw_for_player(player, amount)
    }

    fn deposit(&self, id: &str, amount: Decimal) -> EconomyResponse {
        self.deposit_to(id, amount)
    }

    fn create_bank(&self, _name: &str, _owner: &str) -> EconomyResponse {
        self.bank_not_implemented()
    }

    fn create_bank_player(&self, _name: &str, _owner: &PlayerRef) -> EconomyResponse {
        self.bank_not_implemented()
    }

    fn delete_bank(&self, _name: &str) -> EconomyResponse {
        self.bank_not_implemented()
    }

    fn bank_balance(&self, _name: &str) -> EconomyResponse {
        self.bank_not_implemented()
    }

    fn bank_has(&self, _name: &str, _amount: Decimal) -> EconomyResponse {
        self.bank_not_implemented()
    }

    fn bank_withdraw(&self, name: &str, amount: Decimal) -> EconomyResponse {
        self.withdraw_bank(name, amount)
    }

    fn bank_deposit(&self, name: &str, amount: Decimal) -> EconomyResponse {
        self.deposit_bank(name, amount)
    }

    fn is_bank_owner(&self, _name: &str, _player: &str) -> EconomyResponse {
        self.bank_not_implemented()
    }

    fn is_bank_owner_player(&self, _name: &str, _player: &PlayerRef) -> EconomyResponse {
        self.bank_not_implemented()
    }

    fn is_bank_member(&self, _name: &str, _player: &str) -> EconomyResponse {
        self.bank_not_implemented()
    }

    fn is_bank_member_player(&self, _name: &str, _player: &PlayerRef) -> EconomyResponse {
        self.bank_not_implemented()
    }
}
