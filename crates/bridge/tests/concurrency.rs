mod common;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use coffer_bridge::Economy;
use coffer_ledger::{Currency, CurrencyDescriptor};

use common::world;

const THREADS: usize = 8;
const ROUNDS: usize = 200;

#[test]
fn concurrent_bypass_deposits_lose_nothing() {
    let w = world();
    w.settlements.found_town("Riverside");
    let amount = dec!(0.25);
    let units = CurrencyDescriptor::default().minor_units_of(amount).unwrap();

    std::thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..ROUNDS {
                    assert!(w.economy.deposit("Riverside", amount).transaction_success());
                }
            });
        }
    });

    assert_eq!(w.stored_units("Riverside"), (THREADS * ROUNDS) as i64 * units);
    assert_eq!(w.economy.balance("Riverside"), dec!(400));
}

#[test]
fn bypass_and_standard_paths_serialize_on_the_same_holder() {
    let w = world();
    w.settlements.found_town("Riverside");
    assert!(w.economy.deposit("Riverside", dec!(1000)).transaction_success());

    std::thread::scope(|s| {
        for t in 0..THREADS {
            let economy = &w.economy;
            s.spawn(move || {
                for _ in 0..ROUNDS {
                    let response = if t % 2 == 0 {
                        economy.deposit("Riverside", dec!(1))
                    } else {
                        economy.bank_withdraw("Riverside", dec!(1))
                    };
                    assert!(response.transaction_success(), "{response:?}");
                }
            });
        }
    });

    assert_eq!(w.economy.balance("Riverside"), dec!(1000));
}

#[test]
fn concurrent_withdrawals_never_overdraw() {
    let w = world();
    let player = w.player_with_account(21, "alex", dec!(100));

    let succeeded: usize = std::thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    (0..ROUNDS)
                        .filter(|_| w.economy.withdraw_player(&player, dec!(1)).transaction_success())
                        .count()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });

    assert_eq!(succeeded, 100);
    assert_eq!(w.economy.balance_player(&player), Decimal::ZERO);
}
