use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::sync::Arc;

use rust_decimal_macros::dec;
use uuid::Uuid;

use coffer_bridge::{Economy, Messages, TransactionBridge};
use coffer_core::ProviderKey;
use coffer_holders::{
    GroupProvider, InMemoryPlayerDirectory, PlayerProvider, ProviderRegistry, Settlements,
};
use coffer_ledger::{Currency, CurrencyDescriptor, InMemoryLedgerStore};

struct Setup {
    economy: TransactionBridge,
    registry: Arc<ProviderRegistry>,
    ledger: InMemoryLedgerStore,
    players: Arc<InMemoryPlayerDirectory>,
}

fn setup(players_count: u128, towns_count: usize) -> Setup {
    let currency: Arc<dyn Currency> = Arc::new(CurrencyDescriptor::default());
    let players = Arc::new(InMemoryPlayerDirectory::new());
    for seed in 0..players_count {
        players.join(Uuid::from_u128(seed), format!("player{seed}"));
    }

    let settlements = Settlements::new();
    for i in 0..towns_count {
        settlements.found_town(format!("town{i}"));
    }

    let registry = Arc::new(ProviderRegistry::with_default(Arc::new(PlayerProvider::new(
        players.clone(),
    ))));
    registry.register(
        ProviderKey::TOWN,
        Arc::new(GroupProvider::new(ProviderKey::TOWN, Arc::new(settlements.towns()))),
    );

    let ledger = InMemoryLedgerStore::new(currency.clone());
    let economy = TransactionBridge::new(
        "bench",
        registry.clone(),
        Arc::new(ledger.clone()),
        currency,
        Arc::new(Messages::default()),
    );

    Setup {
        economy,
        registry,
        ledger,
        players,
    }
}

fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("holder_resolution");

    for size in [10usize, 100, 1000].iter() {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("player_by_uuid", size), size, |b, &size| {
            let s = setup(size as u128, size);
            let id = Uuid::from_u128(size as u128 / 2).to_string();
            b.iter(|| black_box(s.registry.resolve(black_box(&id))));
        });

        group.bench_with_input(BenchmarkId::new("town_by_name", size), size, |b, &size| {
            let s = setup(size as u128, size);
            let name = format!("town{}", size / 2);
            b.iter(|| black_box(s.registry.resolve(black_box(&name))));
        });
    }

    group.finish();
}

fn bench_deposits(c: &mut Criterion) {
    let mut group = c.benchmark_group("deposit");

    group.bench_function("bypass_town", |b| {
        let s = setup(10, 10);
        b.iter(|| black_box(s.economy.deposit(black_box("town3"), dec!(1.25))));
    });

    group.bench_function("standard_player", |b| {
        let s = setup(10, 10);
        let player = s.players.join(Uuid::from_u128(3), "player3");
        let holder = s.registry.resolve_player(&player).unwrap();
        s.ledger.open_account(&holder).unwrap();
        b.iter(|| black_box(s.economy.deposit(black_box("player3"), dec!(1.25))));
    });

    group.bench_function("unknown_account", |b| {
        let s = setup(10, 10);
        b.iter(|| black_box(s.economy.deposit(black_box("nobody"), dec!(1.25))));
    });

    group.finish();
}

criterion_group!(benches, bench_resolution, bench_deposits);
criterion_main!(benches);
