use criterion::{black_box, criterion_group, criterion_main, Criterion};
use taipan_engine::{Commodity, GameConfig, GameEngine, Port, StartingOption};

fn bench_trade_loop(c: &mut Criterion) {
    let route = [Port::Shanghai, Port::Saigon, Port::Batavia, Port::HongKong];
    c.bench_function("trade loop 4 ports", |b| {
        b.iter(|| {
            let mut engine =
                GameEngine::new_game("Bench", StartingOption::Cash, GameConfig::default())
                    .expect("default config is valid");
            for port in route {
                let _ = engine.buy(Commodity::General, 20);
                let _ = engine.travel_to(port);
                let _ = engine.sell(Commodity::General, 20);
            }
            black_box(engine.net_worth())
        })
    });
}

fn bench_price_list(c: &mut Criterion) {
    let mut engine = GameEngine::new_game("Bench", StartingOption::Cash, GameConfig::default())
        .expect("default config is valid");
    c.bench_function("price list", |b| {
        b.iter(|| black_box(engine.price_list()))
    });
}

criterion_group!(benches, bench_trade_loop, bench_price_list);
criterion_main!(benches);
