use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ck_core::{search, KickParameters, SearchConfig, SimulationConfig, Simulator};

fn bench_single_kick(c: &mut Criterion) {
    let simulator = Simulator::new(&SimulationConfig::default());
    let params = KickParameters::new(28.5, 17.0, 14.0, -95.0);

    c.bench_function("simulate_near_post_goal", |b| {
        b.iter(|| simulator.simulate(black_box(&params)).unwrap())
    });

    let miss = KickParameters::new(27.0, 20.0, 25.0, -95.0);
    c.bench_function("simulate_full_arc_miss", |b| {
        b.iter(|| simulator.simulate(black_box(&miss)).unwrap())
    });
}

fn bench_small_grid(c: &mut Criterion) {
    let simulation = SimulationConfig::default();
    let config = SearchConfig {
        resolution: [4, 4, 4, 2],
        ..SearchConfig::default()
    };

    c.bench_function("search_4x4x4x2_grid", |b| {
        b.iter(|| search(black_box(&simulation), black_box(&config)))
    });
}

criterion_group!(benches, bench_single_kick, bench_small_grid);
criterion_main!(benches);
