//! Benchmarks for the scenario generator and loss reduction

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mcvar_risk::{portfolio_losses, var_es, ReturnSeries, ScenarioGenerator};

fn synthetic_series(count: usize, observations: usize) -> Vec<ReturnSeries> {
    (0..count)
        .map(|j| ReturnSeries {
            instrument: format!("SYN{j}"),
            log_returns: (0..observations)
                .map(|i| 0.0005 + 0.01 * ((i * (j + 1)) as f64).sin())
                .collect(),
            last_price: 100.0 + j as f64,
            last_ts: 0,
        })
        .collect()
}

fn bench_scenario_generation(c: &mut Criterion) {
    let series = synthetic_series(10, 60);
    let generator = ScenarioGenerator::new(1000, 0);

    c.bench_function("generate_1000x10", |b| {
        b.iter(|| generator.generate(black_box(&series)).unwrap())
    });
}

fn bench_loss_reduction(c: &mut Criterion) {
    let series = synthetic_series(10, 60);
    let scenarios = ScenarioGenerator::new(1000, 0).generate(&series).unwrap();
    let prices: Vec<f64> = series.iter().map(|s| s.last_price).collect();
    let shares = vec![10.0; series.len()];

    c.bench_function("losses_and_var_es", |b| {
        b.iter(|| {
            let losses =
                portfolio_losses(black_box(&scenarios), &prices, &shares).unwrap();
            var_es(&losses, 0.95).unwrap()
        })
    });
}

criterion_group!(benches, bench_scenario_generation, bench_loss_reduction);
criterion_main!(benches);
