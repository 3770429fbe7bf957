//! Benchmarks for buy sizing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use daytrade_risk::{CommissionSchedule, PositionSizer};
use rust_decimal_macros::dec;

fn benchmark_max_affordable(c: &mut Criterion) {
    let mut group = c.benchmark_group("max_affordable_shares");
    let sizer = PositionSizer::new(CommissionSchedule::default());

    for balance in [dec!(10000), dec!(1000000), dec!(100000000)].iter() {
        group.bench_with_input(BenchmarkId::new("price_12.34", balance), balance, |b, balance| {
            b.iter(|| sizer.max_affordable_shares(black_box(dec!(12.34)), black_box(*balance)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_max_affordable);
criterion_main!(benches);
