use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use difflens_engine::compute;
use difflens_types::{DiffOptions, Granularity};

fn source(lines: usize, salt: usize) -> String {
    (0..lines)
        .map(|i| {
            if i % 17 == salt % 17 {
                format!("let changed_{i}_{salt} = {};\n", i * salt)
            } else {
                format!("let value_{i} = compute({i});\n")
            }
        })
        .collect()
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    for lines in [100, 1_000, 10_000] {
        let left = source(lines, 1);
        let right = source(lines, 2);
        for granularity in [Granularity::Line, Granularity::Word] {
            let opts = DiffOptions::new(granularity);
            group.bench_with_input(
                BenchmarkId::new(granularity.as_str(), lines),
                &(&left, &right),
                |b, (l, r)| b.iter(|| compute(black_box(l), black_box(r), &opts)),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_compute);
criterion_main!(benches);
