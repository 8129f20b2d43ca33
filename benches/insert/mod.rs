use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};
use interval_search_tree::IntervalSearchTree;

use crate::Lfsr;

#[derive(Debug, Clone, Copy)]
struct BenchName {
    strategy: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.strategy), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("insert");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

/// Measure the time needed to insert `n_values` number of randomly generated
/// intervals into an empty tree, as leaves and at the root.
fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let bench_name = BenchName {
        strategy: "put",
        n_values,
    };
    g.throughput(Throughput::Elements(n_values as _)); // Keys inserted per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || (IntervalSearchTree::with_seed(42), Lfsr::default()),
            |(mut t, mut rand)| {
                for _i in 0..n_values {
                    let _ = t.put(rand.next_interval(), 42_usize);
                }
                t
            },
            criterion::BatchSize::PerIteration,
        );
    });

    let bench_name = BenchName {
        strategy: "insert_at_root",
        n_values,
    };
    g.throughput(Throughput::Elements(n_values as _));
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || (IntervalSearchTree::with_seed(42), Lfsr::default()),
            |(mut t, mut rand)| {
                for _i in 0..n_values {
                    let _ = t.insert_at_root(rand.next_interval(), 42_usize);
                }
                t
            },
            criterion::BatchSize::PerIteration,
        );
    });
}
