use std::hint::black_box;

use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};
use interval_search_tree::{Interval, IntervalSearchTree};

use crate::Lfsr;

#[derive(Debug)]
struct BenchName {
    bench_name: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.bench_name), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("search");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    // Generate the tree.
    let mut rand = Lfsr::default();
    let mut t = IntervalSearchTree::with_seed(42);

    for _i in 0..n_values {
        let _ = t.put(rand.next_interval(), 42_usize);
    }

    bench_search(n_values, g, &t);
    bench_search_all(n_values, g, &t);
    bench_overlaps(n_values, g, &t);
}

fn bench_search<M>(n_values: usize, g: &mut BenchmarkGroup<M>, t: &IntervalSearchTree<u16, usize>)
where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name: "search",
    };
    let query = Interval::new(42, 100).unwrap();

    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter(|| black_box(t.search(black_box(&query))))
    });
}

macro_rules! iter_bench {
    (
        $name:ident
    ) => {
        paste::paste! {
            fn [<bench_ $name>]<M>(n_values: usize, g: &mut BenchmarkGroup<M>, t: &IntervalSearchTree<u16, usize>)
            where
                M: Measurement,
            {
                let bench_name = BenchName {
                    n_values,
                    bench_name: stringify!($name),
                };
                let query = Interval::new(42, 100).unwrap();

                g.throughput(Throughput::Elements(n_values as _));
                // Values per second
                g.bench_function(BenchmarkId::from(bench_name), |b| {
                    b.iter(|| {
                        let iter = t.$name(&query);
                        for v in iter {
                            black_box(v);
                        }
                    })
                });
            }
        }
    }
}

iter_bench!(search_all);
iter_bench!(overlaps);
