use anyhow::{Context, Result};
use clap::Parser;
use interval_search_tree::{InsertOutcome, Interval, IntervalSearchTree};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "itree-demo",
    about = "Fill an interval search tree with random intervals and report its shape"
)]
struct Cli {
    /// Number of random intervals to insert.
    #[arg(long, default_value_t = 10)]
    count: usize,

    /// Exclusive upper bound of the generated lower bounds.
    #[arg(long, default_value_t = 100)]
    max_low: u32,

    /// Exclusive upper bound of the generated interval spans.
    #[arg(long, default_value_t = 50)]
    max_span: u32,

    /// Number of random overlap queries to run after the removal.
    #[arg(long, default_value_t = 0)]
    queries: usize,

    /// Seed for both the interval generator and the tree, for reproducible
    /// runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Rotate every new interval up to the root instead of inserting it as a
    /// leaf.
    #[arg(long)]
    root_insert: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.max_low > 0, "--max-low must be greater than zero");
    anyhow::ensure!(cli.max_span > 0, "--max-span must be greater than zero");

    let (mut rng, mut t) = match cli.seed {
        Some(seed) => (
            StdRng::seed_from_u64(seed),
            IntervalSearchTree::with_seed(seed.wrapping_add(1)),
        ),
        None => (StdRng::from_entropy(), IntervalSearchTree::new()),
    };

    for i in 0..cli.count {
        let interval = random_interval(&mut rng, cli.max_low, cli.max_span)?;
        println!("{interval}");

        let outcome = if cli.root_insert {
            t.insert_at_root(interval, i.to_string())
        } else {
            t.put(interval, i.to_string())
        };
        if outcome.is_duplicate() {
            println!("duplicate interval {interval}");
        }
    }

    let fixed = Interval::new(89, 123).context("invalid fixed interval")?;
    insert_then_remove(&mut t, fixed, cli.count.to_string());

    for _ in 0..cli.queries {
        let query = random_interval(&mut rng, cli.max_low, cli.max_span)?;
        println!("{query}:");
        for (interval, label) in t.overlaps(&query) {
            println!("  {interval} ({label})");
        }
    }

    Ok(())
}

/// Insert `fixed` and report the shape of the tree, then remove it again and
/// report once more.
///
/// A random interval equal to `fixed` is left in place.
fn insert_then_remove(
    t: &mut IntervalSearchTree<u32, String>,
    fixed: Interval<u32>,
    label: String,
) {
    if let InsertOutcome::Duplicate(_) = t.put(fixed, label) {
        println!("duplicate interval {fixed}, keeping the existing one");
        report(t);
        return;
    }
    report(t);

    let removed = t.remove(&fixed);
    info!(?removed, "removed {fixed}");
    report(t);
}

fn random_interval(rng: &mut StdRng, max_low: u32, max_span: u32) -> Result<Interval<u32>> {
    let low = rng.gen_range(0..max_low);
    interval_from(low, rng.gen_range(0..max_span))
}

fn interval_from(low: u32, span: u32) -> Result<Interval<u32>> {
    let high = low
        .checked_add(span)
        .with_context(|| format!("interval [{low}, {low} + {span}] overflows u32"))?;

    Interval::new(low, high).with_context(|| format!("invalid interval [{low}, {high}]"))
}

fn report(t: &IntervalSearchTree<u32, String>) {
    println!("height:  {}", t.height());
    println!("size:  {}", t.size());
    println!("integrity check: {}", t.check());
    println!();
}
