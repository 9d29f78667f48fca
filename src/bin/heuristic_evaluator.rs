use anyhow::{Context, Result};
use clap::Parser;
use eight_puzzle_solver::comparison::{compare_heuristics_with, ComparisonConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compares the Hamming and Manhattan heuristics on random boards", long_about = None)]
struct Args {
    /// Number of random solvable boards to solve
    #[arg(short, long, default_value_t = 5)]
    runs: usize,

    /// Seed of the random board generator
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = ComparisonConfig {
        runs: args.runs,
        seed: args.seed,
    };

    println!("Starting heuristic comparison for {} boards (seed {})...", config.runs, config.seed);

    let report = compare_heuristics_with(&config, |run_index, results| {
        println!("\nRunning test {}/{}...", run_index + 1, config.runs);
        for result in results {
            println!(
                "  Heuristic: {:<10} Moves: {:<4} Expanded: {:<8} Time: {:.4}s",
                result.kind,
                result.moves,
                result.expanded,
                result.elapsed.as_secs_f64()
            );
        }
    })
    .context("Heuristic comparison failed")?;

    println!("\n--- Average Results (over {} runs) ---", config.runs);
    for stats in &report.per_heuristic {
        println!(
            "{:<10} -> Avg Time: {:.4}s | Avg Nodes: {:.1} | Avg Moves: {:.1}",
            stats.kind,
            stats.average_time().as_secs_f64(),
            stats.average_expanded(),
            stats.average_moves()
        );
    }

    Ok(())
}
