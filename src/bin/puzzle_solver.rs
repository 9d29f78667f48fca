use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser};
use eight_puzzle_solver::engine::{is_solvable, Board};
use eight_puzzle_solver::heuristics::HeuristicKind;
use eight_puzzle_solver::solver::{a_star_with_config, SearchConfig, SearchOutcome};
use eight_puzzle_solver::utils::{board_from_str, read_board_file};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Solves an 8-puzzle board optimally with A*", long_about = None)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["board", "board_file", "seed"]),
))]
struct Args {
    /// Board tiles in row-major order, e.g. "1 2 3 4 _ 6 7 5 8" (0 or _ is the blank)
    #[arg(short, long)]
    board: Option<String>,

    /// Path to a file holding the board (3x3 grid or a single line)
    #[arg(short = 'f', long)]
    board_file: Option<PathBuf>,

    /// Solve a random solvable board generated from this seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Heuristic guiding the search: hamming or manhattan
    #[arg(short = 'H', long, default_value = "manhattan")]
    heuristic: HeuristicKind,

    /// Give up after expanding this many boards
    #[arg(short, long)]
    max_expansions: Option<usize>,

    /// Only print the summary, not every step
    #[arg(short, long)]
    quiet: bool,
}

fn load_board(args: &Args) -> Result<Board> {
    if let Some(tiles) = &args.board {
        return board_from_str(tiles).with_context(|| format!("Invalid board '{}'", tiles));
    }
    if let Some(path) = &args.board_file {
        return read_board_file(path)
            .with_context(|| format!("Failed to load board from {}", path.display()));
    }
    match args.seed {
        Some(seed) => Ok(Board::random_solvable_with_seed(seed)),
        None => bail!("One of --board, --board-file or --seed is required"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let start = load_board(&args)?;

    println!("Initial board state:\n{}\n", start);
    if !is_solvable(&start) {
        bail!("This board cannot reach the goal, refusing to search.");
    }

    let config = SearchConfig {
        max_expansions: args.max_expansions,
    };
    println!("Searching with the {} heuristic...\n", args.heuristic);

    match a_star_with_config(&start, &args.heuristic, &config) {
        SearchOutcome::Found(solution) => {
            println!("Solution found!");
            println!("Number of moves: {}", solution.moves());
            println!("Expanded boards: {}", solution.expanded);

            if !args.quiet {
                let directions = solution.directions();
                for (step, board) in solution.path.iter().enumerate() {
                    match step.checked_sub(1).map(|i| directions[i]) {
                        Some(direction) => println!("\nStep {} ({}):", step, direction),
                        None => println!("\nStep {}:", step),
                    }
                    println!("{}", board);
                }
            }
        }
        SearchOutcome::NotFound { expanded } => {
            bail!("No solution could be found after expanding {} boards.", expanded);
        }
        SearchOutcome::LimitReached { expanded } => {
            bail!("Gave up after expanding {} boards without reaching the goal.", expanded);
        }
    }

    Ok(())
}
