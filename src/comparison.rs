//! Side-by-side comparison of the heuristics over random solvable boards.
//!
//! Each run draws one board from a seeded RNG and solves it with every
//! heuristic, accumulating wall time, expansions and path length.
use crate::engine::Board;
use crate::error::{Error, Result};
use crate::heuristics::{Heuristic, HeuristicKind};
use crate::solver::{a_star, SearchOutcome};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Parameters of a comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComparisonConfig {
    /// Number of random boards to solve.
    pub runs: usize,
    /// Seed of the board generator.
    pub seed: u64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        ComparisonConfig { runs: 5, seed: 0 }
    }
}

/// Measurements for one heuristic on one board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunResult {
    pub kind: HeuristicKind,
    pub elapsed: Duration,
    pub expanded: usize,
    pub moves: usize,
}

/// Totals for one heuristic across all runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeuristicStats {
    pub kind: HeuristicKind,
    pub total_time: Duration,
    pub total_expanded: usize,
    pub total_moves: usize,
    pub runs: usize,
}

impl HeuristicStats {
    fn new(kind: HeuristicKind) -> Self {
        HeuristicStats {
            kind,
            total_time: Duration::ZERO,
            total_expanded: 0,
            total_moves: 0,
            runs: 0,
        }
    }

    fn record(&mut self, result: &RunResult) {
        self.total_time += result.elapsed;
        self.total_expanded += result.expanded;
        self.total_moves += result.moves;
        self.runs += 1;
    }

    pub fn average_time(&self) -> Duration {
        if self.runs == 0 {
            return Duration::ZERO;
        }
        self.total_time / self.runs as u32
    }

    pub fn average_expanded(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.total_expanded as f64 / self.runs as f64
    }

    pub fn average_moves(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.total_moves as f64 / self.runs as f64
    }
}

/// Outcome of a whole comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonReport {
    /// Boards that were solved, in run order.
    pub boards: Vec<Board>,
    /// Per-run measurements, one inner vector per board in `HeuristicKind::ALL` order.
    pub runs: Vec<Vec<RunResult>>,
    /// Totals per heuristic, in `HeuristicKind::ALL` order.
    pub per_heuristic: Vec<HeuristicStats>,
}

impl ComparisonReport {
    pub fn stats(&self, kind: HeuristicKind) -> Option<&HeuristicStats> {
        self.per_heuristic.iter().find(|stats| stats.kind == kind)
    }
}

/// Solves `board` with one heuristic and times it.
///
/// # Errors
/// `Error::Unsolved` if the search does not return a path.
pub fn measure(board: &Board, kind: HeuristicKind) -> Result<RunResult> {
    let started = Instant::now();
    let outcome = a_star(board, &kind);
    let elapsed = started.elapsed();

    match outcome {
        SearchOutcome::Found(solution) => Ok(RunResult {
            kind,
            elapsed,
            expanded: solution.expanded,
            moves: solution.moves(),
        }),
        SearchOutcome::NotFound { .. } | SearchOutcome::LimitReached { .. } => {
            Err(Error::Unsolved {
                board: *board,
                heuristic: kind.name(),
            })
        }
    }
}

/// Runs the comparison described by `config`.
///
/// Every board is solved with each heuristic; both must agree on the optimal
/// move count.
///
/// # Errors
/// * `Error::InvalidConfiguration` if `config.runs` is zero.
/// * `Error::Unsolved` if a search fails.
/// * `Error::InconsistentMoveCount` if the heuristics disagree on a board.
pub fn compare_heuristics(config: &ComparisonConfig) -> Result<ComparisonReport> {
    compare_heuristics_with(config, |_, _| {})
}

/// Like [`compare_heuristics`], calling `on_run` after each board with its run
/// index and measurements.
pub fn compare_heuristics_with<F>(
    config: &ComparisonConfig,
    mut on_run: F,
) -> Result<ComparisonReport>
where
    F: FnMut(usize, &[RunResult]),
{
    if config.runs == 0 {
        return Err(Error::InvalidConfiguration {
            message: "at least one run is required".to_string(),
        });
    }

    info!(runs = config.runs, seed = config.seed, "comparing heuristics");
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut per_heuristic: Vec<HeuristicStats> =
        HeuristicKind::ALL.into_iter().map(HeuristicStats::new).collect();
    let mut boards = Vec::with_capacity(config.runs);
    let mut runs = Vec::with_capacity(config.runs);

    for run_index in 0..config.runs {
        let board = Board::random_solvable(&mut rng);
        debug!(run = run_index, board = ?board.cells(), "solving board");

        let results = HeuristicKind::ALL
            .into_iter()
            .map(|kind| measure(&board, kind))
            .collect::<Result<Vec<_>>>()?;

        check_consistent(&board, &results)?;
        for (stats, result) in per_heuristic.iter_mut().zip(&results) {
            stats.record(result);
        }
        on_run(run_index, &results);

        boards.push(board);
        runs.push(results);
    }

    Ok(ComparisonReport {
        boards,
        runs,
        per_heuristic,
    })
}

fn check_consistent(board: &Board, results: &[RunResult]) -> Result<()> {
    let moves_of = |kind: HeuristicKind| {
        results
            .iter()
            .find(|result| result.kind == kind)
            .map_or(0, |result| result.moves)
    };
    let hamming = moves_of(HeuristicKind::Hamming);
    let manhattan = moves_of(HeuristicKind::Manhattan);
    if hamming != manhattan {
        return Err(Error::InconsistentMoveCount {
            board: *board,
            hamming,
            manhattan,
        });
    }
    Ok(())
}
