use crate::engine::{Board, GoalPositions, BLANK, BOARD_SIZE, GOAL};
use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// A distance estimate from a board to the goal.
///
/// The solver is generic over this trait. An implementation must never
/// overestimate the number of moves left (admissible) and must not drop by more
/// than one across a single move (consistent); otherwise A* loses its
/// optimality guarantee.
pub trait Heuristic {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Estimated number of moves from `board` to the goal.
    fn estimate(&self, board: &Board) -> u32;
}

impl<F> Heuristic for F
where
    F: Fn(&Board) -> u32,
{
    fn name(&self) -> &'static str {
        "custom"
    }

    fn estimate(&self, board: &Board) -> u32 {
        self(board)
    }
}

/// Counts the non-blank tiles that are not on their goal cell.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::heuristics::hamming;
/// assert_eq!(hamming(&Board::goal()), 0);
/// assert_eq!(hamming(&Board::new([1, 0, 2, 3, 4, 5, 6, 7, 8]).unwrap()), 1);
/// ```
pub fn hamming(board: &Board) -> u32 {
    board
        .cells()
        .iter()
        .zip(GOAL.iter())
        .filter(|&(&tile, &goal)| tile != BLANK && tile != goal)
        .count() as u32
}

/// Sums, over the non-blank tiles, the row and column distance to their goal cell.
///
/// Goal coordinates come from `goal_positions`.
pub fn manhattan_with(board: &Board, goal_positions: &GoalPositions) -> u32 {
    let mut distance = 0;
    for (index, &tile) in board.cells().iter().enumerate() {
        if tile == BLANK {
            continue;
        }
        let (row, col) = (index / BOARD_SIZE, index % BOARD_SIZE);
        let (goal_row, goal_col) = goal_positions.position(tile);
        distance += row.abs_diff(goal_row) + col.abs_diff(goal_col);
    }
    distance as u32
}

/// Manhattan distance against the standard goal.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::heuristics::manhattan;
/// assert_eq!(manhattan(&Board::goal()), 0);
/// // Tile 8 sits two rows and two columns away from its goal cell; tile 0 is ignored.
/// assert_eq!(manhattan(&Board::new([8, 1, 2, 3, 4, 5, 6, 7, 0]).unwrap()), 4);
/// ```
pub fn manhattan(board: &Board) -> u32 {
    manhattan_with(board, &GoalPositions::default())
}

/// Misplaced-tile heuristic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hamming;

impl Heuristic for Hamming {
    fn name(&self) -> &'static str {
        "hamming"
    }

    fn estimate(&self, board: &Board) -> u32 {
        hamming(board)
    }
}

/// Manhattan-distance heuristic over an explicit goal position table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Manhattan {
    goal_positions: GoalPositions,
}

impl Manhattan {
    pub fn new(goal_positions: GoalPositions) -> Self {
        Manhattan { goal_positions }
    }
}

impl Heuristic for Manhattan {
    fn name(&self) -> &'static str {
        "manhattan"
    }

    fn estimate(&self, board: &Board) -> u32 {
        manhattan_with(board, &self.goal_positions)
    }
}

/// Name-selectable heuristic, used at the CLI and harness boundary.
///
/// Parsing accepts exactly `"hamming"` and `"manhattan"`; anything else is an
/// `Error::UnknownHeuristic` rather than a silent default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeuristicKind {
    Hamming,
    Manhattan,
}

impl HeuristicKind {
    /// Every selectable heuristic, in report order.
    pub const ALL: [HeuristicKind; 2] = [HeuristicKind::Hamming, HeuristicKind::Manhattan];

    pub fn as_str(self) -> &'static str {
        match self {
            HeuristicKind::Hamming => "hamming",
            HeuristicKind::Manhattan => "manhattan",
        }
    }
}

impl Heuristic for HeuristicKind {
    fn name(&self) -> &'static str {
        self.as_str()
    }

    fn estimate(&self, board: &Board) -> u32 {
        match self {
            HeuristicKind::Hamming => Hamming.estimate(board),
            HeuristicKind::Manhattan => Manhattan::default().estimate(board),
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hamming" => Ok(HeuristicKind::Hamming),
            "manhattan" => Ok(HeuristicKind::Manhattan),
            _ => Err(Error::UnknownHeuristic {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
