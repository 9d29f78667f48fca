//! Board model for the 8-puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Board`: a validated 3x3 tile configuration, with solvability checking,
//!   neighbor generation and text rendering.
//! - `Move`: the four directions the blank can slide in.
//! - `GoalPositions`: the read-only lookup from tile value to its goal coordinates.
use crate::error::{Error, Result};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board (`BOARD_SIZE * BOARD_SIZE`).
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Tile value used for the blank cell.
pub const BLANK: u8 = 0;

/// The fixed goal configuration: blank in the top-left corner, tiles in ascending order.
pub const GOAL: [u8; CELL_COUNT] = [0, 1, 2, 3, 4, 5, 6, 7, 8];

/// Goal coordinates of every tile, derived from `GOAL`.
pub const GOAL_POSITIONS: GoalPositions = GoalPositions::from_goal(&GOAL);

/// One slide of the blank tile.
///
/// The blank exchanges places with the neighboring cell in the given direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves, in the order neighbors are generated.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Flat-index delta applied to the blank's position.
    pub fn offset(self) -> isize {
        match self {
            Move::Up => -(BOARD_SIZE as isize),
            Move::Down => BOARD_SIZE as isize,
            Move::Left => -1,
            Move::Right => 1,
        }
    }

    /// Returns `true` if the blank at `blank_index` can slide in this direction.
    pub fn is_legal_from(self, blank_index: usize) -> bool {
        let (row, col) = (blank_index / BOARD_SIZE, blank_index % BOARD_SIZE);
        match self {
            Move::Up => row > 0,
            Move::Down => row < BOARD_SIZE - 1,
            Move::Left => col > 0,
            Move::Right => col < BOARD_SIZE - 1,
        }
    }

    /// Recovers the move that turns `from` into `to`, if they are one slide apart.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::{Board, Move};
    /// let start = Board::new([1, 0, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    /// let goal = Board::goal();
    /// assert_eq!(Move::between(&start, &goal), Some(Move::Left));
    /// assert_eq!(Move::between(&goal, &goal), None);
    /// ```
    pub fn between(from: &Board, to: &Board) -> Option<Move> {
        Move::ALL
            .into_iter()
            .find(|&mv| from.apply_move(mv).as_ref() == Some(to))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        f.pad(s)
    }
}

/// Lookup table from tile value to its `(row, col)` in the goal configuration.
///
/// Built once from a goal layout and only read afterwards. The entry for the
/// blank is present but never consulted by the heuristics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoalPositions {
    positions: [(usize, usize); CELL_COUNT],
}

impl GoalPositions {
    /// Derives the table from a goal layout.
    ///
    /// `goal` must be a permutation of `0..=8`.
    pub const fn from_goal(goal: &[u8; CELL_COUNT]) -> Self {
        let mut positions = [(0, 0); CELL_COUNT];
        let mut index = 0;
        while index < CELL_COUNT {
            positions[goal[index] as usize] = (index / BOARD_SIZE, index % BOARD_SIZE);
            index += 1;
        }
        GoalPositions { positions }
    }

    /// Returns the goal `(row, col)` of `tile`.
    ///
    /// # Panics
    /// Panics if `tile` is not in `0..=8`.
    pub fn position(&self, tile: u8) -> (usize, usize) {
        self.positions[tile as usize]
    }
}

impl Default for GoalPositions {
    fn default() -> Self {
        GOAL_POSITIONS
    }
}

/// A 3x3 tile configuration stored row-major, `0` being the blank.
///
/// Every `Board` is a permutation of `0..=8`: all constructors either validate
/// their input or generate permutations. Boards are small `Copy` values and are
/// used directly as hash-map keys by the solver. Moves never modify a board in
/// place; they produce a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [u8; CELL_COUNT],
}

impl Board {
    /// Creates a board from its row-major cells.
    ///
    /// # Errors
    /// * `Error::TileOutOfRange` if a tile is greater than 8.
    /// * `Error::DuplicateTile` if a tile occurs twice.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::Board;
    /// assert!(Board::new([1, 2, 3, 4, 0, 6, 7, 5, 8]).is_ok());
    /// assert!(Board::new([1, 1, 3, 4, 0, 6, 7, 5, 8]).is_err());
    /// assert!(Board::new([9, 2, 3, 4, 0, 6, 7, 5, 8]).is_err());
    /// ```
    pub fn new(cells: [u8; CELL_COUNT]) -> Result<Self> {
        let mut seen = [false; CELL_COUNT];
        for (position, &tile) in cells.iter().enumerate() {
            if tile as usize >= CELL_COUNT {
                return Err(Error::TileOutOfRange { tile, position });
            }
            if seen[tile as usize] {
                return Err(Error::DuplicateTile { tile });
            }
            seen[tile as usize] = true;
        }
        Ok(Board { cells })
    }

    /// Returns the goal board.
    pub fn goal() -> Self {
        Board { cells: GOAL }
    }

    /// Generates a random solvable board.
    ///
    /// The tiles are shuffled and reshuffled until the permutation passes
    /// `is_solvable`. Exactly half of all permutations qualify, so this
    /// terminates quickly.
    pub fn random_solvable<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cells = GOAL;
        loop {
            cells.shuffle(rng);
            let board = Board { cells };
            if board.is_solvable() {
                return board;
            }
        }
    }

    /// Generates a random solvable board from a seed.
    ///
    /// The same seed always produces the same board.
    pub fn random_solvable_with_seed(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::random_solvable(&mut rng)
    }

    /// Returns the row-major cells.
    pub fn cells(&self) -> &[u8; CELL_COUNT] {
        &self.cells
    }

    /// Returns the tile at (`row`, `col`).
    ///
    /// # Panics
    /// Panics if `row` or `col` is outside `0..BOARD_SIZE`.
    pub fn tile(&self, row: usize, col: usize) -> u8 {
        assert!(row < BOARD_SIZE && col < BOARD_SIZE, "cell out of bounds");
        self.cells[row * BOARD_SIZE + col]
    }

    /// Returns the flat index of the blank.
    pub fn blank_index(&self) -> usize {
        self.cells
            .iter()
            .position(|&tile| tile == BLANK)
            .unwrap_or_else(|| unreachable!("a board always contains the blank"))
    }

    pub fn is_goal(&self) -> bool {
        self.cells == GOAL
    }

    /// See [`is_solvable`].
    pub fn is_solvable(&self) -> bool {
        is_solvable(self)
    }

    /// Slides the blank in direction `mv`.
    ///
    /// # Returns
    /// The resulting board, or `None` if the blank sits on the boundary the move
    /// would cross. `self` is never modified.
    pub fn apply_move(&self, mv: Move) -> Option<Board> {
        let blank = self.blank_index();
        if !mv.is_legal_from(blank) {
            return None;
        }
        let target = (blank as isize + mv.offset()) as usize;
        let mut cells = self.cells;
        cells.swap(blank, target);
        Some(Board { cells })
    }

    /// See [`neighbors`].
    pub fn neighbors(&self) -> Vec<Board> {
        neighbors(self)
    }
}

impl TryFrom<[u8; CELL_COUNT]> for Board {
    type Error = Error;

    fn try_from(cells: [u8; CELL_COUNT]) -> Result<Self> {
        Board::new(cells)
    }
}

impl TryFrom<&[u8]> for Board {
    type Error = Error;

    fn try_from(tiles: &[u8]) -> Result<Self> {
        let cells: [u8; CELL_COUNT] =
            tiles.try_into().map_err(|_| Error::InvalidBoardLength {
                expected: CELL_COUNT,
                got: tiles.len(),
            })?;
        Board::new(cells)
    }
}

impl fmt::Display for Board {
    /// Renders three rows of three cells, the blank shown as `_`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(BOARD_SIZE).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for (col, &tile) in chunk.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                if tile == BLANK {
                    write!(f, "_")?;
                } else {
                    write!(f, "{}", tile)?;
                }
            }
        }
        Ok(())
    }
}

/// Checks whether `board` can reach the goal by legal slides.
///
/// Counts the ordered pairs `(i, j)` with `i <= j`, `board[i] != 0` and
/// `board[i] <= board[j]`; the board is solvable iff that count is even. Over
/// the eight tiles this count equals `36 - inversions`, so it is the usual
/// inversion-parity test for an odd-width board.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::{is_solvable, Board};
/// assert!(is_solvable(&Board::goal()));
/// assert!(!is_solvable(&Board::new([1, 2, 3, 4, 5, 6, 8, 7, 0]).unwrap()));
/// ```
pub fn is_solvable(board: &Board) -> bool {
    let cells = board.cells();
    let mut count = 0;
    for (k, &tile) in cells.iter().enumerate() {
        if tile == BLANK {
            continue;
        }
        count += cells[k..].iter().filter(|&&later| tile <= later).count();
    }
    count % 2 == 0
}

/// Produces every board reachable from `board` with a single slide.
///
/// Boards are emitted in the order Up, Down, Left, Right, skipping moves that
/// would cross the boundary: 2 boards with the blank in a corner, 3 on an edge,
/// 4 in the center.
pub fn neighbors(board: &Board) -> Vec<Board> {
    Move::ALL
        .into_iter()
        .filter_map(|mv| board.apply_move(mv))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(cells: [u8; CELL_COUNT]) -> Board {
        Board::new(cells).unwrap()
    }

    #[test]
    fn test_new_accepts_permutation() {
        let b = board([8, 7, 6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(b.cells(), &[8, 7, 6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(b.blank_index(), 8);
    }

    #[test]
    fn test_new_rejects_out_of_range_tile() {
        let err = Board::new([0, 1, 2, 3, 4, 5, 6, 7, 9]).unwrap_err();
        assert!(matches!(err, Error::TileOutOfRange { tile: 9, position: 8 }));
    }

    #[test]
    fn test_new_rejects_duplicate_tile() {
        let err = Board::new([0, 1, 2, 3, 4, 5, 6, 7, 7]).unwrap_err();
        assert!(matches!(err, Error::DuplicateTile { tile: 7 }));
    }

    #[test]
    fn test_try_from_slice_checks_length() {
        let short: &[u8] = &[0, 1, 2];
        let err = Board::try_from(short).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidBoardLength {
                expected: 9,
                got: 3
            }
        ));

        let full: &[u8] = &GOAL;
        assert_eq!(Board::try_from(full).unwrap(), Board::goal());
    }

    #[test]
    fn test_goal_positions_table() {
        assert_eq!(GOAL_POSITIONS.position(1), (0, 1));
        assert_eq!(GOAL_POSITIONS.position(3), (1, 0));
        assert_eq!(GOAL_POSITIONS.position(5), (1, 2));
        assert_eq!(GOAL_POSITIONS.position(8), (2, 2));
        assert_eq!(GoalPositions::default(), GOAL_POSITIONS);
    }

    #[test]
    fn test_tile_accessor() {
        let b = board([1, 2, 3, 4, 0, 6, 7, 5, 8]);
        assert_eq!(b.tile(0, 0), 1);
        assert_eq!(b.tile(1, 1), 0);
        assert_eq!(b.tile(2, 1), 5);
    }

    #[test]
    fn test_is_solvable_goal_and_single_swap() {
        assert!(is_solvable(&Board::goal()));
        assert!(is_solvable(&board([1, 2, 3, 4, 0, 6, 7, 5, 8])));
        // One transposition of two tiles flips the parity.
        assert!(!is_solvable(&board([1, 2, 3, 4, 5, 6, 8, 7, 0])));
        assert!(!is_solvable(&board([0, 2, 1, 3, 4, 5, 6, 7, 8])));
    }

    #[test]
    fn test_is_solvable_preserved_by_moves() {
        let start = board([1, 2, 3, 4, 0, 6, 7, 5, 8]);
        for next in neighbors(&start) {
            assert!(next.is_solvable());
        }
    }

    #[test]
    fn test_neighbors_corner_edge_center() {
        // Corner.
        assert_eq!(neighbors(&Board::goal()).len(), 2);
        // Edge (blank at index 1).
        assert_eq!(neighbors(&board([1, 0, 2, 3, 4, 5, 6, 7, 8])).len(), 3);
        // Center.
        assert_eq!(neighbors(&board([1, 2, 3, 4, 0, 6, 7, 5, 8])).len(), 4);
    }

    #[test]
    fn test_neighbors_order_and_content() {
        let start = board([1, 2, 3, 4, 0, 6, 7, 5, 8]);
        let next = neighbors(&start);
        assert_eq!(
            next,
            vec![
                board([1, 0, 3, 4, 2, 6, 7, 5, 8]), // Up
                board([1, 2, 3, 4, 5, 6, 7, 0, 8]), // Down
                board([1, 2, 3, 0, 4, 6, 7, 5, 8]), // Left
                board([1, 2, 3, 4, 6, 0, 7, 5, 8]), // Right
            ]
        );
        assert!(!next.contains(&start));
        assert_eq!(start.cells(), &[1, 2, 3, 4, 0, 6, 7, 5, 8]);
    }

    #[test]
    fn test_apply_move_boundaries() {
        let goal = Board::goal();
        assert_eq!(goal.apply_move(Move::Up), None);
        assert_eq!(goal.apply_move(Move::Left), None);
        assert_eq!(
            goal.apply_move(Move::Down),
            Some(board([3, 1, 2, 0, 4, 5, 6, 7, 8]))
        );
        assert_eq!(
            goal.apply_move(Move::Right),
            Some(board([1, 0, 2, 3, 4, 5, 6, 7, 8]))
        );

        let bottom_right = board([1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(bottom_right.apply_move(Move::Down), None);
        assert_eq!(bottom_right.apply_move(Move::Right), None);
    }

    #[test]
    fn test_move_between() {
        let start = board([1, 2, 3, 4, 0, 6, 7, 5, 8]);
        for mv in Move::ALL {
            let next = start.apply_move(mv).unwrap();
            assert_eq!(Move::between(&start, &next), Some(mv));
        }
        assert_eq!(Move::between(&start, &Board::goal()), None);
    }

    #[test]
    fn test_display_board_formatting() {
        let b = board([1, 2, 3, 4, 0, 6, 7, 5, 8]);
        assert_eq!(b.to_string(), "1 2 3\n4 _ 6\n7 5 8");
        assert_eq!(Board::goal().to_string(), "_ 1 2\n3 4 5\n6 7 8");
    }

    #[test]
    fn test_random_solvable_with_seed_determinism() {
        let a = Board::random_solvable_with_seed(42);
        let b = Board::random_solvable_with_seed(42);
        assert_eq!(a, b);
        assert!(a.is_solvable());

        let boards: Vec<Board> = (0..20).map(Board::random_solvable_with_seed).collect();
        assert!(boards.iter().all(Board::is_solvable));
        // Twenty seeds producing one single board would mean the seed is ignored.
        assert!(boards.iter().any(|b| *b != boards[0]));
    }
}
