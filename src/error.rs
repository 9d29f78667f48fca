//! Error types for the 8-puzzle solver.

use crate::engine::Board;
use thiserror::Error;

/// Main error type for the crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board length: expected {expected} tiles, got {got}")]
    InvalidBoardLength { expected: usize, got: usize },

    #[error("tile {tile} at position {position} is out of range (expected 0..=8)")]
    TileOutOfRange { tile: u8, position: usize },

    #[error("tile {tile} appears more than once")]
    DuplicateTile { tile: u8 },

    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("unknown heuristic '{name}' (expected 'hamming' or 'manhattan')")]
    UnknownHeuristic { name: String },

    #[error("board is not solvable:\n{board}")]
    Unsolvable { board: Board },

    #[error("{heuristic} search found no path for board:\n{board}")]
    Unsolved {
        board: Board,
        heuristic: &'static str,
    },

    #[error(
        "heuristics disagree on the optimal move count (hamming={hamming}, manhattan={manhattan}) for board:\n{board}"
    )]
    InconsistentMoveCount {
        board: Board,
        hamming: usize,
        manhattan: usize,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
