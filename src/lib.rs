//! # 8-Puzzle Solver Library
//!
//! This library provides the board model for the classical 8-puzzle (3x3
//! sliding tiles) and an A* solver that finds optimal move sequences.
//!
//! It is used by two binaries:
//! - `puzzle_solver`: Takes a board (inline, from a file, or random from a seed)
//!   and a heuristic name, then prints the optimal sequence of slides.
//! - `heuristic_evaluator`: Solves a series of random boards with both
//!   heuristics and reports average time and expansion counts.
//!
//! ## Modules
//! - `engine`: The board representation (`Board`), moves (`Move`), the goal
//!   configuration, solvability checking and neighbor generation.
//! - `heuristics`: The `Heuristic` trait and the Hamming and Manhattan estimators.
//! - `solver`: A* search (`a_star`) and path reconstruction.
//! - `comparison`: The heuristic comparison harness.
//! - `utils`: Parsing boards from text and files.
//! - `error`: The crate's `Error` type.

pub mod comparison;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod utils;

pub use error::{Error, Result};
