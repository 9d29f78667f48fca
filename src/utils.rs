use crate::engine::{Board, BLANK, CELL_COUNT};
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Parses a board from text.
///
/// Every tile is a single character, read in row-major order:
/// - `'0'..='8'`: the tile with that value (`'0'` is the blank),
/// - `'_'` or `'.'`: the blank, matching how boards are displayed.
///
/// Whitespace (including newlines) and commas are separators and are skipped,
/// so a packed string, a comma list and a three-line grid all parse.
///
/// # Returns
/// * `Ok(Board)` if exactly nine tiles forming a permutation of `0..=8` were read.
/// * `Err(Error::InvalidCharacter)` on any other character.
/// * `Err(Error::InvalidBoardLength)` if the tile count is not nine.
/// * `Err(Error::TileOutOfRange)` / `Err(Error::DuplicateTile)` from board validation.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::utils::board_from_str;
///
/// let packed = board_from_str("123405678").unwrap();
/// let listed = board_from_str("1, 2, 3, 4, 0, 5, 6, 7, 8").unwrap();
/// let grid = board_from_str("1 2 3\n4 _ 5\n6 7 8").unwrap();
/// assert_eq!(packed, listed);
/// assert_eq!(packed, grid);
///
/// assert!(board_from_str("12340567").is_err());
/// assert!(board_from_str("12340567x").is_err());
/// ```
pub fn board_from_str(s: &str) -> Result<Board> {
    let mut tiles = Vec::with_capacity(CELL_COUNT);

    for (position, character) in s.chars().enumerate() {
        if character.is_whitespace() || character == ',' {
            continue;
        }
        let tile = match character {
            '_' | '.' => BLANK,
            // Digits are parsed as tiles even above 8 so validation can name them.
            '0'..='9' => character as u8 - b'0',
            _ => {
                return Err(Error::InvalidCharacter {
                    character,
                    position,
                })
            }
        };
        tiles.push(tile);
    }

    Board::try_from(tiles.as_slice())
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        board_from_str(s)
    }
}

/// Reads a board from a text file, in any format accepted by [`board_from_str`].
pub fn read_board_file(path: &Path) -> Result<Board> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        operation: format!("read board file {}", path.display()),
        source,
    })?;
    board_from_str(&content)
}
