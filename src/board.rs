//! Board representation and marks.
//!
//! A [`Board`] is 9 cells in row-major order, each either empty or holding a
//! [`Mark`]. The board checks single moves (range, occupancy) but does not
//! enforce alternating play; that is the job of the caller (see
//! [`crate::game::Game`]).

use std::fmt;
use std::str::FromStr;

use derive_more::{Display, Error};

use crate::constants::{CELLS, N};

/// A player's mark.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The other player's mark.
    #[inline]
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    /// Parse a mark from a single character (case-insensitive).
    pub fn from_char(c: char) -> Option<Mark> {
        match c.to_ascii_uppercase() {
            'X' => Some(Mark::X),
            'O' => Some(Mark::O),
            _ => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Mark {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Mark::from_char(c),
            _ => None,
        }
        .ok_or_else(|| BoardParseError::InvalidMark {
            input: s.to_string(),
        })
    }
}

/// Reason a move was rejected by the board.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Index is not one of 0..9
    #[display("Illegal move: cell {index} is off the board")]
    OutOfRange { index: usize },
    /// Cell already holds a mark
    #[display("Illegal move: cell {index} is not empty")]
    Occupied { index: usize },
}

/// Reason a board string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    #[display("expected 9 cells, got {len}")]
    WrongLength { len: usize },
    #[display("invalid cell character '{cell}'")]
    InvalidCell { cell: char },
    #[display("invalid mark \"{input}\" (expected X or O)")]
    InvalidMark { input: String },
}

/// A 3x3 tic-tac-toe board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Mark>; CELLS],
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Option<Mark>; CELLS]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Option<Mark>; CELLS] {
        &self.cells
    }

    /// Mark at `index`, or `None` if the cell is empty or off the board.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    /// Empty cell indices in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| i)
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&c| c == Some(mark)).count()
    }

    /// True if no mark has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// The mark whose turn it is: the side with fewer marks, X when counts are equal.
    pub fn side_to_move(&self) -> Mark {
        if self.count(Mark::X) <= self.count(Mark::O) {
            Mark::X
        } else {
            Mark::O
        }
    }

    /// Place `mark` at `index` after checking the cell is on the board and empty.
    pub fn play(&mut self, index: usize, mark: Mark) -> Result<(), MoveError> {
        match self.cells.get(index) {
            None => Err(MoveError::OutOfRange { index }),
            Some(Some(_)) => Err(MoveError::Occupied { index }),
            Some(None) => {
                self.cells[index] = Some(mark);
                Ok(())
            }
        }
    }

    /// Trial placement used by the search. The cell must be empty.
    #[inline]
    pub(crate) fn place(&mut self, index: usize, mark: Mark) {
        debug_assert!(self.cells[index].is_none());
        self.cells[index] = Some(mark);
    }

    /// Undo a trial placement.
    #[inline]
    pub(crate) fn clear(&mut self, index: usize) {
        self.cells[index] = None;
    }

    /// The board as 9 characters, `X`, `O` or `.` per cell.
    pub fn to_compact(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.map_or('.', Mark::as_char))
            .collect()
    }
}

impl From<[Option<Mark>; CELLS]> for Board {
    fn from(cells: [Option<Mark>; CELLS]) -> Self {
        Self::from_cells(cells)
    }
}

/// Parses 9 cell characters (`X`/`O`, `.`/`-`/`_`/space for empty).
/// Rows may be separated with `/`, e.g. `XX./.O./.O.`.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().filter(|&c| c != '/').collect();
        if chars.len() != CELLS {
            return Err(BoardParseError::WrongLength { len: chars.len() });
        }

        let mut board = Board::new();
        for (i, &c) in chars.iter().enumerate() {
            board.cells[i] = match c {
                '.' | '-' | '_' | ' ' => None,
                _ => Some(Mark::from_char(c).ok_or(BoardParseError::InvalidCell { cell: c })?),
            };
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..N {
            for col in 0..N {
                let ch = self.cells[row * N + col].map_or('.', Mark::as_char);
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
