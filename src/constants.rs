//! Constants for board geometry, scoring, and front-end defaults.
//!
//! The board is a 3x3 grid stored as a flat array of 9 cells in row-major
//! order:
//!
//! ```text
//!  0 | 1 | 2
//! ---+---+---
//!  3 | 4 | 5
//! ---+---+---
//!  6 | 7 | 8
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 3;

/// Total number of cells on the board.
pub const CELLS: usize = N * N;

/// A line of three cell indices that wins when uniformly occupied.
pub type Line = [usize; 3];

/// The 8 win-lines, checked in this order: rows, columns, diagonals.
pub const WIN_LINES: [Line; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

// =============================================================================
// Search Scores
// =============================================================================

/// Score of a computer win found at depth 0. Deeper wins score `WIN_SCORE - depth`.
pub const WIN_SCORE: i32 = 10;

/// Score of a drawn position.
pub const DRAW_SCORE: i32 = 0;

// =============================================================================
// Front-end Defaults
// =============================================================================

/// Pause before the computer plays in the interactive game, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 500;

/// Number of games played by `selfplay` when not given.
pub const DEFAULT_SELFPLAY_GAMES: usize = 100;

/// Seed used by `selfplay` when not given.
pub const DEFAULT_SEED: u64 = 1;
