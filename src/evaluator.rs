//! Terminal-state detection.
//!
//! All queries are pure functions over a [`Board`]. Win-lines are checked in
//! the fixed order of [`WIN_LINES`] (rows, columns, diagonals); if more than
//! one line is complete the first one in that order decides the result.

use std::fmt;

use crate::board::{Board, Mark};
use crate::constants::{Line, WIN_LINES};

/// Outcome of a position as seen by the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// No line is complete and at least one cell is empty.
    InProgress,
    /// `mark` occupies every cell of `line`.
    Won { mark: Mark, line: Line },
    /// Every cell is filled and no line is complete.
    Draw,
}

impl Status {
    #[inline]
    pub fn is_over(&self) -> bool {
        !matches!(self, Status::InProgress)
    }
}

/// Find the first complete win-line, returning it with its owner.
fn first_complete_line(board: &Board) -> Option<(Mark, Line)> {
    WIN_LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        let mark = board.get(a)?;
        (board.get(b) == Some(mark) && board.get(c) == Some(mark)).then_some((mark, line))
    })
}

/// The mark occupying a complete win-line, if any.
pub fn winner(board: &Board) -> Option<Mark> {
    first_complete_line(board).map(|(mark, _)| mark)
}

/// The complete win-line itself, for highlighting.
pub fn winning_line(board: &Board) -> Option<Line> {
    first_complete_line(board).map(|(_, line)| line)
}

/// True iff no cell is empty.
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(Option::is_some)
}

/// Classify the position. A completed line wins even on a full board.
pub fn status(board: &Board) -> Status {
    match first_complete_line(board) {
        Some((mark, line)) => Status::Won { mark, line },
        None if is_full(board) => Status::Draw,
        None => Status::InProgress,
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::InProgress => write!(f, "in progress"),
            Status::Won { mark, .. } => write!(f, "{mark} wins"),
            Status::Draw => write!(f, "draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_board() {
        let b = Board::new();
        assert_eq!(winner(&b), None);
        assert_eq!(winning_line(&b), None);
        assert!(!is_full(&b));
        assert_eq!(status(&b), Status::InProgress);
    }

    #[test]
    fn test_every_line_detected() {
        for line in WIN_LINES {
            let mut b = Board::new();
            for i in line {
                b.play(i, Mark::O).unwrap();
            }
            assert_eq!(winner(&b), Some(Mark::O), "line {line:?}");
            assert_eq!(winning_line(&b), Some(line));
        }
    }

    #[test]
    fn test_draw() {
        let b = board("XOXXOOOXX");
        assert_eq!(winner(&b), None);
        assert!(is_full(&b));
        assert_eq!(status(&b), Status::Draw);
        assert!(status(&b).is_over());
    }

    #[test]
    fn test_win_on_full_board() {
        let b = board("XOXOXOOXX");
        assert_eq!(
            status(&b),
            Status::Won {
                mark: Mark::X,
                line: [0, 4, 8]
            }
        );
    }

    #[test]
    fn test_first_line_in_order_wins() {
        // Not reachable in legal play: both the top row and the middle row are complete.
        let b = board("XXXOOO...");
        assert_eq!(winner(&b), Some(Mark::X));
        assert_eq!(winning_line(&b), Some([0, 1, 2]));

        let b = board("OOOXXX...");
        assert_eq!(winner(&b), Some(Mark::O));
    }

    #[test]
    fn test_repeated_queries_agree() {
        let b = board("XX..O..O.");
        assert_eq!(winner(&b), winner(&b));
        assert_eq!(is_full(&b), is_full(&b));
        assert_eq!(status(&b), Status::InProgress);
    }
}
