//! Exhaustive minimax search.
//!
//! The search walks the entire game tree below the current position: no
//! pruning, no transposition table and no depth limit. A 3x3 board has at most
//! 9! move sequences, which is small enough to explore on every move.
//!
//! Scores are from the computer's point of view and depend on depth:
//! - computer wins at depth `d`: `WIN_SCORE - d` (faster wins score higher)
//! - human wins at depth `d`: `d - WIN_SCORE` (slower losses score higher)
//! - draw: `DRAW_SCORE`
//!
//! The search places and removes marks on a single scratch board
//! (place / recurse / undo), so the board is back in its starting state
//! whenever a call returns.

use tracing::debug;

use crate::board::{Board, Mark};
use crate::constants::{CELLS, DRAW_SCORE, WIN_SCORE};
use crate::evaluator::{is_full, winner};

/// Which side is to move at a given recursion step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    /// The computer moves and picks the highest child score.
    Maximizing,
    /// The human moves and picks the lowest child score.
    Minimizing,
}

impl Turn {
    #[inline]
    pub fn flip(self) -> Turn {
        match self {
            Turn::Maximizing => Turn::Minimizing,
            Turn::Minimizing => Turn::Maximizing,
        }
    }
}

/// The marks played by each side of the search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sides {
    pub computer: Mark,
    pub human: Mark,
}

impl Sides {
    /// The computer plays `computer`, the human plays the other mark.
    pub fn new(computer: Mark) -> Self {
        Self {
            computer,
            human: computer.opponent(),
        }
    }

    /// The mark placed by the side to move.
    #[inline]
    pub fn mark_for(self, turn: Turn) -> Mark {
        match turn {
            Turn::Maximizing => self.computer,
            Turn::Minimizing => self.human,
        }
    }
}

/// The move chosen by [`choose_move`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Chosen cell, or `None` when the board has no empty cell
    pub index: Option<usize>,
    /// Minimax score of the chosen cell
    pub score: i32,
    /// Number of `minimax` calls made, including the top-level ones
    pub nodes_explored: u64,
}

impl SearchResult {
    /// Result returned when there is nothing to play.
    pub fn no_move() -> Self {
        Self {
            index: None,
            score: DRAW_SCORE,
            nodes_explored: 0,
        }
    }
}

/// Score the position on `board` with `turn` to move, `depth` plies below the
/// position being searched.
///
/// Every call, terminal or not, adds one to `nodes`. The board is mutated
/// during the call and restored before it returns.
pub fn minimax(board: &mut Board, depth: i32, turn: Turn, sides: Sides, nodes: &mut u64) -> i32 {
    *nodes += 1;

    match winner(board) {
        Some(mark) if mark == sides.computer => return WIN_SCORE - depth,
        Some(mark) if mark == sides.human => return depth - WIN_SCORE,
        _ => {}
    }
    if is_full(board) {
        return DRAW_SCORE;
    }

    let mark = sides.mark_for(turn);
    let mut best = match turn {
        Turn::Maximizing => i32::MIN,
        Turn::Minimizing => i32::MAX,
    };

    for index in 0..CELLS {
        if board.get(index).is_some() {
            continue;
        }
        board.place(index, mark);
        let score = minimax(board, depth + 1, turn.flip(), sides, nodes);
        board.clear(index);

        best = match turn {
            Turn::Maximizing => best.max(score),
            Turn::Minimizing => best.min(score),
        };
    }

    best
}

/// Pick the best cell for `computer` to play on `board`.
///
/// Empty cells are tried in ascending order and a cell only replaces the
/// current best when its score is strictly greater, so ties go to the lowest
/// index. The caller's board is left untouched; the search runs on a copy.
///
/// The board should have at least one empty cell and no winner. On a full
/// board this returns [`SearchResult::no_move`].
pub fn choose_move(board: &Board, computer: Mark, human: Mark) -> SearchResult {
    debug_assert_ne!(
        computer, human,
        "computer and human must play different marks"
    );

    let sides = Sides { computer, human };
    let mut scratch = *board;
    let mut nodes = 0u64;
    let mut best: Option<(usize, i32)> = None;

    for index in 0..CELLS {
        if scratch.get(index).is_some() {
            continue;
        }
        scratch.place(index, computer);
        let score = minimax(&mut scratch, 0, Turn::Minimizing, sides, &mut nodes);
        scratch.clear(index);

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }

    let result = match best {
        Some((index, score)) => SearchResult {
            index: Some(index),
            score,
            nodes_explored: nodes,
        },
        None => SearchResult::no_move(),
    };

    debug!(
        board = %board.to_compact(),
        computer = %computer,
        index = ?result.index,
        score = result.score,
        nodes = result.nodes_explored,
        "search finished"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_blocks_immediate_threat() {
        let b = board("XX..O..O.");
        let result = choose_move(&b, Mark::O, Mark::X);
        assert_eq!(result.index, Some(2));
        assert_eq!(result.score, DRAW_SCORE);
        assert_eq!(result.nodes_explored, 181);
    }

    #[test]
    fn test_takes_immediate_win() {
        let b = board("XOXOXOOX.");
        let result = choose_move(&b, Mark::X, Mark::O);
        assert_eq!(result.index, Some(8));
        assert_eq!(result.score, WIN_SCORE);
        assert_eq!(result.nodes_explored, 1);
    }

    #[test]
    fn test_prefers_win_over_block() {
        // O can win at 2 or must otherwise block X at 5.
        let b = board("OO.XX....");
        let result = choose_move(&b, Mark::O, Mark::X);
        assert_eq!(result.index, Some(2));
        assert_eq!(result.score, WIN_SCORE);
    }

    #[test]
    fn test_full_board_has_no_move() {
        let b = board("XOXXOOOXX");
        assert_eq!(choose_move(&b, Mark::X, Mark::O), SearchResult::no_move());
    }

    #[test]
    fn test_board_restored_after_minimax() {
        let mut b = board("X...O....");
        let before = b;
        let mut nodes = 0;
        minimax(&mut b, 0, Turn::Maximizing, Sides::new(Mark::X), &mut nodes);
        assert_eq!(b, before);
        assert!(nodes > 1);
    }

    #[test]
    fn test_terminal_scores_depend_on_depth() {
        let sides = Sides::new(Mark::X);
        let mut won = board("XXXOO....");
        let mut nodes = 0;
        assert_eq!(
            minimax(&mut won, 3, Turn::Minimizing, sides, &mut nodes),
            7
        );

        let mut lost = board("OOOXX.X..");
        assert_eq!(
            minimax(&mut lost, 4, Turn::Maximizing, sides, &mut nodes),
            -6
        );

        let mut drawn = board("XOXXOOOXX");
        assert_eq!(
            minimax(&mut drawn, 8, Turn::Maximizing, sides, &mut nodes),
            0
        );
        assert_eq!(nodes, 3);
    }

    #[test]
    fn test_turn_and_sides() {
        assert_eq!(Turn::Maximizing.flip(), Turn::Minimizing);
        let sides = Sides::new(Mark::O);
        assert_eq!(sides.human, Mark::X);
        assert_eq!(sides.mark_for(Turn::Maximizing), Mark::O);
        assert_eq!(sides.mark_for(Turn::Minimizing), Mark::X);
    }
}
