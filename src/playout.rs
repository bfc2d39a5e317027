//! Games against a random opponent.
//!
//! Used to stress the search engine: the engine plays every one of its moves
//! with [`choose_move`] while the opponent picks uniformly among empty cells.
//! The engine must never lose. Playouts are seeded so a run can be replayed.
//!
//! A game that cannot be continued (no move offered on an open board, or a
//! rejected move) is an error, never an outcome.

use derive_more::{Display, Error, From};
use tracing::{debug, warn};

use crate::board::{Board, Mark, MoveError};
use crate::evaluator::{status, Status};
use crate::search::choose_move;

/// Result of one game from the engine's point of view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    EngineWin,
    Draw,
    EngineLoss,
}

/// A playout stopped before the game ended.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum PlayoutError {
    #[display("no move for {mark} on open board {}", board.to_compact())]
    NoMove { mark: Mark, board: Board },
    #[display("{_0}")]
    #[from]
    Move(MoveError),
}

/// Tally of a batch of playouts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl MatchStats {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::EngineWin => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::EngineLoss => self.losses += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.wins + self.draws + self.losses
    }
}

/// A uniformly random empty cell, or `None` on a full board.
pub fn random_move(board: &Board, rng: &mut fastrand::Rng) -> Option<usize> {
    let empty: Vec<usize> = board.empty_cells().collect();
    if empty.is_empty() {
        return None;
    }
    Some(empty[rng.usize(..empty.len())])
}

/// Play one game from the empty board, the engine playing `engine`.
///
/// X always opens, so the engine moves first when it plays X.
pub fn play_vs_random(engine: Mark, rng: &mut fastrand::Rng) -> Result<Outcome, PlayoutError> {
    play_game(engine, rng, |board| {
        choose_move(board, engine, engine.opponent()).index
    })
}

/// Play one game with `engine_move` choosing the engine's cells.
fn play_game(
    engine: Mark,
    rng: &mut fastrand::Rng,
    mut engine_move: impl FnMut(&Board) -> Option<usize>,
) -> Result<Outcome, PlayoutError> {
    let mut board = Board::new();
    let mut to_move = Mark::X;

    loop {
        match status(&board) {
            Status::Won { mark, .. } if mark == engine => return Ok(Outcome::EngineWin),
            Status::Won { .. } => return Ok(Outcome::EngineLoss),
            Status::Draw => return Ok(Outcome::Draw),
            Status::InProgress => {}
        }

        let index = if to_move == engine {
            engine_move(&board)
        } else {
            random_move(&board, rng)
        };
        let index = index.ok_or_else(|| PlayoutError::NoMove {
            mark: to_move,
            board,
        })?;
        board.play(index, to_move)?;
        to_move = to_move.opponent();
    }
}

/// Play `games` games against a random opponent, alternating the engine
/// between X and O, starting with X.
pub fn run_matches(games: usize, seed: u64) -> Result<MatchStats, PlayoutError> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut stats = MatchStats::default();

    for game in 0..games {
        let engine = if game % 2 == 0 { Mark::X } else { Mark::O };
        let outcome = play_vs_random(engine, &mut rng)?;
        if outcome == Outcome::EngineLoss {
            warn!(game, %engine, "engine lost a game");
        }
        stats.record(outcome);
    }

    debug!(
        games,
        seed,
        wins = stats.wins,
        draws = stats.draws,
        losses = stats.losses,
        "playouts finished"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_move_picks_empty_cell() {
        let board: Board = "XOXOXO.X.".parse().unwrap();
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..20 {
            let index = random_move(&board, &mut rng).unwrap();
            assert!(index == 6 || index == 8);
        }
    }

    #[test]
    fn test_random_move_full_board() {
        let board: Board = "XOXXOOOXX".parse().unwrap();
        let mut rng = fastrand::Rng::with_seed(7);
        assert_eq!(random_move(&board, &mut rng), None);
    }

    #[test]
    fn test_engine_never_loses_to_random() {
        let stats = run_matches(20, 42).unwrap();
        assert_eq!(stats.games(), 20);
        assert_eq!(stats.losses, 0);
    }

    #[test]
    fn test_matches_are_reproducible() {
        assert_eq!(run_matches(6, 3).unwrap(), run_matches(6, 3).unwrap());
    }

    #[test]
    fn test_missing_engine_move_is_an_error() {
        let mut rng = fastrand::Rng::with_seed(5);
        let result = play_game(Mark::X, &mut rng, |_| None);
        assert_eq!(
            result,
            Err(PlayoutError::NoMove {
                mark: Mark::X,
                board: Board::new()
            })
        );
    }

    #[test]
    fn test_rejected_engine_move_is_an_error() {
        // The engine insists on cell 4, which it already took on its first move.
        let mut rng = fastrand::Rng::with_seed(5);
        let result = play_game(Mark::X, &mut rng, |_| Some(4));
        assert_eq!(
            result,
            Err(PlayoutError::Move(MoveError::Occupied { index: 4 }))
        );
    }
}
