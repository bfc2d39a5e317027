//! Game session: turn order, modes, and applying moves.
//!
//! A [`Game`] owns the board for one game at a time. X always opens. In
//! [`Mode::HumanVsComputer`] the computer's moves come from
//! [`choose_move`](crate::search::choose_move).

use std::fmt;

use derive_more::{Display, Error, From};
use tracing::{debug, info};

use crate::board::{Board, Mark, MoveError};
use crate::evaluator::{status, Status};
use crate::search::{choose_move, SearchResult};

/// Who is playing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Two humans share the board.
    HumanVsHuman,
    /// One human plays against the search engine, which plays `computer`.
    HumanVsComputer { computer: Mark },
}

impl Default for Mode {
    fn default() -> Self {
        Mode::HumanVsComputer { computer: Mark::O }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::HumanVsHuman => write!(f, "human vs human"),
            Mode::HumanVsComputer { computer } => write!(f, "human vs computer ({computer})"),
        }
    }
}

/// Reason a game action was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum GameError {
    #[display("{_0}")]
    #[from]
    Move(MoveError),
    #[display("game is over")]
    GameOver,
    #[display("it is the computer's turn")]
    NotYourTurn,
    #[display("it is not the computer's turn")]
    NotComputerTurn,
}

/// A game in progress.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    mode: Mode,
    to_move: Mark,
    /// Cells played this game, in order
    moves: Vec<usize>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

impl Game {
    pub fn new(mode: Mode) -> Self {
        Self {
            board: Board::new(),
            mode,
            to_move: Mark::X,
            moves: Vec::new(),
        }
    }

    /// Start over with an empty board and X to move.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.to_move = Mark::X;
        self.moves.clear();
        debug!(mode = %self.mode, "game reset");
    }

    /// Switch mode. The game restarts.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset();
    }

    /// Load a position. The side to move is derived from the mark counts.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
        self.to_move = board.side_to_move();
        self.moves.clear();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    pub fn status(&self) -> Status {
        status(&self.board)
    }

    /// True when the game is live and the computer holds the move.
    pub fn is_computer_turn(&self) -> bool {
        match self.mode {
            Mode::HumanVsHuman => false,
            Mode::HumanVsComputer { computer } => {
                computer == self.to_move && !self.status().is_over()
            }
        }
    }

    /// Play a human move at `index` for the side to move.
    pub fn play(&mut self, index: usize) -> Result<Status, GameError> {
        if self.status().is_over() {
            return Err(GameError::GameOver);
        }
        if self.is_computer_turn() {
            return Err(GameError::NotYourTurn);
        }
        self.apply(index)
    }

    /// Let the search engine choose and play the computer's move.
    pub fn computer_move(&mut self) -> Result<SearchResult, GameError> {
        if self.status().is_over() {
            return Err(GameError::GameOver);
        }
        if !self.is_computer_turn() {
            return Err(GameError::NotComputerTurn);
        }

        let computer = self.to_move;
        let result = choose_move(&self.board, computer, computer.opponent());
        let index = result.index.ok_or(GameError::GameOver)?;
        self.apply(index)?;
        Ok(result)
    }

    /// Human-readable state line: "X to move", "O wins", "Draw".
    pub fn status_text(&self) -> String {
        match self.status() {
            Status::InProgress => format!("{} to move", self.to_move),
            Status::Won { mark, .. } => format!("{mark} wins"),
            Status::Draw => "Draw".to_string(),
        }
    }

    fn apply(&mut self, index: usize) -> Result<Status, GameError> {
        let mark = self.to_move;
        self.board.play(index, mark)?;
        self.moves.push(index);
        self.to_move = mark.opponent();

        let status = self.status();
        debug!(%mark, index, board = %self.board.to_compact(), "move played");
        if status.is_over() {
            info!(result = %status, moves = self.moves.len(), "game over");
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_vs_human_alternates() {
        let mut game = Game::new(Mode::HumanVsHuman);
        assert_eq!(game.to_move(), Mark::X);
        game.play(0).unwrap();
        assert_eq!(game.to_move(), Mark::O);
        game.play(4).unwrap();
        assert_eq!(game.board().get(0), Some(Mark::X));
        assert_eq!(game.board().get(4), Some(Mark::O));
        assert_eq!(game.moves(), &[0, 4]);
        assert!(!game.is_computer_turn());
    }

    #[test]
    fn test_rejects_occupied_and_finished() {
        let mut game = Game::new(Mode::HumanVsHuman);
        game.play(0).unwrap();
        assert_eq!(
            game.play(0),
            Err(GameError::Move(MoveError::Occupied { index: 0 }))
        );

        // X: 0 1 2, O: 3 4
        for i in [3, 1, 4] {
            game.play(i).unwrap();
        }
        let status = game.play(2).unwrap();
        assert!(matches!(status, Status::Won { mark: Mark::X, .. }));
        assert_eq!(game.status_text(), "X wins");
        assert_eq!(game.play(5), Err(GameError::GameOver));
    }

    #[test]
    fn test_computer_turn_enforced() {
        let mut game = Game::new(Mode::HumanVsComputer { computer: Mark::O });
        assert_eq!(game.computer_move(), Err(GameError::NotComputerTurn));
        game.play(0).unwrap();
        assert!(game.is_computer_turn());
        assert_eq!(game.play(1), Err(GameError::NotYourTurn));

        let result = game.computer_move().unwrap();
        assert_eq!(result.index, Some(4));
        assert_eq!(game.board().get(4), Some(Mark::O));
        assert_eq!(game.to_move(), Mark::X);
    }

    #[test]
    fn test_computer_opens_as_x() {
        let mut game = Game::new(Mode::HumanVsComputer { computer: Mark::X });
        assert!(game.is_computer_turn());
        let result = game.computer_move().unwrap();
        assert_eq!(result.index, Some(0));
        assert_eq!(result.score, 0);
        assert_eq!(game.status_text(), "O to move");
    }

    #[test]
    fn test_reset_and_set_mode() {
        let mut game = Game::new(Mode::HumanVsHuman);
        game.play(4).unwrap();
        game.set_mode(Mode::default());
        assert!(game.board().is_empty());
        assert_eq!(game.to_move(), Mark::X);
        assert!(game.moves().is_empty());
        assert_eq!(game.mode(), Mode::HumanVsComputer { computer: Mark::O });
    }

    #[test]
    fn test_set_board_derives_turn() {
        let mut game = Game::default();
        game.set_board("XX..O....".parse().unwrap());
        assert_eq!(game.to_move(), Mark::O);
        assert!(game.is_computer_turn());
        assert_eq!(game.computer_move().unwrap().index, Some(2));
    }
}
