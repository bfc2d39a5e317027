//! Tictactoe-Rust: a tic-tac-toe engine with an exhaustive minimax opponent.
//!
//! The computer searches the whole game tree on every move, so it never
//! loses. Among equally good moves it prefers the fastest win and the
//! slowest loss.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, win-lines and scores
//! - [`board`] - Marks and the 9-cell board
//! - [`evaluator`] - Winner, winning line and draw detection
//! - [`search`] - Minimax search and move selection
//! - [`game`] - Game session with human-vs-human and human-vs-computer modes
//! - [`playout`] - Seeded games against a random opponent
//! - [`protocol`] - Line-oriented text protocol
//!
//! ## Example
//!
//! ```
//! use tictactoe_rust::board::{Board, Mark};
//! use tictactoe_rust::search::choose_move;
//!
//! // X threatens the top row; O must block at cell 2
//! let board: Board = "XX..O..O.".parse().unwrap();
//! let result = choose_move(&board, Mark::O, Mark::X);
//! assert_eq!(result.index, Some(2));
//! println!("score {} after {} nodes", result.score, result.nodes_explored);
//! ```

pub mod board;
pub mod constants;
pub mod evaluator;
pub mod game;
pub mod playout;
pub mod protocol;
pub mod search;
