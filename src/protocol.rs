//! Line-oriented text protocol for driving the engine from other programs.
//!
//! The framing follows GTP: one command per line with an optional numeric
//! id, `#` starts a comment, and every response is `=id message` on success
//! or `?id message` on failure, followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version` - Engine identification
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the loop
//! - `clear_board` - Start a new game
//! - `mode hvh` / `mode hvc [X|O]` - Pick the game mode (the computer plays O by default)
//! - `play <cell>` - Play a human move at cell 0-8 for the side to move
//! - `genmove` - Let the computer play; responds `<cell> <score> <nodes>`
//! - `analyze` - Search for the side to move without playing; same response as `genmove`
//! - `setboard <cells>` - Load a position such as `XX..O..O.`
//! - `showboard`, `status`, `winning_line` - Query the current game
//!
//! ## Example
//!
//! ```
//! use tictactoe_rust::protocol::ProtocolEngine;
//!
//! let mut engine = ProtocolEngine::new();
//! let mut out = Vec::new();
//! engine.run(&b"1 play 4\n2 genmove\n"[..], &mut out).unwrap();
//! let out = String::from_utf8(out).unwrap();
//! assert!(out.contains("=1"));
//! assert!(out.contains("=2 0 0 "));
//! ```

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::board::{Board, Mark};
use crate::evaluator::winning_line;
use crate::game::{Game, Mode};
use crate::search::{choose_move, SearchResult};

/// The list of known protocol commands.
const KNOWN_COMMANDS: &[&str] = &[
    "analyze",
    "clear_board",
    "genmove",
    "known_command",
    "list_commands",
    "mode",
    "name",
    "play",
    "protocol_version",
    "quit",
    "setboard",
    "showboard",
    "status",
    "version",
    "winning_line",
];

/// Protocol engine state.
pub struct ProtocolEngine {
    /// Current game
    game: Game,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    /// Create an engine in the default mode (human vs computer, computer plays O).
    pub fn new() -> Self {
        Self::with_mode(Mode::default())
    }

    pub fn with_mode(mode: Mode) -> Self {
        Self {
            game: Game::new(mode),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        info!(mode = %self.game.mode(), "protocol session started");

        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            debug!(?id, %command, ?args, "command received");
            let (success, message) = self.execute(&command, args);

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }

        info!("protocol session ended");
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());

        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "clear_board" => {
                self.game.reset();
                (true, String::new())
            }

            "mode" => match Self::parse_mode(args) {
                Ok(mode) => {
                    self.game.set_mode(mode);
                    (true, mode.to_string())
                }
                Err(message) => (false, message),
            },

            "play" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let Ok(index) = arg.parse::<usize>() else {
                    return (false, format!("invalid cell \"{arg}\""));
                };
                match self.game.play(index) {
                    Ok(_) => (true, self.game.status_text()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => match self.game.computer_move() {
                Ok(result) => (true, Self::format_result(&result)),
                Err(e) => (false, e.to_string()),
            },

            "analyze" => {
                if self.game.status().is_over() {
                    return (false, "game is over".to_string());
                }
                let mark = self.game.to_move();
                let result = choose_move(self.game.board(), mark, mark.opponent());
                (true, Self::format_result(&result))
            }

            "setboard" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<Board>() {
                    Ok(board) => {
                        self.game.set_board(board);
                        (true, self.game.status_text())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "showboard" => (true, format!("\n{}", self.game.board())),

            "status" => (true, self.game.status_text()),

            "winning_line" => match winning_line(self.game.board()) {
                Some([a, b, c]) => (true, format!("{a} {b} {c}")),
                None => (true, "none".to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn parse_mode(args: &[&str]) -> Result<Mode, String> {
        match args.first().map(|a| a.to_lowercase()).as_deref() {
            Some("hvh") => Ok(Mode::HumanVsHuman),
            Some("hvc") => {
                let computer = match args.get(1) {
                    Some(mark) => mark.parse::<Mark>().map_err(|e| e.to_string())?,
                    None => Mark::O,
                };
                Ok(Mode::HumanVsComputer { computer })
            }
            Some(other) => Err(format!("unknown mode \"{other}\" (expected hvh or hvc)")),
            None => Err("missing argument".to_string()),
        }
    }

    fn format_result(result: &SearchResult) -> String {
        let index = result
            .index
            .map(|i| i.to_string())
            .unwrap_or_else(|| "none".to_string());
        format!("{index} {} {}", result.score, result.nodes_explored)
    }
}
