//! Tictactoe-Rust: tic-tac-toe against an exhaustive minimax opponent.
//!
//! ## Usage
//!
//! - `tictactoe-rust` - Play in the terminal against the computer
//! - `tictactoe-rust play --mode hvh` - Two players share the terminal
//! - `tictactoe-rust protocol` - Start the text protocol on stdin/stdout
//! - `tictactoe-rust selfplay --games 200` - Engine vs random opponent
//! - `tictactoe-rust analyze XX..O..O.` - Best move for the side to move

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tictactoe_rust::board::{Board, Mark};
use tictactoe_rust::constants::{
    CELLS, DEFAULT_DELAY_MS, DEFAULT_SEED, DEFAULT_SELFPLAY_GAMES, N,
};
use tictactoe_rust::evaluator::{status, Status};
use tictactoe_rust::game::{Game, Mode};
use tictactoe_rust::playout::run_matches;
use tictactoe_rust::protocol::ProtocolEngine;
use tictactoe_rust::search::choose_move;

/// Tictactoe-Rust: tic-tac-toe with a minimax opponent
#[derive(Parser)]
#[command(name = "tictactoe-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play {
        /// Game mode
        #[arg(long, value_enum, default_value_t = ModeArg::Hvc)]
        mode: ModeArg,
        /// Mark played by the computer in hvc mode
        #[arg(long, default_value = "O")]
        computer: Mark,
        /// Pause before the computer moves, in milliseconds
        #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
        delay_ms: u64,
    },
    /// Start the text protocol server for use with other programs
    Protocol,
    /// Play the engine against a random opponent and report the results
    Selfplay {
        #[arg(long, default_value_t = DEFAULT_SELFPLAY_GAMES)]
        games: usize,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// Search a position (e.g. `XX..O..O.`) for the side to move
    Analyze {
        board: Board,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Human vs human
    Hvh,
    /// Human vs computer
    Hvc,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Play {
            mode,
            computer,
            delay_ms,
        }) => {
            let mode = match mode {
                ModeArg::Hvh => Mode::HumanVsHuman,
                ModeArg::Hvc => Mode::HumanVsComputer { computer },
            };
            run_play(mode, Duration::from_millis(delay_ms))
        }
        Some(Commands::Protocol) => {
            let mut engine = ProtocolEngine::new();
            engine
                .run(io::stdin().lock(), io::stdout().lock())
                .context("protocol I/O failed")
        }
        Some(Commands::Selfplay { games, seed }) => run_selfplay(games, seed),
        Some(Commands::Analyze { board }) => run_analyze(&board),
        None => run_play(
            Mode::default(),
            Duration::from_millis(DEFAULT_DELAY_MS),
        ),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run_play(mode: Mode, delay: Duration) -> Result<()> {
    info!(%mode, "starting terminal game");
    let mut game = Game::new(mode);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    println!("Tictactoe-Rust ({mode})");
    println!("Cells are numbered 1-{CELLS}, left to right, top to bottom.");
    println!("Type `new` to restart or `quit` to leave.\n");

    loop {
        print_board(&game);

        if game.status().is_over() {
            println!("{}", game.status_text());
            print!("Play again? [y/N] ");
            stdout.flush()?;
            match lines.next().transpose()? {
                Some(answer) if answer.trim().eq_ignore_ascii_case("y") => {
                    game.reset();
                    continue;
                }
                _ => return Ok(()),
            }
        }

        if game.is_computer_turn() {
            thread::sleep(delay);
            let result = game.computer_move()?;
            if let Some(index) = result.index {
                println!(
                    "Computer plays {} (score {}, {} positions searched)\n",
                    index + 1,
                    result.score,
                    result.nodes_explored
                );
            }
            continue;
        }

        print!("{} > ", game.to_move());
        stdout.flush()?;
        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };

        match line.trim() {
            "quit" | "q" => return Ok(()),
            "new" | "n" => game.reset(),
            input => match parse_cell(input) {
                Ok(index) => {
                    if let Err(e) = game.play(index) {
                        println!("{e}");
                    }
                }
                Err(e) => println!("{e}"),
            },
        }
        println!();
    }
}

/// Parse a 1-based cell number typed by a player.
fn parse_cell(input: &str) -> Result<usize> {
    let cell: usize = input
        .parse()
        .with_context(|| format!("\"{input}\" is not a cell number"))?;
    if !(1..=CELLS).contains(&cell) {
        bail!("cell must be between 1 and {CELLS}");
    }
    Ok(cell - 1)
}

fn print_board(game: &Game) {
    let board = game.board();
    let highlight = match status(board) {
        Status::Won { line, .. } => Some(line),
        _ => None,
    };

    for row in 0..N {
        let cells: Vec<String> = (0..N)
            .map(|col| {
                let i = row * N + col;
                let ch = board
                    .get(i)
                    .map_or_else(|| char::from(b'1' + i as u8), Mark::as_char);
                if highlight.is_some_and(|line| line.contains(&i)) {
                    format!("[{ch}]")
                } else {
                    format!(" {ch} ")
                }
            })
            .collect();
        println!("{}", cells.join("|"));
        if row + 1 < N {
            println!("---+---+---");
        }
    }
    println!();
}

fn run_selfplay(games: usize, seed: u64) -> Result<()> {
    println!("Playing {games} games against a random opponent (seed {seed})...");
    let stats = run_matches(games, seed).context("selfplay aborted")?;
    println!(
        "Engine wins: {}  draws: {}  losses: {}",
        stats.wins, stats.draws, stats.losses
    );
    Ok(())
}

fn run_analyze(board: &Board) -> Result<()> {
    print!("{board}");
    let decided = status(board);
    if decided.is_over() {
        bail!("position is already decided: {decided}");
    }

    let mark = board.side_to_move();
    let result = choose_move(board, mark, mark.opponent());
    let index = result.index.context("no empty cell to play")?;
    println!(
        "{mark} to move: best cell {index} (score {}, {} nodes)",
        result.score, result.nodes_explored
    );
    Ok(())
}
