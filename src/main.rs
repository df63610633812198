//! Reversi-AB: a time-bounded alpha-beta Reversi engine.
//!
//! ## Usage
//!
//! - `reversi-ab` - Show a demo game
//! - `reversi-ab protocol` - Serve the text protocol on stdin/stdout
//! - `reversi-ab demo --random` - Play the engine against a random mover
//! - `reversi-ab bestmove board.txt` - Print the engine's move for a board file

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use reversi_ab::board::{Board, Cell};
use reversi_ab::clock::WallClock;
use reversi_ab::config::SearchConfig;
use reversi_ab::player::Player;
use reversi_ab::protocol::ProtocolEngine;
use reversi_ab::selfplay::{Opponent, play_game_with};

/// Reversi-AB: a time-bounded alpha-beta Reversi engine
#[derive(Parser)]
#[command(name = "reversi-ab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Time budget per move in milliseconds
    #[arg(long, global = true)]
    time_ms: Option<u64>,

    /// Maximum search depth in plies
    #[arg(long, global = true)]
    depth: Option<u32>,

    /// Log search statistics
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the line-based text protocol for use with a game harness
    Protocol,
    /// Play a full game and print every position
    Demo {
        /// Play against a random mover instead of the engine itself
        #[arg(long)]
        random: bool,
        /// Seed for the random mover
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
    /// Print the best move for a board given as 8 rows of tokens
    Bestmove {
        /// Board file; reads stdin when omitted
        file: Option<PathBuf>,
        /// Token for the engine's discs
        #[arg(long, default_value_t = 'X')]
        me: char,
        /// Token for the opponent's discs
        #[arg(long, default_value_t = 'O')]
        opponent: char,
        /// Token for empty cells
        #[arg(long, default_value_t = '.')]
        empty: char,
    },
}

impl Cli {
    fn search_config(&self) -> SearchConfig {
        let mut config = SearchConfig::default().with_max_depth(self.depth);
        if let Some(ms) = self.time_ms {
            config = config.with_time_budget(Duration::from_millis(ms));
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = cli.search_config();
    match cli.command {
        Some(Commands::Protocol) => {
            let mut engine = ProtocolEngine::new(config);
            engine.run().context("protocol I/O failed")?;
        }
        Some(Commands::Demo { random, seed }) => run_demo(config, random, seed)?,
        Some(Commands::Bestmove {
            file,
            me,
            opponent,
            empty,
        }) => run_bestmove(config, file, me, opponent, empty)?,
        None => run_demo(config, false, 1)?,
    }
    Ok(())
}

fn run_demo(config: SearchConfig, random: bool, seed: u64) -> Result<()> {
    println!("Reversi-AB: alpha-beta Reversi engine\n");
    println!("{}", Board::initial());

    let opponent = if random {
        Opponent::Random(fastrand::Rng::with_seed(seed))
    } else {
        Opponent::Engine
    };
    let record = play_game_with(
        Board::initial(),
        config,
        opponent,
        WallClock::default,
        |ply, board| {
            let who = if ply.color == Cell::PlayerA { 'X' } else { 'O' };
            match ply.target {
                Some(t) => {
                    let (row, col) = Board::coords(t);
                    println!("{who} plays {row} {col}");
                }
                None => println!("{who} passes"),
            }
            println!("{board}");
        },
    )?;

    let board = &record.final_board;
    println!(
        "Final: X={} O={}",
        board.count(Cell::PlayerA),
        board.count(Cell::PlayerB)
    );
    match record.winner() {
        Some(Cell::PlayerA) => println!("X wins"),
        Some(_) => println!("O wins"),
        None => println!("Draw"),
    }
    Ok(())
}

fn run_bestmove(
    config: SearchConfig,
    file: Option<PathBuf>,
    me: char,
    opponent: char,
    empty: char,
) -> Result<()> {
    let text = match file {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let rows: Vec<Vec<char>> = text
        .lines()
        .map(|l| l.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
        .filter(|r| !r.is_empty())
        .collect();
    if rows.is_empty() {
        bail!("empty board input");
    }

    let player = Player::new(me, opponent, empty)?.with_config(config);
    match player.play(&rows)? {
        Some((row, col)) => println!("{row} {col}"),
        None => println!("pass"),
    }
    Ok(())
}
