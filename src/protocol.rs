//! Line-based text protocol for driving the engine from a game harness.
//!
//! The framing follows GTP: each command may carry a numeric id, and each
//! response is `=id message` on success or `?id message` on failure,
//! followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`, `list_commands`, `known_command <cmd>`, `quit`
//! - `clear_board` - Reset to the standard opening
//! - `setboard <row1> ... <row8>` - Replace the board; rows use `X`, `O`, `.`
//! - `showboard` - Print the board
//! - `color <X|O>` - Choose the engine's color (default `X`)
//! - `play <row> <col>` or `play pass` - Apply an opponent move
//! - `genmove` - Search, apply, and reply `row col` or `pass`
//! - `time_ms <n>` - Set the per-move budget
//! - `depth <n|none>` - Set or clear the ply limit

use std::io::{self, BufRead, Write};
use std::time::Duration;

use log::warn;

use crate::board::{Board, Cell};
use crate::clock::WallClock;
use crate::config::SearchConfig;
use crate::eval::Evaluator;
use crate::movegen::move_at;
use crate::search::choose_move;
use crate::simulate::apply;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "color",
    "depth",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "setboard",
    "showboard",
    "time_ms",
    "version",
];

/// Protocol engine state.
pub struct ProtocolEngine {
    board: Board,
    engine_color: Cell,
    evaluator: Evaluator,
    config: SearchConfig,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl ProtocolEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            board: Board::initial(),
            engine_color: Cell::PlayerA,
            evaluator: Evaluator::default(),
            config,
        }
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Serve commands from `input`, writing responses to `output`.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
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

            let (success, message) = self.execute(&command, args);
            if !success {
                warn!("command {command:?} failed: {message}");
            }
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command id from the beginning of the line.
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

    fn parse_color(s: &str) -> Option<Cell> {
        match s {
            "x" | "X" => Some(Cell::PlayerA),
            "o" | "O" => Some(Cell::PlayerB),
            _ => None,
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
                self.board = Board::initial();
                (true, String::new())
            }

            "setboard" => match args.concat().parse::<Board>() {
                Ok(board) => {
                    self.board = board;
                    (true, String::new())
                }
                Err(e) => (false, e.to_string()),
            },

            "showboard" => (true, format!("\n{}", self.board)),

            "color" => match args.first().and_then(|c| Self::parse_color(c)) {
                Some(color) => {
                    self.engine_color = color;
                    (true, String::new())
                }
                None => (false, "expected X or O".to_string()),
            },

            "play" => self.play_opponent(args),

            "genmove" => self.genmove(),

            "time_ms" => match args.first().map(|a| a.parse::<u64>()) {
                Some(Ok(ms)) => {
                    self.config.time_budget = Duration::from_millis(ms);
                    (true, String::new())
                }
                _ => (false, "invalid time".to_string()),
            },

            "depth" => match args.first().copied() {
                Some("none") => {
                    self.config.max_depth = None;
                    (true, String::new())
                }
                Some(d) => match d.parse::<u32>() {
                    Ok(depth) => {
                        self.config.max_depth = Some(depth);
                        (true, String::new())
                    }
                    Err(_) => (false, "invalid depth".to_string()),
                },
                None => (false, "missing argument".to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn play_opponent(&mut self, args: &[&str]) -> (bool, String) {
        if args.first().is_some_and(|a| a.eq_ignore_ascii_case("pass")) {
            return (true, String::new());
        }
        let [row, col] = args else {
            return (false, "expected <row> <col> or pass".to_string());
        };
        let (Ok(row), Ok(col)) = (row.parse::<usize>(), col.parse::<usize>()) else {
            return (false, "invalid coordinates".to_string());
        };
        let Some(index) = Board::index_of(row, col) else {
            return (false, "off the board".to_string());
        };
        let mover = self.engine_color.opponent();
        let Some(mv) = move_at(&self.board, index, mover, self.engine_color) else {
            return (false, "illegal move".to_string());
        };
        match apply(&self.board, &mv, mover) {
            Ok(board) => {
                self.board = board;
                (true, String::new())
            }
            Err(e) => (false, e.to_string()),
        }
    }

    fn genmove(&mut self) -> (bool, String) {
        let me = self.engine_color;
        let chosen = choose_move(
            &self.board,
            me,
            me.opponent(),
            &self.evaluator,
            self.config,
            WallClock::default(),
        );
        let mv = match chosen {
            Ok(Some(mv)) => mv,
            Ok(None) => return (true, "pass".to_string()),
            Err(e) => return (false, e.to_string()),
        };
        match (apply(&self.board, &mv, me), mv.target()) {
            (Ok(board), Some(target)) => {
                self.board = board;
                let (row, col) = Board::coords(target);
                (true, format!("{row} {col}"))
            }
            (Err(e), _) => (false, e.to_string()),
            (Ok(_), None) => (false, "empty move".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ProtocolEngine {
        ProtocolEngine::new(SearchConfig::default().with_max_depth(Some(2)))
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = ProtocolEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = ProtocolEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();
        assert_eq!(engine.execute("known_command", &["genmove"]), (true, "true".to_string()));
        assert_eq!(engine.execute("known_command", &["komi"]), (true, "false".to_string()));
    }

    #[test]
    fn test_genmove_applies_move() {
        let mut engine = engine();
        let (success, reply) = engine.execute("genmove", &[]);
        assert!(success);
        assert!(["2 3", "3 2", "4 5", "5 4"].contains(&reply.as_str()), "{reply}");
        assert_eq!(engine.board.count(Cell::PlayerA), 4);
    }

    #[test]
    fn test_play_rejects_illegal() {
        let mut engine = engine();
        let (success, _) = engine.execute("play", &["0", "0"]);
        assert!(!success);
        // O's legal reply square from the opening.
        let (success, _) = engine.execute("play", &["2", "4"]);
        assert!(success);
        assert_eq!(engine.board.count(Cell::PlayerB), 4);
    }

    #[test]
    fn test_setboard_and_pass() {
        let mut engine = engine();
        let rows = ["X.......", "........", "........", "........", "........", "........", "........", ".......O"];
        let (success, _) = engine.execute("setboard", &rows);
        assert!(success);
        assert_eq!(engine.execute("genmove", &[]), (true, "pass".to_string()));
        let (success, _) = engine.execute("setboard", &rows[..7]);
        assert!(!success);
    }

    #[test]
    fn test_serve_frames_responses() {
        let mut engine = engine();
        let input = b"1 name\nbogus\nquit\nname\n" as &[u8];
        let mut output = Vec::new();
        engine.serve(input, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "=1 reversi-ab\n\n? unknown command: bogus\n\n= \n\n"
        );
    }
}
