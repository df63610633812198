//! Reversi-AB: a time-bounded alpha-beta Reversi engine.
//!
//! Picks a move for the side to play on an 8x8 Reversi board using minimax
//! with alpha-beta pruning, a phase-adaptive evaluation, and a wall-clock
//! budget checked on every node entry.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, weight table, and search defaults
//! - [`board`] - Immutable flat board and its text form
//! - [`movegen`] - Legal move generation by ray casting
//! - [`simulate`] - Applying a move to produce the next board
//! - [`eval`] - Phase-adaptive static evaluation
//! - [`node`] - Search tree nodes with cached children
//! - [`clock`] - Deadline time sources
//! - [`config`] - Per-decision search configuration
//! - [`search`] - Minimax with alpha-beta pruning
//! - [`player`] - Harness boundary with opaque color tokens
//! - [`protocol`] - Text protocol for game harnesses
//! - [`selfplay`] - Complete games against the engine or a random mover
//!
//! ## Example
//!
//! ```
//! use reversi_ab::player::Player;
//!
//! // The harness uses -1 for empty, 0 and 1 for the two colors.
//! let mut rows = vec![vec![-1; 8]; 8];
//! rows[3][3] = 1;
//! rows[4][4] = 1;
//! rows[3][4] = 0;
//! rows[4][3] = 0;
//!
//! let player = Player::new(0, 1, -1).unwrap();
//! let mv = player.play(&rows).unwrap();
//! assert!(matches!(mv, Some((2, 3) | (3, 2) | (4, 5) | (5, 4))));
//! ```

pub mod board;
pub mod clock;
pub mod config;
pub mod constants;
pub mod eval;
pub mod movegen;
pub mod node;
pub mod player;
pub mod protocol;
pub mod search;
pub mod selfplay;
pub mod simulate;
