//! Constants for board geometry, evaluation weights, and search defaults.
//!
//! The board is a flat row-major array of `SIDE * SIDE` cells. Unlike a
//! padded layout, out-of-bounds detection is done on (row, col) pairs, so a
//! ray leaving the east edge can never wrap onto the next row.

use std::time::Duration;

// =============================================================================
// Board Geometry
// =============================================================================

/// Board side length (the board is SIDE x SIDE).
pub const SIDE: usize = 8;

/// Number of cells on the board.
pub const CELLS: usize = SIDE * SIDE;

/// Indices of the four corner cells.
pub const CORNERS: [usize; 4] = [0, SIDE - 1, CELLS - SIDE, CELLS - 1];

/// Ray directions as (row delta, col delta).
/// Order: North, South, East, West, NE, NW, SE, SW
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),  // North
    (1, 0),   // South
    (0, 1),   // East
    (0, -1),  // West
    (-1, 1),  // NE
    (-1, -1), // NW
    (1, 1),   // SE
    (1, -1),  // SW
];

// =============================================================================
// Evaluation
// =============================================================================

/// Positional weight per cell.
///
/// All weights are non-negative so that the positional ratio
/// `100 * (a - b) / (a + b)` stays within [-100, 100].
/// Corners dominate; the cells diagonally next to a corner are nearly
/// worthless because they hand the corner to the opponent.
#[rustfmt::skip]
pub const POSITION_WEIGHTS: [u32; CELLS] = [
    100,  5, 30, 20, 20, 30,  5, 100,
      5,  1, 10, 12, 12, 10,  1,   5,
     30, 10, 18, 15, 15, 18, 10,  30,
     20, 12, 15, 16, 16, 15, 12,  20,
     20, 12, 15, 16, 16, 15, 12,  20,
     30, 10, 18, 15, 15, 18, 10,  30,
      5,  1, 10, 12, 12, 10,  1,   5,
    100,  5, 30, 20, 20, 30,  5, 100,
];

/// More free cells than this selects the opening blend.
pub const OPENING_FREE_CELLS: usize = 45;

/// More free cells than this (and at most `OPENING_FREE_CELLS`) selects the midgame blend.
pub const ENDGAME_FREE_CELLS: usize = 30;

/// Multiplier on parity once the game is decided.
pub const TERMINAL_PARITY_WEIGHT: f64 = 10_000.0;

// =============================================================================
// Search
// =============================================================================

/// Default wall-clock budget for one move decision.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_millis(800);

/// Score a maximizing node starts from; every evaluator output compares above it.
pub const MAX_NODE_SENTINEL: f64 = f64::NEG_INFINITY;

/// Score a minimizing node starts from; every evaluator output compares below it.
pub const MIN_NODE_SENTINEL: f64 = f64::INFINITY;
