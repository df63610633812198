//! Phase-adaptive static evaluation.
//!
//! Four metrics are combined, each a signed ratio in [-100, 100]:
//! - disc parity
//! - mobility (legal move counts)
//! - positional strength (weighted occupied cells)
//! - corner control
//!
//! Every metric is oriented by the node's role: at a maximizing node positive
//! favors `my_color`, at a minimizing node the sign flips. Because the colors
//! also swap between the two roles, scores always read from the root player's
//! point of view.
//!
//! The blend shifts with the number of free cells: mobility matters in the
//! opening, material and corners take over as the board fills.

use crate::board::{Board, Cell};
use crate::constants::{
    CELLS, CORNERS, ENDGAME_FREE_CELLS, OPENING_FREE_CELLS, POSITION_WEIGHTS,
    TERMINAL_PARITY_WEIGHT,
};
use crate::movegen::count_moves;

/// `100 * (a - b) / (a + b)` oriented by role, `0` when `a + b == 0`.
pub fn ratio(is_max: bool, a: f64, b: f64) -> f64 {
    let total = a + b;
    if total == 0.0 {
        return 0.0;
    }
    if is_max {
        100.0 * (a - b) / total
    } else {
        100.0 * (b - a) / total
    }
}

/// Game phase, selected by the number of free cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No free cells or no legal move for the side to move.
    Terminal,
    /// More than 45 free cells.
    Opening,
    /// 31 to 45 free cells.
    Midgame,
    /// 30 free cells or fewer.
    Endgame,
}

impl Phase {
    /// Phase for a non-terminal position with `free` empty cells.
    pub fn from_free_cells(free: usize) -> Phase {
        if free == 0 {
            Phase::Terminal
        } else if free > OPENING_FREE_CELLS {
            Phase::Opening
        } else if free > ENDGAME_FREE_CELLS {
            Phase::Midgame
        } else {
            Phase::Endgame
        }
    }

    /// Combine metrics with this phase's coefficients.
    pub fn blend(self, m: &Metrics) -> f64 {
        match self {
            Phase::Terminal => TERMINAL_PARITY_WEIGHT * m.parity,
            Phase::Opening => m.mobility + 4.0 * m.positional + 100.0 * m.corners,
            Phase::Midgame => {
                10.0 * m.parity + 5.0 * m.mobility + 10.0 * m.positional + 100.0 * m.corners
            }
            Phase::Endgame => 500.0 * m.parity + 1000.0 * m.positional + 1000.0 * m.corners,
        }
    }
}

/// The four component metrics for one position and role.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Metrics {
    pub parity: f64,
    pub mobility: f64,
    pub positional: f64,
    pub corners: f64,
}

/// Static evaluator owning an immutable positional weight table.
#[derive(Clone, Debug)]
pub struct Evaluator {
    weights: [u32; CELLS],
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(POSITION_WEIGHTS)
    }
}

impl Evaluator {
    pub fn new(weights: [u32; CELLS]) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &[u32; CELLS] {
        &self.weights
    }

    pub fn parity(&self, board: &Board, my: Cell, opp: Cell, is_max: bool) -> f64 {
        ratio(is_max, board.count(my) as f64, board.count(opp) as f64)
    }

    pub fn mobility(&self, board: &Board, my: Cell, opp: Cell, is_max: bool) -> f64 {
        let mine = count_moves(board, my, opp) as f64;
        let theirs = count_moves(board, opp, my) as f64;
        ratio(is_max, mine, theirs)
    }

    pub fn positional_strength(&self, board: &Board, my: Cell, opp: Cell, is_max: bool) -> f64 {
        let (mut mine, mut theirs) = (0u64, 0u64);
        for (&cell, &w) in board.cells().iter().zip(self.weights.iter()) {
            if cell == my {
                mine += u64::from(w);
            } else if cell == opp {
                theirs += u64::from(w);
            }
        }
        ratio(is_max, mine as f64, theirs as f64)
    }

    pub fn corners(&self, board: &Board, my: Cell, opp: Cell, is_max: bool) -> f64 {
        let mine = CORNERS.iter().filter(|&&pt| board.get(pt) == my).count();
        let theirs = CORNERS.iter().filter(|&&pt| board.get(pt) == opp).count();
        ratio(is_max, mine as f64, theirs as f64)
    }

    pub fn metrics(&self, board: &Board, my: Cell, opp: Cell, is_max: bool) -> Metrics {
        Metrics {
            parity: self.parity(board, my, opp, is_max),
            mobility: self.mobility(board, my, opp, is_max),
            positional: self.positional_strength(board, my, opp, is_max),
            corners: self.corners(board, my, opp, is_max),
        }
    }

    /// Phase of `board` with `my` to move.
    pub fn phase(&self, board: &Board, my: Cell, opp: Cell) -> Phase {
        if count_moves(board, my, opp) == 0 {
            return Phase::Terminal;
        }
        Phase::from_free_cells(board.free_cells())
    }

    /// Heuristic score of `board` with `my` to move, from the root player's view.
    pub fn score(&self, board: &Board, my: Cell, opp: Cell, is_max: bool) -> f64 {
        let phase = self.phase(board, my, opp);
        if phase == Phase::Terminal {
            return TERMINAL_PARITY_WEIGHT * self.parity(board, my, opp, is_max);
        }
        phase.blend(&self.metrics(board, my, opp, is_max))
    }
}
