//! Legal move generation by ray casting.
//!
//! A move is legal only if it captures: from an empty cell, at least one of
//! the eight rays must run over one or more opponent discs and end on a
//! disc of the mover's color.

use crate::board::{Board, Cell};
use crate::constants::{CELLS, DIRECTIONS};

/// A capture vector: the target cell followed by every cell it flips.
///
/// A `Move` is only meaningful for the board and colors it was generated from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    captures: Vec<usize>,
}

impl Move {
    /// Build a move from a raw capture vector. The first element is the target.
    pub fn from_captures(captures: Vec<usize>) -> Self {
        Self { captures }
    }

    /// Cell the disc is placed on, or `None` for an empty capture vector.
    pub fn target(&self) -> Option<usize> {
        self.captures.first().copied()
    }

    /// Target followed by every flipped cell.
    pub fn captures(&self) -> &[usize] {
        &self.captures
    }

    /// Opponent discs flipped by this move (the target excluded).
    pub fn flips(&self) -> &[usize] {
        self.captures.get(1..).unwrap_or(&[])
    }
}

/// Cells captured along one ray from `origin`, or an empty vector if the
/// ray does not end on a `mover` disc.
fn ray_captures(board: &Board, origin: usize, dir: (isize, isize), mover: Cell, opponent: Cell) -> Vec<usize> {
    let mut line = Vec::new();
    let mut cursor = Board::step(origin, dir);
    while let Some(pt) = cursor {
        match board.get(pt) {
            c if c == opponent => line.push(pt),
            c if c == mover && !line.is_empty() => return line,
            _ => break,
        }
        cursor = Board::step(pt, dir);
    }
    Vec::new()
}

/// Capture vector for placing `mover` at `target`, or `None` if illegal.
pub fn move_at(board: &Board, target: usize, mover: Cell, opponent: Cell) -> Option<Move> {
    if board.get(target) != Cell::Empty {
        return None;
    }
    let mut captures = vec![target];
    for dir in DIRECTIONS {
        captures.extend(ray_captures(board, target, dir, mover, opponent));
    }
    (captures.len() > 1).then(|| Move::from_captures(captures))
}

/// Every legal move for `mover`, ordered by increasing target index.
///
/// The ordering is relied on by the search for deterministic tie-breaks.
pub fn generate_moves(board: &Board, mover: Cell, opponent: Cell) -> Vec<Move> {
    (0..CELLS)
        .filter_map(|pt| move_at(board, pt, mover, opponent))
        .collect()
}

/// Number of legal moves for `mover`.
pub fn count_moves(board: &Board, mover: Cell, opponent: Cell) -> usize {
    (0..CELLS)
        .filter(|&pt| {
            board.get(pt) == Cell::Empty
                && DIRECTIONS
                    .iter()
                    .any(|&dir| !ray_captures(board, pt, dir, mover, opponent).is_empty())
        })
        .count()
}
