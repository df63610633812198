//! Applying a move to produce the next position.

use thiserror::Error;

use crate::board::{Board, Cell};
use crate::movegen::Move;

/// Failure to apply a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulateError {
    /// The capture vector was empty. Moves from the generator never are,
    /// so this is a caller defect.
    #[error("invalid move: empty capture set")]
    InvalidMove,
}

/// A new board with every cell in `mv`'s capture vector set to `mover`.
///
/// The input board is never modified.
pub fn apply(board: &Board, mv: &Move, mover: Cell) -> Result<Board, SimulateError> {
    if mv.captures().is_empty() {
        return Err(SimulateError::InvalidMove);
    }
    let mut next = *board;
    for &pt in mv.captures() {
        next.set(pt, mover);
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::generate_moves;

    #[test]
    fn test_apply_flips_captures() {
        let board = Board::initial();
        let moves = generate_moves(&board, Cell::PlayerA, Cell::PlayerB);
        let next = apply(&board, &moves[0], Cell::PlayerA).unwrap();
        // 19 flips 27 via the south ray.
        assert_eq!(next.get(19), Cell::PlayerA);
        assert_eq!(next.get(27), Cell::PlayerA);
        assert_eq!(next.count(Cell::PlayerA), 4);
        assert_eq!(next.count(Cell::PlayerB), 1);
    }

    #[test]
    fn test_apply_is_pure() {
        let board = Board::initial();
        let snapshot = board;
        let moves = generate_moves(&board, Cell::PlayerA, Cell::PlayerB);
        for mv in &moves {
            let _ = apply(&board, mv, Cell::PlayerA).unwrap();
        }
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_apply_rejects_empty_move() {
        let result = apply(&Board::initial(), &Move::from_captures(vec![]), Cell::PlayerA);
        assert_eq!(result, Err(SimulateError::InvalidMove));
    }
}
