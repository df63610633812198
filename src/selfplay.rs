//! Full games between the engine and an opponent.
//!
//! Uses the standard pass rule: a side with no legal move passes, and the
//! game ends after two consecutive passes or when the board is full.

use log::info;

use crate::board::{Board, Cell};
use crate::clock::{Clock, WallClock};
use crate::config::SearchConfig;
use crate::eval::Evaluator;
use crate::movegen::{generate_moves, Move};
use crate::search::choose_move;
use crate::simulate::{apply, SimulateError};

/// How the side opposing the engine picks its moves.
pub enum Opponent {
    /// The same search engine
    Engine,
    /// A uniformly random legal move
    Random(fastrand::Rng),
}

/// One ply of a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ply {
    pub color: Cell,
    /// Target cell, `None` for a pass
    pub target: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct GameRecord {
    pub plies: Vec<Ply>,
    pub final_board: Board,
}

impl GameRecord {
    /// Winning color, `None` on a draw.
    pub fn winner(&self) -> Option<Cell> {
        let a = self.final_board.count(Cell::PlayerA);
        let b = self.final_board.count(Cell::PlayerB);
        match a.cmp(&b) {
            std::cmp::Ordering::Greater => Some(Cell::PlayerA),
            std::cmp::Ordering::Less => Some(Cell::PlayerB),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Play from the opening with the engine as `PlayerA` (moving first).
pub fn play_game(config: SearchConfig, opponent: Opponent) -> Result<GameRecord, SimulateError> {
    play_game_with(Board::initial(), config, opponent, WallClock::default, |_, _| {})
}

/// Play from `board` with `PlayerA` to move. `clock` builds a fresh clock
/// per engine decision; `on_ply` sees every ply and the resulting board.
pub fn play_game_with<C, F, P>(
    mut board: Board,
    config: SearchConfig,
    mut opponent: Opponent,
    clock: F,
    mut on_ply: P,
) -> Result<GameRecord, SimulateError>
where
    C: Clock,
    F: Fn() -> C,
    P: FnMut(&Ply, &Board),
{
    let evaluator = Evaluator::default();
    let mut plies = Vec::new();
    let mut to_move = Cell::PlayerA;
    let mut passes = 0;

    while passes < 2 && board.free_cells() > 0 {
        let mv: Option<Move> = match (&mut opponent, to_move) {
            (Opponent::Random(rng), Cell::PlayerB) => {
                let mut moves = generate_moves(&board, to_move, to_move.opponent());
                if moves.is_empty() {
                    None
                } else {
                    let pick = rng.usize(..moves.len());
                    Some(moves.swap_remove(pick))
                }
            }
            _ => choose_move(
                &board,
                to_move,
                to_move.opponent(),
                &evaluator,
                config,
                clock(),
            )?,
        };

        if let Some(mv) = &mv {
            board = apply(&board, mv, to_move)?;
            passes = 0;
        } else {
            passes += 1;
        }
        let ply = Ply {
            color: to_move,
            target: mv.as_ref().and_then(Move::target),
        };
        on_ply(&ply, &board);
        plies.push(ply);
        to_move = to_move.opponent();
    }

    info!(
        "game over after {} plies: X={} O={}",
        plies.len(),
        board.count(Cell::PlayerA),
        board.count(Cell::PlayerB)
    );
    Ok(GameRecord {
        plies,
        final_board: board,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn test_random_game_completes() {
        let config = SearchConfig::default().with_max_depth(Some(1));
        let record = play_game_with(
            Board::initial(),
            config,
            Opponent::Random(fastrand::Rng::with_seed(3)),
            FixedClock::zero,
            |_, _| {},
        )
        .unwrap();
        let board = record.final_board;
        let total = board.count(Cell::PlayerA) + board.count(Cell::PlayerB);
        let placed = record.plies.iter().filter(|p| p.target.is_some()).count();
        assert_eq!(total, 4 + placed);
        assert!(board.free_cells() == 0 || record.plies.len() >= 2);
        // Colors alternate every ply, passes included.
        for pair in record.plies.windows(2) {
            assert_ne!(pair[0].color, pair[1].color);
        }
    }

    #[test]
    fn test_game_ends_on_double_pass() {
        // Neither side can capture anything.
        let board = Board::empty()
            .with_cell(0, Cell::PlayerA)
            .with_cell(63, Cell::PlayerB);
        let record = play_game_with(
            board,
            SearchConfig::default(),
            Opponent::Engine,
            FixedClock::zero,
            |_, _| {},
        )
        .unwrap();
        assert_eq!(record.plies.len(), 2);
        assert!(record.plies.iter().all(|p| p.target.is_none()));
        assert_eq!(record.winner(), None);
    }
}
