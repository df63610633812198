//! Boundary between a game harness and the search engine.
//!
//! The harness keeps its own 2-D board with its own color tokens. A
//! [`Player`] is built once with the three tokens (own disc, opponent disc,
//! empty cell) and then asked for a move on each turn. Tokens are only
//! compared for equality.

use log::debug;
use thiserror::Error;

use crate::board::{Board, BoardError, Cell};
use crate::clock::{Clock, WallClock};
use crate::config::SearchConfig;
use crate::constants::SIDE;
use crate::eval::Evaluator;
use crate::movegen::Move;
use crate::search::Searcher;
use crate::simulate::SimulateError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("own, opponent, and empty tokens must be pairwise distinct")]
    IndistinctColors,
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Simulate(#[from] SimulateError),
}

/// A search-backed player for one fixed color.
#[derive(Debug, Clone)]
pub struct Player<T> {
    my_color: T,
    opponent_color: T,
    empty: T,
    evaluator: Evaluator,
    config: SearchConfig,
}

impl<T: PartialEq> Player<T> {
    pub fn new(my_color: T, opponent_color: T, empty: T) -> Result<Self, PlayerError> {
        if my_color == opponent_color || my_color == empty || opponent_color == empty {
            return Err(PlayerError::IndistinctColors);
        }
        Ok(Self {
            my_color,
            opponent_color,
            empty,
            evaluator: Evaluator::default(),
            config: SearchConfig::default(),
        })
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn cell_of(&self, token: &T) -> Option<Cell> {
        if *token == self.my_color {
            Some(Cell::PlayerA)
        } else if *token == self.opponent_color {
            Some(Cell::PlayerB)
        } else if *token == self.empty {
            Some(Cell::Empty)
        } else {
            None
        }
    }

    /// Flatten harness rows into a board with this player as `PlayerA`.
    pub fn flatten<R: AsRef<[T]>>(&self, rows: &[R]) -> Result<Board, BoardError> {
        let mut cells = Vec::with_capacity(SIDE * SIDE);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != SIDE {
                return Err(BoardError::RaggedRow {
                    row: r,
                    expected: SIDE,
                    found: row.len(),
                });
            }
            for (c, token) in row.iter().enumerate() {
                let cell = self
                    .cell_of(token)
                    .ok_or(BoardError::UnknownToken { row: r, col: c })?;
                cells.push(cell);
            }
        }
        Board::from_cells(cells)
    }

    /// Choose a move on the harness board: `(row, col)`, or `None` to pass.
    pub fn play<R: AsRef<[T]>>(&self, rows: &[R]) -> Result<Option<(usize, usize)>, PlayerError> {
        self.play_with_clock(rows, WallClock::default())
    }

    pub fn play_with_clock<R: AsRef<[T]>, C: Clock>(
        &self,
        rows: &[R],
        clock: C,
    ) -> Result<Option<(usize, usize)>, PlayerError> {
        let board = self.flatten(rows)?;
        let outcome = Searcher::new(&self.evaluator, self.config, clock).search(
            &board,
            Cell::PlayerA,
            Cell::PlayerB,
        )?;
        let target = outcome.best.as_ref().and_then(Move::target);
        if target.is_none() {
            debug!("no legal move, passing");
        }
        Ok(target.map(Board::coords))
    }
}
