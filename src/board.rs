//! Flat 8x8 board representation.
//!
//! A [`Board`] is an immutable value: every transformation produces a new
//! board, so sibling search branches can share the parent position freely.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{CELLS, SIDE};

/// Contents of one board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    PlayerA,
    PlayerB,
}

impl Cell {
    /// The other player's color. `Empty` has no opponent and maps to itself.
    pub fn opponent(self) -> Cell {
        match self {
            Cell::PlayerA => Cell::PlayerB,
            Cell::PlayerB => Cell::PlayerA,
            Cell::Empty => Cell::Empty,
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::PlayerA => 'X',
            Cell::PlayerB => 'O',
            Cell::Empty => '.',
        }
    }
}

/// Construction-time validation failures. A malformed board is never
/// truncated or padded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board must have {expected} cells, got {found}")]
    WrongCellCount { expected: usize, found: usize },
    #[error("row {row} must have {expected} cells, got {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unrecognized color token at row {row}, col {col}")]
    UnknownToken { row: usize, col: usize },
    #[error("unrecognized board symbol {0:?}")]
    UnknownSymbol(char),
}

/// A row-major 8x8 grid; index `i` is `(row = i / 8, col = i % 8)`, row 0 on top.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// A board with every cell empty.
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; CELLS],
        }
    }

    /// The standard opening: four center discs placed diagonally.
    ///
    /// `PlayerB` holds (3,3) and (4,4); `PlayerA` holds (3,4) and (4,3).
    pub fn initial() -> Self {
        let mid = SIDE / 2;
        let mut board = Self::empty();
        board.set(Self::index(mid - 1, mid - 1), Cell::PlayerB);
        board.set(Self::index(mid - 1, mid), Cell::PlayerA);
        board.set(Self::index(mid, mid - 1), Cell::PlayerA);
        board.set(Self::index(mid, mid), Cell::PlayerB);
        board
    }

    /// Build a board from exactly 64 cells in row-major order.
    pub fn from_cells<I>(cells: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = Cell>,
    {
        let collected: Vec<Cell> = cells.into_iter().collect();
        let found = collected.len();
        let cells: [Cell; CELLS] = collected.try_into().map_err(|_| BoardError::WrongCellCount {
            expected: CELLS,
            found,
        })?;
        Ok(Self { cells })
    }

    #[inline]
    fn index(row: usize, col: usize) -> usize {
        row * SIDE + col
    }

    /// Flat index of `(row, col)`, or `None` when off the board.
    pub fn index_of(row: usize, col: usize) -> Option<usize> {
        (row < SIDE && col < SIDE).then(|| Self::index(row, col))
    }

    /// `(row, col)` of a flat index.
    #[inline]
    pub fn coords(index: usize) -> (usize, usize) {
        (index / SIDE, index % SIDE)
    }

    /// The cell one step from `index` in direction `(dr, dc)`, or `None` if
    /// that step leaves the board. Column bounds are checked explicitly so a
    /// step east from the last column does not land on the next row.
    pub fn step(index: usize, (dr, dc): (isize, isize)) -> Option<usize> {
        let (row, col) = Self::coords(index);
        let row = row.checked_add_signed(dr)?;
        let col = col.checked_add_signed(dc)?;
        Self::index_of(row, col)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Cell {
        self.cells[index]
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// A copy of this board with one cell replaced.
    pub fn with_cell(&self, index: usize, cell: Cell) -> Self {
        let mut next = *self;
        next.set(index, cell);
        next
    }

    pub(crate) fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    /// Number of cells holding `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Number of empty cells.
    pub fn free_cells(&self) -> usize {
        self.count(Cell::Empty)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(SIDE) {
            for cell in row {
                write!(f, "{} ", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        fmt::Display::fmt(self, f)
    }
}

/// Parses `X`/`O` discs and `.`/`-` empties; whitespace is ignored.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                'X' | 'x' => Ok(Cell::PlayerA),
                'O' | 'o' => Ok(Cell::PlayerB),
                '.' | '-' => Ok(Cell::Empty),
                other => Err(BoardError::UnknownSymbol(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = Board::initial();
        assert_eq!(board.count(Cell::PlayerA), 2);
        assert_eq!(board.count(Cell::PlayerB), 2);
        assert_eq!(board.free_cells(), 60);
        assert_eq!(board.get(27), Cell::PlayerB);
        assert_eq!(board.get(28), Cell::PlayerA);
        assert_eq!(board.get(35), Cell::PlayerA);
        assert_eq!(board.get(36), Cell::PlayerB);
    }

    #[test]
    fn test_coords_roundtrip() {
        for i in 0..CELLS {
            let (row, col) = Board::coords(i);
            assert_eq!(Board::index_of(row, col), Some(i));
        }
        assert_eq!(Board::index_of(8, 0), None);
        assert_eq!(Board::index_of(0, 8), None);
    }

    #[test]
    fn test_step_does_not_wrap() {
        // East from the last column of row 0 would be index 8 by arithmetic.
        assert_eq!(Board::step(7, (0, 1)), None);
        // West from the first column of row 1 would be index 7.
        assert_eq!(Board::step(8, (0, -1)), None);
        assert_eq!(Board::step(0, (-1, 0)), None);
        assert_eq!(Board::step(63, (1, 1)), None);
        assert_eq!(Board::step(9, (1, 1)), Some(18));
        assert_eq!(Board::step(9, (-1, -1)), Some(0));
    }

    #[test]
    fn test_from_cells_rejects_wrong_length() {
        let short = Board::from_cells(vec![Cell::Empty; 63]);
        assert_eq!(
            short,
            Err(BoardError::WrongCellCount {
                expected: 64,
                found: 63
            })
        );
        let long = Board::from_cells(vec![Cell::Empty; 65]);
        assert!(long.is_err());
    }

    #[test]
    fn test_parse_and_display() {
        let text = Board::initial().to_string();
        let parsed: Board = text.parse().unwrap();
        assert_eq!(parsed, Board::initial());
        assert!(text.starts_with(". . . . . . . . \n"));
    }

    #[test]
    fn test_parse_rejects_unknown_symbol() {
        let mut text = ".".repeat(63);
        text.push('?');
        assert_eq!(text.parse::<Board>(), Err(BoardError::UnknownSymbol('?')));
    }

    #[test]
    fn test_with_cell_leaves_original() {
        let board = Board::empty();
        let next = board.with_cell(5, Cell::PlayerA);
        assert_eq!(board.get(5), Cell::Empty);
        assert_eq!(next.get(5), Cell::PlayerA);
    }
}
