//! Game-tree nodes for the minimax search.
//!
//! A node owns its board and, once expanded, its children. Children are
//! generated on first access and cached; the tree is dropped as a whole when
//! the move decision completes.

use crate::board::{Board, Cell};
use crate::constants::{MAX_NODE_SENTINEL, MIN_NODE_SENTINEL};
use crate::movegen::{generate_moves, Move};
use crate::simulate::{apply, SimulateError};

/// A node in the search tree.
///
/// `my_color` is the side to move at this node. Colors swap and the role
/// flips at every ply.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Position at this node
    pub board: Board,
    /// Side to move
    pub my_color: Cell,
    /// Side not to move
    pub opponent_color: Cell,
    /// Whether this node maximizes the root player's score
    pub is_max: bool,
    /// Plies below the root
    pub depth: u32,
    /// Running minimax value, starting at the role's sentinel
    pub score: f64,
    /// Move that produced this node (`None` at the root)
    pub mv: Option<Move>,
    children: Option<Vec<SearchNode>>,
}

impl SearchNode {
    /// Root node: maximizing, `my_color` to move.
    pub fn root(board: Board, my_color: Cell, opponent_color: Cell) -> Self {
        Self::new(board, my_color, opponent_color, true, 0, None)
    }

    fn new(
        board: Board,
        my_color: Cell,
        opponent_color: Cell,
        is_max: bool,
        depth: u32,
        mv: Option<Move>,
    ) -> Self {
        Self {
            board,
            my_color,
            opponent_color,
            is_max,
            depth,
            score: if is_max {
                MAX_NODE_SENTINEL
            } else {
                MIN_NODE_SENTINEL
            },
            mv,
            children: None,
        }
    }

    /// Generate children if not already done. Children follow the move
    /// generator's order (increasing target index).
    pub fn expand(&mut self) -> Result<(), SimulateError> {
        if self.children.is_some() {
            return Ok(());
        }
        let moves = generate_moves(&self.board, self.my_color, self.opponent_color);
        let mut children = Vec::with_capacity(moves.len());
        for mv in moves {
            let board = apply(&self.board, &mv, self.my_color)?;
            children.push(Self::new(
                board,
                self.opponent_color,
                self.my_color,
                !self.is_max,
                self.depth + 1,
                Some(mv),
            ));
        }
        self.children = Some(children);
        Ok(())
    }

    pub fn is_expanded(&self) -> bool {
        self.children.is_some()
    }

    /// Children generated so far; empty before expansion.
    pub fn children(&self) -> &[SearchNode] {
        self.children.as_deref().unwrap_or_default()
    }

    pub fn children_mut(&mut self) -> &mut [SearchNode] {
        self.children.as_deref_mut().unwrap_or_default()
    }

    /// Drop the subtree below this node, keeping its score and move.
    /// Called once a child has been fully scored and will not be revisited.
    pub fn prune_subtree(&mut self) {
        if let Some(children) = self.children.as_mut() {
            children.clear();
            children.shrink_to_fit();
        }
    }

    /// First child with the highest score. Ties go to the earliest child.
    pub fn best_child(&self) -> Option<&SearchNode> {
        self.children()
            .iter()
            .fold(None, |best: Option<&SearchNode>, child| match best {
                Some(b) if b.score >= child.score => Some(b),
                _ => Some(child),
            })
    }
}
