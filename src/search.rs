//! Time-bounded minimax with alpha-beta pruning.
//!
//! The search alternates maximizing and minimizing nodes. A node is scored
//! statically when the clock has passed the budget, when the optional depth
//! cap is reached, or when the side to move has no legal move.
//!
//! The clock is only read on node entry, so the expansion of a single node
//! can overshoot the budget. If the deadline fires before any root child is
//! scored, every child keeps its sentinel and the first generated move wins.

use std::time::Duration;

use log::{debug, trace};

use crate::board::{Board, Cell};
use crate::clock::Clock;
use crate::config::SearchConfig;
use crate::constants::{MAX_NODE_SENTINEL, MIN_NODE_SENTINEL};
use crate::eval::Evaluator;
use crate::movegen::{generate_moves, Move};
use crate::node::SearchNode;
use crate::simulate::{apply, SimulateError};

/// Counters collected during one decision.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchStats {
    /// Nodes entered
    pub nodes: u64,
    /// Alpha or beta cutoffs taken
    pub cutoffs: u64,
    /// Deepest ply entered
    pub max_depth: u32,
    /// Whether any node was cut off by the clock
    pub deadline_hit: bool,
    /// Time spent, as reported by the search clock
    pub elapsed: Duration,
}

/// Result of one decision.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Chosen move, `None` when the side to move has no legal move
    pub best: Option<Move>,
    /// Backed-up score of the chosen move
    pub score: f64,
    pub stats: SearchStats,
}

/// Runs one move decision. Holds nothing across decisions except the
/// evaluator and configuration.
pub struct Searcher<'a, C: Clock> {
    evaluator: &'a Evaluator,
    config: SearchConfig,
    clock: C,
    stats: SearchStats,
}

impl<'a, C: Clock> Searcher<'a, C> {
    pub fn new(evaluator: &'a Evaluator, config: SearchConfig, clock: C) -> Self {
        Self {
            evaluator,
            config,
            clock,
            stats: SearchStats::default(),
        }
    }

    /// Search `board` with `my_color` to move and return the chosen move.
    pub fn search(
        &mut self,
        board: &Board,
        my_color: Cell,
        opponent_color: Cell,
    ) -> Result<SearchOutcome, SimulateError> {
        self.clock.restart();
        self.stats = SearchStats::default();

        let mut root = SearchNode::root(*board, my_color, opponent_color);
        root.expand()?;
        if root.children().is_empty() {
            debug!("no legal move for {my_color:?}");
            return Ok(SearchOutcome {
                best: None,
                score: self.evaluator.score(board, my_color, opponent_color, true),
                stats: self.stats,
            });
        }

        self.max_value(&mut root, MAX_NODE_SENTINEL, MIN_NODE_SENTINEL)?;
        self.stats.elapsed = self.clock.elapsed();

        let (best, score) = match root.best_child() {
            Some(child) => (child.mv.clone(), child.score),
            None => (None, root.score),
        };
        debug!(
            "search: move={:?} score={score} nodes={} cutoffs={} depth={} elapsed={:?}{}",
            best.as_ref().and_then(Move::target),
            self.stats.nodes,
            self.stats.cutoffs,
            self.stats.max_depth,
            self.stats.elapsed,
            if self.stats.deadline_hit { " (deadline)" } else { "" },
        );
        Ok(SearchOutcome {
            best,
            score,
            stats: self.stats,
        })
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    fn enter(&mut self, node: &SearchNode) {
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(node.depth);
    }

    fn out_of_time(&mut self, node: &SearchNode) -> bool {
        if self.clock.elapsed() > self.config.time_budget {
            if node.depth == 0 {
                trace!("deadline reached before the root was searched");
            }
            self.stats.deadline_hit = true;
            return true;
        }
        false
    }

    fn at_depth_cap(&self, node: &SearchNode) -> bool {
        self.config.max_depth.is_some_and(|cap| node.depth >= cap)
    }

    /// Score `node` statically if it is a leaf of this search. Expands it otherwise.
    fn leaf_score(&mut self, node: &mut SearchNode) -> Result<Option<f64>, SimulateError> {
        if !self.out_of_time(node) && !self.at_depth_cap(node) {
            node.expand()?;
            if !node.children().is_empty() {
                return Ok(None);
            }
        }
        node.score = self.evaluator.score(
            &node.board,
            node.my_color,
            node.opponent_color,
            node.is_max,
        );
        Ok(Some(node.score))
    }

    fn max_value(
        &mut self,
        node: &mut SearchNode,
        mut alpha: f64,
        beta: f64,
    ) -> Result<f64, SimulateError> {
        self.enter(node);
        if let Some(score) = self.leaf_score(node)? {
            return Ok(score);
        }
        for i in 0..node.children().len() {
            let child = &mut node.children_mut()[i];
            let value = self.min_value(child, alpha, beta)?;
            child.prune_subtree();
            node.score = node.score.max(value);
            if node.score >= beta {
                self.stats.cutoffs += 1;
                return Ok(node.score);
            }
            alpha = alpha.max(node.score);
        }
        Ok(node.score)
    }

    fn min_value(
        &mut self,
        node: &mut SearchNode,
        alpha: f64,
        mut beta: f64,
    ) -> Result<f64, SimulateError> {
        self.enter(node);
        if let Some(score) = self.leaf_score(node)? {
            return Ok(score);
        }
        for i in 0..node.children().len() {
            let child = &mut node.children_mut()[i];
            let value = self.max_value(child, alpha, beta)?;
            child.prune_subtree();
            node.score = node.score.min(value);
            if node.score <= alpha {
                self.stats.cutoffs += 1;
                return Ok(node.score);
            }
            beta = beta.min(node.score);
        }
        Ok(node.score)
    }
}

/// Choose a move for `my_color`, or `None` if it has no legal move.
pub fn choose_move<C: Clock>(
    board: &Board,
    my_color: Cell,
    opponent_color: Cell,
    evaluator: &Evaluator,
    config: SearchConfig,
    clock: C,
) -> Result<Option<Move>, SimulateError> {
    Searcher::new(evaluator, config, clock)
        .search(board, my_color, opponent_color)
        .map(|outcome| outcome.best)
}

/// Plain minimax to a fixed depth, without pruning or a clock.
///
/// Returns the first root move achieving the best value. Used as a
/// reference for the pruned search.
pub fn minimax(
    board: &Board,
    my_color: Cell,
    opponent_color: Cell,
    evaluator: &Evaluator,
    depth: u32,
) -> Result<Option<(Move, f64)>, SimulateError> {
    let mut best: Option<(Move, f64)> = None;
    for mv in generate_moves(board, my_color, opponent_color) {
        let child = apply(board, &mv, my_color)?;
        let value = minimax_value(
            &child,
            opponent_color,
            my_color,
            false,
            evaluator,
            depth.saturating_sub(1),
        )?;
        if best.as_ref().is_none_or(|(_, b)| value > *b) {
            best = Some((mv, value));
        }
    }
    Ok(best)
}

fn minimax_value(
    board: &Board,
    my_color: Cell,
    opponent_color: Cell,
    is_max: bool,
    evaluator: &Evaluator,
    depth_left: u32,
) -> Result<f64, SimulateError> {
    let moves = generate_moves(board, my_color, opponent_color);
    if depth_left == 0 || moves.is_empty() {
        return Ok(evaluator.score(board, my_color, opponent_color, is_max));
    }
    let mut best = if is_max {
        MAX_NODE_SENTINEL
    } else {
        MIN_NODE_SENTINEL
    };
    for mv in &moves {
        let child = apply(board, mv, my_color)?;
        let value = minimax_value(
            &child,
            opponent_color,
            my_color,
            !is_max,
            evaluator,
            depth_left - 1,
        )?;
        best = if is_max { best.max(value) } else { best.min(value) };
    }
    Ok(best)
}
