//! Integration tests for reversi-ab
//!
//! Covers move generation against a brute-force reference, pruning against
//! plain minimax, tie-breaking, and the deadline and no-move outcomes.

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;

use reversi_ab::board::{Board, Cell};
use reversi_ab::clock::{FixedClock, WallClock};
use reversi_ab::config::SearchConfig;
use reversi_ab::eval::Evaluator;
use reversi_ab::movegen::{Move, count_moves, generate_moves};
use reversi_ab::player::Player;
use reversi_ab::search::{Searcher, choose_move, minimax};
use reversi_ab::simulate::apply;

const A: Cell = Cell::PlayerA;
const B: Cell = Cell::PlayerB;

// =============================================================================
// Helpers
// =============================================================================

/// Cells flipped by placing `mover` at (row, col), computed on (row, col)
/// pairs with signed arithmetic. Independent of the library's ray walker.
fn brute_force_flips(board: &Board, row: i32, col: i32, mover: Cell, opponent: Cell) -> Vec<usize> {
    let mut flips = Vec::new();
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let mut line = Vec::new();
            let (mut r, mut c) = (row + dr, col + dc);
            while (0..8).contains(&r) && (0..8).contains(&c) {
                let idx = (r * 8 + c) as usize;
                let cell = board.get(idx);
                if cell == opponent {
                    line.push(idx);
                } else {
                    if cell == mover {
                        flips.extend(line.iter().copied());
                    }
                    break;
                }
                r += dr;
                c += dc;
            }
        }
    }
    flips.sort_unstable();
    flips
}

/// Board reached from the opening by `plies` random legal moves (passing
/// when stuck).
fn random_position(rng: &mut fastrand::Rng, plies: usize) -> (Board, Cell) {
    let mut board = Board::initial();
    let mut to_move = A;
    for _ in 0..plies {
        let moves = generate_moves(&board, to_move, to_move.opponent());
        if !moves.is_empty() {
            let mv = &moves[rng.usize(..moves.len())];
            board = apply(&board, mv, to_move).unwrap();
        }
        to_move = to_move.opponent();
    }
    (board, to_move)
}

/// Arbitrary (not necessarily reachable) board.
fn random_board(rng: &mut fastrand::Rng) -> Board {
    Board::from_cells((0..64).map(|_| match rng.u8(0..4) {
        0 | 1 => Cell::Empty,
        2 => A,
        _ => B,
    }))
    .unwrap()
}

fn capped(depth: u32) -> SearchConfig {
    SearchConfig::default()
        .with_time_budget(Duration::from_secs(3600))
        .with_max_depth(Some(depth))
}

fn target(mv: &Option<Move>) -> Option<usize> {
    mv.as_ref().and_then(Move::target)
}

// =============================================================================
// Move generation
// =============================================================================

#[test]
fn test_generated_moves_are_sound() {
    let mut rng = fastrand::Rng::with_seed(11);
    for plies in 0..40 {
        let (board, mover) = random_position(&mut rng, plies);
        let opponent = mover.opponent();
        for mv in generate_moves(&board, mover, opponent) {
            assert!(!mv.flips().is_empty());
            let next = apply(&board, &mv, mover).unwrap();
            for &pt in mv.captures() {
                assert_eq!(next.get(pt), mover);
            }
        }
    }
}

#[test]
fn test_generator_matches_brute_force() {
    let mut rng = fastrand::Rng::with_seed(42);
    for _ in 0..300 {
        let board = random_board(&mut rng);
        for (mover, opponent) in [(A, B), (B, A)] {
            let moves = generate_moves(&board, mover, opponent);
            let mut generated = moves.iter();
            for idx in 0..64 {
                let expected = if board.get(idx) == Cell::Empty {
                    brute_force_flips(&board, (idx / 8) as i32, (idx % 8) as i32, mover, opponent)
                } else {
                    Vec::new()
                };
                if expected.is_empty() {
                    assert!(moves.iter().all(|m| m.target() != Some(idx)));
                    continue;
                }
                let mv = generated.next().expect("generator missed a legal move");
                assert_eq!(mv.target(), Some(idx));
                let mut flips = mv.flips().to_vec();
                flips.sort_unstable();
                assert_eq!(flips, expected);
            }
            assert!(generated.next().is_none());
            assert_eq!(count_moves(&board, mover, opponent), moves.len());
        }
    }
}

#[test]
fn test_moves_are_index_ordered() {
    let mut rng = fastrand::Rng::with_seed(5);
    for plies in 0..30 {
        let (board, mover) = random_position(&mut rng, plies);
        let targets: Vec<usize> = generate_moves(&board, mover, mover.opponent())
            .iter()
            .filter_map(Move::target)
            .collect();
        assert!(targets.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_apply_never_mutates_input() {
    let mut rng = fastrand::Rng::with_seed(9);
    let (board, mover) = random_position(&mut rng, 20);
    let before = board;
    for mv in generate_moves(&board, mover, mover.opponent()) {
        let next = apply(&board, &mv, mover).unwrap();
        assert_ne!(next, board);
    }
    assert_eq!(board, before);
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_alpha_beta_matches_minimax() {
    let ev = Evaluator::default();
    let mut rng = fastrand::Rng::with_seed(2024);
    for plies in [0, 3, 8, 14, 22, 35, 48, 54] {
        let (board, mover) = random_position(&mut rng, plies);
        for depth in 1..=3 {
            let reference = minimax(&board, mover, mover.opponent(), &ev, depth).unwrap();
            let mut searcher = Searcher::new(&ev, capped(depth), FixedClock::zero());
            let outcome = searcher.search(&board, mover, mover.opponent()).unwrap();
            match reference {
                Some((mv, value)) => {
                    assert_eq!(outcome.best, Some(mv), "plies={plies} depth={depth}");
                    assert_eq!(outcome.score, value);
                }
                None => assert_eq!(outcome.best, None),
            }
        }
    }
}

#[test]
fn test_pruning_visits_fewer_nodes_than_full_tree() {
    fn count_nodes(board: &Board, mover: Cell, depth: u32) -> u64 {
        let moves = generate_moves(board, mover, mover.opponent());
        if depth == 0 || moves.is_empty() {
            return 1;
        }
        1 + moves
            .iter()
            .map(|mv| count_nodes(&apply(board, mv, mover).unwrap(), mover.opponent(), depth - 1))
            .sum::<u64>()
    }

    let ev = Evaluator::default();
    let board = Board::initial();
    let mut searcher = Searcher::new(&ev, capped(4), FixedClock::zero());
    let outcome = searcher.search(&board, A, B).unwrap();
    assert!(outcome.stats.nodes < count_nodes(&board, A, 4));
}

#[test]
fn test_tie_break_picks_first_generated() {
    // The opening is symmetric: all four moves evaluate identically.
    let ev = Evaluator::default();
    let board = Board::initial();
    let children: Vec<f64> = generate_moves(&board, A, B)
        .iter()
        .map(|mv| ev.score(&apply(&board, mv, A).unwrap(), B, A, false))
        .collect();
    assert!(children.windows(2).all(|w| w[0] == w[1]));

    for depth in 1..=2 {
        let mv = choose_move(&board, A, B, &ev, capped(depth), FixedClock::zero()).unwrap();
        assert_eq!(target(&mv), Some(19));
    }
}

#[test]
fn test_opening_end_to_end() {
    let player = Player::new('X', 'O', '.')
        .unwrap()
        .with_config(SearchConfig::default().with_time_budget(Duration::from_secs(2)));
    let rows: Vec<Vec<char>> = Board::initial()
        .to_string()
        .lines()
        .map(|l| l.chars().filter(|c| !c.is_whitespace()).collect())
        .collect();
    let start = Instant::now();
    let mv = player.play(&rows).unwrap();
    assert!(matches!(mv, Some((2, 3) | (3, 2) | (4, 5) | (5, 4))), "{mv:?}");
    assert!(start.elapsed() < Duration::from_secs(30));
}

#[test]
fn test_no_move_when_board_is_all_opponent() {
    let ev = Evaluator::default();
    let board = Board::from_cells(vec![B; 64]).unwrap();
    let mv = choose_move(&board, A, B, &ev, SearchConfig::default(), WallClock::default());
    assert_eq!(mv, Ok(None));

    // One hole, but nothing of ours to close a line on.
    let holed = board.with_cell(27, Cell::Empty);
    let mv = choose_move(&holed, A, B, &ev, SearchConfig::default(), WallClock::default());
    assert_eq!(mv, Ok(None));
}

#[test]
fn test_zero_budget_returns_legal_root_move() {
    let ev = Evaluator::default();
    let mut rng = fastrand::Rng::with_seed(77);
    for plies in [0, 10, 25, 40] {
        let (board, mover) = random_position(&mut rng, plies);
        let legal: Vec<usize> = generate_moves(&board, mover, mover.opponent())
            .iter()
            .filter_map(Move::target)
            .collect();
        let config = SearchConfig::default().with_time_budget(Duration::ZERO);
        let mv = choose_move(&board, mover, mover.opponent(), &ev, config, WallClock::default())
            .unwrap();
        if legal.is_empty() {
            assert_eq!(mv, None);
        } else {
            assert!(legal.contains(&target(&mv).unwrap()));
        }
    }
}

#[test]
fn test_expired_clock_falls_back_to_first_move() {
    let ev = Evaluator::default();
    let mut rng = fastrand::Rng::with_seed(13);
    let (board, mover) = random_position(&mut rng, 12);
    let first = generate_moves(&board, mover, mover.opponent())
        .into_iter()
        .next();
    let mv = choose_move(
        &board,
        mover,
        mover.opponent(),
        &ev,
        SearchConfig::default(),
        FixedClock::expired(),
    )
    .unwrap();
    assert_eq!(mv, first);
}

#[test]
fn test_engine_takes_winning_corner() {
    // X's only move takes corner 0 and flips the rest of the top row.
    let board: Board = "
        . O O O O O O X
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . ."
        .parse()
        .unwrap();
    let ev = Evaluator::default();
    let mv = choose_move(&board, A, B, &ev, capped(1), FixedClock::zero()).unwrap();
    assert_eq!(target(&mv), Some(0));
    assert_eq!(mv.unwrap().flips().len(), 6);
}
