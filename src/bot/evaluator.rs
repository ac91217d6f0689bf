use std::fmt::Display;

use crate::{Evaluator, GameState, Move, Outcome, PlayerId};

pub const WIN_SCORE: i32 = 10_000;

pub const LOSE_SCORE: i32 = -WIN_SCORE;

const MATERIAL_WEIGHT: i32 = 100;
const ALMOST_WEIGHT: i32 = 20;
const SAFE_MOVES_WEIGHT: i32 = 5;
const TWO_SIDED_WEIGHT: i32 = 2;

/// Weighted-feature heuristic for dots-and-boxes positions.
///
/// Terminal positions score [`WIN_SCORE`], [`LOSE_SCORE`] or 0. Otherwise the
/// score is `100·material + 20·(opp_almost − own_almost)` plus
/// `5·(own_safe − opp_safe) + 2·(own_two − opp_two)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotsEvaluator;

/// Counts over unowned cells and legal moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerFeatures {
    /// Cells with three drawn edges.
    pub almost_cells: i32,
    /// Cells with two drawn edges.
    pub two_sided_cells: i32,
    pub one_sided_cells: i32,
    pub empty_cells: i32,
    /// Legal moves that leave no cell with three drawn edges.
    pub safe_moves: i32,
}

impl PlayerFeatures {
    pub fn collect(state: &GameState) -> Self {
        let mut features = PlayerFeatures::default();
        for cell in state.cells_owned().zeroes() {
            match state.drawn_edges(cell) {
                3 => features.almost_cells += 1,
                2 => features.two_sided_cells += 1,
                1 => features.one_sided_cells += 1,
                0 => features.empty_cells += 1,
                _ => {}
            }
        }
        features.safe_moves = state
            .generate_moves()
            .filter(|&mv| is_safe_move(state, mv))
            .count() as i32;
        features
    }
}

impl Display for PlayerFeatures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Almost:{}, TwoSided:{}, OneSided:{}, Empty:{}, Safe:{}",
            self.almost_cells,
            self.two_sided_cells,
            self.one_sided_cells,
            self.empty_cells,
            self.safe_moves
        )
    }
}

/// Per-term contributions of one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationBreakdown {
    pub total: i32,
    pub material: i32,
    pub almost: i32,
    pub safe_moves: i32,
    pub two_sided: i32,
    pub own: PlayerFeatures,
    pub opponent: PlayerFeatures,
    pub is_terminal: bool,
}

impl Display for EvaluationBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_terminal {
            return write!(f, "Terminal: {}", self.total);
        }
        write!(
            f,
            "Total:{} = Material:{} + Almost:{} + Safe:{} + TwoSided:{}",
            self.total, self.material, self.almost, self.safe_moves, self.two_sided
        )
    }
}

impl DotsEvaluator {
    pub fn breakdown(&self, state: &GameState, player: PlayerId) -> EvaluationBreakdown {
        if state.is_terminal() {
            return EvaluationBreakdown {
                total: terminal_score(state, player),
                is_terminal: true,
                ..Default::default()
            };
        }

        // Cell and safe-move counts belong to the shared board, so both sides
        // are scored from the same features.
        let own = PlayerFeatures::collect(state);
        let opponent = own;

        let material =
            (state.score(player) as i32 - state.score(player.other()) as i32) * MATERIAL_WEIGHT;
        let almost = (opponent.almost_cells - own.almost_cells) * ALMOST_WEIGHT;
        let safe_moves = (own.safe_moves - opponent.safe_moves) * SAFE_MOVES_WEIGHT;
        let two_sided = (own.two_sided_cells - opponent.two_sided_cells) * TWO_SIDED_WEIGHT;

        EvaluationBreakdown {
            total: material + almost + safe_moves + two_sided,
            material,
            almost,
            safe_moves,
            two_sided,
            own,
            opponent,
            is_terminal: false,
        }
    }

    pub fn is_capturing_move(&self, state: &GameState, mv: Move) -> bool {
        is_capturing_move(state, mv)
    }

    pub fn is_safe_move(&self, state: &GameState, mv: Move) -> bool {
        is_safe_move(state, mv)
    }
}

impl Evaluator for DotsEvaluator {
    fn evaluate(&self, state: &GameState, player: PlayerId) -> i32 {
        self.breakdown(state, player).total
    }
}

fn terminal_score(state: &GameState, player: PlayerId) -> i32 {
    match state.winner() {
        Ok(Outcome::Winner(winner)) if winner == player => WIN_SCORE,
        Ok(Outcome::Winner(_)) => LOSE_SCORE,
        Ok(Outcome::Tie) | Err(_) => 0,
    }
}

/// Unowned cells bordering the edge of `mv`, with their drawn-edge counts.
/// Empty for out-of-range edges.
fn open_neighbours(state: &GameState, mv: Move) -> impl Iterator<Item = usize> + '_ {
    let board = state.board();
    let cells: &[usize] = if mv.edge_id() < board.edge_count() {
        board.edges_to_cells(mv.edge_id())
    } else {
        &[]
    };
    cells
        .iter()
        .filter(|&&cell| !state.cells_owned().contains(cell))
        .map(|&cell| state.drawn_edges(cell))
}

/// True if drawing `mv` completes at least one unowned cell.
pub fn is_capturing_move(state: &GameState, mv: Move) -> bool {
    open_neighbours(state, mv).any(|drawn| drawn == 3)
}

/// True if drawing `mv` leaves no unowned cell with exactly three drawn edges.
/// Out-of-range edges are never safe.
pub fn is_safe_move(state: &GameState, mv: Move) -> bool {
    mv.edge_id() < state.board().edge_count() && open_neighbours(state, mv).all(|drawn| drawn != 2)
}
