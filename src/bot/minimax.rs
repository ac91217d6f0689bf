use std::cmp;

use smallvec::SmallVec;
use tracing::debug;

use crate::{
    DotsEvaluator, Evaluator, GameError, GameState, Move, PlayerId, SearchReport, SearchStrategy,
    is_capturing_move, is_safe_move,
};

const INFINITY: i32 = i32::MAX / 2;

/// Move-ordering tier. Variants are declared in search order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MoveClass {
    /// Completes at least one unowned cell.
    Capturing,
    /// Leaves no unowned cell with three drawn edges.
    Safe,
    /// Hands the opponent a three-sided cell.
    Dangerous,
}

pub fn classify_move(state: &GameState, mv: Move) -> MoveClass {
    if is_capturing_move(state, mv) {
        MoveClass::Capturing
    } else if is_safe_move(state, mv) {
        MoveClass::Safe
    } else {
        MoveClass::Dangerous
    }
}

/// Legal moves grouped capturing, safe, dangerous; ascending edge id within a group.
pub fn order_moves(state: &GameState) -> SmallVec<[Move; 128]> {
    let mut moves: SmallVec<[Move; 128]> = state.generate_moves().collect();
    // Stable sort keeps the ascending edge order inside each tier.
    moves.sort_by_key(|&mv| classify_move(state, mv));
    moves
}

/// Depth-limited negamax with alpha-beta pruning.
///
/// Searches in place on the caller's [`GameState`] through apply/undo and
/// hands it back unchanged. Holds no per-search state, so one instance can
/// serve searches on independent states from several threads.
#[derive(Debug, Clone, Default)]
pub struct MinimaxAlphaBeta<E = DotsEvaluator> {
    evaluator: E,
}

impl<E: Evaluator> MinimaxAlphaBeta<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }
}

impl<E: Evaluator> SearchStrategy for MinimaxAlphaBeta<E> {
    fn name(&self) -> &str {
        "MinimaxAlphaBeta"
    }

    fn search(
        &self,
        state: &mut GameState,
        player: PlayerId,
        depth: u32,
    ) -> Result<SearchReport, GameError> {
        if depth == 0 {
            return Err(GameError::InvalidDepth(depth));
        }
        if state.is_terminal() {
            return Err(GameError::GameOver);
        }

        let mut nodes = 0;
        let (best_move, score) =
            search_best_move(&self.evaluator, state, player, depth, &mut nodes);

        debug!(
            player = player.index(),
            depth,
            edge = best_move.edge_id(),
            score,
            nodes,
            "minimax search finished"
        );

        Ok(SearchReport {
            best_move,
            score,
            nodes,
        })
    }
}

fn search_best_move<E: Evaluator>(
    evaluator: &E,
    state: &mut GameState,
    player: PlayerId,
    depth: u32,
    nodes: &mut u64,
) -> (Move, i32) {
    let moves = order_moves(state);

    let mut alpha = -INFINITY;
    let beta = INFINITY;
    let mut best_score = -INFINITY;
    let mut best_move = moves[0];

    for mv in moves {
        let result = state.apply_unchecked(mv);
        let score = -alpha_beta(
            evaluator,
            state,
            player.other(),
            next_depth(depth),
            -beta,
            -alpha,
            nodes,
        );
        state.undo(result);

        if score > best_score {
            best_score = score;
            best_move = mv;
        }
        // No cutoff at the root: the move itself is needed, not just its value.
        alpha = cmp::max(alpha, score);
    }

    (best_move, best_score)
}

fn alpha_beta<E: Evaluator>(
    evaluator: &E,
    state: &mut GameState,
    player: PlayerId,
    depth: u32,
    mut alpha: i32,
    beta: i32,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;

    if state.is_terminal() || depth == 0 {
        return evaluator.evaluate(state, player);
    }

    let mut best_score = -INFINITY;

    for mv in order_moves(state) {
        let result = state.apply_unchecked(mv);
        let score = -alpha_beta(
            evaluator,
            state,
            player.other(),
            next_depth(depth),
            -beta,
            -alpha,
            nodes,
        );
        state.undo(result);

        best_score = cmp::max(best_score, score);
        alpha = cmp::max(alpha, score);
        if alpha >= beta {
            break;
        }
    }

    best_score
}

/// Every ply costs one unit of depth, captures included: capture chains get
/// no extra lookahead.
fn next_depth(depth: u32) -> u32 {
    depth - 1
}
