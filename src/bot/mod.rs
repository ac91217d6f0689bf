//! Computer players: position evaluation, game-tree search and the AI player
//! that ties them to a seat at the table.

mod ai_player;
mod evaluator;
mod minimax;
mod random_bot;

pub use ai_player::{AiPlayer, DEFAULT_SEARCH_DEPTH};
pub use evaluator::{
    DotsEvaluator, EvaluationBreakdown, LOSE_SCORE, PlayerFeatures, WIN_SCORE, is_capturing_move,
    is_safe_move,
};
pub use minimax::{MinimaxAlphaBeta, MoveClass, classify_move, order_moves};
pub use random_bot::RandomBot;

use crate::{GameError, GameState, Move, PlayerId};

/// Scores a position from one player's point of view. Positive favours `player`.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, state: &GameState, player: PlayerId) -> i32;
}

/// What a search found, plus how much work it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    pub best_move: Move,
    /// Value of `best_move` for the searching player.
    pub score: i32,
    /// Interior and leaf nodes visited below the root.
    pub nodes: u64,
}

/// Picks a move for `player` in `state`.
///
/// Implementations may mutate `state` while searching but must leave it
/// exactly as they found it.
pub trait SearchStrategy: Send + Sync {
    fn name(&self) -> &str;

    fn search(
        &self,
        state: &mut GameState,
        player: PlayerId,
        depth: u32,
    ) -> Result<SearchReport, GameError>;

    fn best_move(
        &self,
        state: &mut GameState,
        player: PlayerId,
        depth: u32,
    ) -> Result<Move, GameError> {
        self.search(state, player, depth)
            .map(|report| report.best_move)
    }
}
