use std::fmt::Display;

use tracing::info;

use crate::{GameError, GameState, Move, PlayerId, SearchStrategy};

pub const DEFAULT_SEARCH_DEPTH: u32 = 5;

/// A computer-controlled seat: a player id, a search strategy and a depth.
pub struct AiPlayer {
    player: PlayerId,
    strategy: Box<dyn SearchStrategy>,
    depth: u32,
}

impl AiPlayer {
    pub fn new(
        player: PlayerId,
        strategy: Box<dyn SearchStrategy>,
        depth: u32,
    ) -> Result<Self, GameError> {
        if depth < 1 {
            return Err(GameError::InvalidDepth(depth));
        }
        Ok(Self {
            player,
            strategy,
            depth,
        })
    }

    pub fn with_default_depth(
        player: PlayerId,
        strategy: Box<dyn SearchStrategy>,
    ) -> Result<Self, GameError> {
        Self::new(player, strategy, DEFAULT_SEARCH_DEPTH)
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Chooses this player's next move. Fails if the game is over or it is
    /// the other player's turn.
    pub fn get_move(&self, state: &mut GameState) -> Result<Move, GameError> {
        if state.is_terminal() {
            return Err(GameError::GameOver);
        }
        if state.current_player() != self.player {
            return Err(GameError::NotPlayersTurn {
                player: self.player.index(),
                current: state.current_player().index(),
            });
        }

        let report = self.strategy.search(state, self.player, self.depth)?;
        info!(
            player = self.player.index(),
            strategy = self.strategy.name(),
            edge = report.best_move.edge_id(),
            score = report.score,
            nodes = report.nodes,
            "ai move chosen"
        );
        Ok(report.best_move)
    }
}

impl Display for AiPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AI Player {}: {}, Depth={}",
            self.player,
            self.strategy.name(),
            self.depth
        )
    }
}
