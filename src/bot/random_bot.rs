use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{GameError, GameState, PlayerId, SearchReport, SearchStrategy};

/// Picks uniformly among the legal moves. Depth is validated but otherwise ignored.
pub struct RandomBot {
    rng: Mutex<StdRng>,
}

impl RandomBot {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Reproducible bot for tests and demos.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStrategy for RandomBot {
    fn name(&self) -> &str {
        "RandomBot"
    }

    fn search(
        &self,
        state: &mut GameState,
        _player: PlayerId,
        depth: u32,
    ) -> Result<SearchReport, GameError> {
        if depth == 0 {
            return Err(GameError::InvalidDepth(depth));
        }
        if state.is_terminal() {
            return Err(GameError::GameOver);
        }

        let remaining = state.remaining_edges();
        // A poisoned lock still holds a usable RNG.
        let idx = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .random_range(0..remaining);
        let best_move = state.generate_moves().nth(idx).ok_or(GameError::GameOver)?;

        Ok(SearchReport {
            best_move,
            score: 0,
            nodes: 0,
        })
    }
}
