//! Uniformly random player.
//!
//! Used for diagnostics and to randomise match openings. Seeded instances are
//! fully reproducible.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::controller::Controller;
use crate::errors::{CheckersError, CheckersResult};
use crate::game_state::game_state::GameState;

pub struct RandomController {
    rng: StdRng,
}

impl RandomController {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick one of `children` uniformly.
    pub fn choose(&mut self, children: &[GameState]) -> Option<GameState> {
        children.choose(&mut self.rng).cloned()
    }
}

impl Default for RandomController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for RandomController {
    fn name(&self) -> &str {
        "Random"
    }

    fn is_ai(&self) -> bool {
        true
    }

    fn play_move(&mut self, game_state: &GameState) -> CheckersResult<Option<GameState>> {
        let children = game_state.successors()?;
        self.choose(&children)
            .map(Some)
            .ok_or(CheckersError::NoLegalMoves)
    }
}
