//! Move-selection abstraction shared by human, AI and random players.
//!
//! The game loop only ever asks a controller for the next state. Returning
//! `Ok(None)` means the controller gave up (a human typed `quit` or input
//! ended); the loop treats that as the end of the game.

use crate::errors::CheckersResult;
use crate::game_state::checkers_types::Side;
use crate::game_state::game_state::GameState;

/// Running averages over every move a controller has played.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerMetrics {
    pub moves: usize,
    pub average_time_secs: f64,
    pub average_nodes: f64,
}

impl ControllerMetrics {
    pub fn record(&mut self, time_secs: f64, nodes: usize) {
        let n = self.moves as f64;
        self.average_time_secs = (self.average_time_secs * n + time_secs) / (n + 1.0);
        self.average_nodes = (self.average_nodes * n + nodes as f64) / (n + 1.0);
        self.moves += 1;
    }
}

pub trait Controller {
    fn name(&self) -> &str;

    fn is_ai(&self) -> bool;

    fn new_game(&mut self) {}

    /// Next state after this controller's ply, or `None` to quit.
    fn play_move(&mut self, game_state: &GameState) -> CheckersResult<Option<GameState>>;

    fn metrics(&self) -> Option<ControllerMetrics> {
        None
    }
}

/// `"Player 1 (AI)"` style label used by the game loop.
pub fn seat_label(side: Side, controller: &dyn Controller) -> String {
    format!(
        "{} ({})",
        side.label(),
        if controller.is_ai() { "AI" } else { "Human" }
    )
}

#[cfg(test)]
mod tests {
    use super::ControllerMetrics;

    #[test]
    fn metrics_keep_running_averages() {
        let mut metrics = ControllerMetrics::default();
        metrics.record(1.0, 10);
        assert_eq!(metrics.moves, 1);
        assert_eq!(metrics.average_time_secs, 1.0);
        assert_eq!(metrics.average_nodes, 10.0);

        metrics.record(3.0, 20);
        metrics.record(2.0, 30);
        assert_eq!(metrics.moves, 3);
        assert!((metrics.average_time_secs - 2.0).abs() < 1e-12);
        assert!((metrics.average_nodes - 20.0).abs() < 1e-12);
    }
}
