use crate::engines::controller::{Controller, ControllerMetrics};
use crate::errors::CheckersResult;
use crate::game_state::game_state::GameState;
use crate::search::search_engine::{SearchConfig, SearchEngine, SearchResult};

/// Search-backed player with its own algorithm and depth.
pub struct AiController {
    name: String,
    engine: SearchEngine,
    metrics: ControllerMetrics,
    last_result: Option<SearchResult>,
}

impl AiController {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            name: format!("{} depth {}", config.algorithm, config.max_depth),
            engine: SearchEngine::new(config),
            metrics: ControllerMetrics::default(),
            last_result: None,
        }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Search summary of the most recent move.
    pub fn last_result(&self) -> Option<&SearchResult> {
        self.last_result.as_ref()
    }
}

impl Controller for AiController {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_ai(&self) -> bool {
        true
    }

    fn new_game(&mut self) {
        self.metrics = ControllerMetrics::default();
        self.last_result = None;
    }

    fn play_move(&mut self, game_state: &GameState) -> CheckersResult<Option<GameState>> {
        let result = self.engine.select_move(game_state)?;
        self.metrics
            .record(result.elapsed.as_secs_f64(), result.nodes_explored);
        let chosen = result.chosen.clone();
        self.last_result = Some(result);
        Ok(Some(chosen))
    }

    fn metrics(&self) -> Option<ControllerMetrics> {
        Some(self.metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::AiController;
    use crate::engines::controller::Controller;
    use crate::game_state::checkers_rules::Rules;
    use crate::game_state::game_state::GameState;
    use crate::search::search_engine::{SearchAlgorithm, SearchConfig};

    #[test]
    fn ai_controller_plays_and_tracks_averages() {
        let mut ai = AiController::new(SearchConfig {
            algorithm: SearchAlgorithm::MiniMax,
            max_depth: 2,
            avoid_stalemate: true,
        });
        assert!(ai.is_ai());
        assert_eq!(ai.name(), "MiniMax depth 2");

        let root = GameState::new_game(Rules::default());
        let next = ai
            .play_move(&root)
            .expect("search should run")
            .expect("AI never quits");
        assert_eq!(next.action(), "A3-B4");
        assert_eq!(ai.engine().nodes_explored(), 56);

        let metrics = ai.metrics().expect("AI reports metrics");
        assert_eq!(metrics.moves, 1);
        assert_eq!(metrics.average_nodes, 56.0);
        assert_eq!(
            ai.last_result().map(|r| r.nodes_explored),
            Some(56)
        );

        ai.new_game();
        assert_eq!(ai.metrics().map(|m| m.moves), Some(0));
        assert!(ai.last_result().is_none());
    }
}
