//! Game configuration.
//!
//! Every field has a default, so an empty TOML document (or no file at all)
//! yields the standard setup. The binaries layer command-line flags over the
//! loaded values and then hand explicit `Rules` and `SearchConfig` values to
//! the board and the search engines.

use std::path::Path;

use serde::Deserialize;

use crate::errors::{CheckersError, CheckersResult};
use crate::game_state::checkers_rules::{
    MultiJumpPolicy, Rules, DEFAULT_KING_VALUE, MAX_KING_VALUE,
};
use crate::game_state::checkers_types::Side;
use crate::search::search_engine::{SearchAlgorithm, SearchConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub depth: u8,
    pub algorithm: SearchAlgorithm,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            algorithm: SearchAlgorithm::AlphaBeta,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub king_value: u32,
    pub avoid_stalemate: bool,
    pub multi_jump: MultiJumpPolicy,
    pub player1: PlayerConfig,
    pub player2: PlayerConfig,
    pub print_metrics: bool,
    /// Plies after which an unfinished game is declared drawn.
    pub max_plies: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            king_value: DEFAULT_KING_VALUE,
            avoid_stalemate: true,
            multi_jump: MultiJumpPolicy::FirstFound,
            player1: PlayerConfig::default(),
            player2: PlayerConfig::default(),
            print_metrics: true,
            max_plies: 200,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(text: &str) -> CheckersResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| CheckersError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> CheckersResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> CheckersResult<()> {
        if !(1..=MAX_KING_VALUE).contains(&self.king_value) {
            return Err(CheckersError::InvalidConfig(format!(
                "king_value must be between 1 and {MAX_KING_VALUE}, got {}",
                self.king_value
            )));
        }
        for (side, player) in [(Side::Player1, self.player1), (Side::Player2, self.player2)] {
            if player.depth == 0 {
                return Err(CheckersError::InvalidConfig(format!(
                    "{} search depth must be at least 1",
                    side.label()
                )));
            }
        }
        if self.max_plies == 0 {
            return Err(CheckersError::InvalidConfig(
                "max_plies must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn rules(&self) -> Rules {
        Rules {
            king_value: self.king_value,
            multi_jump: self.multi_jump,
        }
    }

    pub fn player(&self, side: Side) -> PlayerConfig {
        match side {
            Side::Player1 => self.player1,
            Side::Player2 => self.player2,
        }
    }

    pub fn search_config(&self, side: Side) -> SearchConfig {
        let player = self.player(side);
        SearchConfig {
            algorithm: player.algorithm,
            max_depth: player.depth,
            avoid_stalemate: self.avoid_stalemate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GameConfig;
    use crate::errors::CheckersError;
    use crate::game_state::checkers_rules::MultiJumpPolicy;
    use crate::game_state::checkers_types::Side;
    use crate::search::search_engine::SearchAlgorithm;

    #[test]
    fn empty_document_gives_defaults() {
        let config = GameConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.king_value, 2);
        assert!(config.avoid_stalemate);
        assert_eq!(config.player1.algorithm, SearchAlgorithm::AlphaBeta);
        assert_eq!(config.player2.algorithm, SearchAlgorithm::AlphaBeta);
        assert_eq!(config.rules().max_material(), 24.0);
    }

    #[test]
    fn parses_overrides() {
        let text = r#"
king_value = 3
avoid_stalemate = false
multi_jump = "all-branches"
max_plies = 50

[player1]
depth = 4
algorithm = "AlphaBeta"

[player2]
depth = 1
algorithm = "minimax"
"#;
        let config = GameConfig::from_toml_str(text).expect("config should parse");
        assert_eq!(config.rules().king_value, 3);
        assert_eq!(config.multi_jump, MultiJumpPolicy::AllBranches);
        assert_eq!(config.max_plies, 50);

        let p1 = config.search_config(Side::Player1);
        assert_eq!(p1.algorithm, SearchAlgorithm::AlphaBeta);
        assert_eq!(p1.max_depth, 4);
        assert!(!p1.avoid_stalemate);

        let p2 = config.search_config(Side::Player2);
        assert_eq!(p2.algorithm, SearchAlgorithm::MiniMax);
        assert_eq!(p2.max_depth, 1);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        assert!(matches!(
            GameConfig::from_toml_str("kings = 2"),
            Err(CheckersError::InvalidConfig(_))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("king_value = 0"),
            Err(CheckersError::InvalidConfig(_))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("king_value = 4000000000"),
            Err(CheckersError::InvalidConfig(_))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("[player2]\ndepth = 0"),
            Err(CheckersError::InvalidConfig(_))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("[player1]\nalgorithm = \"greedy\""),
            Err(CheckersError::InvalidConfig(_))
        ));
    }

    #[test]
    fn king_value_upper_bound_keeps_utility_finite() {
        let config = GameConfig::from_toml_str("king_value = 1000").expect("bound is inclusive");
        assert_eq!(config.rules().max_material(), 12_000.0);

        let mut flagged = config.clone();
        flagged.king_value = 1001;
        assert!(matches!(
            flagged.validate(),
            Err(CheckersError::InvalidConfig(_))
        ));
    }
}
