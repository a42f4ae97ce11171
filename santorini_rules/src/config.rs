use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{agent::AgentKind, error::GameError, heuristic::HeuristicWeights, player::PlayerId};

/// Everything needed to set up a game. Missing YAML keys keep their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub white: AgentKind,
    pub blue: AgentKind,
    pub undo_redo: bool,
    pub score: bool,
    pub seed: Option<u64>,
    pub weights: HeuristicWeights,
}

impl GameConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, GameError> {
        let config: GameConfig =
            serde_yaml::from_str(s).map_err(|e| GameError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Weights must be real numbers or the best turn can't be picked.
    pub fn validate(&self) -> Result<(), GameError> {
        let HeuristicWeights {
            height,
            center,
            distance,
        } = self.weights;
        for (name, value) in [("height", height), ("center", center), ("distance", distance)] {
            if !value.is_finite() {
                return Err(GameError::Config(format!(
                    "weight {name} must be a finite number, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| GameError::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&text)
    }

    pub fn agent_kind(&self, player: PlayerId) -> AgentKind {
        match player {
            PlayerId::One => self.white,
            PlayerId::Two => self.blue,
        }
    }

    /// Seed for one player's agent, so two random agents don't mirror each other.
    pub fn seed_for(&self, player: PlayerId) -> Option<u64> {
        self.seed.map(|seed| match player {
            PlayerId::One => seed,
            PlayerId::Two => seed.wrapping_add(1),
        })
    }
}
