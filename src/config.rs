use std::fmt::Display;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, GalletaShape, PlayerId};

/// Who sits at each side of the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    #[default]
    HumanVsAi,
    AiVsAi,
    HumanVsHuman,
}

impl GameMode {
    pub fn uses_ai(self) -> bool {
        !matches!(self, GameMode::HumanVsHuman)
    }
}

impl Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            GameMode::HumanVsAi => "Human vs AI",
            GameMode::AiVsAi => "AI vs AI",
            GameMode::HumanVsHuman => "Human vs Human",
        };
        write!(f, "{label}")
    }
}

/// Settings for one game, loadable from JSON. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub radius: u32,
    pub depth: u32,
    pub mode: GameMode,
    /// Seat taken by the computer in human-vs-AI games.
    pub ai_player: PlayerId,
    pub starting_player: PlayerId,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            radius: 3,
            depth: 3,
            mode: GameMode::default(),
            ai_player: PlayerId::SECOND,
            starting_player: PlayerId::FIRST,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radius < GalletaShape::MIN_RADIUS {
            return Err(ConfigError::Validation(format!(
                "radius must be >= {}",
                GalletaShape::MIN_RADIUS
            )));
        }
        if self.radius > GalletaShape::MAX_RADIUS {
            return Err(ConfigError::Validation(format!(
                "radius must be <= {}",
                GalletaShape::MAX_RADIUS
            )));
        }
        if self.depth == 0 {
            return Err(ConfigError::Validation("depth must be >= 1".into()));
        }
        Ok(())
    }
}
