//! New-game configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::DrawMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid game config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported draw count {0}, expected 1 or 3")]
    InvalidDrawCount(u8),
}

/// Name of the card-back artwork. Cosmetic only; no rule reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardBack(String);

impl CardBack {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CardBack {
    fn default() -> Self {
        Self::new("back1")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    #[serde(alias = "drawCount")]
    pub draw_mode: DrawMode,
    pub card_back: CardBack,
}

impl GameConfig {
    pub fn new(draw_mode: DrawMode) -> Self {
        Self {
            draw_mode,
            ..Self::default()
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn with_card_back(mut self, card_back: CardBack) -> Self {
        self.card_back = card_back;
        self
    }
}
