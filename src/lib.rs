//! Klondike solitaire engine.
//!
//! [`game`] holds the board, the deal and the move rules. [`engine`] layers
//! the interactive pieces on top: undo, drag-and-drop resolution, hints,
//! auto-complete and the [`engine::Session`] that ties them together for a
//! presentation layer.

pub mod config;
pub mod engine;
pub mod game;

pub use config::{CardBack, ConfigError, GameConfig};
pub use engine::{Hint, Session, SessionEvent};
pub use game::{Card, CardId, DrawMode, KlondikeGame, PileId, PileKind, Suit};
