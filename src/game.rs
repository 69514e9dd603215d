//! Klondike board model, deal and move rules.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

mod error;
mod klondike_moves;
mod setup;
mod types;

pub use error::MoveError;
pub use klondike_moves::MoveTally;
pub use setup::{full_deck, shuffle_deck, DealStep};
pub use types::{
    Card, CardId, Color, DrawMode, DrawResult, KlondikeGame, PileId, PileKind, Suit,
};

pub const TABLEAU_COLUMNS: usize = 7;
pub const FOUNDATION_COUNT: usize = 4;
pub const RANKS_PER_SUIT: u8 = 13;
pub const DECK_SIZE: usize = 52;
pub const DEALT_CARDS: usize = 28;

pub const ACE: u8 = 1;
pub const KING: u8 = 13;

impl KlondikeGame {
    /// Hash of the card layout only; the move counter and draw mode are ignored.
    pub fn board_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.stock.hash(&mut hasher);
        self.waste.hash(&mut hasher);
        self.foundations.hash(&mut hasher);
        self.tableau.hash(&mut hasher);
        hasher.finish()
    }
}

pub fn rank_label(rank: u8) -> &'static str {
    match rank {
        1 => "A",
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "8",
        9 => "9",
        10 => "10",
        11 => "J",
        12 => "Q",
        13 => "K",
        _ => "?",
    }
}
