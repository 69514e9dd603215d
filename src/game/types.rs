use std::fmt;

use serde::{Deserialize, Serialize};

use super::{rank_label, ACE, FOUNDATION_COUNT, KING, TABLEAU_COLUMNS};
use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DrawMode {
    One,
    #[default]
    Three,
}

impl DrawMode {
    pub fn count(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Three => 3,
        }
    }

    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            1 => Some(Self::One),
            3 => Some(Self::Three),
            _ => None,
        }
    }
}

impl TryFrom<u8> for DrawMode {
    type Error = ConfigError;

    fn try_from(count: u8) -> Result<Self, Self::Error> {
        Self::from_count(count).ok_or(ConfigError::InvalidDrawCount(count))
    }
}

impl From<DrawMode> for u8 {
    fn from(mode: DrawMode) -> Self {
        mode.count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Spades | Suit::Clubs => Color::Black,
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            Suit::Spades => "S",
            Suit::Hearts => "H",
            Suit::Diamonds => "D",
            Suit::Clubs => "C",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Red,
}

/// Stable identity of a card: suit and rank, independent of its face state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId {
    pub suit: Suit,
    pub rank: u8,
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", rank_label(self.rank), self.suit.short())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: u8,
    pub face_up: bool,
}

impl Card {
    pub fn new(suit: Suit, rank: u8) -> Self {
        Self {
            suit,
            rank,
            face_up: false,
        }
    }

    pub fn id(&self) -> CardId {
        CardId {
            suit: self.suit,
            rank: self.rank,
        }
    }

    pub fn label(&self) -> String {
        self.id().to_string()
    }

    pub fn value(&self) -> u8 {
        self.rank
    }

    pub fn color(&self) -> Color {
        self.suit.color()
    }

    pub fn is_ace(&self) -> bool {
        self.rank == ACE
    }

    pub fn is_king(&self) -> bool {
        self.rank == KING
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PileKind {
    Stock,
    Waste,
    Foundation,
    Tableau,
}

/// Address of one pile on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "lowercase")]
pub enum PileId {
    Stock,
    Waste,
    Foundation(usize),
    Tableau(usize),
}

impl PileId {
    pub fn kind(self) -> PileKind {
        match self {
            Self::Stock => PileKind::Stock,
            Self::Waste => PileKind::Waste,
            Self::Foundation(_) => PileKind::Foundation,
            Self::Tableau(_) => PileKind::Tableau,
        }
    }

    pub fn index(self) -> Option<usize> {
        match self {
            Self::Foundation(idx) | Self::Tableau(idx) => Some(idx),
            Self::Stock | Self::Waste => None,
        }
    }

    pub fn accepts_drops(self) -> bool {
        matches!(self, Self::Foundation(_) | Self::Tableau(_))
    }

    /// Every foundation slot, then every tableau column.
    pub fn drop_targets() -> impl Iterator<Item = PileId> {
        (0..FOUNDATION_COUNT)
            .map(PileId::Foundation)
            .chain((0..TABLEAU_COLUMNS).map(PileId::Tableau))
    }

    /// Slot iteration order: foundations before tableau, ascending index.
    pub(crate) fn slot_order(self) -> (u8, usize) {
        match self {
            Self::Stock => (0, 0),
            Self::Waste => (1, 0),
            Self::Foundation(idx) => (2, idx),
            Self::Tableau(idx) => (3, idx),
        }
    }
}

impl fmt::Display for PileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stock => write!(f, "stock"),
            Self::Waste => write!(f, "waste"),
            Self::Foundation(idx) => write!(f, "F{}", idx + 1),
            Self::Tableau(idx) => write!(f, "T{}", idx + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct KlondikeGame {
    pub(crate) draw_mode: DrawMode,
    pub(crate) stock: Vec<Card>,
    pub(crate) waste: Vec<Card>,
    pub(crate) foundations: [Vec<Card>; FOUNDATION_COUNT],
    pub(crate) tableau: [Vec<Card>; TABLEAU_COLUMNS],
    pub(crate) moves: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawResult {
    DrewFromStock(Vec<Card>),
    RecycledWaste,
    NoOp,
}
