use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::*;

/// One card placement of the opening deal, in dealing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DealStep {
    pub card: Card,
    pub column: usize,
    pub row: usize,
}

impl KlondikeGame {
    pub fn empty(draw_mode: DrawMode) -> Self {
        Self {
            draw_mode,
            stock: Vec::new(),
            waste: Vec::new(),
            foundations: std::array::from_fn(|_| Vec::new()),
            tableau: std::array::from_fn(|_| Vec::new()),
            moves: 0,
        }
    }

    pub fn new_shuffled(draw_mode: DrawMode) -> Self {
        let mut rng = rand::thread_rng();
        Self::new_with_seed(rng.gen(), draw_mode)
    }

    pub fn new_with_seed(seed: u64, draw_mode: DrawMode) -> Self {
        Self::dealt_with_seed(seed, draw_mode).0
    }

    pub fn dealt_with_seed(seed: u64, draw_mode: DrawMode) -> (Self, Vec<DealStep>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut deck = full_deck();
        shuffle_deck(&mut deck, &mut rng);
        Self::deal(deck, draw_mode)
    }

    /// Deals row by row from the end of `deck`; whatever is left becomes the stock.
    pub fn deal(mut deck: Vec<Card>, draw_mode: DrawMode) -> (Self, Vec<DealStep>) {
        let mut game = Self::empty(draw_mode);
        let mut steps = Vec::with_capacity(DEALT_CARDS);

        for row in 0..TABLEAU_COLUMNS {
            for column in row..TABLEAU_COLUMNS {
                let Some(mut card) = deck.pop() else {
                    break;
                };
                card.face_up = false;
                game.tableau[column].push(card);
                steps.push(DealStep { card, column, row });
            }
        }

        for pile in game.tableau.iter_mut() {
            if let Some(top) = pile.last_mut() {
                top.face_up = true;
            }
        }
        for step in steps.iter_mut() {
            step.card.face_up = step.row == step.column;
        }

        for card in deck.iter_mut() {
            card.face_up = false;
        }
        game.stock = deck;

        (game, steps)
    }

    pub fn draw_or_recycle(&mut self) -> DrawResult {
        self.draw_or_recycle_with_count(self.draw_mode.count())
    }

    pub fn draw_or_recycle_with_count(&mut self, draw_count: u8) -> DrawResult {
        if !self.stock.is_empty() {
            let draw_count = usize::from(draw_count.max(1));
            let mut drawn = Vec::with_capacity(draw_count);
            for _ in 0..draw_count {
                let Some(mut card) = self.stock.pop() else {
                    break;
                };
                card.face_up = true;
                self.waste.push(card);
                drawn.push(card);
            }
            self.moves += 1;
            return DrawResult::DrewFromStock(drawn);
        }

        if self.waste.is_empty() {
            return DrawResult::NoOp;
        }

        while let Some(mut card) = self.waste.pop() {
            card.face_up = false;
            self.stock.push(card);
        }
        self.moves += 1;
        DrawResult::RecycledWaste
    }

    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        self.draw_mode = mode;
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn stock(&self) -> &[Card] {
        &self.stock
    }

    pub fn waste(&self) -> &[Card] {
        &self.waste
    }

    pub fn foundations(&self) -> &[Vec<Card>; FOUNDATION_COUNT] {
        &self.foundations
    }

    pub fn tableau(&self) -> &[Vec<Card>; TABLEAU_COLUMNS] {
        &self.tableau
    }

    pub fn pile(&self, pile: PileId) -> Option<&[Card]> {
        match pile {
            PileId::Stock => Some(&self.stock),
            PileId::Waste => Some(&self.waste),
            PileId::Foundation(idx) => self.foundations.get(idx).map(Vec::as_slice),
            PileId::Tableau(idx) => self.tableau.get(idx).map(Vec::as_slice),
        }
    }

    pub(crate) fn pile_mut(&mut self, pile: PileId) -> Option<&mut Vec<Card>> {
        match pile {
            PileId::Stock => Some(&mut self.stock),
            PileId::Waste => Some(&mut self.waste),
            PileId::Foundation(idx) => self.foundations.get_mut(idx),
            PileId::Tableau(idx) => self.tableau.get_mut(idx),
        }
    }

    pub fn waste_top(&self) -> Option<Card> {
        self.waste.last().copied()
    }

    pub fn tableau_top(&self, col: usize) -> Option<Card> {
        self.tableau.get(col).and_then(|pile| pile.last().copied())
    }

    pub fn tableau_len(&self, col: usize) -> Option<usize> {
        self.tableau.get(col).map(Vec::len)
    }

    pub fn tableau_card(&self, col: usize, index: usize) -> Option<Card> {
        self.tableau
            .get(col)
            .and_then(|pile| pile.get(index))
            .copied()
    }

    /// Every card on the board, pile by pile.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.stock
            .iter()
            .chain(self.waste.iter())
            .chain(self.foundations.iter().flatten())
            .chain(self.tableau.iter().flatten())
    }

    pub fn position_of(&self, pile: PileId, card: CardId) -> Option<usize> {
        self.pile(pile)?.iter().position(|c| c.id() == card)
    }

    pub fn is_won(&self) -> bool {
        self.foundations
            .iter()
            .all(|pile| pile.len() == usize::from(RANKS_PER_SUIT))
    }
}

pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in ACE..=KING {
            deck.push(Card::new(suit, rank));
        }
    }
    deck
}

/// Uniform permutation via rand's `SliceRandom::shuffle`.
pub fn shuffle_deck<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R) {
    deck.shuffle(rng);
}
