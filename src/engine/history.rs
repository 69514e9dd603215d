use std::collections::VecDeque;

use crate::game::{Card, KlondikeGame, FOUNDATION_COUNT, TABLEAU_COLUMNS};

/// Independent copy of everything undo restores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    tableau: [Vec<Card>; TABLEAU_COLUMNS],
    foundations: [Vec<Card>; FOUNDATION_COUNT],
    stock: Vec<Card>,
    waste: Vec<Card>,
    moves: u32,
}

impl Snapshot {
    pub fn capture(game: &KlondikeGame) -> Self {
        Self {
            tableau: game.tableau.clone(),
            foundations: game.foundations.clone(),
            stock: game.stock.clone(),
            waste: game.waste.clone(),
            moves: game.moves,
        }
    }

    /// Replaces the piles and move counter of `game` wholesale.
    pub fn restore(self, game: &mut KlondikeGame) {
        game.tableau = self.tableau;
        game.foundations = self.foundations;
        game.stock = self.stock;
        game.waste = self.waste;
        game.moves = self.moves;
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }
}

/// Bounded undo stack: the oldest snapshot is evicted on overflow.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    entries: VecDeque<Snapshot>,
    limit: usize,
}

impl UndoHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        if self.limit == 0 {
            return;
        }
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    /// Drops the snapshot pushed for a gesture that ended up changing nothing.
    pub fn discard_latest(&mut self) -> bool {
        self.entries.pop_back().is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
