use super::*;

/// Whether an executed move advances the player's move counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTally {
    Counted,
    /// Auto-complete placements are not player moves.
    Uncounted,
}

impl KlondikeGame {
    /// Pure legality check for placing `card` on top of `target`.
    ///
    /// Whether `card` is actually reachable in its source pile is the caller's
    /// concern; see [`KlondikeGame::draggable_run`].
    pub fn is_valid_move(&self, card: Card, target: PileId) -> bool {
        match target {
            PileId::Foundation(idx) => self
                .foundations
                .get(idx)
                .is_some_and(|pile| can_stack_foundation(pile.last(), card)),
            PileId::Tableau(idx) => self
                .tableau
                .get(idx)
                .is_some_and(|pile| can_stack_tableau(pile.last(), card)),
            PileId::Stock | PileId::Waste => false,
        }
    }

    /// [`KlondikeGame::is_valid_move`] for a run of `count` cards headed by
    /// `lead`. Foundations only take single cards.
    pub fn is_valid_run_move(&self, lead: Card, count: usize, target: PileId) -> bool {
        match (count, target) {
            (0, _) => false,
            (1, _) => self.is_valid_move(lead, target),
            (_, PileId::Foundation(_)) => false,
            _ => self.is_valid_move(lead, target),
        }
    }

    /// Cards a gesture anchored at `index` of `pile` would pick up, or `None`
    /// when that card cannot be picked up.
    pub fn draggable_run(&self, pile: PileId, index: usize) -> Option<&[Card]> {
        let cards = self.pile(pile)?;
        let anchor = cards.get(index)?;
        if !anchor.face_up {
            return None;
        }
        match pile {
            PileId::Tableau(_) if is_valid_face_up_run(&cards[index..]) => Some(&cards[index..]),
            PileId::Waste | PileId::Foundation(_) if index + 1 == cards.len() => {
                Some(&cards[index..])
            }
            _ => None,
        }
    }

    /// Moves the trailing `count` cards of `from` onto `to`, keeping their order.
    ///
    /// Reveals the new top of a tableau source. Does not consult the rules.
    pub fn move_cards(
        &mut self,
        count: usize,
        from: PileId,
        to: PileId,
        tally: MoveTally,
    ) -> Result<(), MoveError> {
        if from == to {
            return Err(MoveError::SamePile(from));
        }
        if !to.accepts_drops() {
            return Err(MoveError::InvalidTarget(to));
        }
        if self.pile(to).is_none() {
            return Err(MoveError::PileNotFound(to));
        }
        let source = self.pile_mut(from).ok_or(MoveError::PileNotFound(from))?;
        if count == 0 || count > source.len() {
            return Err(MoveError::NotEnoughCards {
                pile: from,
                requested: count,
                available: source.len(),
            });
        }

        let moved = source.split_off(source.len() - count);
        self.pile_mut(to)
            .ok_or(MoveError::PileNotFound(to))?
            .extend(moved);

        if let PileId::Tableau(col) = from {
            self.flip_top_tableau_if_needed(col);
        }
        if tally == MoveTally::Counted {
            self.moves += 1;
        }
        Ok(())
    }

    /// First foundation slot that accepts `card`.
    pub fn foundation_for(&self, card: Card) -> Option<usize> {
        (0..FOUNDATION_COUNT).find(|&idx| self.is_valid_move(card, PileId::Foundation(idx)))
    }

    /// Index of the lowest face-up card of a tableau column.
    pub fn first_face_up_index(&self, col: usize) -> Option<usize> {
        self.tableau.get(col)?.iter().position(|card| card.face_up)
    }

    fn flip_top_tableau_if_needed(&mut self, col: usize) {
        if let Some(card) = self.tableau[col].last_mut() {
            if !card.face_up {
                card.face_up = true;
            }
        }
    }
}

fn is_valid_face_up_run(run: &[Card]) -> bool {
    run.iter().all(|card| card.face_up)
        && run.windows(2).all(|pair| {
            let a = pair[0];
            let b = pair[1];
            a.color() != b.color() && a.rank == b.rank + 1
        })
}

fn can_stack_foundation(top: Option<&Card>, card: Card) -> bool {
    match top {
        None => card.is_ace(),
        Some(top_card) => top_card.suit == card.suit && card.rank == top_card.rank + 1,
    }
}

fn can_stack_tableau(top: Option<&Card>, card: Card) -> bool {
    match top {
        None => card.is_king(),
        Some(top_card) => {
            top_card.face_up && top_card.color() != card.color() && top_card.rank == card.rank + 1
        }
    }
}
