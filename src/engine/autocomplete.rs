use serde::Serialize;

use crate::game::{Card, KlondikeGame, MoveTally, PileId, TABLEAU_COLUMNS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AutoMove {
    pub card: Card,
    pub from: PileId,
    pub to: PileId,
}

/// Nothing hidden and nothing left to draw: the rest is mechanical.
pub fn should_autocomplete(game: &KlondikeGame) -> bool {
    game.stock().is_empty()
        && game.waste().is_empty()
        && game
            .tableau()
            .iter()
            .flatten()
            .all(|card| card.face_up)
}

/// Tableau tops left to right, then the waste top, onto the first foundation
/// that takes them.
pub fn next_auto_move(game: &KlondikeGame) -> Option<AutoMove> {
    let tableau_tops = (0..TABLEAU_COLUMNS)
        .filter_map(|col| game.tableau_top(col).map(|card| (PileId::Tableau(col), card)));
    let waste_top = game.waste_top().map(|card| (PileId::Waste, card));

    tableau_tops
        .chain(waste_top)
        .filter(|(_, card)| card.face_up)
        .find_map(|(from, card)| {
            game.foundation_for(card).map(|idx| AutoMove {
                card,
                from,
                to: PileId::Foundation(idx),
            })
        })
}

/// Full sequence of auto-moves from `game`, computed on a copy.
pub fn plan_autocomplete(game: &KlondikeGame) -> Vec<AutoMove> {
    let mut scratch = game.clone();
    let mut plan = Vec::new();
    while let Some(auto_move) = next_auto_move(&scratch) {
        if scratch
            .move_cards(1, auto_move.from, auto_move.to, MoveTally::Uncounted)
            .is_err()
        {
            break;
        }
        plan.push(auto_move);
    }
    plan
}
