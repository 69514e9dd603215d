//! Move enumeration, progressive/non-progressive classification and the
//! stock reachability probe behind the hint button and stuck detection.

use std::fmt;

use serde::Serialize;

use crate::game::{Card, CardId, DrawMode, KlondikeGame, PileId, TABLEAU_COLUMNS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PossibleMove {
    pub card: Card,
    pub from: PileId,
    pub to: PileId,
    /// Number of cards travelling with `card`, itself included.
    pub count: usize,
    /// Reveals a hidden card, reaches a foundation, or seats a King on an
    /// empty column.
    pub progressive: bool,
}

impl PossibleMove {
    pub fn source_card_id(&self) -> CardId {
        self.card.id()
    }
}

impl fmt::Display for PossibleMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count > 1 {
            write!(
                f,
                "Move {} card(s) from {} ({}) to {}.",
                self.count,
                self.from,
                self.card.label(),
                self.to
            )
        } else {
            write!(f, "Move {} from {} to {}.", self.card.label(), self.from, self.to)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "hint", rename_all = "snake_case")]
pub enum Hint {
    Move(PossibleMove),
    StockCanHelp,
    Stuck,
}

pub fn find_possible_moves(game: &KlondikeGame) -> Vec<PossibleMove> {
    let mut moves = Vec::new();
    let waste_top = game.waste_top();

    if let Some(card) = waste_top {
        for foundation in foundation_targets(game, card) {
            push_unique(
                &mut moves,
                PossibleMove {
                    card,
                    from: PileId::Waste,
                    to: foundation,
                    count: 1,
                    progressive: true,
                },
            );
        }
    }

    for src in 0..TABLEAU_COLUMNS {
        let Some(card) = game.tableau_top(src).filter(|card| card.face_up) else {
            continue;
        };
        for foundation in foundation_targets(game, card) {
            push_unique(
                &mut moves,
                PossibleMove {
                    card,
                    from: PileId::Tableau(src),
                    to: foundation,
                    count: 1,
                    progressive: true,
                },
            );
        }
    }

    for src in 0..TABLEAU_COLUMNS {
        let Some(start) = game.first_face_up_index(src) else {
            continue;
        };
        let Some(card) = game.tableau_card(src, start) else {
            continue;
        };
        if start == 0 && card.is_king() {
            continue;
        }
        let count = game.tableau_len(src).unwrap_or(0) - start;
        let exposes_hidden = start
            .checked_sub(1)
            .and_then(|below| game.tableau_card(src, below))
            .is_some_and(|below| !below.face_up);
        for dst in (0..TABLEAU_COLUMNS).filter(|&dst| dst != src) {
            if game.is_valid_move(card, PileId::Tableau(dst)) {
                push_unique(
                    &mut moves,
                    PossibleMove {
                        card,
                        from: PileId::Tableau(src),
                        to: PileId::Tableau(dst),
                        count,
                        progressive: exposes_hidden,
                    },
                );
            }
        }
    }

    if let Some(card) = waste_top {
        for dst in 0..TABLEAU_COLUMNS {
            if game.is_valid_move(card, PileId::Tableau(dst)) {
                let onto_empty = game.tableau_len(dst) == Some(0);
                push_unique(
                    &mut moves,
                    PossibleMove {
                        card,
                        from: PileId::Waste,
                        to: PileId::Tableau(dst),
                        count: 1,
                        progressive: card.is_king() && onto_empty,
                    },
                );
            }
        }
    }

    moves
}

/// First progressive move, else the first other move, else whether cycling
/// the stock could still surface a play.
pub fn find_hint(game: &KlondikeGame) -> Hint {
    let moves = find_possible_moves(game);
    if let Some(progressive) = moves.iter().find(|candidate| candidate.progressive) {
        return Hint::Move(*progressive);
    }
    if let Some(first) = moves.first() {
        return Hint::Move(*first);
    }
    if can_stock_help(game) {
        Hint::StockCanHelp
    } else {
        Hint::Stuck
    }
}

/// Heuristic probe: could some card reachable through the stock/waste cycle
/// be played right now?
///
/// Single-card draws test every stock and waste card. Multi-card draws walk
/// the stock from the top in draw-sized batches and test only the card each
/// virtual draw would leave exposed. This is not a lookahead over recycles.
pub fn can_stock_help(game: &KlondikeGame) -> bool {
    let stock = game.stock();
    let waste = game.waste();
    if stock.is_empty() {
        return !waste.is_empty();
    }

    match game.draw_mode() {
        DrawMode::One => stock
            .iter()
            .chain(waste.iter())
            .any(|&card| playable_anywhere(game, card)),
        mode => {
            let batch = usize::from(mode.count());
            let mut end = stock.len();
            while end > 0 {
                let start = end.saturating_sub(batch);
                if playable_anywhere(game, stock[start]) {
                    return true;
                }
                end = start;
            }
            false
        }
    }
}

fn playable_anywhere(game: &KlondikeGame, card: Card) -> bool {
    PileId::drop_targets().any(|target| game.is_valid_move(card, target))
}

fn foundation_targets(game: &KlondikeGame, card: Card) -> impl Iterator<Item = PileId> + '_ {
    PileId::drop_targets()
        .filter(|pile| matches!(pile, PileId::Foundation(_)))
        .filter(move |&pile| game.is_valid_move(card, pile))
}

fn push_unique(moves: &mut Vec<PossibleMove>, candidate: PossibleMove) {
    if !moves.contains(&candidate) {
        moves.push(candidate);
    }
}
