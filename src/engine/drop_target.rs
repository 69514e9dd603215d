//! Picks the pile a dragged run lands on.
//!
//! The presentation layer owns all geometry. It hands over the dragged run's
//! rectangle and one rectangle per slot (the slot's topmost card, or the empty
//! slot outline); the resolver only compares areas and asks the rules.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::game::{Card, KlondikeGame, PileId};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Area shared with `other`; zero when disjoint on either axis.
    pub fn overlap_area(&self, other: &Rect) -> f64 {
        let x_overlap = (self.right().min(other.right()) - self.left().max(other.left())).max(0.0);
        let y_overlap = (self.bottom().min(other.bottom()) - self.top().max(other.top())).max(0.0);
        x_overlap * y_overlap
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropCandidate {
    pub pile: PileId,
    pub rect: Rect,
}

impl DropCandidate {
    pub const fn new(pile: PileId, rect: Rect) -> Self {
        Self { pile, rect }
    }
}

/// Valid candidate with the strictly largest overlap with `drag_rect` for a
/// single dragged card. See [`resolve_run_drop`].
pub fn resolve_drop(
    game: &KlondikeGame,
    lead: Card,
    source: PileId,
    drag_rect: Rect,
    candidates: &[DropCandidate],
) -> Option<PileId> {
    resolve_run_drop(game, std::slice::from_ref(&lead), source, drag_rect, candidates)
}

/// Valid candidate with the strictly largest overlap with `drag_rect` for the
/// dragged `run`, lead card first.
///
/// Candidates are visited in slot order (foundations, then tableau, ascending
/// index) whatever order the caller lists them in, so exact ties go to the
/// earliest slot. The source pile, stock, waste and zero-overlap candidates
/// never win, and foundations never take a run of more than one card.
pub fn resolve_run_drop(
    game: &KlondikeGame,
    run: &[Card],
    source: PileId,
    drag_rect: Rect,
    candidates: &[DropCandidate],
) -> Option<PileId> {
    let lead = *run.first()?;
    let mut ordered: Vec<&DropCandidate> = candidates.iter().collect();
    ordered.sort_by_key(|candidate| candidate.pile.slot_order());

    let mut best = None;
    let mut max_overlap = 0.0;
    for candidate in ordered {
        if candidate.pile == source || !candidate.pile.accepts_drops() {
            continue;
        }
        let overlap = drag_rect.overlap_area(&candidate.rect);
        if overlap > max_overlap && game.is_valid_run_move(lead, run.len(), candidate.pile) {
            max_overlap = overlap;
            best = Some(candidate.pile);
        }
    }

    trace!(
        lead = %lead.id(),
        count = run.len(),
        %source,
        target = ?best,
        overlap = max_overlap,
        "resolved drop"
    );
    best
}
