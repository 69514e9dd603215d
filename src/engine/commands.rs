use serde::Serialize;

use crate::engine::autocomplete::AutoMove;
use crate::game::{Card, CardId, PileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    Draw,
    Move {
        card: CardId,
        from: PileId,
        to: PileId,
    },
    SendToFoundation {
        from: PileId,
    },
    Undo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub accepted: bool,
}

impl MoveOutcome {
    pub const fn accepted() -> Self {
        Self { accepted: true }
    }

    pub const fn rejected() -> Self {
        Self { accepted: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "cards", rename_all = "snake_case")]
pub enum DrawOutcome {
    Drew(Vec<Card>),
    Recycled,
    /// Stock and waste both empty, or the session is locked.
    Unchanged,
}

impl DrawOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Released without moving: no drag happened.
    Click,
    Moved { to: PileId },
    /// No valid overlapping target; the board is as it was before the drag.
    Cancelled,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoCompleteStep {
    Moved(AutoMove),
    Finished { won: bool },
    /// The ticket belongs to an earlier game or auto-complete is not running.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineCommandResult {
    pub changed: bool,
}

impl EngineCommandResult {
    pub const fn unchanged() -> Self {
        Self { changed: false }
    }

    pub const fn changed() -> Self {
        Self { changed: true }
    }
}

impl From<MoveOutcome> for EngineCommandResult {
    fn from(outcome: MoveOutcome) -> Self {
        Self {
            changed: outcome.accepted,
        }
    }
}
