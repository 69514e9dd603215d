pub mod autocomplete;
pub mod automation;
pub mod commands;
pub mod drag;
pub mod drop_target;
pub mod hinting;
pub mod history;
pub mod session;
pub mod stats;

pub use autocomplete::{next_auto_move, plan_autocomplete, should_autocomplete, AutoMove};
pub use automation::{EngineProfile, KLONDIKE_ENGINE_PROFILE};
pub use commands::{
    AutoCompleteStep, DrawOutcome, DropOutcome, EngineCommand, EngineCommandResult, MoveOutcome,
};
pub use drag::{ActiveDrag, DragController, DragGrab, DragMotion, DragRelease, DragState};
pub use drop_target::{resolve_drop, resolve_run_drop, DropCandidate, Point, Rect};
pub use hinting::{can_stock_help, find_hint, find_possible_moves, Hint, PossibleMove};
pub use history::{Snapshot, UndoHistory};
pub use session::{AutoCompleteTicket, DealTicket, Session, SessionEvent};
pub use stats::GameStats;

#[cfg(test)]
mod tests_props;
