use thiserror::Error;

use super::PileId;

/// Reasons the executor refuses to touch the board.
///
/// These are caller bugs rather than gameplay outcomes: rule violations are
/// filtered out by [`super::KlondikeGame::is_valid_move`] before a move is
/// ever executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no such pile: {0}")]
    PileNotFound(PileId),
    #[error("{0} cannot receive cards")]
    InvalidTarget(PileId),
    #[error("cannot move cards from {0} onto itself")]
    SamePile(PileId),
    #[error("{pile} holds {available} card(s), cannot move {requested}")]
    NotEnoughCards {
        pile: PileId,
        requested: usize,
        available: usize,
    },
}
