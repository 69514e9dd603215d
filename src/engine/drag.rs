//! Pointer-driven drag gesture, independent of any input API.
//!
//! `Idle --press--> Pressed --motion--> Dragging --release--> Idle`.
//! A press released without motion is a click. Motion while dragging only
//! moves the ghost rectangle; nothing touches the board until release.

use crate::engine::drop_target::{Point, Rect};
use crate::game::{Card, PileId};

/// What the pointer picked up.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGrab {
    pub source: PileId,
    pub start: usize,
    pub cards: Vec<Card>,
    /// Pointer position at press time.
    pub origin: Point,
    /// Screen rectangle of the lead card at press time.
    pub card_rect: Rect,
}

impl DragGrab {
    pub fn lead(&self) -> Option<Card> {
        self.cards.first().copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDrag {
    pub grab: DragGrab,
    pub pointer: Point,
}

impl ActiveDrag {
    /// Lead card rectangle following the pointer, keeping the grab offset.
    pub fn drag_rect(&self) -> Rect {
        self.grab.card_rect.translated(
            self.pointer.x - self.grab.origin.x,
            self.pointer.y - self.grab.origin.y,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Pressed(DragGrab),
    Dragging(ActiveDrag),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMotion {
    /// First motion after a press: the drag has just begun.
    Started,
    Moved,
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragRelease {
    Click(DragGrab),
    Drop(ActiveDrag),
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        match &self.state {
            DragState::Dragging(active) => Some(active),
            _ => None,
        }
    }

    pub fn press(&mut self, grab: DragGrab) -> bool {
        if !self.is_idle() || grab.cards.is_empty() {
            return false;
        }
        self.state = DragState::Pressed(grab);
        true
    }

    pub fn motion(&mut self, pointer: Point) -> DragMotion {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DragMotion::Ignored,
            DragState::Pressed(grab) => {
                self.state = DragState::Dragging(ActiveDrag { grab, pointer });
                DragMotion::Started
            }
            DragState::Dragging(mut active) => {
                active.pointer = pointer;
                self.state = DragState::Dragging(active);
                DragMotion::Moved
            }
        }
    }

    pub fn release(&mut self) -> DragRelease {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DragRelease::Ignored,
            DragState::Pressed(grab) => DragRelease::Click(grab),
            DragState::Dragging(active) => DragRelease::Drop(active),
        }
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
