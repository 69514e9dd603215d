//! Property tests over seeded deals and arbitrary gesture sequences.
//!
//! Properties tested:
//! - All 52 cards stay on the board exactly once
//! - Foundations only ever hold an Ace-up run of one suit and never shrink
//! - Tableau columns keep hidden cards below an alternating face-up run
//! - Stock cards stay face down and waste cards face up
//! - Undo walks back through every recorded state exactly

use std::collections::HashSet;

use proptest::prelude::*;

use super::*;
use crate::config::GameConfig;
use crate::game::{
    CardId, DrawMode, KlondikeGame, PileId, ACE, DECK_SIZE, FOUNDATION_COUNT, TABLEAU_COLUMNS,
};

#[derive(Debug, Clone, Copy)]
enum Gesture {
    Draw,
    FollowHint,
    SendToFoundation(usize),
    MoveColumn { from: usize, to: usize },
    WasteToColumn(usize),
    /// `depth` counts down from the top card of the column.
    MoveToFoundation { col: usize, depth: usize, foundation: usize },
    /// `from == TABLEAU_COLUMNS` drags the waste top; `target` indexes
    /// [`PileId::drop_targets`].
    Drag { from: usize, depth: usize, target: usize },
    Undo,
}

fn gesture() -> impl Strategy<Value = Gesture> {
    let column = 0..TABLEAU_COLUMNS;
    prop_oneof![
        3 => Just(Gesture::Draw),
        3 => Just(Gesture::FollowHint),
        2 => column.clone().prop_map(Gesture::SendToFoundation),
        2 => (column.clone(), column.clone())
            .prop_map(|(from, to)| Gesture::MoveColumn { from, to }),
        1 => column.clone().prop_map(Gesture::WasteToColumn),
        2 => (column.clone(), 0..4usize, 0..FOUNDATION_COUNT)
            .prop_map(|(col, depth, foundation)| Gesture::MoveToFoundation { col, depth, foundation }),
        3 => (0..=TABLEAU_COLUMNS, 0..4usize, 0..FOUNDATION_COUNT + TABLEAU_COLUMNS)
            .prop_map(|(from, depth, target)| Gesture::Drag { from, depth, target }),
        1 => Just(Gesture::Undo),
    ]
}

fn draw_mode() -> impl Strategy<Value = DrawMode> {
    prop_oneof![Just(DrawMode::One), Just(DrawMode::Three)]
}

/// Drop slots laid out in a row, 20 units apart.
fn slot_rect(slot: usize) -> Rect {
    Rect::new(slot as f64 * 20.0, 0.0, 10.0, 10.0)
}

fn drag(session: &mut Session, from: usize, depth: usize, target: usize) -> bool {
    let pile = if from == TABLEAU_COLUMNS {
        PileId::Waste
    } else {
        PileId::Tableau(from)
    };
    let len = session.pile(pile).map_or(0, <[_]>::len);
    let index = if pile == PileId::Waste {
        len.saturating_sub(1)
    } else {
        len.saturating_sub(1 + depth)
    };

    session.pointer_down(pile, index, Point::default(), slot_rect(0));
    session.pointer_move(Point::new(slot_rect(target).x, 0.0));
    let candidates: Vec<DropCandidate> = PileId::drop_targets()
        .enumerate()
        .map(|(slot, pile)| DropCandidate::new(pile, slot_rect(slot)))
        .collect();
    matches!(session.pointer_up(&candidates), DropOutcome::Moved { .. })
}

fn lowest_face_up(game: &KlondikeGame, col: usize) -> Option<CardId> {
    let index = game.first_face_up_index(col)?;
    game.tableau_card(col, index).map(|card| card.id())
}

/// Applies one gesture; returns whether the board changed.
fn apply(session: &mut Session, gesture: Gesture) -> bool {
    match gesture {
        Gesture::Draw => session.draw().changed(),
        Gesture::FollowHint => match session.hint() {
            Hint::Move(hint) => {
                session
                    .attempt_move(hint.source_card_id(), hint.from, hint.to)
                    .accepted
            }
            Hint::StockCanHelp | Hint::Stuck => false,
        },
        Gesture::SendToFoundation(col) => {
            session.send_to_foundation(PileId::Tableau(col)).accepted
        }
        Gesture::MoveColumn { from, to } => match lowest_face_up(session.game(), from) {
            Some(card) => {
                session
                    .attempt_move(card, PileId::Tableau(from), PileId::Tableau(to))
                    .accepted
            }
            None => false,
        },
        Gesture::WasteToColumn(col) => match session.game().waste_top() {
            Some(card) => {
                session
                    .attempt_move(card.id(), PileId::Waste, PileId::Tableau(col))
                    .accepted
            }
            None => false,
        },
        Gesture::MoveToFoundation {
            col,
            depth,
            foundation,
        } => {
            let pile = session.game().tableau()[col].clone();
            match pile.len().checked_sub(1 + depth).map(|index| pile[index]) {
                Some(card) => {
                    session
                        .attempt_move(card.id(), PileId::Tableau(col), PileId::Foundation(foundation))
                        .accepted
                }
                None => false,
            }
        }
        Gesture::Drag { from, depth, target } => drag(session, from, depth, target),
        Gesture::Undo => session.undo().is_some(),
    }
}

fn check_board(game: &KlondikeGame) -> Result<(), TestCaseError> {
    let ids: HashSet<CardId> = game.all_cards().map(|card| card.id()).collect();
    prop_assert_eq!(game.all_cards().count(), DECK_SIZE);
    prop_assert_eq!(ids.len(), DECK_SIZE);

    for pile in game.foundations() {
        for (offset, card) in pile.iter().enumerate() {
            prop_assert_eq!(usize::from(card.rank), usize::from(ACE) + offset);
            prop_assert_eq!(card.suit, pile[0].suit);
            prop_assert!(card.face_up);
        }
    }

    for pile in game.tableau() {
        let Some(top) = pile.last() else {
            continue;
        };
        prop_assert!(top.face_up, "tableau top must be face up");
        let first_up = pile.iter().position(|card| card.face_up).unwrap_or(pile.len());
        prop_assert!(pile[first_up..].iter().all(|card| card.face_up));
        for pair in pile[first_up..].windows(2) {
            prop_assert_ne!(pair[0].color(), pair[1].color());
            prop_assert_eq!(pair[0].rank, pair[1].rank + 1);
        }
    }

    prop_assert!(game.stock().iter().all(|card| !card.face_up));
    prop_assert!(game.waste().iter().all(|card| card.face_up));
    Ok(())
}

fn foundation_total(game: &KlondikeGame) -> usize {
    game.foundations().iter().map(Vec::len).sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: a fresh deal is a full deck with the expected layout
    #[test]
    fn prop_seeded_deal_is_well_formed(seed in any::<u64>(), mode in draw_mode()) {
        let session = Session::with_seed(GameConfig::new(mode), seed);
        check_board(session.game())?;
        prop_assert_eq!(session.game().stock().len(), 24);
        prop_assert_eq!(session.deal_steps().len(), 28);
        prop_assert_eq!(session.game(), &KlondikeGame::new_with_seed(seed, mode));
    }

    /// Property: gestures never break the board invariants
    #[test]
    fn prop_gestures_preserve_board_invariants(
        seed in any::<u64>(),
        mode in draw_mode(),
        gestures in prop::collection::vec(gesture(), 0..120),
    ) {
        let mut session = Session::with_seed(GameConfig::new(mode), seed);
        for gesture in gestures {
            let undoing = matches!(gesture, Gesture::Undo);
            let before = foundation_total(session.game());

            apply(&mut session, gesture);
            if session.pending_autocomplete().is_some() {
                session.run_autocomplete();
            }

            check_board(session.game())?;
            prop_assert!(!session.is_dragging());
            if !undoing {
                prop_assert!(foundation_total(session.game()) >= before);
            }
            prop_assert!(session.undo_depth() <= session.profile().undo_history_limit);
        }
    }

    /// Property: undo replays the recorded states in reverse
    #[test]
    fn prop_undo_restores_every_recorded_state(
        seed in any::<u64>(),
        mode in draw_mode(),
        gestures in prop::collection::vec(gesture(), 0..25),
    ) {
        let mut session = Session::with_seed(GameConfig::new(mode), seed);
        let mut states = Vec::new();
        for gesture in gestures {
            if matches!(gesture, Gesture::Undo) {
                continue;
            }
            let before = session.game().clone();
            if apply(&mut session, gesture) {
                states.push(before);
            }
            if session.is_locked() {
                break;
            }
        }

        prop_assume!(!session.is_locked());
        prop_assert_eq!(session.undo_depth(), states.len());
        while let Some(expected) = states.pop() {
            prop_assert!(session.undo().is_some());
            prop_assert_eq!(session.game(), &expected);
        }
        prop_assert!(session.undo().is_none());
    }
}
