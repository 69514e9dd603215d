//! One game of Klondike and everything that lives exactly as long as it:
//! undo history, interaction lockouts, the drag gesture, the clock and the
//! outbound event queue.
//!
//! Every mutating entry point checks the lockout flags first and silently
//! does nothing while a deal or an auto-complete is in progress. Deal and
//! auto-complete work is paced by the caller through tickets stamped with the
//! session epoch; starting a new game bumps the epoch so tickets from the
//! previous game are refused.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::engine::automation::EngineProfile;
use crate::engine::autocomplete::{next_auto_move, should_autocomplete, AutoMove};
use crate::engine::commands::{
    AutoCompleteStep, DrawOutcome, DropOutcome, EngineCommand, EngineCommandResult, MoveOutcome,
};
use crate::engine::drag::{ActiveDrag, DragController, DragGrab, DragMotion, DragRelease};
use crate::engine::drop_target::{self, DropCandidate, Point, Rect};
use crate::engine::hinting::{find_hint, Hint};
use crate::engine::history::{Snapshot, UndoHistory};
use crate::engine::stats::GameStats;
use crate::game::{
    Card, CardId, DealStep, DrawResult, KlondikeGame, MoveTally, PileId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealTicket {
    epoch: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoCompleteTicket {
    epoch: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    StateChanged,
    Won { moves: u32, elapsed_seconds: u32 },
    Stuck,
}

#[derive(Debug, Clone)]
pub struct Session {
    game: KlondikeGame,
    config: GameConfig,
    profile: EngineProfile,
    seed: u64,
    deal_steps: Vec<DealStep>,
    history: UndoHistory,
    drag: DragController,
    drag_snapshot: bool,
    dealing: bool,
    autocompleting: bool,
    won: bool,
    epoch: u64,
    elapsed_seconds: u32,
    timer_running: bool,
    stats: GameStats,
    events: Vec<SessionEvent>,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let seed = rand::thread_rng().gen();
        Self::with_seed(config, seed)
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_profile(config, seed, EngineProfile::default())
    }

    pub fn with_profile(config: GameConfig, seed: u64, profile: EngineProfile) -> Self {
        let mut session = Self {
            game: KlondikeGame::empty(config.draw_mode),
            config: config.clone(),
            profile,
            seed,
            deal_steps: Vec::new(),
            history: UndoHistory::new(profile.undo_history_limit),
            drag: DragController::default(),
            drag_snapshot: false,
            dealing: false,
            autocompleting: false,
            won: false,
            epoch: 0,
            elapsed_seconds: 0,
            timer_running: false,
            stats: GameStats::default(),
            events: Vec::new(),
        };
        session.new_game_with_seed(config, seed);
        session
    }

    pub fn new_game(&mut self, config: GameConfig) -> &KlondikeGame {
        let seed = rand::thread_rng().gen();
        self.new_game_with_seed(config, seed)
    }

    pub fn new_game_with_seed(&mut self, config: GameConfig, seed: u64) -> &KlondikeGame {
        let ticket = self.begin_deal(config, seed);
        self.finish_deal(ticket);
        &self.game
    }

    /// Deals a fresh game and holds the session in the dealing lockout until
    /// [`Session::finish_deal`] is called with the returned ticket.
    pub fn begin_deal(&mut self, config: GameConfig, seed: u64) -> DealTicket {
        self.epoch = self.epoch.wrapping_add(1);
        self.drag.cancel();
        self.drag_snapshot = false;
        self.history.clear();

        let (game, steps) = KlondikeGame::dealt_with_seed(seed, config.draw_mode);
        self.game = game;
        self.deal_steps = steps;
        self.config = config;
        self.seed = seed;
        self.dealing = true;
        self.autocompleting = false;
        self.won = false;
        self.elapsed_seconds = 0;
        self.timer_running = false;
        self.stats.record_started();

        info!(
            seed,
            draw = self.config.draw_mode.count(),
            card_back = self.config.card_back.as_str(),
            "dealt new game"
        );
        self.events.push(SessionEvent::StateChanged);
        DealTicket { epoch: self.epoch }
    }

    pub fn finish_deal(&mut self, ticket: DealTicket) -> bool {
        if ticket.epoch != self.epoch || !self.dealing {
            debug!(ticket = ticket.epoch, epoch = self.epoch, "ignoring stale deal ticket");
            return false;
        }
        self.dealing = false;
        self.timer_running = true;
        self.events.push(SessionEvent::StateChanged);
        true
    }

    pub fn game(&self) -> &KlondikeGame {
        &self.game
    }

    pub fn pile(&self, pile: PileId) -> Option<&[Card]> {
        self.game.pile(pile)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn profile(&self) -> EngineProfile {
        self.profile
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn deal_steps(&self) -> &[DealStep] {
        &self.deal_steps
    }

    pub fn moves(&self) -> u32 {
        self.game.moves()
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    pub fn is_dealing(&self) -> bool {
        self.dealing
    }

    pub fn is_autocompleting(&self) -> bool {
        self.autocompleting
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_locked(&self) -> bool {
        self.dealing || self.autocompleting
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.is_locked() && self.drag.is_idle() && !self.history.is_empty()
    }

    pub fn stats(&self) -> GameStats {
        self.stats
    }

    /// Seeds the running tally, e.g. from a value persisted by the caller.
    pub fn set_stats(&mut self, stats: GameStats) {
        self.stats = stats;
    }

    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advances the game clock by one second while it is running.
    pub fn tick_timer(&mut self) -> u32 {
        if self.timer_running {
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        }
        self.elapsed_seconds
    }

    pub fn execute(&mut self, command: EngineCommand) -> EngineCommandResult {
        match command {
            EngineCommand::Draw => {
                if self.draw().changed() {
                    EngineCommandResult::changed()
                } else {
                    EngineCommandResult::unchanged()
                }
            }
            EngineCommand::Move { card, from, to } => self.attempt_move(card, from, to).into(),
            EngineCommand::SendToFoundation { from } => self.send_to_foundation(from).into(),
            EngineCommand::Undo => {
                if self.undo().is_some() {
                    EngineCommandResult::changed()
                } else {
                    EngineCommandResult::unchanged()
                }
            }
        }
    }

    /// Moves `card` and everything above it from `from` onto `to` if the
    /// card can be picked up there and the rules allow it.
    pub fn attempt_move(&mut self, card: CardId, from: PileId, to: PileId) -> MoveOutcome {
        if !self.accepts_gestures() {
            debug!(%card, %from, %to, "move ignored during lockout");
            return MoveOutcome::rejected();
        }
        let Some((lead, count)) = self.pick_up(from, card) else {
            debug!(%card, %from, "card cannot be picked up");
            return MoveOutcome::rejected();
        };
        if from == to || !self.game.is_valid_run_move(lead, count, to) {
            debug!(%card, %from, %to, "invalid move rejected");
            return MoveOutcome::rejected();
        }
        let pushed = self.push_snapshot();
        self.commit_move(count, from, to, pushed)
    }

    /// Double-click shortcut: the waste top or a tableau top goes to the
    /// first foundation that takes it.
    pub fn send_to_foundation(&mut self, from: PileId) -> MoveOutcome {
        if !self.accepts_gestures() {
            return MoveOutcome::rejected();
        }
        let top = match from {
            PileId::Waste => self.game.waste_top(),
            PileId::Tableau(col) => self.game.tableau_top(col),
            PileId::Stock | PileId::Foundation(_) => None,
        };
        let Some(card) = top.filter(|card| card.face_up) else {
            return MoveOutcome::rejected();
        };
        let Some(foundation_idx) = self.game.foundation_for(card) else {
            debug!(card = %card.id(), "no foundation accepts card");
            return MoveOutcome::rejected();
        };
        let pushed = self.push_snapshot();
        self.commit_move(1, from, PileId::Foundation(foundation_idx), pushed)
    }

    pub fn draw(&mut self) -> DrawOutcome {
        if !self.accepts_gestures() {
            return DrawOutcome::Unchanged;
        }
        let pushed = self.push_snapshot();
        match self.game.draw_or_recycle() {
            DrawResult::DrewFromStock(cards) => {
                self.after_mutation();
                DrawOutcome::Drew(cards)
            }
            DrawResult::RecycledWaste => {
                self.after_mutation();
                DrawOutcome::Recycled
            }
            DrawResult::NoOp => {
                if pushed {
                    self.history.discard_latest();
                }
                DrawOutcome::Unchanged
            }
        }
    }

    pub fn undo(&mut self) -> Option<&KlondikeGame> {
        if !self.accepts_gestures() {
            debug!("undo ignored during lockout");
            return None;
        }
        let snapshot = self.history.pop()?;
        snapshot.restore(&mut self.game);
        self.events.push(SessionEvent::StateChanged);
        Some(&self.game)
    }

    pub fn hint(&mut self) -> Hint {
        let hint = find_hint(&self.game);
        if hint == Hint::Stuck {
            info!(moves = self.game.moves(), "no moves left and the stock cannot help");
            self.events.push(SessionEvent::Stuck);
        }
        hint
    }

    pub fn resolve_drop(
        &self,
        lead: Card,
        source: PileId,
        drag_rect: Rect,
        candidates: &[DropCandidate],
    ) -> Option<PileId> {
        drop_target::resolve_drop(&self.game, lead, source, drag_rect, candidates)
    }

    /// Arms a drag on the card at `index` of `pile`. `card_rect` is where
    /// that card is drawn; `pointer` is where it was grabbed.
    pub fn pointer_down(&mut self, pile: PileId, index: usize, pointer: Point, card_rect: Rect) -> bool {
        if !self.accepts_gestures() {
            return false;
        }
        let Some(run) = self.game.draggable_run(pile, index) else {
            return false;
        };
        self.drag.press(DragGrab {
            source: pile,
            start: index,
            cards: run.to_vec(),
            origin: pointer,
            card_rect,
        })
    }

    /// Returns the dragged run's current rectangle while a drag is active.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<Rect> {
        match self.drag.motion(pointer) {
            DragMotion::Started => {
                if self.is_locked() {
                    self.drag.cancel();
                    return None;
                }
                self.drag_snapshot = self.push_snapshot();
            }
            DragMotion::Moved => {}
            DragMotion::Ignored => return None,
        }
        self.drag.active().map(ActiveDrag::drag_rect)
    }

    pub fn pointer_up(&mut self, candidates: &[DropCandidate]) -> DropOutcome {
        let active = match self.drag.release() {
            DragRelease::Ignored => return DropOutcome::Ignored,
            DragRelease::Click(_) => return DropOutcome::Click,
            DragRelease::Drop(active) => active,
        };
        let pushed = std::mem::take(&mut self.drag_snapshot);

        let target = drop_target::resolve_run_drop(
            &self.game,
            &active.grab.cards,
            active.grab.source,
            active.drag_rect(),
            candidates,
        );
        let Some(to) = target else {
            if pushed {
                self.history.discard_latest();
            }
            debug!(source = %active.grab.source, "drag cancelled, no valid target");
            self.events.push(SessionEvent::StateChanged);
            return DropOutcome::Cancelled;
        };

        if self
            .commit_move(active.grab.cards.len(), active.grab.source, to, pushed)
            .accepted
        {
            DropOutcome::Moved { to }
        } else {
            DropOutcome::Cancelled
        }
    }

    /// Abandons an armed or active drag without touching the board.
    pub fn cancel_drag(&mut self) {
        if self.drag.is_dragging() && std::mem::take(&mut self.drag_snapshot) {
            self.history.discard_latest();
        }
        self.drag.cancel();
    }

    pub fn pending_autocomplete(&self) -> Option<AutoCompleteTicket> {
        (self.autocompleting && !self.won).then_some(AutoCompleteTicket { epoch: self.epoch })
    }

    /// Performs at most one auto-move. Callers pace these ticks themselves.
    pub fn autocomplete_tick(&mut self, ticket: AutoCompleteTicket) -> AutoCompleteStep {
        if ticket.epoch != self.epoch || !self.autocompleting || self.won {
            return AutoCompleteStep::Stale;
        }
        let Some(auto_move) = next_auto_move(&self.game) else {
            return self.finish_autocomplete();
        };
        match self
            .game
            .move_cards(1, auto_move.from, auto_move.to, MoveTally::Uncounted)
        {
            Ok(()) => {
                self.events.push(SessionEvent::StateChanged);
                AutoCompleteStep::Moved(auto_move)
            }
            Err(err) => {
                warn!(%err, "auto-move could not be applied");
                self.finish_autocomplete()
            }
        }
    }

    /// Drains the pending auto-complete in one go and returns what it did.
    pub fn run_autocomplete(&mut self) -> Vec<AutoMove> {
        let Some(ticket) = self.pending_autocomplete() else {
            return Vec::new();
        };
        let mut performed = Vec::new();
        while let AutoCompleteStep::Moved(auto_move) = self.autocomplete_tick(ticket) {
            performed.push(auto_move);
        }
        performed
    }

    #[cfg(test)]
    pub(crate) fn replace_game(&mut self, game: KlondikeGame) {
        self.game = game;
        self.history.clear();
        self.won = false;
        self.autocompleting = false;
    }

    fn accepts_gestures(&self) -> bool {
        !self.is_locked() && self.drag.is_idle()
    }

    fn pick_up(&self, from: PileId, card: CardId) -> Option<(Card, usize)> {
        let index = self.game.position_of(from, card)?;
        let run = self.game.draggable_run(from, index)?;
        Some((*run.first()?, run.len()))
    }

    fn push_snapshot(&mut self) -> bool {
        if self.is_locked() || self.history.limit() == 0 {
            return false;
        }
        self.history.push(Snapshot::capture(&self.game));
        true
    }

    fn commit_move(&mut self, count: usize, from: PileId, to: PileId, pushed: bool) -> MoveOutcome {
        match self.game.move_cards(count, from, to, MoveTally::Counted) {
            Ok(()) => {
                self.after_mutation();
                MoveOutcome::accepted()
            }
            Err(err) => {
                warn!(%err, "move could not be applied, rolling back");
                if pushed {
                    self.history.discard_latest();
                }
                self.events.push(SessionEvent::StateChanged);
                MoveOutcome::rejected()
            }
        }
    }

    fn after_mutation(&mut self) {
        self.events.push(SessionEvent::StateChanged);
        if self.is_locked() || self.check_win() {
            return;
        }
        if should_autocomplete(&self.game) {
            info!(moves = self.game.moves(), "auto-complete engaged");
            self.autocompleting = true;
        }
    }

    fn finish_autocomplete(&mut self) -> AutoCompleteStep {
        self.autocompleting = false;
        let won = self.check_win();
        if !won {
            debug!("auto-complete stopped short of a win");
        }
        AutoCompleteStep::Finished { won }
    }

    fn check_win(&mut self) -> bool {
        if self.won {
            return true;
        }
        if self.is_locked() || !self.game.is_won() {
            return false;
        }
        self.won = true;
        // Held set after the win so the finished board stays frozen.
        self.autocompleting = true;
        self.timer_running = false;
        self.stats.record_won();
        info!(
            moves = self.game.moves(),
            elapsed_seconds = self.elapsed_seconds,
            "game won"
        );
        self.events.push(SessionEvent::Won {
            moves: self.game.moves(),
            elapsed_seconds: self.elapsed_seconds,
        });
        true
    }
}
