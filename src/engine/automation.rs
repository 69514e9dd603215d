/// Pacing and capacity knobs for one session.
///
/// The engine itself never sleeps; the interval fields tell the caller how
/// fast to feed deal and auto-complete ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineProfile {
    pub undo_history_limit: usize,
    pub autocomplete_step_interval_ms: u64,
    pub deal_step_interval_ms: u64,
    pub timer_interval_ms: u64,
}

pub const KLONDIKE_ENGINE_PROFILE: EngineProfile = EngineProfile {
    undo_history_limit: 30,
    autocomplete_step_interval_ms: 100,
    deal_step_interval_ms: 40,
    timer_interval_ms: 1_000,
};

impl Default for EngineProfile {
    fn default() -> Self {
        KLONDIKE_ENGINE_PROFILE
    }
}
