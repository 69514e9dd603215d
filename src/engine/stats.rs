use serde::{Deserialize, Serialize};

/// Running tally across the games of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    pub games_played: u32,
    pub games_won: u32,
}

impl GameStats {
    pub fn record_started(&mut self) {
        self.games_played = self.games_played.saturating_add(1);
    }

    pub fn record_won(&mut self) {
        self.games_won = self.games_won.saturating_add(1);
    }

    /// Rounded win percentage, or `None` before the first game.
    pub fn win_rate_percent(&self) -> Option<u32> {
        if self.games_played == 0 {
            return None;
        }
        let rate = f64::from(self.games_won) * 100.0 / f64::from(self.games_played);
        Some(rate.round() as u32)
    }
}
