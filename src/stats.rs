//! Cumulative player statistics
//!
//! Owned by the storage collaborator; updated once per finished
//! non-practice run.

use serde::{Deserialize, Serialize};

use crate::tuning::CoinTuning;

/// Lifetime totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistentStats {
    pub best: u32,
    pub runs: u32,
    pub total_score: u64,
    pub coins: u64,
    pub best_streak: u32,
}

impl PersistentStats {
    /// Fold a finished run into the totals. Practice runs leave everything
    /// untouched; returns whether the run set a new best.
    pub fn record_run(&mut self, score: u32, coins_earned: u32, practice: bool) -> bool {
        if practice {
            return false;
        }
        let new_best = score > self.best;
        self.runs += 1;
        self.total_score += u64::from(score);
        self.coins += u64::from(coins_earned);
        self.best = self.best.max(score);
        self.best_streak = self.best_streak.max(score);
        new_best
    }
}

/// Coins paid out for a run; practice runs earn nothing
pub fn coins_for_run(coins: &CoinTuning, score: u32, perfect_passes: u32, practice: bool) -> u32 {
    if practice {
        return 0;
    }
    coins.base_per_run + score * coins.per_score + perfect_passes * coins.perfect_bonus
}
