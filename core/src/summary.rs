use alloc::collections::VecDeque;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Achievement as the leaderboard knows it, an opaque number on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementId(pub u8);

impl AchievementId {
    pub const HARD_MODE: Self = Self(1);
    pub const NO_POWERUPS: Self = Self(2);

    /// What a flawless run earns before any deductions.
    pub const BASE: [Self; 2] = [Self::HARD_MODE, Self::NO_POWERUPS];
}

/// Outcome of a finished game, everything the end-of-game view and the leaderboard need.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub won: bool,
    pub mode: GameMode,
    pub pair_count: PairCount,
    pub elapsed: Elapsed,
    pub reveal_used: bool,
    pub random_match_used: bool,
}

impl GameSummary {
    /// Only won hard mode games on the smallest level make it onto the leaderboard.
    pub fn is_leaderboard_worthy(&self) -> bool {
        self.won && !self.mode.is_easy() && self.pair_count == GameConfig::LEVELS[0]
    }

    /// Base achievements minus one for each power-up used and one more for easy mode.
    pub fn achievements(&self) -> Vec<AchievementId> {
        let mut achievements = VecDeque::from(AchievementId::BASE);
        if self.reveal_used {
            achievements.pop_front();
        }
        if self.random_match_used {
            achievements.pop_front();
        }
        if self.mode.is_easy() {
            achievements.pop_back();
        }
        achievements.into()
    }

    pub fn time_secs(&self) -> u32 {
        self.elapsed.total_seconds()
    }
}
