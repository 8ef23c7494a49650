#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use schedule::*;
pub use summary::*;
pub use timer::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod schedule;
mod summary;
mod timer;
mod types;

/// Number of suits, the fixed width of the face space.
pub const SUIT_COUNT: u8 = Suit::ALL.len() as u8;

/// Ranks available by default, the full 36 card deck.
pub const MAX_RANK: u8 = Rank::ALL.len() as u8;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// A few mismatches are forgiven.
    Easy,
    /// The first mismatch ends the game.
    #[default]
    Hard,
}

impl GameMode {
    pub const EASY_LIVES: u8 = 3;

    pub const fn is_easy(self) -> bool {
        matches!(self, Self::Easy)
    }

    /// Lives a game starts with, hard mode does not track them.
    pub const fn starting_lives(self) -> Option<u8> {
        match self {
            Self::Easy => Some(Self::EASY_LIVES),
            Self::Hard => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub pair_count: PairCount,
    pub mode: GameMode,
    pub max_rank: u8,
    pub preview_secs: u32,
}

impl GameConfig {
    /// Pair counts offered on the level selection, easiest first.
    pub const LEVELS: [PairCount; 3] = [3, 6, 9];

    pub const DEFAULT_PREVIEW_SECS: u32 = 5;

    pub const fn new_unchecked(pair_count: PairCount, mode: GameMode, max_rank: u8) -> Self {
        Self {
            pair_count,
            mode,
            max_rank,
            preview_secs: Self::DEFAULT_PREVIEW_SECS,
        }
    }

    pub fn new(pair_count: PairCount, mode: GameMode) -> Result<Self> {
        Self::with_max_rank(pair_count, mode, MAX_RANK)
    }

    pub fn with_max_rank(pair_count: PairCount, mode: GameMode, max_rank: u8) -> Result<Self> {
        let max_rank = max_rank.clamp(1, MAX_RANK);
        let config = Self::new_unchecked(pair_count, mode, max_rank);
        let available = config.available_pairs();
        if pair_count == 0 || u16::from(pair_count) > available {
            return Err(GameError::InvalidConfiguration {
                pairs: pair_count,
                available,
            });
        }
        Ok(config)
    }

    pub const fn with_preview_secs(self, preview_secs: u32) -> Self {
        Self {
            preview_secs,
            ..self
        }
    }

    /// Distinct faces that can be dealt with this rank limit.
    pub const fn available_pairs(&self) -> u16 {
        (SUIT_COUNT as u16) * (self.max_rank as u16)
    }

    pub const fn total_cards(&self) -> usize {
        2 * self.pair_count as usize
    }

    /// Whether this is the smallest level, the only one eligible for the leaderboard.
    pub const fn is_base_tier(&self) -> bool {
        self.pair_count == Self::LEVELS[0]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    NoChange,
    Opened,
    Matched,
    /// Two unmatched cards are open, easy mode took a life and will close them.
    Mismatched,
    Won,
    Lost,
}

impl OpenOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PowerupOutcome {
    /// The game is not accepting moves.
    NotActive,
    AlreadyUsed,
    NoCandidates,
    Applied,
    Won,
}

impl PowerupOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Applied | Self::Won)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    NoChange,
    Changed,
}

impl AdvanceOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

impl BitOr for AdvanceOutcome {
    type Output = AdvanceOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::NoChange, Self::NoChange) => Self::NoChange,
            _ => Self::Changed,
        }
    }
}
