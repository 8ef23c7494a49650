use chrono::{DateTime, Utc};
use core::fmt;
use serde::{Deserialize, Serialize};

/// Whole minutes and seconds shown on the game clock.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Elapsed {
    pub minutes: u32,
    pub seconds: u32,
}

impl Elapsed {
    pub const ZERO: Self = Self {
        minutes: 0,
        seconds: 0,
    };

    pub const fn from_total_seconds(total: u32) -> Self {
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }

    pub const fn total_seconds(self) -> u32 {
        self.minutes * 60 + self.seconds
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}", self.minutes, self.seconds)
    }
}

/// Time between `start` and `end`, or `now` while the game has not ended yet.
///
/// Without a start there is nothing to measure and the clock reads zero. Partial seconds are
/// dropped, a negative span reads as zero.
pub fn compute_elapsed(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Elapsed {
    let Some(start) = start else {
        return Elapsed::ZERO;
    };

    let secs = (end.unwrap_or(now) - start).num_seconds().max(0);
    Elapsed::from_total_seconds(secs.try_into().unwrap_or(u32::MAX))
}
