use alloc::vec::Vec;
use chrono::{DateTime, Utc};
use smallvec::SmallVec;

use crate::*;

/// Effect applied by the session once its deadline passes.
#[derive(Clone, Debug, PartialEq)]
pub enum DeferredAction {
    /// Preview is over, hide the cards and start the clock.
    StartGame,
    /// Turn the given mismatched cards back face down.
    CloseDangling(SmallVec<[CardId; 2]>),
    /// Reveal hold is over, hide unguessed cards and resume the clock.
    EndReveal,
}

impl DeferredAction {
    pub const fn is_close_dangling(&self) -> bool {
        matches!(self, Self::CloseDangling(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Deferred {
    pub due: DateTime<Utc>,
    pub action: DeferredAction,
}

/// Pending deferred actions of one session, ordered by deadline.
///
/// Actions sharing a deadline fire in the order they were scheduled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schedule {
    pending: Vec<Deferred>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: DateTime<Utc>, action: DeferredAction) {
        let index = self.pending.partition_point(|deferred| deferred.due <= due);
        log::debug!("scheduled {:?} at {}", action, due);
        self.pending.insert(index, Deferred { due, action });
    }

    /// Drops every pending action matching `pred`, returning how many were dropped.
    pub fn cancel_where(&mut self, pred: impl Fn(&DeferredAction) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|deferred| !pred(&deferred.action));
        let cancelled = before - self.pending.len();
        if cancelled > 0 {
            log::debug!("cancelled {} deferred actions", cancelled);
        }
        cancelled
    }

    pub fn clear(&mut self) {
        self.cancel_where(|_| true);
    }

    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.pending.first().map(|deferred| deferred.due)
    }

    /// Removes and returns the earliest action due at `now`, if any.
    pub fn pop_due(&mut self, now: DateTime<Utc>) -> Option<Deferred> {
        match self.pending.first() {
            Some(deferred) if deferred.due <= now => Some(self.pending.remove(0)),
            _ => None,
        }
    }

    pub fn contains(&self, pred: impl Fn(&DeferredAction) -> bool) -> bool {
        self.pending.iter().any(|deferred| pred(&deferred.action))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
