use chrono::{DateTime, TimeDelta, Utc};
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Lifecycle of a single game.
///
/// Possible transitions:
///
/// - Preview -> InProgress, once the preview countdown elapses
/// - InProgress -> Won
/// - InProgress -> Lost
/// - any -> Preview, only through [`GameSession::reset`]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Every card is shown face up, nothing can be opened yet.
    #[default]
    Preview,
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Delay before easy mode turns mismatched cards back over.
pub const MISMATCH_CLOSE_DELAY_MS: i64 = 1_000;

/// How long the reveal power-up keeps every card face up.
pub const REVEAL_HOLD_MS: i64 = 5_000;

#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    cards: Deck,
    status: GameStatus,
    lives: Option<u8>,
    correct_pairs_count: PairCount,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    frozen_at: Option<DateTime<Utc>>,
    reveal_used: bool,
    random_match_used: bool,
    schedule: Schedule,
    rng: SmallRng,
}

impl GameSession {
    /// Deals a fresh deck and enters the preview, the game starts on its own once it is over.
    pub fn new(config: GameConfig, seed: u64, now: DateTime<Utc>) -> Self {
        let cards = RandomDeckGenerator::new(seed).generate(config);
        let mut schedule = Schedule::new();
        schedule.schedule(
            now + TimeDelta::seconds(config.preview_secs.into()),
            DeferredAction::StartGame,
        );

        log::debug!(
            "new game: {} pairs, {:?} mode, seed {}",
            config.pair_count,
            config.mode,
            seed
        );

        Self {
            config,
            cards,
            status: GameStatus::Preview,
            lives: config.mode.starting_lives(),
            correct_pairs_count: 0,
            started_at: None,
            ended_at: None,
            frozen_at: None,
            reveal_used: false,
            random_match_used: false,
            schedule,
            rng: SmallRng::seed_from_u64(seed.rotate_left(32)),
        }
    }

    /// Throws the current game away, pending effects included, and deals a new one.
    pub fn reset(&mut self, seed: u64, now: DateTime<Utc>) {
        log::debug!("reset from {:?}", self.status);
        *self = Self::new(self.config, seed, now);
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Result<&Card> {
        self.index_of(id).map(|index| &self.cards[index])
    }

    /// Whether the face of `card` should be visible, the preview and a finished game show all.
    pub fn shows_face(&self, card: &Card) -> bool {
        !self.status.is_in_progress() || card.open
    }

    /// Remaining lives, hard mode has none to count.
    pub fn lives(&self) -> Option<u8> {
        self.lives
    }

    pub fn correct_pairs_count(&self) -> PairCount {
        self.correct_pairs_count
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    pub fn is_timer_frozen(&self) -> bool {
        self.frozen_at.is_some()
    }

    pub fn reveal_used(&self) -> bool {
        self.reveal_used
    }

    pub fn random_match_used(&self) -> bool {
        self.random_match_used
    }

    pub fn is_reveal_active(&self) -> bool {
        self.schedule
            .contains(|action| matches!(action, DeferredAction::EndReveal))
    }

    /// Game clock, holds still while the timer is frozen.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Elapsed {
        compute_elapsed(self.started_at, self.ended_at.or(self.frozen_at), now)
    }

    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.schedule.next_deadline()
    }

    pub fn summary(&self, now: DateTime<Utc>) -> GameSummary {
        GameSummary {
            won: matches!(self.status, GameStatus::Won),
            mode: self.config.mode,
            pair_count: self.config.pair_count,
            elapsed: self.elapsed(now),
            reveal_used: self.reveal_used,
            random_match_used: self.random_match_used,
        }
    }

    /// Applies every deferred action that is due at `now`, earliest first.
    pub fn advance(&mut self, now: DateTime<Utc>) -> AdvanceOutcome {
        let mut outcome = AdvanceOutcome::NoChange;

        while let Some(Deferred { due, action }) = self.schedule.pop_due(now) {
            log::debug!("firing {:?} (due {:?})", action, due);
            match action {
                DeferredAction::StartGame => self.start_game(now),
                DeferredAction::CloseDangling(ids) => self.close_dangling(&ids),
                DeferredAction::EndReveal => self.end_reveal(),
            }
            outcome = outcome | AdvanceOutcome::Changed;
        }

        outcome
    }

    /// Resolves the player opening the card `id`.
    ///
    /// Clicks on open cards, clicks while a mismatch is still showing and clicks outside of a
    /// running game are ignored.
    pub fn open_card(&mut self, id: CardId, now: DateTime<Utc>) -> Result<OpenOutcome> {
        let index = self.index_of(id)?;
        log::trace!("open card {}", id);

        if !self.status.is_in_progress()
            || self.cards[index].open
            || self.pending_count() >= 2
        {
            return Ok(OpenOutcome::NoChange);
        }

        self.cards[index].open = true;
        let matched = self.resolve_pairs();

        if self.is_complete() {
            self.finish(GameStatus::Won, now);
            return Ok(OpenOutcome::Won);
        }

        let dangling: SmallVec<[CardId; 2]> = self
            .cards
            .iter()
            .filter(|card| card.is_pending())
            .map(|card| card.id)
            .collect();

        if dangling.len() >= 2 {
            return Ok(self.on_mismatch(dangling, now));
        }

        Ok(if matched {
            OpenOutcome::Matched
        } else {
            OpenOutcome::Opened
        })
    }

    /// "Прозрение": shows every card for a while with the clock stopped.
    pub fn use_reveal(&mut self, now: DateTime<Utc>) -> PowerupOutcome {
        if !self.status.is_in_progress() {
            return PowerupOutcome::NotActive;
        }
        if self.reveal_used {
            return PowerupOutcome::AlreadyUsed;
        }

        self.reveal_used = true;
        self.frozen_at = Some(now);
        // the end of the reveal closes every unguessed card anyway
        self.schedule
            .cancel_where(DeferredAction::is_close_dangling);
        for card in self.cards.iter_mut() {
            card.open = true;
        }
        self.schedule.schedule(
            now + TimeDelta::milliseconds(REVEAL_HOLD_MS),
            DeferredAction::EndReveal,
        );

        log::debug!("reveal started");
        PowerupOutcome::Applied
    }

    /// "Алохомора": resolves a random pair that has not been guessed yet.
    pub fn use_random_match(&mut self, now: DateTime<Utc>) -> PowerupOutcome {
        if !self.status.is_in_progress() {
            return PowerupOutcome::NotActive;
        }
        if self.random_match_used {
            return PowerupOutcome::AlreadyUsed;
        }

        let candidates: alloc::vec::Vec<usize> = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| !card.guessed)
            .map(|(index, _)| index)
            .collect();

        let Some(&first) = candidates.choose(&mut self.rng) else {
            return PowerupOutcome::NoCandidates;
        };
        let Some(second) = candidates
            .iter()
            .copied()
            .find(|&index| self.cards[index].is_twin_of(&self.cards[first]))
        else {
            log::warn!("card {} has no unguessed twin", self.cards[first].id);
            return PowerupOutcome::NoCandidates;
        };

        self.random_match_used = true;
        for index in [first, second] {
            self.cards[index].open = true;
            self.cards[index].guessed = true;
        }
        self.sync_pairs_count();
        log::debug!("random match on {}", self.cards[first].face);

        if self.is_complete() {
            self.finish(GameStatus::Won, now);
            PowerupOutcome::Won
        } else {
            PowerupOutcome::Applied
        }
    }

    fn start_game(&mut self, now: DateTime<Utc>) {
        for card in self.cards.iter_mut() {
            card.open = false;
            card.guessed = false;
        }
        self.status = GameStatus::InProgress;
        self.started_at = Some(now);
        self.ended_at = None;
        self.frozen_at = None;
        self.lives = self.config.mode.starting_lives();
        self.correct_pairs_count = 0;
        self.reveal_used = false;
        self.random_match_used = false;
        log::debug!("game started");
    }

    /// Marks every open twin pair as guessed, returning whether a new pair was found.
    fn resolve_pairs(&mut self) -> bool {
        let pending: SmallVec<[usize; 2]> = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.is_pending())
            .map(|(index, _)| index)
            .collect();

        let mut matched = false;
        for (i, &a) in pending.iter().enumerate() {
            for &b in &pending[i + 1..] {
                if self.cards[a].is_twin_of(&self.cards[b]) {
                    self.cards[a].guessed = true;
                    self.cards[b].guessed = true;
                    matched = true;
                }
            }
        }

        if matched {
            self.sync_pairs_count();
        }
        matched
    }

    fn on_mismatch(&mut self, dangling: SmallVec<[CardId; 2]>, now: DateTime<Utc>) -> OpenOutcome {
        let remaining = match (self.config.mode, self.lives) {
            (GameMode::Easy, Some(lives)) => lives.saturating_sub(1),
            _ => 0,
        };
        if self.config.mode.is_easy() {
            self.lives = Some(remaining);
        }
        log::debug!("mismatch on {:?}, {} lives left", dangling, remaining);

        if remaining == 0 {
            self.finish(GameStatus::Lost, now);
            return OpenOutcome::Lost;
        }

        self.schedule.schedule(
            now + TimeDelta::milliseconds(MISMATCH_CLOSE_DELAY_MS),
            DeferredAction::CloseDangling(dangling),
        );
        OpenOutcome::Mismatched
    }

    fn close_dangling(&mut self, ids: &[CardId]) {
        for card in self.cards.iter_mut() {
            if ids.contains(&card.id) && card.is_pending() {
                card.open = false;
            }
        }
    }

    fn end_reveal(&mut self) {
        for card in self.cards.iter_mut() {
            if !card.guessed {
                card.open = false;
            }
        }
        self.frozen_at = None;
        self.started_at = self
            .started_at
            .map(|started_at| started_at + TimeDelta::milliseconds(REVEAL_HOLD_MS));
        log::debug!("reveal ended");
    }

    fn finish(&mut self, status: GameStatus, now: DateTime<Utc>) {
        if self.status.is_finished() {
            return;
        }

        // time spent frozen does not count
        if let (Some(frozen_at), Some(started_at)) = (self.frozen_at.take(), self.started_at) {
            self.started_at = Some(started_at + (now - frozen_at));
        }
        self.schedule.clear();
        self.status = status;
        self.ended_at = Some(now);
        self.correct_pairs_count = 0;
        log::debug!("game over: {:?}", status);
    }

    fn sync_pairs_count(&mut self) {
        let guessed = self.cards.iter().filter(|card| card.guessed).count();
        self.correct_pairs_count = (guessed / 2).try_into().unwrap_or(PairCount::MAX);
    }

    /// Every pair is found. Outside of a reveal this is the same as every card being open.
    fn is_complete(&self) -> bool {
        self.cards.iter().all(|card| card.guessed)
    }

    fn pending_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_pending()).count()
    }

    fn index_of(&self, id: CardId) -> Result<usize> {
        self.cards
            .iter()
            .position(|card| card.id == id)
            .ok_or(GameError::InvalidCard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(0).unwrap()
    }

    fn secs(s: i64) -> DateTime<Utc> {
        t0() + TimeDelta::seconds(s)
    }

    fn millis(ms: i64) -> DateTime<Utc> {
        t0() + TimeDelta::milliseconds(ms)
    }

    /// Session that left the preview at 5s.
    fn started(pairs: PairCount, mode: GameMode) -> GameSession {
        let config = GameConfig::new(pairs, mode).unwrap();
        let mut session = GameSession::new(config, 42, t0());
        assert!(session.advance(secs(5)).has_update());
        session
    }

    /// Ids of the twins for every face, in deck order of the first twin.
    fn pairs(session: &GameSession) -> Vec<(CardId, CardId)> {
        let cards = session.cards();
        let mut out = Vec::new();
        for (i, a) in cards.iter().enumerate() {
            if let Some(b) = cards[i + 1..].iter().find(|b| a.is_twin_of(b)) {
                out.push((a.id, b.id));
            }
        }
        out
    }

    /// Two ids with different faces.
    fn mismatch(session: &GameSession, skip: usize) -> (CardId, CardId) {
        let pairs = pairs(session);
        (pairs[skip].0, pairs[skip + 1].0)
    }

    fn assert_invariants(session: &GameSession) {
        let guessed = session.cards().iter().filter(|card| card.guessed).count();
        let pending = session.cards().iter().filter(|card| card.is_pending()).count();

        assert_eq!(guessed % 2, 0);
        assert!(session.cards().iter().all(|card| !card.guessed || card.open));
        if session.status().is_in_progress() {
            assert_eq!(usize::from(session.correct_pairs_count()), guessed / 2);
            if !session.is_reveal_active() {
                assert!(pending <= 2);
            }
        }
    }

    #[test]
    fn preview_ignores_clicks_and_starts_after_countdown() {
        let config = GameConfig::new(3, GameMode::Hard).unwrap();
        let mut session = GameSession::new(config, 1, t0());
        let id = session.cards()[0].id;

        assert_eq!(session.status(), GameStatus::Preview);
        assert!(session.shows_face(&session.cards()[0]));
        assert_eq!(session.open_card(id, secs(1)).unwrap(), OpenOutcome::NoChange);
        assert_eq!(session.next_deadline(), Some(secs(5)));
        assert_eq!(session.advance(secs(4)), AdvanceOutcome::NoChange);

        assert_eq!(session.advance(secs(5)), AdvanceOutcome::Changed);
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.started_at(), Some(secs(5)));
        assert!(!session.shows_face(&session.cards()[0]));
        assert_eq!(session.elapsed(secs(5)), Elapsed::ZERO);
    }

    #[test]
    fn unknown_card_is_an_error() {
        let mut session = started(3, GameMode::Hard);

        assert_eq!(session.open_card(999, secs(6)), Err(GameError::InvalidCard));
    }

    #[test]
    fn reopening_open_card_changes_nothing() {
        let mut session = started(3, GameMode::Hard);
        let id = session.cards()[0].id;

        assert_eq!(session.open_card(id, secs(6)).unwrap(), OpenOutcome::Opened);
        let before = session.cards().to_vec();
        assert_eq!(session.open_card(id, secs(7)).unwrap(), OpenOutcome::NoChange);
        assert_eq!(session.cards(), &before[..]);
        assert_invariants(&session);
    }

    #[test]
    fn perfect_hard_game_is_won() {
        let mut session = started(3, GameMode::Hard);
        let pairs = pairs(&session);

        for (n, &(a, b)) in pairs.iter().enumerate() {
            let t = 10 * (n as i64 + 1);
            assert_eq!(session.open_card(a, secs(t)).unwrap(), OpenOutcome::Opened);
            assert_invariants(&session);
            let outcome = session.open_card(b, secs(t + 1)).unwrap();
            assert_invariants(&session);
            if n + 1 < pairs.len() {
                assert_eq!(outcome, OpenOutcome::Matched);
                assert_eq!(usize::from(session.correct_pairs_count()), n + 1);
            } else {
                assert_eq!(outcome, OpenOutcome::Won);
            }
        }

        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(session.correct_pairs_count(), 0);
        assert_eq!(session.ended_at(), Some(secs(31)));
        assert_eq!(session.elapsed(secs(100)).total_seconds(), 26);
        assert!(session.cards().iter().all(|card| card.open && card.guessed));
        assert_eq!(session.next_deadline(), None);
    }

    #[test]
    fn hard_mode_loses_on_first_mismatch() {
        let mut session = started(3, GameMode::Hard);
        let (a, b) = mismatch(&session, 0);

        session.open_card(a, secs(6)).unwrap();
        assert_eq!(session.open_card(b, secs(7)).unwrap(), OpenOutcome::Lost);
        assert_eq!(session.status(), GameStatus::Lost);
        assert_eq!(session.lives(), None);
        assert_eq!(session.ended_at(), Some(secs(7)));
    }

    #[test]
    fn easy_mode_closes_mismatch_after_delay() {
        let mut session = started(6, GameMode::Easy);
        let (a, b) = mismatch(&session, 0);

        session.open_card(a, secs(6)).unwrap();
        assert_eq!(session.open_card(b, secs(7)).unwrap(), OpenOutcome::Mismatched);
        assert_eq!(session.lives(), Some(2));

        // a third card cannot be opened while the mismatch is showing
        let (c, _) = mismatch(&session, 2);
        assert_eq!(session.open_card(c, millis(7_500)).unwrap(), OpenOutcome::NoChange);
        assert_invariants(&session);

        assert_eq!(session.advance(millis(7_999)), AdvanceOutcome::NoChange);
        assert_eq!(session.advance(secs(8)), AdvanceOutcome::Changed);
        assert!(!session.card(a).unwrap().open);
        assert!(!session.card(b).unwrap().open);
        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn easy_mode_keeps_matched_cards_when_closing_mismatch() {
        let mut session = started(6, GameMode::Easy);
        let pairs = pairs(&session);

        session.open_card(pairs[0].0, secs(6)).unwrap();
        session.open_card(pairs[0].1, secs(6)).unwrap();
        session.open_card(pairs[1].0, secs(7)).unwrap();
        session.open_card(pairs[2].0, secs(7)).unwrap();
        session.advance(secs(8));

        assert!(session.card(pairs[0].0).unwrap().guessed);
        assert!(session.card(pairs[0].1).unwrap().open);
        assert!(!session.card(pairs[1].0).unwrap().open);
        assert_eq!(session.correct_pairs_count(), 1);
    }

    #[test]
    fn easy_mode_two_mismatches_leave_one_life() {
        let mut session = started(6, GameMode::Easy);

        for round in 0..2 {
            let (a, b) = mismatch(&session, 0);
            let t = 10 * (round + 1);
            session.open_card(a, secs(t)).unwrap();
            assert_eq!(session.open_card(b, secs(t)).unwrap(), OpenOutcome::Mismatched);
            session.advance(secs(t + 1));
        }

        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.lives(), Some(1));
    }

    #[test]
    fn easy_mode_third_mismatch_loses() {
        let mut session = started(6, GameMode::Easy);

        let mut last = OpenOutcome::NoChange;
        for round in 0..3 {
            let (a, b) = mismatch(&session, 0);
            let t = 10 * (round + 1);
            session.open_card(a, secs(t)).unwrap();
            last = session.open_card(b, secs(t)).unwrap();
            session.advance(secs(t + 1));
        }

        assert_eq!(last, OpenOutcome::Lost);
        assert_eq!(session.status(), GameStatus::Lost);
        assert_eq!(session.lives(), Some(0));
        assert_eq!(session.ended_at(), Some(secs(30)));
    }

    #[test]
    fn reveal_freezes_clock_and_shifts_start() {
        let mut session = started(3, GameMode::Hard);
        let (a, b) = pairs(&session)[0];
        session.open_card(a, secs(6)).unwrap();
        session.open_card(b, secs(6)).unwrap();

        assert_eq!(session.use_reveal(secs(15)), PowerupOutcome::Applied);
        assert!(session.is_timer_frozen());
        assert!(session.cards().iter().all(|card| card.open));
        assert_eq!(session.elapsed(secs(18)).total_seconds(), 10);

        // every card is open during the hold
        let other = pairs(&session)[1].0;
        assert_eq!(session.open_card(other, secs(16)).unwrap(), OpenOutcome::NoChange);

        assert!(session.advance(secs(20)).has_update());
        assert!(!session.is_timer_frozen());
        assert_eq!(session.started_at(), Some(secs(10)));
        assert_eq!(session.elapsed(secs(20)).total_seconds(), 10);
        assert!(session.card(a).unwrap().open);
        assert!(!session.card(other).unwrap().open);
        assert_invariants(&session);
    }

    #[test]
    fn reveal_is_usable_once() {
        let mut session = started(3, GameMode::Hard);

        assert_eq!(session.use_reveal(secs(6)), PowerupOutcome::Applied);
        assert_eq!(session.use_reveal(secs(7)), PowerupOutcome::AlreadyUsed);
        session.advance(secs(11));
        assert_eq!(session.use_reveal(secs(12)), PowerupOutcome::AlreadyUsed);
        assert_eq!(session.started_at(), Some(secs(10)));
    }

    #[test]
    fn reveal_replaces_pending_mismatch_close() {
        let mut session = started(6, GameMode::Easy);
        let (a, b) = mismatch(&session, 0);
        session.open_card(a, secs(6)).unwrap();
        session.open_card(b, secs(6)).unwrap();

        session.use_reveal(millis(6_500));
        assert_eq!(session.advance(secs(7)), AdvanceOutcome::NoChange);
        assert!(session.card(a).unwrap().open);

        session.advance(millis(11_500));
        assert!(!session.card(a).unwrap().open);
        assert!(!session.card(b).unwrap().open);
    }

    #[test]
    fn powerups_need_a_running_game() {
        let config = GameConfig::new(3, GameMode::Hard).unwrap();
        let mut session = GameSession::new(config, 0, t0());

        assert_eq!(session.use_reveal(secs(1)), PowerupOutcome::NotActive);
        assert_eq!(session.use_random_match(secs(1)), PowerupOutcome::NotActive);
        assert!(!session.reveal_used());
    }

    #[test]
    fn random_match_guesses_one_pair() {
        let mut session = started(3, GameMode::Hard);

        assert_eq!(session.use_random_match(secs(6)), PowerupOutcome::Applied);
        assert_eq!(session.correct_pairs_count(), 1);
        let guessed: Vec<&Card> = session.cards().iter().filter(|card| card.guessed).collect();
        assert_eq!(guessed.len(), 2);
        assert!(guessed[0].is_twin_of(guessed[1]));
        assert!(guessed.iter().all(|card| card.open));

        assert_eq!(session.use_random_match(secs(7)), PowerupOutcome::AlreadyUsed);
        assert_eq!(session.correct_pairs_count(), 1);
        assert_invariants(&session);
    }

    #[test]
    fn random_match_on_last_pair_wins() {
        let mut session = started(3, GameMode::Hard);
        let pairs = pairs(&session);
        for &(a, b) in &pairs[..2] {
            session.open_card(a, secs(6)).unwrap();
            session.open_card(b, secs(6)).unwrap();
        }

        assert_eq!(session.use_random_match(secs(9)), PowerupOutcome::Won);
        assert_eq!(session.status(), GameStatus::Won);
        assert!(session.card(pairs[2].0).unwrap().guessed);
        assert!(session.card(pairs[2].1).unwrap().guessed);
        assert_eq!(session.ended_at(), Some(secs(9)));
    }

    #[test]
    fn winning_during_reveal_excludes_frozen_time() {
        let mut session = started(1, GameMode::Hard);

        session.use_reveal(secs(10));
        assert_eq!(session.use_random_match(secs(12)), PowerupOutcome::Won);
        assert!(!session.is_timer_frozen());
        assert_eq!(session.next_deadline(), None);
        assert_eq!(session.elapsed(secs(60)).total_seconds(), 5);
    }

    #[test]
    fn reset_cancels_pending_actions_and_returns_to_preview() {
        let mut session = started(6, GameMode::Easy);
        let (a, b) = mismatch(&session, 0);
        session.open_card(a, secs(6)).unwrap();
        session.open_card(b, secs(6)).unwrap();

        session.reset(7, secs(6));
        assert_eq!(session.status(), GameStatus::Preview);
        assert_eq!(session.next_deadline(), Some(secs(11)));
        assert_eq!(session.lives(), Some(3));
        assert_eq!(session.elapsed(secs(8)), Elapsed::ZERO);
        assert!(session.cards().iter().all(|card| !card.open));

        // only the new countdown fires
        assert_eq!(session.advance(secs(7)), AdvanceOutcome::NoChange);
        session.advance(secs(11));
        assert_eq!(session.status(), GameStatus::InProgress);
        assert!(!session.reveal_used());
    }

    #[test]
    fn reset_during_preview_restarts_countdown() {
        let config = GameConfig::new(3, GameMode::Hard).unwrap();
        let mut session = GameSession::new(config, 42, t0());

        session.reset(7, secs(3));
        assert_eq!(session.next_deadline(), Some(secs(8)));

        // the first countdown would have ended here
        assert_eq!(session.advance(secs(5)), AdvanceOutcome::NoChange);
        assert_eq!(session.status(), GameStatus::Preview);
        assert_eq!(session.started_at(), None);

        assert_eq!(session.advance(secs(8)), AdvanceOutcome::Changed);
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.started_at(), Some(secs(8)));
    }

    #[test]
    fn reset_during_reveal_drops_reveal_end() {
        let mut session = started(3, GameMode::Hard);
        assert_eq!(session.use_reveal(secs(10)), PowerupOutcome::Applied);
        assert!(session.is_timer_frozen());

        session.reset(7, secs(11));
        assert!(!session.is_timer_frozen());
        assert!(!session.is_reveal_active());
        assert_eq!(session.next_deadline(), Some(secs(16)));

        // the reveal would have ended here
        assert_eq!(session.advance(secs(15)), AdvanceOutcome::NoChange);
        assert_eq!(session.status(), GameStatus::Preview);
        assert_eq!(session.started_at(), None);
        assert!(!session.is_timer_frozen());

        session.advance(secs(16));
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.started_at(), Some(secs(16)));
        assert!(!session.reveal_used());
        assert!(session.cards().iter().all(|card| !card.open));
        assert_eq!(session.elapsed(secs(20)), Elapsed::from_total_seconds(4));
    }

    #[test]
    fn finished_game_ignores_moves() {
        let mut session = started(3, GameMode::Hard);
        let (a, b) = mismatch(&session, 0);
        session.open_card(a, secs(6)).unwrap();
        session.open_card(b, secs(6)).unwrap();
        let (c, _) = mismatch(&session, 1);

        assert_eq!(session.open_card(c, secs(8)).unwrap(), OpenOutcome::NoChange);
        assert_eq!(session.use_random_match(secs(8)), PowerupOutcome::NotActive);
        assert!(session.shows_face(session.card(c).unwrap()));
    }

    #[test]
    fn summary_reports_run() {
        let mut session = started(3, GameMode::Hard);
        session.use_random_match(secs(6));

        let summary = session.summary(secs(8));
        assert!(!summary.won);
        assert!(summary.random_match_used);
        assert!(!summary.reveal_used);
        assert_eq!(summary.elapsed.total_seconds(), 3);
    }
}
