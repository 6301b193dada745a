//! Session module - the controller shared by every game kind
//!
//! A [`GameSession`] owns the lifecycle (`NotStarted -> Running -> Completed`),
//! the score, the countdown and the active [`ModuleState`]. Game modules only
//! report steps; the session applies score deltas (clamped at 0), decides when the
//! session completes and notifies the [`SessionObserver`] exactly once.
//!
//! Time only moves through [`GameSession::advance`]. Due timers are handled one
//! by one, so a completion or reset triggered by one timer cancels everything
//! still queued behind it.
//!
//! # Example
//!
//! ```
//! use eco_games_core::{GameSession, Dispatch};
//! use eco_games_types::{GameAction, GameConfig, GameKind};
//!
//! let config = GameConfig::new("demo", "Quiz", GameKind::Quiz).with_time_limit(60);
//! let mut session = GameSession::new(config, 42).unwrap();
//! session.start().unwrap();
//!
//! // Wrong-kind actions are ignored
//! assert_eq!(session.dispatch(GameAction::FlipCard { index: 0 }), Dispatch::Ignored);
//!
//! // One minute later the countdown ends the session
//! let report = session.advance(60_000).unwrap();
//! assert_eq!(report.time_spent_secs, 60);
//! ```

use crate::catalog::Catalog;
use crate::clock::Clock;
use crate::games::{ModuleContext, ModuleState, SessionTimer, Step};
use crate::rng::SimpleRng;
use crate::snapshot::SessionSnapshot;
use crate::types::{
    CompletionReason, CompletionReport, ConfigError, GameAction, GameConfig, Outcome,
    SessionStatus, COUNTDOWN_TICK_MS, ECO_POINTS_DIVISOR,
};

/// Host callbacks
pub trait SessionObserver {
    /// Called exactly once per completed session
    fn on_complete(&mut self, report: &CompletionReport);

    /// Called when a running session is aborted; no score is awarded
    fn on_abort(&mut self) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_complete(&mut self, _report: &CompletionReport) {}
}

/// Result of [`GameSession::dispatch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Not applicable to the current kind, state or status; nothing changed
    Ignored,
    /// Accepted; `score_delta` is the change actually applied to the score
    Applied { score_delta: i32 },
    /// Accepted and the session completed
    Completed(CompletionReport),
}

/// One play-through of a [`GameConfig`]
#[derive(Debug)]
pub struct GameSession<O: SessionObserver = NoopObserver> {
    config: GameConfig,
    catalog: Catalog,
    seed: u32,
    rng: SimpleRng,
    clock: Clock<SessionTimer>,
    status: SessionStatus,
    score: u32,
    time_remaining: Option<u32>,
    started_at_ms: u64,
    module: Option<ModuleState>,
    /// Module timer transitions applied so far
    transitions: u64,
    report: Option<CompletionReport>,
    observer: O,
}

impl GameSession<NoopObserver> {
    /// Session over the built-in catalog
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        Self::with_catalog(config, Catalog::builtin(), seed)
    }

    /// Session over host-supplied content
    pub fn with_catalog(config: GameConfig, catalog: Catalog, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        catalog.validate_for(config.kind)?;

        Ok(Self {
            time_remaining: config.time_limit_seconds,
            config,
            catalog,
            seed,
            rng: SimpleRng::new(seed),
            clock: Clock::new(),
            status: SessionStatus::NotStarted,
            score: 0,
            started_at_ms: 0,
            module: None,
            transitions: 0,
            report: None,
            observer: NoopObserver,
        })
    }
}

impl<O: SessionObserver> GameSession<O> {
    /// Replace the observer
    pub fn with_observer<P: SessionObserver>(self, observer: P) -> GameSession<P> {
        GameSession {
            config: self.config,
            catalog: self.catalog,
            seed: self.seed,
            rng: self.rng,
            clock: self.clock,
            status: self.status,
            score: self.score,
            time_remaining: self.time_remaining,
            started_at_ms: self.started_at_ms,
            module: self.module,
            transitions: self.transitions,
            report: self.report,
            observer,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Seed the session was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds left, for time-limited sessions
    pub fn time_remaining(&self) -> Option<u32> {
        self.time_remaining
    }

    /// Virtual time since start
    pub fn elapsed_ms(&self) -> u64 {
        match self.status {
            SessionStatus::NotStarted => 0,
            _ => self.clock.now_ms().saturating_sub(self.started_at_ms),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn module(&self) -> Option<&ModuleState> {
        self.module.as_ref()
    }

    /// Count of timer-driven module changes (flip-back, reveal advance,
    /// pattern advance, snake step). Hosts redraw when it moves.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn report(&self) -> Option<&CompletionReport> {
        self.report.as_ref()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Timers still queued (countdown and module timers)
    pub fn pending_timers(&self) -> usize {
        self.clock.pending()
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    /// Generate content and start the countdown.
    ///
    /// Returns `Ok(false)` unless the session is `NotStarted`.
    pub fn start(&mut self) -> Result<bool, ConfigError> {
        if self.status != SessionStatus::NotStarted {
            tracing::trace!(game_id = %self.config.id, status = ?self.status, "start ignored");
            return Ok(false);
        }

        self.started_at_ms = self.clock.now_ms();
        self.time_remaining = self.config.time_limit_seconds;
        // Queued before any module timer, so expiry is handled first when both
        // fall due at the same instant.
        if self.config.time_limit_seconds.is_some() {
            self.clock.start(COUNTDOWN_TICK_MS, SessionTimer::Countdown);
        }

        let mut ctx = ModuleContext::new(&mut self.rng, &mut self.clock);
        let module = match ModuleState::generate(self.config.kind, &self.catalog, &mut ctx) {
            Ok(module) => module,
            Err(err) => {
                self.clock.cancel_all();
                return Err(err);
            }
        };
        self.module = Some(module);
        self.status = SessionStatus::Running;

        tracing::info!(
            game_id = %self.config.id,
            kind = self.config.kind.as_str(),
            time_limit = ?self.config.time_limit_seconds,
            "session started"
        );
        Ok(true)
    }

    /// Forward a player action to the active module
    pub fn dispatch(&mut self, action: GameAction) -> Dispatch {
        if self.status != SessionStatus::Running {
            tracing::trace!(action = action.as_str(), status = ?self.status, "action ignored");
            return Dispatch::Ignored;
        }
        let Some(module) = self.module.as_mut() else {
            return Dispatch::Ignored;
        };

        let mut ctx = ModuleContext::new(&mut self.rng, &mut self.clock);
        let step = module.handle(&action, &mut ctx);
        if !step.accepted {
            tracing::trace!(action = action.as_str(), "action not applicable");
            return Dispatch::Ignored;
        }
        tracing::debug!(
            action = action.as_str(),
            delta = step.score_delta,
            outcome = ?step.outcome,
            "action applied"
        );
        self.apply(step)
    }

    /// Move virtual time forward by `elapsed_ms`, firing due timers in order.
    ///
    /// Returns the completion report if the session completed during this call.
    pub fn advance(&mut self, elapsed_ms: u64) -> Option<CompletionReport> {
        let until = self.clock.now_ms().saturating_add(elapsed_ms);
        let mut completed = None;

        while self.status == SessionStatus::Running {
            let Some((at_ms, event)) = self.clock.pop_due(until) else {
                break;
            };
            tracing::trace!(at_ms, ?event, "timer fired");
            if let Dispatch::Completed(report) = self.on_timer(event) {
                completed = Some(report);
            }
        }

        self.clock.advance_to(until);
        completed
    }

    fn on_timer(&mut self, event: SessionTimer) -> Dispatch {
        match event {
            SessionTimer::Countdown => {
                let remaining = self.time_remaining.map(|t| t.saturating_sub(1));
                self.time_remaining = remaining;
                match remaining {
                    Some(0) => self
                        .complete(CompletionReason::TimeExpired)
                        .map_or(Dispatch::Ignored, Dispatch::Completed),
                    _ => Dispatch::Applied { score_delta: 0 },
                }
            }
            SessionTimer::Module(timer) => {
                let Some(module) = self.module.as_mut() else {
                    return Dispatch::Ignored;
                };
                let mut ctx = ModuleContext::new(&mut self.rng, &mut self.clock);
                let step = module.on_timer(timer, &mut ctx);
                if !step.accepted {
                    return Dispatch::Ignored;
                }
                tracing::debug!(?timer, delta = step.score_delta, "deferred transition");
                self.transitions += 1;
                self.apply(step)
            }
        }
    }

    fn apply(&mut self, step: Step) -> Dispatch {
        let before = self.score;
        let after = (i64::from(before) + i64::from(step.score_delta)).clamp(0, i64::from(u32::MAX));
        self.score = after as u32;
        let score_delta = (after - i64::from(before)) as i32;

        let reason = match step.outcome {
            Outcome::Continue => return Dispatch::Applied { score_delta },
            Outcome::Win => CompletionReason::Win,
            Outcome::Lose => CompletionReason::Lose,
        };
        self.complete(reason)
            .map_or(Dispatch::Applied { score_delta }, Dispatch::Completed)
    }

    /// Transition to `Completed`; only the first call per session does anything
    fn complete(&mut self, reason: CompletionReason) -> Option<CompletionReport> {
        if self.status != SessionStatus::Running {
            return None;
        }
        self.status = SessionStatus::Completed;
        self.clock.cancel_all();

        let time_spent_secs = (self.elapsed_ms() / 1000).min(u64::from(u32::MAX)) as u32;
        let report = CompletionReport {
            game_id: self.config.id.clone(),
            kind: self.config.kind,
            score: self.score,
            time_spent_secs,
            reason,
            eco_points: self.score / ECO_POINTS_DIVISOR,
            passed: self.config.min_score.map(|min| self.score >= min),
        };

        tracing::info!(
            game_id = %report.game_id,
            score = report.score,
            time_spent_secs = report.time_spent_secs,
            reason = report.reason.as_str(),
            "session completed"
        );
        self.observer.on_complete(&report);
        self.report = Some(report.clone());
        Some(report)
    }

    /// Cancel every timer and return to `NotStarted` with the same config.
    ///
    /// Content is generated afresh on the next [`start`](Self::start).
    pub fn reset(&mut self) {
        let cancelled = self.clock.cancel_all();
        self.module = None;
        self.status = SessionStatus::NotStarted;
        self.score = 0;
        self.time_remaining = self.config.time_limit_seconds;
        self.report = None;
        self.started_at_ms = self.clock.now_ms();
        tracing::info!(game_id = %self.config.id, cancelled, "session reset");
    }

    /// Cancel a running session without awarding a score.
    ///
    /// Returns false if the session was not running.
    pub fn abort(&mut self) -> bool {
        if self.status != SessionStatus::Running {
            return false;
        }
        self.clock.cancel_all();
        tracing::info!(game_id = %self.config.id, score = self.score, "session aborted");
        self.observer.on_abort();
        self.reset();
        true
    }

    /// Owned view of the session for hosts
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            game_id: self.config.id.clone(),
            title: self.config.title.clone(),
            kind: self.config.kind,
            status: self.status,
            score: self.score,
            points_available: self.config.points_available,
            time_remaining: self.time_remaining,
            elapsed_ms: self.elapsed_ms(),
            module: self.module.clone(),
            report: self.report.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GameKind, SessionStatus};

    #[derive(Debug, Default)]
    struct Recorder {
        completed: Vec<CompletionReport>,
        aborted: u32,
    }

    impl SessionObserver for Recorder {
        fn on_complete(&mut self, report: &CompletionReport) {
            self.completed.push(report.clone());
        }

        fn on_abort(&mut self) {
            self.aborted += 1;
        }
    }

    fn session(kind: GameKind, limit: Option<u32>) -> GameSession<Recorder> {
        let mut config = GameConfig::new("test", "Test", kind).with_min_score(20);
        config.time_limit_seconds = limit;
        GameSession::new(config, 7).unwrap().with_observer(Recorder::default())
    }

    #[test]
    fn test_lifecycle() {
        let mut s = session(GameKind::Quiz, Some(30));
        assert_eq!(s.status(), SessionStatus::NotStarted);
        assert!(s.module().is_none());
        assert_eq!(s.dispatch(GameAction::SelectOption { index: 0 }), Dispatch::Ignored);

        assert!(s.start().unwrap());
        assert!(!s.start().unwrap(), "second start is ignored");
        assert_eq!(s.status(), SessionStatus::Running);
        assert_eq!(s.time_remaining(), Some(30));
        assert!(s.module().is_some());
    }

    #[test]
    fn test_countdown_expires() {
        let mut s = session(GameKind::Puzzle, Some(3));
        s.start().unwrap();

        assert!(s.advance(2999).is_none());
        assert_eq!(s.time_remaining(), Some(1));
        let report = s.advance(1).unwrap();
        assert_eq!(report.reason, CompletionReason::TimeExpired);
        assert_eq!(report.time_spent_secs, 3);
        assert_eq!(s.time_remaining(), Some(0));
        assert_eq!(s.observer().completed.len(), 1);
        assert_eq!(s.pending_timers(), 0);
    }

    #[test]
    fn test_expiry_wins_same_instant_reveal() {
        let mut catalog = Catalog::builtin();
        catalog.quiz_questions.truncate(1);
        let correct = catalog.quiz_questions[0].correct;
        let config = GameConfig::new("q", "Quiz", GameKind::Quiz).with_time_limit(2);
        let mut s = GameSession::with_catalog(config, catalog, 1).unwrap();
        s.start().unwrap();

        // The reveal that would win falls due together with the last countdown tick
        assert_eq!(
            s.dispatch(GameAction::SelectOption { index: correct }),
            Dispatch::Applied { score_delta: 20 }
        );
        let report = s.advance(2000).unwrap();
        assert_eq!(report.reason, CompletionReason::TimeExpired);
        assert_eq!(report.score, 20);
        assert_eq!(s.transitions(), 0);
    }

    #[test]
    fn test_timer_transitions_are_counted() {
        let mut s = session(GameKind::Quiz, Some(60));
        s.start().unwrap();
        s.dispatch(GameAction::SelectOption { index: 0 });
        s.advance(1999);
        assert_eq!(s.transitions(), 0);
        s.advance(1);
        assert_eq!(s.transitions(), 1);
    }

    #[test]
    fn test_module_loss_before_expiry() {
        let mut s = session(GameKind::Snake, Some(3));
        s.start().unwrap();

        // Heading right from (5,5), the fifth step at 1500 ms leaves the grid.
        let report = s.advance(3000).unwrap();
        assert_eq!(report.reason, CompletionReason::Lose);
        assert_eq!(report.time_spent_secs, 1);
        assert_eq!(s.time_remaining(), Some(2));
    }

    #[test]
    fn test_untimed_session_never_expires() {
        let mut s = session(GameKind::Quiz, None);
        s.start().unwrap();
        assert!(s.advance(10_000_000).is_none());
        assert_eq!(s.time_remaining(), None);
        assert!(s.is_running());
    }

    #[test]
    fn test_completion_is_reported_once() {
        let mut s = session(GameKind::Puzzle, Some(60));
        s.start().unwrap();
        let mut last = Dispatch::Ignored;
        for piece in 0..6 {
            last = s.dispatch(GameAction::PlacePiece { piece });
        }
        let Dispatch::Completed(report) = last else {
            panic!("expected completion, got {last:?}");
        };
        assert_eq!(report.reason, CompletionReason::Win);
        assert_eq!(report.eco_points, report.score / 10);
        assert_eq!(report.passed, Some(report.score >= 20));

        // Late actions and timers change nothing
        assert_eq!(s.dispatch(GameAction::PlacePiece { piece: 0 }), Dispatch::Ignored);
        assert!(s.advance(120_000).is_none());
        assert_eq!(s.observer().completed.len(), 1);
        assert_eq!(s.report(), Some(&report));
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let mut s = session(GameKind::Sorting, None);
        s.start().unwrap();
        let Some(ModuleState::Sorting(game)) = s.module() else {
            panic!("sorting module expected");
        };
        let category = game.items()[0].item.category;
        let wrong = game.bins().iter().position(|b| b.category != category).unwrap();

        for _ in 0..5 {
            assert_eq!(
                s.dispatch(GameAction::AssignItemToBin { item: 0, bin: wrong }),
                Dispatch::Applied { score_delta: 0 }
            );
        }
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_reset_cancels_timers() {
        let mut s = session(GameKind::Snake, Some(60));
        s.start().unwrap();
        assert_eq!(s.pending_timers(), 2);
        s.reset();
        assert_eq!(s.pending_timers(), 0);
        assert_eq!(s.status(), SessionStatus::NotStarted);
        assert!(s.advance(10_000).is_none());
        assert!(s.observer().completed.is_empty());

        s.reset();
        assert_eq!(s.status(), SessionStatus::NotStarted);
        assert_eq!(s.time_remaining(), Some(60));
    }

    #[test]
    fn test_abort() {
        let mut s = session(GameKind::Quiz, Some(60));
        assert!(!s.abort(), "nothing to abort before start");
        s.start().unwrap();
        assert!(s.abort());
        assert!(!s.abort());
        assert_eq!(s.observer().aborted, 1);
        assert!(s.observer().completed.is_empty());
        assert_eq!(s.status(), SessionStatus::NotStarted);
        assert_eq!(s.pending_timers(), 0);
    }

    #[test]
    fn test_config_errors() {
        let config = GameConfig::new("x", "X", GameKind::Quiz).with_time_limit(0);
        assert!(matches!(
            GameSession::new(config, 1),
            Err(ConfigError::NonPositiveTimeLimit(0))
        ));

        let mut catalog = Catalog::builtin();
        catalog.quiz_questions.clear();
        let config = GameConfig::new("x", "X", GameKind::Quiz);
        assert!(matches!(
            GameSession::with_catalog(config, catalog, 1),
            Err(ConfigError::EmptyContent { .. })
        ));
    }
}
