//! Session lifecycle, completion and configuration errors

use eco_games::core::{Catalog, Dispatch, GameSession, ModuleState, SessionObserver};
use eco_games::types::{
    CompletionReason, CompletionReport, ConfigError, GameAction, GameConfig, GameKind,
    SessionStatus,
};

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

fn puzzle(limit: u32) -> GameConfig {
    GameConfig::new("puzzle", "Earth Puzzle", GameKind::Puzzle)
        .with_points(100)
        .with_time_limit(limit)
        .with_min_score(80)
}

fn place_all(session: &mut GameSession<Recorder>) -> Vec<Dispatch> {
    (0..6)
        .map(|piece| session.dispatch(GameAction::PlacePiece { piece }))
        .collect()
}

#[test]
fn test_session_lifecycle() {
    let mut session = GameSession::new(puzzle(60), 7).unwrap();
    assert_eq!(session.status(), SessionStatus::NotStarted);
    assert!(session.module().is_none());
    assert_eq!(session.time_remaining(), Some(60));

    // Nothing is accepted before start
    assert_eq!(
        session.dispatch(GameAction::PlacePiece { piece: 0 }),
        Dispatch::Ignored
    );

    assert!(session.start().unwrap());
    assert!(session.is_running());
    assert_eq!(session.module().map(ModuleState::kind), Some(GameKind::Puzzle));

    // A second start does nothing
    assert!(!session.start().unwrap());

    session.advance(3_000);
    assert_eq!(session.time_remaining(), Some(57));
    assert_eq!(session.elapsed_ms(), 3_000);
}

#[test]
fn test_completion_is_reported_once() {
    let mut session = GameSession::new(puzzle(60), 7)
        .unwrap()
        .with_observer(Recorder::default());
    session.start().unwrap();
    session.advance(2_500);

    let results = place_all(&mut session);
    let Some(Dispatch::Completed(report)) = results.last() else {
        panic!("expected completion, got {results:?}");
    };
    assert_eq!(report.reason, CompletionReason::Win);
    assert_eq!(report.time_spent_secs, 2);
    assert_eq!(report.eco_points, report.score / 10);
    assert_eq!(report.passed, Some(report.score >= 80));

    // Late actions and time change nothing
    assert_eq!(
        session.dispatch(GameAction::PlacePiece { piece: 0 }),
        Dispatch::Ignored
    );
    assert_eq!(session.advance(120_000), None);
    assert_eq!(session.status(), SessionStatus::Completed);
    assert_eq!(session.observer().completed.len(), 1);
    assert_eq!(session.pending_timers(), 0);
}

#[test]
fn test_reset_discards_pending_timers() {
    let quiz = GameConfig::new("quiz", "Quiz", GameKind::Quiz).with_time_limit(30);
    let mut session = GameSession::new(quiz, 3)
        .unwrap()
        .with_observer(Recorder::default());
    session.start().unwrap();
    session.dispatch(GameAction::SelectOption { index: 0 });
    assert!(session.pending_timers() >= 2);

    session.reset();
    assert_eq!(session.status(), SessionStatus::NotStarted);
    assert_eq!(session.score(), 0);
    assert_eq!(session.pending_timers(), 0);
    assert_eq!(session.time_remaining(), Some(30));

    // Neither the old countdown nor the reveal fire
    assert_eq!(session.advance(60_000), None);
    assert!(session.observer().completed.is_empty());

    // Reset twice is the same as once
    session.reset();
    assert_eq!(session.status(), SessionStatus::NotStarted);

    // And the session can be played again
    assert!(session.start().unwrap());
    let report = session.advance(30_000).unwrap();
    assert_eq!(report.reason, CompletionReason::TimeExpired);
    assert_eq!(report.time_spent_secs, 30);
}

#[test]
fn test_abort_awards_nothing() {
    let mut session = GameSession::new(puzzle(60), 7)
        .unwrap()
        .with_observer(Recorder::default());
    assert!(!session.abort());

    session.start().unwrap();
    session.dispatch(GameAction::PlacePiece { piece: 0 });
    assert!(session.abort());
    assert_eq!(session.observer().aborted, 1);
    assert!(session.observer().completed.is_empty());
    assert_eq!(session.status(), SessionStatus::NotStarted);
    assert_eq!(session.score(), 0);
}

#[test]
fn test_untimed_session_never_expires() {
    let untimed = GameConfig::new("sort", "Sorting", GameKind::Sorting);
    let mut session = GameSession::new(untimed, 1).unwrap();
    session.start().unwrap();
    assert_eq!(session.advance(3_600_000), None);
    assert!(session.is_running());
    assert_eq!(session.time_remaining(), None);
}

#[test]
fn test_config_errors() {
    let err = GameConfig::from_json(r#"{"id":"x","title":"X","kind":"solitaire"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownKind(ref kind) if kind == "solitaire"));

    let err =
        GameConfig::from_json(r#"{"id":"x","title":"X","kind":"quiz","timeLimit":0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::NonPositiveTimeLimit(0)));

    let mut catalog = Catalog::builtin();
    catalog.quiz_questions.clear();
    let quiz = GameConfig::new("q", "Quiz", GameKind::Quiz);
    let err = GameSession::with_catalog(quiz.clone(), catalog.clone(), 1).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::EmptyContent {
            kind: GameKind::Quiz,
            ..
        }
    ));

    // Other kinds don't care about the missing section
    let sorting = GameConfig::new("s", "Sorting", GameKind::Sorting);
    assert!(GameSession::with_catalog(sorting, catalog, 1).is_ok());
}

#[test]
fn test_host_catalog_sections_replace_builtin() {
    let catalog = Catalog::from_json(
        r#"{"words":[{"word":"leaf","clue":"Falls in autumn","emoji":"L"}]}"#,
    )
    .unwrap();
    // Missing sections keep the built-in content
    assert_eq!(catalog.quiz_questions, Catalog::builtin().quiz_questions);

    let word = GameConfig::new("w", "Word", GameKind::WordGuess);
    let mut session = GameSession::with_catalog(word, catalog, 5).unwrap();
    session.start().unwrap();
    match session.module() {
        Some(ModuleState::WordGuess(game)) => assert_eq!(game.word(), "LEAF"),
        other => panic!("expected word game, got {other:?}"),
    }
}

#[test]
fn test_same_seed_same_content() {
    let snapshot = |seed| {
        let config = GameConfig::new("m", "Memory", GameKind::MemoryMatch);
        let mut session = GameSession::new(config, seed).unwrap();
        session.start().unwrap();
        serde_json::to_string(&session.snapshot()).unwrap()
    };
    assert_eq!(snapshot(99), snapshot(99));
}
