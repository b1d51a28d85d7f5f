//! Parser module tests.

mod classifier_test;

/// Verify all public parser types are exported from the library.
#[test]
fn test_all_parser_types_exported() {
    use linkplay_notifier::parser::{
        ClassifierError, EventKind, LineClassifier, LineRule, LogEvent, ScoreReport,
    };

    let _ = LineClassifier::new();
    let _: fn(&str) -> Result<LineRule, ClassifierError> =
        |pattern| LineRule::new(EventKind::RoomClosed, pattern);
    let _: fn(ScoreReport) -> LogEvent = LogEvent::PlayerScore;
}
