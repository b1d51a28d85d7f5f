//! Tests for classifying each server log template.

use linkplay_notifier::parser::{EventKind, LineClassifier, LogEvent, ScoreReport};

const SCORE_LINE: &str = "Player `Bob` - Score: 900000, Cleartype: 2, Difficulty: 2, Timer: 120, Best Score Flag: 1, Best Player Flag: 0, Shiny Perfect: 50, Perfect: 900, Near: 10, Miss: 2, Early: 5, Late: 5, Healthy: 100";

fn classify(line: &str) -> Option<LogEvent> {
    LineClassifier::with_default_rules().classify(line)
}

#[test]
fn room_created() {
    assert_eq!(
        classify("Create room `ABCD` by player `Alice`"),
        Some(LogEvent::RoomCreated {
            room: "ABCD".to_string(),
            player: "Alice".to_string(),
        })
    );
}

#[test]
fn player_joined() {
    assert_eq!(
        classify("Player `Alice` joins room `ABCD`"),
        Some(LogEvent::PlayerJoined {
            player: "Alice".to_string(),
            room: "ABCD".to_string(),
        })
    );
}

#[test]
fn host_changed() {
    assert_eq!(
        classify("Player `Alice` becomes the host of room `ABCD`"),
        Some(LogEvent::HostChanged {
            player: "Alice".to_string(),
            room: "ABCD".to_string(),
        })
    );
}

#[test]
fn song_voted() {
    assert_eq!(
        classify("Player `Alice` votes for song `42`"),
        Some(LogEvent::SongVoted {
            player: "Alice".to_string(),
            song_id: "42".to_string(),
        })
    );
}

#[test]
fn song_selected() {
    assert_eq!(
        classify("Room `ABCD` selected song `42`"),
        Some(LogEvent::SongSelected {
            room: "ABCD".to_string(),
            song_id: "42".to_string(),
        })
    );
}

#[test]
fn song_selected_randomly() {
    assert_eq!(
        classify("Room `ABCD` randomly selected song `42`"),
        Some(LogEvent::SongSelectedRandomly {
            room: "ABCD".to_string(),
            song_id: "42".to_string(),
        })
    );
}

#[test]
fn song_started() {
    assert_eq!(
        classify("Room `ABCD` starts playing song"),
        Some(LogEvent::SongStarted {
            room: "ABCD".to_string(),
        })
    );
}

#[test]
fn song_finished() {
    assert_eq!(
        classify("Room `ABCD` finishes song"),
        Some(LogEvent::SongFinished {
            room: "ABCD".to_string(),
            song_id: None,
        })
    );
}

#[test]
fn player_score() {
    assert_eq!(
        classify(SCORE_LINE),
        Some(LogEvent::PlayerScore(ScoreReport {
            player: "Bob".to_string(),
            score: "900000".to_string(),
            clear_type: "2".to_string(),
            difficulty: "2".to_string(),
            timer: "120".to_string(),
            best_score_flag: "1".to_string(),
            best_player_flag: "0".to_string(),
            shiny_perfect: "50".to_string(),
            perfect: "900".to_string(),
            near: "10".to_string(),
            miss: "2".to_string(),
            early: "5".to_string(),
            late: "5".to_string(),
            healthy: "100".to_string(),
        }))
    );
}

#[test]
fn oversized_score_still_produces_event() {
    let line = SCORE_LINE.replace("900000", "123456789012345678901234");
    let Some(LogEvent::PlayerScore(report)) = classify(&line) else {
        panic!("score line not recognized");
    };
    assert_eq!(report.score, "123456789012345678901234");
}

#[test]
fn player_left() {
    assert_eq!(
        classify("Player `Alice` leaves room `ABCD`"),
        Some(LogEvent::PlayerLeft {
            player: "Alice".to_string(),
            room: "ABCD".to_string(),
        })
    );
}

#[test]
fn room_closed() {
    assert_eq!(
        classify("Clean room `ABCD`"),
        Some(LogEvent::RoomClosed {
            room: "ABCD".to_string(),
        })
    );
}

#[test]
fn matches_inside_prefixed_server_line() {
    let line = "[2026-10-18 12:00:00] INFO - Create room `ABCD` by player `Alice`";
    let event = classify(line).unwrap();
    assert_eq!(event.kind(), EventKind::RoomCreated);
}

#[test]
fn unicode_word_characters_accepted() {
    let event = classify("Player `アリス` joins room `ABCD`").unwrap();
    assert_eq!(
        event,
        LogEvent::PlayerJoined {
            player: "アリス".to_string(),
            room: "ABCD".to_string(),
        }
    );
}

#[test]
fn non_numeric_song_id_rejected() {
    assert!(classify("Player `Alice` votes for song `abc`").is_none());
    assert!(classify("Room `ABCD` selected song `abc`").is_none());
}

#[test]
fn unrelated_lines_produce_no_event() {
    for line in [
        "",
        "Linkplay server started",
        "Create room ABCD by player Alice",
        "Player `Alice` - Score: 1",
        "Clean room ``",
    ] {
        assert!(classify(line).is_none(), "unexpected event for {line:?}");
    }
}

#[test]
fn classification_is_idempotent() {
    let classifier = LineClassifier::with_default_rules();
    for line in [
        "Create room `ABCD` by player `Alice`",
        SCORE_LINE,
        "Room `ABCD` finishes song `7`",
        "nothing to see",
    ] {
        assert_eq!(classifier.classify(line), classifier.classify(line));
    }
}
