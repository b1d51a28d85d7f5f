//! Line classification rules.
//!
//! Rules are tried in declaration order and the first match wins. An
//! earlier, looser pattern shadows any later pattern it also matches, so
//! new rules must be inserted with that in mind.

use regex::{Captures, Regex};

use super::events::{EventKind, LogEvent, ScoreReport};

/// Error type for classifier construction.
#[derive(thiserror::Error, Debug)]
pub enum ClassifierError {
    /// Invalid regex pattern.
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// A single rule mapping a line template to an event kind.
#[derive(Debug, Clone)]
pub struct LineRule {
    kind: EventKind,
    pattern: Regex,
}

impl LineRule {
    /// Create a new rule.
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::InvalidPattern` if the regex is invalid.
    pub fn new(kind: EventKind, pattern: &str) -> Result<Self, ClassifierError> {
        Ok(Self {
            kind,
            pattern: Regex::new(pattern)?,
        })
    }

    /// Extract an event from the line if it matches.
    ///
    /// Returns `None` when the pattern does not match or a required named
    /// group is missing from it.
    #[must_use]
    pub fn extract(&self, line: &str) -> Option<LogEvent> {
        let caps = self.pattern.captures(line)?;
        build_event(self.kind, &caps, line)
    }

    /// Get the event kind.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Get the pattern string (for debugging/display).
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Ordered rule table turning log lines into events.
#[derive(Debug, Clone, Default)]
pub struct LineClassifier {
    rules: Vec<LineRule>,
}

impl LineClassifier {
    /// Create an empty classifier.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a classifier with the Linkplay server templates.
    #[must_use]
    pub fn with_default_rules() -> Self {
        let rules = Self::default_rules()
            .into_iter()
            .filter_map(|result| match result {
                Ok(rule) => Some(rule),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to compile default line rule");
                    None
                }
            })
            .collect();
        Self { rules }
    }

    /// Append a rule after the existing ones.
    pub fn add_rule(&mut self, rule: LineRule) {
        self.rules.push(rule);
    }

    /// Classify a line.
    ///
    /// Returns the event of the first matching rule, or `None` if no rule
    /// matches.
    #[must_use]
    pub fn classify(&self, line: &str) -> Option<LogEvent> {
        self.rules.iter().find_map(|rule| rule.extract(line))
    }

    /// Check if the classifier has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Get the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Get all rules in match order.
    #[must_use]
    pub fn rules(&self) -> &[LineRule] {
        &self.rules
    }

    fn default_rules() -> Vec<Result<LineRule, ClassifierError>> {
        vec![
            LineRule::new(
                EventKind::RoomCreated,
                r"Create room `(?P<room_code>\w+)` by player `(?P<player_name>\w+)`",
            ),
            LineRule::new(
                EventKind::PlayerJoined,
                r"Player `(?P<player_name>\w+)` joins room `(?P<room_code>\w+)`",
            ),
            LineRule::new(
                EventKind::HostChanged,
                r"Player `(?P<player_name>\w+)` becomes the host of room `(?P<room_code>\w+)`",
            ),
            LineRule::new(
                EventKind::SongVoted,
                r"Player `(?P<player_name>\w+)` votes for song `(?P<song_id>\d+)`",
            ),
            LineRule::new(
                EventKind::SongSelected,
                r"Room `(?P<room_code>\w+)` selected song `(?P<song_id>\d+)`",
            ),
            LineRule::new(
                EventKind::SongStarted,
                r"Room `(?P<room_code>\w+)` starts playing song",
            ),
            LineRule::new(
                EventKind::SongSelectedRandomly,
                r"Room `(?P<room_code>\w+)` randomly selected song `(?P<song_id>\d+)`",
            ),
            LineRule::new(
                EventKind::SongFinished,
                r"Room `(?P<room_code>\w+)` finishes song(?: `(?P<song_id>\d+)`)?",
            ),
            LineRule::new(
                EventKind::PlayerScore,
                concat!(
                    r"Player `(?P<player_name>\w+)` - ",
                    r"Score: (?P<score>\d+), Cleartype: (?P<cleartype>\d+), Difficulty: (?P<difficulty>\d+), ",
                    r"Timer: (?P<timer>\d+), Best Score Flag: (?P<best_score_flag>\d+), ",
                    r"Best Player Flag: (?P<best_player_flag>\d+), Shiny Perfect: (?P<shiny_perfect>\d+), ",
                    r"Perfect: (?P<perfect>\d+), Near: (?P<near>\d+), Miss: (?P<miss>\d+), ",
                    r"Early: (?P<early>\d+), Late: (?P<late>\d+), Healthy: (?P<healthy>\d+)",
                ),
            ),
            LineRule::new(
                EventKind::PlayerLeft,
                r"Player `(?P<player_name>\w+)` leaves room `(?P<room_code>\w+)`",
            ),
            LineRule::new(EventKind::RoomClosed, r"Clean room `(?P<room_code>\w+)`"),
        ]
    }
}

fn text(caps: &Captures<'_>, name: &str) -> Option<String> {
    caps.name(name).map(|m| m.as_str().to_string())
}

fn build_event(kind: EventKind, caps: &Captures<'_>, line: &str) -> Option<LogEvent> {
    let event = match kind {
        EventKind::RoomCreated => LogEvent::RoomCreated {
            room: text(caps, "room_code")?,
            player: text(caps, "player_name")?,
        },
        EventKind::PlayerJoined => LogEvent::PlayerJoined {
            player: text(caps, "player_name")?,
            room: text(caps, "room_code")?,
        },
        EventKind::HostChanged => LogEvent::HostChanged {
            player: text(caps, "player_name")?,
            room: text(caps, "room_code")?,
        },
        EventKind::SongVoted => LogEvent::SongVoted {
            player: text(caps, "player_name")?,
            song_id: text(caps, "song_id")?,
        },
        EventKind::SongSelected => LogEvent::SongSelected {
            room: text(caps, "room_code")?,
            song_id: text(caps, "song_id")?,
        },
        EventKind::SongStarted => LogEvent::SongStarted {
            room: text(caps, "room_code")?,
        },
        EventKind::SongSelectedRandomly => LogEvent::SongSelectedRandomly {
            room: text(caps, "room_code")?,
            song_id: text(caps, "song_id")?,
        },
        EventKind::SongFinished => LogEvent::SongFinished {
            room: text(caps, "room_code")?,
            song_id: text(caps, "song_id"),
        },
        EventKind::PlayerScore => LogEvent::PlayerScore(ScoreReport {
            player: text(caps, "player_name")?,
            score: text(caps, "score")?,
            clear_type: text(caps, "cleartype")?,
            difficulty: text(caps, "difficulty")?,
            timer: text(caps, "timer")?,
            best_score_flag: text(caps, "best_score_flag")?,
            best_player_flag: text(caps, "best_player_flag")?,
            shiny_perfect: text(caps, "shiny_perfect")?,
            perfect: text(caps, "perfect")?,
            near: text(caps, "near")?,
            miss: text(caps, "miss")?,
            early: text(caps, "early")?,
            late: text(caps, "late")?,
            healthy: text(caps, "healthy")?,
        }),
        EventKind::PlayerLeft => LogEvent::PlayerLeft {
            player: text(caps, "player_name")?,
            room: text(caps, "room_code")?,
        },
        EventKind::RoomClosed => LogEvent::RoomClosed {
            room: text(caps, "room_code")?,
        },
        EventKind::Unrecognized => LogEvent::Unrecognized {
            line: line.to_string(),
        },
    };
    Some(event)
}
