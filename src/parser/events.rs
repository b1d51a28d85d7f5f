//! Typed events recognized in Linkplay server logs.

use serde::{Deserialize, Serialize};

/// Kind of a recognized log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    RoomCreated,
    PlayerJoined,
    HostChanged,
    SongVoted,
    SongSelected,
    SongStarted,
    SongSelectedRandomly,
    SongFinished,
    PlayerScore,
    PlayerLeft,
    RoomClosed,
    /// Synthesized for lines no rule matched.
    Unrecognized,
}

impl EventKind {
    /// Name used in logs; the same as the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RoomCreated => "room_created",
            Self::PlayerJoined => "player_joined",
            Self::HostChanged => "host_changed",
            Self::SongVoted => "song_voted",
            Self::SongSelected => "song_selected",
            Self::SongStarted => "song_started",
            Self::SongSelectedRandomly => "song_selected_randomly",
            Self::SongFinished => "song_finished",
            Self::PlayerScore => "player_score",
            Self::PlayerLeft => "player_left",
            Self::RoomClosed => "room_closed",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result line reported when a player finishes a song.
///
/// Every field is the captured digit run exactly as logged, so leading
/// zeros and values beyond any integer width survive. Counters are not
/// checked against each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub player: String,
    pub score: String,
    pub clear_type: String,
    /// Difficulty code (`"0"` to `"4"` for known charts).
    pub difficulty: String,
    pub timer: String,
    pub best_score_flag: String,
    pub best_player_flag: String,
    pub shiny_perfect: String,
    pub perfect: String,
    pub near: String,
    pub miss: String,
    pub early: String,
    pub late: String,
    pub healthy: String,
}

/// An event parsed from one log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    RoomCreated {
        room: String,
        player: String,
    },
    PlayerJoined {
        player: String,
        room: String,
    },
    HostChanged {
        player: String,
        room: String,
    },
    SongVoted {
        player: String,
        song_id: String,
    },
    SongSelected {
        room: String,
        song_id: String,
    },
    SongStarted {
        room: String,
    },
    SongSelectedRandomly {
        room: String,
        song_id: String,
    },
    SongFinished {
        room: String,
        /// Present when the server logs the finished song.
        song_id: Option<String>,
    },
    PlayerScore(ScoreReport),
    PlayerLeft {
        player: String,
        room: String,
    },
    RoomClosed {
        room: String,
    },
    /// Raw line that matched no rule.
    Unrecognized {
        line: String,
    },
}

impl LogEvent {
    /// Kind of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::RoomCreated { .. } => EventKind::RoomCreated,
            Self::PlayerJoined { .. } => EventKind::PlayerJoined,
            Self::HostChanged { .. } => EventKind::HostChanged,
            Self::SongVoted { .. } => EventKind::SongVoted,
            Self::SongSelected { .. } => EventKind::SongSelected,
            Self::SongStarted { .. } => EventKind::SongStarted,
            Self::SongSelectedRandomly { .. } => EventKind::SongSelectedRandomly,
            Self::SongFinished { .. } => EventKind::SongFinished,
            Self::PlayerScore(_) => EventKind::PlayerScore,
            Self::PlayerLeft { .. } => EventKind::PlayerLeft,
            Self::RoomClosed { .. } => EventKind::RoomClosed,
            Self::Unrecognized { .. } => EventKind::Unrecognized,
        }
    }

    /// Song id carried by the event, if any.
    #[must_use]
    pub fn song_id(&self) -> Option<&str> {
        match self {
            Self::SongVoted { song_id, .. }
            | Self::SongSelected { song_id, .. }
            | Self::SongSelectedRandomly { song_id, .. } => Some(song_id),
            Self::SongFinished { song_id, .. } => song_id.as_deref(),
            _ => None,
        }
    }

    /// Room code carried by the event, if any.
    #[must_use]
    pub fn room(&self) -> Option<&str> {
        match self {
            Self::RoomCreated { room, .. }
            | Self::PlayerJoined { room, .. }
            | Self::HostChanged { room, .. }
            | Self::SongSelected { room, .. }
            | Self::SongStarted { room }
            | Self::SongSelectedRandomly { room, .. }
            | Self::SongFinished { room, .. }
            | Self::PlayerLeft { room, .. }
            | Self::RoomClosed { room } => Some(room),
            Self::SongVoted { .. } | Self::PlayerScore(_) | Self::Unrecognized { .. } => None,
        }
    }
}
