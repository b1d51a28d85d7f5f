//! Event rendering.
//!
//! Maps parsed events to notification titles and markdown bodies,
//! enriching song ids and difficulty codes through the song catalog.

mod notification;

use std::sync::Arc;

pub use notification::Notification;

use crate::catalog::SongCatalog;
use crate::parser::{LogEvent, ScoreReport};

const PLAYER: &str = "**🧑‍💻 Player:**";
const ROOM: &str = "**🏠 Room Code:**";
const SONG: &str = "**🎶 Song:**";

/// Title used for lines without a dedicated template.
pub const INFO_TITLE: &str = "ℹ️ Linkplay Info";

/// Renders events into notifications.
#[derive(Clone)]
pub struct EventRenderer {
    catalog: Arc<dyn SongCatalog>,
}

impl std::fmt::Debug for EventRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRenderer").finish_non_exhaustive()
    }
}

impl EventRenderer {
    /// Create a renderer using the given catalog for enrichment.
    #[must_use]
    pub fn new(catalog: Arc<dyn SongCatalog>) -> Self {
        Self { catalog }
    }

    /// Render an event.
    ///
    /// Events carrying a song id keep it on the notification so a jacket
    /// can be attached later.
    #[must_use]
    pub fn render(&self, event: &LogEvent) -> Notification {
        let notification = match event {
            LogEvent::RoomCreated { room, player } => {
                Notification::new("🎉 Room Created", player_and_room(player, room))
            }
            LogEvent::PlayerJoined { player, room } => {
                Notification::new("🙋 Player Joined", player_and_room(player, room))
            }
            LogEvent::HostChanged { player, room } => {
                Notification::new("🤝 Host Changed", player_and_room(player, room))
            }
            LogEvent::SongVoted { player, song_id } => Notification::new(
                "🎵 Song Voted",
                format!("{PLAYER} {player}\n{SONG} {}", self.title(song_id)),
            ),
            LogEvent::SongSelected { room, song_id } => Notification::new(
                "👏 Song Selected",
                format!("{SONG} {}\n{ROOM} {room}", self.title(song_id)),
            ),
            LogEvent::SongSelectedRandomly { room, song_id } => Notification::new(
                "👏 Song Selected",
                format!(
                    "🎲 Random song selected!\n{SONG} {}\n{ROOM} {room}",
                    self.title(song_id)
                ),
            ),
            LogEvent::SongStarted { room } => {
                Notification::new("🏁 Game Started", format!("{ROOM} {room}"))
            }
            LogEvent::SongFinished { room, song_id } => {
                let body = match song_id {
                    Some(id) => format!("{SONG} {}\n{ROOM} {room}", self.title(id)),
                    None => format!("{ROOM} {room}"),
                };
                Notification::new("🏁 Game Finished", body)
            }
            LogEvent::PlayerScore(report) => {
                Notification::new("🏆 Player Score", self.score_body(report))
            }
            LogEvent::PlayerLeft { player, room } => {
                Notification::new("🚪 Player Left", player_and_room(player, room))
            }
            LogEvent::RoomClosed { room } => Notification::new(
                "🧹 Room Closed",
                format!("**👀** As nobody remains, the room has been closed.\n{ROOM} {room}"),
            ),
            LogEvent::Unrecognized { line } => Notification::new(INFO_TITLE, line.clone()),
        };

        match event.song_id() {
            Some(song_id) => notification.with_song(song_id),
            None => notification,
        }
    }

    fn title(&self, song_id: &str) -> String {
        self.catalog.song_title(song_id)
    }

    fn score_body(&self, report: &ScoreReport) -> String {
        let difficulty = self.catalog.difficulty_label(&report.difficulty);
        format!(
            "{PLAYER} {player}\n\
             **✨ Score:** {score}\n\
             **🎮 Difficulty:** {difficulty}\n\n\
             **🎯Judgement**\n\
             **Pure:** {perfect} (+{shiny})\n\
             **Near:** {near} (Early: {early}, Late: {late})\n\
             **Lost:** {miss}",
            player = report.player,
            score = report.score,
            perfect = report.perfect,
            shiny = report.shiny_perfect,
            near = report.near,
            early = report.early,
            late = report.late,
            miss = report.miss,
        )
    }
}

fn player_and_room(player: &str, room: &str) -> String {
    format!("{PLAYER} {player}\n{ROOM} {room}")
}
