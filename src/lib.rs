// lyricpipe - synced lyrics core for BangTunes players
// Parse LRC files, follow the playback position, tell the UI which line is live

pub mod audio;   // tracks and companion .lrc discovery
pub mod config;  // settings and preferences
pub mod lyrics;  // LRC parser + active-line tracker
pub mod session; // event-driven glue between player ticks and the UI

// Export the stuff other modules actually use
pub use audio::{MusicScanner, Track};
pub use config::Config;
pub use lyrics::{active_index, apply_highlight, Cue, CueTracker, LyricsError, TimedTextParser};
pub use session::{LyricsSession, LyricsUpdate, PlaybackClock, PlayerEvent};
