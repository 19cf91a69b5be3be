// Synced lyrics - LRC parsing and the "which line is playing" lookup
// Parser and tracker are plain synchronous code; the session module feeds them ticks

pub mod cue;     // the timed line entity
pub mod error;   // file loading errors
pub mod parser;  // LRC text -> sorted cues
pub mod tracker; // position -> active cue + highlight flags

pub use cue::{format_mm_ss, Cue};
pub use error::{LyricsError, LyricsResult};
pub use parser::{parse, TimedTextParser, DEFAULT_METADATA_MAX_LEN};
pub use tracker::{active_cue, active_index, apply_highlight, highlighted_index, CueTracker};
