// Lyrics session - keeps the cue list for the current track in step with playback
// The media engine sends PlayerEvents in, the UI gets LyricsUpdates out

pub mod clock;

pub use clock::PlaybackClock;

use crate::audio::Track;
use crate::lyrics::{Cue, CueTracker, TimedTextParser};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub enum PlayerEvent {
    TrackStarted(Track),
    MediaOpened { duration: f64 }, // seconds
    PositionChanged(f64),
    Seeked(f64),
    TrackEnded,
    Stopped,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LyricsUpdate {
    CuesLoaded { track_id: Uuid, cues: Vec<Cue> },
    Highlight { index: Option<usize>, position: f64 },
    Cleared,
}

pub struct LyricsSession {
    parser: TimedTextParser,
    tracker: CueTracker,
    track: Option<Track>,
    cues: Vec<Cue>,
    active: Option<usize>,
}

impl LyricsSession {
    pub fn new(parser: TimedTextParser) -> Self {
        Self {
            parser,
            tracker: CueTracker::new(),
            track: None,
            cues: Vec::new(),
            active: None,
        }
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    /// Replace the cue list with already-read lyrics text
    pub fn load_text(&mut self, source: &str) -> &[Cue] {
        self.cues = self.parser.parse(source);
        self.active = None;
        &self.cues
    }

    pub async fn handle_event(&mut self, event: PlayerEvent) -> Option<LyricsUpdate> {
        match event {
            PlayerEvent::TrackStarted(track) => Some(self.start_track(track).await),
            PlayerEvent::MediaOpened { duration } => {
                if let Some(track) = &mut self.track {
                    track.learn_duration(duration);
                    debug!("'{}' runs {}", track.title, track.formatted_duration());
                }
                None
            }
            PlayerEvent::PositionChanged(position) => {
                let active = self.tracker.active_index(&self.cues, position);
                if active == self.active {
                    return None;
                }
                Some(self.highlight(active, position))
            }
            PlayerEvent::Seeked(position) => {
                let active = self.tracker.active_index(&self.cues, position);
                Some(self.highlight(active, position))
            }
            PlayerEvent::TrackEnded | PlayerEvent::Stopped => {
                self.tracker.apply_highlight(&mut self.cues, None);
                self.active = None;
                Some(LyricsUpdate::Cleared)
            }
        }
    }

    /// Old cues are dropped wholesale; the new track's lyrics load in one batch
    async fn start_track(&mut self, track: Track) -> LyricsUpdate {
        self.cues = match &track.lyrics_path {
            Some(path) => self.parser.parse_file_async(path).await,
            None => Vec::new(),
        };
        self.active = None;

        info!("Loaded {} lyric cues for '{}'", self.cues.len(), track.display_name());

        let track_id = track.id;
        self.track = Some(track);

        LyricsUpdate::CuesLoaded {
            track_id,
            cues: self.cues.clone(),
        }
    }

    fn highlight(&mut self, active: Option<usize>, position: f64) -> LyricsUpdate {
        self.tracker.apply_highlight(&mut self.cues, active);
        self.active = active;
        LyricsUpdate::Highlight {
            index: active,
            position,
        }
    }

    /// Process events until every sender is gone or nobody listens for updates
    pub async fn run(
        mut self,
        mut events: mpsc::UnboundedReceiver<PlayerEvent>,
        updates: mpsc::UnboundedSender<LyricsUpdate>,
    ) -> Self {
        while let Some(event) = events.recv().await {
            if let Some(update) = self.handle_event(event).await {
                if updates.send(update).is_err() {
                    debug!("Update receiver dropped, stopping lyrics session");
                    break;
                }
            }
        }
        self
    }
}

impl Default for LyricsSession {
    fn default() -> Self {
        Self::new(TimedTextParser::new())
    }
}
