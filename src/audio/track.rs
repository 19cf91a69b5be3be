use super::{find_companion_lyrics, AudioFormat, LYRICS_EXTENSION};
use crate::lyrics::format_mm_ss;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Uuid,
    pub file_path: PathBuf,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub format: AudioFormat,
    pub duration: Option<f64>, // seconds, known once the media engine opens the file
    pub lyrics_path: Option<PathBuf>,
}

impl Track {
    pub fn new(file_path: PathBuf) -> Self {
        let format = AudioFormat::from_path(&file_path);
        let title = file_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("Unknown")
            .to_string();

        Self {
            id: Uuid::new_v4(),
            file_path,
            title,
            artist: "Unknown Artist".to_string(),
            album: "Unknown Album".to_string(),
            format,
            duration: None,
            lyrics_path: None,
        }
    }

    /// Build a track and attach its `.lrc` sibling if there is one
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::new(path.as_ref().to_path_buf()).with_companion_lyrics(LYRICS_EXTENSION)
    }

    pub fn with_companion_lyrics(mut self, extension: &str) -> Self {
        self.lyrics_path = find_companion_lyrics(&self.file_path, extension);
        self
    }

    pub fn with_lyrics_path(mut self, lyrics_path: PathBuf) -> Self {
        self.lyrics_path = Some(lyrics_path);
        self
    }

    /// Record the duration reported by the media engine
    pub fn learn_duration(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds >= 0.0 {
            self.duration = Some(seconds);
        }
    }

    pub fn has_lyrics(&self) -> bool {
        self.lyrics_path.is_some()
    }

    pub fn display_name(&self) -> String {
        format!("{} - {}", self.title, self.artist)
    }

    pub fn formatted_duration(&self) -> String {
        format_mm_ss(self.duration.unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_new_track_defaults() {
        let track = Track::new(PathBuf::from("/music/Artist - Song.flac"));
        assert_eq!(track.title, "Artist - Song");
        assert_eq!(track.display_name(), "Artist - Song - Unknown Artist");
        assert_eq!(track.format, AudioFormat::Flac);
        assert_eq!(track.formatted_duration(), "00:00");
        assert!(!track.has_lyrics());
    }

    #[test]
    fn test_learn_duration() {
        let mut track = Track::new(PathBuf::from("a.mp3"));
        track.learn_duration(245.7);
        assert_eq!(track.formatted_duration(), "04:05");

        track.learn_duration(f64::NAN);
        assert_eq!(track.duration, Some(245.7));
    }

    #[test]
    fn test_from_path_finds_lyrics() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("tune.ogg");
        fs::write(&audio, b"fake").unwrap();
        fs::write(dir.path().join("tune.lrc"), "[00:00.50]la").unwrap();

        let track = Track::from_path(&audio);
        assert!(track.has_lyrics());
        assert!(track.format.is_supported());
        assert_eq!(track.lyrics_path, Some(dir.path().join("tune.lrc")));
    }

    #[test]
    fn test_track_serializes_for_listing() {
        let track = Track::new(PathBuf::from("b.wav")).with_lyrics_path(PathBuf::from("b.lrc"));
        let value = serde_json::to_value(&track).unwrap();

        assert_eq!(value["title"], "b");
        assert_eq!(value["format"], "Wav");
        assert_eq!(value["lyrics_path"], "b.lrc");
        assert!(value["duration"].is_null());
    }
}
