pub mod scanner;
pub mod track;

pub use scanner::MusicScanner;
pub use track::Track;

use std::path::{Path, PathBuf};

/// Extension of the companion lyrics file that sits next to an audio file
pub const LYRICS_EXTENSION: &str = "lrc";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AudioFormat {
    Mp3,
    Flac,
    Ogg,
    Mp4,
    Wav,
    Unknown,
}

impl AudioFormat {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "mp3" => AudioFormat::Mp3,
            "flac" => AudioFormat::Flac,
            "ogg" | "oga" => AudioFormat::Ogg,
            "mp4" | "m4a" | "aac" => AudioFormat::Mp4,
            "wav" => AudioFormat::Wav,
            _ => AudioFormat::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(AudioFormat::from_extension)
            .unwrap_or(AudioFormat::Unknown)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, AudioFormat::Unknown)
    }
}

/// `song.mp3` -> `song.lrc`, whether or not it exists
pub fn companion_lyrics_path(audio_path: &Path, extension: &str) -> PathBuf {
    audio_path.with_extension(extension)
}

/// The companion lyrics path, only if that file is actually there
pub fn find_companion_lyrics(audio_path: &Path, extension: &str) -> Option<PathBuf> {
    let candidate = companion_lyrics_path(audio_path, extension);
    if candidate != audio_path && candidate.is_file() {
        Some(candidate)
    } else {
        None
    }
}
