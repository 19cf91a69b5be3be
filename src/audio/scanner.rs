use super::{find_companion_lyrics, Track, LYRICS_EXTENSION};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Walks music folders and builds tracks, pairing each audio file with its
/// `.lrc` sibling when one exists.
#[derive(Clone)]
pub struct MusicScanner {
    supported_extensions: Vec<String>,
    lyrics_extension: String,
}

impl MusicScanner {
    pub fn new() -> Self {
        Self {
            supported_extensions: vec![
                "mp3".to_string(),
                "flac".to_string(),
                "ogg".to_string(),
                "oga".to_string(),
                "mp4".to_string(),
                "m4a".to_string(),
                "aac".to_string(),
                "wav".to_string(),
            ],
            lyrics_extension: LYRICS_EXTENSION.to_string(),
        }
    }

    pub fn with_lyrics_extension(mut self, extension: impl Into<String>) -> Self {
        self.lyrics_extension = extension.into();
        self
    }

    pub fn scan_directory<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Track>> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(anyhow::anyhow!("Not a directory: {}", path.display()));
        }

        let mut tracks = Vec::new();

        for entry in WalkDir::new(path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
        {
            let entry_path = entry.path();

            if !entry.file_type().is_file() {
                continue;
            }

            // Skip hidden files (dotfiles)
            if entry_path
                .file_name()
                .and_then(|n| n.to_str())
                .map_or(false, |n| n.starts_with('.'))
            {
                continue;
            }

            if self.is_supported_file(entry_path) {
                tracks.push(self.create_track(entry_path));
            }
        }

        let with_lyrics = tracks.iter().filter(|t| t.has_lyrics()).count();
        info!(
            "Scanned {}: {} tracks, {} with lyrics",
            path.display(),
            tracks.len(),
            with_lyrics
        );

        Ok(tracks)
    }

    pub fn scan_directories(&self, paths: &[PathBuf]) -> Result<Vec<Track>> {
        let mut all_tracks = Vec::new();

        for path in paths {
            if path.exists() {
                let mut tracks = self.scan_directory(path)?;
                all_tracks.append(&mut tracks);
            } else {
                debug!("Music directory does not exist: {}", path.display());
            }
        }

        Ok(all_tracks)
    }

    fn is_supported_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let normalized = ext.to_ascii_lowercase();
                self.supported_extensions.contains(&normalized)
            })
            .unwrap_or(false)
    }

    fn create_track(&self, path: &Path) -> Track {
        let mut track = Track::new(path.to_path_buf());
        track.lyrics_path = find_companion_lyrics(path, &self.lyrics_extension);
        track
    }
}

impl Default for MusicScanner {
    fn default() -> Self {
        Self::new()
    }
}
