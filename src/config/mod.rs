// Configuration management for lyricpipe
// Handles loading/saving settings, with sensible defaults when config is missing

use crate::lyrics::DEFAULT_METADATA_MAX_LEN;
use anyhow::Result;
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lyrics: LyricsConfig,
    pub playback: PlaybackConfig,
    pub library: LibraryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LyricsConfig {
    pub extension: String,
    pub metadata_max_len: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub tick_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub music_directories: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lyrics: LyricsConfig::default(),
            playback: PlaybackConfig::default(),
            library: LibraryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            extension: crate::audio::LYRICS_EXTENSION.to_string(),
            metadata_max_len: DEFAULT_METADATA_MAX_LEN,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100, // same cadence as the media engine's position timer
        }
    }
}

/// The platform audio folder, else `$HOME/Music`; none if there is no home
fn default_music_dir() -> Option<PathBuf> {
    dirs::audio_dir().or_else(|| dirs::home_dir().map(|home| home.join("Music")))
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            music_directories: default_music_dir().into_iter().collect(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("lyricpipe")
                .join("logs"),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path()?)
    }

    /// Load from an explicit path, writing defaults there if it doesn't exist yet
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("lyricpipe");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.lyrics.extension, "lrc");
        assert_eq!(config.lyrics.metadata_max_len, 50);
        assert_eq!(config.playback.tick_interval_ms, 100);
    }

    #[test]
    fn test_default_music_dir_is_not_tilde_literal() {
        for dir in &Config::default().library.music_directories {
            assert!(!dir.starts_with("~"), "{}", dir.display());
        }
        assert_eq!(
            LibraryConfig::default().music_directories,
            default_music_dir().into_iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_load_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_round_trip_and_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.playback.tick_interval_ms = 250;
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);

        // missing sections fall back to defaults
        fs::write(&path, "[lyrics]\nmetadata_max_len = 0\n").unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.lyrics.metadata_max_len, 0);
        assert_eq!(loaded.lyrics.extension, "lrc");
        assert_eq!(loaded.playback.tick_interval_ms, 100);
    }
}
