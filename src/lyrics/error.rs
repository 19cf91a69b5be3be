use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LyricsError {
    #[error("Lyrics file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read lyrics file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type LyricsResult<T> = Result<T, LyricsError>;
