use super::cue::Cue;
use super::error::{LyricsError, LyricsResult};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, trace, warn};

/// Lines whose stripped text carries a colon and is shorter than this are
/// header tags (`ar:`, `ti:`, `by:` ...), not lyrics.
pub const DEFAULT_METADATA_MAX_LEN: usize = 50;

// [mm:ss.xx] or [mm:ss.xxx] - digit counts are anchored
fn tag_regex() -> Option<&'static Regex> {
    static REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    REGEX
        .get_or_init(|| Regex::new(r"\[([0-9]{2}):([0-9]{2})\.([0-9]{2,3})\]").ok())
        .as_ref()
}

/// Turns LRC text into a time-ordered cue list.
///
/// Parsing never fails: lines without a valid time tag are skipped and
/// whatever cues were found are returned, possibly none.
#[derive(Debug, Clone)]
pub struct TimedTextParser {
    metadata_max_len: usize,
}

impl TimedTextParser {
    pub fn new() -> Self {
        Self {
            metadata_max_len: DEFAULT_METADATA_MAX_LEN,
        }
    }

    /// Override the metadata heuristic threshold (0 disables it)
    pub fn with_metadata_max_len(mut self, max_len: usize) -> Self {
        self.metadata_max_len = max_len;
        self
    }

    pub fn parse(&self, source: &str) -> Vec<Cue> {
        let Some(regex) = tag_regex() else {
            warn!("LRC time tag pattern failed to compile, no lyrics parsed");
            return Vec::new();
        };

        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let mut cues = Vec::new();

        for line in source.split(['\r', '\n']) {
            if line.trim().is_empty() {
                continue;
            }
            cues.extend(self.parse_line(regex, line));
        }

        // sort_by is stable - equal timestamps keep file order
        cues.sort_by(|a, b| a.time.total_cmp(&b.time));
        cues
    }

    /// One line can carry several tags; each one yields a cue with the same text
    fn parse_line(&self, regex: &Regex, line: &str) -> Vec<Cue> {
        let times: Vec<f64> = regex
            .captures_iter(line)
            .filter_map(|caps| {
                let minutes: u64 = caps.get(1)?.as_str().parse().ok()?;
                let seconds: u64 = caps.get(2)?.as_str().parse().ok()?;
                let fraction = caps.get(3)?.as_str();
                let mut millis: u64 = fraction.parse().ok()?;
                // two digits are hundredths: "50" means 500ms
                if fraction.len() == 2 {
                    millis *= 10;
                }
                Some((minutes * 60 + seconds) as f64 + millis as f64 / 1000.0)
            })
            .collect();

        if times.is_empty() {
            trace!("Skipping line without time tag: {:?}", line);
            return Vec::new();
        }

        let text = regex.replace_all(line, "");
        let text = text.trim();

        if self.is_metadata(text) {
            trace!("Skipping metadata line: {:?}", text);
            return Vec::new();
        }

        times.into_iter().map(|time| Cue::new(time, text)).collect()
    }

    /// Short colon-bearing text is treated as a header tag. A real lyric
    /// like "Time: now" gets dropped too; that is a known limitation.
    fn is_metadata(&self, text: &str) -> bool {
        // length in UTF-16 units, same as the player UIs that wrote these files
        text.contains(':') && text.encode_utf16().count() < self.metadata_max_len
    }

    /// Read and parse a lyrics file, surfacing I/O problems
    pub fn try_parse_file<P: AsRef<Path>>(&self, path: P) -> LyricsResult<Vec<Cue>> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LyricsError::NotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path).map_err(|source| LyricsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(self.parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Read and parse a lyrics file. A missing or unreadable file gives an
    /// empty list so playback is never blocked by a lyrics problem.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Vec<Cue> {
        let path = path.as_ref();
        match self.try_parse_file(path) {
            Ok(cues) => {
                debug!("Parsed {} cues from {}", cues.len(), path.display());
                cues
            }
            Err(e) => {
                Self::log_load_error(&e);
                Vec::new()
            }
        }
    }

    pub async fn parse_file_async<P: AsRef<Path>>(&self, path: P) -> Vec<Cue> {
        let path = path.as_ref();
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let cues = self.parse(&String::from_utf8_lossy(&bytes));
                debug!("Parsed {} cues from {}", cues.len(), path.display());
                cues
            }
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Self::log_load_error(&LyricsError::NotFound(path.to_path_buf()));
                Vec::new()
            }
            Err(source) => {
                Self::log_load_error(&LyricsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
                Vec::new()
            }
        }
    }

    fn log_load_error(error: &LyricsError) {
        match error {
            LyricsError::NotFound(_) => debug!("{}", error),
            LyricsError::Io { .. } => warn!("{}", error),
        }
    }
}

impl Default for TimedTextParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse with default settings
pub fn parse(source: &str) -> Vec<Cue> {
    TimedTextParser::new().parse(source)
}
