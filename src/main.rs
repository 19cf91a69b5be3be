// lyricpipe - follow along with synced lyrics from the terminal
// Small front end over the library: dump cues, play them against a clock, scan a library

use anyhow::Result;
use clap::{Parser, Subcommand};
use lyricpipe::{
    audio::MusicScanner,
    config::Config,
    lyrics::{format_mm_ss, Cue},
    LyricsSession, LyricsUpdate, PlaybackClock, PlayerEvent, TimedTextParser, Track,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Seconds the clock keeps running past the last cue when no end is given
const TAIL_SECONDS: f64 = 3.0;

#[derive(Parser)]
#[command(name = "lyricpipe")]
#[command(about = "Synced lyrics: parse LRC files and follow the active line during playback")]
struct Args {
    /// Enable developer logging (stderr + debug output)
    #[arg(long, global = true)]
    dev: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the parsed cues of a lyrics file
    Show {
        file: PathBuf,
        /// Emit JSON instead of LRC-style lines
        #[arg(long)]
        json: bool,
    },
    /// Play a track's lyrics against a simulated playback clock
    Follow {
        /// An audio file (its companion lyrics are used) or a lyrics file
        file: PathBuf,
        /// Start position in seconds
        #[arg(long, default_value_t = 0.0, value_parser = parse_seconds)]
        start: f64,
        /// Playback speed multiplier
        #[arg(long, default_value_t = 1.0, value_parser = parse_speed)]
        speed: f64,
        /// Stop after this position in seconds (default: a little past the last line)
        #[arg(long, value_parser = parse_seconds)]
        duration: Option<f64>,
    },
    /// List tracks in a music directory and whether they have lyrics
    Scan {
        /// Directory to scan (default: the configured music directories)
        dir: Option<PathBuf>,
        /// Emit the tracks as JSON
        #[arg(long)]
        json: bool,
    },
}

/// A finite position in seconds
fn parse_seconds(value: &str) -> Result<f64, String> {
    let seconds: f64 = value.parse().map_err(|e| format!("{}", e))?;
    if seconds.is_finite() {
        Ok(seconds)
    } else {
        Err(format!("'{}' is not a finite number of seconds", value))
    }
}

/// A finite speed above zero
fn parse_speed(value: &str) -> Result<f64, String> {
    let speed = parse_seconds(value)?;
    if speed > 0.0 {
        Ok(speed)
    } else {
        Err(format!("speed must be greater than zero, got {}", value))
    }
}

fn init_logging(log_dir: &Path, dev: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    // Daily rotating file appender
    let file_appender = tracing_appender::rolling::daily(log_dir, "lyricpipe.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    // Base filter: info level for general logs, debug for lyricpipe
    let base_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,lyricpipe=debug"));

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false);

    // Dev mode also logs to stderr, in addition to the file
    let stderr_layer = dev.then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(base_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(guard)
}

fn parser_from(config: &Config) -> TimedTextParser {
    TimedTextParser::new().with_metadata_max_len(config.lyrics.metadata_max_len)
}

fn print_cues(cues: &[Cue]) {
    for cue in cues {
        println!("[{}]{}", cue.timestamp(), cue.text);
    }
}

fn show(config: &Config, file: &Path, json: bool) -> Result<()> {
    // surface read errors here, the user asked for this file
    let cues = parser_from(config).try_parse_file(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&cues)?);
    } else {
        print_cues(&cues);
    }

    info!("Showed {} cues from {}", cues.len(), file.display());
    Ok(())
}

fn track_for(config: &Config, file: &Path) -> Track {
    let extension = &config.lyrics.extension;
    let is_lyrics_file = file
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case(extension));

    if is_lyrics_file {
        Track::new(file.to_path_buf()).with_lyrics_path(file.to_path_buf())
    } else {
        Track::new(file.to_path_buf()).with_companion_lyrics(extension)
    }
}

async fn follow(
    config: &Config,
    file: &Path,
    start: f64,
    speed: f64,
    duration: Option<f64>,
) -> Result<()> {
    let track = track_for(config, file);
    if !track.has_lyrics() {
        println!("No lyrics found for {}", file.display());
    }

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();

    let session = LyricsSession::new(parser_from(config));
    let session_task = tokio::spawn(session.run(event_rx, update_tx));

    println!("▶️  {}", track.display_name());
    event_tx
        .send(PlayerEvent::TrackStarted(track))
        .map_err(|_| anyhow::anyhow!("Lyrics session stopped unexpectedly"))?;

    let clock = PlaybackClock::new(Duration::from_millis(config.playback.tick_interval_ms))
        .with_speed(speed);

    // The clock gets the only sender once cues are in; when it stops, the session winds down
    let mut event_tx = Some(event_tx);
    let mut cues: Vec<Cue> = Vec::new();

    while let Some(update) = update_rx.recv().await {
        match update {
            LyricsUpdate::CuesLoaded { cues: loaded, .. } => {
                cues = loaded;
                let end = duration
                    .unwrap_or_else(|| cues.last().map_or(start, |c| c.time) + TAIL_SECONDS);
                debug!("Following {} cues from {:.2}s to {:.2}s", cues.len(), start, end);

                if let Some(tx) = event_tx.take() {
                    clock.clone().spawn(start, Some(end), tx);
                }
            }
            LyricsUpdate::Highlight { index, position } => {
                match index.and_then(|i| cues.get(i)) {
                    Some(cue) => println!("[{}] {}", format_mm_ss(position), cue.text),
                    None => println!("[{}] ...", format_mm_ss(position)),
                }
            }
            LyricsUpdate::Cleared => println!("⏹️  End of track"),
        }
    }

    session_task.await?;
    Ok(())
}

fn scan(config: &Config, dir: Option<PathBuf>, json: bool) -> Result<()> {
    let scanner = MusicScanner::new().with_lyrics_extension(config.lyrics.extension.clone());
    let tracks = match dir {
        Some(dir) => scanner.scan_directory(dir)?,
        None => scanner.scan_directories(&config.library.music_directories)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&tracks)?);
        return Ok(());
    }

    for track in &tracks {
        let marker = if track.has_lyrics() { "lrc" } else { "   " };
        println!("[{}] {}  ({})", marker, track.title, track.file_path.display());
    }

    let with_lyrics = tracks.iter().filter(|t| t.has_lyrics()).count();
    println!("{} tracks, {} with lyrics", tracks.len(), with_lyrics);
    Ok(())
}


#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load config - falls back to defaults if missing
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Keep the guard alive so buffered log lines get flushed on exit
    let _log_guard = init_logging(&config.logging.log_dir, args.dev)?;
    info!("🎵 lyricpipe starting up");

    match args.command {
        Command::Show { file, json } => show(&config, &file, json),
        Command::Follow {
            file,
            start,
            speed,
            duration,
        } => follow(&config, &file, start, speed, duration).await,
        Command::Scan { dir, json } => scan(&config, dir, json),
    }
}
