use super::PlayerEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Stand-in for the media engine's position timer: emits a
/// `PositionChanged` every interval, advancing by interval * speed.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    interval: Duration,
    speed: f64,
}

impl PlaybackClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            // tokio::time::interval panics on zero
            interval: interval.max(Duration::from_millis(1)),
            speed: 1.0,
        }
    }

    /// Non-positive or non-finite speeds are ignored with a warning
    pub fn with_speed(mut self, speed: f64) -> Self {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
        } else {
            warn!("Ignoring playback speed {}, keeping {}", speed, self.speed);
        }
        self
    }

    /// Seconds of playback covered by one tick
    pub fn step(&self) -> f64 {
        self.interval.as_secs_f64() * self.speed
    }

    /// Tick from `start` until `end` (then send `TrackEnded`), or until the
    /// receiving side hangs up.
    pub fn spawn(
        self,
        start: f64,
        end: Option<f64>,
        events: mpsc::UnboundedSender<PlayerEvent>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            // a NaN bound never compares true, the loop would run forever
            if !start.is_finite() || end.map_or(false, |end| !end.is_finite()) {
                warn!("Playback clock given a non-finite range ({}, {:?}), ending at once", start, end);
                let _ = events.send(PlayerEvent::TrackEnded);
                return;
            }

            let step = self.step();
            let mut ticker = tokio::time::interval(self.interval);
            let mut ticks: u64 = 0;

            loop {
                ticker.tick().await;
                // multiply rather than accumulate so long runs don't drift
                let position = start + step * ticks as f64;

                if let Some(end) = end {
                    if position > end {
                        let _ = events.send(PlayerEvent::TrackEnded);
                        break;
                    }
                }

                if events.send(PlayerEvent::PositionChanged(position)).is_err() {
                    break;
                }
                ticks += 1;
            }

            debug!("Playback clock stopped after {} ticks", ticks);
        })
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step() {
        let clock = PlaybackClock::new(Duration::from_millis(100)).with_speed(2.0);
        assert!((clock.step() - 0.2).abs() < 1e-12);

        // nonsense speeds are ignored
        let clock = PlaybackClock::default().with_speed(-1.0);
        assert!((clock.step() - 0.1).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_ticks_until_end() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = PlaybackClock::new(Duration::from_millis(1))
            .with_speed(100.0) // 0.1s of playback per tick
            .spawn(1.0, Some(1.45), tx);

        let mut positions = Vec::new();
        let mut ended = false;
        while let Some(event) = rx.recv().await {
            match event {
                PlayerEvent::PositionChanged(p) => positions.push(p),
                PlayerEvent::TrackEnded => ended = true,
                other => panic!("unexpected event: {:?}", other),
            }
        }
        handle.await.unwrap();

        assert!(ended);
        assert_eq!(positions.len(), 5);
        assert_eq!(positions[0], 1.0);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_non_finite_range_ends_immediately() {
        for (start, end) in [
            (f64::NAN, Some(3.0)),
            (0.0, Some(f64::NAN)),
            (f64::INFINITY, None),
            (0.0, Some(f64::INFINITY)),
        ] {
            let (tx, mut rx) = mpsc::unbounded_channel();
            let handle = PlaybackClock::new(Duration::from_millis(1)).spawn(start, end, tx);

            let events = tokio::time::timeout(Duration::from_millis(500), async {
                let mut events = Vec::new();
                while let Some(event) = rx.recv().await {
                    events.push(event);
                }
                events
            })
            .await
            .expect("clock should stop on a non-finite range");
            handle.await.unwrap();

            assert_eq!(events.len(), 1, "{:?} {:?}", start, end);
            assert!(matches!(events[0], PlayerEvent::TrackEnded));
        }
    }

    #[tokio::test]
    async fn test_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let handle = PlaybackClock::new(Duration::from_millis(1)).spawn(0.0, None, tx);
        handle.await.unwrap();
    }
}
