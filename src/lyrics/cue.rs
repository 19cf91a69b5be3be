use serde::{Deserialize, Serialize};

/// One timed lyric line. Only `is_active` changes after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub time: f64, // seconds
    pub text: String,
    #[serde(default)]
    pub is_active: bool,
}

impl Cue {
    pub fn new(time: f64, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
            is_active: false,
        }
    }

    /// `mm:ss.xx` rendering of the cue time, the way it appears in LRC files
    pub fn timestamp(&self) -> String {
        let centis = (self.time.max(0.0) * 100.0).round() as u64;
        format!("{:02}:{:02}.{:02}", centis / 6000, (centis / 100) % 60, centis % 100)
    }
}

/// Format seconds as `mm:ss` for position/duration displays.
/// Minutes keep counting past 59 instead of rolling into hours.
pub fn format_mm_ss(seconds: f64) -> String {
    let total = if seconds.is_finite() { seconds.max(0.0) as u64 } else { 0 };
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cue_is_inactive() {
        let cue = Cue::new(1.5, "Hello");
        assert_eq!(cue.text, "Hello");
        assert!(!cue.is_active);
    }

    #[test]
    fn test_timestamp() {
        assert_eq!(Cue::new(1.5, "").timestamp(), "00:01.50");
        assert_eq!(Cue::new(83.25, "").timestamp(), "01:23.25");
        assert_eq!(Cue::new(6000.0, "").timestamp(), "100:00.00");
    }

    #[test]
    fn test_format_mm_ss() {
        assert_eq!(format_mm_ss(0.0), "00:00");
        assert_eq!(format_mm_ss(59.9), "00:59");
        assert_eq!(format_mm_ss(185.0), "03:05");
        assert_eq!(format_mm_ss(-3.0), "00:00");
        assert_eq!(format_mm_ss(f64::NAN), "00:00");
    }
}
