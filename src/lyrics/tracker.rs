use super::cue::Cue;

/// Index of the last cue whose time is at or before `position`.
///
/// `cues` must be sorted ascending by time (what the parser returns). When
/// several cues share a timestamp the last of them wins. Returns `None` for
/// an empty list, a position before the first cue, or a NaN position.
/// There is no cursor between calls, so seeking backwards just works.
pub fn active_index(cues: &[Cue], position: f64) -> Option<usize> {
    // number of cues with time <= position; NaN compares false everywhere
    let count = cues.partition_point(|cue| cue.time <= position);
    count.checked_sub(1)
}

pub fn active_cue(cues: &[Cue], position: f64) -> Option<&Cue> {
    active_index(cues, position).and_then(|index| cues.get(index))
}

/// Clear every highlight, then mark `active` if it points inside the list.
/// Calling it again with the same index changes nothing.
pub fn apply_highlight(cues: &mut [Cue], active: Option<usize>) {
    for (index, cue) in cues.iter_mut().enumerate() {
        cue.is_active = Some(index) == active;
    }
}

/// Current highlight as seen through the per-cue flags
pub fn highlighted_index(cues: &[Cue]) -> Option<usize> {
    cues.iter().position(|cue| cue.is_active)
}

/// Stateless position-to-cue mapper for the playback tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct CueTracker;

impl CueTracker {
    pub fn new() -> Self {
        Self
    }

    pub fn active_index(&self, cues: &[Cue], position: f64) -> Option<usize> {
        active_index(cues, position)
    }

    pub fn apply_highlight(&self, cues: &mut [Cue], active: Option<usize>) {
        apply_highlight(cues, active)
    }

    /// One tick: find the active cue for `position` and move the highlight to it
    pub fn update(&self, cues: &mut [Cue], position: f64) -> Option<usize> {
        let active = active_index(cues, position);
        apply_highlight(cues, active);
        active
    }
}
