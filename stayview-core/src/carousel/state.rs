//! CarouselState: per-instance interaction state owned by the engine.

use serde::Serialize;
use stayview_model::{Millis, TimerId};

/// Everything that can hold autoplay back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PauseReasons {
    pub hovered: bool,
    pub focus_within: bool,
    pub page_hidden: bool,
    pub dragging: bool,
    /// Visitor preference; only blocks when the options respect it.
    pub reduced_motion: bool,
}

impl PauseReasons {
    /// Interaction-driven pause (the `isPaused` flag of the carousel).
    pub fn interaction_paused(&self) -> bool {
        self.hovered || self.focus_within || self.page_hidden || self.dragging
    }
}

/// Timers belonging to the current auto-advance cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AutoplayCycle {
    pub primary: TimerId,
    pub catch_up: Option<TimerId>,
    /// When the currently shown slide's interval started.
    pub started_at: Millis,
    /// Whether the primary timer fired since this cycle was armed.
    pub primary_fired: bool,
}

/// Named phases of the carousel state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CarouselPhase {
    /// No slides: nothing renders, nothing is scheduled.
    Inert,
    /// Slides present but autoplay cannot run (single slide, disabled,
    /// reduced motion, or not mounted).
    Idle,
    Autoplaying,
    Paused,
    Dragging,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CarouselState {
    pub active_index: usize,
    pub pause: PauseReasons,
    pub cycle: Option<AutoplayCycle>,
    pub mounted: bool,
}

impl CarouselState {
    pub fn is_paused(&self) -> bool {
        self.pause.interaction_paused()
    }

    /// Timer ids currently owned by this instance.
    pub fn pending_timers(&self) -> Vec<TimerId> {
        match self.cycle {
            Some(cycle) => std::iter::once(cycle.primary)
                .chain(cycle.catch_up)
                .collect(),
            None => Vec::new(),
        }
    }
}

/// `index ± 1` with wraparound. `count` must be non-zero.
pub(crate) fn step(index: usize, count: usize, forward: bool) -> usize {
    if forward {
        (index + 1) % count
    } else {
        (index + count - 1) % count
    }
}

/// Clamp any integer into `[0, count)`. `count` must be non-zero.
pub(crate) fn clamp_index(index: i64, count: usize) -> usize {
    let max = count.saturating_sub(1) as i64;
    index.clamp(0, max) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_wraps_both_ways() {
        assert_eq!(step(2, 3, true), 0);
        assert_eq!(step(0, 3, false), 2);
        assert_eq!(step(0, 1, true), 0);
    }

    #[test]
    fn clamp_covers_extremes() {
        assert_eq!(clamp_index(i64::MIN, 4), 0);
        assert_eq!(clamp_index(-1, 4), 0);
        assert_eq!(clamp_index(3, 4), 3);
        assert_eq!(clamp_index(i64::MAX, 4), 3);
    }

    #[test]
    fn pending_timers_lists_catch_up() {
        let mut state = CarouselState::default();
        assert!(state.pending_timers().is_empty());
        state.cycle = Some(AutoplayCycle {
            primary: TimerId(7),
            catch_up: Some(TimerId(8)),
            started_at: 0,
            primary_fired: false,
        });
        assert_eq!(state.pending_timers(), vec![TimerId(7), TimerId(8)]);
    }
}
