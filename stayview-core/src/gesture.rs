//! Swipe recognition shared by the carousel and the lightbox.
//!
//! A gesture is horizontal once the finger has travelled further sideways
//! than vertically and past a small lock distance; from then on the host's
//! default scrolling is suppressed for that gesture only. On release, a
//! swipe counts if it was either fast (short and quick) or far.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::input::TouchPoint;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Horizontal travel (px) before a move is treated as a swipe.
    pub axis_lock_px: f32,
    /// Upper bound (ms) for a "fast" flick.
    pub fast_window_ms: u64,
    /// Minimum travel (px) for a fast flick.
    pub fast_min_px: f32,
    /// Minimum travel (px) regardless of speed.
    pub far_min_px: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            axis_lock_px: 10.0,
            fast_window_ms: 400,
            fast_min_px: 30.0,
            far_min_px: 70.0,
        }
    }
}

/// Navigation a completed swipe asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeOutcome {
    /// Finger moved left: show the next item.
    Forward,
    /// Finger moved right: show the previous item.
    Backward,
}

#[derive(Debug, Clone, Copy)]
struct Tracking {
    origin: TouchPoint,
    horizontal: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SwipeRecognizer {
    config: SwipeConfig,
    tracking: Option<Tracking>,
}

impl SwipeRecognizer {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            tracking: None,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    pub fn start(&mut self, at: TouchPoint) {
        self.tracking = Some(Tracking {
            origin: at,
            horizontal: false,
        });
    }

    /// Returns `true` when the host should suppress default scrolling for
    /// this move event.
    pub fn moved(&mut self, at: TouchPoint) -> bool {
        let Some(tracking) = self.tracking.as_mut() else {
            return false;
        };
        let dx = (at.x - tracking.origin.x).abs();
        let dy = (at.y - tracking.origin.y).abs();
        if dx > dy && dx > self.config.axis_lock_px {
            if !tracking.horizontal {
                trace!(dx, dy, "swipe locked to horizontal axis");
            }
            tracking.horizontal = true;
        }
        tracking.horizontal
    }

    /// Finish the gesture. Ending without a start is ignored.
    pub fn end(&mut self, at: TouchPoint) -> Option<SwipeOutcome> {
        let tracking = self.tracking.take()?;
        let dx = at.x - tracking.origin.x;
        let elapsed = at.at.saturating_sub(tracking.origin.at);
        let distance = dx.abs();
        let fast =
            elapsed < self.config.fast_window_ms && distance > self.config.fast_min_px;
        let far = distance > self.config.far_min_px;
        trace!(dx, elapsed, fast, far, "swipe released");
        if !(fast || far) {
            return None;
        }
        Some(if dx < 0.0 {
            SwipeOutcome::Forward
        } else {
            SwipeOutcome::Backward
        })
    }

    pub fn cancel(&mut self) {
        self.tracking = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognizer() -> SwipeRecognizer {
        SwipeRecognizer::new(SwipeConfig::default())
    }

    #[test]
    fn far_and_fast_leftward_swipe_goes_forward() {
        let mut swipe = recognizer();
        swipe.start(TouchPoint::new(100.0, 100.0, 1_000));
        assert!(swipe.moved(TouchPoint::new(60.0, 102.0, 1_150)));
        assert_eq!(
            swipe.end(TouchPoint::new(20.0, 104.0, 1_300)),
            Some(SwipeOutcome::Forward)
        );
        assert!(!swipe.is_tracking());
    }

    #[test]
    fn slow_short_drag_is_ignored() {
        let mut swipe = recognizer();
        swipe.start(TouchPoint::new(100.0, 100.0, 0));
        assert_eq!(swipe.end(TouchPoint::new(150.0, 100.0, 900)), None);
    }

    #[test]
    fn quick_flick_right_goes_backward() {
        let mut swipe = recognizer();
        swipe.start(TouchPoint::new(100.0, 100.0, 0));
        assert_eq!(
            swipe.end(TouchPoint::new(135.0, 100.0, 120)),
            Some(SwipeOutcome::Backward)
        );
    }

    #[test]
    fn slow_but_far_swipe_counts() {
        let mut swipe = recognizer();
        swipe.start(TouchPoint::new(300.0, 100.0, 0));
        assert_eq!(
            swipe.end(TouchPoint::new(200.0, 100.0, 2_000)),
            Some(SwipeOutcome::Forward)
        );
    }

    #[test]
    fn vertical_scroll_is_not_suppressed() {
        let mut swipe = recognizer();
        swipe.start(TouchPoint::new(100.0, 100.0, 0));
        assert!(!swipe.moved(TouchPoint::new(108.0, 160.0, 50)));
        assert!(!swipe.moved(TouchPoint::new(105.0, 100.0, 60)));
    }

    #[test]
    fn end_without_start_is_ignored() {
        let mut swipe = recognizer();
        assert!(!swipe.moved(TouchPoint::new(0.0, 0.0, 0)));
        assert_eq!(swipe.end(TouchPoint::new(0.0, 0.0, 10)), None);
    }
}
