//! Inputs the carousel engine reacts to.

use serde::{Deserialize, Serialize};
use stayview_model::{Slide, TimerId};

use crate::input::{KeyEvent, TouchPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "message", rename_all = "snake_case")]
pub enum CarouselMessage {
    // Navigation
    Advance { direction: Direction },
    /// Dot indicator; any integer is clamped.
    GoTo { index: i64 },
    Key { event: KeyEvent },

    // Pause triggers
    PointerEntered,
    PointerLeft,
    FocusEntered,
    FocusLeft,
    VisibilityChanged { hidden: bool },
    ReducedMotionChanged { reduce: bool },

    // Touch
    TouchStart { point: TouchPoint },
    TouchMove { point: TouchPoint },
    TouchEnd { point: TouchPoint },
    TouchCancel,

    // Timers and media
    TimerFired { id: TimerId },
    MediaFailed { index: usize },
    MediaLoaded { index: usize },
    SlidesReplaced { slides: Vec<Slide> },

    /// Click on the banner area; `on_control` when it hit a link or button.
    BannerClicked { on_control: bool },
}
