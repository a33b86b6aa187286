use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

/// Milliseconds on the host's monotonic clock. Engines never read a clock
/// themselves; every timed input carries its own timestamp.
pub type Millis = u64;

/// Handle for a timer requested by an engine.
///
/// Ids come from one process-wide counter and are never reused, so a late
/// `TimerFired` for a cancelled handle can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerId(pub u64);

impl TimerId {
    /// Process-wide unique id, so engines sharing one host never collide.
    pub fn unique() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        TimerId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl Display for TimerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// What a pending timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimerKind {
    /// Repeating carousel auto-advance.
    AutoAdvance,
    /// One-shot re-trigger shortly after the auto-advance interval.
    CatchUp,
    /// Repeating lightbox slideshow step.
    Slideshow,
    /// One-shot reset of "copied" feedback on a copy control.
    CopyFeedback,
}

impl TimerKind {
    /// Whether the host should re-arm the timer after it fires.
    pub const fn is_repeating(self) -> bool {
        matches!(self, TimerKind::AutoAdvance | TimerKind::Slideshow)
    }
}

impl Display for TimerKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TimerKind::AutoAdvance => write!(f, "auto-advance"),
            TimerKind::CatchUp => write!(f, "catch-up"),
            TimerKind::Slideshow => write!(f, "slideshow"),
            TimerKind::CopyFeedback => write!(f, "copy-feedback"),
        }
    }
}

/// Host-side identity of a focusable control (button, link, thumbnail).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlId(pub String);

impl ControlId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ControlId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Display for ControlId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a query-string write lands in the session history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HistoryMode {
    /// New entry; used for discrete open/close actions.
    Push,
    /// Overwrite the current entry; used while navigating inside an open viewer.
    Replace,
}
