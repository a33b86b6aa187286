//! Engine/UI focused snapshot of the types surface.
//! Prefer importing from this module instead of individual tree nodes when
//! wiring pages to the engines.

pub use super::error::{ModelError, Result as ModelResult};
pub use super::ids::{ControlId, HistoryMode, Millis, TimerId, TimerKind};
pub use super::photo::{Photo, PhotoSet, PhotoTag};
pub use super::slide::{Caption, CallToAction, CtaVariant, Slide, SlideMedia};
