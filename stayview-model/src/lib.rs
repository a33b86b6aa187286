//! Core data model definitions shared across Stayview crates.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod photo;
pub mod prelude;
pub mod slide;
pub mod sort;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use ids::{ControlId, HistoryMode, Millis, TimerId, TimerKind};
pub use photo::{Photo, PhotoSet, PhotoTag};
pub use slide::{Caption, CallToAction, CtaVariant, Slide, SlideMedia};
pub use sort::natural_cmp;
