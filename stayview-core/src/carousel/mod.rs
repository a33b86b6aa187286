//! Hero carousel engine
//!
//! Cycles an immutable slide list with a single auto-advance timer per
//! instance. The structure separates options, per-instance state, input
//! messages, the update logic, and the render model.

pub mod engine;
pub mod messages;
pub mod options;
pub mod state;
pub mod view;

pub use engine::CarouselEngine;
pub use messages::{CarouselMessage, Direction};
pub use options::{CarouselOptions, CtaPolicy};
pub use state::{CarouselPhase, CarouselState, PauseReasons};
pub use view::{CarouselView, SlideFrame};
