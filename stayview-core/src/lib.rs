//! Stayview presentation engines.
//!
//! Two headless state machines drive the interactive parts of the guesthouse
//! sites:
//!
//! * [`carousel::CarouselEngine`] cycles hero slides on a timer, pausing on
//!   hover, focus, hidden tabs and reduced-motion preferences, and accepts
//!   keyboard, button, dot and swipe navigation.
//! * [`lightbox::LightboxEngine`] shows one enlarged gallery photo, mirrors
//!   its open index into the `lightbox=` query parameter, traps focus while
//!   open and restores it on close.
//!
//! Engines never touch the outside world. They return [`effects::Effects`]
//! which [`runtime::Mounted`] applies to a [`stayview_contracts::Host`], and
//! which it tears down again when dropped.

pub mod capabilities;
pub mod carousel;
pub mod effects;
pub mod error;
pub mod focus;
pub mod gallery;
pub mod gesture;
pub mod input;
pub mod lightbox;
pub mod links;
pub mod projection;
pub mod runtime;
pub mod serde_helpers;

pub use carousel::{CarouselEngine, CarouselMessage, CarouselOptions};
pub use effects::{Effect, Effects};
pub use error::{LinkError, Result};
pub use gallery::GalleryFilter;
pub use lightbox::{LightboxEngine, LightboxMessage, LightboxOptions};
pub use runtime::{Engine, MountContext, Mounted};
