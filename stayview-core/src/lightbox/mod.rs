//! Gallery lightbox engine
//!
//! Shows one enlarged photo from a [`stayview_model::PhotoSet`], keeps the
//! open index mirrored in the query string, traps keyboard focus while open
//! and hands focus back to the opening control on close.

pub mod engine;
pub mod messages;
pub mod options;
pub mod state;
pub mod view;

pub use engine::LightboxEngine;
pub use messages::LightboxMessage;
pub use options::LightboxOptions;
pub use state::LightboxState;
pub use view::{LightboxView, Thumbnail};
