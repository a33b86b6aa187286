//! Site configuration for the Stayview engines.
//!
//! Holds contact details, the properties and their booking links, and the
//! carousel/lightbox tuning. Loading follows a fixed precedence (explicit
//! path, inline JSON, well-known files, defaults), then applies environment
//! overrides and guard rails.

pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, Environment, error::ConfigLoadError};
pub use models::{ConfigSource, ContactConfig, PropertyConfig, SiteConfig};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings, apply_guard_rails};
