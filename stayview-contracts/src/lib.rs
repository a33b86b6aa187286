//! Trait surfaces that describe what an engine needs from its host page.
//!
//! Engines are pure state machines. Everything that touches the outside
//! world (timers, the session history, keyboard focus, image preloading,
//! global listeners, share/clipboard) is expressed through these traits so a
//! browser binding, a native shell, or a test double can sit underneath.

pub mod error;
pub mod host;
pub mod recording;

pub use error::HostError;
pub use host::{
    FocusHost, HistoryHost, Host, InputHost, Listener, ListenerHost,
    NavigationHost, Preloader, ShareHost, TimerHost,
};
pub use recording::{HostCall, RecordingHost};

/// Frequently used trait combinators for engine runtimes.
pub mod prelude {
    pub use super::host::{
        FocusHost, HistoryHost, Host, InputHost, ListenerHost,
        NavigationHost, Preloader, ShareHost, TimerHost,
    };
}
