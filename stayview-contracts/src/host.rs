use std::time::Duration;

use stayview_model::{ControlId, HistoryMode, TimerId, TimerKind};

use crate::error::Result;

/// Global (document/window level) listeners an engine subscribes to while
/// mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Listener {
    Keydown,
    VisibilityChange,
    ReducedMotionChange,
}

/// Timer scheduling. Repeating kinds re-arm until cancelled.
pub trait TimerHost {
    fn schedule(&mut self, id: TimerId, kind: TimerKind, after: Duration);

    /// Cancelling an unknown or already-fired one-shot id is a no-op.
    fn cancel(&mut self, id: TimerId);
}

/// The page's addressable location, reduced to its query string.
pub trait HistoryHost {
    /// Current query without the leading `?`.
    fn current_query(&self) -> String;

    /// Non-reloading history update.
    fn write_query(&mut self, query: &str, mode: HistoryMode);
}

/// Document-level keyboard focus.
pub trait FocusHost {
    fn focus(&mut self, control: &ControlId);

    fn focused(&self) -> Option<ControlId>;
}

/// Best-effort cache warming.
pub trait Preloader {
    fn preload(&mut self, url: &str);
}

/// Per-event default handling (scroll during a swipe, native tab order).
pub trait InputHost {
    fn prevent_default(&mut self);
}

/// Global listener registration.
pub trait ListenerHost {
    fn listen(&mut self, listener: Listener);

    fn unlisten(&mut self, listener: Listener);
}

/// Full-page or new-context navigation for banner clicks and outbound links.
pub trait NavigationHost {
    fn open(&mut self, url: &str, new_context: bool);
}

/// Native share sheet and clipboard. Implementations that lack a capability
/// should return [`crate::HostError::Unavailable`].
pub trait ShareHost {
    fn share(&mut self, title: &str, url: &str) -> Result<()>;

    fn copy_text(&mut self, text: &str) -> Result<()>;
}

// Forwarding impls so a binding can borrow a host it does not own.

impl<T: TimerHost + ?Sized> TimerHost for &mut T {
    fn schedule(&mut self, id: TimerId, kind: TimerKind, after: Duration) {
        (**self).schedule(id, kind, after);
    }

    fn cancel(&mut self, id: TimerId) {
        (**self).cancel(id);
    }
}

impl<T: HistoryHost + ?Sized> HistoryHost for &mut T {
    fn current_query(&self) -> String {
        (**self).current_query()
    }

    fn write_query(&mut self, query: &str, mode: HistoryMode) {
        (**self).write_query(query, mode);
    }
}

impl<T: FocusHost + ?Sized> FocusHost for &mut T {
    fn focus(&mut self, control: &ControlId) {
        (**self).focus(control);
    }

    fn focused(&self) -> Option<ControlId> {
        (**self).focused()
    }
}

impl<T: Preloader + ?Sized> Preloader for &mut T {
    fn preload(&mut self, url: &str) {
        (**self).preload(url);
    }
}

impl<T: InputHost + ?Sized> InputHost for &mut T {
    fn prevent_default(&mut self) {
        (**self).prevent_default();
    }
}

impl<T: ListenerHost + ?Sized> ListenerHost for &mut T {
    fn listen(&mut self, listener: Listener) {
        (**self).listen(listener);
    }

    fn unlisten(&mut self, listener: Listener) {
        (**self).unlisten(listener);
    }
}

impl<T: NavigationHost + ?Sized> NavigationHost for &mut T {
    fn open(&mut self, url: &str, new_context: bool) {
        (**self).open(url, new_context);
    }
}

impl<T: ShareHost + ?Sized> ShareHost for &mut T {
    fn share(&mut self, title: &str, url: &str) -> Result<()> {
        (**self).share(title, url)
    }

    fn copy_text(&mut self, text: &str) -> Result<()> {
        (**self).copy_text(text)
    }
}

/// Everything an engine runtime needs.
pub trait Host:
    TimerHost
    + HistoryHost
    + FocusHost
    + Preloader
    + InputHost
    + ListenerHost
    + NavigationHost
{
}

impl<T> Host for T where
    T: TimerHost
        + HistoryHost
        + FocusHost
        + Preloader
        + InputHost
        + ListenerHost
        + NavigationHost
{
}
