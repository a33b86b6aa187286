//! Optional browser capabilities: the native share sheet and the clipboard.
//!
//! Availability is decided by the host and injected; the engines never probe
//! for it. A failed or dismissed share/copy is not an error for the visitor,
//! so host failures are logged and otherwise ignored.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use stayview_contracts::ShareHost;
use stayview_model::{TimerId, TimerKind};
use tracing::debug;

use crate::effects::{Effect, Effects};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub share: bool,
    pub clipboard: bool,
}

impl Capabilities {
    pub const NONE: Self = Self {
        share: false,
        clipboard: false,
    };

    pub const ALL: Self = Self {
        share: true,
        clipboard: true,
    };
}

/// Which share controls to render. A control for a missing capability is
/// never shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShareAffordance {
    pub show_share: bool,
    pub show_copy: bool,
}

impl ShareAffordance {
    pub fn for_capabilities(caps: Capabilities) -> Self {
        Self {
            show_share: caps.share,
            show_copy: caps.clipboard,
        }
    }

    pub fn is_hidden(&self) -> bool {
        !self.show_share && !self.show_copy
    }
}

/// Open the native share sheet. Returns whether it went through.
pub fn share<H: ShareHost + ?Sized>(
    caps: Capabilities,
    host: &mut H,
    title: &str,
    url: &str,
) -> bool {
    if !caps.share {
        return false;
    }
    match host.share(title, url) {
        Ok(()) => true,
        Err(err) => {
            debug!(%err, "share not completed");
            false
        }
    }
}

/// "Copied" indicator for a copy-to-clipboard button.
#[derive(Debug, Clone)]
pub struct CopyFeedback {
    reset_after: Duration,
    reset: Option<TimerId>,
}

impl Default for CopyFeedback {
    fn default() -> Self {
        Self::new(Duration::from_millis(1_400))
    }
}

impl CopyFeedback {
    pub fn new(reset_after: Duration) -> Self {
        Self {
            reset_after,
            reset: None,
        }
    }

    pub fn is_copied(&self) -> bool {
        self.reset.is_some()
    }

    /// Copy `text` and show the indicator until the reset timer fires.
    /// Copying again restarts the timer.
    pub fn copy<H: ShareHost + ?Sized>(
        &mut self,
        caps: Capabilities,
        host: &mut H,
        text: &str,
    ) -> Effects {
        if !caps.clipboard {
            return Effects::none();
        }
        if let Err(err) = host.copy_text(text) {
            debug!(%err, "clipboard write failed");
            return Effects::none();
        }
        let mut effects = self.clear();
        let id = TimerId::unique();
        self.reset = Some(id);
        effects.push(Effect::ScheduleTimer {
            id,
            kind: TimerKind::CopyFeedback,
            after: self.reset_after,
        });
        effects
    }

    /// Returns `true` when `id` was this indicator's reset timer.
    pub fn timer_fired(&mut self, id: TimerId) -> bool {
        if self.reset == Some(id) {
            self.reset = None;
            true
        } else {
            false
        }
    }

    /// Drop the indicator and its pending timer.
    pub fn clear(&mut self) -> Effects {
        match self.reset.take() {
            Some(id) => Effect::CancelTimer { id }.into(),
            None => Effects::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use stayview_contracts::{HostCall, RecordingHost};

    use super::*;

    #[test]
    fn missing_capabilities_hide_controls() {
        assert!(ShareAffordance::for_capabilities(Capabilities::NONE).is_hidden());
        let only_copy = ShareAffordance::for_capabilities(Capabilities {
            share: false,
            clipboard: true,
        });
        assert!(!only_copy.show_share && only_copy.show_copy);
    }

    #[test]
    fn share_failure_is_swallowed() {
        let mut host = RecordingHost::new();
        // capability claimed but the host refuses
        assert!(!share(Capabilities::ALL, &mut host, "Tour Inn", "https://example.test"));
        host.share_available = true;
        assert!(share(Capabilities::ALL, &mut host, "Tour Inn", "https://example.test"));
        assert!(!share(Capabilities::NONE, &mut host, "Tour Inn", "https://example.test"));
    }

    #[test]
    fn copy_shows_feedback_until_reset() {
        let mut host = RecordingHost::new();
        host.clipboard_available = true;
        let mut feedback = CopyFeedback::default();

        let effects = feedback.copy(Capabilities::ALL, &mut host, "Majeedhee Magu, Malé");
        let (id, kind) = effects.scheduled().next().unwrap();
        assert_eq!(kind, TimerKind::CopyFeedback);
        assert!(feedback.is_copied());
        assert!(host.calls.contains(&HostCall::CopyText {
            text: "Majeedhee Magu, Malé".into()
        }));

        let again = feedback.copy(Capabilities::ALL, &mut host, "again");
        assert!(again.cancelled().any(|c| c == id));
        assert!(!feedback.timer_fired(id));

        let (second, _) = again.scheduled().next().unwrap();
        assert!(feedback.timer_fired(second));
        assert!(!feedback.is_copied());
    }

    #[test]
    fn copy_without_clipboard_does_nothing() {
        let mut host = RecordingHost::new();
        let mut feedback = CopyFeedback::default();
        assert!(feedback.copy(Capabilities::ALL, &mut host, "x").is_empty());
        assert!(feedback.copy(Capabilities::NONE, &mut host, "x").is_empty());
        assert!(!feedback.is_copied());
    }
}
