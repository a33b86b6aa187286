//! In-memory host that records every call. Used by tests and by the
//! `stayviewctl replay` command to show what a real page would have done.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use stayview_model::{ControlId, HistoryMode, TimerId, TimerKind};
use tracing::trace;

use crate::error::{HostError, Result};
use crate::host::{
    FocusHost, HistoryHost, InputHost, Listener, ListenerHost, NavigationHost,
    Preloader, ShareHost, TimerHost,
};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "call", rename_all = "snake_case"))]
pub enum HostCall {
    Schedule {
        id: TimerId,
        kind: TimerKind,
        after_ms: u64,
    },
    Cancel {
        id: TimerId,
    },
    WriteQuery {
        query: String,
        mode: HistoryMode,
    },
    Focus {
        control: ControlId,
    },
    Preload {
        url: String,
    },
    PreventDefault,
    Listen {
        listener: Listener,
    },
    Unlisten {
        listener: Listener,
    },
    Open {
        url: String,
        new_context: bool,
    },
    Share {
        title: String,
        url: String,
    },
    CopyText {
        text: String,
    },
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
    pub pending: BTreeMap<TimerId, TimerKind>,
    pub query: String,
    pub focused: Option<ControlId>,
    pub listeners: HashSet<Listener>,
    pub share_available: bool,
    pub clipboard_available: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn pending_of(&self, kind: TimerKind) -> Vec<TimerId> {
        self.pending
            .iter()
            .filter(|(_, k)| **k == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn history_writes(&self) -> Vec<(&str, HistoryMode)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::WriteQuery { query, mode } => {
                    Some((query.as_str(), *mode))
                }
                _ => None,
            })
            .collect()
    }

    pub fn preloads(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Preload { url } => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Simulate a one-shot timer firing: the host forgets it.
    pub fn fire(&mut self, id: TimerId) -> Option<TimerKind> {
        let kind = self.pending.get(&id).copied()?;
        if !kind.is_repeating() {
            self.pending.remove(&id);
        }
        Some(kind)
    }

    fn record(&mut self, call: HostCall) {
        trace!(?call, "host call");
        self.calls.push(call);
    }
}

impl TimerHost for RecordingHost {
    fn schedule(&mut self, id: TimerId, kind: TimerKind, after: Duration) {
        self.pending.insert(id, kind);
        self.record(HostCall::Schedule {
            id,
            kind,
            after_ms: after.as_millis() as u64,
        });
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.remove(&id);
        self.record(HostCall::Cancel { id });
    }
}

impl HistoryHost for RecordingHost {
    fn current_query(&self) -> String {
        self.query.clone()
    }

    fn write_query(&mut self, query: &str, mode: HistoryMode) {
        self.query = query.to_string();
        self.record(HostCall::WriteQuery {
            query: query.to_string(),
            mode,
        });
    }
}

impl FocusHost for RecordingHost {
    fn focus(&mut self, control: &ControlId) {
        self.focused = Some(control.clone());
        self.record(HostCall::Focus {
            control: control.clone(),
        });
    }

    fn focused(&self) -> Option<ControlId> {
        self.focused.clone()
    }
}

impl Preloader for RecordingHost {
    fn preload(&mut self, url: &str) {
        self.record(HostCall::Preload {
            url: url.to_string(),
        });
    }
}

impl InputHost for RecordingHost {
    fn prevent_default(&mut self) {
        self.record(HostCall::PreventDefault);
    }
}

impl ListenerHost for RecordingHost {
    fn listen(&mut self, listener: Listener) {
        self.listeners.insert(listener);
        self.record(HostCall::Listen { listener });
    }

    fn unlisten(&mut self, listener: Listener) {
        self.listeners.remove(&listener);
        self.record(HostCall::Unlisten { listener });
    }
}

impl NavigationHost for RecordingHost {
    fn open(&mut self, url: &str, new_context: bool) {
        self.record(HostCall::Open {
            url: url.to_string(),
            new_context,
        });
    }
}

impl ShareHost for RecordingHost {
    fn share(&mut self, title: &str, url: &str) -> Result<()> {
        if !self.share_available {
            return Err(HostError::Unavailable("share"));
        }
        self.record(HostCall::Share {
            title: title.to_string(),
            url: url.to_string(),
        });
        Ok(())
    }

    fn copy_text(&mut self, text: &str) -> Result<()> {
        if !self.clipboard_available {
            return Err(HostError::Unavailable("clipboard"));
        }
        self.record(HostCall::CopyText {
            text: text.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeating_timers_stay_pending_after_firing() {
        let mut host = RecordingHost::new();
        host.schedule(TimerId(1), TimerKind::AutoAdvance, Duration::from_secs(6));
        host.schedule(TimerId(2), TimerKind::CatchUp, Duration::from_millis(6250));

        assert_eq!(host.fire(TimerId(1)), Some(TimerKind::AutoAdvance));
        assert_eq!(host.fire(TimerId(2)), Some(TimerKind::CatchUp));
        assert_eq!(host.pending_of(TimerKind::AutoAdvance), vec![TimerId(1)]);
        assert!(host.pending_of(TimerKind::CatchUp).is_empty());
        assert_eq!(host.fire(TimerId(2)), None);
    }

    #[test]
    fn missing_capabilities_are_reported() {
        let mut host = RecordingHost::new();
        assert_eq!(
            host.copy_text("Ma. Leaves, Malé"),
            Err(HostError::Unavailable("clipboard"))
        );
        host.clipboard_available = true;
        assert!(host.copy_text("Ma. Leaves, Malé").is_ok());
    }
}
