//! Side effects requested by the engines.
//!
//! A handler returns every effect of one input at once; the runtime applies
//! them in order before the next input is processed, so no transition is
//! ever observed half-applied.

use std::time::Duration;

use serde::Serialize;
use stayview_contracts::Listener;
use stayview_model::{ControlId, HistoryMode, TimerId, TimerKind};

use crate::gallery::GalleryFilter;
use crate::serde_helpers::duration_ms;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    ScheduleTimer {
        id: TimerId,
        kind: TimerKind,
        #[serde(rename = "after_ms", with = "duration_ms")]
        after: Duration,
    },
    CancelTimer {
        id: TimerId,
    },
    /// Mirror the lightbox index into the query string; `None` removes it.
    Project {
        index: Option<usize>,
        mode: HistoryMode,
    },
    /// Mirror the gallery filter into `tag=`/`q=`, replacing the entry.
    ProjectFilter {
        filter: GalleryFilter,
    },
    Focus {
        control: ControlId,
    },
    Preload {
        url: String,
    },
    /// Suppress the browser default for the event being handled.
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
}

/// Ordered effect list for one handled input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Effects(Vec<Effect>);

impl Effects {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.0.push(effect);
    }

    pub fn extend(&mut self, other: Effects) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Effect> {
        self.0.iter()
    }

    pub fn contains(&self, effect: &Effect) -> bool {
        self.0.contains(effect)
    }

    pub fn scheduled(&self) -> impl Iterator<Item = (TimerId, TimerKind)> + '_ {
        self.0.iter().filter_map(|e| match e {
            Effect::ScheduleTimer { id, kind, .. } => Some((*id, *kind)),
            _ => None,
        })
    }

    pub fn cancelled(&self) -> impl Iterator<Item = TimerId> + '_ {
        self.0.iter().filter_map(|e| match e {
            Effect::CancelTimer { id } => Some(*id),
            _ => None,
        })
    }
}

impl From<Effect> for Effects {
    fn from(effect: Effect) -> Self {
        Self(vec![effect])
    }
}

impl IntoIterator for Effects {
    type Item = Effect;
    type IntoIter = std::vec::IntoIter<Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Effects {
    type Item = &'a Effect;
    type IntoIter = std::slice::Iter<'a, Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
