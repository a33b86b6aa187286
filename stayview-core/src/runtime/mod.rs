//! Binding between a headless engine and a concrete host.
//!
//! [`Mounted`] owns both. Every input goes through [`Mounted::dispatch`],
//! whose effects are applied in order before it returns. Dropping the
//! binding unmounts the engine and releases whatever it still holds on the
//! host, including during a panic unwind.

mod tokio_timers;

pub use tokio_timers::TokioTimers;

use std::collections::{BTreeMap, HashSet};

use stayview_contracts::{Host, Listener};
use stayview_model::{HistoryMode, Millis, TimerId, TimerKind};
use tracing::{debug, trace};

use crate::effects::{Effect, Effects};
use crate::projection;

/// What the page looked like at mount time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountContext {
    /// Query string without the leading `?`.
    pub query: String,
    pub page_hidden: bool,
    pub prefers_reduced_motion: bool,
}

impl MountContext {
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.page_hidden = hidden;
        self
    }

    pub fn reduced_motion(mut self, reduce: bool) -> Self {
        self.prefers_reduced_motion = reduce;
        self
    }
}

/// A state machine driven by discrete messages.
pub trait Engine {
    type Message;

    fn mount(&mut self, ctx: &MountContext, now: Millis) -> Effects;

    fn update(&mut self, message: Self::Message, now: Millis) -> Effects;

    /// Must release every timer and listener the engine owns.
    fn unmount(&mut self) -> Effects;
}

/// Engines whose timers come back as a message.
pub trait TimerDriven: Engine {
    fn timer_fired(id: TimerId) -> Self::Message;
}

impl TimerDriven for crate::CarouselEngine {
    fn timer_fired(id: TimerId) -> Self::Message {
        crate::CarouselMessage::TimerFired { id }
    }
}

impl TimerDriven for crate::LightboxEngine {
    fn timer_fired(id: TimerId) -> Self::Message {
        crate::LightboxMessage::TimerFired { id }
    }
}

/// A mounted engine. Unmounts on drop.
#[derive(Debug)]
pub struct Mounted<E: Engine, H: Host> {
    engine: E,
    host: H,
    timers: BTreeMap<TimerId, TimerKind>,
    listeners: HashSet<Listener>,
}

impl<E: Engine, H: Host> Mounted<E, H> {
    /// Mount against the host's current query with a visible page and no
    /// motion preference.
    pub fn new(engine: E, host: H, now: Millis) -> Self {
        let ctx = MountContext::with_query(host.current_query());
        Self::with_context(engine, host, &ctx, now)
    }

    pub fn with_context(mut engine: E, host: H, ctx: &MountContext, now: Millis) -> Self {
        let effects = engine.mount(ctx, now);
        let mut mounted = Self {
            engine,
            host,
            timers: BTreeMap::new(),
            listeners: HashSet::new(),
        };
        mounted.apply(effects);
        debug!("engine mounted");
        mounted
    }

    pub fn dispatch(&mut self, message: E::Message, now: Millis) {
        let effects = self.engine.update(message, now);
        self.apply(effects);
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Timers scheduled on the host and not yet cancelled or spent.
    pub fn pending_timers(&self) -> impl Iterator<Item = (TimerId, TimerKind)> + '_ {
        self.timers.iter().map(|(id, kind)| (*id, *kind))
    }

    fn apply(&mut self, effects: Effects) {
        for effect in effects {
            trace!(?effect, "apply");
            match effect {
                Effect::ScheduleTimer { id, kind, after } => {
                    self.timers.insert(id, kind);
                    self.host.schedule(id, kind, after);
                }
                Effect::CancelTimer { id } => {
                    self.timers.remove(&id);
                    self.host.cancel(id);
                }
                Effect::Project { index, mode } => {
                    let current = self.host.current_query();
                    let next = projection::write_index(&current, index);
                    if next != current {
                        self.host.write_query(&next, mode);
                    }
                }
                Effect::ProjectFilter { filter } => {
                    let current = self.host.current_query();
                    let next = filter.to_query(&current);
                    if next != current {
                        self.host.write_query(&next, HistoryMode::Replace);
                    }
                }
                Effect::Focus { control } => self.host.focus(&control),
                Effect::Preload { url } => self.host.preload(&url),
                Effect::PreventDefault => self.host.prevent_default(),
                Effect::Listen { listener } => {
                    if self.listeners.insert(listener) {
                        self.host.listen(listener);
                    }
                }
                Effect::Unlisten { listener } => {
                    if self.listeners.remove(&listener) {
                        self.host.unlisten(listener);
                    }
                }
                Effect::Open { url, new_context } => self.host.open(&url, new_context),
            }
        }
    }
}

impl<E: TimerDriven, H: Host> Mounted<E, H> {
    /// Deliver a host timer to the engine. Spent one-shots are forgotten.
    pub fn fire(&mut self, id: TimerId, now: Millis) {
        match self.timers.get(&id) {
            Some(kind) if !kind.is_repeating() => {
                self.timers.remove(&id);
            }
            Some(_) => {}
            None => {
                trace!(%id, "timer not owned by this binding");
                return;
            }
        }
        self.dispatch(E::timer_fired(id), now);
    }
}

impl<E: Engine, H: Host> Drop for Mounted<E, H> {
    fn drop(&mut self) {
        let effects = self.engine.unmount();
        self.apply(effects);
        for (id, _) in std::mem::take(&mut self.timers) {
            self.host.cancel(id);
        }
        for listener in std::mem::take(&mut self.listeners) {
            self.host.unlisten(listener);
        }
        debug!("engine unmounted");
    }
}

#[cfg(test)]
mod tests {
    use stayview_contracts::{HostCall, RecordingHost};
    use stayview_model::{Photo, PhotoSet, PhotoTag, Slide, SlideMedia};

    use super::*;
    use crate::{
        CarouselEngine, CarouselMessage, CarouselOptions, LightboxEngine, LightboxMessage,
        LightboxOptions,
    };

    fn carousel(n: usize) -> CarouselEngine {
        let slides: Vec<_> = (0..n)
            .map(|i| Slide::new(SlideMedia::image(format!("/h/{i}.jpg"), "")).unwrap())
            .collect();
        CarouselEngine::new(slides, CarouselOptions::default())
    }

    #[test]
    fn drop_releases_timers_and_listeners() {
        let mut host = RecordingHost::new();
        {
            let mut mounted = Mounted::new(carousel(3), &mut host, 0);
            assert_eq!(mounted.host().pending.len(), 2);
            assert_eq!(mounted.host().listeners.len(), 3);
            mounted.dispatch(CarouselMessage::PointerEntered, 10);
            assert!(mounted.host().pending.is_empty());
            mounted.dispatch(CarouselMessage::PointerLeft, 20);
            assert_eq!(mounted.host().pending.len(), 2);
        }
        assert!(host.pending.is_empty());
        assert!(host.listeners.is_empty());
    }

    #[test]
    fn drop_during_unwind_still_unmounts() {
        let mut host = RecordingHost::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _mounted = Mounted::new(carousel(2), &mut host, 0);
            panic!("page handler failed");
        }));
        assert!(result.is_err());
        assert!(host.pending.is_empty());
        assert!(host.listeners.is_empty());
    }

    #[test]
    fn project_rewrites_only_the_lightbox_pair() {
        let photos: PhotoSet = (0..4)
            .map(|i| Photo::new(format!("img{i}"), format!("/g/{i}.jpg")).unwrap())
            .collect();
        let lb = LightboxEngine::new(photos, LightboxOptions::default());
        let mut mounted = Mounted::new(lb, RecordingHost::with_query("ref=ig"), 0);

        mounted.dispatch(LightboxMessage::Open { index: 1, trigger: None }, 0);
        mounted.dispatch(LightboxMessage::Next, 0);
        mounted.dispatch(LightboxMessage::Close, 0);

        assert_eq!(
            mounted.host().history_writes(),
            vec![
                ("ref=ig&lightbox=1", HistoryMode::Push),
                ("ref=ig&lightbox=2", HistoryMode::Replace),
                ("ref=ig", HistoryMode::Push),
            ]
        );
        assert!(mounted.host().calls.contains(&HostCall::Focus {
            control: "lightbox-close".into()
        }));
    }

    #[test]
    fn filter_changes_replace_the_entry_beside_lightbox() {
        let photos: PhotoSet = ["room1.jpg", "lobby.jpg", "room2.jpg"]
            .into_iter()
            .map(|k| Photo::new(k, format!("/g/{k}")).unwrap())
            .collect();
        let lb = LightboxEngine::new(photos, LightboxOptions::default());
        let mut mounted = Mounted::new(lb, RecordingHost::with_query("lightbox=0"), 0);

        mounted.dispatch(LightboxMessage::FilterTag { tag: Some(PhotoTag::Rooms) }, 0);
        mounted.dispatch(LightboxMessage::Search { query: "room".into() }, 0);
        // same filter again writes nothing
        mounted.dispatch(LightboxMessage::Search { query: "room".into() }, 0);

        assert_eq!(
            mounted.host().history_writes(),
            vec![
                ("lightbox=0&tag=Rooms", HistoryMode::Replace),
                ("lightbox=0&tag=Rooms&q=room", HistoryMode::Replace),
            ]
        );
    }

    #[test]
    fn fire_forgets_spent_one_shots() {
        let mut mounted = Mounted::new(carousel(3), RecordingHost::new(), 0);
        let catch_up = mounted
            .pending_timers()
            .find(|(_, kind)| *kind == TimerKind::CatchUp)
            .map(|(id, _)| id)
            .unwrap();
        mounted.host_mut().fire(catch_up);
        mounted.fire(catch_up, 6_250);
        assert_eq!(mounted.engine().active_index(), Some(1));
        // catch-up restarted the cycle
        assert_eq!(mounted.pending_timers().count(), 2);
        assert!(mounted.pending_timers().all(|(id, _)| id != catch_up));
    }
}
