use std::collections::HashSet;

use stayview_contracts::Listener;
use stayview_model::{
    ControlId, HistoryMode, Millis, Photo, PhotoSet, PhotoTag, TimerId, TimerKind,
};
use tracing::{debug, trace};

use super::messages::LightboxMessage;
use super::options::LightboxOptions;
use super::state::LightboxState;
use super::view::LightboxView;
use crate::carousel::state::{clamp_index, step};
use crate::effects::{Effect, Effects};
use crate::focus::{FocusReturn, FocusTrap};
use crate::gallery::{self, FilteredPhotos, GalleryFilter};
use crate::gesture::{SwipeOutcome, SwipeRecognizer};
use crate::input::{Key, KeyEvent};
use crate::projection;
use crate::runtime::{Engine, MountContext};

/// Modal photo viewer over an immutable, naturally sorted photo set.
///
/// Open/close are history entries (`Push`); moving between photos while open
/// replaces the current entry so the back button leaves the lightbox.
#[derive(Debug)]
pub struct LightboxEngine {
    photos: PhotoSet,
    options: LightboxOptions,
    state: LightboxState,
    trap: FocusTrap,
    focus_return: FocusReturn,
    swipe: SwipeRecognizer,
    /// Photo indices handed to the host for preloading since the last open.
    warmed: HashSet<usize>,
    filter: GalleryFilter,
    slideshow: Option<TimerId>,
    mounted: bool,
}

impl LightboxEngine {
    pub fn new(photos: PhotoSet, options: LightboxOptions) -> Self {
        let trap = FocusTrap::new(options.dialog_controls.clone());
        let swipe = SwipeRecognizer::new(options.swipe);
        Self {
            photos,
            options,
            state: LightboxState::default(),
            trap,
            focus_return: FocusReturn::default(),
            swipe,
            warmed: HashSet::new(),
            filter: GalleryFilter::default(),
            slideshow: None,
            mounted: false,
        }
    }

    pub fn photos(&self) -> &PhotoSet {
        &self.photos
    }

    pub fn options(&self) -> &LightboxOptions {
        &self.options
    }

    pub fn state(&self) -> LightboxState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn active_index(&self) -> Option<usize> {
        self.state.open_index()
    }

    pub fn slideshow_running(&self) -> bool {
        self.slideshow.is_some()
    }

    pub fn view(&self) -> Option<LightboxView<'_>> {
        LightboxView::build(self)
    }

    pub fn filter(&self) -> &GalleryFilter {
        &self.filter
    }

    /// Grid contents under the current filter.
    pub fn grid(&self) -> FilteredPhotos<'_> {
        self.filter.apply(&self.photos)
    }

    /// Filter chips for the current photo set, "All" first.
    pub fn chips(&self) -> Vec<Option<PhotoTag>> {
        gallery::tag_chips(&self.photos)
    }

    /// Replace the grid filter. The lightbox itself keeps navigating the
    /// full set.
    pub fn set_filter(&mut self, filter: GalleryFilter) -> Effects {
        if filter == self.filter {
            return Effects::none();
        }
        debug!(tag = ?filter.tag, query = %filter.query, "gallery filter changed");
        self.filter = filter.clone();
        Effect::ProjectFilter { filter }.into()
    }

    pub fn set_tag(&mut self, tag: Option<PhotoTag>) -> Effects {
        self.set_filter(GalleryFilter {
            tag,
            ..self.filter.clone()
        })
    }

    pub fn set_search(&mut self, query: impl Into<String>) -> Effects {
        self.set_filter(GalleryFilter {
            query: query.into(),
            ..self.filter.clone()
        })
    }

    /// Open from a grid tile: `position` is within the filtered grid and is
    /// mapped to the photo's index in the full set.
    pub fn open_filtered(&mut self, position: usize, trigger: Option<ControlId>) -> Effects {
        match self.grid().full_index(position) {
            Some(index) => self.open(index as i64, trigger),
            None => Effects::none(),
        }
    }

    /// Open at `at` (clamped). No-op when there are no photos. Opening while
    /// already open behaves like [`select`](Self::select).
    pub fn open(&mut self, at: i64, trigger: Option<ControlId>) -> Effects {
        if self.photos.is_empty() {
            return Effects::none();
        }
        if self.state.is_open {
            return self.select(at);
        }
        let index = clamp_index(at, self.photos.len());
        self.warmed.clear();
        self.state = LightboxState {
            is_open: true,
            active_index: index,
        };
        self.focus_return.capture(trigger);
        debug!(index, photos = self.photos.len(), "lightbox opened");

        let mut effects: Effects = Effect::Project {
            index: Some(index),
            mode: HistoryMode::Push,
        }
        .into();
        effects.extend(self.enter_dialog());
        effects
    }

    pub fn close(&mut self) -> Effects {
        if !self.state.is_open {
            return Effects::none();
        }
        self.state.is_open = false;
        self.swipe.cancel();
        debug!(index = self.state.active_index, "lightbox closed");

        let mut effects = self.stop_slideshow();
        effects.push(Effect::Project {
            index: None,
            mode: HistoryMode::Push,
        });
        effects.push(Effect::Unlisten {
            listener: Listener::Keydown,
        });
        if let Some(control) = self.focus_return.release() {
            effects.push(Effect::Focus { control });
        }
        effects
    }

    pub fn next(&mut self) -> Effects {
        self.step(true)
    }

    pub fn previous(&mut self) -> Effects {
        self.step(false)
    }

    /// Jump to a photo while open; any integer is clamped.
    pub fn select(&mut self, index: i64) -> Effects {
        if !self.state.is_open || self.photos.is_empty() {
            return Effects::none();
        }
        let index = clamp_index(index, self.photos.len());
        self.move_to(index)
    }

    pub fn toggle_slideshow(&mut self) -> Effects {
        if !self.state.is_open || !self.options.slideshow {
            return Effects::none();
        }
        if self.slideshow.is_some() {
            debug!("lightbox slideshow stopped");
            return self.stop_slideshow();
        }
        if self.photos.len() < 2 {
            return Effects::none();
        }
        let id = TimerId::unique();
        self.slideshow = Some(id);
        debug!(%id, "lightbox slideshow started");
        Effect::ScheduleTimer {
            id,
            kind: TimerKind::Slideshow,
            after: self.options.slideshow_interval,
        }
        .into()
    }

    fn step(&mut self, forward: bool) -> Effects {
        if !self.state.is_open || self.photos.is_empty() {
            return Effects::none();
        }
        let index = step(self.state.active_index, self.photos.len(), forward);
        self.move_to(index)
    }

    fn move_to(&mut self, index: usize) -> Effects {
        if index == self.state.active_index {
            return Effects::none();
        }
        trace!(from = self.state.active_index, to = index, "lightbox moved");
        self.state.active_index = index;
        let mut effects: Effects = Effect::Project {
            index: Some(index),
            mode: HistoryMode::Replace,
        }
        .into();
        effects.extend(self.preload_neighbors());
        effects
    }

    /// Keyboard surface, initial focus and preloads for a freshly open dialog.
    fn enter_dialog(&mut self) -> Effects {
        let mut effects: Effects = Effect::Listen {
            listener: Listener::Keydown,
        }
        .into();
        if let Some(control) = self.trap.initial() {
            effects.push(Effect::Focus {
                control: control.clone(),
            });
        }
        effects.extend(self.preload_neighbors());
        effects
    }

    fn preload_neighbors(&mut self) -> Effects {
        let count = self.photos.len();
        let mut effects = Effects::none();
        if count < 2 {
            return effects;
        }
        let current = self.state.active_index;
        // the shown photo is already being fetched by the host
        self.warmed.insert(current);
        for index in [step(current, count, false), step(current, count, true)] {
            if !self.warmed.insert(index) {
                continue;
            }
            if let Some(photo) = self.photos.get(index) {
                effects.push(Effect::Preload {
                    url: photo.url.clone(),
                });
            }
        }
        effects
    }

    fn stop_slideshow(&mut self) -> Effects {
        match self.slideshow.take() {
            Some(id) => Effect::CancelTimer { id }.into(),
            None => Effects::none(),
        }
    }

    fn on_key(&mut self, event: KeyEvent) -> Effects {
        if !self.state.is_open {
            return Effects::none();
        }
        match event.key {
            Key::Escape => self.close(),
            Key::ArrowLeft => self.previous(),
            Key::ArrowRight => self.next(),
            Key::Tab => match self.trap.on_tab(event.focused.as_ref(), event.shift) {
                Some(control) => {
                    let mut effects: Effects = Effect::PreventDefault.into();
                    effects.push(Effect::Focus {
                        control: control.clone(),
                    });
                    effects
                }
                None => Effects::none(),
            },
            Key::Character('a' | 'A') => self.toggle_slideshow(),
            _ => Effects::none(),
        }
    }

    fn replace_photos(&mut self, photos: Vec<Photo>) -> Effects {
        self.photos = PhotoSet::new(photos);
        self.warmed.clear();
        if self.photos.is_empty() {
            self.state.active_index = 0;
            return self.close();
        }
        let clamped = self.state.active_index.min(self.photos.len() - 1);
        if !self.state.is_open {
            self.state.active_index = clamped;
            return Effects::none();
        }
        let mut effects = Effects::none();
        if self.photos.len() < 2 {
            effects.extend(self.stop_slideshow());
        }
        if clamped != self.state.active_index {
            self.state.active_index = clamped;
            effects.push(Effect::Project {
                index: Some(clamped),
                mode: HistoryMode::Replace,
            });
        }
        effects.extend(self.preload_neighbors());
        effects
    }
}

impl Engine for LightboxEngine {
    type Message = LightboxMessage;

    /// Restores an open lightbox from a shared or reloaded URL.
    fn mount(&mut self, ctx: &MountContext, _now: Millis) -> Effects {
        if self.mounted {
            return Effects::none();
        }
        self.mounted = true;
        self.filter = GalleryFilter::from_query(&ctx.query);

        let state = projection::query_to_state(&ctx.query, self.photos.len());
        if !state.is_open {
            return Effects::none();
        }
        self.state = state;
        debug!(index = state.active_index, "lightbox restored from query");

        let mut effects = Effects::none();
        let requested = projection::query_to_index(&ctx.query);
        if requested != Some(state.active_index as i64) {
            effects.push(Effect::Project {
                index: Some(state.active_index),
                mode: HistoryMode::Replace,
            });
        }
        effects.extend(self.enter_dialog());
        effects
    }

    fn update(&mut self, message: LightboxMessage, _now: Millis) -> Effects {
        match message {
            LightboxMessage::Open { index, trigger } => self.open(index, trigger),
            LightboxMessage::Close => self.close(),
            LightboxMessage::Next => self.next(),
            LightboxMessage::Previous => self.previous(),
            LightboxMessage::Select { index } => self.select(index),
            LightboxMessage::Key { event } => self.on_key(event),
            LightboxMessage::TouchStart { point } => {
                if self.state.is_open {
                    self.swipe.start(point);
                }
                Effects::none()
            }
            LightboxMessage::TouchMove { point } => {
                if self.swipe.moved(point) {
                    Effect::PreventDefault.into()
                } else {
                    Effects::none()
                }
            }
            LightboxMessage::TouchEnd { point } => match self.swipe.end(point) {
                Some(SwipeOutcome::Forward) => self.next(),
                Some(SwipeOutcome::Backward) => self.previous(),
                None => Effects::none(),
            },
            LightboxMessage::TouchCancel => {
                self.swipe.cancel();
                Effects::none()
            }
            LightboxMessage::TimerFired { id } => {
                if self.slideshow == Some(id) {
                    self.next()
                } else {
                    trace!(%id, "stale timer ignored");
                    Effects::none()
                }
            }
            LightboxMessage::ToggleSlideshow => self.toggle_slideshow(),
            LightboxMessage::PhotosReplaced { photos } => self.replace_photos(photos),
            LightboxMessage::FilterTag { tag } => self.set_tag(tag),
            LightboxMessage::Search { query } => self.set_search(query),
            LightboxMessage::OpenFiltered { position, trigger } => {
                self.open_filtered(position, trigger)
            }
        }
    }

    /// Releases timers and listeners without touching history.
    fn unmount(&mut self) -> Effects {
        if !self.mounted {
            return Effects::none();
        }
        self.mounted = false;
        self.swipe.cancel();
        let mut effects = self.stop_slideshow();
        if self.state.is_open {
            effects.push(Effect::Unlisten {
                listener: Listener::Keydown,
            });
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photos(n: usize) -> PhotoSet {
        (0..n)
            .map(|i| Photo::new(format!("img{i}"), format!("/gallery/img{i}.jpg")).unwrap())
            .collect()
    }

    fn engine(n: usize) -> LightboxEngine {
        LightboxEngine::new(photos(n), LightboxOptions::default())
    }

    #[test]
    fn open_pushes_history_and_focuses_close() {
        let mut lb = engine(5);
        let effects = lb.open(2, Some(ControlId::new("thumb-2")));
        assert_eq!(lb.active_index(), Some(2));
        assert!(effects.contains(&Effect::Project {
            index: Some(2),
            mode: HistoryMode::Push
        }));
        assert!(effects.contains(&Effect::Focus {
            control: ControlId::new("lightbox-close")
        }));
        let preloads: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::Preload { url } => Some(url.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(preloads, ["/gallery/img1.jpg", "/gallery/img3.jpg"]);
    }

    #[test]
    fn open_on_empty_set_is_noop() {
        let mut lb = engine(0);
        assert!(lb.open(0, None).is_empty());
        assert!(!lb.is_open());
    }

    #[test]
    fn close_restores_focus_to_trigger() {
        let mut lb = engine(3);
        lb.open(0, Some(ControlId::new("view-photos")));
        let effects = lb.close();
        assert!(effects.contains(&Effect::Project {
            index: None,
            mode: HistoryMode::Push
        }));
        assert!(effects.contains(&Effect::Focus {
            control: ControlId::new("view-photos")
        }));
        assert!(lb.close().is_empty());
    }

    #[test]
    fn navigation_replaces_history_and_wraps() {
        let mut lb = engine(3);
        lb.open(2, None);
        let effects = lb.next();
        assert_eq!(lb.active_index(), Some(0));
        assert!(effects.contains(&Effect::Project {
            index: Some(0),
            mode: HistoryMode::Replace
        }));
        lb.previous();
        assert_eq!(lb.active_index(), Some(2));
    }

    #[test]
    fn preloads_are_deduplicated() {
        let mut lb = engine(3);
        lb.open(0, None);
        // all three photos are warm after the first open
        let effects = lb.next();
        assert!(!effects.iter().any(|e| matches!(e, Effect::Preload { .. })));
    }

    fn preload_count(effects: &Effects) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::Preload { .. }))
            .count()
    }

    #[test]
    fn reopening_preloads_neighbors_again() {
        let mut lb = engine(5);
        assert_eq!(preload_count(&lb.open(0, None)), 2);
        lb.close();
        assert_eq!(preload_count(&lb.open(0, None)), 2);
    }

    #[test]
    fn filtered_tile_opens_at_full_set_index() {
        let photos: PhotoSet = ["lobby1.jpg", "room1.jpg", "lobby2.jpg", "room2.jpg"]
            .into_iter()
            .map(|k| Photo::new(k, format!("/g/{k}")).unwrap())
            .collect();
        let mut lb = LightboxEngine::new(photos, LightboxOptions::default());
        assert_eq!(lb.chips(), [None, Some(PhotoTag::Rooms), Some(PhotoTag::Lobby)]);

        let effects = lb.set_tag(Some(PhotoTag::Rooms));
        assert!(effects.contains(&Effect::ProjectFilter {
            filter: GalleryFilter::new(Some(PhotoTag::Rooms), "")
        }));
        assert_eq!(lb.grid().summary(), "2 / 4 photos");

        // second Rooms tile is room2, index 3 in natural order
        lb.update(
            LightboxMessage::OpenFiltered {
                position: 1,
                trigger: None,
            },
            0,
        );
        assert_eq!(lb.active_index(), Some(3));
        // navigation still walks the full set
        lb.next();
        assert_eq!(lb.active_index(), Some(0));

        lb.close();
        assert!(lb.open_filtered(9, None).is_empty());
        assert!(lb.set_tag(Some(PhotoTag::Rooms)).is_empty());
    }

    #[test]
    fn mount_reads_filter_from_query() {
        let mut lb = engine(3);
        let effects = lb.mount(&MountContext::with_query("tag=Rooms&q=img"), 0);
        assert!(effects.is_empty());
        assert_eq!(lb.filter(), &GalleryFilter::new(Some(PhotoTag::Rooms), "img"));
        assert!(!lb.is_open());
    }

    #[test]
    fn single_photo_skips_preload() {
        let mut lb = engine(1);
        let effects = lb.open(0, None);
        assert!(!effects.iter().any(|e| matches!(e, Effect::Preload { .. })));
    }

    #[test]
    fn escape_closes_and_keys_ignored_when_closed() {
        let mut lb = engine(3);
        let right = LightboxMessage::Key {
            event: KeyEvent::new(Key::ArrowRight),
        };
        assert!(lb.update(right, 0).is_empty());
        lb.open(1, None);
        let escape = LightboxMessage::Key {
            event: KeyEvent::new(Key::Escape),
        };
        lb.update(escape, 0);
        assert!(!lb.is_open());
    }

    #[test]
    fn slideshow_toggles_with_a() {
        let mut lb = engine(3);
        lb.open(0, None);
        let effects = lb.update(
            LightboxMessage::Key {
                event: KeyEvent::new(Key::Character('A')),
            },
            0,
        );
        let (id, kind) = effects.scheduled().next().unwrap();
        assert_eq!(kind, TimerKind::Slideshow);

        lb.update(LightboxMessage::TimerFired { id }, 3_500);
        assert_eq!(lb.active_index(), Some(1));

        let effects = lb.close();
        assert!(effects.cancelled().any(|c| c == id));
        assert!(!lb.slideshow_running());
    }

    #[test]
    fn mount_restores_and_clamps_from_query() {
        let mut lb = engine(4);
        let ctx = MountContext::with_query("ref=ig&lightbox=9");
        let effects = lb.mount(&ctx, 0);
        assert_eq!(lb.active_index(), Some(3));
        assert!(effects.contains(&Effect::Project {
            index: Some(3),
            mode: HistoryMode::Replace
        }));

        let mut lb = engine(4);
        let effects = lb.mount(&MountContext::with_query("lightbox=1"), 0);
        assert_eq!(lb.active_index(), Some(1));
        assert!(!effects.iter().any(|e| matches!(e, Effect::Project { .. })));

        let mut lb = engine(4);
        let huge = MountContext::with_query("lightbox=99999999999999999999");
        let effects = lb.mount(&huge, 0);
        assert_eq!(lb.active_index(), Some(3));
        assert!(effects.contains(&Effect::Project {
            index: Some(3),
            mode: HistoryMode::Replace
        }));

        let mut lb = engine(4);
        assert!(lb.mount(&MountContext::with_query("lightbox=abc"), 0).is_empty());
        assert!(!lb.is_open());
    }

    #[test]
    fn shrinking_photos_clamps_or_closes() {
        let mut lb = engine(5);
        lb.open(4, None);
        let effects = lb.update(
            LightboxMessage::PhotosReplaced {
                photos: photos(2).as_slice().to_vec(),
            },
            0,
        );
        assert_eq!(lb.active_index(), Some(1));
        assert!(effects.contains(&Effect::Project {
            index: Some(1),
            mode: HistoryMode::Replace
        }));

        lb.update(LightboxMessage::PhotosReplaced { photos: Vec::new() }, 0);
        assert!(!lb.is_open());
    }
}
