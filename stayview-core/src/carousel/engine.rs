use std::collections::BTreeSet;
use std::sync::Arc;

use stayview_contracts::Listener;
use stayview_model::{Millis, Slide, TimerId, TimerKind};
use tracing::{debug, trace};

use super::messages::{CarouselMessage, Direction};
use super::options::CarouselOptions;
use super::state::{
    AutoplayCycle, CarouselPhase, CarouselState, clamp_index, step,
};
use super::view::CarouselView;
use crate::effects::{Effect, Effects};
use crate::gesture::{SwipeOutcome, SwipeRecognizer};
use crate::input::Key;
use crate::runtime::{Engine, MountContext};

const LISTENERS: [Listener; 3] = [
    Listener::Keydown,
    Listener::VisibilityChange,
    Listener::ReducedMotionChange,
];

/// Timed, pausable slide cycler.
///
/// Invariant: at most one auto-advance timer is pending, and only while the
/// carousel is mounted, has more than one slide, and nothing pauses it.
/// Every change to a pause condition cancels the current cycle before a new
/// one is armed.
#[derive(Debug)]
pub struct CarouselEngine {
    slides: Arc<[Slide]>,
    options: CarouselOptions,
    state: CarouselState,
    swipe: SwipeRecognizer,
    degraded: BTreeSet<usize>,
}

impl CarouselEngine {
    pub fn new(slides: impl Into<Arc<[Slide]>>, options: CarouselOptions) -> Self {
        let swipe = SwipeRecognizer::new(options.swipe);
        Self {
            slides: slides.into(),
            options,
            state: CarouselState::default(),
            swipe,
            degraded: BTreeSet::new(),
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    /// `None` for an empty carousel, which has no meaningful index.
    pub fn active_index(&self) -> Option<usize> {
        (!self.slides.is_empty()).then_some(self.state.active_index)
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    pub fn is_degraded(&self, index: usize) -> bool {
        self.degraded.contains(&index)
    }

    pub fn phase(&self) -> CarouselPhase {
        if self.slides.is_empty() {
            CarouselPhase::Inert
        } else if self.swipe.is_tracking() {
            CarouselPhase::Dragging
        } else if self.state.cycle.is_some() {
            CarouselPhase::Autoplaying
        } else if self.autoplay_possible() && self.state.is_paused() {
            CarouselPhase::Paused
        } else {
            CarouselPhase::Idle
        }
    }

    /// Render model; `None` when there is nothing to render.
    pub fn view(&self, now: Millis) -> Option<CarouselView<'_>> {
        CarouselView::build(self, now)
    }

    /// Move one slide with wraparound. No-op on an empty carousel.
    pub fn advance(&mut self, direction: Direction, now: Millis) -> Effects {
        if self.slides.is_empty() {
            return Effects::none();
        }
        self.step_index(direction);
        self.restart_cycle(now)
    }

    /// Jump to a slide; any integer is clamped into range.
    pub fn go_to(&mut self, index: i64, now: Millis) -> Effects {
        if self.slides.is_empty() {
            return Effects::none();
        }
        let target = clamp_index(index, self.slides.len());
        if target == self.state.active_index {
            return Effects::none();
        }
        debug!(from = self.state.active_index, to = target, "carousel go_to");
        self.state.active_index = target;
        self.restart_cycle(now)
    }

    pub(crate) fn cycle(&self) -> Option<&AutoplayCycle> {
        self.state.cycle.as_ref()
    }

    fn step_index(&mut self, direction: Direction) {
        let from = self.state.active_index;
        self.state.active_index = step(
            from,
            self.slides.len(),
            direction == Direction::Forward,
        );
        debug!(from, to = self.state.active_index, ?direction, "carousel advance");
    }

    /// Static preconditions, independent of interaction pauses.
    fn autoplay_possible(&self) -> bool {
        let reduce_blocks =
            self.options.respect_reduced_motion && self.state.pause.reduced_motion;
        self.state.mounted
            && self.slides.len() > 1
            && self.options.autoplay
            && !reduce_blocks
    }

    fn should_autoplay(&self) -> bool {
        self.autoplay_possible() && !self.state.is_paused()
    }

    fn cancel_cycle(&mut self) -> Effects {
        let mut effects = Effects::none();
        if let Some(cycle) = self.state.cycle.take() {
            effects.push(Effect::CancelTimer { id: cycle.primary });
            if let Some(id) = cycle.catch_up {
                effects.push(Effect::CancelTimer { id });
            }
        }
        effects
    }

    /// Cancel whatever is pending, then arm a fresh cycle if allowed.
    fn restart_cycle(&mut self, now: Millis) -> Effects {
        let mut effects = self.cancel_cycle();
        if !self.should_autoplay() {
            return effects;
        }

        let primary = TimerId::unique();
        let catch_up = TimerId::unique();
        effects.push(Effect::ScheduleTimer {
            id: primary,
            kind: TimerKind::AutoAdvance,
            after: self.options.auto_advance_interval,
        });
        effects.push(Effect::ScheduleTimer {
            id: catch_up,
            kind: TimerKind::CatchUp,
            after: self.options.catch_up_after(),
        });
        self.state.cycle = Some(AutoplayCycle {
            primary,
            catch_up: Some(catch_up),
            started_at: now,
            primary_fired: false,
        });
        trace!(%primary, %catch_up, "autoplay cycle armed");
        effects
    }

    /// Apply a pause-condition change; reschedules only when it flipped.
    fn set_pause(
        &mut self,
        now: Millis,
        apply: impl FnOnce(&mut super::state::PauseReasons) -> bool,
    ) -> Effects {
        if apply(&mut self.state.pause) {
            debug!(pause = ?self.state.pause, "carousel pause conditions changed");
            self.restart_cycle(now)
        } else {
            Effects::none()
        }
    }

    fn on_timer(&mut self, id: TimerId, now: Millis) -> Effects {
        let Some(cycle) = self.state.cycle.as_mut() else {
            trace!(%id, "stale timer ignored");
            return Effects::none();
        };

        if id == cycle.primary {
            cycle.primary_fired = true;
            cycle.started_at = now;
            let count = self.slides.len();
            let from = self.state.active_index;
            self.state.active_index = step(from, count, true);
            debug!(from, to = self.state.active_index, "auto-advance");
            return Effects::none();
        }

        if Some(id) == cycle.catch_up {
            cycle.catch_up = None;
            if cycle.primary_fired {
                trace!(%id, "catch-up skipped, primary already fired");
                return Effects::none();
            }
            debug!(%id, "primary timer missed its slot, catching up");
            self.step_index(Direction::Forward);
            return self.restart_cycle(now);
        }

        trace!(%id, "stale timer ignored");
        Effects::none()
    }

    fn on_swipe_end(&mut self, outcome: Option<SwipeOutcome>, now: Millis) -> Effects {
        let dragging_changed = {
            let was = self.state.pause.dragging;
            self.state.pause.dragging = false;
            was
        };
        match outcome {
            Some(SwipeOutcome::Forward) => self.advance(Direction::Forward, now),
            Some(SwipeOutcome::Backward) => self.advance(Direction::Backward, now),
            None if dragging_changed => self.restart_cycle(now),
            None => Effects::none(),
        }
    }

    fn replace_slides(&mut self, slides: Vec<Slide>, now: Millis) -> Effects {
        let before = self.slides.len();
        self.slides = slides.into();
        self.degraded.clear();
        self.swipe.cancel();
        self.state.pause.dragging = false;
        if self.slides.is_empty() {
            self.state.active_index = 0;
            debug!(before, "carousel emptied");
            return self.cancel_cycle();
        }
        self.state.active_index = self.state.active_index.min(self.slides.len() - 1);
        debug!(before, after = self.slides.len(), "carousel slides replaced");
        self.restart_cycle(now)
    }
}

impl Engine for CarouselEngine {
    type Message = CarouselMessage;

    fn mount(&mut self, ctx: &MountContext, now: Millis) -> Effects {
        if self.slides.is_empty() || self.state.mounted {
            return Effects::none();
        }
        self.state.mounted = true;
        self.state.pause.page_hidden = ctx.page_hidden;
        self.state.pause.reduced_motion = ctx.prefers_reduced_motion;

        let mut effects = Effects::none();
        for listener in LISTENERS {
            effects.push(Effect::Listen { listener });
        }
        if let Some(url) = self.slides[0].media.preload_url() {
            effects.push(Effect::Preload {
                url: url.to_string(),
            });
        }
        effects.extend(self.restart_cycle(now));
        debug!(slides = self.slides.len(), phase = ?self.phase(), "carousel mounted");
        effects
    }

    fn update(&mut self, message: CarouselMessage, now: Millis) -> Effects {
        if self.slides.is_empty() {
            // Inert: only a slide replacement can bring it to life.
            return match message {
                CarouselMessage::SlidesReplaced { slides } => {
                    self.replace_slides(slides, now)
                }
                _ => Effects::none(),
            };
        }

        match message {
            CarouselMessage::Advance { direction } => self.advance(direction, now),
            CarouselMessage::GoTo { index } => self.go_to(index, now),
            CarouselMessage::Key { event } => match event.key {
                Key::ArrowRight => self.advance(Direction::Forward, now),
                Key::ArrowLeft => self.advance(Direction::Backward, now),
                _ => Effects::none(),
            },
            CarouselMessage::PointerEntered => {
                self.set_pause(now, |p| !std::mem::replace(&mut p.hovered, true))
            }
            CarouselMessage::PointerLeft => {
                self.set_pause(now, |p| std::mem::replace(&mut p.hovered, false))
            }
            CarouselMessage::FocusEntered => self
                .set_pause(now, |p| !std::mem::replace(&mut p.focus_within, true)),
            CarouselMessage::FocusLeft => {
                self.set_pause(now, |p| std::mem::replace(&mut p.focus_within, false))
            }
            CarouselMessage::VisibilityChanged { hidden } => self.set_pause(now, |p| {
                std::mem::replace(&mut p.page_hidden, hidden) != hidden
            }),
            CarouselMessage::ReducedMotionChanged { reduce } => {
                self.set_pause(now, |p| {
                    std::mem::replace(&mut p.reduced_motion, reduce) != reduce
                })
            }
            CarouselMessage::TouchStart { point } => {
                self.swipe.start(point);
                self.set_pause(now, |p| !std::mem::replace(&mut p.dragging, true))
            }
            CarouselMessage::TouchMove { point } => {
                if self.swipe.moved(point) {
                    Effect::PreventDefault.into()
                } else {
                    Effects::none()
                }
            }
            CarouselMessage::TouchEnd { point } => {
                let outcome = self.swipe.end(point);
                self.on_swipe_end(outcome, now)
            }
            CarouselMessage::TouchCancel => {
                self.swipe.cancel();
                self.set_pause(now, |p| std::mem::replace(&mut p.dragging, false))
            }
            CarouselMessage::TimerFired { id } => self.on_timer(id, now),
            CarouselMessage::MediaFailed { index } => {
                if index < self.slides.len() && self.degraded.insert(index) {
                    debug!(index, "slide media failed, showing background");
                }
                Effects::none()
            }
            CarouselMessage::MediaLoaded { index } => {
                self.degraded.remove(&index);
                Effects::none()
            }
            CarouselMessage::SlidesReplaced { slides } => {
                self.replace_slides(slides, now)
            }
            CarouselMessage::BannerClicked { on_control } => {
                match (&self.options.banner_target, on_control) {
                    (Some(url), false) => Effect::Open {
                        url: url.clone(),
                        new_context: false,
                    }
                    .into(),
                    _ => Effects::none(),
                }
            }
        }
    }

    fn unmount(&mut self) -> Effects {
        if !self.state.mounted {
            return Effects::none();
        }
        self.state.mounted = false;
        self.swipe.cancel();
        self.state.pause.dragging = false;
        let mut effects = self.cancel_cycle();
        for listener in LISTENERS {
            effects.push(Effect::Unlisten { listener });
        }
        debug!("carousel unmounted");
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyEvent, TouchPoint};
    use stayview_model::SlideMedia;

    fn slides(n: usize) -> Vec<Slide> {
        (0..n)
            .map(|i| {
                Slide::new(SlideMedia::image(format!("/hero/{i}.jpg"), format!("slide {i}")))
                    .unwrap()
            })
            .collect()
    }

    fn mounted(n: usize) -> (CarouselEngine, Effects) {
        let mut engine = CarouselEngine::new(slides(n), CarouselOptions::default());
        let effects = engine.mount(&MountContext::default(), 0);
        (engine, effects)
    }

    #[test]
    fn three_slides_cycle_in_order() {
        let (mut engine, _) = mounted(3);
        assert_eq!(engine.active_index(), Some(0));
        engine.advance(Direction::Forward, 10);
        assert_eq!(engine.active_index(), Some(1));
        engine.advance(Direction::Forward, 20);
        assert_eq!(engine.active_index(), Some(2));
        engine.advance(Direction::Forward, 30);
        assert_eq!(engine.active_index(), Some(0));
    }

    #[test]
    fn mount_arms_one_cycle() {
        let (engine, effects) = mounted(3);
        let scheduled: Vec<_> = effects.scheduled().map(|(_, k)| k).collect();
        assert_eq!(scheduled, vec![TimerKind::AutoAdvance, TimerKind::CatchUp]);
        assert_eq!(engine.phase(), CarouselPhase::Autoplaying);
        assert!(effects.contains(&Effect::Listen {
            listener: Listener::Keydown
        }));
    }

    #[test]
    fn single_slide_never_schedules() {
        let (engine, effects) = mounted(1);
        assert_eq!(effects.scheduled().count(), 0);
        assert_eq!(engine.phase(), CarouselPhase::Idle);
    }

    #[test]
    fn hover_pauses_and_leave_resumes() {
        let (mut engine, _) = mounted(3);
        let primary = engine.cycle().unwrap().primary;

        let effects = engine.update(CarouselMessage::PointerEntered, 100);
        assert!(effects.cancelled().any(|id| id == primary));
        assert_eq!(effects.scheduled().count(), 0);
        assert_eq!(engine.phase(), CarouselPhase::Paused);
        assert!(engine.is_paused());

        // repeated enter is not a change
        assert!(engine.update(CarouselMessage::PointerEntered, 150).is_empty());

        let effects = engine.update(CarouselMessage::PointerLeft, 200);
        assert_eq!(effects.scheduled().count(), 2);
        assert_eq!(engine.phase(), CarouselPhase::Autoplaying);
    }

    #[test]
    fn primary_timer_advances_and_catch_up_is_skipped() {
        let (mut engine, _) = mounted(3);
        let cycle = *engine.cycle().unwrap();

        assert!(engine.update(CarouselMessage::TimerFired { id: cycle.primary }, 6_000).is_empty());
        assert_eq!(engine.active_index(), Some(1));

        let catch_up = cycle.catch_up.unwrap();
        assert!(engine.update(CarouselMessage::TimerFired { id: catch_up }, 6_250).is_empty());
        assert_eq!(engine.active_index(), Some(1));
        assert_eq!(engine.cycle().unwrap().catch_up, None);
    }

    #[test]
    fn catch_up_advances_when_primary_missed() {
        let (mut engine, _) = mounted(3);
        let cycle = *engine.cycle().unwrap();

        let effects = engine.update(
            CarouselMessage::TimerFired {
                id: cycle.catch_up.unwrap(),
            },
            6_250,
        );
        assert_eq!(engine.active_index(), Some(1));
        assert!(effects.cancelled().any(|id| id == cycle.primary));
        assert_eq!(effects.scheduled().count(), 2);
    }

    #[test]
    fn stale_timer_is_ignored() {
        let (mut engine, _) = mounted(3);
        let old = engine.cycle().unwrap().primary;
        engine.advance(Direction::Forward, 1_000);
        assert!(engine.update(CarouselMessage::TimerFired { id: old }, 6_000).is_empty());
        assert_eq!(engine.active_index(), Some(1));
    }

    #[test]
    fn reduced_motion_blocks_only_when_respected() {
        let mut engine = CarouselEngine::new(slides(3), CarouselOptions::default());
        let ctx = MountContext {
            prefers_reduced_motion: true,
            ..MountContext::default()
        };
        let effects = engine.mount(&ctx, 0);
        assert_eq!(effects.scheduled().count(), 0);

        let options = CarouselOptions {
            respect_reduced_motion: false,
            ..CarouselOptions::default()
        };
        let mut engine = CarouselEngine::new(slides(3), options);
        let effects = engine.mount(&ctx, 0);
        assert_eq!(effects.scheduled().count(), 2);
    }

    #[test]
    fn keyboard_arrows_navigate() {
        let (mut engine, _) = mounted(3);
        engine.update(
            CarouselMessage::Key {
                event: KeyEvent::new(Key::ArrowLeft),
            },
            5,
        );
        assert_eq!(engine.active_index(), Some(2));
        engine.update(
            CarouselMessage::Key {
                event: KeyEvent::new(Key::Escape),
            },
            6,
        );
        assert_eq!(engine.active_index(), Some(2));
    }

    #[test]
    fn swipe_pauses_while_dragging() {
        let (mut engine, _) = mounted(3);
        engine.update(
            CarouselMessage::TouchStart {
                point: TouchPoint::new(100.0, 100.0, 0),
            },
            0,
        );
        assert_eq!(engine.phase(), CarouselPhase::Dragging);
        assert!(engine.cycle().is_none());

        let effects = engine.update(
            CarouselMessage::TouchMove {
                point: TouchPoint::new(70.0, 101.0, 100),
            },
            100,
        );
        assert!(effects.contains(&Effect::PreventDefault));

        engine.update(
            CarouselMessage::TouchEnd {
                point: TouchPoint::new(20.0, 104.0, 300),
            },
            300,
        );
        assert_eq!(engine.active_index(), Some(1));
        assert_eq!(engine.phase(), CarouselPhase::Autoplaying);
    }

    #[test]
    fn failed_media_does_not_stop_autoplay() {
        let (mut engine, _) = mounted(3);
        let effects = engine.update(CarouselMessage::MediaFailed { index: 1 }, 10);
        assert!(effects.is_empty());
        assert!(engine.is_degraded(1));
        assert_eq!(engine.phase(), CarouselPhase::Autoplaying);
        engine.update(CarouselMessage::MediaLoaded { index: 1 }, 20);
        assert!(!engine.is_degraded(1));
    }

    #[test]
    fn banner_click_respects_controls() {
        let options = CarouselOptions {
            banner_target: Some("/tourist-inn-grand".into()),
            ..CarouselOptions::default()
        };
        let mut engine = CarouselEngine::new(slides(2), options);
        engine.mount(&MountContext::default(), 0);
        assert!(
            engine
                .update(CarouselMessage::BannerClicked { on_control: true }, 1)
                .is_empty()
        );
        assert_eq!(
            engine.update(CarouselMessage::BannerClicked { on_control: false }, 2),
            Effects::from(Effect::Open {
                url: "/tourist-inn-grand".into(),
                new_context: false
            })
        );
    }

    #[test]
    fn shrinking_slides_clamps_index() {
        let (mut engine, _) = mounted(3);
        engine.go_to(2, 0);
        engine.update(CarouselMessage::SlidesReplaced { slides: slides(2) }, 10);
        assert_eq!(engine.active_index(), Some(1));

        let effects = engine.update(CarouselMessage::SlidesReplaced { slides: vec![] }, 20);
        assert_eq!(engine.active_index(), None);
        assert_eq!(effects.cancelled().count(), 2);
        assert_eq!(engine.phase(), CarouselPhase::Inert);
    }

    #[test]
    fn unmount_cancels_everything() {
        let (mut engine, _) = mounted(3);
        let pending = engine.state().pending_timers();
        let effects = engine.unmount();
        let cancelled: Vec<_> = effects.cancelled().collect();
        assert_eq!(cancelled, pending);
        assert!(effects.contains(&Effect::Unlisten {
            listener: Listener::VisibilityChange
        }));
        assert!(engine.unmount().is_empty());
    }
}
