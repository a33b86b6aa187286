//! Render model for the carousel.
//!
//! Built on demand from the engine; it borrows slides and never outlives the
//! engine that produced it.

use std::time::Duration;

use serde::Serialize;
use stayview_model::{Caption, CallToAction, Millis, SlideMedia};

use super::engine::CarouselEngine;
use super::state::CarouselPhase;
use crate::serde_helpers::duration_ms;

/// One stacked slide layer. All slides render; only the active one is
/// visible and exposed to assistive technology.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideFrame<'a> {
    pub index: usize,
    pub media: &'a SlideMedia,
    pub active: bool,
    pub aria_hidden: bool,
    /// Media failed to load; render the background only.
    pub degraded: bool,
    /// Progress bar fill in `[0, 1]`. Zero for every slide but the active one.
    pub progress: f32,
    pub dot_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselView<'a> {
    pub active_index: usize,
    pub phase: CarouselPhase,
    pub frames: Vec<SlideFrame<'a>>,
    pub caption: Option<&'a Caption>,
    pub calls_to_action: Vec<&'a CallToAction>,
    #[serde(rename = "transition_ms", with = "duration_ms")]
    pub transition: Duration,
    /// Image of the upcoming slide, for the host to warm.
    pub preload_next: Option<&'a str>,
    pub show_dots: bool,
    pub show_arrows: bool,
    pub show_progress: bool,
    pub banner_target: Option<&'a str>,
}

impl<'a> CarouselView<'a> {
    pub(crate) fn build(engine: &'a CarouselEngine, now: Millis) -> Option<Self> {
        let slides = engine.slides();
        let active_index = engine.active_index()?;
        let options = engine.options();
        let progress = active_progress(engine, now);
        let multi = slides.len() > 1;

        let frames = slides
            .iter()
            .enumerate()
            .map(|(index, slide)| {
                let active = index == active_index;
                SlideFrame {
                    index,
                    media: &slide.media,
                    active,
                    aria_hidden: !active,
                    degraded: engine.is_degraded(index),
                    progress: if active { progress } else { 0.0 },
                    dot_label: format!("Go to slide {}", index + 1),
                }
            })
            .collect();

        let active = &slides[active_index];
        let preload_next = multi
            .then(|| slides[(active_index + 1) % slides.len()].media.preload_url())
            .flatten();

        Some(Self {
            active_index,
            phase: engine.phase(),
            frames,
            caption: active.caption.as_ref(),
            calls_to_action: options.cta_policy.resolve(&active.calls_to_action),
            transition: options.transition_duration,
            preload_next,
            show_dots: options.show_dots && multi,
            show_arrows: options.show_arrows && multi,
            show_progress: options.show_progress && multi,
            banner_target: options.banner_target.as_deref(),
        })
    }
}

/// Elapsed fraction of the current interval; zero unless autoplaying.
fn active_progress(engine: &CarouselEngine, now: Millis) -> f32 {
    let Some(cycle) = engine.cycle() else {
        return 0.0;
    };
    let interval = engine.options().auto_advance_interval.as_millis();
    if interval == 0 {
        return 0.0;
    }
    let elapsed = now.saturating_sub(cycle.started_at) as f64;
    (elapsed / interval as f64).clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::{CarouselMessage, CarouselOptions};
    use crate::runtime::{Engine, MountContext};
    use stayview_model::Slide;

    fn engine(n: usize) -> CarouselEngine {
        let slides: Vec<_> = (0..n)
            .map(|i| {
                Slide::new(SlideMedia::image(format!("/hero/{i}.jpg"), "Hero"))
                    .unwrap()
                    .with_cta(CallToAction::new("Book", "#book").unwrap())
            })
            .collect();
        let mut engine = CarouselEngine::new(slides, CarouselOptions::default());
        engine.mount(&MountContext::default(), 1_000);
        engine
    }

    #[test]
    fn empty_carousel_renders_nothing() {
        let engine = CarouselEngine::new(Vec::new(), CarouselOptions::default());
        assert!(engine.view(0).is_none());
    }

    #[test]
    fn exactly_one_frame_is_visible() {
        let engine = engine(3);
        let view = engine.view(1_000).unwrap();
        let visible: Vec<_> = view.frames.iter().filter(|f| !f.aria_hidden).collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].index, 0);
        assert_eq!(view.frames[2].dot_label, "Go to slide 3");
        assert_eq!(view.preload_next, Some("/hero/1.jpg"));
        assert_eq!(view.calls_to_action.len(), 1);
    }

    #[test]
    fn progress_tracks_interval_and_stops_when_paused() {
        let mut engine = engine(3);
        let view = engine.view(4_000).unwrap();
        assert!((view.frames[0].progress - 0.5).abs() < f32::EPSILON);
        assert_eq!(view.frames[1].progress, 0.0);
        assert_eq!(engine.view(60_000).unwrap().frames[0].progress, 1.0);

        engine.update(CarouselMessage::PointerEntered, 4_000);
        assert_eq!(engine.view(5_000).unwrap().frames[0].progress, 0.0);
    }

    #[test]
    fn single_slide_hides_navigation() {
        let engine = engine(1);
        let view = engine.view(0).unwrap();
        assert!(!view.show_dots && !view.show_arrows);
        assert_eq!(view.preload_next, None);
    }
}
