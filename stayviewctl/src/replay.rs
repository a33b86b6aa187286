//! Trace replay: drive an engine from a recorded list of inputs.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use stayview_core::runtime::{Engine, MountContext, TimerDriven};
use stayview_core::{
    CarouselEngine, CarouselMessage, CarouselOptions, Effect, Effects, LightboxEngine,
    LightboxMessage, LightboxOptions,
};
use stayview_model::{Millis, Photo, PhotoSet, Slide, TimerId, TimerKind};
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(tag = "engine", rename_all = "snake_case")]
pub enum Trace {
    Carousel {
        slides: Vec<Slide>,
        #[serde(default)]
        options: Option<CarouselOptions>,
        #[serde(default)]
        mount: MountSpec,
        events: Vec<Event<CarouselMessage>>,
    },
    Lightbox {
        photos: Vec<Photo>,
        #[serde(default)]
        options: Option<LightboxOptions>,
        #[serde(default)]
        mount: MountSpec,
        events: Vec<Event<LightboxMessage>>,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MountSpec {
    pub at: Millis,
    pub query: String,
    pub page_hidden: bool,
    pub prefers_reduced_motion: bool,
}

impl MountSpec {
    fn context(&self) -> MountContext {
        MountContext::with_query(self.query.clone())
            .hidden(self.page_hidden)
            .reduced_motion(self.prefers_reduced_motion)
    }
}

#[derive(Debug, Deserialize)]
pub struct Event<M> {
    pub at: Millis,
    #[serde(flatten)]
    pub input: Input<M>,
}

/// Either an engine message, or `{"fire": "<timer kind>"}` to fire the
/// oldest pending timer of that kind.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Input<M> {
    Fire { fire: TimerKind },
    Message(M),
}

#[derive(Debug, Serialize)]
pub struct Step {
    pub at: Millis,
    pub input: serde_json::Value,
    pub effects: Effects,
}

#[derive(Debug, Serialize)]
pub struct Replay {
    pub engine: &'static str,
    pub steps: Vec<Step>,
    /// Engine state after the last event, before unmount.
    pub final_index: Option<usize>,
}

pub fn load(path: &Path) -> anyhow::Result<Trace> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read trace {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid trace {}", path.display()))
}

pub fn run(
    trace: Trace,
    carousel_defaults: &CarouselOptions,
    lightbox_defaults: &LightboxOptions,
) -> anyhow::Result<Replay> {
    match trace {
        Trace::Carousel {
            slides,
            options,
            mount,
            events,
        } => {
            let slides = slides
                .into_iter()
                .enumerate()
                .map(|(i, slide)| revalidate_slide(slide).with_context(|| format!("slide {i}")))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let options = options.unwrap_or_else(|| carousel_defaults.clone());
            let mut engine = CarouselEngine::new(slides, options);
            let steps = drive(&mut engine, &mount, events)?;
            Ok(Replay {
                engine: "carousel",
                final_index: engine.active_index(),
                steps: finish(&mut engine, steps),
            })
        }
        Trace::Lightbox {
            photos,
            options,
            mount,
            events,
        } => {
            let photos = photos
                .into_iter()
                .map(revalidate_photo)
                .collect::<anyhow::Result<Vec<_>>>()?;
            let options = options.unwrap_or_else(|| lightbox_defaults.clone());
            let mut engine = LightboxEngine::new(PhotoSet::new(photos), options);
            let steps = drive(&mut engine, &mount, events)?;
            Ok(Replay {
                engine: "lightbox",
                final_index: engine.active_index(),
                steps: finish(&mut engine, steps),
            })
        }
    }
}

/// Deserialised slides skip constructor checks; run them again.
fn revalidate_slide(slide: Slide) -> anyhow::Result<Slide> {
    let Slide {
        media,
        caption,
        calls_to_action,
    } = slide;
    let mut rebuilt = Slide::new(media)?;
    if let Some(caption) = caption {
        rebuilt = rebuilt.with_caption(caption);
    }
    for cta in calls_to_action {
        rebuilt = rebuilt.with_cta(cta);
    }
    Ok(rebuilt)
}

/// Also re-derives the tag from the key.
fn revalidate_photo(photo: Photo) -> anyhow::Result<Photo> {
    let mut rebuilt = Photo::new(photo.key.clone(), photo.url)
        .with_context(|| format!("photo {:?}", photo.key))?
        .with_alt(photo.alt_text);
    if let Some(thumb) = photo.thumbnail_url {
        rebuilt = rebuilt.with_thumbnail(thumb);
    }
    Ok(rebuilt)
}

fn drive<E>(
    engine: &mut E,
    mount: &MountSpec,
    events: Vec<Event<E::Message>>,
) -> anyhow::Result<Vec<Step>>
where
    E: TimerDriven,
    E::Message: Serialize,
{
    let mut pending: BTreeMap<TimerId, TimerKind> = BTreeMap::new();
    let mut steps = Vec::with_capacity(events.len() + 2);
    let mut last = mount.at;

    let effects = engine.mount(&mount.context(), mount.at);
    track(&mut pending, &effects);
    steps.push(Step {
        at: mount.at,
        input: serde_json::json!({ "mount": mount.query }),
        effects,
    });

    for (i, event) in events.into_iter().enumerate() {
        if event.at < last {
            bail!("event {i} at {} ms goes back in time (previous {last} ms)", event.at);
        }
        last = event.at;

        let (input, effects) = match event.input {
            Input::Fire { fire } => {
                let input = serde_json::json!({ "fire": fire });
                let Some(id) = pending
                    .iter()
                    .find(|(_, kind)| **kind == fire)
                    .map(|(id, _)| *id)
                else {
                    debug!(?fire, at = event.at, "no pending timer to fire");
                    steps.push(Step {
                        at: event.at,
                        input,
                        effects: Effects::none(),
                    });
                    continue;
                };
                if !fire.is_repeating() {
                    pending.remove(&id);
                }
                (input, engine.update(E::timer_fired(id), event.at))
            }
            Input::Message(message) => {
                let input = serde_json::to_value(&message)?;
                (input, engine.update(message, event.at))
            }
        };
        track(&mut pending, &effects);
        steps.push(Step {
            at: event.at,
            input,
            effects,
        });
    }
    Ok(steps)
}

fn finish<E: Engine>(engine: &mut E, mut steps: Vec<Step>) -> Vec<Step> {
    let at = steps.last().map_or(0, |s| s.at);
    steps.push(Step {
        at,
        input: serde_json::json!("unmount"),
        effects: engine.unmount(),
    });
    steps
}

fn track(pending: &mut BTreeMap<TimerId, TimerKind>, effects: &Effects) {
    for effect in effects {
        match effect {
            Effect::ScheduleTimer { id, kind, .. } => {
                pending.insert(*id, *kind);
            }
            Effect::CancelTimer { id } => {
                pending.remove(id);
            }
            _ => {}
        }
    }
}
