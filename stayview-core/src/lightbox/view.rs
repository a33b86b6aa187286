use serde::Serialize;
use stayview_model::{Photo, PhotoTag};

use super::engine::LightboxEngine;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail<'a> {
    pub index: usize,
    pub url: &'a str,
    pub alt_text: &'a str,
    pub active: bool,
}

/// Render model for an open lightbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightboxView<'a> {
    pub index: usize,
    pub photo: &'a Photo,
    pub tag: PhotoTag,
    /// "3 / 12"
    pub counter: String,
    pub alt_text: &'a str,
    pub slideshow_running: bool,
    pub thumbnails: Vec<Thumbnail<'a>>,
}

impl<'a> LightboxView<'a> {
    /// `None` while closed.
    pub(crate) fn build(engine: &'a LightboxEngine) -> Option<Self> {
        let index = engine.active_index()?;
        let photos = engine.photos();
        let photo = photos.get(index)?;

        let thumbnails = if engine.options().show_thumbnails {
            photos
                .iter()
                .enumerate()
                .map(|(i, p)| Thumbnail {
                    index: i,
                    url: p.thumb_or_full(),
                    alt_text: &p.alt_text,
                    active: i == index,
                })
                .collect()
        } else {
            Vec::new()
        };

        Some(Self {
            index,
            photo,
            tag: photo.tag,
            counter: format!("{} / {}", index + 1, photos.len()),
            alt_text: &photo.alt_text,
            slideshow_running: engine.slideshow_running(),
            thumbnails,
        })
    }
}
