//! Gallery photos and the ordered set the lightbox indexes into.

use std::fmt::{self, Display, Formatter};
use std::ops::Index;

use crate::error::{ModelError, Result};
use crate::sort::natural_cmp;

/// Coarse category inferred from an asset's file name, used for filter chips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PhotoTag {
    Rooms,
    Lobby,
    Bath,
    City,
    Dining,
    Interiors,
    #[default]
    Misc,
}

impl PhotoTag {
    pub const ALL: [PhotoTag; 7] = [
        Self::Rooms,
        Self::Lobby,
        Self::Bath,
        Self::City,
        Self::Dining,
        Self::Interiors,
        Self::Misc,
    ];

    /// First matching keyword wins; order matters ("bathroom" is Rooms).
    pub fn from_key(key: &str) -> Self {
        let name = key.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| name.contains(w));
        if has(&["room", "bed"]) {
            PhotoTag::Rooms
        } else if has(&["lobby", "reception"]) {
            PhotoTag::Lobby
        } else if has(&["bath", "wash", "toilet"]) {
            PhotoTag::Bath
        } else if has(&["city", "male"]) {
            PhotoTag::City
        } else if has(&["food", "breakfast"]) {
            PhotoTag::Dining
        } else if has(&["hall", "corridor"]) {
            PhotoTag::Interiors
        } else {
            PhotoTag::Misc
        }
    }

    /// Chip label, also the value written to the `tag` query parameter.
    pub fn label(self) -> &'static str {
        match self {
            PhotoTag::Rooms => "Rooms",
            PhotoTag::Lobby => "Lobby",
            PhotoTag::Bath => "Bath",
            PhotoTag::City => "City",
            PhotoTag::Dining => "Dining",
            PhotoTag::Interiors => "Interiors",
            PhotoTag::Misc => "Misc",
        }
    }

    /// Inverse of [`label`](Self::label), ignoring ASCII case.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|tag| tag.label().eq_ignore_ascii_case(label))
    }
}

impl Display for PhotoTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One gallery entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Photo {
    pub key: String,
    pub url: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub alt_text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub thumbnail_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tag: PhotoTag,
}

impl Photo {
    pub fn new(key: impl Into<String>, url: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let url = url.into();
        if key.trim().is_empty() {
            return Err(ModelError::EmptyKey);
        }
        if url.trim().is_empty() {
            return Err(ModelError::EmptyUrl("photo"));
        }
        let tag = PhotoTag::from_key(&key);
        Ok(Self {
            key,
            url,
            alt_text: String::new(),
            thumbnail_url: None,
            tag,
        })
    }

    pub fn with_alt(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = alt_text.into();
        self
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    /// Thumbnail when present, otherwise the full image.
    pub fn thumb_or_full(&self) -> &str {
        self.thumbnail_url.as_deref().unwrap_or(&self.url)
    }
}

/// Photos in natural key order. Construction sorts once; the set is
/// read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoSet {
    photos: Vec<Photo>,
}

impl PhotoSet {
    pub fn new(mut photos: Vec<Photo>) -> Self {
        // stable: duplicate keys keep their input order
        photos.sort_by(|a, b| natural_cmp(&a.key, &b.key));
        Self { photos }
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Photo> {
        self.photos.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Photo> {
        self.photos.iter()
    }

    pub fn as_slice(&self) -> &[Photo] {
        &self.photos
    }

    /// Tags that occur at least once, in `PhotoTag::ALL` order.
    pub fn present_tags(&self) -> Vec<PhotoTag> {
        PhotoTag::ALL
            .into_iter()
            .filter(|tag| self.photos.iter().any(|p| p.tag == *tag))
            .collect()
    }
}

impl Index<usize> for PhotoSet {
    type Output = Photo;

    fn index(&self, index: usize) -> &Self::Output {
        &self.photos[index]
    }
}

impl FromIterator<Photo> for PhotoSet {
    fn from_iter<T: IntoIterator<Item = Photo>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PhotoSet {
    type Item = &'a Photo;
    type IntoIter = std::slice::Iter<'a, Photo>;

    fn into_iter(self) -> Self::IntoIter {
        self.photos.iter()
    }
}
