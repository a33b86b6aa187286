//! Gallery grid filtering by tag chip and search text.
//!
//! The filter lives in the query string next to `lightbox=` as `tag=<Label>`
//! and `q=<text>`. Positions in the filtered grid map back to indices in the
//! full photo set, which is what the lightbox navigates.

use serde::Serialize;
use stayview_model::{Photo, PhotoSet, PhotoTag};
use url::form_urlencoded;

pub const TAG_KEY: &str = "tag";
pub const SEARCH_KEY: &str = "q";

/// Active chip and search text. `tag: None` is the "All" chip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GalleryFilter {
    pub tag: Option<PhotoTag>,
    pub query: String,
}

impl GalleryFilter {
    pub fn new(tag: Option<PhotoTag>, query: impl Into<String>) -> Self {
        Self {
            tag,
            query: query.into(),
        }
    }

    /// Tag must match the chip, and the key or tag label must contain the
    /// trimmed, lower-cased search text.
    pub fn matches(&self, photo: &Photo) -> bool {
        if self.tag.is_some_and(|tag| tag != photo.tag) {
            return false;
        }
        let term = self.query.trim().to_lowercase();
        term.is_empty()
            || photo.key.to_lowercase().contains(&term)
            || photo.tag.label().to_lowercase().contains(&term)
    }

    pub fn apply<'a>(&self, photos: &'a PhotoSet) -> FilteredPhotos<'a> {
        let indices = photos
            .iter()
            .enumerate()
            .filter(|(_, photo)| self.matches(photo))
            .map(|(i, _)| i)
            .collect();
        FilteredPhotos { photos, indices }
    }

    /// Filter described by `query`. An unknown or `All` tag means no chip.
    pub fn from_query(query: &str) -> Self {
        let mut filter = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if key == TAG_KEY && filter.tag.is_none() {
                filter.tag = PhotoTag::from_label(&value);
            } else if key == SEARCH_KEY && filter.query.is_empty() {
                filter.query = value.into_owned();
            }
        }
        filter
    }

    /// Rewrite `existing` to carry this filter. Empty parts are removed,
    /// everything else keeps its position.
    pub fn to_query(&self, existing: &str) -> String {
        let tag = self.tag.map(PhotoTag::label);
        let search = (!self.query.is_empty()).then_some(self.query.as_str());
        let existing = existing.strip_prefix('?').unwrap_or(existing);

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        let (mut tag_written, mut search_written) = (false, false);
        for (key, value) in form_urlencoded::parse(existing.as_bytes()) {
            let (slot, written) = match key.as_ref() {
                TAG_KEY => (tag, &mut tag_written),
                SEARCH_KEY => (search, &mut search_written),
                _ => {
                    serializer.append_pair(&key, &value);
                    continue;
                }
            };
            if let (Some(v), false) = (slot, *written) {
                serializer.append_pair(&key, v);
            }
            *written = true;
        }
        if let (Some(v), false) = (tag, tag_written) {
            serializer.append_pair(TAG_KEY, v);
        }
        if let (Some(v), false) = (search, search_written) {
            serializer.append_pair(SEARCH_KEY, v);
        }
        serializer.finish()
    }
}

/// Grid contents for one filter: matching photos in display order.
#[derive(Debug, Clone)]
pub struct FilteredPhotos<'a> {
    photos: &'a PhotoSet,
    indices: Vec<usize>,
}

impl<'a> FilteredPhotos<'a> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Size of the unfiltered set.
    pub fn total(&self) -> usize {
        self.photos.len()
    }

    /// Index in the full set of the photo at grid `position`.
    pub fn full_index(&self, position: usize) -> Option<usize> {
        self.indices.get(position).copied()
    }

    /// `(full index, photo)` pairs in grid order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a Photo)> + '_ {
        let photos = self.photos;
        self.indices.iter().map(move |&i| (i, &photos[i]))
    }

    /// "3 / 12 photos"
    pub fn summary(&self) -> String {
        format!("{} / {} photos", self.len(), self.total())
    }
}

/// Chip row: `None` for "All", then every tag present in the set.
pub fn tag_chips(photos: &PhotoSet) -> Vec<Option<PhotoTag>> {
    std::iter::once(None)
        .chain(photos.present_tags().into_iter().map(Some))
        .collect()
}
