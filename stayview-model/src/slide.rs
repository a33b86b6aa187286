//! Carousel slide records. Pages build these from static configuration and
//! hand them to the carousel engine, which never mutates them.

use crate::error::{ModelError, Result};

/// The single media item a slide displays.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SlideMedia {
    Image { url: String, alt_text: String },
    Video { url: String },
}

impl SlideMedia {
    pub fn image(url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        SlideMedia::Image {
            url: url.into(),
            alt_text: alt_text.into(),
        }
    }

    pub fn video(url: impl Into<String>) -> Self {
        SlideMedia::Video { url: url.into() }
    }

    pub fn url(&self) -> &str {
        match self {
            SlideMedia::Image { url, .. } | SlideMedia::Video { url } => url,
        }
    }

    /// Image URL suitable for a preload hint. Videos are not preloaded.
    pub fn preload_url(&self) -> Option<&str> {
        match self {
            SlideMedia::Image { url, .. } => Some(url),
            SlideMedia::Video { .. } => None,
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, SlideMedia::Video { .. })
    }
}

/// Overlay text shown on top of a slide. Each line is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Caption {
    pub eyebrow: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

impl Caption {
    pub fn is_empty(&self) -> bool {
        self.eyebrow.is_none() && self.title.is_none() && self.subtitle.is_none()
    }
}

/// Visual weight of a call-to-action button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CtaVariant {
    #[default]
    Primary,
    Ghost,
}

/// A link button rendered over a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallToAction {
    pub label: String,
    pub target_url: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub opens_new_context: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub variant: CtaVariant,
}

impl CallToAction {
    pub fn new(
        label: impl Into<String>,
        target_url: impl Into<String>,
    ) -> Result<Self> {
        let label = label.into();
        let target_url = target_url.into();
        if label.trim().is_empty() {
            return Err(ModelError::EmptyLabel);
        }
        if target_url.trim().is_empty() {
            return Err(ModelError::EmptyUrl("call to action"));
        }
        Ok(Self {
            label,
            target_url,
            opens_new_context: false,
            variant: CtaVariant::Primary,
        })
    }

    /// Open in a new browsing context (external booking/messaging targets).
    pub fn external(mut self) -> Self {
        self.opens_new_context = true;
        self
    }

    pub fn ghost(mut self) -> Self {
        self.variant = CtaVariant::Ghost;
        self
    }

    /// In-page anchors (`#rooms`) scroll instead of navigating.
    pub fn is_anchor(&self) -> bool {
        self.target_url.starts_with('#')
    }

    /// Site-relative routes go through the router rather than a full load.
    pub fn is_route(&self) -> bool {
        self.target_url.starts_with('/')
    }
}

/// One carousel frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slide {
    pub media: SlideMedia,
    #[cfg_attr(feature = "serde", serde(default))]
    pub caption: Option<Caption>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub calls_to_action: Vec<CallToAction>,
}

impl Slide {
    pub fn new(media: SlideMedia) -> Result<Self> {
        if media.url().trim().is_empty() {
            return Err(ModelError::EmptyUrl("slide media"));
        }
        Ok(Self {
            media,
            caption: None,
            calls_to_action: Vec::new(),
        })
    }

    pub fn with_caption(mut self, caption: Caption) -> Self {
        self.caption = (!caption.is_empty()).then_some(caption);
        self
    }

    pub fn with_cta(mut self, cta: CallToAction) -> Self {
        self.calls_to_action.push(cta);
        self
    }
}
