use std::time::Duration;

use serde::{Deserialize, Serialize};
use stayview_model::ControlId;

use crate::gesture::SwipeConfig;
use crate::serde_helpers::duration_ms;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightboxOptions {
    /// Focusable dialog controls in tab order. The first one receives focus
    /// when the dialog opens.
    pub dialog_controls: Vec<ControlId>,
    /// Whether `a` toggles the slideshow.
    pub slideshow: bool,
    #[serde(rename = "slideshow_interval_ms", with = "duration_ms")]
    pub slideshow_interval: Duration,
    pub show_thumbnails: bool,
    pub swipe: SwipeConfig,
}

impl Default for LightboxOptions {
    fn default() -> Self {
        Self {
            dialog_controls: vec![
                ControlId::new("lightbox-close"),
                ControlId::new("lightbox-prev"),
                ControlId::new("lightbox-next"),
            ],
            slideshow: true,
            slideshow_interval: Duration::from_millis(3_500),
            show_thumbnails: true,
            swipe: SwipeConfig::default(),
        }
    }
}
