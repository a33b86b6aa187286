use serde::{Deserialize, Serialize};
use stayview_model::{ControlId, Photo, PhotoTag, TimerId};

use crate::input::{KeyEvent, TouchPoint};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "message", rename_all = "snake_case")]
pub enum LightboxMessage {
    /// A thumbnail or "view photos" button was activated.
    Open {
        index: i64,
        #[serde(default)]
        trigger: Option<ControlId>,
    },
    Close,
    Next,
    Previous,
    /// Thumbnail strip selection while open.
    Select {
        index: i64,
    },
    Key {
        event: KeyEvent,
    },
    TouchStart {
        point: TouchPoint,
    },
    TouchMove {
        point: TouchPoint,
    },
    TouchEnd {
        point: TouchPoint,
    },
    TouchCancel,
    TimerFired {
        id: TimerId,
    },
    ToggleSlideshow,
    PhotosReplaced {
        photos: Vec<Photo>,
    },
    /// Tag chip pressed; `None` is "All".
    FilterTag {
        #[serde(default)]
        tag: Option<PhotoTag>,
    },
    Search {
        query: String,
    },
    /// A grid tile was activated; `position` counts filtered tiles.
    OpenFiltered {
        position: usize,
        #[serde(default)]
        trigger: Option<ControlId>,
    },
}
