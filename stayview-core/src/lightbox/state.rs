use serde::{Deserialize, Serialize};

/// Whether the lightbox is open and which photo it shows.
///
/// `active_index` is always within the photo set; when the set is empty the
/// lightbox stays closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LightboxState {
    pub is_open: bool,
    pub active_index: usize,
}

impl LightboxState {
    /// Index shown, if open.
    pub fn open_index(&self) -> Option<usize> {
        self.is_open.then_some(self.active_index)
    }
}
