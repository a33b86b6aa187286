//! Dialog focus management
//!
//! Tracks the dialog's focusable controls so keyboard focus cannot escape an
//! open modal, and remembers which control opened it so focus can go back.

use stayview_model::ControlId;

/// Focus trap over an ordered list of focusable controls.
///
/// Tab from the last control wraps to the first and Shift+Tab from the first
/// wraps to the last. Focus outside the dialog is pulled back in. Anything
/// else is left to the host's native tab order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusTrap {
    controls: Vec<ControlId>,
}

impl FocusTrap {
    pub fn new(controls: Vec<ControlId>) -> Self {
        Self { controls }
    }

    pub fn controls(&self) -> &[ControlId] {
        &self.controls
    }

    /// Control that receives focus when the dialog opens.
    pub fn initial(&self) -> Option<&ControlId> {
        self.controls.first()
    }

    /// Where focus must move for a Tab press, or `None` when the native
    /// order already keeps focus inside.
    pub fn on_tab(
        &self,
        focused: Option<&ControlId>,
        shift: bool,
    ) -> Option<&ControlId> {
        let first = self.controls.first()?;
        let last = self.controls.last()?;

        let inside = focused.is_some_and(|f| self.controls.contains(f));
        if !inside {
            return Some(if shift { last } else { first });
        }

        match (focused, shift) {
            (Some(f), true) if f == first => Some(last),
            (Some(f), false) if f == last => Some(first),
            _ => None,
        }
    }
}

/// Remembers the control that opened a dialog.
#[derive(Debug, Clone, Default)]
pub struct FocusReturn {
    trigger: Option<ControlId>,
}

impl FocusReturn {
    pub fn capture(&mut self, trigger: Option<ControlId>) {
        self.trigger = trigger;
    }

    /// Take the captured trigger; a second call yields `None`.
    pub fn release(&mut self) -> Option<ControlId> {
        self.trigger.take()
    }
}
