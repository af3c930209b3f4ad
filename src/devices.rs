//! Known serials plus the one the user picked.
//!
//! The selection is only ever a member of the known list: `select` refuses
//! unknown serials and `refresh` drops a selection whose device went away.

pub const SELECT_PLACEHOLDER: &str = "Select a device";
pub const NO_DEVICES_PLACEHOLDER: &str = "No devices connected";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Unchanged,
    /// The list changed but the selection, if any, is still present.
    Updated,
    /// The selected device is gone; the selection was cleared.
    SelectionLost,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceSelection {
    known: Vec<String>,
    selected: Option<String>,
}

impl DeviceSelection {
    /// Nothing selected until the user picks an entry.
    pub fn new(known: Vec<String>) -> Self {
        DeviceSelection {
            known,
            selected: None,
        }
    }

    pub fn known(&self) -> &[String] {
        &self.known
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_placeholder(entry: &str) -> bool {
        entry == SELECT_PLACEHOLDER || entry == NO_DEVICES_PLACEHOLDER
    }

    /// Picks a drop-down entry. Placeholders and stale serials clear the
    /// selection; returns the serial now selected.
    pub fn select(&mut self, entry: &str) -> Option<&str> {
        self.selected = if !Self::is_placeholder(entry) && self.known.iter().any(|k| k == entry) {
            Some(entry.to_string())
        } else {
            None
        };
        self.selected()
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn refresh(&mut self, serials: Vec<String>) -> RefreshOutcome {
        let lost = self
            .selected
            .as_ref()
            .is_some_and(|s| !serials.contains(s));
        let changed = serials != self.known;
        self.known = serials;
        if lost {
            self.selected = None;
            RefreshOutcome::SelectionLost
        } else if changed {
            RefreshOutcome::Updated
        } else {
            RefreshOutcome::Unchanged
        }
    }

    /// Drop-down contents: a prompt followed by the serials, or a single
    /// "no devices" entry.
    pub fn entries(&self) -> Vec<String> {
        if self.known.is_empty() {
            return vec![NO_DEVICES_PLACEHOLDER.to_string()];
        }
        std::iter::once(SELECT_PLACEHOLDER.to_string())
            .chain(self.known.iter().cloned())
            .collect()
    }

    /// Entry the drop-down should show as current.
    pub fn current_entry(&self) -> &str {
        match (&self.selected, self.known.is_empty()) {
            (Some(s), _) => s,
            (None, true) => NO_DEVICES_PLACEHOLDER,
            (None, false) => SELECT_PLACEHOLDER,
        }
    }
}
