//! Series visibility toggles.
//!
//! Toggles are keyed by series name, not by position, so a visibility change
//! always lands on the series it was made for even if grouping order shifts
//! between fetches.

/// One checkbox + label pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesToggle {
    pub name: String,
    pub checked: bool,
}

/// The toggle panel: an ordered set of per-series checkboxes and a cursor.
#[derive(Debug, Clone, Default)]
pub struct ToggleSet {
    toggles: Vec<SeriesToggle>,
    cursor: usize,
}

impl ToggleSet {
    /// Replace the whole set with one checked toggle per series name.
    pub fn rebuild(&mut self, names: impl IntoIterator<Item = String>) {
        self.toggles = names
            .into_iter()
            .map(|name| SeriesToggle {
                name,
                checked: true,
            })
            .collect();
        self.cursor = 0;
    }

    /// Remove all toggles.
    pub fn clear(&mut self) {
        self.toggles.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.toggles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toggles.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesToggle> {
        self.toggles.iter()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Name of the toggle under the cursor.
    pub fn current_name(&self) -> Option<&str> {
        self.toggles.get(self.cursor).map(|t| t.name.as_str())
    }

    pub fn is_checked(&self, name: &str) -> Option<bool> {
        self.toggles.iter().find(|t| t.name == name).map(|t| t.checked)
    }

    /// Set one toggle by series name; unknown names are ignored.
    pub fn set(&mut self, name: &str, checked: bool) {
        if let Some(t) = self.toggles.iter_mut().find(|t| t.name == name) {
            t.checked = checked;
        }
    }

    pub fn cursor_next(&mut self) {
        if self.toggles.is_empty() {
            return;
        }
        self.cursor = if self.cursor >= self.toggles.len() - 1 {
            0
        } else {
            self.cursor + 1
        };
    }

    pub fn cursor_prev(&mut self) {
        if self.toggles.is_empty() {
            return;
        }
        self.cursor = if self.cursor == 0 {
            self.toggles.len() - 1
        } else {
            self.cursor - 1
        };
    }
}
