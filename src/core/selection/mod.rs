//! Selection tracking
//!
//! Holds the set of selected record identifiers and projects the toolbar /
//! header-checkbox state the hosting view renders. The tracker itself is
//! plain in-memory state; presentation happens through the refresh listener
//! so every write path stays in one adapter.

use super::record::RecordId;
use std::collections::HashSet;

/// Header checkbox state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    /// Nothing selected
    Unchecked,
    /// Every visible row selected
    Checked,
    /// Some but not all visible rows selected
    Indeterminate,
}

/// Projection of the selection for the hosting view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionView {
    /// Selected record count
    pub count: usize,
    /// Toolbar is shown iff the selection is non-empty
    pub toolbar_visible: bool,
    /// Header checkbox tri-state
    pub header: HeaderState,
}

/// Callback invoked after every selection mutation
pub type RefreshListener = Box<dyn Fn(&SelectionView) + Send + Sync>;

/// Tracks the set of selected records
#[derive(Default)]
pub struct SelectionTracker {
    selected: HashSet<RecordId>,
    visible_rows: usize,
    listener: Option<RefreshListener>,
}

impl SelectionTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the UI refresh listener
    pub fn with_listener(mut self, listener: impl Fn(&SelectionView) + Send + Sync + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Record how many rows the view currently shows; drives the header
    /// tri-state. Does not notify on its own.
    pub fn set_visible_rows(&mut self, visible_rows: usize) {
        self.visible_rows = visible_rows;
    }

    /// Toggle one record; returns whether it is selected afterwards
    pub fn toggle(&mut self, id: RecordId) -> bool {
        let now_selected = if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        };
        self.notify();
        now_selected
    }

    /// Replace the selection with the given records
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = RecordId>) {
        self.selected = ids.into_iter().collect();
        self.notify();
    }

    /// Empty the selection
    pub fn clear(&mut self) {
        self.selected.clear();
        self.notify();
    }

    /// Current selection size
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Check membership
    pub fn contains(&self, id: &RecordId) -> bool {
        self.selected.contains(id)
    }

    /// Snapshot the selection for a bulk invocation. The snapshot is
    /// independent of later tracker mutations; a running job never reads
    /// the tracker again.
    pub fn snapshot(&self) -> Vec<RecordId> {
        self.selected.iter().cloned().collect()
    }

    /// Project the current state for the hosting view
    pub fn view(&self) -> SelectionView {
        let count = self.selected.len();
        let header = if count == 0 {
            HeaderState::Unchecked
        } else if self.visible_rows > 0 && count == self.visible_rows {
            HeaderState::Checked
        } else {
            HeaderState::Indeterminate
        };
        SelectionView {
            count,
            toolbar_visible: count > 0,
            header,
        }
    }

    fn notify(&self) {
        if let Some(listener) = &self.listener {
            listener(&self.view());
        }
    }
}

impl std::fmt::Debug for SelectionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionTracker")
            .field("count", &self.selected.len())
            .field("visible_rows", &self.visible_rows)
            .finish()
    }
}
