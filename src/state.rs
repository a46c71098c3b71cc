use crate::config::DEFAULT_TITLE;
use crate::data::filter::{filtered_indices, FilterSpec, ScoreRange};
use crate::data::model::{RegionRecord, RegionTable, ScoreColumn};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering.
pub struct AppState<'t> {
    /// Loaded regions, shared for the whole session.
    pub table: &'t RegionTable,

    /// Per-column score ranges.
    pub filters: FilterSpec,

    /// Indices of regions passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Selected region ids, in the order they were picked. Ids hidden by the
    /// filters stay here and reappear when the filters widen.
    pub selection: Vec<String>,

    pub title: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<StatusMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

impl<'t> AppState<'t> {
    pub fn new(table: &'t RegionTable) -> Self {
        Self {
            table,
            filters: FilterSpec::default(),
            visible_indices: (0..table.len()).collect(),
            selection: Vec::new(),
            title: DEFAULT_TITLE.to_string(),
            status_message: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Recompute `visible_indices` after filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(self.table, &self.filters);
        log::debug!(
            "Filters {:?} → {} of {} regions",
            self.filters.active_columns().collect::<Vec<_>>(),
            self.visible_indices.len(),
            self.table.len()
        );
    }

    pub fn set_range(&mut self, column: ScoreColumn, range: ScoreRange) {
        if self.filters.range(column) != range {
            self.filters.set(column, range);
            self.refilter();
        }
    }

    pub fn reset_filters(&mut self) {
        if !self.filters.is_default() {
            self.filters.reset();
            self.refilter();
        }
    }

    /// Regions passing the filters, in table order.
    pub fn filtered_records(&self) -> Vec<&'t RegionRecord> {
        let table: &'t RegionTable = self.table;
        self.visible_indices
            .iter()
            .filter_map(|&i| table.get(i))
            .collect()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.iter().any(|s| s == id)
    }

    /// Add `id` to the selection if it passes the filters.
    pub fn select(&mut self, id: &str) {
        if self.is_selected(id) {
            return;
        }
        let visible = self
            .table
            .position(id)
            .is_some_and(|i| self.visible_indices.contains(&i));
        if visible {
            self.selection.push(id.to_string());
        } else {
            log::warn!("Ignoring selection of '{id}': not in the filtered table");
        }
    }

    pub fn deselect(&mut self, id: &str) {
        self.selection.retain(|s| s != id);
    }

    pub fn toggle_selection(&mut self, id: &str) {
        if self.is_selected(id) {
            self.deselect(id);
        } else {
            self.select(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected ids currently hidden by the filters.
    pub fn hidden_selection(&self) -> Vec<&str> {
        self.selection
            .iter()
            .filter(|id| {
                self.table
                    .position(id)
                    .map_or(true, |i| !self.visible_indices.contains(&i))
            })
            .map(String::as_str)
            .collect()
    }
}
