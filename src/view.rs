//! Pure projection of the session state onto what the dashboard shows.
//!
//! The egui frame calls [`render`] on every repaint and only draws what the
//! returned [`DashboardView`] holds, so all behaviour is testable without a
//! window.

use anyhow::Result;

use crate::chart::{self, ChartSpec};
use crate::data::filter::ScoreRange;
use crate::data::model::{RegionRecord, ScoreColumn};
use crate::export;
use crate::state::{AppState, StatusMessage};

pub const SELECT_PROMPT: &str = "Please select SA3 regions from the list above.";
pub const EMPTY_FILTER_NOTE: &str = "No regions match the current score ranges.";

/// One sidebar range control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderView {
    pub column: ScoreColumn,
    pub range: ScoreRange,
}

#[derive(Debug, Clone)]
pub struct DashboardView<'a> {
    pub title: &'a str,
    pub sliders: Vec<SliderView>,
    /// Multi-select options: ids of the filtered regions, in table order.
    pub options: Vec<&'a str>,
    pub chart: Option<ChartSpec>,
    /// Shown instead of the chart when nothing is plotted.
    pub prompt: Option<&'static str>,
    /// Selected regions that pass the filters; empty when there is no chart.
    pub export_rows: Vec<&'a RegionRecord>,
    /// Current selection, in pick order, including hidden ids.
    pub selection: &'a [String],
    /// Selected ids hidden by the filters.
    pub hidden: Vec<&'a str>,
    pub total: usize,
    pub filters_active: bool,
    pub status: Option<&'a StatusMessage>,
}

impl DashboardView<'_> {
    pub fn matching(&self) -> usize {
        self.options.len()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.iter().any(|s| s == id)
    }

    pub fn empty_filter_note(&self) -> Option<&'static str> {
        self.options.is_empty().then_some(EMPTY_FILTER_NOTE)
    }

    /// CSV download contents; `None` while no chart is shown.
    pub fn csv_bytes(&self) -> Option<Result<Vec<u8>>> {
        self.chart.as_ref()?;
        Some(export::csv::encode(&self.export_rows))
    }

    /// PDF download contents; `None` while no chart is shown.
    pub fn pdf_bytes(&self) -> Option<Result<Vec<u8>>> {
        self.chart.as_ref().map(export::pdf::encode)
    }
}

/// Filter → select → chart, for the current state.
pub fn render<'a>(state: &'a AppState<'_>) -> DashboardView<'a> {
    let filtered = state.filtered_records();

    let sliders = ScoreColumn::ALL
        .into_iter()
        .map(|column| SliderView {
            column,
            range: state.filters.range(column),
        })
        .collect();

    let options = filtered.iter().map(|r| r.id.as_str()).collect();

    let chart = chart::build(&filtered, &state.selection, &ScoreColumn::ALL);
    let export_rows = if chart.is_some() {
        export::selected_rows(&filtered, &state.selection)
    } else {
        Vec::new()
    };
    let prompt = chart.is_none().then_some(SELECT_PROMPT);

    DashboardView {
        title: &state.title,
        sliders,
        options,
        chart,
        prompt,
        export_rows,
        selection: &state.selection,
        hidden: state.hidden_selection(),
        total: state.table.len(),
        filters_active: !state.filters.is_default(),
        status: state.status_message.as_ref(),
    }
}
