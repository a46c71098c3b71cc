//! Radar chart description: which regions are drawn, with which values, on
//! which axes. Renderers (screen, PDF) only read a [`ChartSpec`].

pub mod geometry;

use crate::color::{trace_color, Rgb8};
use crate::data::model::{RegionRecord, ScoreColumn, SCORE_MAX, SCORE_MIN};

pub const CHART_TITLE: &str = "Radar Chart: SA3 Comparison";

/// Radial axis settings. The range never follows the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialAxis {
    pub range: (f64, f64),
    pub visible: bool,
}

impl Default for RadialAxis {
    fn default() -> Self {
        RadialAxis {
            range: (f64::from(SCORE_MIN), f64::from(SCORE_MAX)),
            visible: true,
        }
    }
}

/// One filled polygon: a region's scores around the axes.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarTrace {
    /// Legend label (the region id).
    pub name: String,
    /// Radial values in axis order.
    pub values: Vec<f64>,
    pub fill: bool,
    pub color: Rgb8,
}

impl RadarTrace {
    /// Polygon vertices on the unit circle, first vertex repeated at the end.
    pub fn outline(&self, radial: &RadialAxis) -> Vec<[f64; 2]> {
        let n = self.values.len();
        let mut pts: Vec<[f64; 2]> = self
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| geometry::polar_point(v, i, n, radial))
            .collect();
        if let Some(&first) = pts.first() {
            pts.push(first);
        }
        pts
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    /// Angular labels, one per axis.
    pub axes: Vec<&'static str>,
    pub traces: Vec<RadarTrace>,
    pub radial_axis: RadialAxis,
    pub show_legend: bool,
}

impl ChartSpec {
    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    /// Tick values for the grid rings (every whole score).
    pub fn ring_levels(&self) -> Vec<f64> {
        let (lo, hi) = self.radial_axis.range;
        let mut levels = Vec::new();
        let mut v = lo.ceil();
        while v <= hi {
            levels.push(v);
            v += 1.0;
        }
        levels
    }
}

/// Build the chart for the selected regions that survive the filter.
///
/// Traces follow the order of `selected`; ids missing from `filtered` and
/// repeated ids are skipped. Returns `None` when nothing is left to draw.
pub fn build(
    filtered: &[&RegionRecord],
    selected: &[String],
    columns: &[ScoreColumn],
) -> Option<ChartSpec> {
    let mut traces: Vec<RadarTrace> = Vec::with_capacity(selected.len());

    for id in selected {
        if traces.iter().any(|t| &t.name == id) {
            continue;
        }
        let Some(record) = filtered.iter().find(|r| &r.id == id) else {
            log::debug!("Selected region '{id}' is filtered out, not plotted");
            continue;
        };
        traces.push(RadarTrace {
            name: record.id.clone(),
            values: columns
                .iter()
                .map(|&c| f64::from(record.score(c)))
                .collect(),
            fill: true,
            color: trace_color(traces.len()),
        });
    }

    if traces.is_empty() {
        return None;
    }

    Some(ChartSpec {
        title: CHART_TITLE.to_string(),
        axes: columns.iter().map(|c| c.header()).collect(),
        traces,
        radial_axis: RadialAxis::default(),
        show_legend: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<RegionRecord> {
        vec![
            RegionRecord::new("R1", [5, 4, 3, 5, 2, 1, 4]),
            RegionRecord::new("R2", [1, 2, 3, 4, 5, 4, 3]),
            RegionRecord::new("R3", [3; 7]),
        ]
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_selection_builds_nothing() {
        let recs = records();
        let filtered: Vec<&RegionRecord> = recs.iter().collect();
        assert!(build(&filtered, &[], &ScoreColumn::ALL).is_none());
    }

    #[test]
    fn one_trace_per_selected_region_in_selection_order() {
        let recs = records();
        let filtered: Vec<&RegionRecord> = recs.iter().collect();
        let chart = build(&filtered, &ids(&["R2", "R1"]), &ScoreColumn::ALL).unwrap();

        assert_eq!(chart.traces.len(), 2);
        assert_eq!(chart.traces[0].name, "R2");
        assert_eq!(chart.traces[1].name, "R1");
        assert_eq!(chart.traces[1].values, vec![5.0, 4.0, 3.0, 5.0, 2.0, 1.0, 4.0]);
        assert!(chart.traces.iter().all(|t| t.fill && t.values.len() == 7));
        assert_eq!(chart.axes[0], "10Y Price Change");
        assert_eq!(chart.axes[6], "Dom Forecast");
        assert_eq!(chart.radial_axis.range, (1.0, 5.0));
        assert!(chart.radial_axis.visible && chart.show_legend);
        assert_eq!(chart.title, CHART_TITLE);
    }

    #[test]
    fn filtered_out_selection_is_skipped() {
        let recs = records();
        let filtered: Vec<&RegionRecord> = recs.iter().filter(|r| r.id != "R1").collect();
        let chart = build(&filtered, &ids(&["R1", "R3"]), &ScoreColumn::ALL).unwrap();
        let names: Vec<&str> = chart.traces.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["R3"]);

        assert!(build(&filtered, &ids(&["R1"]), &ScoreColumn::ALL).is_none());
    }

    #[test]
    fn repeated_ids_are_drawn_once() {
        let recs = records();
        let filtered: Vec<&RegionRecord> = recs.iter().collect();
        let chart = build(&filtered, &ids(&["R3", "R3"]), &ScoreColumn::ALL).unwrap();
        assert_eq!(chart.traces.len(), 1);
    }

    #[test]
    fn outline_is_closed_and_rings_cover_every_score() {
        let recs = records();
        let filtered: Vec<&RegionRecord> = recs.iter().collect();
        let chart = build(&filtered, &ids(&["R1"]), &ScoreColumn::ALL).unwrap();
        let outline = chart.traces[0].outline(&chart.radial_axis);
        assert_eq!(outline.len(), 8);
        assert_eq!(outline[0], outline[7]);
        assert_eq!(chart.ring_levels(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }
}
