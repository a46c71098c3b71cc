//! Download encoders. Both are pure: they take the already filtered and
//! selected data and return the file contents.

pub mod csv;
pub mod pdf;

use crate::data::model::RegionRecord;

pub const CSV_FILE_NAME: &str = "selected_sa3s.csv";
pub const PDF_FILE_NAME: &str = "radar_chart.pdf";

/// Filtered records whose id is selected, in filtered-table order.
pub fn selected_rows<'a>(
    filtered: &[&'a RegionRecord],
    selected: &[String],
) -> Vec<&'a RegionRecord> {
    filtered
        .iter()
        .copied()
        .filter(|r| selected.iter().any(|id| id == &r.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_table_order_and_drops_unknown_ids() {
        let recs = [
            RegionRecord::new("A", [1; 7]),
            RegionRecord::new("B", [2; 7]),
            RegionRecord::new("C", [3; 7]),
        ];
        let filtered: Vec<&RegionRecord> = recs.iter().collect();
        let selected = vec!["C".to_string(), "Gone".to_string(), "A".to_string()];
        let ids: Vec<&str> = selected_rows(&filtered, &selected)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, ["A", "C"]);
    }
}
