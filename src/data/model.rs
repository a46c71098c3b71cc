use std::collections::BTreeMap;
use std::fmt;

/// Name of the region identifier column in the source sheet.
pub const ID_COLUMN: &str = "SA3";

/// Lowest and highest score a region can carry on any axis.
pub const SCORE_MIN: u8 = 1;
pub const SCORE_MAX: u8 = 5;

// ---------------------------------------------------------------------------
// ScoreColumn – the fixed, ordered set of scored attributes
// ---------------------------------------------------------------------------

/// One of the seven scored attributes of a region.
///
/// The declaration order is the axis order on the radar chart and the column
/// order of every export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScoreColumn {
    PriceChange10Y,
    PriceChange1M,
    InventoryNow,
    InventoryTrend,
    InventoryForecast,
    DaysOnMarket,
    DaysOnMarketForecast,
}

impl ScoreColumn {
    pub const COUNT: usize = 7;

    pub const ALL: [ScoreColumn; Self::COUNT] = [
        ScoreColumn::PriceChange10Y,
        ScoreColumn::PriceChange1M,
        ScoreColumn::InventoryNow,
        ScoreColumn::InventoryTrend,
        ScoreColumn::InventoryForecast,
        ScoreColumn::DaysOnMarket,
        ScoreColumn::DaysOnMarketForecast,
    ];

    /// Exact column header in the source sheet.
    pub fn header(self) -> &'static str {
        match self {
            ScoreColumn::PriceChange10Y => "10Y Price Change",
            ScoreColumn::PriceChange1M => "1M Price Change",
            ScoreColumn::InventoryNow => "Inventory Now",
            ScoreColumn::InventoryTrend => "Inventory trend",
            ScoreColumn::InventoryForecast => "Inventory Forecast",
            ScoreColumn::DaysOnMarket => "DOM",
            ScoreColumn::DaysOnMarketForecast => "Dom Forecast",
        }
    }

    /// Position of the column in [`ScoreColumn::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_header(header: &str) -> Option<ScoreColumn> {
        let header = header.trim();
        Self::ALL.into_iter().find(|c| c.header() == header)
    }
}

impl fmt::Display for ScoreColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// Scores – one value per ScoreColumn
// ---------------------------------------------------------------------------

/// The seven scores of a region, stored in [`ScoreColumn::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scores([u8; ScoreColumn::COUNT]);

impl Scores {
    /// Build from raw values in column order. Values must already lie in
    /// `SCORE_MIN..=SCORE_MAX`; the loader guarantees this.
    pub fn new(values: [u8; ScoreColumn::COUNT]) -> Self {
        debug_assert!(values.iter().all(|v| (SCORE_MIN..=SCORE_MAX).contains(v)));
        Scores(values)
    }

    pub fn get(&self, column: ScoreColumn) -> u8 {
        self.0[column.index()]
    }

    pub fn values(&self) -> &[u8; ScoreColumn::COUNT] {
        &self.0
    }

    /// Iterate `(column, value)` pairs in axis order.
    pub fn iter(&self) -> impl Iterator<Item = (ScoreColumn, u8)> + '_ {
        ScoreColumn::ALL.into_iter().zip(self.0.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// RegionRecord – one row of the sheet
// ---------------------------------------------------------------------------

/// A single scored region (one row of the source sheet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRecord {
    /// SA3 region name, unique within a table.
    pub id: String,
    pub scores: Scores,
}

impl RegionRecord {
    pub fn new(id: impl Into<String>, scores: [u8; ScoreColumn::COUNT]) -> Self {
        RegionRecord {
            id: id.into(),
            scores: Scores::new(scores),
        }
    }

    pub fn score(&self, column: ScoreColumn) -> u8 {
        self.scores.get(column)
    }
}

// ---------------------------------------------------------------------------
// RegionTable – the complete loaded sheet
// ---------------------------------------------------------------------------

/// All regions in source order, with an id index.
#[derive(Debug, Clone, Default)]
pub struct RegionTable {
    records: Vec<RegionRecord>,
    by_id: BTreeMap<String, usize>,
}

impl RegionTable {
    /// Build the table, returning the offending id if one appears twice.
    pub fn from_records(records: Vec<RegionRecord>) -> Result<Self, String> {
        let mut by_id = BTreeMap::new();
        for (i, rec) in records.iter().enumerate() {
            if by_id.insert(rec.id.clone(), i).is_some() {
                return Err(rec.id.clone());
            }
        }
        Ok(RegionTable { records, by_id })
    }

    pub fn records(&self) -> &[RegionRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&RegionRecord> {
        self.records.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn find(&self, id: &str) -> Option<&RegionRecord> {
        self.position(id).map(|i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_in_axis_order() {
        let headers: Vec<&str> = ScoreColumn::ALL.iter().map(|c| c.header()).collect();
        assert_eq!(
            headers,
            [
                "10Y Price Change",
                "1M Price Change",
                "Inventory Now",
                "Inventory trend",
                "Inventory Forecast",
                "DOM",
                "Dom Forecast",
            ]
        );
        for (i, c) in ScoreColumn::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn header_lookup_trims_whitespace() {
        assert_eq!(ScoreColumn::from_header(" DOM "), Some(ScoreColumn::DaysOnMarket));
        assert_eq!(ScoreColumn::from_header("dom"), None);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let recs = vec![
            RegionRecord::new("Sydney Inner City", [1; 7]),
            RegionRecord::new("Sydney Inner City", [2; 7]),
        ];
        assert_eq!(
            RegionTable::from_records(recs).unwrap_err(),
            "Sydney Inner City"
        );
    }

    #[test]
    fn lookup_by_id() {
        let table = RegionTable::from_records(vec![
            RegionRecord::new("A", [1; 7]),
            RegionRecord::new("B", [5, 4, 3, 5, 2, 1, 4]),
        ])
        .unwrap();
        assert_eq!(table.position("B"), Some(1));
        assert_eq!(table.find("B").unwrap().score(ScoreColumn::InventoryNow), 3);
        assert!(table.find("C").is_none());
    }
}
