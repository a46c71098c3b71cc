use super::model::{RegionRecord, RegionTable, ScoreColumn, SCORE_MAX, SCORE_MIN};

// ---------------------------------------------------------------------------
// ScoreRange – closed interval on one score column
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` interval, always inside `[SCORE_MIN, SCORE_MAX]`
/// with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreRange {
    min: u8,
    max: u8,
}

impl ScoreRange {
    pub const FULL: ScoreRange = ScoreRange {
        min: SCORE_MIN,
        max: SCORE_MAX,
    };

    /// Clamp both bounds into the score domain; swapped bounds are reordered.
    pub fn new(min: u8, max: u8) -> Self {
        let a = min.clamp(SCORE_MIN, SCORE_MAX);
        let b = max.clamp(SCORE_MIN, SCORE_MAX);
        ScoreRange {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    /// Move the lower bound; the upper bound follows if it would be crossed.
    pub fn with_min(self, min: u8) -> Self {
        let min = min.clamp(SCORE_MIN, SCORE_MAX);
        ScoreRange {
            min,
            max: self.max.max(min),
        }
    }

    /// Move the upper bound; the lower bound follows if it would be crossed.
    pub fn with_max(self, max: u8) -> Self {
        let max = max.clamp(SCORE_MIN, SCORE_MAX);
        ScoreRange {
            min: self.min.min(max),
            max,
        }
    }

    pub fn contains(&self, value: u8) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self::FULL
    }
}

// ---------------------------------------------------------------------------
// FilterSpec – one range per score column
// ---------------------------------------------------------------------------

/// Per-column range constraints. All constraints must hold (logical AND).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterSpec {
    ranges: [ScoreRange; ScoreColumn::COUNT],
}

impl FilterSpec {
    pub fn range(&self, column: ScoreColumn) -> ScoreRange {
        self.ranges[column.index()]
    }

    pub fn set(&mut self, column: ScoreColumn, range: ScoreRange) {
        self.ranges[column.index()] = range;
    }

    /// Builder form of [`FilterSpec::set`].
    pub fn with(mut self, column: ScoreColumn, range: ScoreRange) -> Self {
        self.set(column, range);
        self
    }

    /// `true` when every column spans the full score domain.
    pub fn is_default(&self) -> bool {
        self.ranges.iter().all(ScoreRange::is_full)
    }

    pub fn reset(&mut self) {
        *self = FilterSpec::default();
    }

    /// Whether a record satisfies every column constraint.
    pub fn matches(&self, record: &RegionRecord) -> bool {
        record
            .scores
            .iter()
            .all(|(col, value)| self.range(col).contains(value))
    }

    /// Columns whose range is narrower than the full domain.
    pub fn active_columns(&self) -> impl Iterator<Item = (ScoreColumn, ScoreRange)> + '_ {
        ScoreColumn::ALL
            .into_iter()
            .map(|c| (c, self.range(c)))
            .filter(|(_, r)| !r.is_full())
    }
}

/// Records passing all constraints, in their original relative order.
pub fn apply<'a, I>(records: I, spec: &FilterSpec) -> Vec<&'a RegionRecord>
where
    I: IntoIterator<Item = &'a RegionRecord>,
{
    records.into_iter().filter(|r| spec.matches(r)).collect()
}

/// Return indices of records that pass all active filters.
pub fn filtered_indices(table: &RegionTable, spec: &FilterSpec) -> Vec<usize> {
    if spec.is_default() {
        return (0..table.len()).collect();
    }
    table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| spec.matches(rec))
        .map(|(i, _)| i)
        .collect()
}
