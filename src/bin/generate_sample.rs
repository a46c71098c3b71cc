//! Write a synthetic SA3 score table (`sample_regions.parquet` and
//! `sample_regions.csv`) with the same columns as the master workbook.
//!
//! Point the dashboard at it with `SA3_RADAR_SOURCE=sample_regions.parquet`.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use sa3_radar::data::model::{ScoreColumn, ID_COLUMN, SCORE_MAX, SCORE_MIN};

const REGIONS: [&str; 32] = [
    "Sydney Inner City",
    "Parramatta",
    "Blacktown",
    "Penrith",
    "Ryde - Hunters Hill",
    "Newcastle",
    "Wollongong",
    "Gosford",
    "Melbourne City",
    "Stonnington - East",
    "Geelong",
    "Ballarat",
    "Bendigo",
    "Frankston",
    "Brisbane Inner",
    "Ipswich Inner",
    "Gold Coast - North",
    "Sunshine Coast Hinterland",
    "Toowoomba",
    "Townsville",
    "Cairns - South",
    "Adelaide City",
    "Salisbury",
    "Onkaparinga",
    "Perth City",
    "Fremantle",
    "Joondalup",
    "Mandurah",
    "Hobart Inner",
    "Launceston",
    "Darwin City",
    "North Canberra",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        let span = (hi - lo + 1) as u64;
        lo + (self.next_u64() % span) as i64
    }
}

/// Scores lean towards a per-region "heat" so charts are not pure noise.
fn region_scores(rng: &mut SimpleRng) -> [i64; ScoreColumn::COUNT] {
    let lo = i64::from(SCORE_MIN);
    let hi = i64::from(SCORE_MAX);
    let heat = rng.range(lo, hi);
    let mut scores = [0; ScoreColumn::COUNT];
    for s in &mut scores {
        *s = (heat + rng.range(-1, 1)).clamp(lo, hi);
    }
    scores
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut columns: Vec<Vec<i64>> = vec![Vec::with_capacity(REGIONS.len()); ScoreColumn::COUNT];
    for _ in REGIONS {
        for (col, value) in columns.iter_mut().zip(region_scores(&mut rng)) {
            col.push(value);
        }
    }

    // ---- Parquet ----
    let mut fields = vec![Field::new(ID_COLUMN, DataType::Utf8, false)];
    fields.extend(
        ScoreColumn::ALL
            .iter()
            .map(|c| Field::new(c.header(), DataType::Int64, false)),
    );
    let schema = Arc::new(Schema::new(fields));

    let mut arrays: Vec<ArrayRef> = vec![Arc::new(StringArray::from(REGIONS.to_vec()))];
    arrays.extend(
        columns
            .iter()
            .map(|c| Arc::new(Int64Array::from(c.clone())) as ArrayRef),
    );
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let parquet_path = "sample_regions.parquet";
    let file = std::fs::File::create(parquet_path)
        .with_context(|| format!("creating {parquet_path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;

    // ---- CSV ----
    let csv_path = "sample_regions.csv";
    let mut out =
        csv::Writer::from_path(csv_path).with_context(|| format!("creating {csv_path}"))?;
    let mut header = vec![ID_COLUMN];
    header.extend(ScoreColumn::ALL.iter().map(|c| c.header()));
    out.write_record(&header)?;
    for (row, region) in REGIONS.iter().enumerate() {
        let mut record = vec![region.to_string()];
        record.extend(columns.iter().map(|c| c[row].to_string()));
        out.write_record(&record)?;
    }
    out.flush()?;

    println!(
        "Wrote {} regions to {parquet_path} and {csv_path}",
        REGIONS.len()
    );
    Ok(())
}
