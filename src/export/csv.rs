use anyhow::{Context, Result};

use crate::data::model::{RegionRecord, ScoreColumn, ID_COLUMN};

/// Encode rows as UTF-8 CSV: header `SA3,<score columns>`, one line per
/// region, no index column.
pub fn encode(rows: &[&RegionRecord]) -> Result<Vec<u8>> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());

    let mut header = vec![ID_COLUMN];
    header.extend(ScoreColumn::ALL.iter().map(|c| c.header()));
    writer.write_record(&header).context("writing CSV header")?;

    for rec in rows {
        let mut fields = Vec::with_capacity(ScoreColumn::COUNT + 1);
        fields.push(rec.id.clone());
        fields.extend(rec.scores.values().iter().map(|v| v.to_string()));
        writer
            .write_record(&fields)
            .with_context(|| format!("writing CSV row for '{}'", rec.id))?;
    }

    writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("flushing CSV buffer")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_region_gives_header_and_one_row() {
        let r1 = RegionRecord::new("R1", [5, 4, 3, 5, 2, 1, 4]);
        let bytes = encode(&[&r1]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "SA3,10Y Price Change,1M Price Change,Inventory Now,Inventory trend,Inventory Forecast,DOM,Dom Forecast",
                "R1,5,4,3,5,2,1,4",
            ]
        );
    }

    #[test]
    fn ids_with_commas_are_quoted() {
        let r = RegionRecord::new("Sydney, Inner", [1; 7]);
        let text = String::from_utf8(encode(&[&r]).unwrap()).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("\"Sydney, Inner\","));
    }

    #[test]
    fn no_rows_still_writes_header() {
        let text = String::from_utf8(encode(&[]).unwrap()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
