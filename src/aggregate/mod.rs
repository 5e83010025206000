//! Date aggregator: records → one wide row per calendar day.

use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use crate::models::{AggregatedRow, Record, sector_key};

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%b %Y";
const CSV_KEYS: &[&str] = &["date", "display_date"];

/// Pivot records by day. Later records overwrite earlier ones for the same
/// (day, sector); the display label comes from the first record of the day.
pub fn aggregate_by_date(records: &[Record]) -> Vec<AggregatedRow> {
    let mut grouped: BTreeMap<String, AggregatedRow> = BTreeMap::new();

    for record in records {
        let key = record.date.format(DAY_KEY_FORMAT).to_string();
        let row = grouped.entry(key).or_insert_with_key(|key| AggregatedRow {
            date: key.clone(),
            display_date: record.date.format(DISPLAY_FORMAT).to_string(),
            values: BTreeMap::new(),
        });
        row.values.insert(record.sector.clone(), record.amount);
    }

    // BTreeMap iterates keys in order; ISO keys sort chronologically.
    grouped.into_values().collect()
}

/// Every sector appearing in any row, sorted.
pub fn sector_columns(rows: &[AggregatedRow]) -> Vec<String> {
    rows.iter()
        .flat_map(|r| r.values.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Write the wide table as CSV: date, display_date, then one column per sector.
pub fn write_wide_csv<W: Write>(rows: &[AggregatedRow], writer: W) -> Result<()> {
    let columns = sector_columns(rows);
    let mut out = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = CSV_KEYS.iter().map(|k| k.to_string()).collect();
    header.extend(columns.iter().map(|c| sector_key(c, CSV_KEYS).into_owned()));
    out.write_record(&header)?;

    for row in rows {
        let mut fields = vec![row.date.clone(), row.display_date.clone()];
        fields.extend(
            columns
                .iter()
                .map(|c| row.values.get(c).map(|v| v.to_string()).unwrap_or_default()),
        );
        out.write_record(&fields)?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(sector: &str, amount: f64, y: i32, m: u32, d: u32) -> Record {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        Record::new(sector.into(), amount, date, date.format("%d.%m.%Y").to_string())
    }

    #[test]
    fn test_example_pivot() {
        let records = vec![
            rec("Industry", 1000.0, 2020, 1, 1),
            rec("Agriculture", 500.0, 2020, 1, 1),
            rec("Industry", 1200.0, 2020, 2, 1),
        ];
        let rows = aggregate_by_date(&records);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].date, "2020-01-01");
        assert_eq!(rows[0].display_date, "Jan 2020");
        assert_eq!(rows[0].values.get("Industry"), Some(&1000.0));
        assert_eq!(rows[0].values.get("Agriculture"), Some(&500.0));

        assert_eq!(rows[1].date, "2020-02-01");
        assert_eq!(rows[1].display_date, "Feb 2020");
        assert_eq!(rows[1].values.len(), 1);
        assert_eq!(rows[1].values.get("Industry"), Some(&1200.0));
    }

    #[test]
    fn test_last_write_wins_per_day_and_sector() {
        let records = vec![
            rec("Industry", 1.0, 2020, 1, 1),
            rec("Industry", 2.0, 2020, 1, 1),
            rec("Agriculture", 5.0, 2020, 1, 1),
            rec("Industry", 3.0, 2020, 1, 1),
        ];
        let rows = aggregate_by_date(&records);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].values.get("Industry"), Some(&3.0));
        assert_eq!(rows[0].values.get("Agriculture"), Some(&5.0));
    }

    #[test]
    fn test_rows_sorted_even_for_unsorted_input() {
        let records = vec![
            rec("A", 1.0, 2021, 3, 1),
            rec("A", 1.0, 2019, 12, 1),
            rec("A", 1.0, 2020, 6, 1),
        ];
        let keys: Vec<String> = aggregate_by_date(&records).into_iter().map(|r| r.date).collect();
        assert_eq!(keys, vec!["2019-12-01", "2020-06-01", "2021-03-01"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_by_date(&[]).is_empty());
    }

    #[test]
    fn test_write_wide_csv() {
        let records = vec![
            rec("Industry", 1000.0, 2020, 1, 1),
            rec("Agriculture", 500.5, 2020, 1, 1),
            rec("Industry", 1200.0, 2020, 2, 1),
        ];
        let rows = aggregate_by_date(&records);
        let mut buf = Vec::new();
        write_wide_csv(&rows, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "date,display_date,Agriculture,Industry\n\
             2020-01-01,Jan 2020,500.5,1000\n\
             2020-02-01,Feb 2020,,1200\n"
        );
    }

    #[test]
    fn test_wide_csv_header_keeps_fixed_columns_unique() {
        let records = vec![rec("date", 1.0, 2020, 1, 1), rec("Industry", 2.0, 2020, 1, 1)];
        let mut buf = Vec::new();
        write_wide_csv(&aggregate_by_date(&records), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "date,display_date,Industry,sector:date\n\
             2020-01-01,Jan 2020,2,1\n"
        );
    }
}
