//! Plain-text rendering of dashboard views for the terminal.
//!
//! Kept apart from the statistics so formatting changes stay local.

use crate::aggregate::sector_columns;
use crate::models::{AggregatedRow, DistributionSlice, Record, SectorWindowStats};
use crate::pipeline::DashboardSnapshot;
use crate::utils::{fmt_amount, fmt_percent};

const RULE: &str = "─────────────────────────────────────────";

pub fn format_summary(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!("{RULE}\n"));
    out.push_str(&format!("  Sector Dashboard — {}\n", snapshot.period.label()));
    out.push_str(&format!("{RULE}\n"));

    let Some(stats) = &snapshot.stats else {
        out.push_str("  No records in this period.\n");
        return out;
    };

    out.push_str(&format!("  Records      : {}\n", snapshot.records.len()));
    out.push_str(&format!("  Latest date  : {}\n", stats.latest_date));
    out.push_str(&format!(
        "  Compared to  : {}\n",
        stats.previous_date.map(|d| d.to_string()).unwrap_or("—".into())
    ));
    out.push_str(&format!(
        "  Total volume : {:>16}  {}\n",
        fmt_amount(stats.total_volume),
        fmt_percent(Some(stats.total_trend))
    ));
    for headline in &stats.headlines {
        out.push_str(&format!(
            "  {:<13}: {:>16}  {}\n",
            headline.name,
            fmt_amount(headline.value),
            fmt_percent(Some(headline.trend))
        ));
    }
    match &stats.top_grower {
        Some(top) => out.push_str(&format!(
            "  Top grower   : {:>16}  {}\n",
            top.sector,
            fmt_percent(Some(top.growth))
        )),
        None => out.push_str(&format!("  Top grower   : {:>16}  n/a\n", "-")),
    }
    out.push_str(&format!("{RULE}\n"));
    out
}

pub fn format_wide_table(rows: &[AggregatedRow]) -> String {
    let columns = sector_columns(rows);
    let widths: Vec<usize> = columns.iter().map(|c| c.chars().count().max(12)).collect();

    let mut out = format!("{:<10}  {:<9}", "date", "period");
    for (column, width) in columns.iter().zip(&widths) {
        out.push_str(&format!("  {:>width$}", column, width = *width));
    }
    out.push('\n');

    for row in rows {
        out.push_str(&format!("{:<10}  {:<9}", row.date, row.display_date));
        for (column, width) in columns.iter().zip(&widths) {
            let cell = row.values.get(column).map(|v| fmt_amount(*v)).unwrap_or_default();
            out.push_str(&format!("  {:>width$}", cell, width = *width));
        }
        out.push('\n');
    }
    out
}

pub fn format_sector_details(stats: &SectorWindowStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", stats.sector));
    out.push_str(&format!("  Observations   : {}\n", stats.observations));
    out.push_str(&format!(
        "  Latest amount  : {} ({})\n",
        fmt_amount(stats.latest_amount),
        stats.latest_date
    ));
    out.push_str(&format!("  Total growth   : {}\n", fmt_percent(stats.total_growth)));
    out.push_str(&format!(
        "  Volatility     : {}\n",
        stats
            .volatility
            .map(|v| format!("{:.2}%", v))
            .unwrap_or("n/a".into())
    ));
    out
}

pub fn format_distribution(slices: &[DistributionSlice]) -> String {
    if slices.is_empty() {
        return "No records.\n".to_string();
    }
    let mut out = String::new();
    for slice in slices {
        out.push_str(&format!(
            "  {:<24} {:>16} {:>6.1}%\n",
            slice.sector,
            fmt_amount(slice.amount),
            slice.share
        ));
    }
    out
}

pub fn format_records(records: &[&Record]) -> String {
    if records.is_empty() {
        return "No records found.\n".to_string();
    }
    let mut out = format!("{:<12}  {:<24}  {:>16}\n", "date", "sector", "amount");
    for r in records {
        out.push_str(&format!(
            "{:<12}  {:<24}  {:>16}\n",
            r.date_str,
            r.sector,
            fmt_amount(r.amount)
        ));
    }
    out.push_str(&format!("Showing {} records\n", records.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_by_date;
    use crate::config::AppConfig;
    use crate::models::ChartPeriod;
    use crate::pipeline::Dashboard;
    use chrono::NaiveDate;

    fn dashboard() -> Dashboard {
        let mut d = Dashboard::new(AppConfig::default());
        d.load_csv(
            "h\nIndustry;1000,00;0;01.01.2020 г.\nAgriculture;500,00;0;01.01.2020 г.\nIndustry;1200,00;0;01.02.2020 г.\n",
        );
        d
    }

    #[test]
    fn test_summary_lists_headlines_and_top_grower() {
        let text = format_summary(&dashboard().snapshot(ChartPeriod::All));
        assert!(text.contains("Total volume"));
        assert!(text.contains("1,200"));
        assert!(text.contains("-20.0%"));
        assert!(text.contains("+20.0%"));
        assert!(text.contains("Individuals"));
    }

    #[test]
    fn test_summary_for_empty_window() {
        let empty = Dashboard::new(AppConfig::default());
        assert!(format_summary(&empty.snapshot(ChartPeriod::All)).contains("No records"));
    }

    #[test]
    fn test_wide_table_has_blank_cells() {
        let d = dashboard();
        let text = format_wide_table(&aggregate_by_date(d.records()));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Agriculture") && lines[0].contains("Industry"));
        assert!(lines[1].starts_with("2020-01-01  Jan 2020"));
        assert!(lines[2].contains("1,200"));
    }

    #[test]
    fn test_sector_details_unavailable_fields() {
        let stats = SectorWindowStats {
            sector: "Agriculture".into(),
            observations: 1,
            first_amount: 500.0,
            latest_amount: 500.0,
            latest_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            total_growth: None,
            volatility: None,
        };
        let text = format_sector_details(&stats);
        assert!(text.contains("Total growth   : n/a"));
        assert!(text.contains("Volatility     : n/a"));
    }

    #[test]
    fn test_records_table() {
        let d = dashboard();
        let rows: Vec<&Record> = d.records().iter().collect();
        let text = format_records(&rows);
        assert!(text.contains("01.02.2020"));
        assert!(text.ends_with("Showing 3 records\n"));
        assert_eq!(format_records(&[]), "No records found.\n");
    }
}
