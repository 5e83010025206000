//! Dashboard orchestrator: owns the loaded record set and derives every view
//! from it.
//!
//! ## Flow
//!
//! 1. `load_csv()` / `import_document()` replace the record set
//! 2. `snapshot(period)` → window filter → wide table + headline stats + distribution
//! 3. `sector_details()` → per-sector statistics over the full history
//! 4. `search()` → newest-first data table view
//!
//! A rejected import leaves the current record set untouched.

use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::aggregate::aggregate_by_date;
use crate::config::AppConfig;
use crate::error::TransferError;
use crate::models::{AggregatedRow, ChartPeriod, DistributionSlice, PeriodStats, Record, SectorWindowStats};
use crate::parser::sectors::SectorTable;
use crate::parser::{SkippedLine, parse_with_report};
use crate::stats::{distribution, filter_by_period, period_stats, sector_window_stats};
use crate::transfer::{export_document, import_document};

pub struct Dashboard {
    config: AppConfig,
    sectors: SectorTable,
    records: Vec<Record>,
}

/// Every view of one period window.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub period: ChartPeriod,
    pub records: Vec<Record>,
    pub rows: Vec<AggregatedRow>,
    pub stats: Option<PeriodStats>,
    pub distribution: Vec<DistributionSlice>,
}

/// Data table filter.
#[derive(Debug, Clone, Default)]
pub struct RecordQuery {
    /// Case-insensitive sector substring, or a substring of the date text.
    pub search: Option<String>,
    /// Exact sector match.
    pub sector: Option<String>,
    pub limit: Option<usize>,
}

impl Dashboard {
    pub fn new(config: AppConfig) -> Self {
        let sectors = config.sector_table();
        if sectors.is_empty() {
            warn!("No sector name translations configured");
        } else {
            debug!("{} sector name translations", sectors.len());
        }
        Self {
            config,
            sectors,
            records: Vec::new(),
        }
    }

    /// Dashboard over an already-built record set, re-sorted by date.
    pub fn from_records(config: AppConfig, mut records: Vec<Record>) -> Self {
        records.sort_by_key(|r| r.date);
        let mut dashboard = Self::new(config);
        dashboard.records = records;
        dashboard
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Distinct sector names, sorted.
    pub fn sectors(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.sector.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Replace the record set with parsed CSV text; returns the dropped lines.
    pub fn load_csv(&mut self, text: &str) -> Vec<SkippedLine> {
        let report = parse_with_report(text, &self.sectors, &self.config.parser);
        info!(
            "Parsed {} records ({} lines skipped)",
            report.records.len(),
            report.skipped.len()
        );
        self.records = report.records;
        report.skipped
    }

    /// Replace the record set with an exported document.
    pub fn import_document(&mut self, text: &str) -> Result<usize, TransferError> {
        match import_document(text) {
            Ok(records) => {
                info!("Imported {} records", records.len());
                self.records = records;
                Ok(self.records.len())
            }
            Err(e) => {
                warn!("Import rejected, keeping {} records: {}", self.records.len(), e);
                Err(e)
            }
        }
    }

    pub fn export_document(&self) -> Result<String, TransferError> {
        export_document(&self.records)
    }

    pub fn snapshot(&self, period: ChartPeriod) -> DashboardSnapshot {
        let records = filter_by_period(&self.records, period);
        debug!("{:?}: {} of {} records in window", period, records.len(), self.records.len());

        let rows = aggregate_by_date(&records);
        let stats = period_stats(&records, &self.config.dashboard.headline_sectors);
        let distribution = distribution(&records);

        DashboardSnapshot {
            period,
            records,
            rows,
            stats,
            distribution,
        }
    }

    /// Statistics for one sector over the full, unfiltered history.
    pub fn sector_details(&self, sector: &str) -> Option<SectorWindowStats> {
        sector_window_stats(&self.records, sector)
    }

    /// Newest-first records matching `query`.
    pub fn search<'a>(&'a self, records: &'a [Record], query: &RecordQuery) -> Vec<&'a Record> {
        let limit = query.limit.unwrap_or(self.config.dashboard.table_limit);
        search_records(records, query, limit)
    }
}

pub fn search_records<'a>(records: &'a [Record], query: &RecordQuery, limit: usize) -> Vec<&'a Record> {
    let term = query.search.as_deref().unwrap_or("");
    let term_lower = term.to_lowercase();

    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    sorted
        .into_iter()
        .filter(|r| r.sector.to_lowercase().contains(&term_lower) || r.date_str.contains(term))
        .filter(|r| query.sector.as_deref().is_none_or(|s| r.sector == s))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Header\n\
        Industry;1000,00;0;01.01.2020 г.\n\
        Agriculture;500,00;0;01.01.2020 г.\n\
        Industry;1200,00;0;01.02.2020 г.\n\
        broken line\n";

    fn loaded() -> Dashboard {
        let mut dashboard = Dashboard::new(AppConfig::default());
        let skipped = dashboard.load_csv(SAMPLE);
        assert_eq!(skipped.len(), 1);
        dashboard
    }

    #[test]
    fn test_snapshot_all() {
        let dashboard = loaded();
        let snap = dashboard.snapshot(ChartPeriod::All);
        assert_eq!(snap.records.len(), 3);
        assert_eq!(snap.rows.len(), 2);

        let stats = snap.stats.unwrap();
        assert_eq!(stats.total_volume, 1200.0);
        assert_eq!(stats.headlines[0].name, "Industry");
        assert!((stats.headlines[0].trend - 20.0).abs() < 1e-9);
        assert_eq!(stats.top_grower.unwrap().sector, "Industry");

        assert_eq!(snap.distribution.len(), 1);
        assert!((snap.distribution[0].share - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_of_empty_dashboard() {
        let dashboard = Dashboard::new(AppConfig::default());
        let snap = dashboard.snapshot(ChartPeriod::Year1);
        assert!(snap.records.is_empty());
        assert!(snap.rows.is_empty());
        assert!(snap.stats.is_none());
        assert!(snap.distribution.is_empty());
    }

    #[test]
    fn test_rejected_import_keeps_records() {
        let mut dashboard = loaded();
        let before = dashboard.records().to_vec();

        assert!(dashboard.import_document("[]").is_err());
        assert!(dashboard.import_document("not json").is_err());
        assert_eq!(dashboard.records(), before.as_slice());
    }

    #[test]
    fn test_export_import_round_trip() {
        let dashboard = loaded();
        let doc = dashboard.export_document().unwrap();

        let mut other = Dashboard::new(AppConfig::default());
        assert_eq!(other.import_document(&doc).unwrap(), 3);
        assert_eq!(other.records(), dashboard.records());
    }

    #[test]
    fn test_sector_details_use_full_history() {
        let dashboard = loaded();
        let details = dashboard.sector_details("Industry").unwrap();
        assert_eq!(details.observations, 2);
        assert!((details.total_growth.unwrap() - 20.0).abs() < 1e-9);
        assert!(dashboard.sector_details("Agriculture").unwrap().volatility.is_none());
    }

    #[test]
    fn test_sectors_listing() {
        assert_eq!(loaded().sectors(), vec!["Agriculture", "Industry"]);
    }

    #[test]
    fn test_search_newest_first_with_filters() {
        let dashboard = loaded();
        let all = dashboard.search(dashboard.records(), &RecordQuery::default());
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].date_str, "01.02.2020");

        let by_name = RecordQuery {
            search: Some("agri".into()),
            ..Default::default()
        };
        let hits = dashboard.search(dashboard.records(), &by_name);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].sector, "Agriculture");

        let by_date = RecordQuery {
            search: Some("01.01".into()),
            sector: Some("Industry".into()),
            limit: None,
        };
        let hits = dashboard.search(dashboard.records(), &by_date);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].amount, 1000.0);

        let limited = RecordQuery {
            limit: Some(2),
            ..Default::default()
        };
        assert_eq!(dashboard.search(dashboard.records(), &limited).len(), 2);
    }
}
