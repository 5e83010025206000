//! Period window filtering and latest-vs-previous comparisons.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

use super::{percent_change, saturating_sum};
use crate::models::{ChartPeriod, PeriodStats, Record, SectorHeadline, TopGrower};
use crate::parser::cleaner::date_from_parts;

/// Keep records on or after `latest − N years`; `All` keeps everything.
pub fn filter_by_period(records: &[Record], period: ChartPeriod) -> Vec<Record> {
    let Some(years) = period.years() else {
        return records.to_vec();
    };
    let Some(latest) = records.iter().map(|r| r.date).max() else {
        return Vec::new();
    };

    // 29 Feb minus N years rolls to 1 Mar, same as the parser's date overflow.
    let Some(cutoff) = date_from_parts(latest.year() - years, latest.month(), latest.day()) else {
        return records.to_vec();
    };

    records.iter().filter(|r| r.date >= cutoff).cloned().collect()
}

/// Records at the two most recent distinct dates of a slice.
#[derive(Debug, Clone)]
pub struct PeriodComparison<'a> {
    pub latest_date: NaiveDate,
    pub previous_date: Option<NaiveDate>,
    pub latest: Vec<&'a Record>,
    pub previous: Vec<&'a Record>,
}

pub fn compare_periods(records: &[Record]) -> Option<PeriodComparison<'_>> {
    let dates: BTreeSet<NaiveDate> = records.iter().map(|r| r.date).collect();
    let latest_date = *dates.last()?;
    let previous_date = dates.range(..latest_date).next_back().copied();

    Some(PeriodComparison {
        latest_date,
        previous_date,
        latest: records_at(records, latest_date),
        previous: previous_date
            .map(|d| records_at(records, d))
            .unwrap_or_default(),
    })
}

fn records_at(records: &[Record], date: NaiveDate) -> Vec<&Record> {
    records.iter().filter(|r| r.date == date).collect()
}

fn sum(items: &[&Record]) -> f64 {
    saturating_sum(items.iter().map(|r| r.amount))
}

/// First record for `sector`, `0` when absent.
fn value_of(items: &[&Record], sector: &str) -> f64 {
    items
        .iter()
        .find(|r| r.sector == sector)
        .map(|r| r.amount)
        .unwrap_or(0.0)
}

impl PeriodComparison<'_> {
    pub fn total(&self) -> f64 {
        sum(&self.latest)
    }

    pub fn previous_total(&self) -> f64 {
        sum(&self.previous)
    }

    pub fn total_trend(&self) -> f64 {
        percent_change(self.total(), self.previous_total())
    }

    pub fn sector_value(&self, sector: &str) -> f64 {
        value_of(&self.latest, sector)
    }

    pub fn previous_sector_value(&self, sector: &str) -> f64 {
        value_of(&self.previous, sector)
    }

    pub fn sector_trend(&self, sector: &str) -> f64 {
        percent_change(self.sector_value(sector), self.previous_sector_value(sector))
    }

    pub fn headline(&self, sector: &str) -> SectorHeadline {
        SectorHeadline {
            name: sector.to_string(),
            value: self.sector_value(sector),
            trend: self.sector_trend(sector),
        }
    }
}

/// Sector with the largest growth between the previous and latest dates.
///
/// Only sectors present at both dates with a non-zero previous amount take
/// part. Ties keep the first sector in latest-date order.
pub fn top_grower(comparison: &PeriodComparison<'_>) -> Option<TopGrower> {
    let mut best: Option<TopGrower> = None;

    for item in &comparison.latest {
        let Some(prev) = comparison.previous.iter().find(|p| p.sector == item.sector) else {
            continue;
        };
        if prev.amount == 0.0 {
            continue;
        }
        let growth = percent_change(item.amount, prev.amount);
        if best.as_ref().is_none_or(|b| growth > b.growth) {
            best = Some(TopGrower {
                sector: item.sector.clone(),
                growth,
            });
        }
    }

    best
}

/// Headline figures for a (pre-filtered) slice; `None` when it is empty.
pub fn period_stats(records: &[Record], headline_sectors: &[String]) -> Option<PeriodStats> {
    let comparison = compare_periods(records)?;

    Some(PeriodStats {
        latest_date: comparison.latest_date,
        previous_date: comparison.previous_date,
        total_volume: comparison.total(),
        total_trend: comparison.total_trend(),
        headlines: headline_sectors.iter().map(|s| comparison.headline(s)).collect(),
        top_grower: top_grower(&comparison),
    })
}
