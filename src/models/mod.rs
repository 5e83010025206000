use chrono::NaiveDate;
use clap::ValueEnum;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;

// ── Record ────────────────────────────────────────────────────────────────────

/// One normalized (sector, date, amount) observation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// `sector-dateStr`; not unique when the input repeats a pair.
    pub id: String,
    pub sector: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub date_str: String,
}

impl Record {
    pub fn new(sector: String, amount: f64, date: NaiveDate, date_str: String) -> Self {
        Self {
            id: format!("{}-{}", sector, date_str),
            sector,
            amount,
            date,
            date_str,
        }
    }
}

// ── Raw input line ────────────────────────────────────────────────────────────

/// Source row: name; amount; totalAmount; dateStr; ...
#[derive(Debug, Clone, Default)]
pub struct RawRow<'a> {
    pub name: &'a str,
    pub amount: &'a str,
    pub total_amount: &'a str,
    pub date_str: &'a str,
}

// ── Wide table ────────────────────────────────────────────────────────────────

/// One calendar day with every sector's amount for that day.
///
/// Serializes flat: `date`, `displayDate`, then one key per sector. A sector
/// whose name equals a fixed key is written as `sector:<name>`.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    /// ISO `YYYY-MM-DD`, sorts chronologically.
    pub date: String,
    pub display_date: String,
    pub values: BTreeMap<String, f64>,
}

pub const ROW_KEYS: &[&str] = &["date", "displayDate"];

/// Column key for `sector`, prefixed when it would shadow one of `fixed`.
pub fn sector_key<'a>(sector: &'a str, fixed: &[&str]) -> Cow<'a, str> {
    if fixed.contains(&sector) {
        Cow::Owned(format!("sector:{sector}"))
    } else {
        Cow::Borrowed(sector)
    }
}

impl Serialize for AggregatedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + ROW_KEYS.len()))?;
        map.serialize_entry("date", &self.date)?;
        map.serialize_entry("displayDate", &self.display_date)?;
        for (sector, value) in &self.values {
            map.serialize_entry(&sector_key(sector, ROW_KEYS), value)?;
        }
        map.end()
    }
}

// ── Statistics ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopGrower {
    pub sector: String,
    pub growth: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SectorHeadline {
    pub name: String,
    pub value: f64,
    pub trend: f64,
}

/// Figures for the latest date of a period window.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeriodStats {
    pub latest_date: NaiveDate,
    pub previous_date: Option<NaiveDate>,
    pub total_volume: f64,
    pub total_trend: f64,
    pub headlines: Vec<SectorHeadline>,
    pub top_grower: Option<TopGrower>,
}

/// One sector over its full history.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SectorWindowStats {
    pub sector: String,
    pub observations: usize,
    pub first_amount: f64,
    pub latest_amount: f64,
    pub latest_date: NaiveDate,
    /// Percent change first → latest.
    pub total_growth: Option<f64>,
    /// Population std-dev of period-over-period changes, in percent.
    pub volatility: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistributionSlice {
    pub sector: String,
    pub amount: f64,
    pub share: f64,
}

// ── Period window ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum ChartPeriod {
    #[default]
    #[serde(rename = "ALL")]
    #[value(name = "all")]
    All,
    #[serde(rename = "1Y")]
    #[value(name = "1y")]
    Year1,
    #[serde(rename = "3Y")]
    #[value(name = "3y")]
    Year3,
    #[serde(rename = "5Y")]
    #[value(name = "5y")]
    Year5,
}

impl ChartPeriod {
    /// Lookback in calendar years; `None` means no filtering.
    pub fn years(self) -> Option<i32> {
        match self {
            ChartPeriod::All => None,
            ChartPeriod::Year1 => Some(1),
            ChartPeriod::Year3 => Some(3),
            ChartPeriod::Year5 => Some(5),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartPeriod::All => "All time",
            ChartPeriod::Year1 => "1 year",
            ChartPeriod::Year3 => "3 years",
            ChartPeriod::Year5 => "5 years",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_joins_sector_and_date_text() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let r = Record::new("Industry".into(), 1.0, date, "01.01.2020".into());
        assert_eq!(r.id, "Industry-01.01.2020");
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let date = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();
        let r = Record::new("Industry".into(), 1200.0, date, "01.02.2020".into());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["dateStr"], "01.02.2020");
        assert_eq!(json["date"], "2020-02-01");
    }

    #[test]
    fn test_aggregated_row_flattens_sectors() {
        let mut values = BTreeMap::new();
        values.insert("Industry".to_string(), 1000.0);
        let row = AggregatedRow {
            date: "2020-01-01".into(),
            display_date: "Jan 2020".into(),
            values,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["displayDate"], "Jan 2020");
        assert_eq!(json["Industry"], 1000.0);
    }

    #[test]
    fn test_aggregated_row_sector_named_like_a_fixed_key() {
        let values: BTreeMap<String, f64> = [("date".to_string(), 5.0), ("displayDate".to_string(), 6.0)]
            .into_iter()
            .collect();
        let row = AggregatedRow {
            date: "2020-01-01".into(),
            display_date: "Jan 2020".into(),
            values,
        };
        let text = serde_json::to_string(&row).unwrap();
        assert_eq!(text.matches("\"date\"").count(), 1);
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["date"], "2020-01-01");
        assert_eq!(json["displayDate"], "Jan 2020");
        assert_eq!(json["sector:date"], 5.0);
        assert_eq!(json["sector:displayDate"], 6.0);
    }

    #[test]
    fn test_chart_period_years() {
        assert_eq!(ChartPeriod::All.years(), None);
        assert_eq!(ChartPeriod::Year3.years(), Some(3));
        let p: ChartPeriod = serde_json::from_str("\"5Y\"").unwrap();
        assert_eq!(p, ChartPeriod::Year5);
    }
}
