//! Export / import of the record set as a JSON document.
//!
//! Shape: `[{"id", "sector", "amount", "date", "dateStr"}, ...]` with `date`
//! written as `YYYY-MM-DD`. Imports also accept RFC 3339 timestamps for
//! `date`, and re-derive `id` / `dateStr` when they are missing.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::TransferError;
use crate::models::Record;

const DATE_TEXT_FORMAT: &str = "%d.%m.%Y";

pub fn export_document(records: &[Record]) -> Result<String, TransferError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Parse a previously exported document. Either every element is valid and a
/// date-sorted record set comes back, or nothing does.
pub fn import_document(text: &str) -> Result<Vec<Record>, TransferError> {
    let json: Value = serde_json::from_str(text)?;
    validate_shape(&json)?;

    let items: Vec<ImportedRecord> = serde_json::from_value(json)?;
    let mut records: Vec<Record> = items.into_iter().map(Record::from).collect();
    records.sort_by_key(|r| r.date);
    Ok(records)
}

/// First element must carry a sector name and a numeric amount.
fn validate_shape(json: &Value) -> Result<(), TransferError> {
    let Some(items) = json.as_array() else {
        return Err(TransferError::InvalidFormat("expected a JSON array".into()));
    };
    let Some(first) = items.first() else {
        return Err(TransferError::InvalidFormat("document has no records".into()));
    };

    let has_sector = first
        .get("sector")
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty());
    if !has_sector {
        return Err(TransferError::InvalidFormat("first record has no sector".into()));
    }
    if !first.get("amount").is_some_and(Value::is_number) {
        return Err(TransferError::InvalidFormat("first record has no numeric amount".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedRecord {
    #[serde(default)]
    id: Option<String>,
    sector: String,
    amount: f64,
    #[serde(deserialize_with = "deserialize_date")]
    date: NaiveDate,
    #[serde(default)]
    date_str: Option<String>,
}

impl From<ImportedRecord> for Record {
    fn from(item: ImportedRecord) -> Self {
        let date_str = item
            .date_str
            .unwrap_or_else(|| item.date.format(DATE_TEXT_FORMAT).to_string());
        let id = item
            .id
            .unwrap_or_else(|| format!("{}-{}", item.sector, date_str));
        Record {
            id,
            sector: item.sector,
            amount: item.amount,
            date: item.date,
            date_str,
        }
    }
}

/// `YYYY-MM-DD`, or an RFC 3339 timestamp read in its own offset.
fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_document_date(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised date {s:?}")))
}

fn parse_document_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
