//! Record parser: semicolon-delimited text → sorted `Record`s.
//!
//! Parsing is best-effort. A line that cannot be turned into a record is
//! dropped and never fails the whole parse; `parse_with_report` also hands
//! back which lines were dropped and why.

pub mod cleaner;
pub mod sectors;

use csv::{Position, StringRecord};
use tracing::{debug, trace};

use crate::config::ParserConfig;
use crate::error::RowRejection;
use crate::models::{RawRow, Record};

use self::cleaner::{normalise_date_text, parse_amount, parse_date};
use self::sectors::SectorTable;

/// A dropped input line (1-based, header is line 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: RowRejection,
}

#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub records: Vec<Record>,
    pub skipped: Vec<SkippedLine>,
}

impl ParseReport {
    /// Non-empty, non-header lines seen.
    pub fn lines_seen(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}

/// Parse the full input text, dropping malformed lines.
pub fn parse_records(text: &str, sectors: &SectorTable, config: &ParserConfig) -> Vec<Record> {
    parse_with_report(text, sectors, config).records
}

pub fn parse_with_report(text: &str, sectors: &SectorTable, config: &ParserConfig) -> ParseReport {
    let mut report = ParseReport::default();

    // The first physical line is the header, even when blank.
    let Some((_, body)) = text.split_once('\n') else {
        return report;
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .quoting(false)
        .flexible(true)
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    for (idx, result) in reader.records().enumerate() {
        let fallback = idx + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map(|p| body_line(body, p)).unwrap_or(fallback);
                debug!("Line {} skipped: {}", line, e);
                report.skipped.push(SkippedLine {
                    line,
                    reason: RowRejection::Unreadable(e.to_string()),
                });
                continue;
            }
        };
        if is_blank(&record) {
            continue;
        }
        let line = record.position().map(|p| body_line(body, p)).unwrap_or(fallback);

        match split_row(&record).and_then(|raw| row_to_record(&raw, sectors, config)) {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                debug!("Line {} skipped: {}", line, reason);
                report.skipped.push(SkippedLine { line, reason });
            }
        }
    }

    // Stable: equal dates keep input order.
    report.records.sort_by_key(|r| r.date);

    trace!(
        "Parsed {} records, skipped {} lines",
        report.records.len(),
        report.skipped.len()
    );
    report
}

/// 1-based line of a record in the full text (header is line 1).
///
/// The reader reports where it resumed, which is before any empty lines it
/// skipped on the way to the record.
fn body_line(body: &str, pos: &Position) -> usize {
    let empty_lines = body
        .as_bytes()
        .get(pos.byte() as usize..)
        .unwrap_or_default()
        .iter()
        .take_while(|b| matches!(b, b'\r' | b'\n'))
        .filter(|&&b| b == b'\n')
        .count();
    pos.line() as usize + empty_lines + 1
}

/// A whitespace-only line reads back as a single empty field.
fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].is_empty()
}

fn split_row(record: &StringRecord) -> Result<RawRow<'_>, RowRejection> {
    match (record.get(0), record.get(1), record.get(2), record.get(3)) {
        (Some(name), Some(amount), Some(total_amount), Some(date_str)) => Ok(RawRow {
            name,
            amount,
            total_amount,
            date_str,
        }),
        _ => Err(RowRejection::TooFewFields(record.len())),
    }
}

fn row_to_record(
    raw: &RawRow<'_>,
    sectors: &SectorTable,
    config: &ParserConfig,
) -> Result<Record, RowRejection> {
    let name = raw.name.trim();
    if name.is_empty() {
        return Err(RowRejection::EmptySector);
    }

    let amount =
        parse_amount(raw.amount).ok_or_else(|| RowRejection::InvalidAmount(raw.amount.to_string()))?;

    let date_str = normalise_date_text(raw.date_str, &config.unit_marker);
    let date = parse_date(&date_str).ok_or_else(|| RowRejection::InvalidDate(date_str.clone()))?;

    let sector = sectors.canonical(name).to_string();
    Ok(Record::new(sector, amount, date, date_str))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
