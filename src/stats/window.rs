//! Per-sector statistics over the full history.

use crate::models::{Record, SectorWindowStats};

/// Growth and volatility for one sector; `None` when it has no observations.
pub fn sector_window_stats(records: &[Record], sector: &str) -> Option<SectorWindowStats> {
    let mut history: Vec<&Record> = records.iter().filter(|r| r.sector == sector).collect();
    history.sort_by_key(|r| r.date);

    let first = *history.first()?;
    let latest = *history.last()?;
    let amounts: Vec<f64> = history.iter().map(|r| r.amount).collect();

    let (total_growth, volatility) = if amounts.len() < 2 {
        (None, None)
    } else {
        (
            total_growth(first.amount, latest.amount),
            volatility(&period_changes(&amounts)),
        )
    };

    Some(SectorWindowStats {
        sector: sector.to_string(),
        observations: history.len(),
        first_amount: first.amount,
        latest_amount: latest.amount,
        latest_date: latest.date,
        total_growth,
        volatility,
    })
}

fn total_growth(first: f64, latest: f64) -> Option<f64> {
    if first == 0.0 {
        return None;
    }
    Some((latest - first) / first * 100.0).filter(|g| g.is_finite())
}

/// Fractional change between consecutive observations.
fn period_changes(amounts: &[f64]) -> Vec<f64> {
    amounts.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect()
}

/// Population standard deviation of `changes`, in percent.
fn volatility(changes: &[f64]) -> Option<f64> {
    if changes.is_empty() || changes.iter().any(|c| !c.is_finite()) {
        return None;
    }
    let n = changes.len() as f64;
    let mean = changes.iter().sum::<f64>() / n;
    let variance = changes.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt() * 100.0).filter(|v| v.is_finite())
}
