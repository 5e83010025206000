use std::cmp::Ordering;

use super::period::compare_periods;
use crate::models::DistributionSlice;
use crate::models::Record;

/// Share of each sector in the latest date's total, largest amount first.
/// Shares are `0` when the date's total is exactly zero or the ratio overflows.
pub fn distribution(records: &[Record]) -> Vec<DistributionSlice> {
    let Some(comparison) = compare_periods(records) else {
        return Vec::new();
    };
    let total = comparison.total();

    let mut slices: Vec<DistributionSlice> = comparison
        .latest
        .iter()
        .map(|r| DistributionSlice {
            sector: r.sector.clone(),
            amount: r.amount,
            share: share(r.amount, total),
        })
        .collect();

    slices.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));
    slices
}

fn share(amount: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    let share = amount / total * 100.0;
    if share.is_finite() { share } else { 0.0 }
}
