//! Statistics over record slices.
//!
//! Every function here is pure and total. Degenerate input (empty slices,
//! single observations, zero denominators) yields `None` or a defined zero,
//! never NaN or infinity.

pub mod distribution;
pub mod period;
pub mod window;

pub use distribution::distribution;
pub use period::{PeriodComparison, compare_periods, filter_by_period, period_stats, top_grower};
pub use window::sector_window_stats;

/// `(current − previous) / previous * 100`, exactly `0.0` for a zero baseline
/// or when the change overflows.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    let change = (current - previous) / previous * 100.0;
    if change.is_finite() { change } else { 0.0 }
}

/// Sum of finite amounts, saturating at `±f64::MAX`.
pub fn saturating_sum(amounts: impl IntoIterator<Item = f64>) -> f64 {
    let total = amounts.into_iter().fold(0.0, |acc, a| acc + a);
    if total.is_nan() {
        0.0
    } else {
        total.clamp(f64::MIN, f64::MAX)
    }
}
