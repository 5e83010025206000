use std::time::{Duration, Instant};
use tracing::info;

/// Logs how long a CLI command took when dropped.
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    pub fn start(label: impl Into<String>) -> Self {
        let label = label.into();
        info!("Starting: {}", label);
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        info!("Finished: {} (took {:.2?})", self.label, self.elapsed());
    }
}

/// Round to a whole number and group thousands with commas.
/// 1234567.6 → "1,234,568" | -42000.0 → "-42,000"
pub fn fmt_amount(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Signed percentage with one decimal; `n/a` when unavailable.
/// 20.0 → "+20.0%" | -3.46 → "-3.5%"
pub fn fmt_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let text = format!("{:.1}", v);
            if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
                "0.0%".to_string()
            } else if v > 0.0 {
                format!("+{}%", text)
            } else {
                format!("{}%", text)
            }
        }
        _ => "n/a".to_string(),
    }
}
