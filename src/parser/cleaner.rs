use chrono::{Days, NaiveDate};

// ── Field parsers ─────────────────────────────────────────────────────────────

/// Parse a locale-formatted amount.
/// "45 222,62" → 45222.62 | "1000,00" → 1000.0 | "12,5abc" → 12.5
///
/// Whitespace (thousands separators) is removed and only the first comma
/// becomes the decimal point; the longest leading decimal literal is read.
pub fn parse_amount(s: &str) -> Option<f64> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let normalised = compact.replacen(',', ".", 1);
    let value: f64 = leading_decimal(&normalised)?.parse().ok()?;
    value.is_finite().then_some(value)
}

/// Longest prefix of `s` that reads as `[sign] digits [. digits] [e [sign] digits]`.
fn leading_decimal(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digits += frac_end - (end + 1);
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    Some(&s[..end])
}

/// Remove the first occurrence of the unit marker and trim.
/// "01.01.2018 г." → "01.01.2018"
pub fn normalise_date_text(s: &str, unit_marker: &str) -> String {
    if unit_marker.is_empty() {
        return s.trim().to_string();
    }
    s.replacen(unit_marker, "", 1).trim().to_string()
}

/// Split `DD.MM.YYYY` into `(year, month, day)`.
///
/// Each component must be a positive integer, day ≤ 31 and month ≤ 12.
/// Anything after the third component is ignored.
pub fn parse_date_parts(s: &str) -> Option<(i32, u32, u32)> {
    let mut parts = s.split('.').map(str::trim);
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;

    if !(1..=31).contains(&day) || !(1..=12).contains(&month) || year <= 0 {
        return None;
    }
    Some((year, month, day))
}

/// Calendar date with day-of-month overflow rolled into the next month.
/// (2021, 2, 31) → 2021-03-03
pub fn date_from_parts(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_days(Days::new(u64::from(day.checked_sub(1)?)))
}

/// Parse normalized date text into a calendar date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let (year, month, day) = parse_date_parts(s)?;
    date_from_parts(year, month, day)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
