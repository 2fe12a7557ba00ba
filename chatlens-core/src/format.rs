//! Formatting helpers shared across the summary binder and exporters.

/// Format a count with comma thousands separators (e.g., "13,146").
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Round a document number to a whole count.
pub fn whole(value: f64) -> i64 {
    value.round() as i64
}

/// Format a value with exactly one decimal place (e.g., "16.4").
///
/// Exact halves round away from zero, so 12.25 is "12.3". Values that only
/// look like halves in decimal (16.45 is stored just below) round down.
pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", round_exact_half(value))
}

/// Format a percentage with one decimal place and a `%` suffix.
pub fn percent(value: f64) -> String {
    format!("{}%", one_decimal(value))
}

/// `{:.1}` breaks exact ties to even. The only doubles sitting exactly on a
/// one-decimal tie are odd multiples of 0.25, and for those `value * 10.0`
/// is exact.
fn round_exact_half(value: f64) -> f64 {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && (value * 2.0).fract() != 0.0 {
        (value * 10.0).round() / 10.0
    } else {
        value
    }
}

/// Format a series value the way chart tooltips show it: integers without
/// a fractional part, everything else as given.
pub fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
