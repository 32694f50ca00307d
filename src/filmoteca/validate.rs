//! Pure field validators.
//!
//! Interactive prompts loop over these until the input passes; flag-driven
//! invocations call them once and fail hard. Keeping them free of any I/O
//! makes both paths share one definition of "valid".

use chrono::NaiveDate;

/// Strict `YYYY-MM-DD`.
pub fn valid_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// An IMDb const: `tt` followed by digits. The empty string is accepted
/// because the key is optional.
pub fn valid_key(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }
    match s.strip_prefix("tt") {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Parse a personal rating and normalize its formatting.
///
/// Accepts a comma as the decimal separator, requires the value to fall in
/// `[0, 10]`, and strips redundant trailing zeros ("7,50" becomes "7.5",
/// "7.0" becomes "7"). The empty string maps to itself: it means "clear".
/// Returns `None` for anything non-numeric or out of range.
pub fn parse_rating(s: &str) -> Option<String> {
    if s.is_empty() {
        return Some(String::new());
    }
    let v: f64 = s.replace(',', ".").parse().ok()?;
    if !(0.0..=10.0).contains(&v) {
        return None;
    }
    if v.fract() == 0.0 {
        Some(format!("{}", v as i64))
    } else {
        Some(format!("{}", v))
    }
}
