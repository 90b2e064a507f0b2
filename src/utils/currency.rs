//! Currency formatting utilities
//!
//! Amounts are stored as integer cents; these helpers convert for display
//! and for the ad-economics ratios, which work in whole currency units.

/// Cents per currency unit
const CENTS_PER_UNIT: f64 = 100.0;

/// Format cents as a dollar amount with two decimals
///
/// # Examples
/// ```
/// use promo_traffic::utils::currency::format_cents;
///
/// assert_eq!(format_cents(1250), "$12.50");
/// assert_eq!(format_cents(5), "$0.05");
/// assert_eq!(format_cents(-300), "-$3.00");
/// ```
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, abs / 100, abs % 100)
}

/// Convert cents to currency units
pub fn cents_to_dollars(cents: i64) -> f64 {
    cents as f64 / CENTS_PER_UNIT
}

/// Parse a decimal dollar string ("12.5", "$3.00", "-7") into cents
///
/// A leading minus applies to the whole amount, fractional cents included.
///
/// # Examples
/// ```
/// use promo_traffic::utils::currency::parse_dollars;
///
/// assert_eq!(parse_dollars("12.50"), Some(1250));
/// assert_eq!(parse_dollars("$7"), Some(700));
/// assert_eq!(parse_dollars("0.5"), Some(50));
/// assert_eq!(parse_dollars("-5.50"), Some(-550));
/// assert_eq!(parse_dollars("abc"), None);
/// ```
pub fn parse_dollars(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let s = s.strip_prefix('$').unwrap_or(s);
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || (whole.is_empty() && frac.is_empty()) {
        return None;
    }
    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let frac_cents: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };
    let cents = whole.checked_mul(100)?.checked_add(frac_cents)?;
    Some(if negative { -cents } else { cents })
}
