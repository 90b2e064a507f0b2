//! Mathematical utility functions for traffic statistics
//!
//! Every helper here resolves a zero denominator to a defined value instead of
//! producing NaN or infinity.

/// Divide, returning 0.0 when the denominator is zero.
///
/// # Examples
/// ```
/// use promo_traffic::utils::math::safe_ratio;
///
/// assert_eq!(safe_ratio(10.0, 4.0), 2.5);
/// assert_eq!(safe_ratio(10.0, 0.0), 0.0);
/// ```
#[inline]
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Arithmetic mean with `max(len, 1)` as the divisor, so empty input yields 0.0
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len().max(1) as f64
}

/// Relative change `100 × (current/previous − 1)`.
///
/// Returns `None` when either operand is zero; callers render a placeholder.
///
/// # Examples
/// ```
/// use promo_traffic::utils::math::percent_change;
///
/// assert_eq!(percent_change(150, 100), Some(50.0));
/// assert_eq!(percent_change(50, 100), Some(-50.0));
/// assert_eq!(percent_change(0, 100), None);
/// assert_eq!(percent_change(100, 0), None);
/// ```
pub fn percent_change(current: u64, previous: u64) -> Option<f64> {
    if current == 0 || previous == 0 {
        None
    } else {
        Some(100.0 * (current as f64 / previous as f64 - 1.0))
    }
}
