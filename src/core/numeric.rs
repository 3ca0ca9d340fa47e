//! Rounding and division helpers shared by the extractors and the scorers

/// Round to two decimal places, half away from zero. Never returns `-0.0`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

/// `numerator / denominator`, or 0.0 when the denominator is zero.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Integer hundredths of a value already rounded to two decimals.
pub fn to_hundredths(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

pub fn from_hundredths(hundredths: i64) -> f64 {
    hundredths as f64 / 100.0
}
