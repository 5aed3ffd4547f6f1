//! Linear interpolation of threshold crossings on a discrete curve.

/// Fraction of the step `[prev, curr]` at which a linear segment reaches
/// `threshold`.
///
/// Expects `prev > threshold >= curr`; the result is then in `(0, 1]`.
/// A flat or rising segment yields 1.0.
pub fn crossing_fraction(prev: f64, curr: f64, threshold: f64) -> f64 {
    let drop = prev - curr;
    if drop <= 0.0 || !drop.is_finite() {
        return 1.0;
    }
    ((prev - threshold) / drop).clamp(0.0, 1.0)
}

/// Interpolated time at which a curve sampled at integer steps crosses
/// `threshold`, given the first step `step` whose value `curr` is at or
/// below it and the value `prev` one step earlier.
///
/// Returns `(step - 1) + fraction`.
pub fn interpolate_crossing(step: u32, prev: f64, curr: f64, threshold: f64) -> f64 {
    (f64::from(step) - 1.0) + crossing_fraction(prev, curr, threshold)
}
