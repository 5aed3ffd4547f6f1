//! Display rounding.

/// Round to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Round to one decimal place.
pub fn round_tenths(value: f64) -> f64 {
    round_to(value, 1)
}
