//! Annual event probabilities and proportional-hazards scaling.

/// Largest annual probability of death the model will use.
///
/// Keeping q strictly below 1 keeps `S(t+1) = S(t) · (1 - q)` away from an
/// exact zero, so the survival recursion stays well-defined.
pub const MAX_ANNUAL_PROBABILITY: f64 = 0.99;

/// Clamp an annual probability into `[0, MAX_ANNUAL_PROBABILITY]`.
///
/// NaN maps to 0.
pub fn clamp_probability(q: f64) -> f64 {
    if q.is_nan() {
        return 0.0;
    }
    q.clamp(0.0, MAX_ANNUAL_PROBABILITY)
}

/// Scale an annual probability by a hazard ratio.
///
/// Under proportional hazards the cumulative hazard is multiplied by `hr`,
/// so the survival over one period becomes `(1 - q)^hr`:
///
/// ```text
/// q' = 1 - (1 - q)^hr
/// ```
///
/// Computed in the log domain as `-expm1(hr · ln1p(-q))` so small q keep
/// their precision.
pub fn proportional_hazard(q: f64, hazard_ratio: f64) -> f64 {
    let q = clamp_probability(q);
    -(hazard_ratio * (-q).ln_1p()).exp_m1()
}

/// Survival after one period with annual probability of death `q`.
pub fn survive_step(survival: f64, q: f64) -> f64 {
    survival * (1.0 - q)
}
