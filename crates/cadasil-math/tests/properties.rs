//! Property-based tests for cadasil-math numerical functions.
//!
//! Uses proptest to verify the hazard primitives across many random inputs.

use cadasil_math::{
    clamp_probability, crossing_fraction, interpolate_crossing, proportional_hazard, round_tenths,
    survive_step, GompertzParams, MAX_ANNUAL_PROBABILITY,
};
use proptest::prelude::*;

/// Tolerance for floating point comparisons.
const TOL: f64 = 1e-12;

// ============================================================================
// proportional_hazard properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// The scaled probability stays a valid probability.
    #[test]
    fn proportional_hazard_in_unit_interval(q in 0.0..0.9f64, hr in 1.0..10.0f64) {
        let out = proportional_hazard(q, hr);
        prop_assert!((0.0..1.0).contains(&out), "q={} hr={} -> {}", q, hr, out);
    }

    /// A hazard ratio of at least one never lowers the probability.
    #[test]
    fn proportional_hazard_not_below_base(q in 0.0..0.99f64, hr in 1.0..10.0f64) {
        let out = proportional_hazard(q, hr);
        prop_assert!(out >= q - TOL, "q={} hr={} -> {}", q, hr, out);
    }

    /// Monotone in the hazard ratio.
    #[test]
    fn proportional_hazard_monotone_in_ratio(
        q in 0.0..0.99f64,
        hr in 1.0..8.0f64,
        delta in 0.0..4.0f64,
    ) {
        let lo = proportional_hazard(q, hr);
        let hi = proportional_hazard(q, hr + delta);
        prop_assert!(hi >= lo - TOL, "q={} hr={} delta={} lo={} hi={}", q, hr, delta, lo, hi);
    }

    /// Applying hr1 then hr2 equals applying hr1 * hr2.
    #[test]
    fn proportional_hazard_composes(q in 0.0..0.9f64, hr1 in 1.0..3.0f64, hr2 in 1.0..3.0f64) {
        let chained = proportional_hazard(proportional_hazard(q, hr1), hr2);
        let direct = proportional_hazard(q, hr1 * hr2);
        // chained may have hit the clamp on the inner result
        if proportional_hazard(q, hr1) < MAX_ANNUAL_PROBABILITY {
            prop_assert!((chained - direct).abs() < 1e-9, "chained={} direct={}", chained, direct);
        }
    }
}

// ============================================================================
// clamp / survival step properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn clamp_bounds(q in -10.0..10.0f64) {
        let out = clamp_probability(q);
        prop_assert!((0.0..=MAX_ANNUAL_PROBABILITY).contains(&out));
    }

    #[test]
    fn survive_step_non_increasing(s in 0.0..=1.0f64, q in 0.0..=0.99f64) {
        let next = survive_step(s, q);
        prop_assert!(next <= s);
        prop_assert!(next >= 0.0);
    }
}

// ============================================================================
// Gompertz properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn gompertz_increasing(a in 1e-6..1e-3f64, b in 0.01..0.2f64, x in 0.0..100.0f64, dx in 0.1..20.0f64) {
        let g = GompertzParams::new(a, b);
        prop_assert!(g.rate(x + dx) > g.rate(x));
    }
}

// ============================================================================
// Interpolation properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// A crossing strictly inside a step lands strictly inside it.
    #[test]
    fn crossing_strictly_between_steps(
        step in 1u32..60,
        prev in 0.5001..1.0f64,
        curr in 0.0..0.4999f64,
    ) {
        let t = interpolate_crossing(step, prev, curr, 0.5);
        prop_assert!(t > f64::from(step) - 1.0, "t={} step={}", t, step);
        prop_assert!(t < f64::from(step), "t={} step={}", t, step);
    }

    #[test]
    fn fraction_in_unit_interval(prev in 0.0..1.0f64, curr in 0.0..1.0f64) {
        let f = crossing_fraction(prev, curr, 0.5);
        prop_assert!((0.0..=1.0).contains(&f));
    }
}

// ============================================================================
// Rounding properties
// ============================================================================

proptest! {
    #[test]
    fn round_tenths_is_close(x in -1000.0..1000.0f64) {
        prop_assert!((round_tenths(x) - x).abs() <= 0.05 + 1e-9);
    }
}
