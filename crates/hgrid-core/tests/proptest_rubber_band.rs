//! Property-based tests for the rubber-band curve.
//!
//! 1. Zero offset maps to zero
//! 2. Zero or negative distance maps to zero (no division by zero)
//! 3. Monotonically non-decreasing in offset
//! 4. Overscroll is compressed: offset > distance implies result < offset
//! 5. Output stays within [0, distance] for non-negative coefficients
//! 6. Arbitrary floats never produce NaN or infinity

use hgrid_core::rubber_band::{DEFAULT_COEFFICIENT, rubber_band};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn distance_strategy() -> impl Strategy<Value = f64> {
    1e-3f64..1e4
}

fn coefficient_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(DEFAULT_COEFFICIENT), 0.0f64..100.0]
}

fn offset_strategy() -> impl Strategy<Value = f64> {
    0.0f64..1e6
}

// ═══════════════════════════════════════════════════════════════════════
// 1–2. Degenerate inputs
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn zero_offset_is_zero(d in distance_strategy(), c in any::<f64>()) {
        prop_assert_eq!(rubber_band(0.0, d, c), 0.0);
    }

    #[test]
    fn non_positive_distance_is_zero(
        o in any::<f64>(),
        d in -1e6f64..=0.0,
        c in any::<f64>(),
    ) {
        prop_assert_eq!(rubber_band(o, d, c), 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Monotonicity
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn monotone_in_offset(
        a in offset_strategy(),
        b in offset_strategy(),
        d in distance_strategy(),
        c in coefficient_strategy(),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            rubber_band(lo, d, c) <= rubber_band(hi, d, c),
            "rb({}) > rb({}) for d={}, c={}", lo, hi, d, c
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4–5. Compression and range
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn overscroll_is_compressed(
        d in distance_strategy(),
        extra in 1e-3f64..1e5,
        c in coefficient_strategy(),
    ) {
        let o = d + extra;
        prop_assert!(rubber_band(o, d, c) < o);
    }

    #[test]
    fn result_within_distance(
        o in offset_strategy(),
        d in distance_strategy(),
        c in coefficient_strategy(),
    ) {
        let r = rubber_band(o, d, c);
        prop_assert!((0.0..=d).contains(&r), "rb={} outside [0, {}]", r, d);
    }

    #[test]
    fn self_distance_matches_closed_form(raw in 1e-3f64..1e4) {
        // With offset == distance the curve reduces to raw · c / (c + 1).
        let c = DEFAULT_COEFFICIENT;
        let expected = raw * c / (c + 1.0);
        let r = rubber_band(raw, raw, c);
        prop_assert!((r - expected).abs() <= 1e-9 * raw.max(1.0));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Totality
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn always_finite(o in any::<f64>(), d in any::<f64>(), c in any::<f64>()) {
        prop_assert!(rubber_band(o, d, c).is_finite());
    }
}
