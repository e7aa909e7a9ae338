#![forbid(unsafe_code)]

//! Rubber-band compression for overscroll.
//!
//! The curve is the classic iOS 6 overscroll formula:
//!
//! ```text
//! f(offset) = (1 − 1 / (offset · c / d + 1)) · d
//! ```
//!
//! which simplifies to `offset · c · d / (offset · c + d)`. It passes through
//! the origin, rises monotonically, and approaches `d` asymptotically, so
//! travel past the natural distance is compressed with diminishing returns.
//!
//! # Invariants
//!
//! 1. `rubber_band(0, d, c) == 0` for every `d > 0`.
//! 2. Non-decreasing in `offset` for fixed `d > 0`, `c ≥ 0`.
//! 3. `rubber_band(o, d, c) < o` whenever `o > d > 0` and `c ≥ 0`.
//! 4. `rubber_band(_, 0, _) == 0`.
//!
//! # Failure Modes
//!
//! - Zero or negative `distance`: returns 0 instead of dividing by zero.
//! - Negative `offset`: treated as 0. The formula has a pole at
//!   `offset = −d / c`, and no caller drags backwards into it.
//! - Non-finite inputs or results: 0.

/// Default coefficient used by the slide-to-confirm track.
pub const DEFAULT_COEFFICIENT: f64 = 4.5;

/// Compress `offset` against `distance` with the given stiffness
/// `coefficient`.
#[must_use]
pub fn rubber_band(offset: f64, distance: f64, coefficient: f64) -> f64 {
    if !distance.is_finite() || distance <= 0.0 || !coefficient.is_finite() {
        return 0.0;
    }
    let offset = if offset > 0.0 { offset } else { 0.0 };
    let banded = (1.0 - (1.0 / ((offset * coefficient / distance) + 1.0))) * distance;
    if banded.is_finite() { banded } else { 0.0 }
}
