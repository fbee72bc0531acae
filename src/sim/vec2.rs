//! Degenerate-safe 2D vector helpers
//!
//! glam's `DVec2` covers the arithmetic; these helpers pin down the edge
//! cases the physics relies on: zero vectors normalize to zero
//! (`DVec2::normalize_or_zero`), projection onto a zero vector is zero, and
//! dividing by a zero scalar keeps the vector unchanged instead of producing
//! NaNs.

use glam::DVec2;

/// Project `v` onto `onto`.
///
/// Returns the zero vector when `onto` has zero magnitude. Idempotent for
/// input already parallel to `onto`.
#[inline]
pub fn project_onto_or_zero(v: DVec2, onto: DVec2) -> DVec2 {
    let len_sq = onto.length_squared();
    if len_sq == 0.0 {
        return DVec2::ZERO;
    }
    onto * (v.dot(onto) / len_sq)
}

/// Divide by a scalar. A zero divisor is a no-op, not an error.
#[inline]
pub fn div_or_keep(v: DVec2, k: f64) -> DVec2 {
    if k == 0.0 { v } else { v / k }
}
