//! Linear interpolation of tabulated series.
//!
//! ## Purpose
//!
//! Variable-width filtering reads a width-versus-time table and needs the
//! width at every output time. This module evaluates such a table at a query
//! point by linear interpolation between the bracketing nodes.
//!
//! ## Invariants
//!
//! * `x_known` is sorted in non-decreasing order.
//! * Queries outside `[x_known[0], x_known[n-1]]` are not extrapolated.
//!
//! ## Non-goals
//!
//! * This module does not provide higher-order (spline) interpolation.

// External dependencies
use num_traits::Float;

/// Evaluate the piecewise-linear function through `(x_known, y_known)` at
/// `x_query`.
///
/// Returns `None` when the table is empty, the columns differ in length, the
/// query is NaN, or the query lies outside the table's domain. An exact hit on
/// a node returns that node's value (the first one when times repeat).
pub fn interpolate<T: Float>(x_known: &[T], y_known: &[T], x_query: T) -> Option<T> {
    let n = x_known.len();
    if n == 0 || y_known.len() != n || x_query.is_nan() {
        return None;
    }
    if x_query < x_known[0] || x_query > x_known[n - 1] {
        return None;
    }

    let idx = x_known.partition_point(|&x| x < x_query);
    if idx < n && x_known[idx] == x_query {
        return Some(y_known[idx]);
    }
    if idx == 0 || idx >= n {
        return None;
    }

    let (x0, x1) = (x_known[idx - 1], x_known[idx]);
    let (y0, y1) = (y_known[idx - 1], y_known[idx]);
    let denom = x1 - x0;
    if denom <= T::zero() {
        return Some((y0 + y1) / T::from(2.0).unwrap());
    }

    Some(y0 + (x_query - x0) * (y1 - y0) / denom)
}
