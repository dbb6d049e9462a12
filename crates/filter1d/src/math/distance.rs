//! Along-track distance for spatial filtering.
//!
//! A track given by planar coordinates in columns 0 (x) and 1 (y) can be
//! filtered against the distance travelled instead of time. This module
//! computes that distance and adds it to a segment as a new last column
//! used as the independent variable. Every input column, the former time
//! column included, is then filtered as data. The distance column is emitted
//! only when asked for.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::series::Series;

/// Independent variable derived from the track coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceColumn {
    /// Planar distance along columns 0 (x) and 1 (y).
    Cartesian {
        /// Keep the distance as the last column of emitted records.
        append: bool,
    },
}

impl DistanceColumn {
    /// Rewrite `series` to use this distance as its independent variable.
    pub fn apply<T: Float>(&self, series: &Series<T>) -> Series<T> {
        match self {
            DistanceColumn::Cartesian { .. } => with_distance_column(series),
        }
    }

    /// True if emitted records keep the distance column.
    pub fn appends(&self) -> bool {
        match self {
            DistanceColumn::Cartesian { append } => *append,
        }
    }

    /// Columns of an emitted record for an input of `n_cols` columns.
    pub fn output_columns(&self, n_cols: usize) -> usize {
        if self.appends() {
            n_cols + 1
        } else {
            n_cols
        }
    }

    /// Time column of an emitted record for an input of `n_cols` columns.
    pub fn output_time_column(&self, n_cols: usize) -> Option<usize> {
        self.appends().then_some(n_cols)
    }
}

/// Cumulative Euclidean distance along the polyline `(x[i], y[i])`.
///
/// The first point is at distance zero. Steps touching a NaN coordinate add
/// nothing, so the result is always non-decreasing.
pub fn cumulative_distance<T: Float>(x: &[T], y: &[T]) -> Vec<T> {
    let n = x.len().min(y.len());
    let mut out = Vec::with_capacity(n);
    let mut total = T::zero();

    for i in 0..n {
        if i > 0 {
            let step = (x[i] - x[i - 1]).hypot(y[i] - y[i - 1]);
            if step.is_finite() {
                total = total + step;
            }
        }
        out.push(total);
    }
    out
}

/// Append the cumulative distance along columns 0 and 1 as a new last
/// column and make it the time column. The existing columns are untouched.
pub fn with_distance_column<T: Float>(series: &Series<T>) -> Series<T> {
    let distance = cumulative_distance(series.column(0), series.column(1));
    let mut columns = series.columns().to_vec();
    columns.push(distance);
    let t_col = columns.len() - 1;
    Series::from_verified(columns, t_col, series.dropped_rows())
}
