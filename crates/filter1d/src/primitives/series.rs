//! Multi-column time series segments.
//!
//! ## Purpose
//!
//! This module provides the in-memory representation of one input segment:
//! a fixed number of columns of equal length, one of which holds the
//! independent variable ("time"). Segments are loaded once, verified, and
//! then read by the filter engine without modification.
//!
//! ## Design notes
//!
//! * **Column-major**: Each column is stored contiguously so the window scans
//!   one column at a time.
//! * **Loading**: Rows whose time is NaN are dropped while loading; every
//!   other cell may be NaN and is treated as missing by the filter.
//! * **Verification**: Time must be non-decreasing; the first violation aborts.
//!
//! ## Invariants
//!
//! * All columns have the same length, at least one row.
//! * At least two columns; `t_col` is a valid column index.
//! * The time column is NaN-free and non-decreasing.
//!
//! ## Non-goals
//!
//! * This module does not read files or parse text records.
//! * This module does not sort rows.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::FilterError;

/// One input segment: equal-length columns with a designated time column.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<T> {
    columns: Vec<Vec<T>>,
    t_col: usize,
    dropped_rows: usize,
}

impl<T: Float> Series<T> {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Load a segment from row-major records.
    ///
    /// Rows with a NaN time are skipped. Fails if the rows are ragged, the
    /// time column is out of range, or time decreases anywhere.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R], t_col: usize) -> Result<Self, FilterError> {
        let first = rows.first().ok_or(FilterError::EmptyInput)?;
        let n_cols = first.as_ref().len();
        Self::check_shape(n_cols, t_col)?;

        let mut columns: Vec<Vec<T>> = (0..n_cols).map(|_| Vec::with_capacity(rows.len())).collect();
        let mut last_time: Option<T> = None;
        let mut dropped_rows = 0;

        for (row, record) in rows.iter().enumerate() {
            let record = record.as_ref();
            if record.len() != n_cols {
                return Err(FilterError::RaggedRows {
                    row,
                    got: record.len(),
                    expected: n_cols,
                });
            }

            let time = record[t_col];
            if time.is_nan() {
                dropped_rows += 1;
                continue;
            }
            Self::check_order(row, last_time, time)?;
            last_time = Some(time);

            for (column, &value) in columns.iter_mut().zip(record.iter()) {
                column.push(value);
            }
        }

        Self::finish(columns, t_col, dropped_rows)
    }

    /// Load a segment from column-major data.
    pub fn from_columns(columns: Vec<Vec<T>>, t_col: usize) -> Result<Self, FilterError> {
        let n_cols = columns.len();
        if n_cols == 0 {
            return Err(FilterError::EmptyInput);
        }
        Self::check_shape(n_cols, t_col)?;

        let n_rows = columns[t_col].len();
        for column in columns.iter() {
            if column.len() != n_rows {
                return Err(FilterError::RaggedRows {
                    row: n_rows.min(column.len()),
                    got: column.len(),
                    expected: n_rows,
                });
            }
        }

        // Fast path: nothing to drop
        let has_nan_time = columns[t_col].iter().any(|t| t.is_nan());
        if !has_nan_time {
            let mut last_time = None;
            for (row, &time) in columns[t_col].iter().enumerate() {
                Self::check_order(row, last_time, time)?;
                last_time = Some(time);
            }
            return Self::finish(columns, t_col, 0);
        }

        let mut kept: Vec<Vec<T>> = (0..n_cols).map(|_| Vec::with_capacity(n_rows)).collect();
        let mut last_time = None;
        let mut dropped_rows = 0;
        for row in 0..n_rows {
            let time = columns[t_col][row];
            if time.is_nan() {
                dropped_rows += 1;
                continue;
            }
            Self::check_order(row, last_time, time)?;
            last_time = Some(time);
            for (dst, src) in kept.iter_mut().zip(columns.iter()) {
                dst.push(src[row]);
            }
        }

        Self::finish(kept, t_col, dropped_rows)
    }

    /// Build a segment from columns already known to satisfy every invariant.
    pub(crate) fn from_verified(columns: Vec<Vec<T>>, t_col: usize, dropped_rows: usize) -> Self {
        debug_assert!(t_col < columns.len());
        Self {
            columns,
            t_col,
            dropped_rows,
        }
    }

    fn check_shape(n_cols: usize, t_col: usize) -> Result<(), FilterError> {
        if n_cols < 2 {
            return Err(FilterError::TooFewColumns {
                got: n_cols,
                min: 2,
            });
        }
        if t_col >= n_cols {
            return Err(FilterError::InvalidTimeColumn { col: t_col, n_cols });
        }
        Ok(())
    }

    fn check_order(row: usize, last_time: Option<T>, time: T) -> Result<(), FilterError> {
        match last_time {
            Some(previous) if time < previous => Err(FilterError::TimeDecreasing {
                row,
                previous: previous.to_f64().unwrap_or(f64::NAN),
                current: time.to_f64().unwrap_or(f64::NAN),
            }),
            _ => Ok(()),
        }
    }

    fn finish(columns: Vec<Vec<T>>, t_col: usize, dropped_rows: usize) -> Result<Self, FilterError> {
        if columns[t_col].is_empty() {
            return Err(FilterError::EmptyInput);
        }
        Ok(Self {
            columns,
            t_col,
            dropped_rows,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.columns[self.t_col].len()
    }

    /// Number of columns, including the time column.
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Index of the time column.
    #[inline]
    pub fn t_col(&self) -> usize {
        self.t_col
    }

    /// The time column.
    #[inline]
    pub fn time(&self) -> &[T] {
        &self.columns[self.t_col]
    }

    /// Column `c`.
    #[inline]
    pub fn column(&self, c: usize) -> &[T] {
        &self.columns[c]
    }

    /// All columns.
    #[inline]
    pub fn columns(&self) -> &[Vec<T>] {
        &self.columns
    }

    /// Number of rows skipped while loading because their time was NaN.
    #[inline]
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Record at row `row`, in column order.
    pub fn row(&self, row: usize) -> Vec<T> {
        self.columns.iter().map(|c| c[row]).collect()
    }

    // ========================================================================
    // Summaries
    // ========================================================================

    /// Minimum and maximum of column `c`, ignoring NaN. `None` if all NaN.
    pub fn extrema(&self, c: usize) -> Option<(T, T)> {
        self.columns[c]
            .iter()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Largest step between consecutive times.
    pub fn max_time_step(&self) -> T {
        self.time()
            .windows(2)
            .fold(T::zero(), |acc, w| acc.max(w[1] - w[0]))
    }

    /// First and last time.
    #[inline]
    pub fn time_span(&self) -> (T, T) {
        let time = self.time();
        (time[0], time[time.len() - 1])
    }
}
