//! Output sinks and result types for filtering.
//!
//! ## Purpose
//!
//! This module defines where output records go. The executor hands every
//! accepted record to a `RecordSink`; the batch adapter collects them into a
//! `FilterResult`, one table per input segment.
//!
//! ## Design notes
//!
//! * **Flat records**: A record is a slice with one value per input column,
//!   the time column holding the output time. Rejected columns hold NaN.
//! * **Trailing columns**: `LeadingColumns` drops columns the filter needed
//!   internally but the caller did not ask for.
//! * **Ergonomics**: `FilterResult` implements `Display` for quick inspection.
//!
//! ## Invariants
//!
//! * Every record of a run has the same number of columns.
//! * Records of a segment are in output-time order.
//!
//! ## Non-goals
//!
//! * This module does not format records for files or perform I/O.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::evaluation::diagnostics::FilterDiagnostics;

// ============================================================================
// Record Sink
// ============================================================================

/// Destination of output records.
pub trait RecordSink<T> {
    /// Append one record.
    fn emit_record(&mut self, values: &[T]);
}

impl<T: Clone> RecordSink<T> for Vec<Vec<T>> {
    fn emit_record(&mut self, values: &[T]) {
        self.push(values.to_vec());
    }
}

/// Sink forwarding only the first `n_cols` values of every record.
pub struct LeadingColumns<'a, S: ?Sized> {
    sink: &'a mut S,
    n_cols: usize,
}

impl<'a, S: ?Sized> LeadingColumns<'a, S> {
    /// Wrap `sink`, keeping `n_cols` columns per record.
    pub fn new(sink: &'a mut S, n_cols: usize) -> Self {
        Self { sink, n_cols }
    }
}

impl<T, S: RecordSink<T> + ?Sized> RecordSink<T> for LeadingColumns<'_, S> {
    fn emit_record(&mut self, values: &[T]) {
        let n = self.n_cols.min(values.len());
        self.sink.emit_record(&values[..n]);
    }
}

// ============================================================================
// Result Structure
// ============================================================================

/// Filtered output of one or more segments.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult<T> {
    /// Number of columns per record.
    pub n_cols: usize,

    /// Index of the time column in each record; `None` when the
    /// independent variable was computed internally and not emitted.
    pub t_col: Option<usize>,

    /// Output records, one table per input segment.
    pub segments: Vec<Vec<Vec<T>>>,

    /// Run diagnostics.
    pub diagnostics: FilterDiagnostics,
}

impl<T: Float> FilterResult<T> {
    // ========================================================================
    // Query Methods
    // ========================================================================

    /// Total number of records over all segments.
    pub fn len(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    /// True if no record was emitted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All records, segment after segment.
    pub fn records(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.segments
            .iter()
            .flat_map(|segment| segment.iter().map(Vec::as_slice))
    }

    /// Output times of all records, empty without a time column.
    pub fn times(&self) -> Vec<T> {
        match self.t_col {
            Some(c) => self.column(c),
            None => Vec::new(),
        }
    }

    /// Column `c` of all records.
    pub fn column(&self, c: usize) -> Vec<T> {
        self.records().map(|record| record[c]).collect()
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for FilterResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Segments: {}", self.segments.len())?;
        writeln!(f, "  Records:  {}", self.len())?;
        match self.t_col {
            Some(c) => writeln!(f, "  Columns:  {} (time in column {c})", self.n_cols)?,
            None => writeln!(f, "  Columns:  {} (no time column)", self.n_cols)?,
        }
        writeln!(f)?;
        writeln!(f, "Filtered Data:")?;

        for (s, segment) in self.segments.iter().enumerate() {
            if self.segments.len() > 1 {
                writeln!(f, "> segment {s}")?;
            }

            // Show first 10 and last 10 records of long segments
            let n = segment.len();
            let rows: Vec<usize> = if n <= 20 {
                (0..n).collect()
            } else {
                (0..10).chain(n - 10..n).collect()
            };

            let mut prev = 0;
            for (i, &idx) in rows.iter().enumerate() {
                if i > 0 && idx != prev + 1 {
                    writeln!(f, "{:>10}", "...")?;
                }
                prev = idx;
                for value in segment[idx].iter() {
                    write!(f, " {:>12.6}", value)?;
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}
