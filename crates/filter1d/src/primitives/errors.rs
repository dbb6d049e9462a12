//! Error types for filtering operations.
//!
//! ## Purpose
//!
//! This module defines every condition that aborts a filtering run: malformed
//! input segments, invalid filter parameters, and unusable coefficient or
//! width tables. Conditions that only suppress a single output point or a
//! single column are not errors; they are counted in the run diagnostics.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., offending row, limits).
//! * **Deferred**: Builder misuse is recorded and surfaced by `build()`.
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Empty segments, ragged rows, decreasing time.
//! 2. **Parameter validation**: Filter width, increments, gate thresholds.
//! 3. **Table validation**: Empty, unreadable, or unordered auxiliary tables.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Numeric values in errors are reported as `f64`.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for filtering operations.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// The input segment holds no rows.
    EmptyInput,

    /// Every record needs a time column plus at least one data column.
    TooFewColumns {
        /// Number of columns provided.
        got: usize,
        /// Minimum required columns.
        min: usize,
    },

    /// The time column index lies outside the record.
    InvalidTimeColumn {
        /// Requested time column.
        col: usize,
        /// Number of columns in each record.
        n_cols: usize,
    },

    /// A row has a different number of columns than the first row.
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Number of columns found in that row.
        got: usize,
        /// Number of columns expected.
        expected: usize,
    },

    /// Time decreases between two consecutive rows of a segment.
    TimeDecreasing {
        /// Index of the row where time went backwards.
        row: usize,
        /// Time of the preceding row.
        previous: f64,
        /// Time of the offending row.
        current: f64,
    },

    /// Filter width must be positive and finite.
    InvalidWidth(f64),

    /// Sampling or output increments must be positive and finite.
    InvalidIncrement(f64),

    /// Lack-of-data width must lie in `[0, width]`.
    InvalidLackWidth {
        /// The lack-of-data width provided.
        lack: f64,
        /// The full filter width.
        width: f64,
    },

    /// Symmetry coefficient must lie in `[0, 1]`.
    InvalidSymmetry(f64),

    /// Quality factor is out of range for the selected filter kind.
    InvalidQuality(f64),

    /// The requested output interval is shorter than the filter width.
    OutputIntervalTooShort {
        /// Length of the requested output interval.
        interval: f64,
        /// Full filter width.
        width: f64,
    },

    /// No filter kind was configured.
    MissingFilter,

    /// A custom filter needs at least one coefficient.
    EmptyCoefficientTable,

    /// A variable-width filter needs at least one time/width pair.
    EmptyWidthTable,

    /// Width tables must be shared by all segments or given one per segment.
    WidthTableSegments {
        /// Number of width tables supplied.
        tables: usize,
        /// Number of input segments.
        segments: usize,
    },

    /// An auxiliary table is not sorted by its first column.
    UnorderedTable(String),

    /// Input contains a value that cannot be used (e.g., infinite width).
    InvalidNumericValue(String),

    /// An auxiliary table could not be read or parsed.
    TableRead(String),

    /// Two configured options cannot be combined.
    IncompatibleOptions(&'static str),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input segment is empty"),
            Self::TooFewColumns { got, min } => {
                write!(f, "Too few columns: got {got}, need at least {min}")
            }
            Self::InvalidTimeColumn { col, n_cols } => {
                write!(f, "Invalid time column: {col} (records have {n_cols} columns)")
            }
            Self::RaggedRows { row, got, expected } => {
                write!(f, "Row {row} has {got} columns, expected {expected}")
            }
            Self::TimeDecreasing {
                row,
                previous,
                current,
            } => {
                write!(
                    f,
                    "Time decreases at row {row} ({previous} -> {current}); sort the input first"
                )
            }
            Self::InvalidWidth(width) => {
                write!(f, "Invalid filter width: {width} (must be > 0)")
            }
            Self::InvalidIncrement(inc) => {
                write!(f, "Invalid increment: {inc} (must be > 0)")
            }
            Self::InvalidLackWidth { lack, width } => {
                write!(
                    f,
                    "Invalid lack-of-data width: {lack} (must be in [0, {width}])"
                )
            }
            Self::InvalidSymmetry(s) => {
                write!(f, "Invalid symmetry coefficient: {s} (must be in [0, 1])")
            }
            Self::InvalidQuality(q) => write!(f, "Invalid quality factor: {q}"),
            Self::OutputIntervalTooShort { interval, width } => {
                write!(
                    f,
                    "Output interval {interval} is shorter than the filter width {width}"
                )
            }
            Self::MissingFilter => write!(f, "No filter kind was configured"),
            Self::EmptyCoefficientTable => write!(f, "Custom coefficient table is empty"),
            Self::EmptyWidthTable => write!(f, "Variable width table is empty"),
            Self::WidthTableSegments { tables, segments } => {
                write!(
                    f,
                    "Got {tables} width tables for {segments} segments (need 1 or one per segment)"
                )
            }
            Self::UnorderedTable(msg) => write!(f, "Unordered table: {msg}"),
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::TableRead(msg) => write!(f, "Could not read table: {msg}"),
            Self::IncompatibleOptions(msg) => write!(f, "Incompatible options: {msg}"),
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for FilterError {}
