//! Streaming adapter for segment-at-a-time filtering.
//!
//! ## Purpose
//!
//! This module provides the streaming execution adapter. Segments are
//! filtered as they arrive and each accepted record is handed straight to a
//! caller-supplied sink, so output never accumulates in the filter.
//!
//! ## Design notes
//!
//! * **Sink-based output**: Records go to any `RecordSink`, such as a writer
//!   wrapper or a plain `Vec<Vec<T>>`.
//! * **Persistent executor**: Diagnostics and the segment counter carry
//!   across calls until `finalize()` resets them.
//!
//! ## Key concepts
//!
//! * **Segment index**: The n-th segment processed uses the n-th width table
//!   when several are configured.
//! * **Finalize**: Logs the run report and returns the diagnostics.
//!
//! ## Non-goals
//!
//! * This adapter does not buffer records across segment boundaries.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::{path::PathBuf, vec::Vec};

// External dependencies
use core::mem;
use num_traits::Float;

// Internal dependencies
use crate::adapters::batch::resolve_kind;
#[cfg(feature = "std")]
use crate::adapters::batch::load_table_files;
use crate::algorithms::coefficients::FilterKind;
use crate::algorithms::planner::OutputTimes;
use crate::algorithms::quality::QualityGate;
use crate::engine::executor::{FilterConfig, FilterExecutor};
use crate::engine::output::{LeadingColumns, RecordSink};
use crate::engine::validator::Validator;
use crate::evaluation::diagnostics::FilterDiagnostics;
use crate::math::distance::DistanceColumn;
use crate::math::order::ModeSelection;
use crate::primitives::errors::FilterError;
use crate::primitives::series::Series;
use crate::primitives::table::WidthTable;

// ============================================================================
// Streaming Filter Builder
// ============================================================================

/// Builder for the streaming filter.
#[derive(Debug, Clone)]
pub struct StreamingFilterBuilder<T: Float> {
    /// Filter kind; inferred as custom when only coefficients are given.
    pub kind: Option<FilterKind>,

    /// Nominal full filter width.
    pub width: Option<T>,

    /// Clip outliers before convolution.
    pub robust: bool,

    /// Report input minus filtered value.
    pub highpass: bool,

    /// Tie policy of the mode filter.
    pub mode_selection: ModeSelection,

    /// Custom convolution coefficients.
    pub coefficients: Option<Vec<T>>,

    /// Variable-width tables.
    pub width_tables: Vec<WidthTable<T>>,

    /// Tap spacing (estimated per segment if unset).
    pub sampling_interval: Option<T>,

    /// Keep output times near the data ends.
    pub use_ends: bool,

    /// Quality gates applied to every window.
    pub gate: QualityGate<T>,

    /// Where output records are produced.
    pub output_times: OutputTimes<T>,

    /// Index of the time column in raw rows.
    pub time_column: usize,

    /// Filter against along-track distance instead of time.
    pub distance_column: Option<DistanceColumn>,

    /// Coefficient table read at build time.
    #[cfg(feature = "std")]
    pub coefficient_file: Option<PathBuf>,

    /// Width table(s) read at build time.
    #[cfg(feature = "std")]
    pub width_file: Option<PathBuf>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for StreamingFilterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> StreamingFilterBuilder<T> {
    /// Create a new streaming filter builder with default parameters.
    fn new() -> Self {
        Self {
            kind: None,
            width: None,
            robust: false,
            highpass: false,
            mode_selection: ModeSelection::default(),
            coefficients: None,
            width_tables: Vec::new(),
            sampling_interval: None,
            use_ends: false,
            gate: QualityGate::default(),
            output_times: OutputTimes::Native,
            time_column: 0,
            distance_column: None,
            #[cfg(feature = "std")]
            coefficient_file: None,
            #[cfg(feature = "std")]
            width_file: None,
            duplicate_param: None,
        }
    }

    /// Set the filter kind and full width.
    pub fn filter(mut self, kind: FilterKind, width: T) -> Self {
        self.kind = Some(kind);
        self.width = Some(width);
        self
    }

    /// Set the time column of incoming rows.
    pub fn time_column(mut self, column: usize) -> Self {
        self.time_column = column;
        self
    }

    /// Build the streaming processor.
    pub fn build(self) -> Result<StreamingFilter<T>, FilterError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        #[allow(unused_mut)]
        let mut coefficients = self.coefficients;
        #[allow(unused_mut)]
        let mut width_tables = self.width_tables;

        #[cfg(feature = "std")]
        load_table_files(
            self.coefficient_file.as_deref(),
            self.width_file.as_deref(),
            &mut coefficients,
            &mut width_tables,
        )?;

        let kind = resolve_kind(self.kind, coefficients.is_some())?;
        let config = FilterConfig {
            kind,
            width: self.width.unwrap_or_else(T::zero),
            robust: self.robust,
            highpass: self.highpass,
            mode_selection: self.mode_selection,
            coefficients,
            width_tables,
            sampling_interval: self.sampling_interval,
            use_ends: self.use_ends,
            gate: self.gate,
            output_times: self.output_times,
        };
        Validator::validate_config(&config, self.width)?;

        Ok(StreamingFilter {
            executor: FilterExecutor::from_config(config),
            time_column: self.time_column,
            distance_column: self.distance_column,
        })
    }
}

// ============================================================================
// Streaming Filter Processor
// ============================================================================

/// Streaming filter processor.
#[derive(Debug, Clone)]
pub struct StreamingFilter<T: Float> {
    executor: FilterExecutor<T>,
    time_column: usize,
    distance_column: Option<DistanceColumn>,
}

impl<T: Float> StreamingFilter<T> {
    /// Filter one loaded segment into `sink`, returning the records emitted.
    pub fn process_segment<S>(&mut self, series: &Series<T>, sink: &mut S) -> Result<usize, FilterError>
    where
        S: RecordSink<T> + ?Sized,
    {
        match &self.distance_column {
            Some(distance) => {
                let n_out = distance.output_columns(series.n_cols());
                let converted = distance.apply(series);
                self.executor
                    .run_segment(&converted, &mut LeadingColumns::new(sink, n_out))
            }
            None => self.executor.run_segment(series, sink),
        }
    }

    /// Load row-major records as one segment and filter them into `sink`.
    pub fn process_rows<R, S>(&mut self, rows: &[R], sink: &mut S) -> Result<usize, FilterError>
    where
        R: AsRef<[T]>,
        S: RecordSink<T> + ?Sized,
    {
        let series = Series::from_rows(rows, self.time_column)?;
        self.process_segment(&series, sink)
    }

    /// Diagnostics accumulated since the last `finalize()`.
    pub fn diagnostics(&self) -> &FilterDiagnostics {
        self.executor.diagnostics()
    }

    /// Number of segments processed since the last `finalize()`.
    pub fn segments_processed(&self) -> usize {
        self.executor.segments_seen()
    }

    /// End the run: log the report, return the diagnostics and reset.
    pub fn finalize(&mut self) -> FilterDiagnostics {
        let fresh = FilterExecutor::from_config(self.executor.config().clone());
        mem::replace(&mut self.executor, fresh).finish()
    }
}
