//! Batch adapter for in-memory filtering.
//!
//! ## Purpose
//!
//! This module provides the batch execution adapter. It takes one or more
//! complete segments, filters them in order, and returns every output record
//! together with the run diagnostics.
//!
//! ## Design notes
//!
//! * **Loading**: Raw rows or columns are loaded into verified `Series`
//!   (NaN-time rows dropped, decreasing time rejected) before filtering.
//! * **Delegation**: Computation is delegated to the execution engine.
//! * **Repeatable**: Every call runs a fresh executor, so filtering the same
//!   data twice yields identical output.
//!
//! ## Key concepts
//!
//! * **Builder Pattern**: Fluent configuration validated by `build()`.
//! * **Tables from files**: With `std`, coefficient and width files named in
//!   the builder are read by `build()`; a missing or empty file is fatal.
//!
//! ## Invariants
//!
//! * Segments are filtered independently and in the order given.
//! * With several width tables there must be exactly one per segment.
//!
//! ## Non-goals
//!
//! * This adapter does not split a flat record stream into segments.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::{path::PathBuf, vec::Vec};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::coefficients::FilterKind;
use crate::algorithms::planner::OutputTimes;
use crate::algorithms::quality::QualityGate;
use crate::engine::executor::{FilterConfig, FilterExecutor};
use crate::engine::output::{FilterResult, LeadingColumns};
use crate::engine::validator::Validator;
use crate::math::distance::DistanceColumn;
use crate::math::order::ModeSelection;
use crate::primitives::errors::FilterError;
use crate::primitives::series::Series;
use crate::primitives::table::WidthTable;

// ============================================================================
// Batch Filter Builder
// ============================================================================

/// Builder for the batch filter.
#[derive(Debug, Clone)]
pub struct BatchFilterBuilder<T: Float> {
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

impl<T: Float> Default for BatchFilterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> BatchFilterBuilder<T> {
    /// Create a new batch filter builder with default parameters.
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

    // ========================================================================
    // Setters
    // ========================================================================

    /// Set the filter kind and full width.
    pub fn filter(mut self, kind: FilterKind, width: T) -> Self {
        self.kind = Some(kind);
        self.width = Some(width);
        self
    }

    /// Enable or disable robust clipping.
    pub fn robust(mut self, enabled: bool) -> Self {
        self.robust = enabled;
        self
    }

    /// Enable or disable highpass output.
    pub fn highpass(mut self, enabled: bool) -> Self {
        self.highpass = enabled;
        self
    }

    /// Set the output times.
    pub fn output_times(mut self, times: OutputTimes<T>) -> Self {
        self.output_times = times;
        self
    }

    /// Set the gap tolerance.
    pub fn lack_width(mut self, lack: T) -> Self {
        self.gate.lack_width = Some(lack);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the batch processor.
    pub fn build(self) -> Result<BatchFilter<T>, FilterError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let width = self.width;
        let time_column = self.time_column;
        let distance_column = self.distance_column;
        let config = self.into_config()?;
        Validator::validate_config(&config, width)?;

        Ok(BatchFilter {
            config,
            time_column,
            distance_column,
        })
    }

    /// Resolve tables and defaults into an executor configuration.
    fn into_config(self) -> Result<FilterConfig<T>, FilterError> {
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

        Ok(FilterConfig {
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
        })
    }
}

/// Filter kind from the explicit choice, or custom when only coefficients
/// were supplied.
pub(crate) fn resolve_kind(
    kind: Option<FilterKind>,
    has_coefficients: bool,
) -> Result<FilterKind, FilterError> {
    match (kind, has_coefficients) {
        (Some(kind), _) => Ok(kind),
        (None, true) => Ok(FilterKind::Custom),
        (None, false) => Err(FilterError::MissingFilter),
    }
}

/// Read the coefficient and width files named in a builder.
#[cfg(feature = "std")]
pub(crate) fn load_table_files<T: Float>(
    coefficient_file: Option<&std::path::Path>,
    width_file: Option<&std::path::Path>,
    coefficients: &mut Option<Vec<T>>,
    width_tables: &mut Vec<WidthTable<T>>,
) -> Result<(), FilterError> {
    use crate::primitives::table::{read_coefficient_table, read_width_tables};

    if let Some(path) = coefficient_file {
        let table = read_coefficient_table(path)?;
        log::info!("read {} coefficient(s) from {}", table.len(), path.display());
        *coefficients = Some(table);
    }
    if let Some(path) = width_file {
        let tables = read_width_tables(path)?;
        log::info!("read {} width table(s) from {}", tables.len(), path.display());
        *width_tables = tables;
    }
    Ok(())
}

// ============================================================================
// Batch Filter Processor
// ============================================================================

/// Batch filter processor.
#[derive(Debug, Clone)]
pub struct BatchFilter<T: Float> {
    config: FilterConfig<T>,
    time_column: usize,
    distance_column: Option<DistanceColumn>,
}

impl<T: Float> BatchFilter<T> {
    /// The validated executor configuration.
    pub fn config(&self) -> &FilterConfig<T> {
        &self.config
    }

    /// Filter one segment given as row-major records.
    pub fn filter_rows<R: AsRef<[T]>>(&self, rows: &[R]) -> Result<FilterResult<T>, FilterError> {
        let series = Series::from_rows(rows, self.time_column)?;
        self.filter_series(core::slice::from_ref(&series))
    }

    /// Filter one segment given as columns.
    pub fn filter_columns(&self, columns: Vec<Vec<T>>) -> Result<FilterResult<T>, FilterError> {
        let series = Series::from_columns(columns, self.time_column)?;
        self.filter_series(core::slice::from_ref(&series))
    }

    /// Filter several segments given as row-major records.
    pub fn filter_segments<R: AsRef<[T]>>(
        &self,
        segments: &[Vec<R>],
    ) -> Result<FilterResult<T>, FilterError> {
        let series = segments
            .iter()
            .map(|rows| Series::from_rows(rows, self.time_column))
            .collect::<Result<Vec<_>, _>>()?;
        self.filter_series(&series)
    }

    /// Filter already loaded segments, in order.
    pub fn filter_series(&self, segments: &[Series<T>]) -> Result<FilterResult<T>, FilterError> {
        Validator::validate_width_table_count(self.config.width_tables.len(), segments.len())?;

        let mut executor = FilterExecutor::from_config(self.config.clone());
        let mut tables = Vec::with_capacity(segments.len());
        let mut shape = None;

        for series in segments {
            let mut records = Vec::new();
            match &self.distance_column {
                Some(distance) => {
                    let n_out = distance.output_columns(series.n_cols());
                    shape.get_or_insert((n_out, distance.output_time_column(series.n_cols())));
                    let converted = distance.apply(series);
                    executor.run_segment(&converted, &mut LeadingColumns::new(&mut records, n_out))?;
                }
                None => {
                    shape.get_or_insert((series.n_cols(), Some(series.t_col())));
                    executor.run_segment(series, &mut records)?;
                }
            }
            tables.push(records);
        }

        let (n_cols, t_col) = shape.unwrap_or((0, None));
        Ok(FilterResult {
            n_cols,
            t_col,
            segments: tables,
            diagnostics: executor.finish(),
        })
    }
}
