//! High-level API for time-domain filtering.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for the filter configuration and the choice of an execution
//! adapter (Batch or Streaming).
//!
//! ## Design notes
//!
//! * **Ergonomic**: Only the filter itself is required; every gate is optional.
//! * **Polymorphic**: Marker types turn the builder into an adapter builder.
//! * **Validated**: Options are checked when `.build()` is called on the adapter.
//!
//! ## Key concepts
//!
//! * **Execution Adapters**: Batch (whole data set in memory) and Streaming
//!   (segment at a time into a sink).
//! * **Configuration Flow**: Builder pattern ending in `.adapter(Adapter::Type)`.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`FilterBuilder`] via `Filter1d::new()`.
//! 2. Chain configuration methods (`.filter()`, `.robust()`, etc.).
//! 3. Select an adapter via `.adapter(Adapter::Batch)` to get an execution builder.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::{path::PathBuf, vec::Vec};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::batch::BatchFilterBuilder;
use crate::adapters::streaming::StreamingFilterBuilder;
use crate::algorithms::quality::QualityGate;

// Publicly re-exported types
pub use crate::adapters::batch::BatchFilter;
pub use crate::adapters::streaming::StreamingFilter;
pub use crate::algorithms::coefficients::FilterKind;
pub use crate::algorithms::planner::OutputTimes;
pub use crate::engine::output::{FilterResult, RecordSink};
pub use crate::evaluation::diagnostics::FilterDiagnostics;
pub use crate::math::distance::DistanceColumn;
pub use crate::math::order::ModeSelection;
pub use crate::primitives::errors::FilterError;
pub use crate::primitives::series::Series;
pub use crate::primitives::table::{
    parse_coefficients, parse_output_times, parse_width_tables, WidthTable,
};
#[cfg(feature = "std")]
pub use crate::primitives::table::{read_coefficient_table, read_output_times, read_width_tables};

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Batch, Streaming};
}

/// Fluent builder for configuring the filter and execution mode.
#[derive(Debug, Clone)]
pub struct FilterBuilder<T> {
    /// Filter kind.
    pub kind: Option<FilterKind>,

    /// Nominal full width, in time units.
    pub width: Option<T>,

    /// Clip outliers before convolution.
    pub robust: Option<bool>,

    /// Report input minus filtered value.
    pub highpass: Option<bool>,

    /// Tie policy of the mode filter.
    pub mode_selection: Option<ModeSelection>,

    /// Custom convolution coefficients.
    pub coefficients: Option<Vec<T>>,

    /// Variable-width tables (one, or one per segment).
    pub width_tables: Option<Vec<WidthTable<T>>>,

    /// Tap spacing.
    pub sampling_interval: Option<T>,

    /// Keep output times near the data ends.
    pub use_ends: Option<bool>,

    /// Largest tolerated gap between present samples.
    pub lack_width: Option<T>,

    /// Largest tolerated left/right imbalance (0..=1).
    pub symmetry: Option<T>,

    /// Minimum mean weight, or minimum sample count for order statistics.
    pub quality: Option<T>,

    /// Requested output times.
    pub output_times: Option<OutputTimes<T>>,

    /// Time column in raw rows.
    pub time_column: Option<usize>,

    /// Along-track distance instead of time.
    pub distance_column: Option<DistanceColumn>,

    /// Coefficient table file.
    #[cfg(feature = "std")]
    pub coefficient_file: Option<PathBuf>,

    /// Width table file.
    #[cfg(feature = "std")]
    pub width_file: Option<PathBuf>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for FilterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> FilterBuilder<T> {
    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: FilterAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            kind: None,
            width: None,
            robust: None,
            highpass: None,
            mode_selection: None,
            coefficients: None,
            width_tables: None,
            sampling_interval: None,
            use_ends: None,
            lack_width: None,
            symmetry: None,
            quality: None,
            output_times: None,
            time_column: None,
            distance_column: None,
            #[cfg(feature = "std")]
            coefficient_file: None,
            #[cfg(feature = "std")]
            width_file: None,
            duplicate_param: None,
        }
    }

    /// Set the filter kind and its full width.
    ///
    /// The width is ignored for custom coefficients and for variable widths.
    pub fn filter(mut self, kind: FilterKind, width: T) -> Self {
        if self.kind.is_some() {
            self.duplicate_param = Some("filter");
        }
        self.kind = Some(kind);
        self.width = Some(width);
        self
    }

    /// Set the filter kind alone, for custom coefficients or variable widths.
    pub fn kind(mut self, kind: FilterKind) -> Self {
        if self.kind.is_some() {
            self.duplicate_param = Some("filter");
        }
        self.kind = Some(kind);
        self
    }

    /// Clip each column at 2.5 robust scales about its median before convolving.
    pub fn robust(mut self) -> Self {
        if self.robust.is_some() {
            self.duplicate_param = Some("robust");
        }
        self.robust = Some(true);
        self
    }

    /// Output the input value minus the filtered value.
    pub fn highpass(mut self) -> Self {
        if self.highpass.is_some() {
            self.duplicate_param = Some("highpass");
        }
        self.highpass = Some(true);
        self
    }

    /// Choose which mode to report when several are equally good.
    pub fn mode_selection(mut self, selection: ModeSelection) -> Self {
        if self.mode_selection.is_some() {
            self.duplicate_param = Some("mode_selection");
        }
        self.mode_selection = Some(selection);
        self
    }

    /// Use custom convolution coefficients, one per sampling interval.
    pub fn custom_coefficients(mut self, coefficients: Vec<T>) -> Self {
        if self.has_coefficients() {
            self.duplicate_param = Some("custom_coefficients");
        }
        self.coefficients = Some(coefficients);
        self
    }

    /// Use a single width table for every segment.
    pub fn variable_width(self, table: WidthTable<T>) -> Self {
        self.variable_widths(vec![table])
    }

    /// Use width tables, either one shared or one per segment.
    pub fn variable_widths(mut self, tables: Vec<WidthTable<T>>) -> Self {
        if self.has_width_tables() {
            self.duplicate_param = Some("variable_width");
        }
        self.width_tables = Some(tables);
        self
    }

    /// Set the sampling interval used to place filter taps.
    pub fn sampling_interval(mut self, dt: T) -> Self {
        if self.sampling_interval.is_some() {
            self.duplicate_param = Some("sampling_interval");
        }
        self.sampling_interval = Some(dt);
        self
    }

    /// Produce output up to the data ends instead of one half-width inside.
    pub fn use_ends(mut self) -> Self {
        if self.use_ends.is_some() {
            self.duplicate_param = Some("use_ends");
        }
        self.use_ends = Some(true);
        self
    }

    /// Reject a column when present samples leave a gap wider than `lack`.
    pub fn lack_width(mut self, lack: T) -> Self {
        if self.lack_width.is_some() {
            self.duplicate_param = Some("lack_width");
        }
        self.lack_width = Some(lack);
        self
    }

    /// Reject a column when its samples are too unevenly split around the output time.
    pub fn symmetry(mut self, symmetry: T) -> Self {
        if self.symmetry.is_some() {
            self.duplicate_param = Some("symmetry");
        }
        self.symmetry = Some(symmetry);
        self
    }

    /// Minimum mean weight (convolution) or sample count (order statistics).
    pub fn quality_factor(mut self, quality: T) -> Self {
        if self.quality.is_some() {
            self.duplicate_param = Some("quality_factor");
        }
        self.quality = Some(quality);
        self
    }

    /// Choose where output records are produced.
    pub fn output_times(mut self, times: OutputTimes<T>) -> Self {
        if self.output_times.is_some() {
            self.duplicate_param = Some("output_times");
        }
        self.output_times = Some(times);
        self
    }

    /// Set the time column of raw rows (default 0).
    pub fn time_column(mut self, column: usize) -> Self {
        if self.time_column.is_some() {
            self.duplicate_param = Some("time_column");
        }
        self.time_column = Some(column);
        self
    }

    /// Filter along cumulative x-y distance instead of time.
    ///
    /// Every input column, the time column included, is filtered as data.
    /// The distance is emitted as a last column only with `append`.
    pub fn distance_column(mut self, distance: DistanceColumn) -> Self {
        if self.distance_column.is_some() {
            self.duplicate_param = Some("distance_column");
        }
        self.distance_column = Some(distance);
        self
    }

    /// Read custom coefficients from a file at build time.
    #[cfg(feature = "std")]
    pub fn coefficient_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        if self.has_coefficients() {
            self.duplicate_param = Some("custom_coefficients");
        }
        self.coefficient_file = Some(path.into());
        self
    }

    /// Read width table(s) from a file at build time.
    #[cfg(feature = "std")]
    pub fn width_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        if self.has_width_tables() {
            self.duplicate_param = Some("variable_width");
        }
        self.width_file = Some(path.into());
        self
    }

    // Inline values and files fill the same slot.
    fn has_coefficients(&self) -> bool {
        #[cfg(feature = "std")]
        if self.coefficient_file.is_some() {
            return true;
        }
        self.coefficients.is_some()
    }

    fn has_width_tables(&self) -> bool {
        #[cfg(feature = "std")]
        if self.width_file.is_some() {
            return true;
        }
        self.width_tables.is_some()
    }

    fn gate(&self) -> QualityGate<T> {
        QualityGate {
            lack_width: self.lack_width,
            symmetry: self.symmetry,
            quality: self.quality,
        }
    }
}

// ============================================================================
// Adapter Markers
// ============================================================================

/// Trait for transitioning from a generic builder to an execution builder.
pub trait FilterAdapter<T: Float> {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`FilterBuilder`] into a specialized execution builder.
    fn convert(builder: FilterBuilder<T>) -> Self::Output;
}

/// Marker for in-memory batch processing.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> FilterAdapter<T> for Batch {
    type Output = BatchFilterBuilder<T>;

    fn convert(builder: FilterBuilder<T>) -> Self::Output {
        let mut result = BatchFilterBuilder::default();

        result.gate = builder.gate();
        result.kind = builder.kind;
        result.width = builder.width;
        if let Some(robust) = builder.robust {
            result.robust = robust;
        }
        if let Some(highpass) = builder.highpass {
            result.highpass = highpass;
        }
        if let Some(selection) = builder.mode_selection {
            result.mode_selection = selection;
        }
        result.coefficients = builder.coefficients;
        if let Some(tables) = builder.width_tables {
            result.width_tables = tables;
        }
        result.sampling_interval = builder.sampling_interval;
        if let Some(use_ends) = builder.use_ends {
            result.use_ends = use_ends;
        }
        if let Some(times) = builder.output_times {
            result.output_times = times;
        }
        if let Some(column) = builder.time_column {
            result.time_column = column;
        }
        result.distance_column = builder.distance_column;
        #[cfg(feature = "std")]
        {
            result.coefficient_file = builder.coefficient_file;
            result.width_file = builder.width_file;
        }
        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for segment-at-a-time streaming into a sink.
#[derive(Debug, Clone, Copy)]
pub struct Streaming;

impl<T: Float> FilterAdapter<T> for Streaming {
    type Output = StreamingFilterBuilder<T>;

    fn convert(builder: FilterBuilder<T>) -> Self::Output {
        let mut result = StreamingFilterBuilder::default();

        result.gate = builder.gate();
        result.kind = builder.kind;
        result.width = builder.width;
        if let Some(robust) = builder.robust {
            result.robust = robust;
        }
        if let Some(highpass) = builder.highpass {
            result.highpass = highpass;
        }
        if let Some(selection) = builder.mode_selection {
            result.mode_selection = selection;
        }
        result.coefficients = builder.coefficients;
        if let Some(tables) = builder.width_tables {
            result.width_tables = tables;
        }
        result.sampling_interval = builder.sampling_interval;
        if let Some(use_ends) = builder.use_ends {
            result.use_ends = use_ends;
        }
        if let Some(times) = builder.output_times {
            result.output_times = times;
        }
        if let Some(column) = builder.time_column {
            result.time_column = column;
        }
        result.distance_column = builder.distance_column;
        #[cfg(feature = "std")]
        {
            result.coefficient_file = builder.coefficient_file;
            result.width_file = builder.width_file;
        }
        result.duplicate_param = builder.duplicate_param;

        result
    }
}
