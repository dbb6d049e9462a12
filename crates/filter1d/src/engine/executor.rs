//! Execution engine for time-domain filtering.
//!
//! ## Purpose
//!
//! This module runs the filter over one input segment at a time. For every
//! planned output time it moves the window, applies the window-level gates,
//! estimates each data column, and hands accepted records to a sink.
//!
//! ## Design notes
//!
//! * **Per segment**: Coefficients, output plan, window and column estimates
//!   are rebuilt for every segment; diagnostics accumulate across segments.
//! * **Variable widths**: The half-width is interpolated from a width table
//!   before the window moves, and the coefficients are rebuilt for the point.
//! * **No allocation per point**: The record and the robust work array live
//!   in a `FilterBuffer` reused across points, columns and segments.
//! * **Quiet hot loop**: Skipped points and columns are counted, not logged.
//!
//! ## Invariants
//!
//! * Records are emitted in output-time order, at most one per output time.
//! * A record is emitted only if at least one data column passed.
//! * Rejected columns are NaN in the emitted record.
//!
//! ## Non-goals
//!
//! * This module does not validate the configuration (handled by `validator`).
//! * This module does not split input into segments or read files.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::coefficients::{build_filter, FilterKind, FilterSetup};
use crate::algorithms::planner::{plan, OutputTimes};
use crate::algorithms::quality::{QualityGate, SideCounts};
use crate::algorithms::robustness::{clip, ColumnEstimate, OrderEstimate, OrderStatistic};
use crate::engine::output::RecordSink;
use crate::evaluation::diagnostics::FilterDiagnostics;
use crate::math::interpolation::interpolate;
use crate::math::order::ModeSelection;
use crate::primitives::buffer::FilterBuffer;
use crate::primitives::errors::FilterError;
use crate::primitives::series::Series;
use crate::primitives::table::WidthTable;
use crate::primitives::window::Window;

/// Window tolerance relative to the largest time step of a segment.
const EPSILON_SCALE: f64 = 1e-8;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for filter execution.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig<T> {
    /// Filter kind applied to every data column.
    pub kind: FilterKind,

    /// Nominal full width. Ignored for custom coefficients and width tables.
    pub width: T,

    /// Clip outliers before convolution.
    pub robust: bool,

    /// Report input minus filtered value.
    pub highpass: bool,

    /// Tie policy of the mode filter.
    pub mode_selection: ModeSelection,

    /// Coefficients of the custom kind.
    pub coefficients: Option<Vec<T>>,

    /// Width-versus-time tables: none, one shared, or one per segment.
    pub width_tables: Vec<WidthTable<T>>,

    /// Tap spacing; estimated per segment when `None`.
    pub sampling_interval: Option<T>,

    /// Keep output times closer than a half-width to the data ends.
    pub use_ends: bool,

    /// Per-column quality gates.
    pub gate: QualityGate<T>,

    /// Where output records are produced.
    pub output_times: OutputTimes<T>,
}

impl<T: Float> Default for FilterConfig<T> {
    fn default() -> Self {
        Self {
            kind: FilterKind::default(),
            width: T::zero(),
            robust: false,
            highpass: false,
            mode_selection: ModeSelection::default(),
            coefficients: None,
            width_tables: Vec::new(),
            sampling_interval: None,
            use_ends: false,
            gate: QualityGate::default(),
            output_times: OutputTimes::default(),
        }
    }
}

// ============================================================================
// Column Filter
// ============================================================================

/// Per-column estimation for one output point.
#[derive(Debug, Clone, Copy)]
pub struct ColumnFilter<T> {
    /// Filter kind.
    pub kind: FilterKind,
    /// Clip outliers before convolution.
    pub robust: bool,
    /// Quality gates.
    pub gate: QualityGate<T>,
    /// Estimator for the order-statistic kinds.
    pub order: OrderStatistic,
}

impl<T: Float> ColumnFilter<T> {
    /// Estimate one column at output time `t` from its window samples.
    ///
    /// `times` and `values` cover the window rows. Returns `None` when the
    /// column fails a gate or has no usable sample.
    pub fn estimate(
        &self,
        t: T,
        times: &[T],
        values: &[T],
        setup: &FilterSetup<T>,
        work: &mut Vec<T>,
        column: &mut ColumnEstimate<T>,
    ) -> Option<OrderEstimate<T>> {
        if self.gate.column_lacks_data(times, values) {
            return None;
        }

        // Robust pass: collect present samples, gate symmetry, estimate
        let mut clip_at = None;
        if self.robust || !self.kind.is_convolution() {
            work.clear();
            let mut counts = SideCounts::default();
            for (&ts, &v) in times.iter().zip(values.iter()) {
                if !v.is_nan() {
                    work.push(v);
                    counts.record(ts, t);
                }
            }
            if work.is_empty() || self.gate.is_asymmetric(counts) {
                return None;
            }

            if !self.kind.is_convolution() {
                if self.gate.too_few_samples(work.len()) {
                    return None;
                }
                return self.order.estimate(work, column);
            }
            clip_at = Some(column.location_scale(work));
        }

        // Convolution pass
        let coefficients = setup.coefficients.as_ref()?;
        let mut weight_sum = T::zero();
        let mut data_sum = T::zero();
        let mut n = 0usize;
        let mut counts = SideCounts::default();
        for (&ts, &v) in times.iter().zip(values.iter()) {
            if v.is_nan() {
                continue;
            }
            let Some(w) = coefficients.tap(t - ts) else {
                continue;
            };
            let v = match clip_at {
                Some((location, scale)) => clip(v, location, scale),
                None => v,
            };
            weight_sum = weight_sum + w;
            data_sum = data_sum + w * v;
            n += 1;
            counts.record(ts, t);
        }

        if n == 0 {
            return None;
        }
        if clip_at.is_none() && self.gate.is_asymmetric(counts) {
            return None;
        }
        if self.gate.weight_too_low(weight_sum, n) {
            return None;
        }

        let value = if coefficients.is_operator() {
            data_sum
        } else if weight_sum == T::zero() {
            return None;
        } else {
            data_sum / weight_sum
        };
        Some(OrderEstimate {
            value,
            multiple_modes: false,
        })
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Runs a filter configuration over successive segments.
#[derive(Debug, Clone)]
pub struct FilterExecutor<T: Float> {
    config: FilterConfig<T>,
    buffer: FilterBuffer<T>,
    estimates: Vec<ColumnEstimate<T>>,
    diagnostics: FilterDiagnostics,
    segments_seen: usize,
}

impl<T: Float> FilterExecutor<T> {
    // ========================================================================
    // Constructor and Accessors
    // ========================================================================

    /// Create an executor from a validated configuration.
    pub fn from_config(config: FilterConfig<T>) -> Self {
        Self {
            config,
            buffer: FilterBuffer::default(),
            estimates: Vec::new(),
            diagnostics: FilterDiagnostics::new(),
            segments_seen: 0,
        }
    }

    /// The configuration being executed.
    pub fn config(&self) -> &FilterConfig<T> {
        &self.config
    }

    /// Diagnostics accumulated so far.
    pub fn diagnostics(&self) -> &FilterDiagnostics {
        &self.diagnostics
    }

    /// Number of segments passed to `run_segment` so far.
    pub fn segments_seen(&self) -> usize {
        self.segments_seen
    }

    /// Log the end-of-run report and return the diagnostics.
    pub fn finish(self) -> FilterDiagnostics {
        self.diagnostics.report();
        self.diagnostics
    }

    // ========================================================================
    // Main Loop
    // ========================================================================

    /// Filter one segment, emitting accepted records into `sink`.
    ///
    /// Returns the number of records emitted. Segments with fewer than two
    /// rows, or a convolution filter without a usable time step, are skipped
    /// with a warning.
    pub fn run_segment<S>(&mut self, series: &Series<T>, sink: &mut S) -> Result<usize, FilterError>
    where
        S: RecordSink<T> + ?Sized,
    {
        let segment = self.segments_seen;
        self.segments_seen += 1;
        self.diagnostics.rows_dropped += series.dropped_rows();

        let n_rows = series.n_rows();
        let n_cols = series.n_cols();
        let t_col = series.t_col();
        log::debug!(
            "segment {segment}: {n_rows} row(s), {} dropped for NaN time",
            series.dropped_rows()
        );

        if n_rows < 2 {
            log::warn!("segment {segment}: {n_rows} row(s), too short to filter");
            self.diagnostics.segments_skipped += 1;
            return Ok(0);
        }

        let time = series.time();
        let (first, last) = series.time_span();
        let eps = series.max_time_step() * T::from(EPSILON_SCALE).unwrap();
        let dt = self
            .config
            .sampling_interval
            .unwrap_or_else(|| (last - first) / T::from(n_rows - 1).unwrap());

        if self.config.kind.is_convolution() && !(dt.is_finite() && dt > T::zero()) {
            log::warn!("segment {segment}: time does not advance, cannot place filter taps");
            self.diagnostics.segments_skipped += 1;
            return Ok(0);
        }

        let table_idx = self.width_table_index(segment)?;
        let table = table_idx.map(|i| &self.config.width_tables[i]);

        // Fixed-width filters are built once per segment
        let fixed = match table {
            Some(_) => None,
            None => {
                let setup = build_filter(
                    self.config.kind,
                    self.config.width,
                    dt,
                    self.config.coefficients.as_deref(),
                )?;
                if let Some(sum) = setup.rescaled_from {
                    if self.diagnostics.coefficient_rescale.is_none() {
                        let sum = sum.to_f64().unwrap_or(f64::NAN);
                        log::info!("custom coefficients sum to {sum}, rescaling to 1");
                        self.diagnostics.coefficient_rescale = Some(sum);
                    }
                }
                Some(setup)
            }
        };

        let use_ends = self.config.use_ends;
        let output_plan = match &fixed {
            Some(setup) => plan(time, &self.config.output_times, setup.half_width, use_ends, eps),
            None => plan(time, &self.config.output_times, T::zero(), true, eps),
        };

        log::info!(
            "segment {segment}: {} filter, width {}, resolution {}, start {}, stop {}",
            self.config.kind.name(),
            fixed
                .as_ref()
                .map_or(f64::NAN, |s| s.filter_width.to_f64().unwrap_or(f64::NAN)),
            dt.to_f64().unwrap_or(f64::NAN),
            output_plan.times.first().and_then(|t| t.to_f64()).unwrap_or(f64::NAN),
            output_plan.times.last().and_then(|t| t.to_f64()).unwrap_or(f64::NAN),
        );

        // Per-segment state
        self.estimates.clear();
        self.estimates.extend((0..n_cols).map(|c| {
            if c == t_col {
                ColumnEstimate::new(None)
            } else {
                ColumnEstimate::new(series.extrema(c))
            }
        }));

        let filter = ColumnFilter {
            kind: self.config.kind,
            robust: self.config.robust,
            gate: self.config.gate,
            order: OrderStatistic {
                kind: self.config.kind,
                mode_selection: self.config.mode_selection,
            },
        };
        let highpass = self.config.highpass;
        let interpolation_failures = self.diagnostics.interpolation_failures;

        let mut window = Window::new();
        let mut variable: Option<FilterSetup<T>> = None;
        let mut emitted = 0;

        for (k, &t) in output_plan.times.iter().enumerate() {
            let setup = match (&fixed, table) {
                (Some(setup), _) => setup,
                (None, Some(table)) => {
                    let (lo, hi) = table.domain();
                    if !(t >= lo && t <= hi) {
                        self.diagnostics.points_skipped_domain += 1;
                        continue;
                    }
                    let rebuilt = interpolate(table.times(), table.widths(), t)
                        .and_then(|width| build_filter(filter.kind, width, dt, None).ok());
                    let Some(rebuilt) = rebuilt else {
                        self.diagnostics.interpolation_failures += 1;
                        continue;
                    };
                    if !use_ends && !output_plan.admits(t, rebuilt.half_width, eps) {
                        continue;
                    }
                    &*variable.insert(rebuilt)
                }
                (None, None) => return Err(FilterError::EmptyWidthTable),
            };

            window.advance(time, t, setup.half_width, eps);
            if window.is_empty()
                || filter.gate.window_lacks_data(setup.filter_width, window.len())
            {
                self.diagnostics.points_skipped_window += 1;
                continue;
            }

            let rows = window.range();
            let times = &time[rows.clone()];
            self.buffer.prepare(n_cols, T::nan());
            let mut any_passed = false;

            for c in 0..n_cols {
                if c == t_col {
                    continue;
                }
                let column = series.column(c);
                let estimate = filter.estimate(
                    t,
                    times,
                    &column[rows.clone()],
                    setup,
                    self.buffer.work.as_vec_mut(),
                    &mut self.estimates[c],
                );
                let Some(estimate) = estimate else {
                    continue;
                };

                if estimate.multiple_modes {
                    self.diagnostics.multiple_modes += 1;
                }
                self.buffer.record[c] = if highpass {
                    column[output_plan.rows[k]] - estimate.value
                } else {
                    estimate.value
                };
                any_passed = true;
            }

            if !any_passed {
                continue;
            }
            self.buffer.record[t_col] = t;
            sink.emit_record(&self.buffer.record);
            emitted += 1;
        }

        let failures = self.diagnostics.interpolation_failures - interpolation_failures;
        if failures > 0 {
            log::warn!("segment {segment}: width interpolation failed at {failures} output time(s)");
        }

        self.diagnostics.segments_filtered += 1;
        self.diagnostics.records_emitted += emitted;
        Ok(emitted)
    }

    /// Width table used for segment `segment`, if variable widths are on.
    fn width_table_index(&self, segment: usize) -> Result<Option<usize>, FilterError> {
        match self.config.width_tables.len() {
            0 => Ok(None),
            1 => Ok(Some(0)),
            n if segment < n => Ok(Some(segment)),
            n => Err(FilterError::WidthTableSegments {
                tables: n,
                segments: segment + 1,
            }),
        }
    }
}
