//! Run diagnostics for filtering.
//!
//! ## Purpose
//!
//! Conditions that do not abort a run are counted here instead of being
//! reported as they happen: skipped output points, suppressed segments,
//! multiple modes, rescaled coefficients. The counters accumulate across all
//! segments of a run and are logged once when the run finishes.
//!
//! ## Invariants
//!
//! * Counters only increase during a run.
//! * Merging two reports adds their counters.
//!
//! ## Non-goals
//!
//! * This module does not decide whether a point or column is skipped.

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Diagnostics Structure
// ============================================================================

/// Counters accumulated over a filtering run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterDiagnostics {
    /// Segments that were filtered.
    pub segments_filtered: usize,

    /// Segments skipped because they had fewer than two rows or a
    /// degenerate time step.
    pub segments_skipped: usize,

    /// Input rows dropped while loading because their time was NaN.
    pub rows_dropped: usize,

    /// Output records emitted.
    pub records_emitted: usize,

    /// Output points skipped for an empty or sparse window.
    pub points_skipped_window: usize,

    /// Output points outside the variable-width table's domain.
    pub points_skipped_domain: usize,

    /// Output points where the variable width could not be interpolated.
    pub interpolation_failures: usize,

    /// Column estimates where the mode filter found several modes.
    pub multiple_modes: usize,

    /// Original sum of custom coefficients that were rescaled to 1.
    pub coefficient_rescale: Option<f64>,
}

impl FilterDiagnostics {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the counters of `other` to this report.
    pub fn merge(&mut self, other: &FilterDiagnostics) {
        self.segments_filtered += other.segments_filtered;
        self.segments_skipped += other.segments_skipped;
        self.rows_dropped += other.rows_dropped;
        self.records_emitted += other.records_emitted;
        self.points_skipped_window += other.points_skipped_window;
        self.points_skipped_domain += other.points_skipped_domain;
        self.interpolation_failures += other.interpolation_failures;
        self.multiple_modes += other.multiple_modes;
        if self.coefficient_rescale.is_none() {
            self.coefficient_rescale = other.coefficient_rescale;
        }
    }

    /// Total number of output points that produced no record for a
    /// window-level reason.
    pub fn points_skipped(&self) -> usize {
        self.points_skipped_window + self.points_skipped_domain + self.interpolation_failures
    }

    /// Log the end-of-run summary.
    pub fn report(&self) {
        log::info!(
            "filtered {} segment(s), emitted {} record(s)",
            self.segments_filtered,
            self.records_emitted
        );
        if self.segments_skipped > 0 {
            log::warn!("{} segment(s) too short to filter", self.segments_skipped);
        }
        if self.rows_dropped > 0 {
            log::info!("{} row(s) with NaN time were skipped", self.rows_dropped);
        }
        if self.points_skipped() > 0 {
            log::info!(
                "{} output point(s) skipped ({} sparse window, {} outside width table, {} interpolation failures)",
                self.points_skipped(),
                self.points_skipped_window,
                self.points_skipped_domain,
                self.interpolation_failures
            );
        }
        if self.multiple_modes > 0 {
            log::info!(
                "multiple modes found at {} output point(s)",
                self.multiple_modes
            );
        }
        if let Some(sum) = self.coefficient_rescale {
            log::info!("custom coefficients summed to {sum} and were rescaled to 1");
        }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for FilterDiagnostics {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Filter Diagnostics:")?;
        writeln!(f, "  Segments filtered: {}", self.segments_filtered)?;
        writeln!(f, "  Segments skipped:  {}", self.segments_skipped)?;
        writeln!(f, "  Rows dropped:      {}", self.rows_dropped)?;
        writeln!(f, "  Records emitted:   {}", self.records_emitted)?;
        writeln!(f, "  Points skipped:    {}", self.points_skipped())?;
        writeln!(f, "  Multiple modes:    {}", self.multiple_modes)?;
        if let Some(sum) = self.coefficient_rescale {
            writeln!(f, "  Coefficients rescaled from sum {sum}")?;
        }
        Ok(())
    }
}
