//! Robust location/scale and order-statistic estimation.
//!
//! ## Purpose
//!
//! This module turns the present samples of one column in one window into a
//! single value for the order-statistic filters (median, mode, extremes), and
//! into a location/scale pair used to clip outliers before a robust
//! convolution.
//!
//! ## Design notes
//!
//! * **Warm start**: Each column keeps a `ColumnEstimate` holding the search
//!   bracket and the previous estimate. Consecutive windows overlap heavily,
//!   so the previous median is a good first guess for the next one.
//! * **Scratch**: Estimation reorders and overwrites the work slice it is
//!   given; the caller refills it per column.
//!
//! ## Key concepts
//!
//! * **Location**: Median of the window.
//! * **Scale**: Median absolute deviation about the location (unscaled).
//! * **Clipping**: Samples more than `2.5 * scale` from the location are
//!   replaced by the location.
//!
//! ## Invariants
//!
//! * `min_location <= max_location` after a reset on a column with data.
//! * The scale bracket starts at `[0, half the column range]`.
//!
//! ## Non-goals
//!
//! * This module does not collect samples or apply quality gates.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::coefficients::FilterKind;
use crate::math::order::{extreme, median_hinted, mode, Extremum, ModeSelection, SignFilter};

/// Clipping threshold in units of the robust scale.
pub const CLIP_FACTOR: f64 = 2.5;

// ============================================================================
// Column Estimate
// ============================================================================

/// Warm-start state of one column, reset per segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnEstimate<T> {
    /// Lower bound of the location search.
    pub min_location: T,
    /// Upper bound of the location search.
    pub max_location: T,
    /// Previous location estimate.
    pub last_location: T,
    /// Lower bound of the scale search.
    pub min_scale: T,
    /// Upper bound of the scale search.
    pub max_scale: T,
    /// Previous scale estimate.
    pub last_scale: T,
}

impl<T: Float> ColumnEstimate<T> {
    /// Initial state for a column whose values span `extrema`.
    ///
    /// A column with no present values gets a NaN bracket; it never produces
    /// an estimate anyway.
    pub fn new(extrema: Option<(T, T)>) -> Self {
        let half = T::from(0.5).unwrap();
        let (lo, hi) = extrema.unwrap_or((T::nan(), T::nan()));
        let max_scale = half * (hi - lo);
        Self {
            min_location: lo,
            max_location: hi,
            last_location: half * (hi + lo),
            min_scale: T::zero(),
            max_scale,
            last_scale: half * max_scale,
        }
    }

    /// Median of `work`, searched from the previous estimate.
    pub fn location(&mut self, work: &mut [T]) -> T {
        let loc = median_hinted(work, self.min_location, self.max_location, self.last_location);
        self.last_location = loc;
        loc
    }

    /// Location and median absolute deviation of `work`.
    ///
    /// `work` is overwritten with absolute deviations.
    pub fn location_scale(&mut self, work: &mut [T]) -> (T, T) {
        let loc = self.location(work);
        for v in work.iter_mut() {
            *v = (*v - loc).abs();
        }
        let scale = median_hinted(work, self.min_scale, self.max_scale, self.last_scale);
        self.last_scale = scale;
        (loc, scale)
    }
}

/// Replace `value` by `location` when it lies more than `2.5 * scale` away.
#[inline]
pub fn clip<T: Float>(value: T, location: T, scale: T) -> T {
    if (value - location).abs() > T::from(CLIP_FACTOR).unwrap() * scale {
        location
    } else {
        value
    }
}

// ============================================================================
// Order-Statistic Estimator
// ============================================================================

/// Result of an order-statistic estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderEstimate<T> {
    /// Estimated value.
    pub value: T,
    /// The mode filter found several equally likely modes.
    pub multiple_modes: bool,
}

/// Order-statistic estimator for the non-convolution filter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrderStatistic {
    /// Filter kind being estimated.
    pub kind: FilterKind,
    /// Tie policy of the mode filter.
    pub mode_selection: ModeSelection,
}

impl OrderStatistic {
    /// Estimate the value of `work` for this filter kind.
    ///
    /// Returns `None` for empty input, for convolution kinds, and for signed
    /// extremes without a qualifying sample.
    pub fn estimate<T: Float>(
        &self,
        work: &mut [T],
        column: &mut ColumnEstimate<T>,
    ) -> Option<OrderEstimate<T>> {
        if work.is_empty() {
            return None;
        }

        let single = |value| {
            Some(OrderEstimate {
                value,
                multiple_modes: false,
            })
        };

        match self.kind {
            FilterKind::Median => single(column.location(work)),
            FilterKind::Mode => {
                let n = work.len();
                let (value, multiple_modes) = mode(work, n / 2, self.mode_selection);
                Some(OrderEstimate {
                    value,
                    multiple_modes,
                })
            }
            FilterKind::LowerAll => extreme(work, Extremum::Min, SignFilter::All).and_then(single),
            FilterKind::LowerPositive => {
                extreme(work, Extremum::Min, SignFilter::PositiveOnly).and_then(single)
            }
            FilterKind::UpperAll => extreme(work, Extremum::Max, SignFilter::All).and_then(single),
            FilterKind::UpperNegative => {
                extreme(work, Extremum::Max, SignFilter::NegativeOnly).and_then(single)
            }
            FilterKind::Boxcar | FilterKind::CosineArch | FilterKind::Gaussian | FilterKind::Custom => {
                None
            }
        }
    }
}
