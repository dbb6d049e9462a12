//! Output-time planning.
//!
//! ## Purpose
//!
//! This module decides at which times output records are produced for a
//! segment: at the input times themselves (native), on a regular grid
//! (resampling), or at an explicit list of times. Unless the ends are kept,
//! output times closer than one half-width to either end of the data are
//! trimmed so every output window is fully populated.
//!
//! ## Design notes
//!
//! * **Native trimming** is scanned over the actual input times, so irregular
//!   sampling near the ends is handled exactly.
//! * **Resampling**: With only an increment, the grid is the data span rounded
//!   outward to increment multiples. With an explicit range, the range is
//!   pulled in to the data by whole increments only where it overhangs.
//! * **Nominal rows**: Every output time carries the input row it corresponds
//!   to, used as the reference sample for highpass output.
//! * **Bounds**: A plan keeps the interval its times were trimmed against,
//!   so a width that changes per point can be trimmed the same way later.
//!
//! ## Invariants
//!
//! * Output times are in the order given (non-decreasing for native and
//!   resampled plans).
//! * `rows[k]` is a valid row index for every planned time.
//!
//! ## Non-goals
//!
//! * This module does not inspect data columns.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// ============================================================================
// Output Times
// ============================================================================

/// Where output records are produced.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputTimes<T> {
    /// At the input times.
    Native,

    /// On a grid of the given increment covering the data.
    Increment(T),

    /// On a grid `min, min + inc, ...` up to `max`.
    Range {
        /// First grid time requested.
        min: T,
        /// Last grid time requested.
        max: T,
        /// Grid increment.
        inc: T,
    },

    /// At the listed times.
    List(Vec<T>),
}

impl<T> Default for OutputTimes<T> {
    fn default() -> Self {
        OutputTimes::Native
    }
}

impl<T: Float> OutputTimes<T> {
    /// True if output times are synthesized rather than copied from input.
    pub fn is_resampled(&self) -> bool {
        !matches!(self, OutputTimes::Native)
    }
}

// ============================================================================
// Output Plan
// ============================================================================

/// Ordered output times for one segment.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPlan<T> {
    /// Output times.
    pub times: Vec<T>,

    /// Input row nearest each output time.
    pub rows: Vec<usize>,

    /// Interval the half-width trimming is measured from: the data span for
    /// native and listed times, the resampled start and stop otherwise.
    pub bounds: (T, T),
}

impl<T: Float> OutputPlan<T> {
    /// Number of planned output times.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True if nothing is planned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// True if `t` lies at least `half_width` inside the plan's bounds.
    #[inline]
    pub fn admits(&self, t: T, half_width: T, eps: T) -> bool {
        admits(t, self.bounds.0, self.bounds.1, half_width, eps)
    }
}

/// True if an output at `t` is at least `half_width` from both ends of
/// `[first, last]` (within `eps`).
#[inline]
pub fn admits<T: Float>(t: T, first: T, last: T, half_width: T, eps: T) -> bool {
    t - first + eps >= half_width && last - t + eps >= half_width
}

/// Plan the output times of a segment whose (sorted) input times are `time`.
pub fn plan<T: Float>(
    time: &[T],
    requested: &OutputTimes<T>,
    half_width: T,
    use_ends: bool,
    eps: T,
) -> OutputPlan<T> {
    if time.is_empty() {
        return OutputPlan {
            times: Vec::new(),
            rows: Vec::new(),
            bounds: (T::nan(), T::nan()),
        };
    }
    let first = time[0];
    let last = time[time.len() - 1];

    match requested {
        OutputTimes::Native => {
            let rows: Vec<usize> = (0..time.len())
                .filter(|&i| use_ends || admits(time[i], first, last, half_width, eps))
                .collect();
            let times = rows.iter().map(|&i| time[i]).collect();
            OutputPlan {
                times,
                rows,
                bounds: (first, last),
            }
        }

        OutputTimes::Increment(inc) => {
            let start = (first / *inc).floor() * *inc;
            let stop = (last / *inc).ceil() * *inc;
            grid(time, start, stop, *inc, half_width, use_ends, eps)
        }

        OutputTimes::Range { min, max, inc } => {
            let mut start = *min;
            let mut stop = *max;
            if start < first {
                start = start + ((first - start) / *inc).floor() * *inc;
            }
            if stop > last {
                stop = stop - ((stop - last) / *inc).floor() * *inc;
            }
            grid(time, start, stop, *inc, half_width, use_ends, eps)
        }

        OutputTimes::List(list) => {
            let hw = if use_ends { T::zero() } else { half_width };
            let times: Vec<T> = list
                .iter()
                .copied()
                .filter(|&t| admits(t, first, last, hw, eps))
                .collect();
            let rows = times.iter().map(|&t| nearest_row(time, t)).collect();
            OutputPlan {
                times,
                rows,
                bounds: (first, last),
            }
        }
    }
}

fn grid<T: Float>(
    time: &[T],
    start: T,
    stop: T,
    inc: T,
    half_width: T,
    use_ends: bool,
    eps: T,
) -> OutputPlan<T> {
    let bounds = (start, stop);
    let (start, stop) = if use_ends {
        (start, stop)
    } else {
        (start + half_width, stop - half_width)
    };

    let mut times = Vec::new();
    if inc > T::zero() && start.is_finite() && stop.is_finite() {
        let mut i = 0usize;
        loop {
            let t = start + T::from(i).unwrap() * inc;
            if t > stop + eps {
                break;
            }
            times.push(t);
            i += 1;
        }
    }

    let rows = times.iter().map(|&t| nearest_row(time, t)).collect();
    OutputPlan {
        times,
        rows,
        bounds,
    }
}

/// Index of the row whose time is nearest `t`; ties go to the earlier row.
pub fn nearest_row<T: Float>(time: &[T], t: T) -> usize {
    let idx = time.partition_point(|&x| x < t);
    if idx == 0 {
        return 0;
    }
    if idx >= time.len() {
        return time.len() - 1;
    }
    if t - time[idx - 1] <= time[idx] - t {
        idx - 1
    } else {
        idx
    }
}
