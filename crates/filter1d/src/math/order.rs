//! Order statistics: median, mode and signed extremes.
//!
//! ## Purpose
//!
//! This module provides the selection routines behind the order-statistic
//! filters and the robust location/scale estimates:
//!
//! * `median_inplace`: quickselect median.
//! * `median_hinted`: median search steered by a bracket and a prior guess,
//!   used to warm-start consecutive windows.
//! * `mode`: maximum-likelihood mode from the shortest half-sample interval.
//! * `extreme`: minimum or maximum with an optional sign restriction.
//!
//! ## Invariants
//!
//! * Inputs contain no NaN; callers filter missing samples first.
//! * Hints only affect the search path, never the returned value.
//!
//! ## Non-goals
//!
//! * Weighted quantiles.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

/// Iteration cap for the hinted median search before falling back to
/// quickselect.
const MAX_MEDIAN_ITERATIONS: usize = 64;

// ============================================================================
// Median
// ============================================================================

/// Median of `vals` using quickselect. Reorders `vals`.
///
/// Returns NaN for an empty slice.
pub fn median_inplace<T: Float>(vals: &mut [T]) -> T {
    let n = vals.len();
    if n == 0 {
        return T::nan();
    }

    let mid = n / 2;
    vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    let upper = vals[mid];

    if n % 2 == 0 {
        // Even length: average with the largest value of the lower half
        let lower = vals[..mid].iter().fold(vals[0], |acc, &v| acc.max(v));
        (lower + upper) / T::from(2.0).unwrap()
    } else {
        upper
    }
}

/// Median of `vals` searched from the bracket `[lo, hi]` and prior `guess`.
///
/// Each pass counts the samples below, equal to and above the current guess
/// together with the nearest sample on either side. The search stops once the
/// middle rank(s) fall on the guess or on one of its neighbours; otherwise the
/// bracket is narrowed to the side holding the median and bisected. Stale
/// hints are clamped to the sample range. Returns `guess` for an empty slice.
pub fn median_hinted<T: Float>(vals: &mut [T], lo: T, hi: T, guess: T) -> T {
    let n = vals.len();
    let two = T::from(2.0).unwrap();
    match n {
        0 => return guess,
        1 => return vals[0],
        2 => return (vals[0] + vals[1]) / two,
        _ => {}
    }

    let (min, max) = vals
        .iter()
        .fold((vals[0], vals[0]), |(a, b), &v| (a.min(v), b.max(v)));
    let (mut lo, mut hi) = (lo.max(min), hi.min(max));
    if !(lo <= hi) {
        lo = min;
        hi = max;
    }
    let mut guess = if guess >= lo && guess <= hi {
        guess
    } else {
        (lo + hi) / two
    };

    let (rank_lo, rank_hi) = if n % 2 == 1 {
        ((n - 1) / 2, (n - 1) / 2)
    } else {
        (n / 2 - 1, n / 2)
    };

    for _ in 0..MAX_MEDIAN_ITERATIONS {
        let mut below = 0usize;
        let mut equal = 0usize;
        let mut glb = T::neg_infinity();
        let mut lub = T::infinity();
        for &v in vals.iter() {
            if v < guess {
                below += 1;
                glb = glb.max(v);
            } else if v > guess {
                lub = lub.min(v);
            } else {
                equal += 1;
            }
        }

        let at_rank = |rank: usize| -> Option<T> {
            if below > 0 && rank == below - 1 {
                Some(glb)
            } else if rank >= below && rank < below + equal {
                Some(guess)
            } else if rank == below + equal {
                Some(lub)
            } else {
                None
            }
        };
        if let (Some(a), Some(b)) = (at_rank(rank_lo), at_rank(rank_hi)) {
            return if rank_lo == rank_hi { a } else { (a + b) / two };
        }

        if rank_lo + 1 < below {
            hi = glb;
            if lo > hi {
                lo = min;
            }
        } else {
            lo = lub;
            if lo > hi {
                hi = max;
            }
        }
        guess = (lo + hi) / two;
    }

    median_inplace(vals)
}

// ============================================================================
// Mode
// ============================================================================

/// Which mode to report when several shortest intervals tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeSelection {
    /// The lowest of the tied modes.
    Lowest,

    /// The average of the tied modes.
    #[default]
    Average,

    /// The highest of the tied modes.
    Highest,
}

/// Maximum-likelihood mode of `vals`. Sorts `vals`.
///
/// The mode is the midpoint of the shortest interval spanning
/// `smoothing_n + 1` consecutive sorted samples. Returns the estimate and
/// whether distinct equally short intervals were found. Returns NaN for an
/// empty slice.
pub fn mode<T: Float>(vals: &mut [T], smoothing_n: usize, selection: ModeSelection) -> (T, bool) {
    let n = vals.len();
    if n == 0 {
        return (T::nan(), false);
    }
    if n == 1 {
        return (vals[0], false);
    }

    vals.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Equal));
    let j = smoothing_n.clamp(1, n - 1);
    let two = T::from(2.0).unwrap();

    let mut shortest = T::infinity();
    let mut first = T::nan();
    let mut last = T::nan();
    let mut sum = T::zero();
    let mut ties = 0usize;

    for i in 0..n - j {
        let length = vals[i + j] - vals[i];
        let mid = (vals[i + j] + vals[i]) / two;
        if length < shortest {
            shortest = length;
            first = mid;
            last = mid;
            sum = mid;
            ties = 1;
        } else if length == shortest {
            last = mid;
            sum = sum + mid;
            ties += 1;
        }
    }

    let multiple = ties > 1 && last != first;
    let estimate = match selection {
        ModeSelection::Lowest => first,
        ModeSelection::Highest => last,
        ModeSelection::Average => sum / T::from(ties).unwrap_or(T::one()),
    };
    (estimate, multiple)
}

// ============================================================================
// Extremes
// ============================================================================

/// Which end of the sample range to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    /// Smallest value.
    Min,
    /// Largest value.
    Max,
}

/// Which samples take part in an extreme-value search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignFilter {
    /// Every sample.
    #[default]
    All,
    /// Only samples greater than zero.
    PositiveOnly,
    /// Only samples less than zero.
    NegativeOnly,
}

impl SignFilter {
    #[inline]
    fn admits<T: Float>(&self, v: T) -> bool {
        match self {
            SignFilter::All => true,
            SignFilter::PositiveOnly => v > T::zero(),
            SignFilter::NegativeOnly => v < T::zero(),
        }
    }
}

/// Smallest or largest admitted sample of `vals`, or `None` when no sample
/// passes the sign filter.
pub fn extreme<T: Float>(vals: &[T], way: Extremum, sign: SignFilter) -> Option<T> {
    vals.iter()
        .copied()
        .filter(|&v| !v.is_nan() && sign.admits(v))
        .reduce(|acc, v| match way {
            Extremum::Min => acc.min(v),
            Extremum::Max => acc.max(v),
        })
}
