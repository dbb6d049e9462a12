//! Per-column data-quality gates.
//!
//! ## Purpose
//!
//! A window can hold enough rows overall and still be a poor basis for an
//! estimate in one particular column: the column may have a hole, all its
//! samples may sit on one side of the output time, or the kernel may only
//! catch its tails. This module decides, per column and output point, whether
//! the value is reportable.
//!
//! ## Key concepts
//!
//! * **Lack of data**: Any gap between consecutive present samples wider than
//!   `lack_width` fails the column. The window as a whole is skipped when its
//!   average row spacing (`filter_width / rows`) already exceeds it.
//! * **Asymmetry**: `|n_left - n_right| / (n_left + n_right)` above the
//!   symmetry coefficient fails the column. Samples exactly at the output time
//!   count on neither side.
//! * **Quality factor**: Convolution filters fail when the mean weight of the
//!   used samples is below the factor; order-statistic filters fail when
//!   fewer than `round(factor)` samples are present.
//!
//! ## Invariants
//!
//! * Every gate is off unless its threshold is configured.
//! * A column with no present samples always fails (checked by the caller).

// External dependencies
use num_traits::Float;

// ============================================================================
// Side Counts
// ============================================================================

/// Present samples strictly before and strictly after the output time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideCounts {
    /// Samples before the output time.
    pub left: usize,
    /// Samples after the output time.
    pub right: usize,
}

impl SideCounts {
    /// Count a sample at `t_sample` relative to the output time `t`.
    #[inline]
    pub fn record<T: Float>(&mut self, t_sample: T, t: T) {
        if t_sample < t {
            self.left += 1;
        } else if t_sample > t {
            self.right += 1;
        }
    }

    /// `|left - right| / (left + right)`, or zero with no off-centre samples.
    pub fn asymmetry<T: Float>(&self) -> T {
        let total = self.left + self.right;
        if total == 0 {
            return T::zero();
        }
        let diff = self.left.abs_diff(self.right);
        T::from(diff).unwrap() / T::from(total).unwrap()
    }
}

// ============================================================================
// Quality Gate
// ============================================================================

/// Optional per-column acceptance thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityGate<T> {
    /// Largest tolerated gap between present samples.
    pub lack_width: Option<T>,

    /// Largest tolerated left/right imbalance, in `[0, 1]`.
    pub symmetry: Option<T>,

    /// Minimum mean weight (convolution) or sample count (order statistics).
    pub quality: Option<T>,
}

impl<T> Default for QualityGate<T> {
    fn default() -> Self {
        Self {
            lack_width: None,
            symmetry: None,
            quality: None,
        }
    }
}

impl<T: Float> QualityGate<T> {
    /// Window-level gap check: the average spacing of `rows` rows across
    /// `filter_width` exceeds the lack width.
    #[inline]
    pub fn window_lacks_data(&self, filter_width: T, rows: usize) -> bool {
        match self.lack_width {
            Some(lack) if rows > 0 => filter_width / T::from(rows).unwrap() > lack,
            _ => false,
        }
    }

    /// Column-level gap check over the window's `times` and `values`.
    ///
    /// NaN values are skipped; the gap is measured between the present
    /// samples on either side of them.
    pub fn column_lacks_data(&self, times: &[T], values: &[T]) -> bool {
        let Some(lack) = self.lack_width else {
            return false;
        };

        let mut previous: Option<T> = None;
        for (&t, v) in times.iter().zip(values.iter()) {
            if v.is_nan() {
                continue;
            }
            if let Some(p) = previous {
                if t - p > lack {
                    return true;
                }
            }
            previous = Some(t);
        }
        false
    }

    /// Asymmetry check.
    #[inline]
    pub fn is_asymmetric(&self, counts: SideCounts) -> bool {
        match self.symmetry {
            Some(sym) => counts.asymmetry::<T>() > sym,
            None => false,
        }
    }

    /// Convolution quality check: mean weight of `n` used samples.
    #[inline]
    pub fn weight_too_low(&self, weight_sum: T, n: usize) -> bool {
        match self.quality {
            Some(q) if n > 0 => weight_sum / T::from(n).unwrap() < q,
            _ => false,
        }
    }

    /// Order-statistic quality check: fewer than `round(q)` samples.
    #[inline]
    pub fn too_few_samples(&self, n: usize) -> bool {
        match self.quality {
            Some(q) => T::from(n).unwrap() < q.round(),
            None => false,
        }
    }
}
