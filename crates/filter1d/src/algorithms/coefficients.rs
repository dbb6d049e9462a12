//! Filter kinds and discrete convolution coefficients.
//!
//! ## Purpose
//!
//! This module defines the closed set of filter kinds and builds, for the
//! convolution kinds, the symmetric weight array sampled at a fixed time step.
//! Custom coefficient tables are normalized here and checked for being an
//! operator (zero-sum) stencil.
//!
//! ## Design notes
//!
//! * **Closed set**: Behaviour is selected by matching on `FilterKind`.
//! * **Tap abscissae**: Kernels are evaluated exactly at `i * dt`, not at
//!   cell midpoints.
//! * **Rebuilt on demand**: Variable-width filtering rebuilds the set at every
//!   output point; the builder allocates nothing beyond the weight array.
//!
//! ## Key concepts
//!
//! * **Half-width**: Half the filter width, in time units.
//! * **Operator**: Coefficients summing to zero. They are never normalized and
//!   the weighted sum is reported without dividing by the weight sum.
//!
//! ## Invariants
//!
//! * Built-in kernels have `2 * half_n + 1` taps, symmetric about `half_n`.
//! * Non-operator custom coefficients sum to at most 1 after normalization.
//!
//! ## Non-goals
//!
//! * This module does not read coefficient files.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::kernel::WeightFunction;
use crate::primitives::errors::FilterError;

/// Coefficient sums closer to zero than this mark an operator.
const OPERATOR_TOLERANCE: f64 = 1e-8;

// ============================================================================
// Filter Kind
// ============================================================================

/// Filter applied to every data column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKind {
    /// Convolution with a flat kernel.
    #[default]
    Boxcar,
    /// Convolution with a raised-cosine kernel.
    CosineArch,
    /// Convolution with a truncated Gaussian kernel.
    Gaussian,
    /// Convolution with user-supplied coefficients.
    Custom,
    /// Median of the window.
    Median,
    /// Maximum-likelihood mode of the window.
    Mode,
    /// Minimum of the window.
    LowerAll,
    /// Minimum of the positive samples.
    LowerPositive,
    /// Maximum of the window.
    UpperAll,
    /// Maximum of the negative samples.
    UpperNegative,
}

impl FilterKind {
    /// Get the name of the filter kind.
    pub const fn name(&self) -> &'static str {
        match self {
            FilterKind::Boxcar => "Boxcar",
            FilterKind::CosineArch => "Cosine Arch",
            FilterKind::Gaussian => "Gaussian",
            FilterKind::Custom => "Custom",
            FilterKind::Median => "Median",
            FilterKind::Mode => "Mode",
            FilterKind::LowerAll => "Lower",
            FilterKind::LowerPositive => "Lower (positive)",
            FilterKind::UpperAll => "Upper",
            FilterKind::UpperNegative => "Upper (negative)",
        }
    }

    /// True for kinds that compute a weighted sum.
    pub const fn is_convolution(&self) -> bool {
        matches!(
            self,
            FilterKind::Boxcar | FilterKind::CosineArch | FilterKind::Gaussian | FilterKind::Custom
        )
    }

    /// Kernel of the built-in convolution kinds.
    pub const fn weight_function(&self) -> Option<WeightFunction> {
        match self {
            FilterKind::Boxcar => Some(WeightFunction::Boxcar),
            FilterKind::CosineArch => Some(WeightFunction::CosineArch),
            FilterKind::Gaussian => Some(WeightFunction::Gaussian),
            _ => None,
        }
    }
}

// ============================================================================
// Coefficient Set
// ============================================================================

/// Discrete convolution weights at a fixed time step.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientSet<T> {
    weights: Vec<T>,
    half_n: usize,
    is_operator: bool,
    dt: T,
}

impl<T: Float> CoefficientSet<T> {
    /// Weight array, centre tap at `half_n`.
    #[inline]
    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    /// Index of the centre tap.
    #[inline]
    pub fn half_n(&self) -> usize {
        self.half_n
    }

    /// True if the coefficients sum to zero.
    #[inline]
    pub fn is_operator(&self) -> bool {
        self.is_operator
    }

    /// Sum of all weights.
    pub fn sum(&self) -> T {
        self.weights.iter().fold(T::zero(), |acc, &w| acc + w)
    }

    /// Weight for a sample at `delta = t_output - t_sample`, or `None` if
    /// the offset maps outside the array.
    ///
    /// The offset is mapped to the nearest tap, `floor(delta / dt + 0.5)`,
    /// counted from the centre. Samples after the output time use the taps
    /// below the centre.
    #[inline]
    pub fn tap(&self, delta: T) -> Option<T> {
        let half = T::from(0.5).unwrap();
        let offset = (delta / self.dt + half).floor().to_isize()?;
        let idx = self.half_n as isize + offset;
        if idx < 0 {
            return None;
        }
        self.weights.get(idx as usize).copied()
    }
}

// ============================================================================
// Filter Setup
// ============================================================================

/// Everything derived from a filter kind and width for one segment (or one
/// output point, with variable widths).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSetup<T> {
    /// Half the filter width.
    pub half_width: T,

    /// Full filter width used by the window-level gap check.
    pub filter_width: T,

    /// Convolution weights; `None` for order-statistic kinds.
    pub coefficients: Option<CoefficientSet<T>>,

    /// Original sum of custom coefficients that were rescaled to sum to 1.
    pub rescaled_from: Option<T>,
}

/// Build the setup for `kind` at `width`, with taps every `dt`.
///
/// For `FilterKind::Custom` the width is implied by the coefficient count:
/// `half_width = (n / 2) * dt`.
pub fn build_filter<T: Float>(
    kind: FilterKind,
    width: T,
    dt: T,
    custom: Option<&[T]>,
) -> Result<FilterSetup<T>, FilterError> {
    let two = T::from(2.0).unwrap();

    if kind == FilterKind::Custom {
        let coefficients = custom.ok_or(FilterError::EmptyCoefficientTable)?;
        return build_custom(coefficients, dt);
    }

    if !(width.is_finite() && width > T::zero()) {
        return Err(FilterError::InvalidWidth(width.to_f64().unwrap_or(f64::NAN)));
    }
    let half_width = width / two;

    let Some(function) = kind.weight_function() else {
        return Ok(FilterSetup {
            half_width,
            filter_width: width,
            coefficients: None,
            rescaled_from: None,
        });
    };

    check_step(dt)?;
    let half_n = (half_width / dt).round().to_usize().ok_or_else(|| {
        FilterError::InvalidIncrement(dt.to_f64().unwrap_or(f64::NAN))
    })?;

    let mut weights = Vec::with_capacity(2 * half_n + 1);
    weights.resize(2 * half_n + 1, T::zero());
    for i in 0..=half_n {
        let radius = T::from(i).unwrap() * dt;
        let w = function.compute_weight(radius, half_width);
        weights[half_n + i] = w;
        weights[half_n - i] = w;
    }

    Ok(FilterSetup {
        half_width,
        filter_width: width,
        coefficients: Some(CoefficientSet {
            weights,
            half_n,
            is_operator: false,
            dt,
        }),
        rescaled_from: None,
    })
}

fn build_custom<T: Float>(coefficients: &[T], dt: T) -> Result<FilterSetup<T>, FilterError> {
    if coefficients.is_empty() {
        return Err(FilterError::EmptyCoefficientTable);
    }
    if let Some(c) = coefficients.iter().find(|c| !c.is_finite()) {
        return Err(FilterError::InvalidNumericValue(format!(
            "coefficient {}",
            c.to_f64().unwrap_or(f64::NAN)
        )));
    }
    check_step(dt)?;

    let sum = coefficients.iter().fold(T::zero(), |acc, &c| acc + c);
    let is_operator = sum.abs() < T::from(OPERATOR_TOLERANCE).unwrap();

    let (weights, rescaled_from) = if !is_operator && sum > T::one() {
        (coefficients.iter().map(|&c| c / sum).collect(), Some(sum))
    } else {
        (coefficients.to_vec(), None)
    };

    let half_n = coefficients.len() / 2;
    let half_width = T::from(half_n).unwrap() * dt;

    Ok(FilterSetup {
        half_width,
        filter_width: half_width * T::from(2.0).unwrap(),
        coefficients: Some(CoefficientSet {
            weights,
            half_n,
            is_operator,
            dt,
        }),
        rescaled_from,
    })
}

fn check_step<T: Float>(dt: T) -> Result<(), FilterError> {
    if dt.is_finite() && dt > T::zero() {
        Ok(())
    } else {
        Err(FilterError::InvalidIncrement(dt.to_f64().unwrap_or(f64::NAN)))
    }
}
