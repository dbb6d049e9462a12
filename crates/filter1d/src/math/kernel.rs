//! Weight functions for the convolution filters.
//!
//! ## Purpose
//!
//! This module maps a radius (distance from the output time) and a filter
//! half-width to a tap weight. The coefficient builder samples these functions
//! at the tap abscissae to build a discrete kernel.
//!
//! ## Key concepts
//!
//! | Kernel      | Weight for r <= h           | Peak |
//! |-------------|-----------------------------|------|
//! | Boxcar      | 1                           | 1    |
//! | CosineArch  | 1 + cos(pi * r / h)         | 2    |
//! | Gaussian    | exp(-4.5 * r^2 / h^2)       | 1    |
//!
//! The Gaussian is scaled so the half-width equals three standard deviations.
//!
//! ## Invariants
//!
//! * Weights are non-negative and symmetric in the radius.
//! * Every kernel is exactly zero beyond the half-width.
//!
//! ## Non-goals
//!
//! * This module does not normalize weights.

// External dependencies
use core::f64::consts::PI;
use num_traits::Float;

/// Exponent scale of the Gaussian kernel: half-width maps to 3 sigma.
const GAUSSIAN_SCALE: f64 = -4.5;

// ============================================================================
// Weight Function Enum
// ============================================================================

/// Weight function of a convolution filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightFunction {
    /// Boxcar: every sample within the half-width gets weight 1.
    #[default]
    Boxcar,

    /// Cosine arch: `1 + cos(pi * r / h)`.
    CosineArch,

    /// Gaussian: `exp(-4.5 * r^2 / h^2)`.
    Gaussian,
}

impl WeightFunction {
    /// Get the name of the weight function.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            WeightFunction::Boxcar => "Boxcar",
            WeightFunction::CosineArch => "Cosine Arch",
            WeightFunction::Gaussian => "Gaussian",
        }
    }

    /// Weight at the centre of the kernel.
    #[inline]
    pub fn peak<T: Float>(&self) -> T {
        match self {
            WeightFunction::CosineArch => T::from(2.0).unwrap(),
            _ => T::one(),
        }
    }

    /// Compute the weight at `radius` for a kernel of `half_width`.
    #[inline]
    pub fn compute_weight<T: Float>(&self, radius: T, half_width: T) -> T {
        let r = radius.abs();
        if !(r <= half_width) {
            return T::zero();
        }
        if half_width <= T::zero() {
            return self.peak();
        }

        match self {
            WeightFunction::Boxcar => T::one(),

            WeightFunction::CosineArch => {
                let pi = T::from(PI).unwrap();
                T::one() + (r * pi / half_width).cos()
            }

            WeightFunction::Gaussian => {
                let u = r / half_width;
                (T::from(GAUSSIAN_SCALE).unwrap() * u * u).exp()
            }
        }
    }
}
