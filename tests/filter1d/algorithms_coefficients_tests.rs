#![cfg(feature = "dev")]
//! Tests for filter construction.
//!
//! These tests verify how a filter kind and width become a `FilterSetup`:
//! - Tap counts and kernel weights of the built-in convolution filters
//! - Custom coefficients, operators and rescaling
//! - Mapping of sample offsets to taps
//! - Errors for unusable widths and steps
//!
//! ## Test Organization
//!
//! 1. **Filter Kinds** - Names and classification
//! 2. **Built-in Kernels** - Tap layout and weights
//! 3. **Custom Coefficients** - Operators and rescaling
//! 4. **Tap Mapping** - Offsets to taps
//! 5. **Errors** - Invalid widths and steps

use approx::assert_relative_eq;

use filter1d::internals::algorithms::coefficients::{build_filter, FilterKind};
use filter1d::internals::math::kernel::WeightFunction;
use filter1d::internals::primitives::errors::FilterError;

// ============================================================================
// Filter Kind Tests
// ============================================================================

/// Test the convolution / order-statistic split.
#[test]
fn test_kind_classification() {
    for kind in [
        FilterKind::Boxcar,
        FilterKind::CosineArch,
        FilterKind::Gaussian,
        FilterKind::Custom,
    ] {
        assert!(kind.is_convolution(), "{} is a convolution", kind.name());
    }
    for kind in [
        FilterKind::Median,
        FilterKind::Mode,
        FilterKind::LowerAll,
        FilterKind::LowerPositive,
        FilterKind::UpperAll,
        FilterKind::UpperNegative,
    ] {
        assert!(!kind.is_convolution(), "{} is an order statistic", kind.name());
        assert_eq!(kind.weight_function(), None);
    }
    assert_eq!(
        FilterKind::Gaussian.weight_function(),
        Some(WeightFunction::Gaussian)
    );
    assert_eq!(FilterKind::Custom.weight_function(), None);
}

// ============================================================================
// Built-in Kernel Tests
// ============================================================================

/// Test the boxcar layout: `2 * round(h / dt) + 1` unit taps.
#[test]
fn test_boxcar_taps() {
    let setup = build_filter(FilterKind::Boxcar, 4.0, 1.0, None).unwrap();
    let c = setup.coefficients.unwrap();

    assert_eq!(setup.half_width, 2.0);
    assert_eq!(setup.filter_width, 4.0);
    assert_eq!(c.half_n(), 2);
    assert_eq!(c.weights(), &[1.0; 5]);
    assert!(!c.is_operator());
}

/// Test cosine arch weights are symmetric and vanish at the edge.
#[test]
fn test_cosine_arch_taps() {
    let setup = build_filter(FilterKind::CosineArch, 4.0, 1.0, None).unwrap();
    let c = setup.coefficients.unwrap();
    let w = c.weights();

    assert_eq!(w.len(), 5);
    assert_relative_eq!(w[2], 2.0, epsilon = 1e-12);
    assert_relative_eq!(w[1], 1.0, epsilon = 1e-12);
    assert_relative_eq!(w[3], 1.0, epsilon = 1e-12);
    assert_relative_eq!(w[0], 0.0, epsilon = 1e-12);
    assert_relative_eq!(w[4], 0.0, epsilon = 1e-12);
}

/// Test that the tap count rounds the half-width to the step.
#[test]
fn test_tap_count_rounding() {
    let setup = build_filter(FilterKind::Gaussian, 3.0, 0.4, None).unwrap();
    // h / dt = 3.75 rounds to 4
    assert_eq!(setup.coefficients.unwrap().half_n(), 4);
}

/// Test that order-statistic kinds carry no coefficients.
#[test]
fn test_order_statistic_setup() {
    let setup = build_filter(FilterKind::Median, 3.0, f64::NAN, None).unwrap();

    assert_eq!(setup.half_width, 1.5);
    assert!(setup.coefficients.is_none());
}

// ============================================================================
// Custom Coefficient Tests
// ============================================================================

/// Test that coefficients summing to zero form an operator.
#[test]
fn test_custom_operator() {
    let setup = build_filter(FilterKind::Custom, 0.0, 0.5, Some(&[-1.0, 0.0, 1.0][..])).unwrap();
    let c = setup.coefficients.unwrap();

    assert!(c.is_operator());
    assert_eq!(c.half_n(), 1);
    assert_eq!(setup.half_width, 0.5);
    assert_eq!(setup.rescaled_from, None);
}

/// Test that coefficients summing above one are normalized.
#[test]
fn test_custom_rescaled() {
    let setup = build_filter(FilterKind::Custom, 0.0, 1.0, Some(&[1.0, 2.0, 1.0][..])).unwrap();
    let c = setup.coefficients.unwrap();

    assert_eq!(setup.rescaled_from, Some(4.0));
    assert_eq!(c.weights(), &[0.25, 0.5, 0.25]);
    assert_relative_eq!(c.sum(), 1.0, epsilon = 1e-12);
}

/// Test that coefficients summing to at most one are kept as given.
#[test]
fn test_custom_kept() {
    let setup = build_filter(FilterKind::Custom, 0.0, 1.0, Some(&[0.2, 0.3, 0.2][..])).unwrap();

    assert_eq!(setup.rescaled_from, None);
    assert_eq!(setup.coefficients.unwrap().weights(), &[0.2, 0.3, 0.2]);
}

/// Test that an even number of coefficients centres on `n / 2`.
#[test]
fn test_custom_even_length() {
    let setup = build_filter(FilterKind::Custom, 0.0, 1.0, Some(&[0.25; 4][..])).unwrap();
    assert_eq!(setup.coefficients.unwrap().half_n(), 2);
    assert_eq!(setup.half_width, 2.0);
}

// ============================================================================
// Tap Mapping Tests
// ============================================================================

/// Test that offsets map to the nearest tap, samples after `t` to lower taps.
#[test]
fn test_tap_mapping() {
    let setup = build_filter(FilterKind::Custom, 0.0, 1.0, Some(&[1.0, 2.0, 3.0, 4.0, 5.0][..]))
        .unwrap();
    let c = setup.coefficients.unwrap();
    let sum = 15.0;

    // delta = t_output - t_sample
    assert_relative_eq!(c.tap(0.0).unwrap(), 3.0 / sum, epsilon = 1e-12);
    assert_relative_eq!(c.tap(1.0).unwrap(), 4.0 / sum, epsilon = 1e-12);
    assert_relative_eq!(c.tap(-1.0).unwrap(), 2.0 / sum, epsilon = 1e-12);
    assert_relative_eq!(c.tap(1.4).unwrap(), 4.0 / sum, epsilon = 1e-12);
    assert_relative_eq!(c.tap(1.6).unwrap(), 5.0 / sum, epsilon = 1e-12);
    assert_relative_eq!(c.tap(-2.0).unwrap(), 1.0 / sum, epsilon = 1e-12);
}

/// Test that offsets beyond the outermost tap have no weight.
#[test]
fn test_tap_out_of_range() {
    let setup = build_filter(FilterKind::Boxcar, 2.0, 1.0, None).unwrap();
    let c = setup.coefficients.unwrap();

    assert!(c.tap(2.0).is_none());
    assert!(c.tap(-2.0).is_none());
    assert!(c.tap(f64::NAN).is_none());
}

// ============================================================================
// Error Tests
// ============================================================================

/// Test invalid widths.
#[test]
fn test_invalid_width() {
    assert_eq!(
        build_filter(FilterKind::Boxcar, 0.0, 1.0, None),
        Err(FilterError::InvalidWidth(0.0))
    );
    assert!(matches!(
        build_filter(FilterKind::Median, f64::NAN, 1.0, None),
        Err(FilterError::InvalidWidth(_))
    ));
}

/// Test invalid sampling steps for convolution filters.
#[test]
fn test_invalid_step() {
    assert!(matches!(
        build_filter(FilterKind::Boxcar, 2.0, 0.0, None),
        Err(FilterError::InvalidIncrement(_))
    ));
    assert!(matches!(
        build_filter(FilterKind::Custom, 0.0, -1.0, Some(&[1.0][..])),
        Err(FilterError::InvalidIncrement(_))
    ));
}

/// Test that the custom kind needs coefficients.
#[test]
fn test_custom_missing_coefficients() {
    assert_eq!(
        build_filter::<f64>(FilterKind::Custom, 0.0, 1.0, None),
        Err(FilterError::EmptyCoefficientTable)
    );
}
