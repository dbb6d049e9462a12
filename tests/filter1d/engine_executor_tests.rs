#![cfg(feature = "dev")]
//! Tests for the execution engine.
//!
//! These tests run `FilterExecutor` directly on loaded segments and check the
//! emitted records for:
//! - Convolution, custom and order-statistic filters
//! - Robust clipping and highpass output
//! - Quality gates (symmetry, lack of data, sample count)
//! - Variable widths and resampled output times
//! - Segment bookkeeping and diagnostics
//!
//! ## Test Organization
//!
//! 1. **Convolution** - Boxcar means, custom coefficients, operators
//! 2. **Order Statistics** - Median, mode, extremes
//! 3. **Options** - Robust, highpass, output grids
//! 4. **Quality Gates** - Symmetry, lack width, quality factor
//! 5. **Missing Data** - NaN columns and rejected records
//! 6. **Variable Width** - Width tables and their domain
//! 7. **Segments** - Short segments, diagnostics, properties

use approx::assert_relative_eq;
use proptest::prelude::*;

use filter1d::internals::algorithms::coefficients::FilterKind;
use filter1d::internals::algorithms::planner::OutputTimes;
use filter1d::internals::algorithms::quality::QualityGate;
use filter1d::internals::engine::executor::{FilterConfig, FilterExecutor};
use filter1d::internals::primitives::series::Series;
use filter1d::internals::primitives::table::WidthTable;

fn config(kind: FilterKind, width: f64) -> FilterConfig<f64> {
    FilterConfig {
        kind,
        width,
        ..FilterConfig::default()
    }
}

fn series(time: &[f64], values: &[f64]) -> Series<f64> {
    Series::from_columns(vec![time.to_vec(), values.to_vec()], 0).unwrap()
}

fn run(config: FilterConfig<f64>, series: &Series<f64>) -> Vec<Vec<f64>> {
    let mut executor = FilterExecutor::from_config(config);
    let mut out = Vec::new();
    executor.run_segment(series, &mut out).unwrap();
    out
}

// ============================================================================
// Convolution Tests
// ============================================================================

/// Test the boxcar mean on evenly spaced data.
///
/// Output times within one half-width of the ends are dropped.
#[test]
fn test_boxcar_mean() {
    let s = series(&[0.0, 1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 4.0, 5.0]);
    let out = run(config(FilterKind::Boxcar, 2.0), &s);

    assert_eq!(out, vec![vec![1.0, 2.0], vec![2.0, 3.0], vec![3.0, 4.0]]);
}

/// Test a custom operator: `[-1, 0, 1]` gives `v(t - dt) - v(t + dt)`.
#[test]
fn test_custom_operator() {
    let s = series(&[0.0, 1.0, 2.0, 3.0, 4.0], &[0.0, 1.0, 4.0, 9.0, 16.0]);
    let cfg = FilterConfig {
        kind: FilterKind::Custom,
        coefficients: Some(vec![-1.0, 0.0, 1.0]),
        ..FilterConfig::default()
    };
    let out = run(cfg, &s);

    assert_eq!(out.len(), 3);
    assert_relative_eq!(out[0][1], 0.0 - 4.0, epsilon = 1e-12);
    assert_relative_eq!(out[1][1], 1.0 - 9.0, epsilon = 1e-12);
    assert_relative_eq!(out[2][1], 4.0 - 16.0, epsilon = 1e-12);
}

/// Test that custom coefficients summing above one are rescaled.
#[test]
fn test_custom_rescaled() {
    let s = series(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 3.0, 4.0]);
    let cfg = FilterConfig {
        kind: FilterKind::Custom,
        coefficients: Some(vec![1.0, 2.0, 1.0]),
        ..FilterConfig::default()
    };
    let mut executor = FilterExecutor::from_config(cfg);
    let mut out = Vec::new();
    executor.run_segment(&s, &mut out).unwrap();

    assert_relative_eq!(out[0][1], 2.0, epsilon = 1e-12);
    assert_relative_eq!(out[1][1], 3.0, epsilon = 1e-12);
    assert_eq!(executor.diagnostics().coefficient_rescale, Some(4.0));
}

/// Test that irregular samples are weighted by their distance to the output time.
#[test]
fn test_cosine_arch_irregular() {
    let s = series(&[0.0, 1.0, 2.0, 2.5, 4.0], &[0.0, 10.0, 20.0, 40.0, 0.0]);
    let cfg = FilterConfig {
        sampling_interval: Some(1.0),
        output_times: OutputTimes::List(vec![2.0]),
        ..config(FilterKind::CosineArch, 4.0)
    };
    let out = run(cfg, &s);

    // Taps at offsets 0, +-1, +-2 weigh 2, 1, 0; t = 2.5 rounds to the centre tap
    let expected = (1.0 * 10.0 + 2.0 * 20.0 + 2.0 * 40.0) / (1.0 + 2.0 + 2.0);
    assert_relative_eq!(out[0][1], expected, epsilon = 1e-9);
}

// ============================================================================
// Order Statistic Tests
// ============================================================================

/// Test that the median ignores a spike.
#[test]
fn test_median_filter() {
    let s = series(&[0.0, 1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 100.0, 4.0, 5.0]);
    let out = run(config(FilterKind::Median, 2.0), &s);

    let values: Vec<f64> = out.iter().map(|r| r[1]).collect();
    assert_eq!(values, vec![2.0, 4.0, 5.0]);
}

/// Test signed extremes over the same window.
#[test]
fn test_extreme_filters() {
    let s = series(&[0.0, 1.0, 2.0], &[-3.0, 2.0, -1.0]);

    let lower = run(config(FilterKind::LowerAll, 2.0), &s);
    let lower_pos = run(config(FilterKind::LowerPositive, 2.0), &s);
    let upper = run(config(FilterKind::UpperAll, 2.0), &s);
    let upper_neg = run(config(FilterKind::UpperNegative, 2.0), &s);

    assert_eq!(lower, vec![vec![1.0, -3.0]]);
    assert_eq!(lower_pos, vec![vec![1.0, 2.0]]);
    assert_eq!(upper, vec![vec![1.0, 2.0]]);
    assert_eq!(upper_neg, vec![vec![1.0, -1.0]]);
}

/// Test that a signed extreme with no qualifying sample emits nothing.
#[test]
fn test_extreme_no_qualifying_sample() {
    let s = series(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0]);
    let out = run(config(FilterKind::UpperNegative, 2.0), &s);
    assert!(out.is_empty());
}

/// Test that tied modes are flagged in the diagnostics.
#[test]
fn test_mode_multiple_flagged() {
    let s = series(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 10.0, 11.0]);
    let cfg = FilterConfig {
        use_ends: true,
        output_times: OutputTimes::List(vec![1.5]),
        ..config(FilterKind::Mode, 4.0)
    };
    let mut executor = FilterExecutor::from_config(cfg);
    let mut out = Vec::new();
    executor.run_segment(&s, &mut out).unwrap();

    assert_eq!(out.len(), 1);
    assert_eq!(out[0][1], 6.0);
    assert_eq!(executor.diagnostics().multiple_modes, 1);
}

// ============================================================================
// Option Tests
// ============================================================================

/// Test that robust clipping replaces an outlier by the window median.
#[test]
fn test_robust_boxcar() {
    let s = series(&[0.0, 1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 100.0, 4.0, 5.0]);
    let cfg = FilterConfig {
        robust: true,
        ..config(FilterKind::Boxcar, 4.0)
    };
    let out = run(cfg, &s);

    // Median 4, MAD 2: 100 is clipped to 4
    assert_eq!(out.len(), 1);
    assert_relative_eq!(out[0][1], 16.0 / 5.0, epsilon = 1e-12);
}

/// Test highpass output: input minus filtered value.
#[test]
fn test_highpass() {
    let s = series(&[0.0, 1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 6.0, 4.0, 5.0]);
    let cfg = FilterConfig {
        highpass: true,
        ..config(FilterKind::Boxcar, 2.0)
    };
    let out = run(cfg, &s);

    let values: Vec<f64> = out.iter().map(|r| r[1]).collect();
    assert_eq!(values.len(), 3);
    assert_relative_eq!(values[0], -1.0, epsilon = 1e-12);
    assert_relative_eq!(values[1], 2.0, epsilon = 1e-12);
    assert_relative_eq!(values[2], -1.0, epsilon = 1e-12);
}

/// Test output on a regular grid between the samples.
#[test]
fn test_increment_grid() {
    let s = series(&[0.0, 1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 4.0, 5.0]);
    let cfg = FilterConfig {
        output_times: OutputTimes::Increment(0.5),
        ..config(FilterKind::Boxcar, 2.0)
    };
    let out = run(cfg, &s);

    let times: Vec<f64> = out.iter().map(|r| r[0]).collect();
    assert_eq!(times, vec![1.0, 1.5, 2.0, 2.5, 3.0]);
    for record in &out {
        assert_relative_eq!(record[1], record[0] + 1.0, epsilon = 1e-12);
    }
}

/// Test that `use_ends` keeps output times near the data ends.
#[test]
fn test_use_ends() {
    let s = series(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 3.0, 4.0]);
    let cfg = FilterConfig {
        use_ends: true,
        ..config(FilterKind::Boxcar, 2.0)
    };
    let out = run(cfg, &s);

    assert_eq!(out.len(), 4);
    assert_relative_eq!(out[0][1], 1.5, epsilon = 1e-12);
    assert_relative_eq!(out[3][1], 3.5, epsilon = 1e-12);
}

// ============================================================================
// Quality Gate Tests
// ============================================================================

/// Test that a one-sided window is rejected by a strict symmetry gate.
#[test]
fn test_symmetry_gate() {
    let s = series(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 3.0, 4.0]);
    let base = FilterConfig {
        use_ends: true,
        output_times: OutputTimes::List(vec![3.0]),
        ..config(FilterKind::Boxcar, 6.0)
    };

    let strict = FilterConfig {
        gate: QualityGate {
            symmetry: Some(0.5),
            ..QualityGate::default()
        },
        ..base.clone()
    };
    assert!(run(strict, &s).is_empty(), "3 left / 0 right should fail at 0.5");

    let lenient = FilterConfig {
        gate: QualityGate {
            symmetry: Some(1.0),
            ..QualityGate::default()
        },
        ..base
    };
    let out = run(lenient, &s);
    assert_eq!(out.len(), 1);
    assert_relative_eq!(out[0][1], 2.5, epsilon = 1e-12);
}

/// Test that a gap between present samples rejects the column.
#[test]
fn test_lack_width_gate() {
    let s = series(&[0.0, 1.0, 2.0, 10.0, 11.0], &[1.0, 2.0, 3.0, 4.0, 5.0]);
    let base = FilterConfig {
        use_ends: true,
        sampling_interval: Some(1.0),
        output_times: OutputTimes::List(vec![5.0]),
        ..config(FilterKind::Boxcar, 20.0)
    };

    let tight = FilterConfig {
        gate: QualityGate {
            lack_width: Some(5.0),
            ..QualityGate::default()
        },
        ..base.clone()
    };
    assert!(run(tight, &s).is_empty(), "Gap of 8 exceeds lack width 5");

    let loose = FilterConfig {
        gate: QualityGate {
            lack_width: Some(9.0),
            ..QualityGate::default()
        },
        ..base
    };
    let out = run(loose, &s);
    assert_eq!(out.len(), 1);
    assert_relative_eq!(out[0][1], 3.0, epsilon = 1e-12);
}

/// Test that order-statistic filters need `round(q)` samples.
#[test]
fn test_quality_sample_count() {
    let s = series(&[0.0, 1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 4.0, 5.0]);
    let cfg = FilterConfig {
        gate: QualityGate {
            quality: Some(4.0),
            ..QualityGate::default()
        },
        ..config(FilterKind::Median, 2.0)
    };
    assert!(run(cfg, &s).is_empty(), "Three samples per window is below 4");
}

/// Test that the mean weight gate rejects windows holding only edge samples.
#[test]
fn test_quality_mean_weight() {
    // Only the two edge samples fall inside the window of t = 1.5
    let s = series(&[0.0, 0.5, 2.5, 3.0], &[1.0, 2.0, 3.0, 4.0]);
    let base = FilterConfig {
        sampling_interval: Some(0.5),
        output_times: OutputTimes::List(vec![1.5]),
        ..config(FilterKind::Gaussian, 2.0)
    };

    let out = run(base.clone(), &s);
    assert_eq!(out.len(), 1);
    assert_relative_eq!(out[0][1], 2.5, epsilon = 1e-12);

    let gated = FilterConfig {
        gate: QualityGate {
            quality: Some(0.5),
            ..QualityGate::default()
        },
        ..base
    };
    assert!(run(gated, &s).is_empty(), "Mean weight exp(-4.5) is below 0.5");
}

// ============================================================================
// Missing Data Tests
// ============================================================================

/// Test that a column without data is NaN while others pass.
#[test]
fn test_nan_column_in_record() {
    let s = Series::from_columns(
        vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 2.0, 3.0],
            vec![f64::NAN, f64::NAN, f64::NAN],
        ],
        0,
    )
    .unwrap();
    let out = run(config(FilterKind::Boxcar, 2.0), &s);

    assert_eq!(out.len(), 1);
    assert_eq!(out[0][0], 1.0);
    assert_eq!(out[0][1], 2.0);
    assert!(out[0][2].is_nan());
}

/// Test that NaN samples are skipped in the mean.
#[test]
fn test_nan_samples_skipped() {
    let s = series(&[0.0, 1.0, 2.0], &[1.0, f64::NAN, 5.0]);
    let out = run(config(FilterKind::Boxcar, 2.0), &s);
    assert_eq!(out, vec![vec![1.0, 3.0]]);
}

/// Test that no record is emitted when every column fails.
#[test]
fn test_all_columns_rejected() {
    let s = series(&[0.0, 1.0, 2.0], &[f64::NAN, f64::NAN, f64::NAN]);
    let out = run(config(FilterKind::Median, 2.0), &s);
    assert!(out.is_empty());
}

// ============================================================================
// Variable Width Tests
// ============================================================================

/// Test that a constant width table matches the fixed-width filter.
#[test]
fn test_variable_width_constant() {
    let s = series(&[0.0, 1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 4.0, 5.0]);
    let cfg = FilterConfig {
        width_tables: vec![WidthTable::from_pairs(&[(0.0, 2.0), (10.0, 2.0)]).unwrap()],
        ..config(FilterKind::Boxcar, 0.0)
    };
    let out = run(cfg, &s);

    assert_eq!(out, run(config(FilterKind::Boxcar, 2.0), &s));
}

/// Test that a variable width trims a requested range like a fixed width.
#[test]
fn test_variable_width_range_trimmed() {
    let time: Vec<f64> = (0..=10).map(f64::from).collect();
    let values: Vec<f64> = time.iter().map(|t| t * t).collect();
    let s = series(&time, &values);
    let range = OutputTimes::Range {
        min: 2.0,
        max: 8.0,
        inc: 1.0,
    };

    let fixed = run(
        FilterConfig {
            output_times: range.clone(),
            ..config(FilterKind::Boxcar, 2.0)
        },
        &s,
    );
    let variable = run(
        FilterConfig {
            output_times: range,
            width_tables: vec![WidthTable::from_pairs(&[(0.0, 2.0), (10.0, 2.0)]).unwrap()],
            ..config(FilterKind::Boxcar, 0.0)
        },
        &s,
    );

    let times: Vec<f64> = fixed.iter().map(|r| r[0]).collect();
    assert_eq!(times, vec![3.0, 4.0, 5.0, 6.0, 7.0]);
    assert_eq!(variable, fixed);
}

/// Test that output times outside the width table are skipped.
#[test]
fn test_variable_width_domain() {
    let s = series(&[0.0, 1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 4.0, 5.0]);
    let cfg = FilterConfig {
        width_tables: vec![WidthTable::from_pairs(&[(0.0, 2.0), (2.0, 2.0)]).unwrap()],
        ..config(FilterKind::Boxcar, 0.0)
    };
    let mut executor = FilterExecutor::from_config(cfg);
    let mut out = Vec::new();
    executor.run_segment(&s, &mut out).unwrap();

    let times: Vec<f64> = out.iter().map(|r| r[0]).collect();
    assert_eq!(times, vec![1.0, 2.0]);
    assert_eq!(executor.diagnostics().points_skipped_domain, 2);
}

/// Test that a repeated node time takes the width of its first node.
#[test]
fn test_variable_width_repeated_node() {
    let s = series(
        &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 70.0],
    );
    let cfg = FilterConfig {
        use_ends: true,
        output_times: OutputTimes::List(vec![1.0, 4.0]),
        width_tables: vec![WidthTable::from_pairs(&[
            (0.0, 2.0),
            (4.0, 2.0),
            (4.0, 4.0),
            (6.0, 4.0),
        ])
        .unwrap()],
        ..config(FilterKind::Boxcar, 0.0)
    };
    let out = run(cfg, &s);

    // At t = 4 the first node of a repeated time wins: width 2, window [3, 5]
    assert_eq!(out.len(), 2);
    assert_eq!(out[0][1], 0.0);
    assert_eq!(out[1][1], 0.0);
}

// ============================================================================
// Segment Tests
// ============================================================================

/// Test that a single-row segment is skipped without error.
#[test]
fn test_short_segment_skipped() {
    let s = series(&[0.0], &[1.0]);
    let mut executor = FilterExecutor::from_config(config(FilterKind::Boxcar, 2.0));
    let mut out = Vec::new();

    assert_eq!(executor.run_segment(&s, &mut out).unwrap(), 0);
    assert_eq!(executor.diagnostics().segments_skipped, 1);
    assert_eq!(executor.segments_seen(), 1);
}

/// Test that a convolution filter skips a segment whose time does not advance.
#[test]
fn test_constant_time_skipped() {
    let s = series(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]);
    let mut executor = FilterExecutor::from_config(config(FilterKind::Boxcar, 2.0));
    let mut out = Vec::new();

    assert_eq!(executor.run_segment(&s, &mut out).unwrap(), 0);
    assert_eq!(executor.diagnostics().segments_skipped, 1);
}

/// Test that diagnostics accumulate across segments.
#[test]
fn test_diagnostics_accumulate() {
    let s = series(&[0.0, 1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 4.0, 5.0]);
    let mut executor = FilterExecutor::from_config(config(FilterKind::Boxcar, 2.0));
    let mut out = Vec::new();

    executor.run_segment(&s, &mut out).unwrap();
    executor.run_segment(&s, &mut out).unwrap();
    let diagnostics = executor.finish();

    assert_eq!(diagnostics.segments_filtered, 2);
    assert_eq!(diagnostics.records_emitted, 6);
    assert_eq!(out.len(), 6);
}

proptest! {
    /// The boxcar output is the mean of the present samples within the
    /// half-width, for any sampling on a quarter-unit grid.
    #[test]
    fn prop_boxcar_is_window_mean(
        steps in prop::collection::vec(1u32..6, 5..30),
        values in prop::collection::vec(-100.0f64..100.0, 30),
        k in 1u32..4,
    ) {
        let mut t = 0.0;
        let time: Vec<f64> = steps.iter().map(|&s| { t += f64::from(s) * 0.25; t }).collect();
        let values = &values[..time.len()];
        let reach = f64::from(k);
        let s = series(&time, values);
        let cfg = FilterConfig {
            use_ends: true,
            output_times: OutputTimes::List(time.clone()),
            sampling_interval: Some(0.25),
            ..config(FilterKind::Boxcar, 2.0 * reach + 0.25)
        };
        let out = run(cfg, &s);

        prop_assert_eq!(out.len(), time.len());
        for record in &out {
            let inside: Vec<f64> = time
                .iter()
                .zip(values)
                .filter(|&(&x, _)| (x - record[0]).abs() <= reach)
                .map(|(_, &v)| v)
                .collect();
            let mean = inside.iter().sum::<f64>() / inside.len() as f64;
            prop_assert!((record[1] - mean).abs() <= 1e-9 * (1.0 + mean.abs()));
        }
    }

    /// Filtering the same segment twice gives identical output.
    #[test]
    fn prop_run_is_repeatable(
        values in prop::collection::vec(-100.0f64..100.0, 5..40),
    ) {
        let time: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
        let s = series(&time, &values);
        let a = run(config(FilterKind::Median, 3.0), &s);
        let b = run(config(FilterKind::Median, 3.0), &s);
        prop_assert_eq!(a, b);
    }
}
