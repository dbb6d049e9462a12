#![cfg(feature = "dev")]
//! Tests for output-time planning.
//!
//! These tests verify which output times a segment produces for:
//! - Native times, trimmed by one half-width at each end
//! - Regular grids from an increment or an explicit range
//! - Explicit lists of output times
//! - The `use_ends` override
//!
//! ## Test Organization
//!
//! 1. **Native Times** - Trimming and `use_ends`
//! 2. **Grids** - Increment and range grids
//! 3. **Lists** - Explicit output times
//! 4. **Helpers** - `admits` and `nearest_row`

use approx::assert_relative_eq;

use filter1d::internals::algorithms::planner::{admits, nearest_row, plan, OutputTimes};

const TIME: [f64; 6] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];

// ============================================================================
// Native Time Tests
// ============================================================================

/// Test that native times closer than a half-width to either end are dropped.
#[test]
fn test_native_trimmed() {
    let p = plan(&TIME, &OutputTimes::Native, 1.5, false, 0.0);

    assert_eq!(p.times, vec![2.0, 3.0]);
    assert_eq!(p.rows, vec![2, 3]);
}

/// Test that `use_ends` keeps every native time.
#[test]
fn test_native_use_ends() {
    let p = plan(&TIME, &OutputTimes::Native, 1.5, true, 0.0);

    assert_eq!(p.len(), 6);
    assert_eq!(p.rows, vec![0, 1, 2, 3, 4, 5]);
}

/// Test that a half-width wider than the data leaves nothing.
#[test]
fn test_native_too_wide() {
    let p = plan(&TIME, &OutputTimes::Native, 3.0, false, 0.0);
    assert!(p.is_empty());
}

/// Test an empty time column.
#[test]
fn test_plan_empty_time() {
    let p = plan::<f64>(&[], &OutputTimes::Native, 1.0, false, 0.0);
    assert!(p.is_empty());
}

// ============================================================================
// Grid Tests
// ============================================================================

/// Test an increment grid aligned to multiples of the increment.
#[test]
fn test_increment_grid() {
    let time = [0.3, 1.0, 2.0, 3.0, 4.0, 4.7];
    let p = plan(&time, &OutputTimes::Increment(1.0), 1.0, false, 0.0);

    // Grid spans [0, 5], trimmed to [1, 4]
    assert_eq!(p.times, vec![1.0, 2.0, 3.0, 4.0]);
}

/// Test an increment grid with `use_ends`.
#[test]
fn test_increment_grid_use_ends() {
    let p = plan(&TIME, &OutputTimes::Increment(2.5), 1.0, true, 0.0);
    assert_eq!(p.times, vec![0.0, 2.5, 5.0]);
    assert_eq!(p.rows, vec![0, 2, 5]);
}

/// Test a range grid pulled in toward the data span, keeping its phase.
#[test]
fn test_range_grid_clipped() {
    let range = OutputTimes::Range {
        min: -2.5,
        max: 10.0,
        inc: 1.0,
    };
    let p = plan(&TIME, &range, 1.0, false, 0.0);

    // Start moves to -0.5 and stop to 5.0, then each shrinks by one half-width
    assert_eq!(p.times.len(), 4);
    assert_relative_eq!(p.times[0], 0.5);
    assert_relative_eq!(p.times[3], 3.5);
}

/// Test a range inside the data.
#[test]
fn test_range_grid_inside() {
    let range = OutputTimes::Range {
        min: 1.0,
        max: 4.0,
        inc: 0.5,
    };
    let p = plan(&TIME, &range, 0.5, false, 1e-9);
    assert_eq!(p.times, vec![1.5, 2.0, 2.5, 3.0, 3.5]);
}

/// Test that a grid keeps its untrimmed range as the bounds.
#[test]
fn test_range_bounds() {
    let range = OutputTimes::Range {
        min: 1.0,
        max: 4.0,
        inc: 1.0,
    };
    let p = plan(&TIME, &range, 0.0, true, 0.0);

    assert_eq!(p.times, vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(p.bounds, (1.0, 4.0));
    assert!(!p.admits(1.0, 1.0, 0.0));
    assert!(p.admits(2.0, 1.0, 0.0));
    assert!(p.admits(3.0, 1.0, 0.0));
    assert!(!p.admits(4.0, 1.0, 0.0));

    let native = plan(&TIME, &OutputTimes::Native, 0.0, true, 0.0);
    assert_eq!(native.bounds, (0.0, 5.0));
}

// ============================================================================
// List Tests
// ============================================================================

/// Test an explicit list filtered by the half-width margin.
#[test]
fn test_list_filtered() {
    let list = OutputTimes::List(vec![-1.0, 0.5, 1.2, 2.5, 4.9, 6.0]);
    let p = plan(&TIME, &list, 1.0, false, 0.0);

    assert_eq!(p.times, vec![1.2, 2.5]);
    assert_eq!(p.rows, vec![1, 2]);
}

/// Test an explicit list with `use_ends` keeps times inside the data span.
#[test]
fn test_list_use_ends() {
    let list = OutputTimes::List(vec![-1.0, 0.5, 4.9, 6.0]);
    let p = plan(&TIME, &list, 1.0, true, 0.0);
    assert_eq!(p.times, vec![0.5, 4.9]);
}

// ============================================================================
// Helper Tests
// ============================================================================

/// Test the end-margin predicate.
#[test]
fn test_admits() {
    assert!(admits(1.0, 0.0, 5.0, 1.0, 0.0));
    assert!(!admits(0.9, 0.0, 5.0, 1.0, 0.0));
    assert!(admits(0.9, 0.0, 5.0, 1.0, 0.2));
    assert!(!admits(4.5, 0.0, 5.0, 1.0, 0.0));
}

/// Test nearest-row lookup with ties going to the earlier row.
#[test]
fn test_nearest_row() {
    assert_eq!(nearest_row(&TIME, -3.0), 0);
    assert_eq!(nearest_row(&TIME, 1.4), 1);
    assert_eq!(nearest_row(&TIME, 1.5), 1);
    assert_eq!(nearest_row(&TIME, 1.6), 2);
    assert_eq!(nearest_row(&TIME, 9.0), 5);
}

/// Test resampling classification.
#[test]
fn test_is_resampled() {
    assert!(!OutputTimes::<f64>::Native.is_resampled());
    assert!(OutputTimes::Increment(1.0).is_resampled());
    assert_eq!(OutputTimes::<f64>::default(), OutputTimes::Native);
}
