//! Layer 3: Algorithms
//!
//! This layer implements the filter's building blocks: coefficient
//! construction, output-time planning, per-column quality gates and the
//! robust/order-statistic estimators. It contains the filtering logic but is
//! orchestrated by the engine layer.

// Filter kinds and discrete convolution coefficients.
pub mod coefficients;

// Output-time sequence planning.
pub mod planner;

// Per-column data-quality gates.
pub mod quality;

// Robust location/scale and order-statistic estimation.
pub mod robustness;
