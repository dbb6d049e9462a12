//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used by the filter:
//! - Weight functions for the convolution kernels
//! - Order statistics (hinted median, mode, signed extremes)
//! - Linear interpolation of tabulated series
//! - Along-track distance for spatial filtering
//!
//! These are reusable numeric building blocks with no filter-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Weight functions for the convolution kernels.
pub mod kernel;

/// Median, mode and extreme-value selection.
pub mod order;

/// Linear interpolation.
pub mod interpolation;

/// Cumulative Cartesian distance.
pub mod distance;
