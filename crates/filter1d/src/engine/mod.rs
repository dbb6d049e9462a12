//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates filtering by coordinating the primitives (series,
//! window, buffers) and the algorithms (coefficients, planner, quality gates,
//! estimators). It runs the per-segment output loop and validates
//! configurations before any data is touched.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Per-segment filter loop.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output sinks and result types.
pub mod output;
