//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer summarizes a filtering run: how many segments, points and
//! records were processed or skipped, and the informational conditions that
//! are reported once at the end of a run.
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
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Run diagnostics and the end-of-run report.
pub mod diagnostics;
