//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the primitive data structures used throughout the
//! crate: the input segment, the two-pointer window, scratch buffers,
//! auxiliary tables and the error type. It has zero internal dependencies
//! within the crate.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Input segments.
pub mod series;

/// Windowing logic.
pub mod window;

/// Shared error types.
pub mod errors;

/// Buffer management.
pub mod buffer;

/// Coefficient, width and output-time tables.
pub mod table;
