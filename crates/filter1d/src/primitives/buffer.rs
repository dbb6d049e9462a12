//! Reusable scratch memory for the filter loop.
//!
//! ## Purpose
//!
//! This module provides the workspaces used while filtering a segment so the
//! per-point loop does not allocate. Buffers are allocated once per executor,
//! grown on demand, and recycled across output points, columns and segments.
//!
//! ## Design notes
//!
//! * **Shared scratch**: One work array is shared by every column of a point.
//!   It is handed to the estimator by exclusive reference and refilled for
//!   each column, so it is never aliased between columns.
//! * **Lazy Expansion**: Slots grow to the widest window seen and never shrink.
//!
//! ## Key concepts
//!
//! * **Slot**: A reusable vector wrapper with automatic capacity management.
//! * **FilterBuffer**: Working memory for the filter executor (robust work
//!   array and the output record under construction).
//!
//! ## Invariants
//!
//! * Slots are only logically cleared between points, never deallocated.
//!
//! ## Non-goals
//!
//! * Thread-local caching or memory reclamation.

// Feature-gated dependencies
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::ops::{Deref, DerefMut};

// ============================================================================
// Slot - Unified Vector Abstraction
// ============================================================================

/// A reusable vector slot with automatic capacity management.
#[derive(Debug, Clone)]
pub struct Slot<T>(Vec<T>);

impl<T> Slot<T> {
    /// Clear the slot (sets length to 0, preserves capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Get a mutable reference to the underlying vector.
    #[inline]
    pub fn as_vec_mut(&mut self) -> &mut Vec<T> {
        &mut self.0
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Deref for Slot<T> {
    type Target = Vec<T>;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Slot<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Helper trait to simplify resizing and filling vectors.
pub trait VecExt<T> {
    /// Resize the vector to `n` and fill with `val`.
    fn assign(&mut self, n: usize, val: T);
}

impl<T: Clone> VecExt<T> for Vec<T> {
    fn assign(&mut self, n: usize, val: T) {
        if self.len() != n {
            self.clear();
            self.resize(n, val);
        } else {
            self.fill(val);
        }
    }
}

// ============================================================================
// FilterBuffer - Working Memory for the Filter Executor
// ============================================================================

/// Working memory for the filter executor.
#[derive(Debug, Clone)]
pub struct FilterBuffer<T> {
    /// Non-NaN window samples of the column being estimated.
    pub work: Slot<T>,

    /// Output record under construction, one value per column.
    pub record: Slot<T>,
}

impl<T> Default for FilterBuffer<T> {
    fn default() -> Self {
        Self {
            work: Slot::default(),
            record: Slot::default(),
        }
    }
}

impl<T: Clone> FilterBuffer<T> {
    /// Reset the record for a new output point.
    pub fn prepare(&mut self, n_cols: usize, fill: T) {
        self.record.as_vec_mut().assign(n_cols, fill);
        self.work.clear();
    }
}
