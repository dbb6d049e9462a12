//! # filter1d — Time-domain filtering of multi-column series
//!
//! Filters every data column of a time (or distance) ordered table with a
//! moving window, producing one output record per accepted output time.
//!
//! ## Filters
//!
//! | Kind            | Estimate                                              |
//! |-----------------|-------------------------------------------------------|
//! | `Boxcar`        | Mean of the samples in the window                     |
//! | `CosineArch`    | Weighted mean, weights `1 + cos(pi r / h)`            |
//! | `Gaussian`      | Weighted mean, weights `exp(-4.5 (r / h)^2)`          |
//! | `Custom`        | Convolution with user coefficients (may be operators) |
//! | `Median`        | Median of the window                                  |
//! | `Mode`          | Center of the densest run of sorted samples           |
//! | `LowerAll`      | Minimum                                               |
//! | `LowerPositive` | Minimum of the positive samples                       |
//! | `UpperAll`      | Maximum                                               |
//! | `UpperNegative` | Maximum of the negative samples                       |
//!
//! The window is `[t - h, t + h]` with `h` half the filter width. Taps of the
//! convolution filters sit on a grid of the sampling interval, so irregular
//! data is weighted by its distance to the output time.
//!
//! ## Quick Start
//!
//! ```rust
//! use filter1d::prelude::*;
//!
//! let rows = vec![
//!     vec![0.0, 1.0],
//!     vec![1.0, 2.0],
//!     vec![2.0, 3.0],
//!     vec![3.0, 4.0],
//!     vec![4.0, 5.0],
//! ];
//!
//! let filter = Filter1d::new()
//!     .filter(Boxcar, 2.0)
//!     .adapter(Batch)
//!     .build()?;
//!
//! let result = filter.filter_rows(&rows)?;
//!
//! assert_eq!(result.times(), vec![1.0, 2.0, 3.0]);
//! assert_eq!(result.column(1), vec![2.0, 3.0, 4.0]);
//! # Result::<(), FilterError>::Ok(())
//! ```
//!
//! ## Options
//!
//! * **Robust**: `.robust()` clips each column at 2.5 robust scales about its
//!   window median before convolving.
//! * **Highpass**: `.highpass()` reports the input minus the filtered value.
//! * **Gates**: `.lack_width()`, `.symmetry()` and `.quality_factor()` reject
//!   a column at an output time when its window is gappy, lopsided or thin.
//! * **Variable width**: `.variable_width()` interpolates the width from a
//!   table of `(time, width)` pairs.
//! * **Resampling**: `.output_times()` produces output on a grid or list.
//! * **Distance**: `.distance_column()` filters along cumulative x-y distance.
//!
//! ## Streaming
//!
//! ```rust
//! use filter1d::prelude::*;
//!
//! let mut filter = Filter1d::new()
//!     .filter(Median, 2.0)
//!     .adapter(Streaming)
//!     .build()?;
//!
//! let mut sink: Vec<Vec<f64>> = Vec::new();
//! let segment = [[0.0, 1.0], [1.0, 9.0], [2.0, 3.0], [3.0, 4.0]];
//! filter.process_rows(&segment, &mut sink)?;
//! let diagnostics = filter.finalize();
//!
//! assert_eq!(diagnostics.segments_filtered, 1);
//! assert_eq!(sink.len(), diagnostics.records_emitted);
//! # Result::<(), FilterError>::Ok(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - filter construction, planning and estimation.
mod algorithms;

// Layer 4: Evaluation - diagnostics.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
mod engine;

// Layer 6: Adapters - execution mode adapters.
mod adapters;

// High-level fluent API for filtering.
mod api;

pub use api::*;

// Standard filtering prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::{Batch, Streaming},
        DistanceColumn, FilterBuilder as Filter1d, FilterDiagnostics, FilterError,
        FilterKind::Boxcar,
        FilterKind::CosineArch,
        FilterKind::Custom,
        FilterKind::Gaussian,
        FilterKind::LowerAll,
        FilterKind::LowerPositive,
        FilterKind::Median,
        FilterKind::Mode,
        FilterKind::UpperAll,
        FilterKind::UpperNegative,
        FilterResult,
        ModeSelection::Average,
        ModeSelection::Highest,
        ModeSelection::Lowest,
        OutputTimes, RecordSink, Series, WidthTable,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
