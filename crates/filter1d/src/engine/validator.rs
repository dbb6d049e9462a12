//! Validation of filter configurations.
//!
//! ## Purpose
//!
//! This module checks every filter parameter before any data is filtered, so
//! that a misconfigured run fails up front instead of part way through its
//! input.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Widths**: Positive and finite unless a coefficient or width table
//!   defines them.
//! * **Gate thresholds**: Symmetry in `[0, 1]`; quality in `[0, 1]` for
//!   convolution kinds, non-negative for order statistics; lack width within
//!   the filter width.
//! * **Output ranges**: Positive increments, ranges no shorter than the
//!   filter width, ordered explicit lists.
//!
//! ## Non-goals
//!
//! * This module does not validate input segments (see `Series`).
//! * This module does not correct invalid inputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::coefficients::FilterKind;
use crate::algorithms::planner::OutputTimes;
use crate::engine::executor::FilterConfig;
use crate::primitives::errors::FilterError;
use crate::primitives::table::WidthTable;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for filter configurations.
///
/// Provides static methods that return `Result<(), FilterError>` and fail
/// fast upon the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Filter Definition
    // ========================================================================

    /// Validate the nominal filter width.
    ///
    /// A width is only optional when a coefficient table (custom kind) or a
    /// width table supplies it.
    pub fn validate_width<T: Float>(width: Option<T>, defined_elsewhere: bool) -> Result<(), FilterError> {
        match width {
            Some(w) if w.is_finite() && w > T::zero() => Ok(()),
            None if defined_elsewhere => Ok(()),
            Some(w) if defined_elsewhere && w == T::zero() => Ok(()),
            Some(w) => Err(FilterError::InvalidWidth(w.to_f64().unwrap_or(f64::NAN))),
            None => Err(FilterError::InvalidWidth(0.0)),
        }
    }

    /// Validate custom coefficients against the filter kind.
    pub fn validate_coefficients<T: Float>(
        kind: FilterKind,
        coefficients: Option<&[T]>,
    ) -> Result<(), FilterError> {
        match (kind, coefficients) {
            (FilterKind::Custom, None) => Err(FilterError::EmptyCoefficientTable),
            (FilterKind::Custom, Some(c)) if c.is_empty() => Err(FilterError::EmptyCoefficientTable),
            (FilterKind::Custom, Some(c)) => {
                match c.iter().position(|v| !v.is_finite()) {
                    Some(i) => Err(FilterError::InvalidNumericValue(format!(
                        "coefficient[{}]={}",
                        i,
                        c[i].to_f64().unwrap_or(f64::NAN)
                    ))),
                    None => Ok(()),
                }
            }
            (_, Some(_)) => Err(FilterError::IncompatibleOptions(
                "coefficients require the custom filter kind",
            )),
            (_, None) => Ok(()),
        }
    }

    /// Validate variable-width tables against the filter kind.
    pub fn validate_width_tables<T: Float>(
        kind: FilterKind,
        tables: &[WidthTable<T>],
    ) -> Result<(), FilterError> {
        if !tables.is_empty() && kind == FilterKind::Custom {
            return Err(FilterError::IncompatibleOptions(
                "custom coefficients cannot be combined with variable widths",
            ));
        }
        Ok(())
    }

    /// Validate that the number of width tables fits the number of segments.
    pub fn validate_width_table_count(tables: usize, segments: usize) -> Result<(), FilterError> {
        if tables > 1 && tables != segments {
            return Err(FilterError::WidthTableSegments { tables, segments });
        }
        Ok(())
    }

    /// Validate a sampling interval or increment.
    pub fn validate_increment<T: Float>(inc: T) -> Result<(), FilterError> {
        if !inc.is_finite() || inc <= T::zero() {
            return Err(FilterError::InvalidIncrement(
                inc.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Quality Gates
    // ========================================================================

    /// Validate the lack-of-data width against the filter width.
    pub fn validate_lack_width<T: Float>(lack: T, width: Option<T>) -> Result<(), FilterError> {
        let lack_f = lack.to_f64().unwrap_or(f64::NAN);
        if !lack.is_finite() || lack < T::zero() {
            return Err(FilterError::InvalidLackWidth {
                lack: lack_f,
                width: width.and_then(|w| w.to_f64()).unwrap_or(f64::NAN),
            });
        }
        if let Some(w) = width {
            if w > T::zero() && lack > w {
                return Err(FilterError::InvalidLackWidth {
                    lack: lack_f,
                    width: w.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
        Ok(())
    }

    /// Validate the symmetry coefficient.
    pub fn validate_symmetry<T: Float>(symmetry: T) -> Result<(), FilterError> {
        if !(symmetry >= T::zero() && symmetry <= T::one()) {
            return Err(FilterError::InvalidSymmetry(
                symmetry.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the quality factor for `kind`.
    pub fn validate_quality<T: Float>(quality: T, kind: FilterKind) -> Result<(), FilterError> {
        let valid = if kind.is_convolution() {
            quality >= T::zero() && quality <= T::one()
        } else {
            quality.is_finite() && quality >= T::zero()
        };
        if !valid {
            return Err(FilterError::InvalidQuality(
                quality.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Output Times
    // ========================================================================

    /// Validate the output times.
    pub fn validate_output_times<T: Float>(
        requested: &OutputTimes<T>,
        width: Option<T>,
    ) -> Result<(), FilterError> {
        match requested {
            OutputTimes::Native => Ok(()),
            OutputTimes::Increment(inc) => Self::validate_increment(*inc),
            OutputTimes::Range { min, max, inc } => {
                Self::validate_increment(*inc)?;
                if !min.is_finite() || !max.is_finite() {
                    return Err(FilterError::InvalidNumericValue(format!(
                        "output range {}/{}",
                        min.to_f64().unwrap_or(f64::NAN),
                        max.to_f64().unwrap_or(f64::NAN)
                    )));
                }
                let interval = *max - *min;
                if let Some(w) = width {
                    if interval < w {
                        return Err(FilterError::OutputIntervalTooShort {
                            interval: interval.to_f64().unwrap_or(f64::NAN),
                            width: w.to_f64().unwrap_or(f64::NAN),
                        });
                    }
                }
                Ok(())
            }
            OutputTimes::List(times) => {
                if times.is_empty() {
                    return Err(FilterError::EmptyInput);
                }
                for (i, pair) in times.windows(2).enumerate() {
                    if !(pair[1] >= pair[0]) {
                        return Err(FilterError::UnorderedTable(format!(
                            "output time decreases at position {}",
                            i + 1
                        )));
                    }
                }
                match times.iter().position(|t| !t.is_finite()) {
                    Some(i) => Err(FilterError::InvalidNumericValue(format!(
                        "output time[{i}]"
                    ))),
                    None => Ok(()),
                }
            }
        }
    }

    // ========================================================================
    // Full Configuration
    // ========================================================================

    /// Validate a complete configuration. `width` is the width as given by
    /// the user, before defaults are applied.
    pub fn validate_config<T: Float>(config: &FilterConfig<T>, width: Option<T>) -> Result<(), FilterError> {
        let kind = config.kind;
        let variable = !config.width_tables.is_empty();

        Self::validate_coefficients(kind, config.coefficients.as_deref())?;
        Self::validate_width_tables(kind, &config.width_tables)?;
        Self::validate_width(width, kind == FilterKind::Custom || variable)?;

        if let Some(dt) = config.sampling_interval {
            Self::validate_increment(dt)?;
        }

        let fixed_width = if variable { None } else { width };
        if let Some(lack) = config.gate.lack_width {
            Self::validate_lack_width(lack, fixed_width)?;
        }
        if let Some(symmetry) = config.gate.symmetry {
            Self::validate_symmetry(symmetry)?;
        }
        if let Some(quality) = config.gate.quality {
            Self::validate_quality(quality, kind)?;
        }

        Self::validate_output_times(&config.output_times, fixed_width)
    }

    // ========================================================================
    // Builder
    // ========================================================================

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), FilterError> {
        if let Some(param) = duplicate_param {
            return Err(FilterError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
