//! Auxiliary tables consumed by the filter: coefficients, widths, output times.
//!
//! ## Purpose
//!
//! This module holds the width-versus-time table used by variable-width
//! filtering and, with the `std` feature, readers for the plain-text tables a
//! filter can be configured from:
//!
//! * coefficient tables (one coefficient per record, custom filters),
//! * width tables (time/width pairs, one table per `>`-separated segment),
//! * output-time lists (one time per record).
//!
//! ## Text format
//!
//! Records are lines of numeric fields separated by whitespace, commas or
//! semicolons. Blank lines and lines starting with `#` are ignored. A line
//! starting with `>` closes the current segment. Readers parse only the
//! leading fields they use; anything after them is ignored.
//!
//! ## Invariants
//!
//! * A `WidthTable` is non-empty, its times are non-decreasing and NaN-free.
//!
//! ## Non-goals
//!
//! * Binary table formats, headers naming columns, or column selection.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, string::String, vec::Vec};
#[cfg(feature = "std")]
use std::{path::Path, vec::Vec};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::FilterError;

// ============================================================================
// Width Table
// ============================================================================

/// Filter width as a function of time, for variable-width filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct WidthTable<T> {
    times: Vec<T>,
    widths: Vec<T>,
}

impl<T: Float> WidthTable<T> {
    /// Build a table from matching time and width columns.
    pub fn new(times: Vec<T>, widths: Vec<T>) -> Result<Self, FilterError> {
        if times.is_empty() {
            return Err(FilterError::EmptyWidthTable);
        }
        if times.len() != widths.len() {
            return Err(FilterError::InvalidNumericValue(format!(
                "width table has {} times but {} widths",
                times.len(),
                widths.len()
            )));
        }
        for (i, pair) in times.windows(2).enumerate() {
            if !(pair[1] >= pair[0]) {
                return Err(FilterError::UnorderedTable(format!(
                    "width table time decreases at record {}",
                    i + 1
                )));
            }
        }
        if let Some(t) = times.iter().find(|t| !t.is_finite()) {
            return Err(FilterError::InvalidNumericValue(format!(
                "width table time {}",
                t.to_f64().unwrap_or(f64::NAN)
            )));
        }
        if let Some(w) = widths.iter().find(|w| !(w.is_finite() && **w > T::zero())) {
            return Err(FilterError::InvalidWidth(w.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(Self { times, widths })
    }

    /// Build a table from `(time, width)` pairs.
    pub fn from_pairs(pairs: &[(T, T)]) -> Result<Self, FilterError> {
        let (times, widths) = pairs.iter().copied().unzip();
        Self::new(times, widths)
    }

    /// Node times.
    #[inline]
    pub fn times(&self) -> &[T] {
        &self.times
    }

    /// Node widths.
    #[inline]
    pub fn widths(&self) -> &[T] {
        &self.widths
    }

    /// Time domain covered by the table.
    #[inline]
    pub fn domain(&self) -> (T, T) {
        (self.times[0], self.times[self.times.len() - 1])
    }

    /// Largest width in the table.
    pub fn max_width(&self) -> T {
        self.widths.iter().fold(T::zero(), |acc, &w| acc.max(w))
    }
}

// ============================================================================
// Text Parsing
// ============================================================================

/// Split a block of text into segments of numeric records.
///
/// Segments are separated by lines starting with `>`; empty segments are
/// not reported. Every field must be numeric.
pub fn parse_segments<T: Float>(text: &str) -> Result<Vec<Vec<Vec<T>>>, FilterError> {
    parse_leading(text, usize::MAX)
}

/// Like `parse_segments`, keeping only the first `fields` fields of each
/// record and leaving the rest of the line unparsed.
fn parse_leading<T: Float>(text: &str, fields: usize) -> Result<Vec<Vec<Vec<T>>>, FilterError> {
    let mut segments = Vec::new();
    let mut current: Vec<Vec<T>> = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('>') {
            if !current.is_empty() {
                segments.push(core::mem::take(&mut current));
            }
            continue;
        }

        let record = line
            .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
            .filter(|field| !field.is_empty())
            .take(fields)
            .map(|field| parse_field(field, line_no + 1))
            .collect::<Result<Vec<T>, _>>()?;
        current.push(record);
    }

    if !current.is_empty() {
        segments.push(current);
    }
    Ok(segments)
}

fn parse_field<T: Float>(field: &str, line_no: usize) -> Result<T, FilterError> {
    let value: f64 = match field {
        "NaN" | "nan" | "NAN" => f64::NAN,
        _ => field.parse().map_err(|_| {
            FilterError::InvalidNumericValue(format!("'{field}' on line {line_no}"))
        })?,
    };
    T::from(value).ok_or_else(|| FilterError::InvalidNumericValue(String::from(field)))
}

/// Coefficients from table text: the first field of every record.
pub fn parse_coefficients<T: Float>(text: &str) -> Result<Vec<T>, FilterError> {
    let coefficients: Vec<T> = first_fields(parse_leading(text, 1)?);
    if coefficients.is_empty() {
        return Err(FilterError::EmptyCoefficientTable);
    }
    Ok(coefficients)
}

/// Width tables from table text, one per segment.
pub fn parse_width_tables<T: Float>(text: &str) -> Result<Vec<WidthTable<T>>, FilterError> {
    let segments = parse_leading::<T>(text, 2)?;
    if segments.is_empty() {
        return Err(FilterError::EmptyWidthTable);
    }

    segments
        .into_iter()
        .map(|records| {
            let mut times = Vec::with_capacity(records.len());
            let mut widths = Vec::with_capacity(records.len());
            for record in records {
                if record.len() < 2 {
                    return Err(FilterError::InvalidNumericValue(String::from(
                        "width table records need a time and a width",
                    )));
                }
                times.push(record[0]);
                widths.push(record[1]);
            }
            WidthTable::new(times, widths)
        })
        .collect()
}

/// Output times from table text: the first field of every record.
pub fn parse_output_times<T: Float>(text: &str) -> Result<Vec<T>, FilterError> {
    let times: Vec<T> = first_fields(parse_leading(text, 1)?);
    if times.is_empty() {
        return Err(FilterError::EmptyInput);
    }
    Ok(times)
}

fn first_fields<T: Copy>(segments: Vec<Vec<Vec<T>>>) -> Vec<T> {
    segments
        .into_iter()
        .flatten()
        .filter_map(|record| record.first().copied())
        .collect()
}

// ============================================================================
// File Readers
// ============================================================================

#[cfg(feature = "std")]
fn read_text<P: AsRef<Path>>(path: P) -> Result<std::string::String, FilterError> {
    let path = path.as_ref();
    let describe = |e: std::io::Error| FilterError::TableRead(format!("{}: {e}", path.display()));

    std::fs::read_to_string(path).map_err(describe)
}

/// Read a coefficient table from `path`.
#[cfg(feature = "std")]
pub fn read_coefficient_table<T: Float, P: AsRef<Path>>(path: P) -> Result<Vec<T>, FilterError> {
    parse_coefficients(&read_text(path)?)
}

/// Read one or more width tables from `path`.
#[cfg(feature = "std")]
pub fn read_width_tables<T: Float, P: AsRef<Path>>(
    path: P,
) -> Result<Vec<WidthTable<T>>, FilterError> {
    parse_width_tables(&read_text(path)?)
}

/// Read a list of output times from `path`.
#[cfg(feature = "std")]
pub fn read_output_times<T: Float, P: AsRef<Path>>(path: P) -> Result<Vec<T>, FilterError> {
    parse_output_times(&read_text(path)?)
}
