//! Errors for Rt estimation (ingestion shape checks, configuration, lookups,
//! and feed failures).
//!
//! This module defines [`RtError`], the single error type used across the
//! ingestion boundary, options validation, the snapshot store, and summary
//! statistics. The numeric pipeline itself never fails: degenerate series and
//! undefined ratios are resolved by sanitization and do not surface here.
//!
//! ## Conventions
//! - **Indices are 0-based**; `row`/`column` refer to the rectangular case
//!   table (rows = regions, columns = calendar dates).
//! - Shape problems are reported once, at [`CaseTable`] construction, and
//!   never re-validated downstream.
//! - External feed failures are normalized to [`RtError::FetchFailed`] with
//!   a human-readable reason.
//!
//! [`CaseTable`]: crate::reproduction::core::data::CaseTable
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};
use statrs::distribution::GammaError;

/// Crate-wide result alias for operations that may produce [`RtError`].
pub type RtResult<T> = Result<T, RtError>;

/// Unified error type for Rt estimation.
///
/// Covers malformed case tables, invalid serial-interval parameters or
/// options, unknown region lookups, and failures reported by the external
/// data feed. Implements `Display`/`Error` and converts to a Python
/// `ValueError` at PyO3 boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum RtError {
    // ---- Case table shape ----
    /// The table has no date columns.
    EmptyDateAxis,

    /// Number of region keys does not match the number of table rows.
    RegionCountMismatch { regions: usize, rows: usize },

    /// Number of dates does not match the number of table columns.
    DateCountMismatch { dates: usize, columns: usize },

    /// The date at `column` is not later than the one before it.
    UnorderedDates { column: usize },

    /// A row of a ragged input has the wrong number of cells.
    RaggedRow { row: usize, expected: usize, actual: usize },

    /// Region keys must be unique.
    DuplicateRegion { region: String },

    /// A cell is NaN/±inf.
    NonFiniteCount { row: usize, column: usize, value: f64 },

    /// A cell is < 0 (cumulative counts are never negative).
    NegativeCount { row: usize, column: usize, value: f64 },

    /// A column header could not be parsed as a calendar date.
    InvalidDate { header: String, format: String },

    // ---- Serial interval / options ----
    /// Gamma shape must be finite and > 0.
    InvalidShape { value: f64 },

    /// Gamma scale must be finite and > 0.
    InvalidScale { value: f64 },

    /// Unrecognized date alignment name.
    InvalidAlignment { name: String },

    // ---- Lookups ----
    /// Requested region is absent from the result set.
    UnknownRegion { region: String },

    // ---- External feed ----
    /// The case feed failed; the previous snapshot stays published.
    FetchFailed { reason: String },

    // ---- Anyhow catchall ----
    Anyhow(String),
}

impl std::error::Error for RtError {}

impl std::fmt::Display for RtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Case table shape ----
            RtError::EmptyDateAxis => {
                write!(f, "Case table has no date columns.")
            }
            RtError::RegionCountMismatch { regions, rows } => {
                write!(f, "Region count mismatch: {regions} keys for {rows} table rows")
            }
            RtError::DateCountMismatch { dates, columns } => {
                write!(f, "Date count mismatch: {dates} dates for {columns} table columns")
            }
            RtError::UnorderedDates { column } => {
                write!(f, "Date axis must be strictly increasing; column {column} breaks the order")
            }
            RtError::RaggedRow { row, expected, actual } => {
                write!(f, "Row {row} has {actual} cells; expected {expected}")
            }
            RtError::DuplicateRegion { region } => {
                write!(f, "Region key {region:?} appears more than once")
            }
            RtError::NonFiniteCount { row, column, value } => {
                write!(f, "Case count at row {row}, column {column} is non-finite: {value}")
            }
            RtError::NegativeCount { row, column, value } => {
                write!(f, "Case count at row {row}, column {column} is negative: {value}")
            }
            RtError::InvalidDate { header, format } => {
                write!(f, "Column header {header:?} is not a date in format {format:?}")
            }
            // ---- Serial interval / options ----
            RtError::InvalidShape { value } => {
                write!(f, "Serial interval shape must be finite and > 0; got: {value}")
            }
            RtError::InvalidScale { value } => {
                write!(f, "Serial interval scale must be finite and > 0; got: {value}")
            }
            RtError::InvalidAlignment { name } => {
                write!(
                    f,
                    "Invalid date alignment {name:?} (expected 'report_date' or 'interval_start')"
                )
            }
            // ---- Lookups ----
            RtError::UnknownRegion { region } => {
                write!(f, "Region {region:?} is not present in the result set")
            }
            // ---- External feed ----
            RtError::FetchFailed { reason } => {
                write!(f, "Case feed failed: {reason}")
            }
            // ---- Anyhow catchall ----
            RtError::Anyhow(msg) => write!(f, "Rt Error: {msg}"),
        }
    }
}

impl From<anyhow::Error> for RtError {
    fn from(err: anyhow::Error) -> Self {
        RtError::Anyhow(err.to_string())
    }
}

impl From<GammaError> for RtError {
    fn from(err: GammaError) -> RtError {
        RtError::Anyhow(format!("Gamma distribution rejected parameters: {err}"))
    }
}

/// Convert an [`RtError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<RtError> for PyErr {
    fn from(err: RtError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
