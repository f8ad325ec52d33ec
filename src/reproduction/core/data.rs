//! Case-count containers for the Rt pipeline (the ingestion boundary).
//!
//! Purpose
//! -------
//! Provide a validated rectangular table of cumulative confirmed-case counts
//! (rows = regions, columns = consecutive calendar dates) and per-region
//! borrowed views over it. This module is the only place where input shape
//! is checked; everything downstream assumes clean rectangular numeric data.
//!
//! Key behaviors
//! -------------
//! - [`CaseTable::new`] enforces the table invariants (non-empty date axis,
//!   matching row/column counts, unique region keys, finite non-negative
//!   cells) and reports violations as [`RtError`] shape variants.
//! - [`CaseTable::from_rows`] accepts ragged `Vec<Vec<f64>>` input, as
//!   produced by CSV readers, and rejects rows of the wrong length.
//! - [`CaseTable::aggregate_by_region`] sums rows sharing a key (province
//!   rows rolled up into their country) before validation.
//! - [`CaseTable::without_regions`] drops non-geographic rows such as
//!   cruise ships.
//! - [`parse_column_dates`] turns feed column headers into `NaiveDate`s.
//!
//! Invariants & assumptions
//! ------------------------
//! - `counts.dim() == (regions.len(), dates.len())` and `dates.len() > 0`.
//! - Region keys are unique; row order is preserved and defines the order of
//!   the result set.
//! - Cumulative series may decrease (upstream revisions); that is handled by
//!   clamping in the incidence stage, not rejected here.
//!
//! Testing notes
//! -------------
//! - Unit tests cover each shape error, aggregation order and sums, row
//!   exclusion, and CSSE-style date header parsing.
use crate::reproduction::errors::{RtError, RtResult};
use chrono::{NaiveDate, NaiveDateTime};
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use std::collections::{HashMap, HashSet};

/// Header format of the JHU CSSE time-series tables (e.g. `1/22/20`).
pub const CSSE_DATE_FORMAT: &str = "%m/%d/%y";

/// Calendar dates exchanged with dashboard clients (e.g. `2020-03-05`).
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamps sent by date-picker widgets (e.g. `2020-03-05 00:00:00`).
pub const ISO_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `RegionSeries` — one region's cumulative counts and their dates.
///
/// Borrowed from a [`CaseTable`]; `cumulative.len() == dates.len()`.
#[derive(Debug, Clone, Copy)]
pub struct RegionSeries<'a> {
    pub region: &'a str,
    pub cumulative: ArrayView1<'a, f64>,
    pub dates: &'a [NaiveDate],
}

/// `CaseTable` — validated cumulative case counts for all regions.
///
/// Fields
/// ------
/// - `regions`: `Vec<String>`
///   Unique region keys, one per row.
/// - `dates`: `Vec<NaiveDate>`
///   Calendar date of each column, in order.
/// - `counts`: `Array2<f64>`
///   Cumulative confirmed cases, `regions.len() × dates.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseTable {
    regions: Vec<String>,
    dates: Vec<NaiveDate>,
    counts: Array2<f64>,
}

impl CaseTable {
    /// Construct a validated table.
    ///
    /// Errors
    /// ------
    /// - `RtError::EmptyDateAxis` when `dates` is empty.
    /// - `RtError::RegionCountMismatch` / `RtError::DateCountMismatch` when
    ///   the labels do not match `counts.dim()`.
    /// - `RtError::UnorderedDates` when the date axis is not strictly
    ///   increasing (unsorted or repeated dates).
    /// - `RtError::DuplicateRegion` on the first repeated key.
    /// - `RtError::NonFiniteCount` / `RtError::NegativeCount` on the first
    ///   offending cell, scanning row by row.
    pub fn new(regions: Vec<String>, dates: Vec<NaiveDate>, counts: Array2<f64>) -> RtResult<Self> {
        if dates.is_empty() {
            return Err(RtError::EmptyDateAxis);
        }
        let (rows, columns) = counts.dim();
        if regions.len() != rows {
            return Err(RtError::RegionCountMismatch { regions: regions.len(), rows });
        }
        if dates.len() != columns {
            return Err(RtError::DateCountMismatch { dates: dates.len(), columns });
        }
        if let Some(pos) = dates.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(RtError::UnorderedDates { column: pos + 1 });
        }

        let mut seen = HashSet::with_capacity(regions.len());
        for region in &regions {
            if !seen.insert(region.as_str()) {
                return Err(RtError::DuplicateRegion { region: region.clone() });
            }
        }

        for ((row, column), &value) in counts.indexed_iter() {
            if !value.is_finite() {
                return Err(RtError::NonFiniteCount { row, column, value });
            }
            if value < 0.0 {
                return Err(RtError::NegativeCount { row, column, value });
            }
        }

        Ok(CaseTable { regions, dates, counts })
    }

    /// Construct from possibly ragged rows.
    ///
    /// Errors
    /// ------
    /// - `RtError::RaggedRow` if any row length differs from `dates.len()`.
    /// - Any error of [`CaseTable::new`].
    pub fn from_rows(
        regions: Vec<String>, dates: Vec<NaiveDate>, rows: Vec<Vec<f64>>,
    ) -> RtResult<Self> {
        let counts = stack_rows(&dates, rows)?;
        CaseTable::new(regions, dates, counts)
    }

    /// Sum rows that share a region key, then validate.
    ///
    /// Output rows follow the order in which each key first appears.
    pub fn aggregate_by_region(
        regions: Vec<String>, dates: Vec<NaiveDate>, rows: Vec<Vec<f64>>,
    ) -> RtResult<Self> {
        if regions.len() != rows.len() {
            return Err(RtError::RegionCountMismatch { regions: regions.len(), rows: rows.len() });
        }
        let counts = stack_rows(&dates, rows)?;

        let mut keys: Vec<String> = Vec::new();
        let mut slot: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<usize> = Vec::with_capacity(regions.len());
        for region in regions {
            let next = keys.len();
            let idx = *slot.entry(region.clone()).or_insert(next);
            if idx == next {
                keys.push(region);
            }
            groups.push(idx);
        }

        let mut summed = Array2::<f64>::zeros((keys.len(), dates.len()));
        for (row, &group) in counts.axis_iter(Axis(0)).zip(groups.iter()) {
            let mut target = summed.row_mut(group);
            target += &row;
        }

        CaseTable::new(keys, dates, summed)
    }

    /// Copy of the table without the named regions; unknown names are ignored.
    pub fn without_regions(&self, excluded: &[&str]) -> CaseTable {
        let keep: Vec<usize> = self
            .regions
            .iter()
            .enumerate()
            .filter(|(_, region)| !excluded.contains(&region.as_str()))
            .map(|(idx, _)| idx)
            .collect();
        CaseTable {
            regions: keep.iter().map(|&idx| self.regions[idx].clone()).collect(),
            dates: self.dates.clone(),
            counts: self.counts.select(Axis(0), &keep),
        }
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn counts(&self) -> ArrayView2<'_, f64> {
        self.counts.view()
    }

    pub fn n_regions(&self) -> usize {
        self.regions.len()
    }

    /// Per-region views in row order.
    pub fn region_series(&self) -> impl Iterator<Item = RegionSeries<'_>> + '_ {
        let dates = self.dates.as_slice();
        self.regions.iter().zip(self.counts.axis_iter(Axis(0))).map(move |(region, row)| {
            RegionSeries { region: region.as_str(), cumulative: row, dates }
        })
    }
}

/// Parse feed column headers as calendar dates with a `chrono` format string.
///
/// Errors
/// ------
/// - `RtError::InvalidDate` for the first header that does not parse.
pub fn parse_column_dates<S: AsRef<str>>(headers: &[S], format: &str) -> RtResult<Vec<NaiveDate>> {
    headers
        .iter()
        .map(|header| {
            let header = header.as_ref().trim();
            NaiveDate::parse_from_str(header, format).map_err(|_| RtError::InvalidDate {
                header: header.to_string(),
                format: format.to_string(),
            })
        })
        .collect()
}

/// Parse a whole ISO date or date-time string; the time of day is dropped.
///
/// Errors
/// ------
/// - `RtError::InvalidDate` when `raw` matches neither [`ISO_DATE_FORMAT`]
///   nor [`ISO_DATETIME_FORMAT`], including trailing text after a valid date.
pub fn parse_iso_date(raw: &str) -> RtResult<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, ISO_DATETIME_FORMAT).map(|dt| dt.date()))
        .map_err(|_| RtError::InvalidDate {
            header: raw.to_string(),
            format: format!("{ISO_DATE_FORMAT} or {ISO_DATETIME_FORMAT}"),
        })
}

fn stack_rows(dates: &[NaiveDate], rows: Vec<Vec<f64>>) -> RtResult<Array2<f64>> {
    let expected = dates.len();
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != expected {
            return Err(RtError::RaggedRow { row, expected, actual: cells.len() });
        }
    }
    let n_rows = rows.len();
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, expected), flat).map_err(|err| RtError::Anyhow(err.to_string()))
}
