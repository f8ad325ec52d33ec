//! Per-region orchestration of the Rt pipeline and the assembled result set.
//!
//! Purpose
//! -------
//! Run incidence extraction → infectivity weights → daily Rt → window
//! smoothing for every region of a [`CaseTable`], independently, and gather
//! the outputs into an immutable [`DynamicRResult`].
//!
//! Key behaviors
//! -------------
//! - [`compute_region`] handles one region and labels each retained window
//!   with a calendar date according to [`DateAlignment`].
//! - [`compute_dynamic_r`] maps every row of the table, in row order, and
//!   indexes the curves by region key.
//! - [`DynamicRResult::region`] is the lookup boundary; absent keys produce
//!   `RtError::UnknownRegion` instead of synthesized data.
//!
//! Invariants & assumptions
//! ------------------------
//! - Regions never share state; the kernel is stateless and reused.
//! - A region with no valid window yields an empty curve, not an error.
//! - The computation is deterministic: identical input yields bit-identical
//!   output.
//!
//! [`DateAlignment`]: crate::reproduction::core::options::DateAlignment
use crate::reproduction::{
    core::{
        daily::daily_r,
        data::{CaseTable, RegionSeries},
        incidence::epicurve,
        options::RtOptions,
        serial_interval::SerialInterval,
        weights::InfectivityWeights,
        window::{WindowedR, smooth},
    },
    errors::{RtError, RtResult},
};
use chrono::NaiveDate;
use ndarray::Array1;
use std::collections::HashMap;

/// `RegionRCurve` — everything the rendering layer needs for one region.
///
/// Fields
/// ------
/// - `region`: region key.
/// - `cumulative`: raw cumulative counts, one per table date.
/// - `epicurve`: clamped daily incidence, `cumulative.len() − 1` entries.
/// - `windows`: retained window starts (epicurve indices) and mean Rt.
/// - `dates`: calendar label of each retained window, aligned with
///   `windows`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRCurve {
    pub region: String,
    pub cumulative: Array1<f64>,
    pub epicurve: Array1<f64>,
    pub windows: WindowedR,
    pub dates: Vec<NaiveDate>,
}

impl RegionRCurve {
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn mean_r(&self) -> &[f64] {
        &self.windows.mean_r
    }

    /// `(window date, mean Rt)` pairs in chronological order.
    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.windows.mean_r.iter().copied())
    }
}

/// `DynamicRResult` — smoothed Rt curves for every region of one refresh.
///
/// Built wholesale by [`compute_dynamic_r`] and never patched afterwards;
/// publication to readers goes through
/// [`DynamicRStore`](crate::reproduction::models::store::DynamicRStore).
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRResult {
    curves: Vec<RegionRCurve>,
    index: HashMap<String, usize>,
    dates: Vec<NaiveDate>,
    options: RtOptions,
}

impl DynamicRResult {
    /// Result with no regions, used before the first successful refresh.
    pub fn empty(options: RtOptions) -> Self {
        DynamicRResult { curves: Vec::new(), index: HashMap::new(), dates: Vec::new(), options }
    }

    /// Curve for `region`.
    ///
    /// Errors
    /// ------
    /// - `RtError::UnknownRegion { region }` if the key is absent.
    pub fn region(&self, region: &str) -> RtResult<&RegionRCurve> {
        self.index
            .get(region)
            .map(|&idx| &self.curves[idx])
            .ok_or_else(|| RtError::UnknownRegion { region: region.to_string() })
    }

    pub fn contains(&self, region: &str) -> bool {
        self.index.contains_key(region)
    }

    /// Curves in input row order.
    pub fn curves(&self) -> &[RegionRCurve] {
        &self.curves
    }

    pub fn region_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.curves.iter().map(|curve| curve.region.as_str())
    }

    /// Date axis of the cumulative table this result was built from.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn options(&self) -> &RtOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

/// Run the full pipeline for a single region.
pub fn compute_region(
    series: RegionSeries<'_>, serial_interval: &SerialInterval, options: &RtOptions,
) -> RegionRCurve {
    let incidence = epicurve(series.cumulative);
    let weights = InfectivityWeights::new(incidence.view(), serial_interval);
    let per_day = daily_r(incidence.view(), &weights);
    let windows = smooth(incidence.view(), per_day.view(), options.window_size);

    // Retained starts satisfy t < len(epicurve) = len(dates) − 1, so both
    // alignments index inside the date axis.
    let offset = options.alignment.date_offset();
    let dates = windows.starts.iter().map(|&t| series.dates[t + offset]).collect();

    RegionRCurve {
        region: series.region.to_string(),
        cumulative: series.cumulative.to_owned(),
        epicurve: incidence,
        windows,
        dates,
    }
}

/// Compute smoothed Rt curves for every region of `table`.
///
/// Errors
/// ------
/// - Propagates a rejection of the serial-interval parameters by `statrs`;
///   does not fail for any validated [`RtOptions`].
pub fn compute_dynamic_r(table: &CaseTable, options: &RtOptions) -> RtResult<DynamicRResult> {
    let serial_interval = SerialInterval::new(options.serial_interval)?;

    let curves: Vec<RegionRCurve> = table
        .region_series()
        .map(|series| compute_region(series, &serial_interval, options))
        .collect();
    let index =
        curves.iter().enumerate().map(|(idx, curve)| (curve.region.clone(), idx)).collect();

    let degenerate = curves.iter().filter(|curve| curve.is_empty()).count();
    log::debug!(
        "computed dynamic R for {} regions over {} dates ({} without a valid window)",
        curves.len(),
        table.dates().len(),
        degenerate
    );

    Ok(DynamicRResult { curves, index, dates: table.dates().to_vec(), options: *options })
}
