//! Mean ± standard error summaries of smoothed Rt curves.
//!
//! Purpose
//! -------
//! Provide the simple post-estimation summaries the dashboard layer shows next
//! to the curves: the average windowed Rt before and after a reference date
//! (e.g. the day a control measure took effect), and the overall average per
//! region for map shading.
//!
//! Key behaviors
//! -------------
//! - [`WindowStats::from_values`] computes the arithmetic mean and the
//!   standard error of the mean (sample standard deviation with `n − 1`,
//!   divided by `√n`) using `statrs` statistics.
//! - [`compare_around`] splits a region's windows at a reference date:
//!   windows dated on or before it are "before", later ones "after".
//! - [`compare_regions`] repeats the split for several regions and fails on
//!   unknown keys.
//! - [`average_r`] averages each non-empty curve.
//!
//! Invariants & assumptions
//! ------------------------
//! - Window dates are strictly increasing (inherited from window starts).
//! - Empty sides are `None`, and a single window has no standard error;
//!   neither case produces NaN.
use crate::reproduction::{
    errors::RtResult,
    models::dynamic_r::{DynamicRResult, RegionRCurve},
};
use chrono::NaiveDate;
use statrs::statistics::Statistics;

/// Reference reproduction number overlaid as a visual baseline.
pub const RT_BASELINE: f64 = 1.0;

/// `WindowStats` — mean and standard error of a set of windowed Rt values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub mean: f64,
    /// `None` when fewer than two windows are available.
    pub sem: Option<f64>,
    pub count: usize,
}

impl WindowStats {
    /// Summarize `values`; `None` when the slice is empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let count = values.len();
        if count == 0 {
            return None;
        }
        let mean = values.iter().mean();
        let sem = (count >= 2).then(|| values.iter().std_dev() / (count as f64).sqrt());
        Some(WindowStats { mean, sem, count })
    }

    /// Whether the mean lies above [`RT_BASELINE`] (epidemic growing).
    pub fn above_baseline(&self) -> bool {
        self.mean > RT_BASELINE
    }
}

/// `ReferenceComparison` — windowed Rt summarized on both sides of a date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceComparison {
    pub reference: NaiveDate,
    pub before: Option<WindowStats>,
    pub after: Option<WindowStats>,
}

/// Summarize `curve` before (≤) and after (>) `reference`.
pub fn compare_around(curve: &RegionRCurve, reference: NaiveDate) -> ReferenceComparison {
    let split = curve.dates.partition_point(|&date| date <= reference);
    let (before, after) = curve.mean_r().split_at(split);
    ReferenceComparison {
        reference,
        before: WindowStats::from_values(before),
        after: WindowStats::from_values(after),
    }
}

/// [`compare_around`] for several regions, in the order requested.
///
/// Errors
/// ------
/// - `RtError::UnknownRegion` for the first key absent from `result`.
pub fn compare_regions(
    result: &DynamicRResult, regions: &[&str], reference: NaiveDate,
) -> RtResult<Vec<(String, ReferenceComparison)>> {
    regions
        .iter()
        .map(|&region| {
            let curve = result.region(region)?;
            Ok((region.to_string(), compare_around(curve, reference)))
        })
        .collect()
}

/// Mean windowed Rt per region, skipping regions without windows.
pub fn average_r(result: &DynamicRResult) -> Vec<(String, f64)> {
    result
        .curves()
        .iter()
        .filter_map(|curve| {
            WindowStats::from_values(curve.mean_r()).map(|stats| (curve.region.clone(), stats.mean))
        })
        .collect()
}
