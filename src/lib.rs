//! rt_estimation — smoothed effective reproduction numbers from case counts.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and, when the `python-bindings`
//! feature is enabled, as the PyO3 bridge that exposes the estimator to a
//! Python dashboard through the `_rt_estimation` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`reproduction` and `summary`) as the
//!   public crate surface.
//! - Define the `DynamicR` `#[pyclass]` wrapper and the `#[pymodule]`
//!   initializer for `_rt_estimation`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input conversion, and error mapping.
//! - Python callers pass dates as ISO strings (`YYYY-MM-DD`) and counts as a
//!   regions × dates array of cumulative cases.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`reproduction`] and [`summary`]
//!   directly and can ignore the PyO3 items guarded by `python-bindings`.
//! - The Python dashboard builds one `DynamicR` per refresh and swaps its
//!   reference once construction has succeeded.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_rt_pipeline.rs`.

pub mod reproduction;
pub mod summary;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

#[cfg(feature = "python-bindings")]
use crate::{
    reproduction::{DynamicRResult, ISO_DATE_FORMAT, compute_dynamic_r},
    summary::{RT_BASELINE, WindowStats, average_r, compare_around},
    utils::{extract_case_table, extract_date, extract_rt_options},
};

/// DynamicR — Python-facing wrapper around one computed [`DynamicRResult`].
///
/// Purpose
/// -------
/// Run the full estimator on a case table handed over from Python and expose
/// per-region curves through simple accessors.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `DynamicR(regions, dates, counts, window_size=None, alignment=None, serial_interval=None)`:
/// - `regions`: `list[str]`, unique region keys (one per row).
/// - `dates`: `list[str]`, ISO dates (one per column).
/// - `counts`: 2-D array-like of cumulative cases.
/// - `window_size`: `Optional[int]`, defaults to 3.
/// - `alignment`: `Optional[str]`, `'report_date'` (default) or
///   `'interval_start'`.
/// - `serial_interval`: `Optional[tuple[float, float]]`, Gamma
///   `(shape, scale)`, defaults to `(1.46, 0.78)`.
///
/// Notes
/// -----
/// - Instances are immutable; a refresh builds a new one.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rt_estimation.reproduction")]
pub struct DynamicR {
    inner: DynamicRResult,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl DynamicR {
    #[new]
    #[pyo3(
        signature = (regions, dates, counts, window_size = None, alignment = None, serial_interval = None),
        text_signature = "(regions, dates, counts, window_size=None, alignment=None, serial_interval=None)"
    )]
    pub fn new<'py>(
        regions: Vec<String>, dates: Vec<String>, counts: &Bound<'py, PyAny>,
        window_size: Option<usize>, alignment: Option<&str>, serial_interval: Option<(f64, f64)>,
    ) -> PyResult<Self> {
        let options = extract_rt_options(window_size, alignment, serial_interval)?;
        let table = extract_case_table(regions, dates, counts)?;
        let inner = compute_dynamic_r(&table, &options)?;
        Ok(DynamicR { inner })
    }

    /// Region keys in input order.
    #[getter]
    pub fn regions(&self) -> Vec<String> {
        self.inner.region_names().map(str::to_string).collect()
    }

    /// Smoothed mean Rt per retained window.
    pub fn mean_r(&self, region: &str) -> PyResult<Vec<f64>> {
        Ok(self.inner.region(region)?.mean_r().to_vec())
    }

    /// ISO date label of each retained window.
    pub fn dates(&self, region: &str) -> PyResult<Vec<String>> {
        let curve = self.inner.region(region)?;
        Ok(curve.dates.iter().map(|d| d.format(ISO_DATE_FORMAT).to_string()).collect())
    }

    /// Raw cumulative counts, one per table date.
    pub fn cumulative(&self, region: &str) -> PyResult<Vec<f64>> {
        Ok(self.inner.region(region)?.cumulative.to_vec())
    }

    /// Clamped daily incidence.
    pub fn epicurve(&self, region: &str) -> PyResult<Vec<f64>> {
        Ok(self.inner.region(region)?.epicurve.to_vec())
    }

    /// Window starts as epicurve indices.
    pub fn window_starts(&self, region: &str) -> PyResult<Vec<usize>> {
        Ok(self.inner.region(region)?.windows.starts.clone())
    }

    /// `(region, mean Rt)` for every region with at least one window.
    pub fn average_r(&self) -> Vec<(String, f64)> {
        average_r(&self.inner)
    }

    /// `((mean, sem) | None, (mean, sem) | None)` before/after `reference`.
    pub fn compare(
        &self, region: &str, reference: &str,
    ) -> PyResult<(Option<(f64, Option<f64>)>, Option<(f64, Option<f64>)>)> {
        let reference = extract_date(reference)?;
        let cmp = compare_around(self.inner.region(region)?, reference);
        let pack = |stats: Option<WindowStats>| stats.map(|s| (s.mean, s.sem));
        Ok((pack(cmp.before), pack(cmp.after)))
    }
}

/// _rt_estimation — PyO3 module initializer for the Python extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rt_estimation<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<DynamicR>()?;
    m.add("RT_BASELINE", RT_BASELINE)?;
    Ok(())
}
