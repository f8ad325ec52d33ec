//! Rolling-window smoothing of daily reproduction numbers.
//!
//! Purpose
//! -------
//! Pool the noisy daily estimates `R[k]` into fixed-width windows, weighting
//! each day by its observed incidence so that days with more cases dominate
//! and zero-incidence days (whose `R` carries no evidence) do not dilute the
//! window.
//!
//! Key behaviors
//! -------------
//! - [`first_window_start`] returns the earliest admissible start: the first
//!   day with positive incidence plus one, so every window has observed
//!   history before it. With no positive day the index defaults to 0, giving
//!   a first start of 1.
//! - [`nonzero_window_starts`] enumerates starts `t ∈ [first, N − w]` whose
//!   span holds at least one case; empty windows are dropped entirely.
//! - [`smooth`] computes the incidence-weighted mean of `R` for each retained
//!   start and returns a [`WindowedR`].
//!
//! Conventions
//! -----------
//! - `window_size = w` counts days *beyond* the start: the span of start `t`
//!   is `t ..= t + w`, clipped at the last epicurve index `N − 1`. The last
//!   admissible start `N − w` therefore spans only `w` days.
//! - Indices refer to the epicurve, not to the cumulative date axis; calendar
//!   labels are attached by the orchestrator.
use crate::reproduction::core::incidence::first_positive;
use ndarray::{ArrayView1, s};

/// Default number of days beyond the window start.
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// `WindowedR` — smoothed Rt per retained window start.
///
/// Invariants
/// ----------
/// - `starts` is strictly increasing and `starts.len() == mean_r.len()`.
/// - Every `mean_r` entry is finite (its denominator is a positive case sum).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowedR {
    pub starts: Vec<usize>,
    pub mean_r: Vec<f64>,
}

impl WindowedR {
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// `(start, mean_r)` pairs in increasing start order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.starts.iter().copied().zip(self.mean_r.iter().copied())
    }
}

/// Earliest admissible window start for `epicurve`.
pub fn first_window_start(epicurve: ArrayView1<'_, f64>) -> usize {
    first_positive(epicurve).unwrap_or(0) + 1
}

/// Window starts in `[first_start, N − window_size]` whose span holds cases.
///
/// Returns an empty vector when `N < window_size` or when no span in range
/// contains a positive count.
pub fn nonzero_window_starts(
    epicurve: ArrayView1<'_, f64>, first_start: usize, window_size: usize,
) -> Vec<usize> {
    let n = epicurve.len();
    let Some(last_start) = n.checked_sub(window_size) else {
        return Vec::new();
    };
    (first_start..=last_start)
        .filter(|&t| epicurve.slice(s![t..span_end(t, window_size, n)]).sum() > 0.0)
        .collect()
}

/// Incidence-weighted mean of `daily_r` over every retained window.
///
/// Parameters
/// ----------
/// - `epicurve`: `ArrayView1<f64>`
///   Non-negative daily incidence of length `N`.
/// - `daily_r`: `ArrayView1<f64>`
///   Daily estimates of the same length.
/// - `window_size`: `usize`
///   Days beyond the start; the span is `window_size + 1` days before
///   clipping.
///
/// Returns
/// -------
/// [`WindowedR`] with one entry per retained start, in increasing order.
/// Degenerate curves (too short, all zero) yield an empty result.
pub fn smooth(
    epicurve: ArrayView1<'_, f64>, daily_r: ArrayView1<'_, f64>, window_size: usize,
) -> WindowedR {
    debug_assert_eq!(epicurve.len(), daily_r.len());
    let n = epicurve.len();
    let starts = nonzero_window_starts(epicurve, first_window_start(epicurve), window_size);
    let mean_r = starts
        .iter()
        .map(|&t| {
            let end = span_end(t, window_size, n);
            let cases = epicurve.slice(s![t..end]);
            let weighted = daily_r.slice(s![t..end]).dot(&cases);
            weighted / cases.sum()
        })
        .collect();
    WindowedR { starts, mean_r }
}

#[inline]
fn span_end(start: usize, window_size: usize, n: usize) -> usize {
    (start + window_size + 1).min(n)
}
