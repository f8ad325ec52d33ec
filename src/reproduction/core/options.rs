//! Options for dynamic Rt estimation.
//!
//! [`RtOptions`] bundles the tunables of the pipeline: the smoothing window,
//! the serial-interval parameters, and how window starts are labelled with
//! calendar dates ([`DateAlignment`]). Defaults reproduce the reference
//! configuration (window size 3, Gamma(1.46, 0.78), report-date labels).
use crate::reproduction::{
    core::{serial_interval::SerialIntervalParams, window::DEFAULT_WINDOW_SIZE},
    errors::{RtError, RtResult},
};
use std::str::FromStr;

/// Which calendar date labels a window starting at epicurve index `t`.
///
/// The epicurve is offset by one against the cumulative date axis: entry `t`
/// holds the cases reported between `dates[t]` and `dates[t + 1]`.
///
/// - `ReportDate`: label with `dates[t + 1]`, the day on which the first
///   contributing day's cases were reported.
/// - `IntervalStart`: label with `dates[t]`, the opening date of the first
///   contributing interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateAlignment {
    #[default]
    ReportDate,
    IntervalStart,
}

impl DateAlignment {
    /// Offset added to an epicurve index to reach the cumulative date axis.
    pub fn date_offset(&self) -> usize {
        match self {
            DateAlignment::ReportDate => 1,
            DateAlignment::IntervalStart => 0,
        }
    }
}

impl FromStr for DateAlignment {
    type Err = RtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "report_date" | "report" => Ok(DateAlignment::ReportDate),
            "interval_start" | "start" => Ok(DateAlignment::IntervalStart),
            other => Err(RtError::InvalidAlignment { name: other.to_string() }),
        }
    }
}

/// `RtOptions` — configuration for one refresh of the estimator.
///
/// Fields
/// ------
/// - `window_size`: `usize`
///   Days beyond the window start (a window spans `window_size + 1` days).
/// - `serial_interval`: [`SerialIntervalParams`]
///   Gamma generation-time parameters shared by every region.
/// - `alignment`: [`DateAlignment`]
///   Calendar labelling of window starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RtOptions {
    pub window_size: usize,
    pub serial_interval: SerialIntervalParams,
    pub alignment: DateAlignment,
}

impl RtOptions {
    /// Create options from explicit values; `None` falls back to the default.
    ///
    /// Errors
    /// ------
    /// - `RtError::InvalidShape` / `RtError::InvalidScale` if a supplied
    ///   `(shape, scale)` pair is not finite and strictly positive.
    pub fn new(
        window_size: Option<usize>, serial_interval: Option<(f64, f64)>,
        alignment: Option<DateAlignment>,
    ) -> RtResult<Self> {
        let serial_interval = match serial_interval {
            Some((shape, scale)) => SerialIntervalParams::new(shape, scale)?,
            None => SerialIntervalParams::default(),
        };
        Ok(RtOptions {
            window_size: window_size.unwrap_or(DEFAULT_WINDOW_SIZE),
            serial_interval,
            alignment: alignment.unwrap_or_default(),
        })
    }
}

impl Default for RtOptions {
    fn default() -> Self {
        RtOptions {
            window_size: DEFAULT_WINDOW_SIZE,
            serial_interval: SerialIntervalParams::default(),
            alignment: DateAlignment::default(),
        }
    }
}
