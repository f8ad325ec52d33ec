//! reproduction — time-varying effective reproduction number (Rt).
//!
//! Purpose
//! -------
//! Estimate a smoothed Rt curve per region from cumulative confirmed-case
//! counts with the Wallinga–Teunis back-calculation method: every new case is
//! attributed to earlier cases through a fixed Gamma serial-interval kernel,
//! the attributions are summed into one Rt value per day, and the daily
//! values are pooled into incidence-weighted rolling windows.
//!
//! Key behaviors
//! -------------
//! - Validate raw case tables once at the boundary via [`CaseTable`].
//! - Derive clamped daily incidence with [`epicurve`].
//! - Evaluate the serial-interval kernel through [`SerialInterval`].
//! - Build normalized infectivity weights with [`InfectivityWeights`] and
//!   fold them into daily estimates with [`daily_r`].
//! - Smooth daily estimates into [`WindowedR`] with [`smooth`].
//! - Orchestrate all regions via [`compute_dynamic_r`] and publish the result
//!   through [`DynamicRStore`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Epicurve entries are always `≥ 0`; downward revisions are clamped on the
//!   day they occur.
//! - Zero or non-finite normalization denominators are resolved to zero
//!   rows / dropped windows and never surface as errors or NaNs.
//! - Regions are independent and processed in input order; the result is
//!   deterministic.
//!
//! Conventions
//! -----------
//! - Window starts are epicurve indices. Calendar labels follow
//!   [`DateAlignment`] (default: the report date of the first contributing
//!   day, `dates[t + 1]`).
//! - Errors are reported via [`RtError`] / [`RtResult`]; only the ingestion
//!   boundary, options validation, region lookups, and feed failures produce
//!   them.
//!
//! Downstream usage
//! ----------------
//! - One-shot: build a [`CaseTable`], call [`compute_dynamic_r`] with
//!   [`RtOptions::default`], and read curves via [`DynamicRResult::region`].
//! - Periodic: keep a [`DynamicRStore`], call [`DynamicRStore::refresh`] from
//!   the caller's scheduler, and serve readers from [`DynamicRStore::load`].
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each stage; `tests/integration_rt_pipeline.rs`
//!   drives ingestion → estimation → publication → summaries end to end.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    CSSE_DATE_FORMAT, CaseTable, DEFAULT_WINDOW_SIZE, DateAlignment, ISO_DATE_FORMAT,
    ISO_DATETIME_FORMAT, InfectivityWeights, RegionSeries, RtOptions, SerialInterval,
    SerialIntervalParams, WindowedR, daily_r, epicurve, first_window_start, parse_column_dates,
    parse_iso_date, smooth,
};

pub use self::errors::{RtError, RtResult};

pub use self::models::{
    CaseFeed, DynamicRResult, DynamicRSnapshot, DynamicRStore, RegionRCurve, compute_dynamic_r,
    compute_region,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::{
        CaseFeed, CaseTable, DateAlignment, DynamicRResult, DynamicRStore, RegionRCurve, RtError,
        RtOptions, RtResult, compute_dynamic_r,
    };
}
