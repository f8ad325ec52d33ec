//! reproduction::core — building blocks of the Rt pipeline.
//!
//! Purpose
//! -------
//! Collect the per-region stages of the Wallinga–Teunis estimator together
//! with the input containers and options they share. Each stage is a pure
//! function of its inputs; orchestration across regions lives in
//! [`crate::reproduction::models`].
//!
//! Key behaviors
//! -------------
//! - [`data`]: validated case table and per-region series (the only place
//!   input shape is checked).
//! - [`incidence`]: clamped first differences (epicurve).
//! - [`serial_interval`]: Gamma generation-time kernel.
//! - [`weights`]: normalized day×day infectivity matrix.
//! - [`daily`]: one Rt estimate per day.
//! - [`window`]: incidence-weighted rolling-window smoothing.
//! - [`options`]: window size, serial interval, and date alignment.
//!
//! Conventions
//! -----------
//! - All series are `ndarray` 1-D arrays of `f64`; indices are 0-based
//!   epicurve indices unless documented otherwise.
//! - None of these modules log or touch global state.

pub mod daily;
pub mod data;
pub mod incidence;
pub mod options;
pub mod serial_interval;
pub mod weights;
pub mod window;

pub use self::daily::daily_r;
pub use self::data::{
    CSSE_DATE_FORMAT, CaseTable, ISO_DATE_FORMAT, ISO_DATETIME_FORMAT, RegionSeries,
    parse_column_dates, parse_iso_date,
};
pub use self::incidence::epicurve;
pub use self::options::{DateAlignment, RtOptions};
pub use self::serial_interval::{SerialInterval, SerialIntervalParams};
pub use self::weights::InfectivityWeights;
pub use self::window::{DEFAULT_WINDOW_SIZE, WindowedR, first_window_start, smooth};
