//! Serial-interval kernel for back-calculation of reproduction numbers.
//!
//! Purpose
//! -------
//! Provide the generation-time density used to weigh how plausible it is that
//! a case reported on day `j` infected a case reported on day `i`. The
//! density is a Gamma distribution with fixed shape and scale evaluated at
//! integer day lags.
//!
//! Key behaviors
//! -------------
//! - [`SerialIntervalParams`] stores and validates the `(shape, scale)` pair;
//!   its `Default` is the empirically estimated COVID-19 serial interval
//!   (shape 1.46, scale 0.78).
//! - [`SerialInterval`] wraps a `statrs` Gamma distribution and exposes
//!   [`SerialInterval::kernel`], a pure function of the signed lag.
//! - [`SerialInterval::lag_profile`] tabulates the kernel for lags `0..n`,
//!   which is all the weight matrix needs since `W[i][j]` depends on `i − j`
//!   only.
//!
//! Invariants & assumptions
//! ------------------------
//! - `kernel(lag) == 0.0` for every `lag < 0`, independently of the Gamma
//!   parameters.
//! - At `lag == 0` the value is whatever the Gamma density gives there: zero
//!   for `shape > 1`, the rate for `shape == 1`, and `+∞` for `shape < 1`.
//!   Downstream normalization sanitizes non-finite masses.
//!
//! Conventions
//! -----------
//! - `statrs::distribution::Gamma` is parameterized by shape and **rate**;
//!   the rate passed in is `1 / scale`.
use crate::reproduction::errors::{RtError, RtResult};
use statrs::distribution::{Continuous, Gamma};

/// Default Gamma shape of the serial interval.
pub const DEFAULT_SHAPE: f64 = 1.46;

/// Default Gamma scale of the serial interval, in days.
pub const DEFAULT_SCALE: f64 = 0.78;

/// `SerialIntervalParams` — validated Gamma `(shape, scale)` pair.
///
/// Invariants
/// ----------
/// - Both values are finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SerialIntervalParams {
    shape: f64,
    scale: f64,
}

impl SerialIntervalParams {
    /// Construct validated serial-interval parameters.
    ///
    /// Errors
    /// ------
    /// - `RtError::InvalidShape { value }` when `shape` is not finite or ≤ 0.
    /// - `RtError::InvalidScale { value }` when `scale` is not finite or ≤ 0.
    pub fn new(shape: f64, scale: f64) -> RtResult<Self> {
        if !shape.is_finite() || shape <= 0.0 {
            return Err(RtError::InvalidShape { value: shape });
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RtError::InvalidScale { value: scale });
        }
        Ok(SerialIntervalParams { shape, scale })
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for SerialIntervalParams {
    fn default() -> Self {
        SerialIntervalParams { shape: DEFAULT_SHAPE, scale: DEFAULT_SCALE }
    }
}

/// `SerialInterval` — Gamma generation-time density evaluated at day lags.
///
/// Stateless after construction and shared by every region of a refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct SerialInterval {
    params: SerialIntervalParams,
    dist: Gamma,
}

impl SerialInterval {
    /// Build the kernel from validated parameters.
    ///
    /// Errors
    /// ------
    /// - Propagates a `statrs` rejection of `(shape, 1/scale)` as
    ///   `RtError::Anyhow`; unreachable for parameters that passed
    ///   [`SerialIntervalParams::new`].
    pub fn new(params: SerialIntervalParams) -> RtResult<Self> {
        let dist = Gamma::new(params.shape(), 1.0 / params.scale())?;
        Ok(SerialInterval { params, dist })
    }

    pub fn params(&self) -> SerialIntervalParams {
        self.params
    }

    /// Gamma density at a signed integer lag in days.
    ///
    /// Returns exactly `0.0` for negative lags: a case cannot be infected by
    /// one reported after it.
    pub fn kernel(&self, lag: i64) -> f64 {
        if lag < 0 {
            return 0.0;
        }
        self.dist.pdf(lag as f64)
    }

    /// Kernel values for lags `0, 1, …, n − 1`.
    pub fn lag_profile(&self, n: usize) -> Vec<f64> {
        (0..n).map(|lag| self.kernel(lag as i64)).collect()
    }
}
