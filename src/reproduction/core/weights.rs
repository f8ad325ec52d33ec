//! Normalized infectivity weight matrix (Wallinga–Teunis likelihoods).
//!
//! Purpose
//! -------
//! For a region with epicurve `e` of length `N`, build the `N × N` matrix
//! `P` whose entry `(i, j)` is the relative likelihood that a case reported
//! on day `i` was infected by a case reported on day `j`.
//!
//! Key behaviors
//! -------------
//! - Raw weights `W[i][j] = kernel(i − j)` come from the serial-interval
//!   kernel; since they depend on the lag only, the kernel is tabulated once
//!   per region via [`SerialInterval::lag_profile`].
//! - Each row is divided by its incidence-weighted mass
//!   `rowMass[i] = Σ_k W[i][k] · e[k]`.
//! - A row whose mass is zero or non-finite is set to all zeros by an
//!   explicit check, never by letting `0/0` or `x/0` propagate.
//! - Individual quotients that overflow (a subnormal mass) are zeroed too.
//!
//! Invariants & assumptions
//! ------------------------
//! - The epicurve is non-negative (guaranteed by
//!   [`epicurve`](crate::reproduction::core::incidence::epicurve)).
//! - For every row with finite, non-zero mass and no overflowing quotient,
//!   `Σ_j P[i][j] · e[j] = 1`: the row is a probability distribution over the
//!   `e[j]` candidate infectors reported on each earlier day `j`.
//! - Every entry of `P` is finite and `≥ 0`.
//!
//! Performance
//! -----------
//! - O(N²) time and memory per region; the matrix is built fresh for every
//!   computation and dropped after the daily estimates are folded.
use crate::reproduction::core::serial_interval::SerialInterval;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// `InfectivityWeights` — row-normalized likelihood matrix for one region.
#[derive(Debug, Clone, PartialEq)]
pub struct InfectivityWeights {
    p: Array2<f64>,
    row_mass: Array1<f64>,
}

impl InfectivityWeights {
    /// Build and normalize the weight matrix for `epicurve`.
    ///
    /// Parameters
    /// ----------
    /// - `epicurve`: `ArrayView1<f64>`
    ///   Non-negative daily incidence of length `N` (may be empty).
    /// - `serial_interval`: [`SerialInterval`]
    ///   Generation-time kernel shared by all regions.
    ///
    /// Returns
    /// -------
    /// `InfectivityWeights` with an `N × N` matrix and the raw row masses
    /// (before sanitization, kept for diagnostics).
    pub fn new(epicurve: ArrayView1<'_, f64>, serial_interval: &SerialInterval) -> Self {
        let n = epicurve.len();
        let profile = serial_interval.lag_profile(n);
        let raw = Array2::from_shape_fn((n, n), |(i, j)| if i >= j { profile[i - j] } else { 0.0 });

        let row_mass = raw.dot(&epicurve);
        let mut p = raw;
        for (mut row, &mass) in p.axis_iter_mut(Axis(0)).zip(row_mass.iter()) {
            if mass.is_finite() && mass != 0.0 {
                row.mapv_inplace(|w| {
                    let q = w / mass;
                    if q.is_finite() { q } else { 0.0 }
                });
            } else {
                // 0/0, x/0, and masses poisoned by an unbounded kernel at lag 0.
                row.fill(0.0);
            }
        }

        InfectivityWeights { p, row_mass }
    }

    /// Normalized matrix `P`.
    pub fn matrix(&self) -> ArrayView2<'_, f64> {
        self.p.view()
    }

    /// Unsanitized row masses `Σ_k W[i][k] · e[k]`.
    pub fn row_mass(&self) -> ArrayView1<'_, f64> {
        self.row_mass.view()
    }

    pub fn len(&self) -> usize {
        self.p.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.p.nrows() == 0
    }
}
