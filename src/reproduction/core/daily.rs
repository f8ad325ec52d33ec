//! Daily reproduction numbers from normalized infectivity weights.
//!
//! `R[j] = Σ_i e[i] · P[i][j]`: every case reported on day `i` is attributed
//! back to the candidate infection days `j` in proportion to `P[i][j]`, and
//! `R[j]` collects the secondary cases attributed to a single case of day `j`.
//! Days whose rows were sanitized to zero in [`InfectivityWeights`] simply
//! contribute nothing; there is no separate branch for them here.
use crate::reproduction::core::weights::InfectivityWeights;
use ndarray::{Array1, ArrayView1};

/// Fold the weight matrix and incidence into one Rt estimate per day.
///
/// The output has the same length as `epicurve`.
pub fn daily_r(epicurve: ArrayView1<'_, f64>, weights: &InfectivityWeights) -> Array1<f64> {
    epicurve.dot(&weights.matrix())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reproduction::core::serial_interval::{SerialInterval, SerialIntervalParams};
    use approx::assert_relative_eq;
    use ndarray::array;

    fn default_kernel() -> SerialInterval {
        SerialInterval::new(SerialIntervalParams::default()).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // The daily series has one entry per epicurve day and is non-negative.
    //
    // Given
    // -----
    // - e = [0, 0, 5, 5, 5, 5, 5].
    //
    // Expect
    // ------
    // - len(R) == 7, all entries finite and ≥ 0, and R is 0 on the last day
    //   (no later cases to infect).
    fn daily_r_matches_epicurve_length() {
        let e = array![0.0, 0.0, 5.0, 5.0, 5.0, 5.0, 5.0];
        let w = InfectivityWeights::new(e.view(), &default_kernel());
        let r = daily_r(e.view(), &w);
        assert_eq!(r.len(), e.len());
        assert!(r.iter().all(|v| v.is_finite() && *v >= 0.0));
        assert_eq!(r[6], 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Every case with at least one plausible infector is fully attributed,
    // so Σ_j R[j]·e[j] equals the number of attributable cases.
    //
    // Given
    // -----
    // - e = [2, 3, 0, 4, 1].
    //
    // Expect
    // ------
    // - Σ_j R[j] e[j] == Σ_{i : row i non-zero} e[i].
    fn daily_r_conserves_attributed_cases() {
        let e = array![2.0, 3.0, 0.0, 4.0, 1.0];
        let w = InfectivityWeights::new(e.view(), &default_kernel());
        let r = daily_r(e.view(), &w);

        let attributed: f64 = (0..e.len())
            .filter(|&i| w.matrix().row(i).iter().any(|&v| v != 0.0))
            .map(|i| e[i])
            .sum();
        let weighted_r: f64 = r.iter().zip(e.iter()).map(|(rj, ej)| rj * ej).sum();
        assert_relative_eq!(weighted_r, attributed, epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // A zero epicurve yields a zero daily series without NaNs.
    fn daily_r_zero_epicurve_is_zero() {
        let e = Array1::<f64>::zeros(4);
        let w = InfectivityWeights::new(e.view(), &default_kernel());
        let r = daily_r(e.view(), &w);
        assert_eq!(r, Array1::<f64>::zeros(4));
    }
}
