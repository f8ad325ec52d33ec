//! Daily incidence (epicurve) from cumulative case counts.
//!
//! `epicurve(c)[t] = max(0, c[t + 1] − c[t])` for `t = 0, …, T − 2`.
//!
//! Upstream cumulative series are occasionally revised downward. True daily
//! counts cannot be negative, so a negative difference is floored to zero on
//! that day only; it is never carried into neighbouring days. Series shorter
//! than two observations yield an empty epicurve rather than an error.
use ndarray::{Array1, ArrayView1};

/// Clamped first difference of a cumulative series.
///
/// Returns an array of length `max(T − 1, 0)` whose entries are all `≥ 0`.
pub fn epicurve(cumulative: ArrayView1<'_, f64>) -> Array1<f64> {
    let n = cumulative.len();
    if n < 2 {
        return Array1::zeros(0);
    }
    Array1::from_shape_fn(n - 1, |t| (cumulative[t + 1] - cumulative[t]).max(0.0))
}

/// Index of the first day with positive incidence, if any.
pub fn first_positive(epicurve: ArrayView1<'_, f64>) -> Option<usize> {
    epicurve.iter().position(|&cases| cases > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Differences of a monotone series are passed through unchanged.
    //
    // Given
    // -----
    // - c = [0, 1, 3, 6, 10].
    //
    // Expect
    // ------
    // - e = [1, 2, 3, 4] with length T − 1.
    fn epicurve_differences_monotone_series() {
        let c = array![0.0, 1.0, 3.0, 6.0, 10.0];
        let e = epicurve(c.view());
        assert_eq!(e, array![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(e.len(), c.len() - 1);
    }

    #[test]
    // Purpose
    // -------
    // Downward revisions are clamped to zero on the affected day only.
    //
    // Given
    // -----
    // - c = [10, 15, 12, 20, 20] (a drop of 3 between days 1 and 2).
    //
    // Expect
    // ------
    // - e = [5, 0, 8, 0]; the rebound day keeps its full raw difference.
    fn epicurve_clamps_downward_corrections() {
        let c = array![10.0, 15.0, 12.0, 20.0, 20.0];
        let e = epicurve(c.view());
        assert_eq!(e, array![5.0, 0.0, 8.0, 0.0]);
        assert!(e.iter().all(|&v| v >= 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Degenerate inputs produce an empty epicurve instead of failing.
    //
    // Given
    // -----
    // - Cumulative series of length 0 and 1.
    //
    // Expect
    // ------
    // - Empty arrays.
    fn epicurve_short_series_is_empty() {
        assert!(epicurve(Array1::<f64>::zeros(0).view()).is_empty());
        assert!(epicurve(array![42.0].view()).is_empty());
    }

    #[test]
    // Purpose
    // -------
    // `first_positive` locates the first day with cases.
    //
    // Given
    // -----
    // - [0, 0, 5, 0] and an all-zero curve.
    //
    // Expect
    // ------
    // - `Some(2)` and `None`.
    fn first_positive_finds_first_case_day() {
        assert_eq!(first_positive(array![0.0, 0.0, 5.0, 0.0].view()), Some(2));
        assert_eq!(first_positive(array![0.0, 0.0, 0.0].view()), None);
    }
}
