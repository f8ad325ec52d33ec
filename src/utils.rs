#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray2;

#[cfg(feature = "python-bindings")]
use crate::reproduction::{
    CaseTable, DateAlignment, ISO_DATE_FORMAT, RtOptions, parse_column_dates, parse_iso_date,
};

/// Accept a 2-D `numpy.ndarray`, a `pandas.DataFrame`, or a sequence of
/// float sequences and return its rows.
#[cfg(feature = "python-bindings")]
pub fn extract_case_rows<'py>(raw_counts: &Bound<'py, PyAny>) -> PyResult<Vec<Vec<f64>>> {
    if let Ok(arr_ro) = raw_counts.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro.as_array().outer_iter().map(|row| row.to_vec()).collect());
    }

    if let Ok(obj) = raw_counts.call_method("to_numpy", (), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro.as_array().outer_iter().map(|row| row.to_vec()).collect());
        }
    }

    raw_counts.extract::<Vec<Vec<f64>>>().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 2-D numpy.ndarray, pandas.DataFrame, or sequence of float64 sequences",
        )
    })
}

/// Build a validated [`CaseTable`] from Python-side labels and counts.
#[cfg(feature = "python-bindings")]
pub fn extract_case_table<'py>(
    regions: Vec<String>, dates: Vec<String>, raw_counts: &Bound<'py, PyAny>,
) -> PyResult<CaseTable> {
    let rows = extract_case_rows(raw_counts)?;
    let dates = parse_column_dates(&dates, ISO_DATE_FORMAT)?;
    Ok(CaseTable::from_rows(regions, dates, rows)?)
}

#[cfg(feature = "python-bindings")]
pub fn extract_rt_options(
    window_size: Option<usize>, alignment: Option<&str>, serial_interval: Option<(f64, f64)>,
) -> PyResult<RtOptions> {
    let alignment = match alignment {
        Some(name) => Some(name.parse::<DateAlignment>()?),
        None => None,
    };
    RtOptions::new(window_size, serial_interval, alignment).map_err(PyErr::from)
}

/// Parse a single date argument (`YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`).
#[cfg(feature = "python-bindings")]
pub fn extract_date(raw: &str) -> PyResult<chrono::NaiveDate> {
    Ok(parse_iso_date(raw)?)
}
