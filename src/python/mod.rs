//! Python bindings for keyrange.
//!
//! Range arguments take the native Python forms directly: `9`, `(4, None)`,
//! `[2, 8]`, `"4:9"`, `slice(4)`, `slice(4, None)`.

use pyo3::prelude::*;

mod convert;
mod store;

pub use store::PyKeyframeStore;

use crate::anim::{QueryMode, RangeArg};
use crate::core::{count_in_range as count_impl, select_in_range as select_impl};
use convert::{extract_range_arg, index_position, time_position};

fn mode_arg(mode: &str) -> PyResult<QueryMode> {
    Ok(mode.parse::<QueryMode>()?)
}

/// Resolve a range to `(lower, upper)`, with `None` for an open end.
#[pyfunction]
#[pyo3(signature = (spec, mode="time"))]
fn parse_range(py: Python<'_>, spec: &Bound<'_, PyAny>, mode: &str) -> PyResult<Py<PyAny>> {
    let obj = match extract_range_arg(spec, mode_arg(mode)?)? {
        RangeArg::Time(spec) => {
            let range = spec.resolve()?;
            (range.lower.as_option(), range.upper.as_option())
                .into_pyobject(py)?
                .into_any()
                .unbind()
        }
        RangeArg::Index(spec) => {
            let range = spec.resolve()?;
            (range.lower.as_option(), range.upper.as_option())
                .into_pyobject(py)?
                .into_any()
                .unbind()
        }
    };
    Ok(obj)
}

/// Count the samples inside a range.
#[pyfunction]
#[pyo3(signature = (samples, spec, mode="time"))]
fn count_in_range(samples: &Bound<'_, PyAny>, spec: &Bound<'_, PyAny>, mode: &str) -> PyResult<usize> {
    match extract_range_arg(spec, mode_arg(mode)?)? {
        RangeArg::Time(spec) => {
            let samples = extract_samples(samples, time_position)?;
            Ok(count_impl(&samples, &spec.resolve()?)?)
        }
        RangeArg::Index(spec) => {
            let samples = extract_samples(samples, index_position)?;
            Ok(count_impl(&samples, &spec.resolve()?)?)
        }
    }
}

/// The samples inside a range, ascending.
#[pyfunction]
#[pyo3(signature = (samples, spec, mode="time"))]
fn select_in_range(
    py: Python<'_>,
    samples: &Bound<'_, PyAny>,
    spec: &Bound<'_, PyAny>,
    mode: &str,
) -> PyResult<Py<PyAny>> {
    let obj = match extract_range_arg(spec, mode_arg(mode)?)? {
        RangeArg::Time(spec) => {
            let samples = extract_samples(samples, time_position)?;
            select_impl(&samples, &spec.resolve()?)?
                .to_vec()
                .into_pyobject(py)?
                .into_any()
                .unbind()
        }
        RangeArg::Index(spec) => {
            let samples = extract_samples(samples, index_position)?;
            select_impl(&samples, &spec.resolve()?)?
                .to_vec()
                .into_pyobject(py)?
                .into_any()
                .unbind()
        }
    };
    Ok(obj)
}

fn extract_samples<T>(
    samples: &Bound<'_, PyAny>,
    position: fn(&Bound<'_, PyAny>) -> PyResult<T>,
) -> PyResult<Vec<T>> {
    let mut out = Vec::new();
    for item in samples.try_iter()? {
        out.push(position(&item?)?);
    }
    Ok(out)
}

/// keyrange Python module.
#[pymodule]
fn keyrange(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(parse_range, m)?)?;
    m.add_function(wrap_pyfunction!(count_in_range, m)?)?;
    m.add_function(wrap_pyfunction!(select_in_range, m)?)?;
    m.add_class::<PyKeyframeStore>()?;
    Ok(())
}
