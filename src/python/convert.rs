//! Conversion of native Python range values into [`RangeSpec`].
//!
//! Accepted: `int`/`float`, `str`, `tuple`, `list`, and `slice` without a
//! step. `None` inside a tuple, list or slice is an open bound.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyList, PySlice, PyString, PyTuple};

use crate::anim::{QueryMode, RangeArg};
use crate::core::RangeSpec;
use crate::util::{Chrono, Error, KeyIndex, SamplePosition};

impl From<Error> for PyErr {
    fn from(err: Error) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

pub(crate) fn time_position(obj: &Bound<'_, PyAny>) -> PyResult<Chrono> {
    obj.extract::<f64>()
}

pub(crate) fn index_position(obj: &Bound<'_, PyAny>) -> PyResult<KeyIndex> {
    obj.extract::<usize>()
}

/// Build a spec from any supported Python encoding.
pub(crate) fn extract_spec<T: SamplePosition>(
    obj: &Bound<'_, PyAny>,
    position: fn(&Bound<'_, PyAny>) -> PyResult<T>,
) -> PyResult<RangeSpec<T>> {
    let bound = |item: &Bound<'_, PyAny>| -> PyResult<Option<T>> {
        if item.is_none() {
            Ok(None)
        } else {
            position(item).map(Some)
        }
    };

    if obj.is_instance_of::<PyString>() {
        return Ok(RangeSpec::Text(obj.extract::<String>()?));
    }
    if obj.is_instance_of::<PySlice>() {
        if !obj.getattr("step")?.is_none() {
            return Err(PyValueError::new_err("range slices do not support a step"));
        }
        let start = bound(&obj.getattr("start")?)?;
        let stop = bound(&obj.getattr("stop")?)?;
        return Ok(RangeSpec::Slice { start, stop });
    }
    if obj.is_instance_of::<PyTuple>() || obj.is_instance_of::<PyList>() {
        let mut items = Vec::new();
        for item in obj.try_iter()? {
            items.push(bound(&item?)?);
        }
        return Ok(RangeSpec::Sequence(items));
    }
    if obj.is_none() {
        return Err(PyValueError::new_err("range must not be None; use (None, None) for all keys"));
    }
    position(obj).map(RangeSpec::Scalar)
}

/// Extract a range in the given keying mode.
pub(crate) fn extract_range_arg(obj: &Bound<'_, PyAny>, mode: QueryMode) -> PyResult<RangeArg> {
    Ok(match mode {
        QueryMode::Time => RangeArg::Time(extract_spec(obj, time_position)?),
        QueryMode::Index => RangeArg::Index(extract_spec(obj, index_position)?),
    })
}
