//! Python bindings for KeyframeStore.

#![allow(non_snake_case)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use super::convert::extract_range_arg;
use crate::anim::{KeyframeQuery, KeyframeStore, QueryMode, QueryOutput, QueryResult, RangeArg};

/// Python wrapper for KeyframeStore.
#[pyclass(name = "KeyframeStore")]
#[derive(Default)]
pub struct PyKeyframeStore {
    pub(crate) inner: KeyframeStore,
}

#[pymethods]
impl PyKeyframeStore {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    /// Load a JSON keyframe file.
    #[staticmethod]
    fn load(path: &str) -> PyResult<Self> {
        Ok(Self {
            inner: KeyframeStore::load(path)?,
        })
    }

    /// Set (or replace) a key on an attribute.
    fn setKeyframe(&self, attribute: &str, time: f64, value: f64) -> PyResult<()> {
        Ok(self.inner.set_keyframe(attribute, time, value)?)
    }

    /// Animated attribute names.
    fn attributes(&self) -> Vec<String> {
        self.inner.attributes()
    }

    /// Query keys by time or index range.
    ///
    /// Args:
    ///     attribute: Attribute to query, or None for all attributes
    ///     time: Time range (scalar, tuple, list, "a:b" string or slice)
    ///     index: Index range, same encodings as `time`
    ///     output: keyframeCount | timeChange | valueChange | indexValue
    #[pyo3(signature = (attribute=None, time=None, index=None, output="keyframeCount"))]
    fn keyframe(
        &self,
        py: Python<'_>,
        attribute: Option<String>,
        time: Option<&Bound<'_, PyAny>>,
        index: Option<&Bound<'_, PyAny>>,
        output: &str,
    ) -> PyResult<Py<PyAny>> {
        let range = match (time, index) {
            (Some(_), Some(_)) => {
                return Err(PyValueError::new_err("pass either time or index, not both"))
            }
            (Some(spec), None) => extract_range_arg(spec, QueryMode::Time)?,
            (None, Some(spec)) => extract_range_arg(spec, QueryMode::Index)?,
            (None, None) => RangeArg::all(),
        };
        let output: QueryOutput = output.parse()?;
        let query = KeyframeQuery {
            attribute,
            range,
            output,
        };
        let result = query.run(&self.inner)?;
        let obj = match result {
            QueryResult::Count(n) => n.into_pyobject(py)?.into_any().unbind(),
            QueryResult::Times(v) | QueryResult::Values(v) => v.into_pyobject(py)?.into_any().unbind(),
            QueryResult::Indices(v) => v.into_pyobject(py)?.into_any().unbind(),
        };
        Ok(obj)
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!("<KeyframeStore {} attributes>", self.inner.len())
    }
}
