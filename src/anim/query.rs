//! Keyframe queries against a [`KeyframeStore`].
//!
//! A query names an attribute (or none, meaning every attribute), a range in
//! time-keyed or index-keyed mode, and what to report about the matched keys.
//!
//! ```
//! use keyrange::anim::{KeyframeQuery, KeyframeStore, QueryResult, RangeArg};
//! use keyrange::core::RangeSpec;
//!
//! let store = KeyframeStore::new();
//! for t in [1.0, 3.0, 5.0, 7.0, 9.0] {
//!     store.set_keyframe("cube.tx", t, t).unwrap();
//! }
//! let query = KeyframeQuery::new(RangeArg::Time(RangeSpec::text("4:9"))).attribute("cube.tx");
//! assert_eq!(query.run(&store).unwrap(), QueryResult::Count(3));
//! ```

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::Serialize;

use super::store::KeyframeStore;
use super::track::KeyframeTrack;
use crate::core::RangeSpec;
use crate::util::{Chrono, Error, KeyIndex, Result};

/// Which sample sequence a range is matched against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryMode {
    /// Key times.
    Time,
    /// Key ordinals, `0..len`.
    Index,
}

impl QueryMode {
    /// Long flag name.
    pub fn flag(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Index => "index",
        }
    }
}

impl FromStr for QueryMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "time" | "t" => Ok(Self::Time),
            "index" | "in" => Ok(Self::Index),
            other => Err(Error::UnknownQueryFlag(other.to_string())),
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

/// A raw range tagged with its keying mode.
#[derive(Clone, Debug, PartialEq)]
pub enum RangeArg {
    Time(RangeSpec<Chrono>),
    Index(RangeSpec<KeyIndex>),
}

impl RangeArg {
    /// Every key.
    pub fn all() -> Self {
        Self::Time(RangeSpec::pair(None, None))
    }

    /// Wrap textual input (`"a:b"` and friends) in the given mode.
    pub fn from_text(mode: QueryMode, text: &str) -> Self {
        match mode {
            QueryMode::Time => Self::Time(RangeSpec::text(text)),
            QueryMode::Index => Self::Index(RangeSpec::text(text)),
        }
    }

    pub fn mode(&self) -> QueryMode {
        match self {
            Self::Time(_) => QueryMode::Time,
            Self::Index(_) => QueryMode::Index,
        }
    }
}

impl fmt::Display for RangeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time(spec) => write!(f, "time={spec}"),
            Self::Index(spec) => write!(f, "index={spec}"),
        }
    }
}

/// What a query reports about the matched keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum QueryOutput {
    /// Number of keys (`keyframeCount` / `kc`).
    #[default]
    Count,
    /// Key times (`timeChange` / `tc`).
    Times,
    /// Key values (`valueChange` / `vc`).
    Values,
    /// Key ordinals (`indexValue` / `iv`).
    Indices,
}

impl FromStr for QueryOutput {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "keyframeCount" | "kc" => Ok(Self::Count),
            "timeChange" | "tc" => Ok(Self::Times),
            "valueChange" | "vc" => Ok(Self::Values),
            "indexValue" | "iv" => Ok(Self::Indices),
            other => Err(Error::UnknownQueryFlag(other.to_string())),
        }
    }
}

/// Answer to a [`KeyframeQuery`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    Count(usize),
    Times(Vec<Chrono>),
    Values(Vec<f64>),
    Indices(Vec<KeyIndex>),
}

impl QueryResult {
    fn empty(output: QueryOutput) -> Self {
        match output {
            QueryOutput::Count => Self::Count(0),
            QueryOutput::Times => Self::Times(Vec::new()),
            QueryOutput::Values => Self::Values(Vec::new()),
            QueryOutput::Indices => Self::Indices(Vec::new()),
        }
    }

    fn extend(&mut self, track: &KeyframeTrack, span: Range<usize>) {
        let keys = &track.keys()[span.clone()];
        match self {
            Self::Count(n) => *n += keys.len(),
            Self::Times(times) => times.extend(keys.iter().map(|k| k.time)),
            Self::Values(values) => values.extend(keys.iter().map(|k| k.value)),
            Self::Indices(indices) => indices.extend(span),
        }
    }

    /// Number of matched keys.
    pub fn len(&self) -> usize {
        match self {
            Self::Count(n) => *n,
            Self::Times(v) => v.len(),
            Self::Values(v) => v.len(),
            Self::Indices(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Counts print bare; lists print space-separated.
impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Times(v) => join(f, v),
            Self::Values(v) => join(f, v),
            Self::Indices(v) => join(f, v),
        }
    }
}

/// Keyframe query: attribute, range and output.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeQuery {
    /// `None` queries every attribute in name order.
    pub attribute: Option<String>,
    pub range: RangeArg,
    pub output: QueryOutput,
}

impl KeyframeQuery {
    pub fn new(range: RangeArg) -> Self {
        Self {
            attribute: None,
            range,
            output: QueryOutput::Count,
        }
    }

    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.attribute = Some(name.into());
        self
    }

    pub fn output(mut self, output: QueryOutput) -> Self {
        self.output = output;
        self
    }

    /// Run against a snapshot of `store`.
    ///
    /// Counts are summed and lists concatenated across attributes.
    #[tracing::instrument(skip_all, fields(attribute = ?self.attribute, range = %self.range))]
    pub fn run(&self, store: &KeyframeStore) -> Result<QueryResult> {
        let tracks = match &self.attribute {
            Some(name) => vec![(name.clone(), store.snapshot(name)?)],
            None => store.snapshots(),
        };

        let mut result = QueryResult::empty(self.output);
        for (name, track) in &tracks {
            let span = track.span(&self.range)?;
            tracing::trace!(attribute = %name, matched = span.len(), "keys matched");
            result.extend(track, span);
        }
        Ok(result)
    }
}
