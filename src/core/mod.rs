//! Core layer - range specifications and the range query engine.
//!
//! This module provides:
//! - [`Bound`] / [`CanonicalRange`] - Normalized inclusive ranges with open ends
//! - [`RangeSpec`] - Caller-facing range encodings and their resolution
//! - [`SampleSequence`] - Counting and selecting samples inside a range
//! - [`TimeSampling`] - Laying out keyframe times

mod bound;
mod range;
mod spec;
mod query;
mod time_sampling;

pub use bound::Bound;
pub use range::CanonicalRange;
pub use spec::{parse, RangeSpec};
pub use query::{count_batch, count_in_range, count_spec, select_in_range, SampleSequence};
pub use time_sampling::{TimeSampling, TimeSamplingType};
