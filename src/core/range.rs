//! Canonical inclusive ranges.

use std::fmt;
use std::ops::{RangeBounds, RangeFrom, RangeFull, RangeInclusive, RangeToInclusive};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bound::Bound;
use super::spec::RangeSpec;
use crate::util::{Error, SamplePosition};

/// Normalized `(lower, upper)` pair every range spec resolves to.
///
/// Both ends are inclusive when concrete. `lower > upper` is allowed and
/// simply matches nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CanonicalRange<T> {
    pub lower: Bound<T>,
    pub upper: Bound<T>,
}

impl<T> CanonicalRange<T> {
    pub const fn new(lower: Bound<T>, upper: Bound<T>) -> Self {
        Self { lower, upper }
    }

    /// `(Open, Open)`: every sample.
    pub const fn full() -> Self {
        Self::new(Bound::Open, Bound::Open)
    }

    /// `None` on either side means open.
    pub fn from_options(lower: Option<T>, upper: Option<T>) -> Self {
        Self::new(Bound::from(lower), Bound::from(upper))
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.lower.is_open() && self.upper.is_open()
    }
}

impl<T: Copy> CanonicalRange<T> {
    /// Degenerate `(v, v)` range.
    pub const fn point(value: T) -> Self {
        Self::new(Bound::Concrete(value), Bound::Concrete(value))
    }
}

impl<T: PartialOrd> CanonicalRange<T> {
    /// Inclusive membership test.
    #[inline]
    pub fn admits(&self, sample: &T) -> bool {
        let above = match &self.lower {
            Bound::Concrete(lo) => sample >= lo,
            Bound::Open => true,
        };
        let below = match &self.upper {
            Bound::Concrete(hi) => sample <= hi,
            Bound::Open => true,
        };
        above && below
    }

    /// Both ends concrete and equal.
    pub fn is_point(&self) -> bool {
        matches!((&self.lower, &self.upper), (Bound::Concrete(lo), Bound::Concrete(hi)) if lo == hi)
    }

    /// Both ends concrete with `lower > upper`.
    pub fn is_inverted(&self) -> bool {
        matches!((&self.lower, &self.upper), (Bound::Concrete(lo), Bound::Concrete(hi)) if lo > hi)
    }
}

impl<T> RangeBounds<T> for CanonicalRange<T> {
    fn start_bound(&self) -> std::ops::Bound<&T> {
        self.lower.as_std()
    }

    fn end_bound(&self) -> std::ops::Bound<&T> {
        self.upper.as_std()
    }
}

/// Renders in the colon form, so `(4, Open)` prints as `4:`.
impl<T: fmt::Display> fmt::Display for CanonicalRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lower, self.upper)
    }
}

impl<T: SamplePosition> FromStr for CanonicalRange<T> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RangeSpec::<T>::Text(s.to_string()).resolve()
    }
}

impl<T: Copy> From<RangeInclusive<T>> for CanonicalRange<T> {
    fn from(range: RangeInclusive<T>) -> Self {
        Self::new(Bound::Concrete(*range.start()), Bound::Concrete(*range.end()))
    }
}

impl<T> From<RangeFrom<T>> for CanonicalRange<T> {
    fn from(range: RangeFrom<T>) -> Self {
        Self::new(Bound::Concrete(range.start), Bound::Open)
    }
}

impl<T> From<RangeToInclusive<T>> for CanonicalRange<T> {
    fn from(range: RangeToInclusive<T>) -> Self {
        Self::new(Bound::Open, Bound::Concrete(range.end))
    }
}

impl<T> From<RangeFull> for CanonicalRange<T> {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}
