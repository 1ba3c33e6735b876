//! Range query engine: count or select the samples inside a canonical range.
//!
//! Sample sequences are strictly ascending, so the matches of any inclusive
//! range form one contiguous run. Both ends of that run are found by binary
//! search; counting never materializes the selection.

use std::ops::Range;

use rayon::prelude::*;

use super::bound::Bound;
use super::range::CanonicalRange;
use super::spec::RangeSpec;
use crate::util::{Error, Result, SamplePosition};

/// A validated, borrowed view over strictly ascending sample positions.
#[derive(Clone, Copy, Debug)]
pub struct SampleSequence<'a, T> {
    samples: &'a [T],
}

impl<'a, T: SamplePosition> SampleSequence<'a, T> {
    /// Wrap `samples`, checking that every position is valid and that the
    /// sequence is strictly ascending (no duplicates).
    pub fn new(samples: &'a [T]) -> Result<Self> {
        if let Some(index) = samples.iter().position(|s| !s.is_valid()) {
            tracing::debug!(index, "rejecting sample sequence: invalid position");
            return Err(Error::invalid_sequence(
                index,
                format!("{} is not a valid {}", samples[index], T::KIND),
            ));
        }
        if let Some(index) = samples.windows(2).position(|w| w[0] >= w[1]) {
            tracing::debug!(index = index + 1, "rejecting sample sequence: not ascending");
            return Err(Error::invalid_sequence(
                index + 1,
                format!(
                    "{} follows {}; positions must be strictly ascending",
                    samples[index + 1],
                    samples[index]
                ),
            ));
        }
        Ok(Self { samples })
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Positions (within the sequence) of the samples matched by `range`.
    ///
    /// An inverted range yields an empty span rather than an error.
    pub fn span(&self, range: &CanonicalRange<T>) -> Range<usize> {
        let start = match range.lower {
            Bound::Concrete(lo) => self.samples.partition_point(|s| *s < lo),
            Bound::Open => 0,
        };
        let end = match range.upper {
            Bound::Concrete(hi) => self.samples.partition_point(|s| *s <= hi),
            Bound::Open => self.samples.len(),
        };
        start..end.max(start)
    }

    pub fn count(&self, range: &CanonicalRange<T>) -> usize {
        let count = self.span(range).len();
        tracing::trace!(kind = T::KIND, %range, count, "range query");
        count
    }

    /// Matching samples, in ascending order.
    pub fn select(&self, range: &CanonicalRange<T>) -> &'a [T] {
        &self.samples[self.span(range)]
    }

    /// Count several ranges against this one snapshot in parallel.
    pub fn count_batch(&self, ranges: &[CanonicalRange<T>]) -> Vec<usize> {
        ranges.par_iter().map(|range| self.count(range)).collect()
    }
}

/// Number of samples inside `range`.
pub fn count_in_range<T: SamplePosition>(samples: &[T], range: &CanonicalRange<T>) -> Result<usize> {
    Ok(SampleSequence::new(samples)?.count(range))
}

/// The samples inside `range`, as a subslice of `samples`.
pub fn select_in_range<'a, T: SamplePosition>(
    samples: &'a [T],
    range: &CanonicalRange<T>,
) -> Result<&'a [T]> {
    Ok(SampleSequence::new(samples)?.select(range))
}

/// Resolve `spec` and count the samples inside it.
pub fn count_spec<T: SamplePosition>(samples: &[T], spec: &RangeSpec<T>) -> Result<usize> {
    let range = spec.resolve()?;
    count_in_range(samples, &range)
}

/// Count many ranges against one sequence, validating it once.
pub fn count_batch<T: SamplePosition>(samples: &[T], ranges: &[CanonicalRange<T>]) -> Result<Vec<usize>> {
    Ok(SampleSequence::new(samples)?.count_batch(ranges))
}
