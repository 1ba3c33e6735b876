//! Keyframe tracks: the ordered keys of one animated attribute.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::query::RangeArg;
use crate::core::{SampleSequence, TimeSampling};
use crate::util::{Chrono, Error, KeyIndex, Result};

/// A single key: value at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: Chrono,
    pub value: f64,
}

impl Keyframe {
    /// Create a key, rejecting non-finite time or value.
    pub fn checked(time: Chrono, value: f64) -> Result<Self> {
        if !time.is_finite() {
            return Err(Error::InvalidKeyframe(format!("time {time} is not finite")));
        }
        if !value.is_finite() {
            return Err(Error::InvalidKeyframe(format!(
                "value {value} at time {time} is not finite"
            )));
        }
        Ok(Self { time, value })
    }
}

/// Keys of one attribute, strictly ascending by time.
///
/// Serializes as a plain array of keys; deserialization re-validates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct KeyframeTrack {
    keys: Vec<Keyframe>,
}

impl KeyframeTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from keys in any order. Duplicate times are an error.
    pub fn from_keys(mut keys: Vec<Keyframe>) -> Result<Self> {
        for key in &keys {
            Keyframe::checked(key.time, key.value)?;
        }
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        if let Some(pair) = keys.windows(2).find(|w| w[0].time == w[1].time) {
            return Err(Error::InvalidKeyframe(format!(
                "duplicate key at time {}",
                pair[0].time
            )));
        }
        Ok(Self { keys })
    }

    /// Lay out `count` keys along `sampling`, taking each value from `value_at`.
    pub fn from_sampling(
        sampling: &TimeSampling,
        count: usize,
        mut value_at: impl FnMut(Chrono) -> f64,
    ) -> Result<Self> {
        sampling.validate()?;
        tracing::trace!(uniform = sampling.is_uniform(), count, "laying out keys");
        let times = sampling.times(count);
        if times.len() < count {
            tracing::warn!(
                requested = count,
                available = sampling.num_stored_times(),
                "sampling has fewer stored times than requested keys"
            );
        }
        // steps below the float resolution at the start time collapse onto one time
        if let Some(pair) = times.windows(2).find(|w| w[0] >= w[1]) {
            return Err(Error::InvalidKeyframe(format!(
                "sampling yields time {} after {}; key times must be strictly ascending",
                pair[1], pair[0]
            )));
        }
        let keys = times
            .into_iter()
            .map(|t| Keyframe::checked(t, value_at(t)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { keys })
    }

    /// Insert a key, or replace the value of the key already at `time`.
    pub fn set_key(&mut self, time: Chrono, value: f64) -> Result<()> {
        let key = Keyframe::checked(time, value)?;
        self.insert(key);
        Ok(())
    }

    pub(crate) fn insert(&mut self, key: Keyframe) {
        match self.keys.binary_search_by(|k| k.time.total_cmp(&key.time)) {
            Ok(i) => self.keys[i].value = key.value,
            Err(i) => self.keys.insert(i, key),
        }
    }

    #[inline]
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Time-keyed sample sequence.
    pub fn times(&self) -> Vec<Chrono> {
        self.keys.iter().map(|k| k.time).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.keys.iter().map(|k| k.value).collect()
    }

    /// Index-keyed sample sequence: `0..len`.
    pub fn indices(&self) -> Vec<KeyIndex> {
        (0..self.keys.len()).collect()
    }

    /// Positions of the keys matched by `range`, in either keying mode.
    pub fn span(&self, range: &RangeArg) -> Result<Range<usize>> {
        match range {
            RangeArg::Time(spec) => {
                let bounds = spec.resolve()?;
                let times = self.times();
                Ok(SampleSequence::new(&times)?.span(&bounds))
            }
            RangeArg::Index(spec) => {
                let bounds = spec.resolve()?;
                let indices = self.indices();
                Ok(SampleSequence::new(&indices)?.span(&bounds))
            }
        }
    }

    /// Keys matched by `range`.
    pub fn select(&self, range: &RangeArg) -> Result<&[Keyframe]> {
        let span = self.span(range)?;
        Ok(&self.keys[span])
    }

    /// Remove the keys matched by `range`, returning how many were removed.
    pub fn cut(&mut self, range: &RangeArg) -> Result<usize> {
        let span = self.span(range)?;
        Ok(self.keys.drain(span).count())
    }
}

impl TryFrom<Vec<Keyframe>> for KeyframeTrack {
    type Error = Error;

    fn try_from(keys: Vec<Keyframe>) -> Result<Self> {
        Self::from_keys(keys)
    }
}

impl From<KeyframeTrack> for Vec<Keyframe> {
    fn from(track: KeyframeTrack) -> Self {
        track.keys
    }
}
