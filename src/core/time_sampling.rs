//! Time sampling: where a track's keyframes sit on the timeline.
//!
//! A [`TimeSampling`] generates the time-keyed sample sequence for a given
//! number of keys. Uniform sampling places key `i` at
//! `start_time + i * time_per_cycle`; acyclic sampling lists every time.

use crate::util::{Chrono, Error, Result};

/// Type of time sampling.
#[derive(Clone, Debug, PartialEq)]
pub enum TimeSamplingType {
    /// Samples at regular intervals.
    Uniform {
        time_per_cycle: Chrono,
        start_time: Chrono,
    },

    /// Explicit time for each sample.
    Acyclic {
        times: Vec<Chrono>,
    },
}

/// Time sampling information for a track.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSampling {
    pub sampling_type: TimeSamplingType,
}

impl TimeSampling {
    /// Create uniform time sampling.
    pub fn uniform(time_per_cycle: Chrono, start_time: Chrono) -> Self {
        Self {
            sampling_type: TimeSamplingType::Uniform {
                time_per_cycle,
                start_time,
            },
        }
    }

    /// Create acyclic time sampling from explicit times.
    pub fn acyclic(times: Vec<Chrono>) -> Self {
        Self {
            sampling_type: TimeSamplingType::Acyclic { times },
        }
    }

    #[inline]
    pub fn is_uniform(&self) -> bool {
        matches!(self.sampling_type, TimeSamplingType::Uniform { .. })
    }

    /// Check that the sampling yields finite, strictly ascending times.
    pub fn validate(&self) -> Result<()> {
        match &self.sampling_type {
            TimeSamplingType::Uniform { time_per_cycle, start_time } => {
                if !start_time.is_finite() {
                    return Err(Error::other(format!("start time {start_time} is not finite")));
                }
                if !time_per_cycle.is_finite() || *time_per_cycle <= 0.0 {
                    return Err(Error::other(format!(
                        "time per cycle must be finite and > 0, got {time_per_cycle}"
                    )));
                }
                Ok(())
            }
            TimeSamplingType::Acyclic { times } => {
                crate::core::SampleSequence::new(times.as_slice()).map(|_| ())
            }
        }
    }

    /// Time of sample `index`. Acyclic sampling past its last stored time
    /// returns `None`.
    pub fn sample_time(&self, index: usize) -> Option<Chrono> {
        match &self.sampling_type {
            TimeSamplingType::Uniform { time_per_cycle, start_time } => {
                Some(*start_time + (index as Chrono) * *time_per_cycle)
            }
            TimeSamplingType::Acyclic { times } => times.get(index).copied(),
        }
    }

    /// The first `num_samples` times. Acyclic sampling yields at most its
    /// stored times.
    pub fn times(&self, num_samples: usize) -> Vec<Chrono> {
        (0..num_samples).map_while(|i| self.sample_time(i)).collect()
    }

    /// Number of stored times (0 for uniform).
    pub fn num_stored_times(&self) -> usize {
        match &self.sampling_type {
            TimeSamplingType::Uniform { .. } => 0,
            TimeSamplingType::Acyclic { times } => times.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sampling() {
        let ts = TimeSampling::uniform(2.0, 1.0);
        assert_eq!(ts.sample_time(0), Some(1.0));
        assert_eq!(ts.sample_time(9), Some(19.0));
        assert_eq!(
            ts.times(10),
            vec![1.0, 3.0, 5.0, 7.0, 9.0, 11.0, 13.0, 15.0, 17.0, 19.0]
        );
        assert!(ts.validate().is_ok());
    }

    #[test]
    fn test_fractional_uniform() {
        let ts = TimeSampling::uniform(1.0 / 24.0, 0.0);
        assert!((ts.sample_time(24).unwrap() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_acyclic_sampling() {
        let ts = TimeSampling::acyclic(vec![0.0, 0.5, 1.0, 2.0]);
        assert_eq!(ts.sample_time(3), Some(2.0));
        assert_eq!(ts.sample_time(4), None);
        assert_eq!(ts.times(10).len(), 4);
        assert_eq!(ts.num_stored_times(), 4);
    }

    #[test]
    fn test_validate_rejects_bad_layouts() {
        assert!(TimeSampling::uniform(0.0, 1.0).validate().is_err());
        assert!(TimeSampling::uniform(-1.0, 1.0).validate().is_err());
        assert!(TimeSampling::uniform(1.0, f64::NAN).validate().is_err());
        assert!(TimeSampling::acyclic(vec![0.0, 0.0]).validate().is_err());
    }
}
