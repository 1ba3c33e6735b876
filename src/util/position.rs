//! Sample position types.
//!
//! A sample position identifies one keyframe, either by its time on the
//! timeline ([`Chrono`]) or by its ordinal within an attribute's key list
//! ([`KeyIndex`]).

use std::fmt::{Debug, Display};

/// Chrono type - time value (seconds or frames, as the host defines).
pub type Chrono = f64;

/// Ordinal of a keyframe within one attribute's key list (0-based).
pub type KeyIndex = usize;

/// An orderable scalar that can bound a range and be counted against one.
pub trait SamplePosition: Copy + PartialOrd + Debug + Display + Send + Sync + 'static {
    /// Short name used in messages ("time", "index").
    const KIND: &'static str;

    /// Parse a single bound token. Surrounding whitespace is ignored.
    fn parse_token(token: &str) -> Option<Self>;

    /// Whether this value can take part in ordering comparisons.
    fn is_valid(&self) -> bool {
        true
    }
}

impl SamplePosition for Chrono {
    const KIND: &'static str = "time";

    fn parse_token(token: &str) -> Option<Self> {
        token.trim().parse::<f64>().ok().filter(|t| t.is_finite())
    }

    #[inline]
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl SamplePosition for KeyIndex {
    const KIND: &'static str = "index";

    fn parse_token(token: &str) -> Option<Self> {
        token.trim().parse::<usize>().ok()
    }
}
