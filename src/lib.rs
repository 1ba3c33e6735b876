//! # keyrange
//!
//! Resolve keyframe range specifications and count the samples inside them.
//!
//! Callers describe a range in whichever form is handy - a single position,
//! a `(lower, upper)` pair with `None` for an open end, a `"lower:upper"`
//! string, or a slice-like start/stop - and every form resolves to the same
//! [`CanonicalRange`](core::CanonicalRange). The query engine then counts or
//! selects the positions of an ascending sample sequence (keyframe times or
//! keyframe indices) that fall inside it, inclusive at both ends.
//!
//! ## Modules
//!
//! - [`util`] - Sample positions, errors
//! - [`core`] - Range specs, canonical ranges, the query engine, time sampling
//! - [`anim`] - Keyframe tracks, store and `keyframe`-style queries
//!
//! ## Example
//!
//! ```
//! use keyrange::core::{count_in_range, RangeSpec};
//!
//! let times = [1.0, 3.0, 5.0, 7.0, 9.0, 11.0, 13.0, 15.0, 17.0, 19.0];
//!
//! let range = RangeSpec::text("4:9").resolve()?;
//! assert_eq!(count_in_range(&times, &range)?, 3);
//!
//! let range = RangeSpec::slice(Some(4.0), None).resolve()?;
//! assert_eq!(count_in_range(&times, &range)?, 8);
//! # Ok::<(), keyrange::Error>(())
//! ```

pub mod util;
pub mod core;
pub mod anim;

// Python bindings (optional, enabled with "python" feature)
#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use util::{Chrono, Error, KeyIndex, Result, SamplePosition};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Chrono, Error, KeyIndex, Result, SamplePosition};
    pub use crate::core::{
        count_in_range, parse, select_in_range, Bound, CanonicalRange, RangeSpec, SampleSequence,
        TimeSampling,
    };
    pub use crate::anim::{
        KeyframeQuery, KeyframeStore, KeyframeTrack, QueryMode, QueryOutput, QueryResult, RangeArg,
    };
}
