//! Keyframe host layer.
//!
//! A small in-memory stand-in for the animation engine that owns keyframes:
//! - [`KeyframeTrack`] - Ordered keys of one attribute
//! - [`KeyframeStore`] - Attribute map with copy-on-write snapshots
//! - [`KeyframeQuery`] - Count/select keys by time or index range

mod track;
mod store;
mod query;

pub use track::{Keyframe, KeyframeTrack};
pub use store::KeyframeStore;
pub use query::{KeyframeQuery, QueryMode, QueryOutput, QueryResult, RangeArg};
