//! Utility types for keyrange.
//!
//! - [`SamplePosition`] - Orderable keyframe positions ([`Chrono`], [`KeyIndex`])
//! - [`Error`] / [`Result`] - Error handling

mod error;
mod position;

pub use error::*;
pub use position::*;
