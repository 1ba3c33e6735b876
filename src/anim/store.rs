//! In-memory keyframe store.
//!
//! Tracks live behind a `parking_lot::RwLock` as `Arc<KeyframeTrack>` and are
//! mutated copy-on-write, so a snapshot handed to a query never changes under
//! it while writers keep working.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use super::query::RangeArg;
use super::track::{Keyframe, KeyframeTrack};
use crate::util::{Chrono, Error, Result};

/// Attribute name -> keyframe track.
#[derive(Debug, Default)]
pub struct KeyframeStore {
    tracks: RwLock<BTreeMap<String, Arc<KeyframeTrack>>>,
}

impl KeyframeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON keyframe format: `{ "attr": [{"time": t, "value": v}, ...] }`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let tracks: BTreeMap<String, KeyframeTrack> = serde_json::from_str(json)?;
        let tracks = tracks
            .into_iter()
            .filter(|(_, track)| !track.is_empty())
            .map(|(name, track)| (name, Arc::new(track)))
            .collect();
        Ok(Self {
            tracks: RwLock::new(tracks),
        })
    }

    /// Load a JSON keyframe file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), attributes = store.len(), "loaded keyframes");
        Ok(store)
    }

    pub fn to_json_string(&self) -> Result<String> {
        let tracks = self.tracks.read();
        let plain: BTreeMap<&str, &KeyframeTrack> = tracks
            .iter()
            .map(|(name, track)| (name.as_str(), track.as_ref()))
            .collect();
        Ok(serde_json::to_string_pretty(&plain)?)
    }

    /// Set a key on `attribute`, creating the track if needed.
    pub fn set_keyframe(&self, attribute: &str, time: Chrono, value: f64) -> Result<()> {
        let key = Keyframe::checked(time, value)?;
        let mut tracks = self.tracks.write();
        let track = tracks.entry(attribute.to_string()).or_default();
        Arc::make_mut(track).insert(key);
        Ok(())
    }

    /// Replace the whole track of `attribute`. An empty track removes it.
    pub fn insert_track(&self, attribute: &str, track: KeyframeTrack) {
        let mut tracks = self.tracks.write();
        if track.is_empty() {
            tracks.remove(attribute);
        } else {
            tracks.insert(attribute.to_string(), Arc::new(track));
        }
    }

    /// Immutable snapshot of one attribute's keys.
    pub fn snapshot(&self, attribute: &str) -> Result<Arc<KeyframeTrack>> {
        self.tracks
            .read()
            .get(attribute)
            .cloned()
            .ok_or_else(|| Error::AttributeNotFound(attribute.to_string()))
    }

    /// Snapshots of every attribute, in name order, taken under one lock.
    pub fn snapshots(&self) -> Vec<(String, Arc<KeyframeTrack>)> {
        self.tracks
            .read()
            .iter()
            .map(|(name, track)| (name.clone(), Arc::clone(track)))
            .collect()
    }

    /// Animated attribute names, sorted.
    pub fn attributes(&self) -> Vec<String> {
        self.tracks.read().keys().cloned().collect()
    }

    /// Drop every key of `attribute`. Returns whether it existed.
    pub fn remove_attribute(&self, attribute: &str) -> bool {
        self.tracks.write().remove(attribute).is_some()
    }

    /// Remove the keys of `attribute` matched by `range`.
    ///
    /// An attribute left without keys is removed from the store.
    pub fn cut_keys(&self, attribute: &str, range: &RangeArg) -> Result<usize> {
        let mut tracks = self.tracks.write();
        let track = tracks
            .get_mut(attribute)
            .ok_or_else(|| Error::AttributeNotFound(attribute.to_string()))?;
        let removed = Arc::make_mut(track).cut(range)?;
        if track.is_empty() {
            tracks.remove(attribute);
        }
        tracing::debug!(attribute, removed, "cut keys");
        Ok(removed)
    }

    /// Number of animated attributes.
    pub fn len(&self) -> usize {
        self.tracks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.read().is_empty()
    }
}
