//! Range endpoints.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One end of a range: a concrete position or no limit at all.
///
/// Serializes as the bare value, or `null` when open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Bound<T> {
    /// Inclusive limit at this position.
    Concrete(T),
    /// Unbounded in this direction.
    #[default]
    Open,
}

impl<T> Bound<T> {
    /// `None` maps to [`Bound::Open`].
    #[inline]
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Concrete(v),
            None => Self::Open,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    #[inline]
    pub fn is_concrete(&self) -> bool {
        matches!(self, Self::Concrete(_))
    }

    /// Borrow the concrete value, if any.
    #[inline]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Concrete(v) => Some(v),
            Self::Open => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Bound<U> {
        match self {
            Self::Concrete(v) => Bound::Concrete(f(v)),
            Self::Open => Bound::Open,
        }
    }

    /// View as a standard library bound (concrete ends are inclusive).
    #[inline]
    pub fn as_std(&self) -> std::ops::Bound<&T> {
        match self {
            Self::Concrete(v) => std::ops::Bound::Included(v),
            Self::Open => std::ops::Bound::Unbounded,
        }
    }
}

impl<T: Copy> Bound<T> {
    #[inline]
    pub fn as_option(&self) -> Option<T> {
        self.value().copied()
    }
}

impl<T> From<Option<T>> for Bound<T> {
    fn from(value: Option<T>) -> Self {
        Self::from_option(value)
    }
}

impl<T> From<Bound<T>> for Option<T> {
    fn from(bound: Bound<T>) -> Self {
        match bound {
            Bound::Concrete(v) => Some(v),
            Bound::Open => None,
        }
    }
}

/// Open bounds render as the empty string, matching the `"a:b"` text form.
impl<T: fmt::Display> fmt::Display for Bound<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(v) => write!(f, "{v}"),
            Self::Open => Ok(()),
        }
    }
}

impl<T: Serialize> Serialize for Bound<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Concrete(v) => serializer.serialize_some(v),
            Self::Open => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Bound<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from_option)
    }
}
