//! Range specification inputs and their resolution to canonical bounds.
//!
//! Callers can describe the same logical range in several ways:
//!
//! | Encoding            | Example               | Canonical     |
//! |---------------------|-----------------------|---------------|
//! | scalar              | `9`                   | `(9, 9)`      |
//! | sequence (1 or 2)   | `(4, None)`, `[9]`    | `(4, Open)`, `(9, 9)` |
//! | text                | `"4:9"`, `":4"`, `":"`| `(4, 9)`, `(Open, 4)`, `(Open, Open)` |
//! | slice               | `slice(4)`, `slice(4, None)` | `(Open, 4)`, `(4, Open)` |
//!
//! [`RangeSpec::resolve`] maps every encoding onto a [`CanonicalRange`];
//! the query engine only ever sees the canonical form.

use std::fmt;

use super::bound::Bound;
use super::range::CanonicalRange;
use crate::util::{Error, Result, SamplePosition};

/// A range as supplied by a caller, before normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum RangeSpec<T> {
    /// Single position; resolves to the degenerate `(v, v)`.
    Scalar(T),
    /// Tuple or list form. Two elements give `(lower, upper)`; a single
    /// element is an alias of the scalar form. `None` is open.
    Sequence(Vec<Option<T>>),
    /// Colon form `"a:b"`; either side may be empty. No colon is a scalar.
    Text(String),
    /// Slice-like start/stop pair.
    Slice { start: Option<T>, stop: Option<T> },
}

impl<T> RangeSpec<T> {
    pub fn scalar(value: T) -> Self {
        Self::Scalar(value)
    }

    /// Two-element sequence.
    pub fn pair(lower: Option<T>, upper: Option<T>) -> Self {
        Self::Sequence(vec![lower, upper])
    }

    /// One-element sequence, `(v,)`.
    pub fn single(value: Option<T>) -> Self {
        Self::Sequence(vec![value])
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn slice(start: Option<T>, stop: Option<T>) -> Self {
        Self::Slice { start, stop }
    }

    /// Single-argument slice: only the stop is given, the start is open.
    pub fn slice_to(stop: Option<T>) -> Self {
        Self::Slice { start: None, stop }
    }
}

impl<T: SamplePosition> RangeSpec<T> {
    /// Normalize into canonical bounds.
    ///
    /// Fails with [`Error::InvalidRangeSpec`] on a malformed string, a
    /// sequence that is neither one nor two elements long, or a concrete
    /// value that is not a valid position (a non-finite time).
    pub fn resolve(&self) -> Result<CanonicalRange<T>> {
        let range = match self {
            Self::Scalar(value) => CanonicalRange::point(*value),
            Self::Sequence(items) => match items.as_slice() {
                [Some(value)] => CanonicalRange::point(*value),
                [None] => CanonicalRange::full(),
                [lower, upper] => CanonicalRange::from_options(*lower, *upper),
                _ => {
                    return Err(Error::invalid_spec(
                        self,
                        format!("expected 1 or 2 elements, got {}", items.len()),
                    ))
                }
            },
            Self::Text(text) => {
                parse_text(text).map_err(|reason| Error::invalid_spec(self, reason))?
            }
            Self::Slice { start, stop } => CanonicalRange::from_options(*start, *stop),
        };

        for bound in [&range.lower, &range.upper] {
            if let Bound::Concrete(value) = bound {
                if !value.is_valid() {
                    tracing::debug!(spec = %self, "rejecting invalid bound {value}");
                    return Err(Error::invalid_spec(
                        self,
                        format!("{value} is not a valid {}", T::KIND),
                    ));
                }
            }
        }
        Ok(range)
    }
}

/// Resolve any supported encoding to a canonical range.
pub fn parse<T: SamplePosition>(spec: &RangeSpec<T>) -> Result<CanonicalRange<T>> {
    spec.resolve()
}

fn parse_text<T: SamplePosition>(text: &str) -> std::result::Result<CanonicalRange<T>, String> {
    let mut parts = text.split(':');
    let first = parts.next().unwrap_or_default();
    match (parts.next(), parts.next()) {
        (None, _) => parse_position(first).map(CanonicalRange::point),
        (Some(second), None) => Ok(CanonicalRange::new(parse_side(first)?, parse_side(second)?)),
        (Some(_), Some(_)) => Err("more than one ':' separator".to_string()),
    }
}

fn parse_side<T: SamplePosition>(token: &str) -> std::result::Result<Bound<T>, String> {
    if token.trim().is_empty() {
        Ok(Bound::Open)
    } else {
        parse_position(token).map(Bound::Concrete)
    }
}

fn parse_position<T: SamplePosition>(token: &str) -> std::result::Result<T, String> {
    let token = token.trim();
    if token.is_empty() {
        return Err("empty range".to_string());
    }
    T::parse_token(token).ok_or_else(|| format!("cannot parse {token:?} as a {}", T::KIND))
}

fn write_opt<T: fmt::Display>(f: &mut fmt::Formatter<'_>, value: &Option<T>) -> fmt::Result {
    match value {
        Some(v) => write!(f, "{v}"),
        None => f.write_str("None"),
    }
}

/// Renders the spec the way a caller would have written it.
impl<T: fmt::Display> fmt::Display for RangeSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(value) => write!(f, "{value}"),
            Self::Sequence(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_opt(f, item)?;
                }
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Self::Text(text) => write!(f, "{text:?}"),
            Self::Slice { start, stop } => {
                f.write_str("slice(")?;
                write_opt(f, start)?;
                f.write_str(", ")?;
                write_opt(f, stop)?;
                f.write_str(")")
            }
        }
    }
}

impl<T> From<&str> for RangeSpec<T> {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl<T> From<String> for RangeSpec<T> {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<T> From<(Option<T>, Option<T>)> for RangeSpec<T> {
    fn from((lower, upper): (Option<T>, Option<T>)) -> Self {
        Self::pair(lower, upper)
    }
}

impl<T> From<Vec<Option<T>>> for RangeSpec<T> {
    fn from(items: Vec<Option<T>>) -> Self {
        Self::Sequence(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::{Chrono, KeyIndex};

    fn time(spec: RangeSpec<Chrono>) -> CanonicalRange<Chrono> {
        spec.resolve().expect("spec should resolve")
    }

    #[test]
    fn test_scalar_is_point() {
        assert_eq!(time(RangeSpec::scalar(9.0)), CanonicalRange::point(9.0));
    }

    #[test]
    fn test_sequence_forms() {
        assert_eq!(time(RangeSpec::pair(Some(4.0), Some(9.0))), CanonicalRange::from(4.0..=9.0));
        assert_eq!(time(RangeSpec::pair(None, Some(4.0))), CanonicalRange::from(..=4.0));
        assert_eq!(time(RangeSpec::pair(None, None)), CanonicalRange::full());
        assert_eq!(time(RangeSpec::single(Some(9.0))), CanonicalRange::point(9.0));
        assert_eq!(time(RangeSpec::single(None)), CanonicalRange::full());
    }

    #[test]
    fn test_sequence_length_checked() {
        let empty = RangeSpec::<Chrono>::Sequence(vec![]).resolve();
        assert!(matches!(empty, Err(Error::InvalidRangeSpec { .. })));

        let triple = RangeSpec::Sequence(vec![Some(1.0), Some(2.0), Some(3.0)]).resolve();
        let err = triple.unwrap_err().to_string();
        assert!(err.contains("(1, 2, 3)"), "{err}");
    }

    #[test]
    fn test_text_forms() {
        assert_eq!(time("4:9".into()), CanonicalRange::from(4.0..=9.0));
        assert_eq!(time("4:".into()), CanonicalRange::from(4.0..));
        assert_eq!(time(":4".into()), CanonicalRange::from(..=4.0));
        assert_eq!(time(":".into()), CanonicalRange::full());
        assert_eq!(time("9".into()), CanonicalRange::point(9.0));
        assert_eq!(time(" 2 : 8 ".into()), CanonicalRange::from(2.0..=8.0));
    }

    #[test]
    fn test_text_errors() {
        for bad in ["1:2:3", "::", "a:4", "4:b", "", "  ", "nan:4"] {
            let result = RangeSpec::<Chrono>::text(bad).resolve();
            assert!(
                matches!(result, Err(Error::InvalidRangeSpec { .. })),
                "{bad:?} should be rejected"
            );
        }
        assert!(RangeSpec::<KeyIndex>::text("-1:4").resolve().is_err());
    }

    #[test]
    fn test_slice_forms() {
        assert_eq!(time(RangeSpec::slice_to(Some(4.0))), CanonicalRange::from(..=4.0));
        assert_eq!(time(RangeSpec::slice_to(None)), CanonicalRange::full());
        assert_eq!(time(RangeSpec::slice(Some(4.0), None)), CanonicalRange::from(4.0..));
        assert_eq!(time(RangeSpec::slice(Some(9.0), Some(9.0))), CanonicalRange::point(9.0));
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        assert!(RangeSpec::scalar(f64::NAN).resolve().is_err());
        assert!(RangeSpec::pair(Some(1.0), Some(f64::INFINITY)).resolve().is_err());
        assert!(RangeSpec::slice(Some(f64::NEG_INFINITY), None).resolve().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(RangeSpec::<KeyIndex>::pair(Some(4), None).to_string(), "(4, None)");
        assert_eq!(RangeSpec::<KeyIndex>::single(Some(9)).to_string(), "(9,)");
        assert_eq!(RangeSpec::<KeyIndex>::text("4:9").to_string(), "\"4:9\"");
        assert_eq!(RangeSpec::<KeyIndex>::slice_to(Some(4)).to_string(), "slice(None, 4)");
    }

    #[test]
    fn test_parse_fn_matches_resolve() {
        let spec = RangeSpec::<KeyIndex>::pair(Some(2), Some(8));
        assert_eq!(parse(&spec).unwrap(), spec.resolve().unwrap());
    }
}
