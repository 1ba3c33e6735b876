//! Keyframe count queries over every range encoding.
//!
//! Fixture: one attribute keyed at times 1, 3, 5, ... 19 (ten keys), so the
//! index-keyed sequence is 0..=9.

use keyrange::anim::{KeyframeQuery, KeyframeStore, KeyframeTrack, QueryMode, RangeArg};
use keyrange::core::{RangeSpec, TimeSampling};
use keyrange::{Chrono, KeyIndex};

const ATTR: &str = "pCube1.tx";

fn store() -> KeyframeStore {
    let store = KeyframeStore::new();
    let track = KeyframeTrack::from_sampling(&TimeSampling::uniform(2.0, 1.0), 10, |t| t)
        .expect("uniform layout");
    store.insert_track(ATTR, track);
    store
}

fn count(store: &KeyframeStore, flag: &str, range: RangeArg) -> usize {
    let mode: QueryMode = flag.parse().expect("known flag");
    assert_eq!(mode, range.mode(), "flag {flag} used with a {} range", range.mode());
    let query = KeyframeQuery::new(range.clone()).attribute(ATTR);
    match query.run(store) {
        Ok(result) => result.len(),
        Err(e) => panic!("Error executing keyframe for {flag}={range}: {e}"),
    }
}

fn tup<T>(items: &[Option<T>]) -> RangeSpec<T>
where
    T: Copy,
{
    RangeSpec::Sequence(items.to_vec())
}

fn list<T>(items: Vec<Option<T>>) -> RangeSpec<T> {
    RangeSpec::from(items)
}

fn time_cases() -> Vec<(RangeSpec<Chrono>, usize)> {
    let n: Option<Chrono> = None;
    let s = |v: Chrono| Some(v);
    vec![
        (tup(&[s(4.0)]), 0),
        (tup(&[s(9.0)]), 1),
        (tup(&[n]), 10),
        (tup(&[s(4.0), s(4.0)]), 0),
        (tup(&[s(4.0), s(9.0)]), 3),
        (tup(&[s(4.0), n]), 8),
        (tup(&[s(9.0), s(9.0)]), 1),
        (tup(&[s(9.0), n]), 6),
        (tup(&[n, s(4.0)]), 2),
        (tup(&[n, s(9.0)]), 5),
        (tup(&[n, n]), 10),
        (list(vec![s(4.0)]), 0),
        (list(vec![s(9.0)]), 1),
        (list(vec![n]), 10),
        (list(vec![s(4.0), s(4.0)]), 0),
        (list(vec![s(4.0), s(9.0)]), 3),
        (list(vec![s(4.0), n]), 8),
        (list(vec![s(9.0), s(9.0)]), 1),
        (list(vec![s(9.0), n]), 6),
        (list(vec![n, s(4.0)]), 2),
        (list(vec![n, s(9.0)]), 5),
        (list(vec![n, n]), 10),
        (RangeSpec::text("4:4"), 0),
        (RangeSpec::text("4:9"), 3),
        (RangeSpec::text("4:"), 8),
        (RangeSpec::text("9:9"), 1),
        (RangeSpec::text("9:"), 6),
        (RangeSpec::text(":4"), 2),
        (RangeSpec::text(":9"), 5),
        (RangeSpec::text(":"), 10),
        (RangeSpec::slice_to(s(4.0)), 2),
        (RangeSpec::slice_to(s(9.0)), 5),
        (RangeSpec::slice_to(n), 10),
        (RangeSpec::slice(s(4.0), s(4.0)), 0),
        (RangeSpec::slice(s(4.0), s(9.0)), 3),
        (RangeSpec::slice(s(4.0), n), 8),
        (RangeSpec::slice(s(9.0), s(9.0)), 1),
        (RangeSpec::slice(s(9.0), n), 6),
        (RangeSpec::slice(n, s(4.0)), 2),
        (RangeSpec::slice(n, s(9.0)), 5),
        (RangeSpec::slice(n, n), 10),
        (RangeSpec::scalar(4.0), 0),
        (RangeSpec::scalar(9.0), 1),
    ]
}

fn index_cases() -> Vec<(RangeSpec<KeyIndex>, usize)> {
    let n: Option<KeyIndex> = None;
    let s = |v: KeyIndex| Some(v);
    vec![
        (tup(&[s(2)]), 1),
        (tup(&[s(8)]), 1),
        (tup(&[s(10)]), 0),
        (tup(&[n]), 10),
        (tup(&[s(10), s(10)]), 0),
        (tup(&[s(2), s(2)]), 1),
        (tup(&[s(2), s(8)]), 7),
        (tup(&[s(2), n]), 8),
        (tup(&[s(8), s(8)]), 1),
        (tup(&[s(8), n]), 2),
        (tup(&[n, s(2)]), 3),
        (tup(&[n, s(8)]), 9),
        (tup(&[n, n]), 10),
        (list(vec![s(2)]), 1),
        (list(vec![s(8)]), 1),
        (list(vec![n]), 10),
        (list(vec![s(10), s(10)]), 0),
        (list(vec![s(2), s(2)]), 1),
        (list(vec![s(2), s(8)]), 7),
        (list(vec![s(2), n]), 8),
        (list(vec![s(8), s(8)]), 1),
        (list(vec![s(8), n]), 2),
        (list(vec![n, s(2)]), 3),
        (list(vec![n, s(8)]), 9),
        (list(vec![n, n]), 10),
        (RangeSpec::text("10:10"), 0),
        (RangeSpec::text("2:2"), 1),
        (RangeSpec::text("2:8"), 7),
        (RangeSpec::text("2:"), 8),
        (RangeSpec::text("8:8"), 1),
        (RangeSpec::text("8:"), 2),
        (RangeSpec::text(":2"), 3),
        (RangeSpec::text(":8"), 9),
        (RangeSpec::text(":"), 10),
        (RangeSpec::slice_to(s(2)), 3),
        (RangeSpec::slice_to(s(8)), 9),
        (RangeSpec::slice_to(n), 10),
        (RangeSpec::slice(s(2), s(2)), 1),
        (RangeSpec::slice(s(2), s(8)), 7),
        (RangeSpec::slice(s(2), n), 8),
        (RangeSpec::slice(s(8), s(8)), 1),
        (RangeSpec::slice(s(8), n), 2),
        (RangeSpec::slice(n, s(2)), 3),
        (RangeSpec::slice(n, s(8)), 9),
        (RangeSpec::slice(n, n), 10),
        (RangeSpec::scalar(4), 1),
        (RangeSpec::scalar(9), 1),
    ]
}

#[test]
fn test_keyframe_time_ranges() {
    let store = store();
    for flag in ["time", "t"] {
        for (spec, expected) in time_cases() {
            let range = RangeArg::Time(spec);
            let got = count(&store, flag, range.clone());
            assert_eq!(
                got, expected,
                "Wrong value for {flag}={range} - expected {expected}, got {got}"
            );
        }
    }
}

#[test]
fn test_keyframe_index_ranges() {
    let store = store();
    for flag in ["index", "in"] {
        for (spec, expected) in index_cases() {
            let range = RangeArg::Index(spec);
            let got = count(&store, flag, range.clone());
            assert_eq!(
                got, expected,
                "Wrong value for {flag}={range} - expected {expected}, got {got}"
            );
        }
    }
}

#[test]
fn test_text_ranges_via_query_mode() {
    let store = store();
    let by_time = RangeArg::from_text("t".parse().unwrap(), "4:9");
    assert_eq!(count(&store, "t", by_time), 3);
    let by_index = RangeArg::from_text("index".parse().unwrap(), "2:8");
    assert_eq!(count(&store, "index", by_index), 7);
}
