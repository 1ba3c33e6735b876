use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::NamedTempFile;

fn keyrange() -> Command {
    #[allow(deprecated)]
    let cmd = Command::cargo_bin("keyrange").unwrap();
    cmd
}

fn keyframe_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let keys: Vec<Value> = (0..10)
        .map(|i| {
            let t = 1.0 + 2.0 * i as f64;
            serde_json::json!({ "time": t, "value": t * 10.0 })
        })
        .collect();
    let doc = serde_json::json!({ "pCube1.tx": keys, "pCube1.ty": [{ "time": 5.0, "value": 0.0 }] });
    write!(file, "{doc}").unwrap();
    file
}

#[test]
fn test_help() {
    keyrange()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("count"))
        .stdout(predicate::str::contains("query"));
}

#[test]
fn test_parse_prints_canonical_form() {
    keyrange().args(["parse", "4:"]).assert().success().stdout("4:\n");
    keyrange().args(["parse", "9"]).assert().success().stdout("9:9\n");
    keyrange()
        .args(["parse", "--mode", "index", ":8", "--json"])
        .assert()
        .success()
        .stdout("{\"lower\":null,\"upper\":8}\n");
}

#[test]
fn test_parse_rejects_bad_spec() {
    keyrange()
        .args(["parse", "1:2:3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than one ':'"));
}

#[test]
fn test_count_uniform_keys() {
    keyrange()
        .args(["count", "4:9", "--uniform", "1:2:10"])
        .assert()
        .success()
        .stdout("3\n");
    keyrange()
        .args(["count", "2:8", "--mode", "index", "--uniform", "1:2:10"])
        .assert()
        .success()
        .stdout("7\n");
}

#[test]
fn test_count_rejects_huge_uniform_layout() {
    keyrange()
        .args(["count", ":", "--uniform", "0:1:18446744073709551615"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the limit"));
}

#[test]
fn test_count_rejects_collapsed_uniform_layout() {
    keyrange()
        .args(["count", ":", "--uniform", "1e16:1:3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("strictly ascending"));
}

#[test]
fn test_count_explicit_keys() {
    keyrange()
        .args(["count", ":4", "--keys", "1,3,5,7"])
        .assert()
        .success()
        .stdout("2\n");
    keyrange()
        .args(["count", ":", "--keys", "3,1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("strictly ascending"));
}

#[test]
fn test_select_json() {
    let output = keyrange()
        .args(["select", "4:9", "--uniform", "1:2:10", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json, serde_json::json!([5.0, 7.0, 9.0]));
}

#[test]
fn test_query_file() {
    let file = keyframe_file();
    let path = file.path().to_str().unwrap();

    keyrange()
        .args(["query", "--file", path, "--attr", "pCube1.tx", "--time", "4:"])
        .assert()
        .success()
        .stdout("8\n");

    // all attributes: 5 on pCube1.ty plus 5, 7, 9 on pCube1.tx
    keyrange()
        .args(["query", "--file", path, "--time", "4:9"])
        .assert()
        .success()
        .stdout("4\n");

    keyrange()
        .args(["query", "-f", path, "-a", "pCube1.tx", "-i", "8:", "-o", "vc", "--json"])
        .assert()
        .success()
        .stdout("[170.0,190.0]\n");
}

#[test]
fn test_query_unknown_attribute() {
    let file = keyframe_file();
    keyrange()
        .args(["query", "--file", file.path().to_str().unwrap(), "--attr", "pCube1.rz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Attribute not found"));
}
