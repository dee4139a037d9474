use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture() -> PathBuf {
    let path = repo_root().join("fixtures").join("envelopes").join("acme.json");
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

#[test]
fn cli_renders_svg_to_stdout() {
    let exe = assert_cmd::cargo_bin!("seastar-cli");
    let output = Command::new(exe)
        .args(["render", fixture().to_string_lossy().as_ref()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let svg = String::from_utf8(output).expect("utf-8 svg");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(">Acme Corporation</text>"));
    assert!(svg.contains("link-badge--crm"));
}

#[test]
fn cli_renders_svg_to_a_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("graph.svg");

    let exe = assert_cmd::cargo_bin!("seastar-cli");
    Command::new(exe)
        .args([
            "render",
            "--out",
            out.to_string_lossy().as_ref(),
            "--width",
            "640",
            "--height",
            "480",
            fixture().to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.contains("viewBox=\"0 0 640 480\""));
}

#[test]
fn cli_build_emits_the_graph_model() {
    let exe = assert_cmd::cargo_bin!("seastar-cli");
    let output = Command::new(exe)
        .args(["build", "--pretty", fixture().to_string_lossy().as_ref()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let graph: serde_json::Value = serde_json::from_slice(&output).expect("graph JSON");
    assert_eq!(graph["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(graph["links"].as_array().unwrap().len(), 3);
    assert_eq!(graph["nodes"][0]["isFocus"], serde_json::json!(true));
}

#[test]
fn cli_build_honors_host_record_overrides() {
    let exe = assert_cmd::cargo_bin!("seastar-cli");
    let output = Command::new(exe)
        .args([
            "build",
            "--record-id",
            "001HOSTOVERRIDE",
            fixture().to_string_lossy().as_ref(),
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let graph: serde_json::Value = serde_json::from_slice(&output).expect("graph JSON");
    assert_eq!(
        graph["nodes"][0]["recordId"],
        serde_json::json!("001HOSTOVERRIDE")
    );
}

#[test]
fn cli_builds_empty_graph_for_unsupported_schema() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("v1.json");
    fs::write(
        &path,
        r#"{"schemaVersion":"1","anchorEntity":{"entityName":"Acme"},"relatedEntities":[{"entityName":"Beta","predicate":"x"}]}"#,
    )
    .expect("write envelope");

    let exe = assert_cmd::cargo_bin!("seastar-cli");
    let output = Command::new(exe)
        .args(["build", path.to_string_lossy().as_ref()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let graph: serde_json::Value = serde_json::from_slice(&output).expect("graph JSON");
    assert_eq!(graph["nodes"].as_array().unwrap().len(), 0);
    assert_eq!(graph["links"].as_array().unwrap().len(), 0);
}

#[test]
fn cli_rejects_unknown_flags_with_usage() {
    let exe = assert_cmd::cargo_bin!("seastar-cli");
    Command::new(exe)
        .args(["build", "--bogus"])
        .assert()
        .failure()
        .code(2);
}
