//! Designer Run Integration Tests
//!
//! Exercises the full import → replay → export pass against real files.

use std::fs;
use std::path::Path;

use panel_designer::{run, DesignerConfig, DesignerError};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).expect("write fixture");
    path
}

fn read_json(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path).expect("output written");
    serde_json::from_str(&text).expect("output is json")
}

#[test]
fn test_empty_run_writes_default_layout() {
    let dir = TempDir::new().expect("tempdir");
    let config = DesignerConfig {
        output: dir.path().join("panel-layout.json"),
        ..DesignerConfig::default()
    };

    let summary = run(&config).expect("run");
    assert_eq!(summary.panels, 0);

    let value = read_json(&config.output);
    assert_eq!(value["panels"], serde_json::json!([]));
    assert_eq!(value["canvasWidth"], serde_json::json!(1280.0));
    assert_eq!(value["canvasBgColor"], "#ffffff");
    assert_eq!(value["roundedCorners"], serde_json::json!(true));
    assert_eq!(value["showGrid"], serde_json::json!(false));
}

#[test]
fn test_script_replay_produces_expected_layout() {
    let dir = TempDir::new().expect("tempdir");
    let script = write(
        dir.path(),
        "edits.json",
        r##"[
            {"action": "addPanel", "shape": "square"},
            {"action": "resizePanel", "panel": 0, "width": 500, "height": 400, "handle": "e"},
            {"action": "addPanel", "shape": "circle"},
            {"action": "duplicatePanel", "panel": 1},
            {"action": "setBackgroundColor", "color": "#eeeeee"},
            {"action": "commitDimensions", "width": 1024, "height": 768},
            {"action": "undo"}
        ]"##,
    );
    let config = DesignerConfig {
        script: Some(script),
        output: dir.path().join("out.json"),
        ..DesignerConfig::default()
    };

    let summary = run(&config).expect("run");
    assert_eq!(summary.applied, 7);
    assert_eq!(summary.panels, 3);
    assert_eq!(summary.undo_depth, 5);

    let value = read_json(&config.output);
    let first = &value["panels"][0];
    assert_eq!(first["x"], serde_json::json!(440.0));
    assert_eq!(first["y"], serde_json::json!(160.0));
    assert_eq!(first["width"], serde_json::json!(500.0));
    assert_eq!(first["height"], serde_json::json!(400.0));

    let copy = &value["panels"][2];
    assert_eq!(copy["title"], "Title Copy 2");
    assert_eq!(copy["isCircle"], serde_json::json!(true));
    assert_eq!(copy["zIndex"], serde_json::json!(3));

    assert_eq!(value["canvasBgColor"], "#eeeeee");
    assert_eq!(value["canvasWidth"], serde_json::json!(1280.0));
}

#[test]
fn test_input_layout_is_edited_in_place() {
    let dir = TempDir::new().expect("tempdir");
    let input = write(
        dir.path(),
        "in.json",
        r##"{
            "panels": [{
                "id": "3f2c1a8e-9b7d-4e21-8c55-2a6f0d9e4b11",
                "x": 10, "y": 20, "width": 300, "height": 200,
                "zIndex": 7, "title": "Banner", "isCircle": false
            }],
            "canvasWidth": 1280, "canvasHeight": 720,
            "canvasBgColor": "#ffffff", "canvasFgColor": "#000000",
            "roundedCorners": true, "showGrid": false
        }"##,
    );
    let script = write(
        dir.path(),
        "edits.json",
        r#"[
            {"action": "movePanel", "panel": "3f2c1a8e-9b7d-4e21-8c55-2a6f0d9e4b11", "x": 50, "y": 60},
            {"action": "addPanel", "shape": "square"}
        ]"#,
    );
    let config = DesignerConfig {
        input: Some(input),
        script: Some(script),
        output: dir.path().join("out.json"),
        ..DesignerConfig::default()
    };

    run(&config).expect("run");

    let value = read_json(&config.output);
    assert_eq!(value["panels"][0]["id"], "3f2c1a8e-9b7d-4e21-8c55-2a6f0d9e4b11");
    assert_eq!(value["panels"][0]["x"], serde_json::json!(50.0));
    assert_eq!(value["panels"][1]["zIndex"], serde_json::json!(8));
}

#[test]
fn test_failures_do_not_write_output() {
    let dir = TempDir::new().expect("tempdir");
    let output = dir.path().join("out.json");

    let broken_input = write(dir.path(), "broken.json", "{ nope");
    let config = DesignerConfig {
        input: Some(broken_input),
        output: output.clone(),
        ..DesignerConfig::default()
    };
    assert!(matches!(run(&config), Err(DesignerError::Layout(_))));

    let bad_script = write(
        dir.path(),
        "bad.json",
        r#"[{"action": "commitDimensions", "width": 100, "height": 100}]"#,
    );
    let config = DesignerConfig {
        script: Some(bad_script),
        output: output.clone(),
        ..DesignerConfig::default()
    };
    assert!(matches!(
        run(&config),
        Err(DesignerError::Action { index: 0, .. })
    ));

    let missing = DesignerConfig {
        script: Some(dir.path().join("missing.json")),
        output: output.clone(),
        ..DesignerConfig::default()
    };
    assert!(matches!(run(&missing), Err(DesignerError::Io { .. })));

    assert!(!output.exists());
}
