use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

fn modularize_js_cli() -> Command {
  assert_cmd::cargo::cargo_bin_cmd!("modularize-js-cli")
}

#[test]
fn converts_a_tree_and_writes_an_index() {
  let input = tempdir().unwrap();
  let output = tempdir().unwrap();
  fs::create_dir(input.path().join("math")).unwrap();
  fs::write(
    input.path().join("math/Vector.js"),
    "THREE.Vector = function () {};",
  )
  .unwrap();
  fs::write(
    input.path().join("Box.js"),
    "THREE.Box = function () { return new THREE.Vector(); };",
  )
  .unwrap();

  let assert = modularize_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--input")
    .arg(input.path())
    .arg("--output")
    .arg(output.path())
    .assert()
    .success();

  let boxed = fs::read_to_string(output.path().join("Box.js")).unwrap();
  assert!(boxed.contains("var VectorModule = require('./math/Vector');"));
  assert!(!boxed.contains("THREE"));
  assert!(output.path().join("math/Vector.js").is_file());

  let index = fs::read_to_string(output.path().join("index.js")).unwrap();
  assert!(index.contains("exports.Vector = require('./math/Vector').Vector;"));
  assert!(index.contains("exports.Box = require('./Box').Box;"));

  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  assert!(stderr.contains("written"));
}

#[test]
fn merges_glsl_chunks_and_writes_graph_and_templates() {
  let input = tempdir().unwrap();
  let output = tempdir().unwrap();
  let dist = tempdir().unwrap();
  fs::create_dir(input.path().join("shaders")).unwrap();
  fs::write(
    input.path().join("shaders/ShaderChunk.js"),
    "THREE.ShaderChunk = {};",
  )
  .unwrap();
  fs::write(input.path().join("shaders/common.glsl"), "float x;").unwrap();
  fs::write(dist.path().join("package.json"), "{\"name\": \"demo\"}").unwrap();
  fs::write(dist.path().join("README.md"), "# demo\n").unwrap();
  let graph_path = output.path().join("graph.json");

  modularize_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--input")
    .arg(input.path())
    .arg("--output")
    .arg(output.path())
    .arg("--graph")
    .arg(&graph_path)
    .arg("--chunk-table")
    .arg("shaders/ShaderChunk.js")
    .arg("--dist")
    .arg(dist.path())
    .assert()
    .success();

  let table = fs::read_to_string(output.path().join("shaders/ShaderChunk.js")).unwrap();
  assert!(table.contains("'common': 'float x;'"));

  let graph: Value =
    serde_json::from_str(&fs::read_to_string(&graph_path).unwrap()).expect("graph JSON");
  assert_eq!(graph["nodes"][0]["label"], "ShaderChunk");
  assert_eq!(graph["nodes"][0]["group"], "shaders");

  assert_eq!(
    fs::read_to_string(output.path().join("package.json")).unwrap(),
    "{\"name\": \"demo\"}"
  );
  assert_eq!(
    fs::read_to_string(output.path().join("README.md")).unwrap(),
    "# demo\n"
  );
}

#[test]
fn missing_required_options_exit_nonzero() {
  modularize_js_cli()
    .timeout(Duration::from_secs(5))
    .assert()
    .failure();
}

#[test]
fn parse_errors_are_fatal() {
  let input = tempdir().unwrap();
  let output = tempdir().unwrap();
  fs::write(input.path().join("Broken.js"), "THREE.Foo = function ( {;").unwrap();

  let assert = modularize_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("--input")
    .arg(input.path())
    .arg("--output")
    .arg(output.path())
    .assert()
    .failure()
    .code(1);

  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  assert!(stderr.contains("error parsing ./Broken.js"));
}
