use std::fs;

use clap::Parser;
use json_pyd::cli::CommandLineInterface;
use pretty_assertions::assert_eq;

fn run(args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["json-pyd"];
    argv.extend_from_slice(args);
    CommandLineInterface::try_parse_from(argv)?.run()
}

#[test]
fn pydantic_writes_named_module() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sample.json");
    fs::write(&input, r#"{"name": "John", "tags": ["a", "b"]}"#).unwrap();

    let out_dir = dir.path().join("out");
    run(&[
        "pydantic",
        input.to_str().unwrap(),
        "--out-dir",
        out_dir.to_str().unwrap(),
        "--file-name",
        "model",
        "--force-optional",
    ])
    .unwrap();

    let written = fs::read_to_string(out_dir.join("model.py")).unwrap();
    assert_eq!(
        written,
        "from pydantic import BaseModel\nfrom typing import Any, Optional\n\n\
         class GeneratedModel(BaseModel):\n    name: Optional[str] = None\n    tags: Optional[list[str]] = None\n"
    );
}

#[test]
fn several_inputs_get_suffixed_names() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("one.json"), r#"{"a": 1}"#).unwrap();
    fs::write(dir.path().join("two.json"), r#"{"b": true}"#).unwrap();
    let pattern = format!("{}/*.json", dir.path().display());

    run(&["pydantic", &pattern, "--out-dir", dir.path().to_str().unwrap(), "--file-name", "m"]).unwrap();

    assert!(dir.path().join("m_one.py").exists());
    let two = fs::read_to_string(dir.path().join("m_two.py")).unwrap();
    assert!(two.ends_with("class GeneratedModel(BaseModel):\n    b: bool\n"));
}

#[test]
fn inputs_with_the_same_stem_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    for sub in ["a", "b"] {
        fs::create_dir(dir.path().join(sub)).unwrap();
        fs::write(dir.path().join(sub).join("x.json"), r#"{"k": 1}"#).unwrap();
    }
    let pattern = format!("{}/*/x.json", dir.path().display());
    let out_dir = dir.path().join("out");

    let err = run(&["pydantic", &pattern, "--out-dir", out_dir.to_str().unwrap(), "--file-name", "m"]).unwrap_err();
    assert!(err.to_string().contains("m_x.py"), "{err}");
    assert!(!out_dir.exists());
}

#[test]
fn malformed_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.json");
    fs::write(&input, "{\"a\": ").unwrap();

    let err = run(&["pydantic", input.to_str().unwrap(), "--out-dir", dir.path().to_str().unwrap(), "--file-name", "m"])
        .unwrap_err();
    assert!(err.to_string().contains("1 of 1 inputs failed"));
    assert!(!dir.path().join("m.py").exists());
}

#[test]
fn selection_and_snake_case_flags_apply() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("wrapped.json");
    fs::write(&input, r#"{"data": {"userId": 5, "homeAddress": {"zipCode": "x"}}}"#).unwrap();

    run(&[
        "pydantic",
        input.to_str().unwrap(),
        "--json-pointer",
        "/data",
        "--apply-snake-case",
        "--root-model",
        "User",
        "--out-dir",
        dir.path().to_str().unwrap(),
        "--file-name",
        "user",
    ])
    .unwrap();

    let written = fs::read_to_string(dir.path().join("user.py")).unwrap();
    assert!(written.contains("class Homeaddress(BaseModel):\n    zip_code: str\n"));
    assert!(written.ends_with("class User(BaseModel):\n    user_id: int\n    home_address: Homeaddress\n"));
}

#[test]
fn config_file_supplies_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("s.json");
    fs::write(&input, r#"{"tags": [1]}"#).unwrap();
    let config = dir.path().join("opts.json");
    fs::write(&config, r#"{"infer": {"array_policy": "reject"}}"#).unwrap();

    let err = run(&[
        "pydantic",
        input.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--stdout",
    ])
    .unwrap_err();
    assert!(err.to_string().contains("inputs failed"));
}

#[test]
fn tree_writes_json_view() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("s.json");
    fs::write(&input, r#"{"id": 1, "owner": {"name": null}}"#).unwrap();
    let out = dir.path().join("tree.json");

    run(&["tree", input.to_str().unwrap(), "--out", out.to_str().unwrap()]).unwrap();

    let tree: serde_json::Value = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(tree["name"], "GeneratedModel");
    assert_eq!(tree["fields"][0]["ty"], serde_json::json!({"kind": "primitive", "of": "integer"}));
    assert_eq!(tree["fields"][1]["ty"]["kind"], "reference");
    assert_eq!(tree["fields"][1]["ty"]["of"]["name"], "Owner");
    assert_eq!(tree["fields"][1]["ty"]["of"]["fields"][0]["ty"]["of"], "unknown");
}
