use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use command_info_core::MetadataPackage;
use serde_json::Value;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_command-info"))
        .args(args)
        .output()
        .expect("failed to run command-info")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path should be UTF-8")
}

// ---------------------------------------------------------------------------
// dump / arguments
// ---------------------------------------------------------------------------

#[test]
fn dump_prints_full_tree_as_json() {
    let tree = stdout_json(&run(&["dump"]));

    assert_eq!(tree["commandName"], "pkg");
    let names: Vec<&str> = tree["subcommands"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["commandName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["install", "rm", "remote"]);
    assert_eq!(tree["arguments"][0]["id"], ".globals.verbose");
    assert_eq!(tree["arguments"][0]["kind"], "flag");
}

#[test]
fn dump_path_selects_subtree() {
    let ls = stdout_json(&run(&["dump", "--path", "remote", "ls"]));

    assert_eq!(ls["commandName"], "ls");
    assert_eq!(ls["superCommands"], serde_json::json!(["pkg", "remote"]));
    assert_eq!(ls["arguments"][0]["parsingStrategy"], "scanningForValue");
}

#[test]
fn dump_path_accepts_alias() {
    let rm = stdout_json(&run(&["dump", "--path", "uninstall"]));

    assert_eq!(rm["commandName"], "rm");
    assert_eq!(rm["aliases"], serde_json::json!(["remove", "uninstall"]));
}

#[test]
fn dump_yaml_format() {
    let output = run(&["dump", "--path", "rm", "--format", "yaml"]);
    assert!(output.status.success());

    let yaml: serde_yaml::Value = serde_yaml::from_slice(&output.stdout).unwrap();
    assert_eq!(yaml["commandName"].as_str(), Some("rm"));
    assert_eq!(yaml["abstract"].as_str(), Some("Remove packages"));
}

#[test]
fn dump_unknown_path_fails() {
    let output = run(&["dump", "--path", "remote", "rename"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown subcommand `rename` under `pkg remote`"));
}

#[test]
fn arguments_respects_filter_flags() {
    let all = stdout_json(&run(&["arguments"]));
    assert_eq!(all.as_array().unwrap().len(), 5);

    let filtered = stdout_json(&run(&["arguments", "--no-hidden", "--no-initial-values"]));
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 4);
    assert!(filtered.iter().all(|a| a.get("initialValue").is_none()));
    assert!(filtered.iter().all(|a| a["id"] != ".globals.trace_io"));
}

#[test]
fn arguments_for_nested_command() {
    let args = stdout_json(&run(&["arguments", "--path", "install"]));
    let jobs = args
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["id"] == ".jobs")
        .expect("install should declare --jobs");

    assert_eq!(jobs["initialValue"], 4);
    assert_eq!(jobs["type"], "u32");
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_sample_tree_succeeds() {
    let output = run(&["validate"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Validated 6 command(s) under 'pkg'."));
}

// ---------------------------------------------------------------------------
// bundle / init-config
// ---------------------------------------------------------------------------

#[test]
fn bundle_writes_hashed_package() {
    let dir = tempfile::tempdir().unwrap();
    let bundle_path = dir.path().join("out").join("bundle.json");

    let output = run(&[
        "bundle",
        "--output",
        path_str(&bundle_path),
        "--name",
        "pkg-metadata",
    ]);
    assert!(
        output.status.success(),
        "bundle failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let package: Value = serde_json::from_str(&fs::read_to_string(&bundle_path).unwrap()).unwrap();
    assert_eq!(package["name"], "pkg-metadata");
    assert_eq!(package["commands"][0]["commandName"], "pkg");
    let hash = package["bundleHash"].as_str().unwrap();
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));

    let package: MetadataPackage = serde_json::from_value(package).unwrap();
    assert!(package.verify_bundle_hash().unwrap());
}

#[test]
fn init_config_output_is_loadable() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("command-info.yml");

    assert!(run(&["init-config", "--output", path_str(&config_path)])
        .status
        .success());
    let written = fs::read_to_string(&config_path).unwrap();
    assert!(written.contains("format: json"));

    fs::write(
        &config_path,
        written.replace("include_hidden: true", "include_hidden: false"),
    )
    .unwrap();
    let args = stdout_json(&run(&["--config", path_str(&config_path), "arguments"]));
    assert_eq!(args.as_array().unwrap().len(), 4);
}

#[test]
fn missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.yml");

    let output = run(&["--config", path_str(&missing), "dump"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("I/O error"));
}
