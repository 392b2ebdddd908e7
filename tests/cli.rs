use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::tempdir;

fn hookwright_cmd() -> Command {
    let mut cmd = Command::cargo_bin("hookwright").expect("hookwright binary");
    cmd.env_remove("RUST_LOG")
        .env_remove("HOOKWRIGHT_LOG_LEVEL")
        .env_remove("HOOKWRIGHT_LOG_FORMAT")
        .env("HOOKWRIGHT_ERROR_FORMAT", "short")
        .env("NO_COLOR", "1");
    cmd
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn help_and_version_commands() {
    hookwright_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Usage: hookwright"));

    hookwright_cmd()
        .args(["help", "expand"])
        .assert()
        .success()
        .stdout(contains("--emit <source|json>"));

    hookwright_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(concat!("hookwright ", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn missing_command_is_a_usage_error() {
    hookwright_cmd()
        .assert()
        .failure()
        .stderr(contains("error: missing command").and(contains("Usage: hookwright")));
}

#[test]
fn expands_a_stubbable_class_to_source() {
    hookwright_cmd()
        .args(["expand", fixture("service.json").to_str().expect("utf8 path")])
        .assert()
        .success()
        .stdout(
            contains("return try await _fetch(id)")
                .and(contains("return try await client.get(id)"))
                .and(contains("var _fetch: ((Int) async throws -> String)? = nil"))
                .and(contains("@storageRestrictions(initializes: _name)"))
                .and(contains("private var _name: String = \"demo\""))
                .and(contains("var _setName: ((inout String, String) -> Void)? = nil")),
        )
        .stderr(contains("error").not());
}

#[test]
fn mockable_class_warns_but_succeeds() {
    hookwright_cmd()
        .args(["expand", fixture("repository.json").to_str().expect("utf8 path")])
        .assert()
        .success()
        .stdout(
            contains("class Mock: Repository, Store {")
                .and(contains("override func save(_ item: Item) throws {"))
                .and(contains("try super.save(item)"))
                .and(contains("_sum").not())
                .and(contains("_shared").not()),
        )
        .stderr(contains("warning[HW0306]").and(contains("0 error(s), 1 warning(s)")));
}

#[test]
fn rejected_annotation_exits_with_failure_and_keeps_the_declaration() {
    hookwright_cmd()
        .args(["expand", fixture("locked.json").to_str().expect("utf8 path")])
        .assert()
        .failure()
        .stdout(contains("final class Locked {}"))
        .stderr(contains("error[HW0204]").and(contains("cannot be applied to final classes")));
}

#[test]
fn json_diagnostics_and_json_output_file() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("expanded.json");
    hookwright_cmd()
        .args([
            "expand",
            fixture("locked.json").to_str().expect("utf8 path"),
            "--emit",
            "json",
            "--error-format",
            "json",
            "-o",
            output.to_str().expect("utf8 path"),
        ])
        .assert()
        .failure()
        .stderr(contains("\"code\":\"HW0204\"").and(contains("\"category\":\"modifier\"")));

    let written = fs::read_to_string(&output).expect("expanded module");
    let value: serde_json::Value = serde_json::from_str(&written).expect("json module");
    assert_eq!(value["items"][0]["decl"]["name"], "Locked");
}

#[test]
fn config_file_changes_hook_names() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("service.json");
    fs::copy(fixture("service.json"), &input).expect("copy fixture");
    fs::write(
        dir.path().join("hookwright.yaml"),
        "hook_prefix: stub_\nsetter_hook: value\n",
    )
    .expect("write config");

    hookwright_cmd()
        .args(["expand", input.to_str().expect("utf8 path")])
        .assert()
        .success()
        .stdout(
            contains("var stub_fetch:")
                .and(contains("var _setName: ((String) -> Void)? = nil"))
                .and(contains("_setName(newValue)")),
        );
}

#[test]
fn invalid_config_is_reported() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("broken.yaml");
    fs::write(&config, "setter_hook: sideways\n").expect("write config");

    hookwright_cmd()
        .args([
            "expand",
            fixture("service.json").to_str().expect("utf8 path"),
            "--config",
            config.to_str().expect("utf8 path"),
        ])
        .assert()
        .failure()
        .stderr(contains("invalid configuration"));
}

#[test]
fn unreadable_input_is_an_io_error() {
    hookwright_cmd()
        .args(["expand", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(contains("I/O error"));
}
