//! Integration tests for `ivyfetch list` and `ivyfetch fetch`

mod common;

use common::TestWorkspace;
use predicates::prelude::*;

#[test]
fn test_list_file_directory() {
    let workspace = TestWorkspace::new();
    workspace.publish("org.acme", "core", "1.0", &[]);
    workspace.publish("org.acme", "core", "2.0", &[]);

    workspace
        .cmd()
        .arg("list")
        .arg(workspace.location("repo/org.acme/core/"))
        .assert()
        .success()
        .stdout(predicate::str::contains("repo/org.acme/core/1.0"))
        .stdout(predicate::str::contains("repo/org.acme/core/2.0"));
}

#[test]
fn test_list_missing_directory_is_empty() {
    let workspace = TestWorkspace::new();
    workspace
        .cmd()
        .arg("list")
        .arg(workspace.location("repo/nothing/"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries"));
}

#[test]
fn test_list_rejects_unknown_scheme() {
    let workspace = TestWorkspace::new();
    workspace
        .cmd()
        .args(["list", "ftp://example.org/repo/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed location"));
}

#[test]
fn test_fetch_file_resource() {
    let workspace = TestWorkspace::new();
    workspace.publish("org.acme", "core", "1.0", &[]);

    workspace
        .cmd()
        .args(["fetch", "--quiet"])
        .arg(workspace.location("repo/org.acme/core/1.0/core-1.0.jar"))
        .arg("out/core.jar")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetched"));

    assert_eq!(workspace.read_file("out/core.jar"), "org.acme#core;1.0");
}

#[test]
fn test_fetch_missing_resource_fails() {
    let workspace = TestWorkspace::new();
    workspace
        .cmd()
        .args(["fetch", "-q"])
        .arg(workspace.location("repo/ghost.jar"))
        .arg("out/ghost.jar")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Resource not found"));

    assert!(!workspace.file_exists("out/ghost.jar"));
}
