//! Integration tests for `ivyfetch cache`

mod common;

use common::TestWorkspace;
use predicates::prelude::*;

fn resolved_workspace() -> TestWorkspace {
    let workspace = TestWorkspace::with_app(&[("org.acme", "core", "1.0")]);
    workspace.publish("org.acme", "core", "1.0", &[("org.acme", "util", "2.0")]);
    workspace.publish("org.acme", "util", "2.0", &[]);
    workspace.cmd().arg("resolve").assert().success();
    workspace
}

#[test]
fn test_cache_stats_after_resolve() {
    let workspace = resolved_workspace();
    workspace
        .cmd()
        .arg("cache")
        .assert()
        .success()
        .stdout(predicate::str::contains("Modules: 2"))
        .stdout(predicate::str::contains("Revisions: 2"));
}

#[test]
fn test_cache_list() {
    let workspace = resolved_workspace();
    workspace
        .cmd()
        .args(["cache", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("org.acme#core"))
        .stdout(predicate::str::contains("org.acme#util"));
}

#[test]
fn test_cache_clear_only_one_module() {
    let workspace = resolved_workspace();
    workspace
        .cmd()
        .args(["cache", "clear", "--only", "org.acme#core"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed cached module: org.acme#core"));

    assert!(!workspace.file_exists("cache/org.acme/core"));
    assert!(workspace.file_exists("cache/org.acme/util"));
}

#[test]
fn test_cache_clear_all() {
    let workspace = resolved_workspace();
    workspace
        .cmd()
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache cleared"));

    assert!(!workspace.file_exists("cache"));
}

#[test]
fn test_cache_outside_workspace_uses_environment() {
    let workspace = TestWorkspace::new();
    workspace
        .cmd()
        .arg("cache")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache is empty"));
}

#[test]
fn test_cache_clear_unknown_module_fails() {
    let workspace = resolved_workspace();
    workspace
        .cmd()
        .args(["cache", "clear", "--only", "org.acme#ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found in cache"));
}
