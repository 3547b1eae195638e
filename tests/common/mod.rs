//! Common test utilities for ivyfetch integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A workspace with a `file:` repository next to it
///
/// ```text
/// <temp>/
/// ├── ivyfetch.yaml
/// ├── app/module.yaml
/// ├── repo/<org>/<name>/<rev>/{module.yaml, <name>-<rev>.jar}
/// └── cache/
/// ```
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create an empty workspace directory
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = dunce::canonicalize(temp.path()).expect("Failed to canonicalize temp path");
        Self { temp, path }
    }

    /// Workspace with a single module `app` declaring `dependencies`
    pub fn with_app(dependencies: &[(&str, &str, &str)]) -> Self {
        let workspace = Self::new();
        workspace.write_workspace(true, &["app"]);
        workspace.write_file("app/module.yaml", &descriptor("org.acme", "app", "1.0", dependencies));
        workspace
    }

    /// Write ivyfetch.yaml with one module per name (`<name>/module.yaml`)
    pub fn write_workspace(&self, background: bool, modules: &[&str]) {
        let mut yaml = format!(
            "settings:\n  resolve_in_background: {background}\n  cache_dir: cache\n  repositories:\n    - name: local\n      root: file:repo/\nmodules:\n"
        );
        for module in modules {
            yaml.push_str(&format!("  - name: {module}\n    descriptor: {module}/module.yaml\n"));
        }
        self.write_file("ivyfetch.yaml", &yaml);
    }

    /// Publish a module revision (descriptor and jar) to the repository
    pub fn publish(&self, org: &str, name: &str, rev: &str, dependencies: &[(&str, &str, &str)]) {
        let dir = format!("repo/{org}/{name}/{rev}");
        self.write_file(&format!("{dir}/module.yaml"), &descriptor(org, name, rev, dependencies));
        self.write_file(&format!("{dir}/{name}-{rev}.jar"), &format!("{org}#{name};{rev}"));
    }

    /// Publish a classifier artifact (javadoc, sources) for a revision
    pub fn publish_classifier(&self, org: &str, name: &str, rev: &str, classifier: &str) {
        self.write_file(
            &format!("repo/{org}/{name}/{rev}/{name}-{rev}-{classifier}.jar"),
            classifier,
        );
    }

    /// `file://` location of a path below the workspace
    pub fn location(&self, relative: &str) -> String {
        format!("file://{}/{relative}", self.path.display())
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.path.join("cache")
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// ivyfetch command running inside the workspace with an isolated cache
    pub fn cmd(&self) -> Command {
        let mut cmd = ivyfetch_cmd();
        cmd.current_dir(&self.path)
            .env("IVYFETCH_CACHE_DIR", self.cache_dir())
            .env_remove("IVYFETCH_WORKSPACE")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Module descriptor YAML
pub fn descriptor(org: &str, name: &str, rev: &str, dependencies: &[(&str, &str, &str)]) -> String {
    let mut yaml = format!(
        "info:\n  organisation: {org}\n  module: {name}\n  revision: \"{rev}\"\ndependencies:\n"
    );
    if dependencies.is_empty() {
        yaml = yaml.replace("dependencies:\n", "dependencies: []\n");
    }
    for (dep_org, dep_name, dep_rev) in dependencies {
        yaml.push_str(&format!(
            "  - org: {dep_org}\n    name: {dep_name}\n    rev: \"{dep_rev}\"\n"
        ));
    }
    yaml
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn ivyfetch_cmd() -> Command {
    Command::cargo_bin("ivyfetch").expect("ivyfetch binary")
}

/// Whether `path` lies below `base`
#[allow(dead_code)]
pub fn is_below(path: &Path, base: &Path) -> bool {
    path.starts_with(base)
}
