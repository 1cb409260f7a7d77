//! Common test utilities for bootstage integration tests.
//!
//! Provides `TestEnv` - an isolated temp workspace plus helpers to run the
//! bootstage CLI inside it and snapshot the workspace tree.

// Not every integration test binary uses every helper.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running a bootstage CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated workspace for driving the real binary.
pub struct TestEnv {
    /// Temporary directory acting as the workspace root
    pub workspace: TempDir,
    /// Path to the bootstage binary
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            workspace: TempDir::new().expect("failed to create temp workspace"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_bootstage")),
        }
    }

    /// Get path relative to the workspace root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.workspace.path().join(relative)
    }

    /// Drop a boot artifact into the workspace root
    pub fn write_artifact(&self, bytes: &[u8]) {
        std::fs::write(self.path("boot.efi"), bytes).expect("failed to write boot.efi");
    }

    /// Run bootstage in this workspace
    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = Command::new(&self.bin)
            .current_dir(self.workspace.path())
            .args(args)
            .output()
            .expect("failed to execute bootstage");

        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Sorted snapshot of every path under the workspace, for
    /// no-mutation assertions.
    pub fn tree(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        collect(self.workspace.path(), &mut paths);
        paths.sort();
        paths
    }
}

fn collect(dir: &Path, out: &mut Vec<PathBuf>) {
    for entry in std::fs::read_dir(dir).expect("failed to read dir") {
        let path = entry.expect("failed to read dir entry").path();
        out.push(path.clone());
        if path.is_dir() {
            collect(&path, out);
        }
    }
}
