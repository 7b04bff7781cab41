//! Isolated test environment for LabMix CLI tests.
//!
//! Each `TestEnv` points the binary at its own temp data directory via the
//! `LABMIX_HOME` override, so tests never touch real state and can run in
//! parallel.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running a labmix CLI command
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

    /// Parse each stdout line as a JSON value (NDJSON mode)
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).expect("stdout line is not valid JSON"))
            .collect()
    }
}

/// Isolated data directory plus CLI runner
pub struct TestEnv {
    data_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            data_dir: tempfile::tempdir().expect("create temp data dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_labmix")),
        }
    }

    pub fn data_dir(&self) -> &Path {
        self.data_dir.path()
    }

    /// Path relative to the data directory
    pub fn data_path(&self, relative: &str) -> PathBuf {
        self.data_dir.path().join(relative)
    }

    /// Run labmix with the isolated data directory.
    ///
    /// Stdin is closed, so confirmation prompts take the non-interactive
    /// path; tests that register preparations must pass `--yes`.
    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = Command::new(&self.bin)
            .args(args)
            .env("LABMIX_HOME", self.data_dir.path())
            .output()
            .expect("failed to execute labmix");
        to_result(output)
    }

    /// Run and assert success, returning the result
    pub fn run_ok(&self, args: &[&str]) -> TestResult {
        let result = self.run(args);
        assert!(
            result.success,
            "labmix {:?} failed (exit {}):\n{}",
            args,
            result.exit_code,
            result.combined_output()
        );
        result
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
