//! Shared test infrastructure for CLI integration tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A staged tree plus an apps document, run through the built binary.
pub struct TestFixture {
    temp_dir: TempDir,
}

/// Result of one `primecmd` invocation.
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap_or_else(|err| {
            panic!("stdout is not JSON ({err}):\n{}", self.stdout);
        })
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create fixture dir");
        fs::create_dir(temp_dir.path().join("prime")).expect("create staged root");
        Self { temp_dir }
    }

    pub fn root(&self) -> PathBuf {
        self.temp_dir
            .path()
            .join("prime")
            .canonicalize()
            .expect("canonical staged root")
    }

    pub fn write(&self, rel: &str, contents: &str, mode: u32) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directory");
        }
        fs::write(&path, contents).expect("write staged file");
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).expect("chmod staged file");
        path
    }

    pub fn executable(&self, rel: &str) -> PathBuf {
        self.write(rel, "#!/bin/sh\nexit 0\n", 0o755)
    }

    pub fn apps(&self, json: &str) -> PathBuf {
        let path = self.temp_dir.path().join("apps.json");
        fs::write(&path, json).expect("write apps.json");
        path
    }

    pub fn config(&self, json: &str) -> PathBuf {
        let path = self.temp_dir.path().join("config.json");
        fs::write(&path, json).expect("write config.json");
        path
    }

    /// Run `primecmd prime` against this fixture with extra arguments.
    pub fn prime(&self, apps: &Path, extra: &[&str]) -> TestResult {
        let mut args = vec![
            "prime".to_string(),
            "--root".to_string(),
            self.root().display().to_string(),
            "--apps".to_string(),
            apps.display().to_string(),
        ];
        args.extend(extra.iter().map(ToString::to_string));
        run_primecmd(&args)
    }
}

pub fn run_primecmd(args: &[String]) -> TestResult {
    let output = Command::new(env!("CARGO_BIN_EXE_primecmd"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn primecmd");
    TestResult {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
