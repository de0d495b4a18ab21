//! Shared helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Directory with the JSON fixtures.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Scratch home for one test: its own config file and library directory.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn library(&self) -> PathBuf {
        self.dir.path().join("library")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.config_path(), content).expect("Failed to write config");
    }

    /// Copy fixtures into the library directory.
    pub fn with_library_fixtures(self, names: &[&str]) -> Self {
        fs::create_dir_all(self.library()).unwrap();
        for name in names {
            fs::copy(fixture(name), self.library().join(name)).unwrap();
        }
        self
    }

    /// Command with isolated config and library.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_animascii"));
        cmd.env("ANIMASCII_CONFIG", self.config_path())
            .env("NO_COLOR", "1")
            .env_remove("ANIMASCII_LOG")
            .arg("--library")
            .arg(self.library());
        cmd
    }

    /// Run and capture (stdout, stderr, exit code).
    pub fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to execute animascii");

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let exit_code = output.status.code().unwrap_or(-1);

        (stdout, stderr, exit_code)
    }
}
