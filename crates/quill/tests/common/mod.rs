//! # Test Utilities for the `quill` Binary
//!
//! - [`load_fixture`] - Load a JSON fixture from the workspace `tests/fixtures/`
//! - [`temp_data_dir`] - Create an isolated temporary directory
//! - [`Quill`] - Run the compiled binary with an isolated home and config

#![allow(dead_code)]
#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// The mnemonic used by the transaction fixtures.
pub const ABANDON: &str = "abandon abandon abandon abandon abandon abandon \
                           abandon abandon abandon abandon abandon about";

/// Payment address of [`ABANDON`] at `m/44'/60'/0'/0/0`.
pub const ABANDON_PAYMENT_ADDRESS: &str = "0x9858effd232b4033e47d90003d41ec34ecaeda94";

/// Error type for fixture loading operations.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// The fixture file could not be found.
    #[error("Fixture not found: {0}")]
    NotFound(String),

    /// The fixture file could not be read.
    #[error("Failed to read fixture: {0}")]
    ReadError(#[from] std::io::Error),

    /// The fixture JSON could not be parsed.
    #[error("Failed to parse fixture JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Load a JSON fixture file, relative to `tests/fixtures/`.
pub fn load_fixture(path: &str) -> Result<serde_json::Value, FixtureError> {
    let fixture_path = fixtures_dir().join(path);

    if !fixture_path.exists() {
        return Err(FixtureError::NotFound(fixture_path.display().to_string()));
    }

    let content = std::fs::read_to_string(&fixture_path)?;
    Ok(serde_json::from_str(&content)?)
}

/// The workspace root's `tests/fixtures` directory.
fn fixtures_dir() -> PathBuf {
    // crates/quill -> crates -> workspace
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .map_or_else(
            || PathBuf::from("tests/fixtures"),
            |p| p.join("tests").join("fixtures"),
        )
}

/// Create a temporary directory, removed when the returned `TempDir` drops.
#[must_use]
pub fn temp_data_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("quill-test-")
        .tempdir()
        .expect("Failed to create temporary directory for test")
}

/// Runs the `quill` binary with `HOME` and `--config` pointed into a
/// temporary directory, so the developer's own files are never touched.
pub struct Quill {
    home: TempDir,
    mnemonic: Option<String>,
}

impl Quill {
    /// A runner with no mnemonic in the environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            home: temp_data_dir(),
            mnemonic: None,
        }
    }

    /// A runner that passes `phrase` through `QUILL_MNEMONIC`.
    #[must_use]
    pub fn with_mnemonic(phrase: &str) -> Self {
        Self {
            mnemonic: Some(phrase.to_string()),
            ..Self::new()
        }
    }

    /// The temporary home directory.
    #[must_use]
    pub fn home(&self) -> &Path {
        self.home.path()
    }

    /// The config file passed with `--config`.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.home.path().join("config.toml")
    }

    /// Writes the config file.
    pub fn write_config(&self, toml: &str) {
        std::fs::write(self.config_path(), toml).expect("write config");
    }

    /// Runs `quill --config <tmp>/config.toml <args>`.
    #[must_use]
    pub fn run(&self, args: &[&str]) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_quill"));
        command
            .arg("--config")
            .arg(self.config_path())
            .args(args)
            .env("HOME", self.home.path())
            .env_remove("RUST_LOG")
            .env_remove("QUILL_MNEMONIC");
        if let Some(phrase) = &self.mnemonic {
            command.env("QUILL_MNEMONIC", phrase);
        }
        command.output().expect("run quill")
    }
}

/// Stdout as a trimmed string.
#[must_use]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Stderr as a string.
#[must_use]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
