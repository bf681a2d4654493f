//! # Init Command
//!
//! Implementation of `quill init`, which writes the commented default
//! configuration to `~/.quill/config.toml` (or the `--config` path).

use quill_core::config_loader::ConfigLoader;
use quill_core::error::ConfigError;

use crate::cli::commands::exit_codes::EXIT_ERROR;

/// Errors from `quill init`.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// A configuration file exists and `--force` was not given.
    #[error("configuration already exists at {path}. Use --force to overwrite.")]
    AlreadyInitialized {
        /// The existing file.
        path: String,
    },

    /// The configuration could not be written.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl InitError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        EXIT_ERROR
    }
}

/// The `quill init` command handler.
#[derive(Debug, Clone, Copy)]
pub struct InitCommand {
    /// Overwrite an existing configuration file.
    pub force: bool,
}

impl InitCommand {
    /// Create a new `InitCommand`.
    #[must_use]
    pub const fn new(force: bool) -> Self {
        Self { force }
    }

    /// Writes the default configuration and prints its path.
    ///
    /// # Errors
    ///
    /// Returns [`InitError::AlreadyInitialized`] if the file exists and
    /// `force` is not set, or [`InitError::Config`] if it cannot be written.
    pub fn run(&self, loader: &ConfigLoader) -> Result<(), InitError> {
        self.write(loader)?;
        println!("wrote {}", loader.config_path().display());
        Ok(())
    }

    /// Writes the default configuration.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub fn write(&self, loader: &ConfigLoader) -> Result<(), InitError> {
        if loader.exists() && !self.force {
            return Err(InitError::AlreadyInitialized {
                path: loader.config_path().display().to_string(),
            });
        }
        loader.write_default()?;
        tracing::info!(path = %loader.config_path().display(), "configuration written");
        Ok(())
    }
}
