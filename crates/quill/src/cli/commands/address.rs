//! # Address Command
//!
//! Implementation of `quill address normalize`.

use quill_chain::address::EthereumAddress;

use crate::cli::commands::exit_codes::EXIT_REFUSED;

/// Errors from `quill address normalize`.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// The input is not a recognized address.
    #[error("not an Ethereum address: {raw}")]
    Unrecognized {
        /// The rejected input.
        raw: String,
    },
}

impl NormalizeError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        EXIT_REFUSED
    }
}

/// The `quill address normalize` command handler.
#[derive(Debug, Clone)]
pub struct NormalizeCommand {
    /// The address as pasted or scanned.
    pub raw: String,
}

impl NormalizeCommand {
    /// Create a new `NormalizeCommand`.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Prints the normalized address.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Unrecognized`] if the input is not an address.
    pub fn run(&self) -> Result<(), NormalizeError> {
        println!("{}", self.normalize()?);
        Ok(())
    }

    /// Normalizes the input.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Unrecognized`] if the input is not an address.
    pub fn normalize(&self) -> Result<EthereumAddress, NormalizeError> {
        EthereumAddress::parse(&self.raw).ok_or_else(|| NormalizeError::Unrecognized {
            raw: self.raw.clone(),
        })
    }
}
