//! # Mnemonic Commands
//!
//! `quill mnemonic generate` prints a fresh 12-word English mnemonic and
//! `quill mnemonic validate` checks the words and checksum of an existing one.

use quill_core::error::WalletError;
use quill_core::Config;
use quill_crypto::signer::Signer;
use quill_crypto::wallet::{is_valid_phrase, normalize_phrase, Wallet};
use zeroize::Zeroizing;

use crate::cli::commands::exit_codes::{EXIT_ERROR, EXIT_REFUSED};
use crate::cli::phrase::derivation_paths;

/// Errors from the mnemonic commands.
#[derive(Debug, thiserror::Error)]
pub enum MnemonicError {
    /// The mnemonic failed validation.
    #[error("invalid mnemonic")]
    Invalid,

    /// A wallet could not be generated.
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

impl MnemonicError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Invalid => EXIT_REFUSED,
            Self::Wallet(_) => EXIT_ERROR,
        }
    }
}

/// The `quill mnemonic generate` command handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateCommand;

impl GenerateCommand {
    /// Prints a new mnemonic on stdout and its payment address on stderr.
    ///
    /// # Errors
    ///
    /// Returns [`MnemonicError::Wallet`] if the configured derivation paths
    /// do not parse.
    pub fn run(&self, config: &Config) -> Result<(), MnemonicError> {
        let wallet = Self::generate(config)?;
        println!("{}", wallet.phrase());
        eprintln!("payment address: {}", wallet.payment().ethereum_address());
        Ok(())
    }

    /// Generates a wallet at the configured derivation paths.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub fn generate(config: &Config) -> Result<Wallet, MnemonicError> {
        Ok(Wallet::generate_with_paths(&derivation_paths(&config.wallet))?)
    }
}

/// The `quill mnemonic validate` command handler.
#[derive(Clone)]
pub struct ValidateCommand {
    words: Zeroizing<String>,
}

impl std::fmt::Debug for ValidateCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidateCommand")
            .field("words", &"[REDACTED]")
            .finish()
    }
}

impl ValidateCommand {
    /// Create a new `ValidateCommand` from the word arguments.
    #[must_use]
    pub fn new(words: &[String]) -> Self {
        Self {
            words: normalize_phrase(&words.join(" ")),
        }
    }

    /// Prints `valid` for a valid mnemonic.
    ///
    /// # Errors
    ///
    /// Returns [`MnemonicError::Invalid`] otherwise.
    pub fn run(&self) -> Result<(), MnemonicError> {
        self.validate()?;
        println!("valid");
        Ok(())
    }

    /// Checks the words and checksum.
    ///
    /// # Errors
    ///
    /// Returns [`MnemonicError::Invalid`] for unknown words, a bad word count
    /// or a failed checksum.
    pub fn validate(&self) -> Result<(), MnemonicError> {
        if is_valid_phrase(&self.words) {
            Ok(())
        } else {
            Err(MnemonicError::Invalid)
        }
    }
}
