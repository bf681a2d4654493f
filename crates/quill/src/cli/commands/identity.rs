//! # Identity Commands
//!
//! `quill identity address` and `quill identity sign`, using the identity
//! key. Messages are hashed with Keccak-256 and signed without an Ethereum
//! message prefix.

use quill_core::error::SignError;
use quill_core::Config;
use quill_crypto::signer::Signer;

use crate::cli::commands::exit_codes::{EXIT_ERROR, EXIT_REFUSED};
use crate::cli::phrase::{open_wallet, PhraseError};

/// Errors from the identity commands.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The wallet could not be opened.
    #[error(transparent)]
    Wallet(#[from] PhraseError),

    /// The message could not be signed.
    #[error("signing failed: {0}")]
    Sign(#[from] SignError),
}

impl IdentityError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Wallet(e) if e.is_invalid_mnemonic() => EXIT_REFUSED,
            Self::Sign(SignError::InvalidHex { .. }) => EXIT_REFUSED,
            _ => EXIT_ERROR,
        }
    }
}

/// The `quill identity address` command handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityAddressCommand;

impl IdentityAddressCommand {
    /// Prints the identity address.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Wallet`] if the mnemonic cannot be read.
    pub fn run(&self, config: &Config) -> Result<(), IdentityError> {
        let wallet = open_wallet(&config.wallet)?;
        println!("{}", wallet.identity().ethereum_address());
        Ok(())
    }
}

/// The `quill identity sign` command handler.
#[derive(Debug, Clone)]
pub struct IdentitySignCommand {
    /// The message, UTF-8 text or hex bytes.
    pub message: String,
    /// Whether `message` is hex.
    pub hex: bool,
}

impl IdentitySignCommand {
    /// Create a new `IdentitySignCommand`.
    #[must_use]
    pub fn new(message: impl Into<String>, hex: bool) -> Self {
        Self {
            message: message.into(),
            hex,
        }
    }

    /// Signs with the identity key and prints 130 hex characters.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] if the wallet cannot be opened or the
    /// message is not valid hex in `--hex` mode.
    pub fn run(&self, config: &Config) -> Result<(), IdentityError> {
        let wallet = open_wallet(&config.wallet)?;
        println!("{}", self.sign_with(wallet.identity())?);
        Ok(())
    }

    /// Signs with `signer`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Sign`] on failure.
    pub fn sign_with(&self, signer: &dyn Signer) -> Result<String, IdentityError> {
        let signature = if self.hex {
            signer.sign_hex(&self.message)?
        } else {
            signer.sign_message(&self.message)?
        };
        Ok(signature)
    }
}
