//! # Ethereum Address Command
//!
//! Implementation of `quill ethereum address`.

use quill_core::Config;
use quill_crypto::signer::Signer;

use crate::cli::commands::exit_codes::{EXIT_ERROR, EXIT_REFUSED};
use crate::cli::phrase::{open_wallet, PhraseError};

/// Errors from `quill ethereum address`.
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    /// The wallet could not be opened.
    #[error(transparent)]
    Wallet(#[from] PhraseError),
}

impl AddressError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Wallet(e) if e.is_invalid_mnemonic() => EXIT_REFUSED,
            Self::Wallet(_) => EXIT_ERROR,
        }
    }
}

/// The `quill ethereum address` command handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressCommand;

impl AddressCommand {
    /// Prints the payment address.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError`] if the mnemonic cannot be read or is invalid.
    pub fn run(&self, config: &Config) -> Result<(), AddressError> {
        let wallet = open_wallet(&config.wallet)?;
        println!("{}", Self::address_of(wallet.payment()));
        Ok(())
    }

    /// The address printed for `signer`.
    #[must_use]
    pub fn address_of(signer: &dyn Signer) -> String {
        signer.ethereum_address()
    }
}
