//! # Mnemonic Input
//!
//! Reads the wallet mnemonic for commands that need a key.
//!
//! 1. **Environment variable**: the variable named by `[wallet] mnemonic_env`
//!    (default `QUILL_MNEMONIC`), for scripts and CI
//! 2. **Interactive prompt**: hidden input via `rpassword`
//!
//! The phrase is held in [`Zeroizing`] memory and the variable is removed
//! from the process environment once read, so child processes do not
//! inherit it. On Linux `/proc/<pid>/environ` still shows the initial
//! environment; prefer the prompt on shared machines.
//!
//! ```bash
//! QUILL_MNEMONIC="abandon ... about" quill ethereum address
//! ```

use std::io::Write;

use quill_core::config::WalletConfig;
use quill_core::error::WalletError;
use quill_crypto::wallet::{DerivationPaths, Wallet};
use zeroize::Zeroizing;

/// Errors raised while obtaining the mnemonic or opening the wallet.
#[derive(Debug, thiserror::Error)]
pub enum PhraseError {
    /// The environment variable was set but empty.
    #[error("{var} is set but empty")]
    Empty {
        /// The variable that was read.
        var: String,
    },

    /// The environment variable was set to a value that is not UTF-8.
    #[error("{var} is not valid UTF-8")]
    NotUnicode {
        /// The variable that was read.
        var: String,
    },

    /// Nothing was entered at the prompt.
    #[error("mnemonic input cancelled")]
    Cancelled,

    /// Reading from the terminal failed.
    #[error("failed to read mnemonic: {0}")]
    Io(#[from] std::io::Error),

    /// The phrase or a derivation path is invalid.
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

impl PhraseError {
    /// Whether the failure is a rejected mnemonic rather than an I/O or
    /// setup problem.
    #[must_use]
    pub const fn is_invalid_mnemonic(&self) -> bool {
        matches!(self, Self::Wallet(WalletError::InvalidMnemonic { .. }))
    }
}

/// Reads the mnemonic from `env_var`, falling back to a hidden prompt.
///
/// # Errors
///
/// Returns [`PhraseError::Empty`] if the variable is set but empty,
/// [`PhraseError::NotUnicode`] if it is not UTF-8, and
/// [`PhraseError::Cancelled`] or [`PhraseError::Io`] if the prompt fails.
pub fn read_phrase(env_var: &str) -> Result<Zeroizing<String>, PhraseError> {
    match std::env::var(env_var) {
        Ok(value) => {
            let value = Zeroizing::new(value);
            clear_env_var(env_var);
            if value.trim().is_empty() {
                return Err(PhraseError::Empty {
                    var: env_var.to_string(),
                });
            }
            tracing::debug!(var = env_var, "mnemonic read from environment");
            return Ok(value);
        }
        Err(std::env::VarError::NotUnicode(raw)) => {
            drop(Zeroizing::new(raw.into_encoded_bytes()));
            clear_env_var(env_var);
            return Err(PhraseError::NotUnicode {
                var: env_var.to_string(),
            });
        }
        Err(std::env::VarError::NotPresent) => {}
    }

    eprint!("Enter mnemonic: ");
    std::io::stderr().flush()?;

    let phrase = rpassword::read_password().map(Zeroizing::new).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            PhraseError::Cancelled
        } else {
            PhraseError::Io(e)
        }
    })?;

    if phrase.trim().is_empty() {
        return Err(PhraseError::Cancelled);
    }
    Ok(phrase)
}

/// Reads the mnemonic and derives the identity and payment keys at the
/// configured paths.
///
/// # Errors
///
/// Any [`read_phrase`] error, or [`PhraseError::Wallet`] for an invalid
/// mnemonic or derivation path.
pub fn open_wallet(config: &WalletConfig) -> Result<Wallet, PhraseError> {
    let phrase = read_phrase(&config.mnemonic_env)?;
    Ok(Wallet::from_phrase_with_paths(&phrase, &derivation_paths(config))?)
}

/// The derivation paths from the `[wallet]` config section.
#[must_use]
pub fn derivation_paths(config: &WalletConfig) -> DerivationPaths {
    DerivationPaths {
        identity: config.identity_path.clone(),
        payment: config.payment_path.clone(),
    }
}

fn clear_env_var(var: &str) {
    // Read before any threads are spawned.
    std::env::remove_var(var);
}
