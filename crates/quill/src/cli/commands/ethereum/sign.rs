//! # Ethereum Sign Command
//!
//! Implementation of `quill ethereum sign`.
//!
//! Signs an RLP-encoded unsigned transaction with the payment key and prints
//! the signed transaction as hex, or as JSON together with its hash, chain
//! id and signature values.

use quill_chain::ethereum::{try_sign_transaction, SignedTransaction};
use quill_core::error::TransactionError;
use quill_core::Config;
use quill_crypto::signer::Signer;

use crate::cli::args::OutputFormat;
use crate::cli::commands::exit_codes::{EXIT_ERROR, EXIT_REFUSED};
use crate::cli::phrase::{open_wallet, PhraseError};

// ============================================================================
// SignCommandError
// ============================================================================

/// Errors from `quill ethereum sign`.
#[derive(Debug, thiserror::Error)]
pub enum SignCommandError {
    /// The wallet could not be opened.
    #[error(transparent)]
    Wallet(#[from] PhraseError),

    /// The transaction was refused.
    #[error("refusing to sign: {0}")]
    Refused(#[from] TransactionError),

    /// JSON output could not be produced.
    #[error("failed to format output: {0}")]
    Output(#[from] serde_json::Error),
}

impl SignCommandError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Refused(_) => EXIT_REFUSED,
            Self::Wallet(e) if e.is_invalid_mnemonic() => EXIT_REFUSED,
            _ => EXIT_ERROR,
        }
    }
}

// ============================================================================
// SignCommand
// ============================================================================

/// The `quill ethereum sign` command handler.
///
/// ```no_run
/// use quill::cli::args::OutputFormat;
/// use quill::cli::commands::ethereum::SignCommand;
/// use quill_core::Config;
///
/// let cmd = SignCommand::new("0xc6808080808080", OutputFormat::Hex);
/// if let Err(e) = cmd.run(&Config::default()) {
///     eprintln!("Error: {e}");
///     std::process::exit(e.exit_code());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SignCommand {
    /// The hex-encoded unsigned transaction.
    pub transaction: String,
    /// The output format.
    pub format: OutputFormat,
}

impl SignCommand {
    /// Create a new `SignCommand`.
    #[must_use]
    pub fn new(transaction: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            transaction: transaction.into(),
            format,
        }
    }

    /// Opens the wallet, signs with the payment key and prints the result.
    ///
    /// # Errors
    ///
    /// Returns [`SignCommandError`] if the wallet cannot be opened or the
    /// transaction is refused.
    pub fn run(&self, config: &Config) -> Result<(), SignCommandError> {
        let wallet = open_wallet(&config.wallet)?;
        println!("{}", self.render(wallet.payment())?);
        Ok(())
    }

    /// Signs with `signer` and renders the output in the chosen format.
    ///
    /// # Errors
    ///
    /// Returns [`SignCommandError::Refused`] if the transaction cannot be
    /// signed.
    pub fn render(&self, signer: &dyn Signer) -> Result<String, SignCommandError> {
        let output = self.sign_with(signer)?;
        match self.format {
            OutputFormat::Hex => Ok(output.transaction.raw),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&output)?),
        }
    }

    /// Signs with `signer`.
    ///
    /// # Errors
    ///
    /// Returns [`SignCommandError::Refused`] if the transaction cannot be
    /// signed.
    pub fn sign_with(&self, signer: &dyn Signer) -> Result<SignOutput, SignCommandError> {
        let transaction = try_sign_transaction(signer, &self.transaction)?;
        Ok(SignOutput {
            signer: signer.ethereum_address(),
            transaction,
        })
    }
}

// ============================================================================
// SignOutput
// ============================================================================

/// Output from a successful signing operation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SignOutput {
    /// The payment address that signed.
    pub signer: String,
    /// The signed transaction and its signature values.
    #[serde(flatten)]
    pub transaction: SignedTransaction,
}
