//! Deterministic HD wallet: BIP-39 mnemonic to BIP-32 signing keys.
//!
//! One mnemonic yields two keys:
//!
//! - the **identity** key at `m/0'/1/0`, used to sign messages
//! - the **payment** key at `m/44'/60'/0'/0/0`, the first standard Ethereum
//!   account, used to sign transactions
//!
//! The seed is derived with an empty BIP-39 passphrase.
//!
//! # Example
//!
//! ```rust
//! use quill_crypto::signer::Signer;
//! use quill_crypto::wallet::Wallet;
//!
//! let wallet = Wallet::from_phrase(
//!     "abandon abandon abandon abandon abandon abandon \
//!      abandon abandon abandon abandon abandon about",
//! )
//! .expect("valid mnemonic");
//!
//! assert_eq!(
//!     wallet.payment().ethereum_address(),
//!     "0x9858effd232b4033e47d90003d41ec34ecaeda94"
//! );
//! ```

use bip32::{DerivationPath, XPrv};
use bip39::{Language, Mnemonic, Seed};
use rand::RngCore;
use tracing::debug;
use zeroize::Zeroizing;

use crate::keypair::Secp256k1KeyPair;
use crate::signer::Signer;
use quill_core::error::WalletError;

/// Derivation path of the identity key.
pub const IDENTITY_PATH: &str = "m/0'/1/0";

/// Derivation path of the payment key.
pub const PAYMENT_PATH: &str = "m/44'/60'/0'/0/0";

/// Entropy used for new mnemonics. 16 bytes gives 12 words.
pub const ENTROPY_LEN: usize = 16;

/// Where the identity and payment keys are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPaths {
    /// Identity key path.
    pub identity: String,
    /// Payment key path.
    pub payment: String,
}

impl Default for DerivationPaths {
    fn default() -> Self {
        Self {
            identity: IDENTITY_PATH.to_string(),
            payment: PAYMENT_PATH.to_string(),
        }
    }
}

/// A restored or freshly generated HD wallet.
///
/// The phrase is zeroized on drop and never shown by `Debug`.
pub struct Wallet {
    phrase: Zeroizing<String>,
    identity: Secp256k1KeyPair,
    payment: Secp256k1KeyPair,
}

impl Wallet {
    /// Restores a wallet from an English mnemonic using the default paths.
    ///
    /// Case and whitespace between words are normalized first.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::InvalidMnemonic`] for unknown words, a bad word
    /// count or a failed checksum.
    pub fn from_phrase(phrase: &str) -> Result<Self, WalletError> {
        Self::from_phrase_with_paths(phrase, &DerivationPaths::default())
    }

    /// Restores a wallet from an English mnemonic using custom paths.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::InvalidMnemonic`] for an invalid phrase and
    /// [`WalletError::InvalidPath`] for a path that does not parse.
    pub fn from_phrase_with_paths(
        phrase: &str,
        paths: &DerivationPaths,
    ) -> Result<Self, WalletError> {
        let normalized = normalize_phrase(phrase);
        let mnemonic = Mnemonic::from_phrase(&normalized, Language::English)
            .map_err(|e| WalletError::invalid_mnemonic(e.to_string()))?;
        Self::from_mnemonic(&mnemonic, paths)
    }

    /// Creates a new wallet with a random 12-word mnemonic.
    ///
    /// # Errors
    ///
    /// Returns an error only if key derivation fails.
    pub fn generate() -> Result<Self, WalletError> {
        Self::generate_with_paths(&DerivationPaths::default())
    }

    /// Creates a new wallet with a random 12-word mnemonic and custom paths.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::InvalidPath`] for a path that does not parse.
    pub fn generate_with_paths(paths: &DerivationPaths) -> Result<Self, WalletError> {
        let mut entropy = Zeroizing::new([0u8; ENTROPY_LEN]);
        rand::rngs::OsRng.fill_bytes(entropy.as_mut_slice());

        let mnemonic = Mnemonic::from_entropy(entropy.as_slice(), Language::English)
            .map_err(|e| WalletError::invalid_mnemonic(e.to_string()))?;
        Self::from_mnemonic(&mnemonic, paths)
    }

    fn from_mnemonic(mnemonic: &Mnemonic, paths: &DerivationPaths) -> Result<Self, WalletError> {
        let seed = Seed::new(mnemonic, "");

        let identity = derive_key(seed.as_bytes(), &paths.identity)?;
        let payment = derive_key(seed.as_bytes(), &paths.payment)?;

        debug!(
            identity = %identity.ethereum_address(),
            payment = %payment.ethereum_address(),
            "wallet keys derived"
        );

        Ok(Self {
            phrase: Zeroizing::new(mnemonic.phrase().to_string()),
            identity,
            payment,
        })
    }

    /// The normalized mnemonic phrase.
    #[must_use]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// The identity key.
    #[must_use]
    pub const fn identity(&self) -> &Secp256k1KeyPair {
        &self.identity
    }

    /// The payment key.
    #[must_use]
    pub const fn payment(&self) -> &Secp256k1KeyPair {
        &self.payment
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("phrase", &"[REDACTED]")
            .field("identity", &self.identity.ethereum_address())
            .field("payment", &self.payment.ethereum_address())
            .finish()
    }
}

/// Returns true if `phrase` is a valid English BIP-39 mnemonic.
///
/// ```rust
/// use quill_crypto::wallet::is_valid_phrase;
///
/// assert!(is_valid_phrase(
///     "abandon abandon abandon abandon abandon abandon \
///      abandon abandon abandon abandon abandon about"
/// ));
/// assert!(!is_valid_phrase("abandon abandon abandon"));
/// ```
#[must_use]
pub fn is_valid_phrase(phrase: &str) -> bool {
    Mnemonic::validate(&normalize_phrase(phrase), Language::English).is_ok()
}

/// Lowercases the phrase and joins its words with single spaces.
#[must_use]
pub fn normalize_phrase(phrase: &str) -> Zeroizing<String> {
    Zeroizing::new(
        phrase
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" "),
    )
}

/// Derives the secp256k1 key at `path` from a BIP-39 seed.
///
/// # Errors
///
/// Returns [`WalletError::InvalidPath`] if `path` does not parse and
/// [`WalletError::DerivationFailed`] if a child key is invalid.
pub fn derive_key(seed: &[u8], path: &str) -> Result<Secp256k1KeyPair, WalletError> {
    let derivation: DerivationPath = path.parse().map_err(|_| WalletError::invalid_path(path))?;
    let xprv = XPrv::derive_from_path(seed, &derivation)
        .map_err(|e| WalletError::derivation_failed(e.to_string()))?;

    Ok(Secp256k1KeyPair::from_signing_key(xprv.private_key().clone()))
}
