//! # quill-crypto
//!
//! Keys and signatures for the quill wallet core.
//!
//! ## Modules
//!
//! - [`keys`] - Zeroizing secret key bytes
//! - [`keypair`] - secp256k1 key pairs, public keys and recoverable signatures
//! - [`signer`] - The [`Signer`] capability used by transaction signing
//! - [`wallet`] - BIP-39 mnemonics and BIP-32 derivation of the identity and
//!   payment keys
//! - [`hash`] - Keccak-256
//!
//! ## Security
//!
//! - No unsafe code
//! - Secret material is zeroized on drop and redacted in `Debug` output
//! - Signatures are RFC 6979 deterministic with low `s`

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod hash;
pub mod keypair;
pub mod keys;
pub mod signer;
pub mod wallet;

pub use hash::{keccak256, sha3_hex};
pub use keypair::{
    Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature, RECOVERABLE_SIGNATURE_LEN,
};
pub use keys::{SecretKey, SECRET_KEY_LEN};
pub use signer::Signer;
pub use wallet::{is_valid_phrase, DerivationPaths, Wallet, IDENTITY_PATH, PAYMENT_PATH};

pub use quill_core::error::{SignError, WalletError};
