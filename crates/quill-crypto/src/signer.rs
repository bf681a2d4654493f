//! The signing capability consumed by transaction and message signing.
//!
//! [`Signer`] is the seam between key management and everything that needs a
//! signature. Callers receive a signer as a parameter rather than reaching for
//! a process-wide wallet, so tests can pass any key (or a mock).
//!
//! # Signature Format
//!
//! Every signature is 65 bytes: `r (32) || s (32) || recovery_id (1)` with a
//! raw recovery id of 0 or 1. Chain-specific `v` values are computed by the
//! caller:
//!
//! - Legacy transactions: `v = recovery_id + 27`
//! - EIP-155: `v = recovery_id + 35 + chain_id * 2`
//!
//! # Example
//!
//! ```rust
//! use quill_crypto::keypair::Secp256k1KeyPair;
//! use quill_crypto::signer::Signer;
//!
//! let signer = Secp256k1KeyPair::generate();
//!
//! let signature = signer.sign(b"payload").expect("signing failed");
//! assert_eq!(signature.len(), 65);
//!
//! let hex_signature = signer.sign_message("hello").expect("signing failed");
//! assert_eq!(hex_signature.len(), 130);
//! ```

use crate::hash::keccak256;
use crate::keypair::Secp256k1KeyPair;
use crate::keys::strip_hex_prefix;
use quill_core::error::SignError;

/// A secp256k1 key that can produce recoverable signatures.
///
/// Implementations must be `Send + Sync`; signing is a pure function of the
/// key and the digest.
pub trait Signer: Send + Sync {
    /// Signs a 32-byte digest as given.
    ///
    /// Returns `r || s || recovery_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot sign.
    fn sign_prehash(&self, digest: &[u8; 32]) -> Result<Vec<u8>, SignError>;

    /// The signer's Ethereum address, lowercase `0x`-prefixed hex.
    fn ethereum_address(&self) -> String;

    /// Signs the Keccak-256 digest of `payload`.
    ///
    /// # Errors
    ///
    /// Same as [`sign_prehash`](Self::sign_prehash).
    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, SignError> {
        self.sign_prehash(&keccak256(payload))
    }

    /// Signs the Keccak-256 digest of a UTF-8 message and returns 130 hex
    /// characters.
    ///
    /// No Ethereum message prefix is applied.
    ///
    /// # Errors
    ///
    /// Same as [`sign_prehash`](Self::sign_prehash).
    fn sign_message(&self, message: &str) -> Result<String, SignError> {
        self.sign(message.as_bytes()).map(hex::encode)
    }

    /// Hex-decodes `data` (optional `0x` prefix), signs the Keccak-256 digest
    /// of the bytes and returns 130 hex characters.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidHex`] if `data` is not valid hex.
    fn sign_hex(&self, data: &str) -> Result<String, SignError> {
        let bytes = hex::decode(strip_hex_prefix(data.trim()))
            .map_err(|e| SignError::invalid_hex(e.to_string()))?;
        self.sign(&bytes).map(hex::encode)
    }

    /// Signs a 32-byte digest given as hex (optional `0x` prefix) without
    /// hashing it again, returning 130 hex characters.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidHex`] for malformed hex and
    /// [`SignError::InvalidHash`] if it does not decode to 32 bytes.
    fn sign_hash(&self, hash: &str) -> Result<String, SignError> {
        let bytes = hex::decode(strip_hex_prefix(hash.trim()))
            .map_err(|e| SignError::invalid_hex(e.to_string()))?;
        let digest: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            SignError::invalid_hash(format!("expected 32 bytes, got {}", bytes.len()))
        })?;
        self.sign_prehash(&digest).map(hex::encode)
    }
}

impl Signer for Secp256k1KeyPair {
    fn sign_prehash(&self, digest: &[u8; 32]) -> Result<Vec<u8>, SignError> {
        let signature = self.sign_digest(digest)?;
        Ok(signature.to_recoverable_bytes().to_vec())
    }

    fn ethereum_address(&self) -> String {
        self.public_key().ethereum_address_hex()
    }
}
