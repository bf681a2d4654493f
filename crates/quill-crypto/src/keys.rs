//! Secret key material.
//!
//! [`SecretKey`] holds 32 raw bytes of a secp256k1 private key. It is
//! zeroized on drop, never printed and compared in constant time. It does
//! not implement `Clone`; keys are moved, not copied.

use quill_core::error::SignError;
use rand::RngCore;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// The length of a secret key in bytes.
pub const SECRET_KEY_LEN: usize = 32;

/// A 32-byte secret key with automatic zeroization.
///
/// # Example
///
/// ```
/// use quill_crypto::keys::SecretKey;
///
/// let key = SecretKey::from_hex(
///     "4646464646464646464646464646464646464646464646464646464646464646",
/// )
/// .expect("valid hex key");
/// assert_eq!(format!("{key:?}"), "SecretKey([REDACTED])");
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: [u8; SECRET_KEY_LEN],
}

impl SecretKey {
    /// Wraps raw key bytes. The caller should zeroize its own copy.
    #[must_use]
    pub const fn new(bytes: [u8; SECRET_KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Generates a random key from the operating system RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; SECRET_KEY_LEN];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Copies a key out of a slice.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidKey`] if the slice is not exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignError> {
        let bytes: [u8; SECRET_KEY_LEN] = bytes.try_into().map_err(|_| SignError::InvalidKey)?;
        Ok(Self { bytes })
    }

    /// Parses a key from 64 hex characters, with or without a `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidHex`] for malformed hex and
    /// [`SignError::InvalidKey`] for the wrong length.
    pub fn from_hex(hex_key: &str) -> Result<Self, SignError> {
        let digits = strip_hex_prefix(hex_key.trim());
        let decoded = Zeroizing::new(
            hex::decode(digits).map_err(|e| SignError::invalid_hex(e.to_string()))?,
        );
        Self::from_slice(&decoded)
    }

    /// Exposes the raw bytes for a cryptographic operation.
    ///
    /// The returned reference must not be stored or copied.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SECRET_KEY_LEN] {
        &self.bytes
    }

    /// Converts into a `k256` signing key.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidKey`] if the bytes are zero or not below
    /// the curve order.
    pub fn to_signing_key(&self) -> Result<k256::ecdsa::SigningKey, SignError> {
        k256::ecdsa::SigningKey::from_bytes((&self.bytes).into()).map_err(|_| SignError::InvalidKey)
    }
}

pub(crate) fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.ct_eq(&other.bytes).into()
    }
}

impl Eq for SecretKey {}

impl From<[u8; SECRET_KEY_LEN]> for SecretKey {
    fn from(bytes: [u8; SECRET_KEY_LEN]) -> Self {
        Self::new(bytes)
    }
}
