//! secp256k1 key pairs, public keys and recoverable signatures.
//!
//! # Example
//!
//! ```rust
//! use quill_crypto::hash::keccak256;
//! use quill_crypto::keypair::Secp256k1KeyPair;
//!
//! let keypair = Secp256k1KeyPair::generate();
//! let digest = keccak256(b"transfer 1 eth");
//!
//! let signature = keypair.sign_digest(&digest).expect("signing failed");
//! assert!(keypair.verify(&digest, &signature));
//! assert_eq!(signature.to_recoverable_bytes().len(), 65);
//! ```

use k256::ecdsa::{RecoveryId, Signature as K256Signature, SigningKey, VerifyingKey};

use crate::hash::keccak256;
use crate::keys::SecretKey;
use quill_core::error::SignError;

/// Length of an `r || s || recovery_id` signature.
pub const RECOVERABLE_SIGNATURE_LEN: usize = 65;

// ============================================================================
// Secp256k1 Public Key
// ============================================================================

/// A secp256k1 public key in compressed (33 byte) and uncompressed (65 byte)
/// form.
#[derive(Clone, PartialEq, Eq)]
pub struct Secp256k1PublicKey {
    compressed: [u8; 33],
    uncompressed: [u8; 65],
}

impl Secp256k1PublicKey {
    fn from_verifying_key(verifying: &VerifyingKey) -> Self {
        let mut uncompressed = [0u8; 65];
        uncompressed.copy_from_slice(verifying.to_encoded_point(false).as_bytes());

        let mut compressed = [0u8; 33];
        compressed.copy_from_slice(verifying.to_encoded_point(true).as_bytes());

        Self {
            compressed,
            uncompressed,
        }
    }

    /// `0x02`/`0x03` prefix followed by X.
    #[must_use]
    pub const fn compressed(&self) -> &[u8; 33] {
        &self.compressed
    }

    /// `0x04` prefix followed by X and Y.
    #[must_use]
    pub const fn uncompressed(&self) -> &[u8; 65] {
        &self.uncompressed
    }

    /// The last 20 bytes of Keccak-256 over the uncompressed key without its
    /// `0x04` tag.
    #[must_use]
    pub fn ethereum_address(&self) -> [u8; 20] {
        let (_, xy) = self.uncompressed.split_at(1);
        let hash = keccak256(xy);
        let (_, tail) = hash.split_at(12);

        let mut address = [0u8; 20];
        address.copy_from_slice(tail);
        address
    }

    /// The Ethereum address as lowercase `0x`-prefixed hex.
    ///
    /// ```rust
    /// use quill_crypto::keys::SecretKey;
    /// use quill_crypto::keypair::Secp256k1KeyPair;
    ///
    /// let secret = SecretKey::from_hex(
    ///     "fad9c8855b740a0b7ed4c221dbad0f33a83a49cad6b3fe8d5817ac83d38b6a19",
    /// )
    /// .expect("valid key");
    /// let keypair = Secp256k1KeyPair::from_secret_key(&secret).expect("valid key");
    ///
    /// assert_eq!(
    ///     keypair.public_key().ethereum_address_hex(),
    ///     "0x96216849c49358b10257cb55b28ea603c874b05e"
    /// );
    /// ```
    #[must_use]
    pub fn ethereum_address_hex(&self) -> String {
        format!("0x{}", hex::encode(self.ethereum_address()))
    }
}

impl AsRef<[u8]> for Secp256k1PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.compressed
    }
}

impl std::fmt::Debug for Secp256k1PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secp256k1PublicKey({})", hex::encode(self.compressed))
    }
}

// ============================================================================
// Secp256k1 Signature
// ============================================================================

/// An ECDSA signature with its recovery id.
///
/// `s` is always in the lower half of the curve order.
#[derive(Clone, PartialEq, Eq)]
pub struct Secp256k1Signature {
    r: [u8; 32],
    s: [u8; 32],
    recovery_id: u8,
}

impl Secp256k1Signature {
    /// Splits a 65-byte `r || s || recovery_id` signature.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::SignatureFailed`] if `bytes` is not 65 bytes long
    /// or the recovery id is not 0 or 1.
    pub fn from_recoverable_bytes(bytes: &[u8]) -> Result<Self, SignError> {
        let bytes: &[u8; RECOVERABLE_SIGNATURE_LEN] = bytes.try_into().map_err(|_| {
            SignError::signature_failed(format!(
                "expected {RECOVERABLE_SIGNATURE_LEN} signature bytes, got {}",
                bytes.len()
            ))
        })?;

        let (r_part, rest) = bytes.split_at(32);
        let (s_part, v_part) = rest.split_at(32);

        let recovery_id = match v_part {
            [v @ (0 | 1)] => *v,
            _ => return Err(SignError::signature_failed("recovery id must be 0 or 1")),
        };

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(r_part);
        s.copy_from_slice(s_part);

        Ok(Self { r, s, recovery_id })
    }

    /// The recovery id, 0 or 1.
    #[must_use]
    pub const fn recovery_id(&self) -> u8 {
        self.recovery_id
    }

    /// The `r` component.
    #[must_use]
    pub const fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// The `s` component.
    #[must_use]
    pub const fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// `r || s || recovery_id`.
    #[must_use]
    pub fn to_recoverable_bytes(&self) -> [u8; RECOVERABLE_SIGNATURE_LEN] {
        let mut result = [0u8; RECOVERABLE_SIGNATURE_LEN];
        let (r_out, rest) = result.split_at_mut(32);
        let (s_out, v_out) = rest.split_at_mut(32);
        r_out.copy_from_slice(&self.r);
        s_out.copy_from_slice(&self.s);
        v_out.fill(self.recovery_id);
        result
    }

    /// Recovers the signer's public key from a 32-byte digest.
    ///
    /// Returns `None` if the signature does not correspond to any key.
    #[must_use]
    pub fn recover(&self, digest: &[u8; 32]) -> Option<Secp256k1PublicKey> {
        let mut rs = [0u8; 64];
        let (r_out, s_out) = rs.split_at_mut(32);
        r_out.copy_from_slice(&self.r);
        s_out.copy_from_slice(&self.s);

        let signature = K256Signature::from_slice(&rs).ok()?;
        let recovery_id = RecoveryId::from_byte(self.recovery_id)?;
        let verifying = VerifyingKey::recover_from_prehash(digest, &signature, recovery_id).ok()?;

        Some(Secp256k1PublicKey::from_verifying_key(&verifying))
    }
}

impl std::fmt::Debug for Secp256k1Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Secp256k1Signature(r={}, s={}, v={})",
            hex::encode(self.r),
            hex::encode(self.s),
            self.recovery_id
        )
    }
}

// ============================================================================
// Secp256k1 Key Pair
// ============================================================================

/// A secp256k1 signing key with its cached public key.
///
/// Signatures are RFC 6979 deterministic: the same key and digest always
/// produce the same signature.
#[allow(clippy::struct_field_names)]
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
    public_key: Secp256k1PublicKey,
}

impl Secp256k1KeyPair {
    /// Generates a random key pair.
    #[must_use]
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::random(&mut rand::rngs::OsRng))
    }

    /// Wraps an existing `k256` signing key.
    #[must_use]
    pub fn from_signing_key(signing_key: SigningKey) -> Self {
        let verifying_key = *signing_key.verifying_key();
        let public_key = Secp256k1PublicKey::from_verifying_key(&verifying_key);

        Self {
            signing_key,
            verifying_key,
            public_key,
        }
    }

    /// Builds a key pair from a [`SecretKey`].
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidKey`] if the secret is not a valid scalar.
    pub fn from_secret_key(secret: &SecretKey) -> Result<Self, SignError> {
        secret.to_signing_key().map(Self::from_signing_key)
    }

    /// The public half of the pair.
    #[must_use]
    pub const fn public_key(&self) -> &Secp256k1PublicKey {
        &self.public_key
    }

    /// Signs a 32-byte digest. The digest is signed as given, not hashed again.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::SignatureFailed`] if the underlying signer fails.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Result<Secp256k1Signature, SignError> {
        let (signature, recovery_id): (K256Signature, RecoveryId) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|_| SignError::signature_failed("secp256k1 signing failed"))?;

        // Flip the recovery id when s had to be moved to the lower half.
        let normalized = signature.normalize_s();
        let recovery_id = if normalized.is_some() {
            recovery_id.to_byte() ^ 1
        } else {
            recovery_id.to_byte()
        };

        let (r, s) = normalized.unwrap_or(signature).split_bytes();

        Ok(Secp256k1Signature {
            r: r.into(),
            s: s.into(),
            recovery_id,
        })
    }

    /// Checks a signature against a digest with this pair's public key.
    #[must_use]
    pub fn verify(&self, digest: &[u8; 32], signature: &Secp256k1Signature) -> bool {
        use k256::ecdsa::signature::hazmat::PrehashVerifier;

        let mut rs = [0u8; 64];
        let (r_out, s_out) = rs.split_at_mut(32);
        r_out.copy_from_slice(signature.r());
        s_out.copy_from_slice(signature.s());

        let Ok(k256_sig) = K256Signature::from_slice(&rs) else {
            return false;
        };

        self.verifying_key.verify_prehash(digest, &k256_sig).is_ok()
    }
}

impl std::fmt::Debug for Secp256k1KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::indexing_slicing
    )]

    use super::*;

    const KNOWN_PRIVATE_KEY: &str =
        "fad9c8855b740a0b7ed4c221dbad0f33a83a49cad6b3fe8d5817ac83d38b6a19";

    fn known_keypair() -> Secp256k1KeyPair {
        let secret = SecretKey::from_hex(KNOWN_PRIVATE_KEY).expect("valid key");
        Secp256k1KeyPair::from_secret_key(&secret).expect("valid key")
    }

    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    #[test]
    fn test_generate_produces_unique_keys() {
        let a = Secp256k1KeyPair::generate();
        let b = Secp256k1KeyPair::generate();
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn test_from_secret_key_rejects_zero() {
        let secret = SecretKey::new([0u8; 32]);
        assert!(matches!(
            Secp256k1KeyPair::from_secret_key(&secret),
            Err(SignError::InvalidKey)
        ));
    }

    #[test]
    fn test_ethereum_address_known_vector() {
        let keypair = known_keypair();
        assert_eq!(
            hex::encode(keypair.public_key().ethereum_address()),
            "96216849c49358b10257cb55b28ea603c874b05e"
        );
    }

    #[test]
    fn test_public_key_formats_agree() {
        let keypair = known_keypair();
        let pubkey = keypair.public_key();

        assert!(matches!(pubkey.compressed()[0], 0x02 | 0x03));
        assert_eq!(pubkey.uncompressed()[0], 0x04);
        assert_eq!(&pubkey.compressed()[1..], &pubkey.uncompressed()[1..33]);
        assert_eq!(pubkey.as_ref(), pubkey.compressed().as_slice());
    }

    // ------------------------------------------------------------------------
    // Signing
    // ------------------------------------------------------------------------

    #[test]
    fn test_signing_is_deterministic() {
        let keypair = known_keypair();
        let digest = keccak256(b"deterministic");

        let first = keypair.sign_digest(&digest).expect("sign");
        let second = keypair.sign_digest(&digest).expect("sign");
        assert_eq!(first, second);
    }

    #[test]
    fn test_signature_verifies_and_recovers() {
        let keypair = known_keypair();
        let digest = keccak256(b"recover me");
        let signature = keypair.sign_digest(&digest).expect("sign");

        assert!(keypair.verify(&digest, &signature));
        assert!(!keypair.verify(&keccak256(b"other"), &signature));

        let recovered = signature.recover(&digest).expect("recoverable");
        assert_eq!(&recovered, keypair.public_key());
    }

    #[test]
    fn test_signature_is_low_s() {
        // Half the secp256k1 group order, big-endian.
        let half_order =
            hex::decode("7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0")
                .expect("valid hex");

        let keypair = Secp256k1KeyPair::generate();
        for i in 0u8..16 {
            let signature = keypair.sign_digest(&keccak256(&[i])).expect("sign");
            assert!(signature.s().as_slice() <= half_order.as_slice());
        }
    }

    #[test]
    fn test_recoverable_bytes_layout() {
        let keypair = known_keypair();
        let signature = keypair.sign_digest(&keccak256(b"layout")).expect("sign");
        let bytes = signature.to_recoverable_bytes();

        assert_eq!(&bytes[..32], signature.r());
        assert_eq!(&bytes[32..64], signature.s());
        assert_eq!(bytes[64], signature.recovery_id());

        let parsed = Secp256k1Signature::from_recoverable_bytes(&bytes).expect("parse");
        assert_eq!(parsed, signature);
    }

    #[test]
    fn test_from_recoverable_bytes_rejects_bad_input() {
        assert!(Secp256k1Signature::from_recoverable_bytes(&[0u8; 64]).is_err());

        let mut bytes = [1u8; 65];
        bytes[64] = 2;
        assert!(Secp256k1Signature::from_recoverable_bytes(&bytes).is_err());
    }

    #[test]
    fn test_debug_output() {
        let keypair = known_keypair();
        let debug = format!("{keypair:?}");
        assert!(debug.contains("Secp256k1KeyPair"));
        assert!(!debug.contains(KNOWN_PRIVATE_KEY));

        let signature = keypair.sign_digest(&[7u8; 32]).expect("sign");
        assert!(format!("{signature:?}").starts_with("Secp256k1Signature(r="));
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Secp256k1KeyPair>();
        assert_send_sync::<Secp256k1PublicKey>();
        assert_send_sync::<Secp256k1Signature>();
    }
}
