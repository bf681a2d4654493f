//! Keccak-256 helpers.

use sha3::{Digest, Keccak256};

/// Returns the Keccak-256 digest of `data`.
///
/// This is the original Keccak padding used by Ethereum, not NIST SHA3-256.
///
/// ```
/// use quill_crypto::hash::keccak256;
///
/// assert_eq!(
///     hex::encode(keccak256(b"")),
///     "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
/// );
/// ```
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Returns the Keccak-256 digest of `data` as `0x`-prefixed lowercase hex.
#[must_use]
pub fn sha3_hex(data: &[u8]) -> String {
    format!("0x{}", hex::encode(keccak256(data)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_known_vectors() {
        assert_eq!(
            hex::encode(keccak256(b"hello")),
            "1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_sha3_hex_format() {
        let digest = sha3_hex(b"");
        assert_eq!(
            digest,
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_eq!(digest.len(), 66);
    }
}
