//! Error types shared across the quill crates.
//!
//! - [`DecodeError`] - Malformed RLP input
//! - [`EncodeError`] - Values that cannot be RLP encoded
//! - [`TransactionError`] - Why a transaction was refused for signing
//! - [`SignError`] - Signing failures
//! - [`WalletError`] - Mnemonic and key derivation failures
//! - [`ConfigError`] - Configuration failures
//!
//! # Example
//!
//! ```rust
//! use quill_core::error::{ConfigError, SignError};
//!
//! let err = ConfigError::invalid_value("wallet.payment_path", "m/x");
//! assert_eq!(err.to_string(), "invalid value for wallet.payment_path: m/x");
//!
//! let err = SignError::invalid_hash("expected 32 bytes, got 31");
//! assert_eq!(err.to_string(), "invalid hash: expected 32 bytes, got 31");
//! ```

// ============================================================================
// DecodeError
// ============================================================================

/// Reasons an RLP decode can fail.
///
/// Every non-canonical encoding maps to exactly one of these, so a value has
/// a single accepted byte representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The input is not an even-length hex string.
    #[error("invalid hex string")]
    InvalidHexString,

    /// The input ended before the item it announces.
    #[error("input too short for the announced length")]
    StringTooShort,

    /// Bytes remain after the top-level item.
    #[error("input has bytes after the top-level item")]
    StringEndsWithSuperfluousBytes,

    /// A single byte below 0x80 was wrapped in a one-byte string prefix.
    #[error("single byte below 0x80 encoded as a short string")]
    EncodedAsShortStringAlthoughSingleByteWasPossible,

    /// A long-form length field starts with a zero byte.
    #[error("length field starts with a zero byte")]
    LengthStartsWithZeroBytes,

    /// A long string prefix announces fewer than 56 bytes.
    #[error("long string prefix used for a string shorter than 56 bytes")]
    LongStringPrefixUsedForShortString,

    /// A long list prefix announces fewer than 56 bytes.
    #[error("long list prefix used for a list shorter than 56 bytes")]
    LongListPrefixUsedForShortList,

    /// The children of a list extend past the list's announced length.
    #[error("list children overrun the list length prefix")]
    ListLengthPrefixTooSmall,

    /// A length or integer does not fit the target integer type.
    #[error("integer too large for the target type")]
    UnsupportedIntegerSize,

    /// Lists are nested deeper than the decoder allows.
    #[error("lists nested too deeply")]
    NestingTooDeep,

    /// A byte string was expected but a list was found.
    #[error("expected a byte string, found a list")]
    UnexpectedList,
}

// ============================================================================
// EncodeError
// ============================================================================

/// Reasons a value cannot be RLP encoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The input is neither a byte-convertible scalar nor a list.
    #[error("unsupported data type: {context}")]
    UnsupportedDataType {
        /// Description of the rejected value.
        context: String,
    },

    /// A payload length cannot be represented in a length prefix.
    #[error("length {length} is greater than the maximum encodable length")]
    LengthGreaterThanMax {
        /// The payload length in bytes.
        length: usize,
    },
}

impl EncodeError {
    /// Create an `UnsupportedDataType` error.
    #[must_use]
    pub fn unsupported(context: impl Into<String>) -> Self {
        Self::UnsupportedDataType {
            context: context.into(),
        }
    }
}

// ============================================================================
// TransactionError
// ============================================================================

/// Why an unsigned transaction was refused for signing.
///
/// Callers that only need a yes/no answer collapse all of these into "no
/// signed transaction".
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The input is not valid RLP.
    #[error("malformed transaction: {0}")]
    Decode(#[from] DecodeError),

    /// The top-level item is a byte string.
    #[error("transaction is not an RLP list")]
    NotAList,

    /// A transaction field is itself a list.
    #[error("transaction field {index} is a list")]
    NestedField {
        /// Zero-based position of the field.
        index: usize,
    },

    /// The field list does not have 6 or 9 elements.
    #[error("expected 6 or 9 transaction fields, found {count}")]
    InvalidFieldCount {
        /// Number of fields found.
        count: usize,
    },

    /// The `r` or `s` placeholder is not empty.
    #[error("transaction is already signed")]
    AlreadySigned,

    /// The chain id field does not fit in 64 bits.
    #[error("chain id of {length} bytes is not readable")]
    InvalidChainId {
        /// Length of the chain id field in bytes.
        length: usize,
    },

    /// The chain id is too large to produce an EIP-155 `v`.
    #[error("chain id {chain_id} is out of range")]
    ChainIdOutOfRange {
        /// The decoded chain id.
        chain_id: u64,
    },

    /// The signer failed.
    #[error(transparent)]
    Sign(#[from] SignError),

    /// The signer returned a signature of the wrong size.
    #[error("expected a 65-byte signature, got {length} bytes")]
    InvalidSignatureLength {
        /// Length of the returned signature.
        length: usize,
    },

    /// The signed field list could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

// ============================================================================
// SignError
// ============================================================================

/// Errors that can occur during signing operations.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// The key material is not a valid secp256k1 scalar.
    #[error("invalid key material")]
    InvalidKey,

    /// The digest to sign is malformed.
    #[error("invalid hash: {context}")]
    InvalidHash {
        /// What was wrong with the digest.
        context: String,
    },

    /// The input to sign is not valid hex.
    #[error("invalid hex input: {context}")]
    InvalidHex {
        /// Decoder message.
        context: String,
    },

    /// The signing operation failed.
    #[error("signature failed: {context}")]
    SignatureFailed {
        /// Context about why signing failed.
        context: String,
    },
}

impl SignError {
    /// Create an `InvalidHash` error.
    #[must_use]
    pub fn invalid_hash(context: impl Into<String>) -> Self {
        Self::InvalidHash {
            context: context.into(),
        }
    }

    /// Create an `InvalidHex` error.
    #[must_use]
    pub fn invalid_hex(context: impl Into<String>) -> Self {
        Self::InvalidHex {
            context: context.into(),
        }
    }

    /// Create a `SignatureFailed` error with context.
    #[must_use]
    pub fn signature_failed(context: impl Into<String>) -> Self {
        Self::SignatureFailed {
            context: context.into(),
        }
    }
}

// ============================================================================
// WalletError
// ============================================================================

/// Errors raised while restoring or deriving an HD wallet.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// The phrase is not a valid BIP-39 English mnemonic.
    ///
    /// The phrase itself is never included.
    #[error("invalid mnemonic: {context}")]
    InvalidMnemonic {
        /// Why the phrase was rejected.
        context: String,
    },

    /// The derivation path does not parse.
    #[error("invalid derivation path: {path}")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },

    /// Child key derivation failed.
    #[error("key derivation failed: {context}")]
    DerivationFailed {
        /// Context from the derivation library.
        context: String,
    },

    /// A derived key could not be turned into a signing key.
    #[error(transparent)]
    Sign(#[from] SignError),
}

impl WalletError {
    /// Create an `InvalidMnemonic` error.
    #[must_use]
    pub fn invalid_mnemonic(context: impl Into<String>) -> Self {
        Self::InvalidMnemonic {
            context: context.into(),
        }
    }

    /// Create an `InvalidPath` error.
    #[must_use]
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Create a `DerivationFailed` error.
    #[must_use]
    pub fn derivation_failed(context: impl Into<String>) -> Self {
        Self::DerivationFailed {
            context: context.into(),
        }
    }
}

// ============================================================================
// ConfigError
// ============================================================================

/// Errors that can occur while loading, validating or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Failed to parse or serialize the configuration.
    #[error("failed to parse configuration: {context}")]
    ParseFailed {
        /// Context about the parsing failure.
        context: String,
    },

    /// A configuration value is invalid.
    #[error("invalid value for {field}: {value}")]
    InvalidValue {
        /// The dotted field name holding the invalid value.
        field: String,
        /// The invalid value.
        value: String,
    },

    /// Reading or writing a configuration file failed.
    #[error("{context}: {source}")]
    Io {
        /// What was being attempted.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The home directory could not be determined.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}

impl ConfigError {
    /// Create a file-not-found error.
    #[must_use]
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a parse-failed error.
    #[must_use]
    pub fn parse_failed(context: impl Into<String>) -> Self {
        Self::ParseFailed {
            context: context.into(),
        }
    }

    /// Create an invalid-value error.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an I/O error with context.
    #[must_use]
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a no-home-directory error.
    #[must_use]
    pub const fn no_home_directory() -> Self {
        Self::NoHomeDirectory
    }
}
