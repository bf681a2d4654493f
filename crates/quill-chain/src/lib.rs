//! # quill-chain
//!
//! Ethereum wire formats for the quill wallet core.
//!
//! ## Modules
//!
//! - [`rlp`] - Canonical RLP encoding and decoding over [`RlpValue`]
//! - [`ethereum`] - Signing legacy and EIP-155 transactions with any
//!   [`Signer`](quill_crypto::Signer)
//! - [`address`] - Normalizing pasted or scanned addresses
//!
//! ## Example
//!
//! ```rust
//! use quill_chain::{decode_hex, sign_transaction, RlpValue};
//! use quill_crypto::{SecretKey, Secp256k1KeyPair};
//!
//! let key = Secp256k1KeyPair::from_secret_key(&SecretKey::new([0x42; 32]))
//!     .expect("valid key");
//!
//! let unsigned = "0xe585746f6b6682832dc6c0832dc6c094dc0a63a5bdb165640661709569816bf08594dfd78080";
//! let signed = sign_transaction(&key, unsigned).expect("well-formed transaction");
//!
//! let fields = decode_hex(&signed)
//!     .ok()
//!     .and_then(RlpValue::into_list)
//!     .expect("signed list");
//! assert_eq!(fields.len(), 9);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod address;
pub mod ethereum;
pub mod rlp;

pub use address::EthereumAddress;
pub use ethereum::{sign_transaction, try_sign_transaction, SignedTransaction};
pub use rlp::{decode, decode_hex, encode, encode_hex, encode_list, RlpValue, MAX_DEPTH};

pub use quill_core::error::{DecodeError, EncodeError, TransactionError};
