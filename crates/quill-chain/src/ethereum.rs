//! Legacy and EIP-155 Ethereum transaction signing.
//!
//! An unsigned transaction arrives as hex-encoded RLP: a list of 6 byte
//! strings `[nonce, gasPrice, gasLimit, to, value, data]`, or 9 where the
//! last three are `[chainId, r, s]` with empty `r` and `s`. The signer
//! signs the RLP of that list and returns the 9-element signed form
//! `[nonce, gasPrice, gasLimit, to, value, data, v, r, s]`.
//!
//! # `v` Values
//!
//! - Legacy (6 fields, or chain id 0): `v = recovery_id + 27`
//! - EIP-155: `v = recovery_id + 35 + 2 * chain_id`
//!
//! A chain id of 0 cannot be told apart from an absent one on the wire, so it
//! is treated as absent and the placeholder fields are dropped before signing.
//!
//! # Failure
//!
//! [`sign_transaction`] fails closed: any malformed input produces `None` and
//! nothing is partially signed. [`try_sign_transaction`] reports why.
//!
//! # Example
//!
//! ```
//! use quill_chain::ethereum::sign_transaction;
//! use quill_crypto::Wallet;
//!
//! let wallet = Wallet::from_phrase(
//!     "abandon abandon abandon abandon abandon abandon \
//!      abandon abandon abandon abandon abandon about",
//! )
//! .expect("valid mnemonic");
//!
//! let unsigned = "0xe585746f6b6682832dc6c0832dc6c094dc0a63a5bdb165640661709569816bf08594dfd78080";
//! let signed = sign_transaction(wallet.payment(), unsigned).expect("signable");
//! assert!(signed.starts_with("0xf868"));
//!
//! assert!(sign_transaction(wallet.payment(), "0xdeadbeef").is_none());
//! ```

use quill_core::error::TransactionError;
use quill_crypto::hash::keccak256;
use quill_crypto::signer::Signer;
use serde::Serialize;
use tracing::{debug, info};

use crate::rlp::{decode_hex, encode_list, RlpValue};

/// Fields in an unsigned legacy transaction.
pub const LEGACY_FIELD_COUNT: usize = 6;

/// Fields in a transaction carrying a chain id and signature slots.
pub const EIP155_FIELD_COUNT: usize = 9;

const SIGNATURE_LEN: usize = 65;
const SCALAR_LEN: usize = 32;

const LEGACY_V_OFFSET: u64 = 27;
const EIP155_V_OFFSET: u64 = 35;

/// A signed transaction and the values that went into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedTransaction {
    /// The signed transaction, `0x`-prefixed RLP hex, ready to broadcast.
    pub raw: String,
    /// Keccak-256 of the signed bytes, `0x`-prefixed.
    pub hash: String,
    /// The EIP-155 chain id, if one was requested.
    pub chain_id: Option<u64>,
    /// The `v` value appended to the transaction.
    pub v: u64,
    /// The signature `r`, `0x`-prefixed.
    pub r: String,
    /// The signature `s`, `0x`-prefixed.
    pub s: String,
}

/// Signs an unsigned transaction, returning the signed `0x` hex.
///
/// Returns `None` if the input is not a well-formed unsigned transaction or
/// the signer fails. The reason is logged at `debug` level.
#[must_use]
pub fn sign_transaction<S>(signer: &S, unsigned_hex: &str) -> Option<String>
where
    S: Signer + ?Sized,
{
    match try_sign_transaction(signer, unsigned_hex) {
        Ok(signed) => Some(signed.raw),
        Err(error) => {
            debug!(%error, "refusing to sign transaction");
            None
        }
    }
}

/// Signs an unsigned transaction.
///
/// # Errors
///
/// Returns a [`TransactionError`] if:
/// - the input is not valid hex or canonical RLP
/// - the top-level item is not a list of 6 or 9 byte strings
/// - the `r` or `s` slot of a 9-field list is not empty
/// - the chain id does not fit in 64 bits or overflows `v`
/// - the signer fails or returns anything but 65 bytes
pub fn try_sign_transaction<S>(
    signer: &S,
    unsigned_hex: &str,
) -> Result<SignedTransaction, TransactionError>
where
    S: Signer + ?Sized,
{
    let mut fields = decode_hex(unsigned_hex)?
        .into_list()
        .ok_or(TransactionError::NotAList)?;

    if fields.len() != LEGACY_FIELD_COUNT && fields.len() != EIP155_FIELD_COUNT {
        return Err(TransactionError::InvalidFieldCount {
            count: fields.len(),
        });
    }
    if let Some(index) = fields.iter().position(RlpValue::is_list) {
        return Err(TransactionError::NestedField { index });
    }

    let chain_id = read_chain_id(&fields)?;
    if chain_id.is_none() {
        fields.truncate(LEGACY_FIELD_COUNT);
    }

    let payload = encode_list(&fields)?;
    let signature = signer.sign(&payload)?;
    if signature.len() != SIGNATURE_LEN {
        return Err(TransactionError::InvalidSignatureLength {
            length: signature.len(),
        });
    }

    let (recovery_id, rs) = signature
        .split_last()
        .ok_or(TransactionError::InvalidSignatureLength { length: 0 })?;
    let (r, s) = rs.split_at(SCALAR_LEN);
    let v = compute_v(*recovery_id, chain_id)?;

    fields.truncate(LEGACY_FIELD_COUNT);
    fields.push(RlpValue::from(v));
    fields.push(RlpValue::from(r));
    fields.push(RlpValue::from(s));

    let signed = encode_list(&fields)?;
    let hash = format!("0x{}", hex::encode(keccak256(&signed)));

    info!(
        from = %signer.ethereum_address(),
        hash = %hash,
        chain_id = ?chain_id,
        "transaction signed"
    );

    Ok(SignedTransaction {
        raw: format!("0x{}", hex::encode(&signed)),
        hash,
        chain_id,
        v,
        r: format!("0x{}", hex::encode(r)),
        s: format!("0x{}", hex::encode(s)),
    })
}

/// Returns the requested chain id of a 9-field list.
///
/// `None` for 6 fields or a chain id of 0. Also enforces that the signature
/// slots are still empty.
fn read_chain_id(fields: &[RlpValue]) -> Result<Option<u64>, TransactionError> {
    if fields.len() != EIP155_FIELD_COUNT {
        return Ok(None);
    }
    let [.., chain_id, r, s] = fields else {
        return Ok(None);
    };

    let slot_is_empty = |slot: &RlpValue| slot.as_bytes().is_some_and(<[u8]>::is_empty);
    if !slot_is_empty(r) || !slot_is_empty(s) {
        return Err(TransactionError::AlreadySigned);
    }

    let value = chain_id
        .to_unsigned_u64()
        .map_err(|_| TransactionError::InvalidChainId {
            length: chain_id.as_bytes().map_or(0, <[u8]>::len),
        })?;

    Ok((value != 0).then_some(value))
}

fn compute_v(recovery_id: u8, chain_id: Option<u64>) -> Result<u64, TransactionError> {
    let recovery_id = u64::from(recovery_id);
    match chain_id {
        None => Ok(recovery_id + LEGACY_V_OFFSET),
        Some(chain_id) => chain_id
            .checked_mul(2)
            .and_then(|doubled| doubled.checked_add(EIP155_V_OFFSET + recovery_id))
            .ok_or(TransactionError::ChainIdOutOfRange { chain_id }),
    }
}
