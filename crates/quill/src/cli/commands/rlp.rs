//! # RLP Commands
//!
//! `quill rlp encode` turns a JSON value into RLP hex and `quill rlp decode`
//! turns RLP hex back into JSON, with byte strings shown as `0x` hex.
//!
//! ```text
//! $ quill rlp encode '["cat", "dog"]'
//! 0xc88363617483646f67
//! $ quill rlp decode 0xc88363617483646f67
//! [
//!   "0x636174",
//!   "0x646f67"
//! ]
//! ```

use quill_chain::rlp::{decode_hex, encode_hex, RlpValue};
use quill_core::error::{DecodeError, EncodeError};

use crate::cli::commands::exit_codes::{EXIT_ERROR, EXIT_REFUSED};

/// Errors from the RLP commands.
#[derive(Debug, thiserror::Error)]
pub enum RlpCommandError {
    /// The argument is not JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON value has no RLP form.
    #[error("cannot encode: {0}")]
    Encode(#[from] EncodeError),

    /// The input is not canonical RLP.
    #[error("cannot decode: {0}")]
    Decode(#[from] DecodeError),
}

impl RlpCommandError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Decode(_) => EXIT_REFUSED,
            Self::Json(_) | Self::Encode(_) => EXIT_ERROR,
        }
    }
}

/// The `quill rlp encode` command handler.
#[derive(Debug, Clone)]
pub struct EncodeCommand {
    /// The JSON value to encode.
    pub json: String,
}

impl EncodeCommand {
    /// Create a new `EncodeCommand`.
    #[must_use]
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }

    /// Prints the encoding.
    ///
    /// # Errors
    ///
    /// See [`encode`](Self::encode).
    pub fn run(&self) -> Result<(), RlpCommandError> {
        println!("{}", self.encode()?);
        Ok(())
    }

    /// Encodes the JSON argument as `0x` hex.
    ///
    /// # Errors
    ///
    /// Returns [`RlpCommandError::Json`] for malformed JSON and
    /// [`RlpCommandError::Encode`] for values with no RLP form.
    pub fn encode(&self) -> Result<String, RlpCommandError> {
        let json: serde_json::Value = serde_json::from_str(&self.json)?;
        Ok(encode_hex(&RlpValue::from_json(&json)?)?)
    }
}

/// The `quill rlp decode` command handler.
#[derive(Debug, Clone)]
pub struct DecodeCommand {
    /// The RLP hex to decode.
    pub hex: String,
}

impl DecodeCommand {
    /// Create a new `DecodeCommand`.
    #[must_use]
    pub fn new(hex: impl Into<String>) -> Self {
        Self { hex: hex.into() }
    }

    /// Prints the decoded value as pretty JSON.
    ///
    /// # Errors
    ///
    /// See [`decode`](Self::decode).
    pub fn run(&self) -> Result<(), RlpCommandError> {
        println!("{}", serde_json::to_string_pretty(&self.decode()?)?);
        Ok(())
    }

    /// Decodes the hex argument.
    ///
    /// # Errors
    ///
    /// Returns [`RlpCommandError::Decode`] for anything but a single
    /// canonical RLP item.
    pub fn decode(&self) -> Result<serde_json::Value, RlpCommandError> {
        Ok(decode_hex(self.hex.trim())?.to_json())
    }
}
