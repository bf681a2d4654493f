//! Recursive Length Prefix (RLP) encoding.
//!
//! RLP serializes a tree of byte strings and lists. It is the wire format of
//! Ethereum legacy transactions, so the encoder output must be byte-identical
//! to every other conformant implementation.
//!
//! # Encoding Rules
//!
//! | Payload                       | Encoding                                        |
//! |-------------------------------|-------------------------------------------------|
//! | single byte `< 0x80`          | the byte itself                                 |
//! | string of 0..=55 bytes        | `0x80 + len`, payload                           |
//! | string of 56+ bytes           | `0xb7 + len(len)`, big-endian `len`, payload    |
//! | list payload of 0..=55 bytes  | `0xc0 + len`, children                          |
//! | list payload of 56+ bytes     | `0xf7 + len(len)`, big-endian `len`, children   |
//!
//! Integers are big-endian with leading zero bytes stripped, so `0` is the
//! empty string.
//!
//! # Canonical Decoding
//!
//! [`decode`] rejects every encoding the encoder would not produce: a single
//! small byte wrapped in a prefix, long-form lengths below 56, length fields
//! with leading zeros, truncated input and trailing bytes. Each value has
//! exactly one accepted encoding.
//!
//! # Example
//!
//! ```
//! use quill_chain::rlp::{decode_hex, encode_hex, RlpValue};
//!
//! let value = RlpValue::from(vec![
//!     RlpValue::from("dog"),
//!     RlpValue::from("god"),
//!     RlpValue::from("cat"),
//! ]);
//!
//! let encoded = encode_hex(&value).expect("encodable");
//! assert_eq!(encoded, "0xcc83646f6783676f6483636174");
//! assert_eq!(decode_hex(&encoded).expect("canonical"), value);
//! ```

use quill_core::error::{DecodeError, EncodeError};
use serde_json::Value as JsonValue;

/// Maximum list nesting accepted by [`decode`].
pub const MAX_DEPTH: usize = 1024;

/// Payloads shorter than this use the one-byte prefix form.
const SHORT_LIMIT: usize = 56;

const STRING_OFFSET: u8 = 0x80;
const LIST_OFFSET: u8 = 0xc0;

/// Prefix bytes for long forms are `offset + 55 + len(len)`.
const LONG_FORM_BASE: u8 = 55;

// ============================================================================
// RlpValue
// ============================================================================

/// A decoded RLP item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RlpValue {
    /// A byte string, possibly empty.
    Bytes(Vec<u8>),
    /// An ordered list of items.
    List(Vec<RlpValue>),
}

impl RlpValue {
    /// A byte string.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// The UTF-8 bytes of `text`.
    #[must_use]
    pub fn from_string(text: &str) -> Self {
        Self::Bytes(text.as_bytes().to_vec())
    }

    /// An unsigned integer as minimal big-endian bytes.
    ///
    /// ```
    /// use quill_chain::rlp::RlpValue;
    ///
    /// assert_eq!(RlpValue::from_unsigned(0u8), RlpValue::Bytes(vec![]));
    /// assert_eq!(RlpValue::from_unsigned(1024u32), RlpValue::Bytes(vec![0x04, 0x00]));
    /// ```
    #[must_use]
    pub fn from_unsigned(value: impl Into<u128>) -> Self {
        Self::Bytes(trim_leading_zeros(&value.into().to_be_bytes()).to_vec())
    }

    /// A list of items.
    #[must_use]
    pub fn from_list(items: impl Into<Vec<Self>>) -> Self {
        Self::List(items.into())
    }

    /// The bytes of a byte string, or `None` for a list.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::List(_) => None,
        }
    }

    /// The items of a list, or `None` for a byte string.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::Bytes(_) => None,
            Self::List(items) => Some(items),
        }
    }

    /// Returns true for a list.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Consumes the value, returning its items if it is a list.
    #[must_use]
    pub fn into_list(self) -> Option<Vec<Self>> {
        match self {
            Self::Bytes(_) => None,
            Self::List(items) => Some(items),
        }
    }

    /// Reads a byte string as a big-endian unsigned integer.
    ///
    /// The empty string is zero. Leading zero bytes are tolerated.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnsupportedIntegerSize`] for more than 8 bytes
    /// and [`DecodeError::UnexpectedList`] for a list.
    pub fn to_unsigned_u64(&self) -> Result<u64, DecodeError> {
        let bytes = self.as_bytes().ok_or(DecodeError::UnexpectedList)?;
        if bytes.len() > std::mem::size_of::<u64>() {
            return Err(DecodeError::UnsupportedIntegerSize);
        }
        Ok(bytes
            .iter()
            .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte)))
    }

    /// Converts a JSON document into a value.
    ///
    /// - strings starting with `0x` are hex byte strings
    /// - other strings are UTF-8 text
    /// - non-negative integers are unsigned scalars
    /// - arrays are lists
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::UnsupportedDataType`] for `null`, booleans,
    /// objects, floats, negative numbers and malformed `0x` strings.
    pub fn from_json(value: &JsonValue) -> Result<Self, EncodeError> {
        match value {
            JsonValue::String(text) => match text.strip_prefix("0x") {
                Some(digits) => hex::decode(digits)
                    .map(Self::Bytes)
                    .map_err(|_| EncodeError::unsupported(format!("malformed hex string {text:?}"))),
                None => Ok(Self::from_string(text)),
            },
            JsonValue::Number(number) => number
                .as_u64()
                .map(Self::from_unsigned)
                .ok_or_else(|| EncodeError::unsupported(format!("number {number}"))),
            JsonValue::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            JsonValue::Null => Err(EncodeError::unsupported("null")),
            JsonValue::Bool(flag) => Err(EncodeError::unsupported(format!("boolean {flag}"))),
            JsonValue::Object(_) => Err(EncodeError::unsupported("object")),
        }
    }

    /// Renders the value as JSON: byte strings as `0x` hex, lists as arrays.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Bytes(bytes) => JsonValue::String(format!("0x{}", hex::encode(bytes))),
            Self::List(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RlpValue {
                fn from(value: $ty) -> Self {
                    Self::from_unsigned(value)
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128);

impl From<&str> for RlpValue {
    fn from(text: &str) -> Self {
        Self::from_string(text)
    }
}

impl From<String> for RlpValue {
    fn from(text: String) -> Self {
        Self::Bytes(text.into_bytes())
    }
}

impl From<Vec<u8>> for RlpValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for RlpValue {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<Vec<RlpValue>> for RlpValue {
    fn from(items: Vec<RlpValue>) -> Self {
        Self::List(items)
    }
}

impl TryFrom<&JsonValue> for RlpValue {
    type Error = EncodeError;

    fn try_from(value: &JsonValue) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Encodes a value.
///
/// # Errors
///
/// Returns [`EncodeError::LengthGreaterThanMax`] if a payload length does not
/// fit in a 64-bit length field.
pub fn encode(value: &RlpValue) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    encode_into(value, &mut out)?;
    Ok(out)
}

/// Encodes a value as `0x`-prefixed lowercase hex.
///
/// # Errors
///
/// Same as [`encode`].
pub fn encode_hex(value: &RlpValue) -> Result<String, EncodeError> {
    Ok(format!("0x{}", hex::encode(encode(value)?)))
}

/// Encodes `items` as a list without building an [`RlpValue::List`].
///
/// # Errors
///
/// Same as [`encode`].
pub fn encode_list(items: &[RlpValue]) -> Result<Vec<u8>, EncodeError> {
    let mut payload = Vec::new();
    for item in items {
        encode_into(item, &mut payload)?;
    }

    let mut out = Vec::with_capacity(payload.len() + 9);
    encode_length(payload.len(), LIST_OFFSET, &mut out)?;
    out.extend_from_slice(&payload);
    Ok(out)
}

fn encode_into(value: &RlpValue, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    match value {
        RlpValue::Bytes(bytes) => {
            if let [byte] = bytes.as_slice() {
                if *byte < STRING_OFFSET {
                    out.push(*byte);
                    return Ok(());
                }
            }
            encode_length(bytes.len(), STRING_OFFSET, out)?;
            out.extend_from_slice(bytes);
        }
        RlpValue::List(items) => out.extend(encode_list(items)?),
    }
    Ok(())
}

fn encode_length(length: usize, offset: u8, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let too_long = || EncodeError::LengthGreaterThanMax { length };

    if length < SHORT_LIMIT {
        let length = u8::try_from(length).map_err(|_| too_long())?;
        out.push(offset + length);
        return Ok(());
    }

    let be = u64::try_from(length).map_err(|_| too_long())?.to_be_bytes();
    let length_bytes = trim_leading_zeros(&be);
    let width = u8::try_from(length_bytes.len()).map_err(|_| too_long())?;

    out.push(offset + LONG_FORM_BASE + width);
    out.extend_from_slice(length_bytes);
    Ok(())
}

fn trim_leading_zeros(mut bytes: &[u8]) -> &[u8] {
    while let [0, rest @ ..] = bytes {
        bytes = rest;
    }
    bytes
}

// ============================================================================
// Decoding
// ============================================================================

/// Decodes exactly one item from `bytes`.
///
/// # Errors
///
/// Returns the [`DecodeError`] describing the first problem found, including
/// [`DecodeError::StringEndsWithSuperfluousBytes`] if input remains after the
/// item and [`DecodeError::NestingTooDeep`] past [`MAX_DEPTH`] nested lists.
pub fn decode(bytes: &[u8]) -> Result<RlpValue, DecodeError> {
    let (value, next) = consume_item(bytes, 0, 0)?;
    if next == bytes.len() {
        Ok(value)
    } else {
        Err(DecodeError::StringEndsWithSuperfluousBytes)
    }
}

/// Decodes a hex string with an optional `0x` prefix.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidHexString`] for odd-length or non-hex
/// input, otherwise the same errors as [`decode`].
pub fn decode_hex(input: &str) -> Result<RlpValue, DecodeError> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    let bytes = hex::decode(digits).map_err(|_| DecodeError::InvalidHexString)?;
    decode(&bytes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    String,
    List,
}

/// Location of an item's payload inside the buffer.
#[derive(Debug, Clone, Copy)]
struct Prefix {
    kind: Kind,
    start: usize,
    length: usize,
}

fn consume_item(buf: &[u8], offset: usize, depth: usize) -> Result<(RlpValue, usize), DecodeError> {
    let prefix = consume_length_prefix(buf, offset)?;
    consume_payload(buf, prefix, depth)
}

fn consume_length_prefix(buf: &[u8], offset: usize) -> Result<Prefix, DecodeError> {
    let first = *buf.get(offset).ok_or(DecodeError::StringTooShort)?;
    let after = offset.checked_add(1).ok_or(DecodeError::StringTooShort)?;

    match first {
        // The byte is its own payload.
        0x00..=0x7f => Ok(Prefix {
            kind: Kind::String,
            start: offset,
            length: 1,
        }),
        0x80..=0xb7 => {
            let length = usize::from(first - STRING_OFFSET);
            if length == 1 {
                let byte = *buf.get(after).ok_or(DecodeError::StringTooShort)?;
                if byte < STRING_OFFSET {
                    return Err(DecodeError::EncodedAsShortStringAlthoughSingleByteWasPossible);
                }
            }
            Ok(Prefix {
                kind: Kind::String,
                start: after,
                length,
            })
        }
        0xb8..=0xbf => {
            let width = usize::from(first - STRING_OFFSET - LONG_FORM_BASE);
            let (length, start) = read_long_length(buf, after, width)?;
            if length < SHORT_LIMIT {
                return Err(DecodeError::LongStringPrefixUsedForShortString);
            }
            Ok(Prefix {
                kind: Kind::String,
                start,
                length,
            })
        }
        0xc0..=0xf7 => Ok(Prefix {
            kind: Kind::List,
            start: after,
            length: usize::from(first - LIST_OFFSET),
        }),
        0xf8..=0xff => {
            let width = usize::from(first - LIST_OFFSET - LONG_FORM_BASE);
            let (length, start) = read_long_length(buf, after, width)?;
            if length < SHORT_LIMIT {
                return Err(DecodeError::LongListPrefixUsedForShortList);
            }
            Ok(Prefix {
                kind: Kind::List,
                start,
                length,
            })
        }
    }
}

/// Reads a `width`-byte big-endian length starting at `start`.
///
/// Returns the length and the offset of the first payload byte. A long form
/// always announces at least 56 payload bytes, so at least one byte must
/// follow the length field.
fn read_long_length(buf: &[u8], start: usize, width: usize) -> Result<(usize, usize), DecodeError> {
    let end = start.checked_add(width).ok_or(DecodeError::StringTooShort)?;
    if buf.len() <= end {
        return Err(DecodeError::StringTooShort);
    }

    let field = buf.get(start..end).ok_or(DecodeError::StringTooShort)?;
    if field.first() == Some(&0) {
        return Err(DecodeError::LengthStartsWithZeroBytes);
    }
    if width > std::mem::size_of::<usize>() {
        return Err(DecodeError::UnsupportedIntegerSize);
    }

    let length = field
        .iter()
        .fold(0usize, |acc, &byte| (acc << 8) | usize::from(byte));
    Ok((length, end))
}

fn consume_payload(buf: &[u8], prefix: Prefix, depth: usize) -> Result<(RlpValue, usize), DecodeError> {
    let end = prefix
        .start
        .checked_add(prefix.length)
        .ok_or(DecodeError::StringTooShort)?;

    match prefix.kind {
        Kind::String => {
            let bytes = buf.get(prefix.start..end).ok_or(DecodeError::StringTooShort)?;
            Ok((RlpValue::Bytes(bytes.to_vec()), end))
        }
        Kind::List => {
            if depth >= MAX_DEPTH {
                return Err(DecodeError::NestingTooDeep);
            }

            // Children are read against the whole buffer; an overrun is
            // detected once the last child has been consumed.
            let mut items = Vec::new();
            let mut next = prefix.start;
            while next < end {
                let (item, after) = consume_item(buf, next, depth + 1)?;
                items.push(item);
                next = after;
            }

            if next > end {
                return Err(DecodeError::ListLengthPrefixTooSmall);
            }
            Ok((RlpValue::List(items), next))
        }
    }
}
