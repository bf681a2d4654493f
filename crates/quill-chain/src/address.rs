//! Ethereum address normalization.
//!
//! Addresses arrive from QR codes, links and pasted text in several shapes.
//! [`EthereumAddress::parse`] accepts these, case-insensitively:
//!
//! - `0x` followed by 40 hex digits
//! - `ethereum:0x` followed by 40 hex digits
//! - 40 bare hex digits
//! - ICAP `iban:XE` with 2 check digits and a 31-character base-36 account
//!
//! and always yields lowercase `0x` hex.
//!
//! ```
//! use quill_chain::address::EthereumAddress;
//!
//! let address = EthereumAddress::parse("iban:XE420ENF06QHAD2B0729XZJ1OU26UVM0TSN")
//!     .expect("valid ICAP");
//! assert_eq!(address.as_str(), "0x037be053f866be6ee6dda11f258bd871b701a8d7");
//!
//! assert!(EthereumAddress::parse("https://example.com/pay").is_none());
//! ```

use std::fmt;

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

const HEX_DIGITS: usize = ADDRESS_LEN * 2;
const ICAP_PREFIX: &str = "iban:xe";
const ICAP_ACCOUNT_LEN: usize = 31;

/// A normalized Ethereum address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EthereumAddress {
    normalized: String,
}

impl EthereumAddress {
    /// Parses an address in any supported format.
    ///
    /// Leading and trailing whitespace is ignored; anything else must match
    /// one format exactly.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let input = raw.trim().to_ascii_lowercase();

        if let Some(icap) = input.strip_prefix(ICAP_PREFIX) {
            return parse_icap(icap).map(Self::from_bytes);
        }

        let digits = input
            .strip_prefix("ethereum:0x")
            .or_else(|| input.strip_prefix("0x"))
            .unwrap_or(input.as_str());

        is_hex_address(digits).then(|| Self {
            normalized: format!("0x{digits}"),
        })
    }

    /// Builds an address from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self {
            normalized: format!("0x{}", hex::encode(bytes)),
        }
    }

    /// Returns true if `address` is exactly `0x` and 40 hex digits of either
    /// case.
    #[must_use]
    pub fn validate(address: &str) -> bool {
        address.strip_prefix("0x").is_some_and(is_hex_address)
    }

    /// The lowercase `0x`-prefixed form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.normalized
    }
}

impl fmt::Display for EthereumAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl AsRef<str> for EthereumAddress {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}

fn is_hex_address(digits: &str) -> bool {
    digits.len() == HEX_DIGITS && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parses the part of a lowercase ICAP after `iban:xe`.
fn parse_icap(rest: &str) -> Option<[u8; ADDRESS_LEN]> {
    if !rest.is_ascii() || rest.len() != 2 + ICAP_ACCOUNT_LEN {
        return None;
    }
    let (check_digits, account) = rest.split_at(2);
    if !check_digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // IBAN validation moves the country code and check digits to the end.
    let rearranged = format!("{account}xe{check_digits}");
    if iban_remainder(&rearranged)? != 1 {
        return None;
    }

    base36_to_bytes(account)
}

/// Remainder mod 97 of an IBAN string with letters expanded to 10..=35.
fn iban_remainder(text: &str) -> Option<u32> {
    text.chars().try_fold(0u32, |remainder, c| {
        let value = c.to_digit(36)?;
        let shift = if value < 10 { 10 } else { 100 };
        Some((remainder * shift + value) % 97)
    })
}

/// Decodes a base-36 number into a big-endian 20-byte array.
///
/// Returns `None` for a non-base-36 character or a value above 160 bits.
fn base36_to_bytes(digits: &str) -> Option<[u8; ADDRESS_LEN]> {
    let mut bytes = [0u8; ADDRESS_LEN];

    for c in digits.chars() {
        let mut carry = c.to_digit(36)?;
        for byte in bytes.iter_mut().rev() {
            let [low, high, ..] = (u32::from(*byte) * 36 + carry).to_le_bytes();
            *byte = low;
            carry = u32::from(high);
        }
        if carry != 0 {
            return None;
        }
    }

    Some(bytes)
}
