//! # Test Utilities for `quill-chain`
//!
//! ## Functions
//!
//! - [`load_fixture`] - Load a JSON fixture from the workspace `tests/fixtures/` directory
//! - [`payment_wallet`] - The wallet every transaction fixture was signed with
//!
//! ## Proptest Strategies
//!
//! - [`rlp_value`] - Arbitrary nested RLP values
//! - [`hex_bytes`] - `0x`-prefixed hex strings of a given length range

#![allow(dead_code)]
#![allow(clippy::expect_used)]

use std::path::PathBuf;

use proptest::prelude::*;
use quill_chain::RlpValue;
use quill_crypto::Wallet;

/// Error type for fixture loading operations.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// The fixture file could not be found.
    #[error("Fixture not found: {0}")]
    NotFound(String),

    /// The fixture file could not be read.
    #[error("Failed to read fixture: {0}")]
    ReadError(#[from] std::io::Error),

    /// The fixture JSON could not be parsed.
    #[error("Failed to parse fixture JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Load a JSON fixture file, e.g. `"rlp/valid.json"`.
pub fn load_fixture(path: &str) -> Result<serde_json::Value, FixtureError> {
    let fixture_path = fixtures_dir().join(path);

    if !fixture_path.exists() {
        return Err(FixtureError::NotFound(fixture_path.display().to_string()));
    }

    let content = std::fs::read_to_string(&fixture_path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load a fixture that must exist.
///
/// # Panics
///
/// Panics if the fixture is missing or malformed.
#[must_use]
pub fn fixture(path: &str) -> serde_json::Value {
    load_fixture(path).expect("fixture should load")
}

/// `tests/fixtures` at the workspace root.
fn fixtures_dir() -> PathBuf {
    // crates/quill-chain -> crates -> workspace
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(manifest_dir)
        .parent()
        .and_then(|p| p.parent())
        .map_or_else(
            || PathBuf::from("tests/fixtures"),
            |p| p.join("tests").join("fixtures"),
        )
}

/// The wallet named by `ethereum/transactions.json`.
///
/// # Panics
///
/// Panics if the fixture mnemonic is invalid.
#[must_use]
pub fn payment_wallet() -> Wallet {
    let fixture = fixture("ethereum/transactions.json");
    let mnemonic = fixture["mnemonic"].as_str().expect("mnemonic string");
    Wallet::from_phrase(mnemonic).expect("valid fixture mnemonic")
}

// =============================================================================
// Proptest Strategies
// =============================================================================

/// Arbitrary RLP values up to four lists deep.
pub fn rlp_value() -> impl Strategy<Value = RlpValue> {
    let leaf = prop_oneof![
        prop::collection::vec(any::<u8>(), 0..4).prop_map(RlpValue::Bytes),
        prop::collection::vec(any::<u8>(), 50..70).prop_map(RlpValue::Bytes),
        any::<u64>().prop_map(RlpValue::from),
    ];
    leaf.prop_recursive(4, 96, 12, |inner| {
        prop::collection::vec(inner, 0..12).prop_map(RlpValue::List)
    })
}

/// `0x`-prefixed hex of `len` random bytes.
pub fn hex_bytes(len: std::ops::Range<usize>) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), len).prop_map(|bytes| format!("0x{}", hex::encode(bytes)))
}
