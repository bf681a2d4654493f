//! Fuzz target for the RLP decoder.
//!
//! Arbitrary bytes must either fail to decode or decode to a value whose
//! encoding is exactly the input, since only canonical encodings are
//! accepted.
//!
//! # Running
//!
//! ```bash
//! cargo +nightly fuzz run rlp_decode
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use quill_chain::rlp::{decode, decode_hex, encode};

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = decode(data) {
        let reencoded = encode(&value).expect("decoded values always encode");
        assert_eq!(reencoded, data, "accepted a non-canonical encoding");
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = decode_hex(text);
    }
});
