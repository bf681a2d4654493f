//! Fuzz target for the transaction signer.
//!
//! Arbitrary bytes are hex-encoded and handed to the signer, which must
//! never panic. Whatever it does sign must decode to exactly nine fields.
//!
//! # Running
//!
//! ```bash
//! cargo +nightly fuzz run sign_transaction
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use quill_chain::ethereum::sign_transaction;
use quill_chain::rlp::decode_hex;
use quill_crypto::keypair::Secp256k1KeyPair;
use quill_crypto::keys::SecretKey;
use std::sync::OnceLock;

fn signer() -> &'static Secp256k1KeyPair {
    static SIGNER: OnceLock<Secp256k1KeyPair> = OnceLock::new();
    SIGNER.get_or_init(|| {
        Secp256k1KeyPair::from_secret_key(&SecretKey::new([0x42; 32])).expect("valid key")
    })
}

fuzz_target!(|data: &[u8]| {
    let unsigned = format!("0x{}", hex::encode(data));

    if let Some(signed) = sign_transaction(signer(), &unsigned) {
        let fields = decode_hex(&signed)
            .expect("signed output decodes")
            .into_list()
            .expect("signed output is a list");
        assert_eq!(fields.len(), 9);
    }
});
