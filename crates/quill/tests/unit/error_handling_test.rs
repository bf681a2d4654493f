//! Error types, their messages and the exit codes they map to.

use std::error::Error;

use quill::cli::args::OutputFormat;
use quill::cli::commands::exit_codes::{EXIT_ERROR, EXIT_REFUSED};
use quill::cli::commands::{
    DecodeCommand, EncodeCommand, InitError, MnemonicError, NormalizeCommand, RlpCommandError,
    SignCommand, SignCommandError,
};
use quill::cli::phrase::PhraseError;
use quill::logging::LogError;
use quill_core::error::{ConfigError, DecodeError, TransactionError, WalletError};
use quill_crypto::keypair::Secp256k1KeyPair;
use quill_crypto::keys::SecretKey;

fn signer() -> Secp256k1KeyPair {
    Secp256k1KeyPair::from_secret_key(&SecretKey::new([0x11; 32])).expect("valid key")
}

#[test]
fn test_error_sources() {
    let err = LogError::InvalidConfig("x".to_string());
    assert!(err.source().is_none());

    let err = InitError::AlreadyInitialized {
        path: "/tmp/config.toml".to_string(),
    };
    assert!(err.source().is_none());

    let err = SignCommandError::Refused(TransactionError::Decode(DecodeError::StringTooShort));
    assert!(err.source().is_some());

    let err = PhraseError::Io(std::io::Error::other("no tty"));
    assert!(err.source().is_some());
}

#[test]
fn test_transparent_errors_keep_inner_message() {
    let inner = WalletError::invalid_path("m/x");
    let expected = inner.to_string();

    let err = PhraseError::from(inner);
    assert_eq!(err.to_string(), expected);

    let err = InitError::from(ConfigError::no_home_directory());
    assert_eq!(err.to_string(), ConfigError::no_home_directory().to_string());
}

#[test]
fn test_exit_codes() {
    assert_eq!(
        SignCommandError::Refused(TransactionError::AlreadySigned).exit_code(),
        EXIT_REFUSED
    );
    assert_eq!(
        SignCommandError::Wallet(PhraseError::Cancelled).exit_code(),
        EXIT_ERROR
    );
    assert_eq!(
        SignCommandError::Wallet(PhraseError::Wallet(WalletError::invalid_mnemonic("x")))
            .exit_code(),
        EXIT_REFUSED
    );
    assert_eq!(MnemonicError::Invalid.exit_code(), EXIT_REFUSED);
    assert_eq!(
        RlpCommandError::Decode(DecodeError::StringTooShort).exit_code(),
        EXIT_REFUSED
    );
    assert_eq!(
        InitError::AlreadyInitialized {
            path: String::new()
        }
        .exit_code(),
        EXIT_ERROR
    );
}

#[test]
fn test_every_refused_transaction_maps_to_refused() {
    let key = signer();
    for unsigned in [
        "",
        "0x",
        "0xzz",
        "0x80",
        "0xc0",
        "0xc6c08080808080",
        "0xc98080808080800101",
    ] {
        let err = SignCommand::new(unsigned, OutputFormat::Hex)
            .render(&key)
            .expect_err(unsigned);
        assert_eq!(err.exit_code(), EXIT_REFUSED, "{unsigned}: {err}");
    }
}

#[test]
fn test_command_outputs_agree_with_library() {
    let hex = EncodeCommand::new(r#"[1, "0xff", []]"#).encode().unwrap();
    let decoded = DecodeCommand::new(&hex).decode().unwrap();
    assert_eq!(decoded, serde_json::json!(["0x01", "0xff", []]));

    let address = NormalizeCommand::new("ethereum:0x037BE053F866BE6EE6DDA11F258BD871B701A8D7")
        .normalize()
        .unwrap();
    assert_eq!(address.as_str(), "0x037be053f866be6ee6dda11f258bd871b701a8d7");
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn decode_command_refuses_or_round_trips(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
            let hex = format!("0x{}", hex_string(&bytes));
            match DecodeCommand::new(&hex).decode() {
                Ok(json) => {
                    let encoded = EncodeCommand::new(json.to_string()).encode().unwrap();
                    prop_assert_eq!(encoded, hex);
                }
                Err(err) => prop_assert_eq!(err.exit_code(), EXIT_REFUSED),
            }
        }

        #[test]
        fn sign_command_never_errors_outside_refusal(bytes in prop::collection::vec(any::<u8>(), 0..96)) {
            let key = signer();
            let hex = format!("0x{}", hex_string(&bytes));
            if let Err(err) = SignCommand::new(hex, OutputFormat::Json).render(&key) {
                prop_assert_eq!(err.exit_code(), EXIT_REFUSED);
            }
        }
    }

    fn hex_string(bytes: &[u8]) -> String {
        use std::fmt::Write;
        bytes.iter().fold(String::new(), |mut out, b| {
            let _ = write!(out, "{b:02x}");
            out
        })
    }
}
