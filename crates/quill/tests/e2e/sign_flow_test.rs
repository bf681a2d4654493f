//! Signing through the binary with the mnemonic from `QUILL_MNEMONIC`.

use crate::common::{load_fixture, stderr, stdout, Quill, ABANDON, ABANDON_PAYMENT_ADDRESS};

#[test]
fn test_ethereum_address() {
    let output = Quill::with_mnemonic(ABANDON).run(&["ethereum", "address"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), ABANDON_PAYMENT_ADDRESS);
}

#[test]
fn test_identity_address_differs_from_payment() {
    let output = Quill::with_mnemonic(ABANDON).run(&["identity", "address"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let identity = stdout(&output);
    assert!(identity.starts_with("0x"));
    assert_eq!(identity.len(), 42);
    assert_ne!(identity, ABANDON_PAYMENT_ADDRESS);
}

#[test]
fn test_configured_payment_path() {
    let quill = Quill::with_mnemonic(ABANDON);
    quill.write_config("[wallet]\npayment_path = \"m/44'/60'/0'/0/1\"\n");

    let output = quill.run(&["ethereum", "address"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_ne!(stdout(&output), ABANDON_PAYMENT_ADDRESS);
}

#[test]
fn test_transaction_fixtures() {
    let fixture = load_fixture("ethereum/transactions.json").unwrap();
    let quill = Quill::with_mnemonic(fixture["mnemonic"].as_str().unwrap());

    for case in fixture["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let output = quill.run(&["ethereum", "sign", case["unsigned"].as_str().unwrap()]);

        match case["signed"].as_str() {
            Some(signed) => {
                assert!(output.status.success(), "{name}: {}", stderr(&output));
                assert_eq!(stdout(&output), signed, "{name}");
            }
            None => {
                assert_eq!(output.status.code(), Some(1), "{name}");
                assert!(output.stdout.is_empty(), "{name}");
            }
        }
    }
}

#[test]
fn test_sign_json_output() {
    let fixture = load_fixture("ethereum/transactions.json").unwrap();
    let case = fixture["cases"]
        .as_array()
        .unwrap()
        .iter()
        .find(|case| case["name"] == "eip155TokenTransfer")
        .unwrap();

    let output = Quill::with_mnemonic(ABANDON).run(&[
        "ethereum",
        "sign",
        case["unsigned"].as_str().unwrap(),
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["signer"], ABANDON_PAYMENT_ADDRESS);
    assert_eq!(json["raw"], case["signed"]);
    assert_eq!(json["chain_id"], 116);
    assert!(json["v"] == 267 || json["v"] == 268);
}

#[test]
fn test_invalid_mnemonic_is_refused() {
    let output = Quill::with_mnemonic("abandon abandon abandon").run(&["ethereum", "address"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!stderr(&output).contains("abandon abandon"));
}

#[test]
fn test_identity_sign() {
    let quill = Quill::with_mnemonic(ABANDON);

    let text = quill.run(&["identity", "sign", "hi"]);
    let hex = quill.run(&["identity", "sign", "--hex", "0x6869"]);

    assert!(text.status.success(), "{}", stderr(&text));
    assert_eq!(stdout(&text).len(), 130);
    assert_eq!(stdout(&text), stdout(&hex));

    let bad = quill.run(&["identity", "sign", "--hex", "0xzz"]);
    assert_eq!(bad.status.code(), Some(1));
}

#[test]
fn test_refusal_reason_without_secrets() {
    let output = Quill::with_mnemonic(ABANDON).run(&["-vv", "ethereum", "sign", "0xc0"]);

    assert_eq!(output.status.code(), Some(1));
    let log = stderr(&output);
    assert!(log.contains("expected 6 or 9 transaction fields, found 0"));
    assert!(!log.contains("abandon"));
}
