//! Commands that need no key: init, rlp, address and mnemonic.

use crate::common::{load_fixture, stderr, stdout, Quill, ABANDON};

// ============================================================================
// init
// ============================================================================

#[test]
fn test_init_writes_config() {
    let quill = Quill::new();

    let output = quill.run(&["init"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("config.toml"));

    let written = std::fs::read_to_string(quill.config_path()).unwrap();
    assert!(written.contains("[wallet]"));
    assert!(written.contains("mnemonic_env = \"QUILL_MNEMONIC\""));
}

#[test]
fn test_init_twice_needs_force() {
    let quill = Quill::new();
    assert!(quill.run(&["init"]).status.success());

    let again = quill.run(&["init"]);
    assert_eq!(again.status.code(), Some(2));
    assert!(stderr(&again).contains("--force"));

    assert!(quill.run(&["init", "--force"]).status.success());
}

#[test]
fn test_init_force_replaces_broken_config() {
    let quill = Quill::new();
    quill.write_config("[wallet\n");

    assert_eq!(quill.run(&["rlp", "encode", "1"]).status.code(), Some(2));
    assert!(quill.run(&["init", "--force"]).status.success());
    assert!(quill.run(&["rlp", "encode", "1"]).status.success());
}

#[test]
fn test_invalid_config_value_is_an_error() {
    let quill = Quill::new();
    quill.write_config("[wallet]\npayment_path = \"44'/60'\"\n");

    let output = quill.run(&["rlp", "encode", "1"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("wallet.payment_path"));
}

// ============================================================================
// rlp
// ============================================================================

#[test]
fn test_rlp_encode_and_decode() {
    let quill = Quill::new();

    let encoded = quill.run(&["rlp", "encode", r#"["cat", "dog"]"#]);
    assert!(encoded.status.success(), "{}", stderr(&encoded));
    assert_eq!(stdout(&encoded), "0xc88363617483646f67");

    let decoded = quill.run(&["rlp", "decode", "0xc88363617483646f67"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&decoded)).unwrap();
    assert_eq!(json, serde_json::json!(["0x636174", "0x646f67"]));
}

#[test]
fn test_rlp_valid_fixtures_through_binary() {
    let quill = Quill::new();
    let fixture = load_fixture("rlp/valid.json").unwrap();

    for case in fixture.as_array().unwrap().iter().take(8) {
        let output = quill.run(&["rlp", "encode", &case["in"].to_string()]);
        assert!(output.status.success(), "{}: {}", case["name"], stderr(&output));
        assert_eq!(
            stdout(&output),
            format!("0x{}", case["out"].as_str().unwrap()),
            "{}",
            case["name"]
        );
    }
}

#[test]
fn test_rlp_decode_rejects_non_canonical() {
    let quill = Quill::new();

    let output = quill.run(&["rlp", "decode", "0x8100"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("cannot decode"));
}

#[test]
fn test_rlp_encode_rejects_bad_json() {
    let output = Quill::new().run(&["rlp", "encode", "{nope"]);
    assert_eq!(output.status.code(), Some(2));
}

// ============================================================================
// address / mnemonic
// ============================================================================

#[test]
fn test_address_normalize() {
    let quill = Quill::new();

    let output = quill.run(&["address", "normalize", "iban:XE420ENF06QHAD2B0729XZJ1OU26UVM0TSN"]);
    assert_eq!(stdout(&output), "0x037be053f866be6ee6dda11f258bd871b701a8d7");

    let output = quill.run(&["address", "normalize", "https://example.com/pay"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_mnemonic_validate() {
    let quill = Quill::new();

    let mut args = vec!["mnemonic", "validate"];
    args.extend(ABANDON.split_whitespace());
    let output = quill.run(&args);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "valid");

    let output = quill.run(&["mnemonic", "validate", "abandon", "abandon", "abandon"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_mnemonic_generate_round_trips() {
    let quill = Quill::new();

    let generated = quill.run(&["mnemonic", "generate"]);
    assert!(generated.status.success(), "{}", stderr(&generated));
    let phrase = stdout(&generated);
    assert_eq!(phrase.split(' ').count(), 12);
    assert!(stderr(&generated).contains("payment address: 0x"));

    let mut args = vec!["mnemonic", "validate"];
    args.extend(phrase.split(' '));
    assert!(quill.run(&args).status.success());
}

// ============================================================================
// logging
// ============================================================================

#[test]
fn test_logs_do_not_touch_stdout() {
    let quill = Quill::new();

    let output = quill.run(&["-vvv", "rlp", "encode", "\"dog\""]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0x83646f67");
    assert!(!stderr(&output).is_empty());
}

#[test]
fn test_log_file_from_config() {
    let quill = Quill::new();
    let log_dir = quill.home().join("logs");
    quill.write_config(&format!(
        "[logging]\nlevel = \"debug\"\nformat = \"json\"\nfile = \"{}\"\n",
        log_dir.join("quill.log").display()
    ));

    let output = quill.run(&["rlp", "encode", "[]"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(std::fs::read_dir(&log_dir).unwrap().next().is_some());
}
