use secp_keychain::KeyPairHex;
use serde_json::Value;
use std::process::{Command, Output};

const ZERO_SEED: &str = "0000000000000000000000000000000000000000000000000000000000000000";
const ZERO_SEED_SECRET: &str = "66687aadf862bd776c8fc18b8e9f8e20089714856ee233b3902a591d0d5f2925";
const ZERO_SEED_PUBLIC: &str = "03ee0b1602eb18fef7986887a7e8769a30c9df981d33c8380d255edef003abdcd2";
const GENERATOR: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
const SECRET_ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";

fn run_cli(args: &[&str]) -> Output {
    let binary_path = assert_cmd::cargo::cargo_bin!("secp-keychain");
    Command::new(binary_path)
        .args(args)
        .output()
        .expect("cli run succeeds")
}

fn run_json(args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let output = run_cli(&full);

    assert!(
        output.status.success(),
        "cli exited unsuccessfully: {:?}",
        output
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout is utf8");
    serde_json::from_str(&stdout).expect("stdout is valid json")
}

fn json_str<'a>(value: &'a Value, key: &str) -> &'a str {
    value[key].as_str().unwrap_or_else(|| panic!("missing string field {key}: {value}"))
}

#[test]
fn generate_emits_matching_key_pair() {
    let value = run_json(&["generate"]);
    let keys: KeyPairHex = serde_json::from_value(value).expect("json matches KeyPairHex schema");

    let derived = run_json(&["pubkey", &keys.secret_key_hex]);
    assert_eq!(json_str(&derived, "public_key_hex"), keys.public_key_hex);
}

#[test]
fn raw_seed_derivation_matches_fixed_vector() {
    let value = run_json(&["from-seed", "--hex", "--raw", ZERO_SEED]);
    assert_eq!(json_str(&value, "secret_key_hex"), ZERO_SEED_SECRET);
    assert_eq!(json_str(&value, "public_key_hex"), ZERO_SEED_PUBLIC);
}

#[test]
fn text_seed_derivation_matches_fixed_vector() {
    let value = run_json(&["from-seed", "abc"]);
    assert_eq!(
        json_str(&value, "public_key_hex"),
        "031413f3b3aa4e7d440a07f5795e56f5fc011fe5a65b4b576643df8b6ccb49276f"
    );
    assert_eq!(
        json_str(&value, "secret_key_hex"),
        "865b782e77346b6dbf084e900a981e68f85e9e7c3def7c38d2fd6e9879b44502"
    );
}

#[test]
fn chain_walks_two_steps() {
    let value = run_json(&["chain", "abc", "--count", "2"]);
    let keys = value["keys"].as_array().expect("keys array");
    assert_eq!(keys.len(), 2);
    assert_eq!(
        json_str(&keys[1], "public_key_hex"),
        "02d5fb3cd042bb9650ce647c6e803a80172d2bf196366286d5cf8f28e68334379f"
    );
    assert_eq!(keys[1]["index"], 1);
    assert_eq!(
        json_str(&keys[0], "secret_key_hex"),
        "865b782e77346b6dbf084e900a981e68f85e9e7c3def7c38d2fd6e9879b44502"
    );
    assert_eq!(
        json_str(&value, "next_seed_hex"),
        "5400ca2f0525e51a0e60bd953680600c745e7a75e26b382fba250a690721e021"
    );
}

#[test]
fn salted_hash_matches_fixed_vector() {
    let value = run_json(&["salted-hash", "abc"]);
    assert_eq!(
        json_str(&value, "hash_hex"),
        "b01716898ef15329bb688db43129f52d41ccf55e901f33f2a2b8e41a7e45540a"
    );
}

#[test]
fn pubkey_of_one_is_generator() {
    let value = run_json(&["pubkey", SECRET_ONE]);
    assert_eq!(json_str(&value, "public_key_hex"), GENERATOR);

    let uncompressed = run_json(&["uncompress", GENERATOR]);
    let expanded = json_str(&uncompressed, "uncompressed_public_key_hex");
    assert_eq!(expanded.len(), 130);
    assert!(expanded.starts_with(
        "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
    ));
}

#[test]
fn sign_verify_recover_roundtrip() {
    let digest = "11".repeat(32);
    let signed = run_json(&["sign", &digest, ZERO_SEED_SECRET, "--nonce-seed", "cli"]);
    let signature = json_str(&signed, "signature_hex").to_string();
    assert_eq!(signature.len(), 130);

    let again = run_json(&["sign", &digest, ZERO_SEED_SECRET, "--nonce-seed", "cli"]);
    assert_eq!(json_str(&again, "signature_hex"), signature);

    let verified = run_json(&["verify", &digest, &signature, ZERO_SEED_PUBLIC]);
    assert_eq!(verified["valid"], true);
    assert_eq!(json_str(&verified, "reason"), "No error");

    let recovered = run_json(&["recover", &digest, &signature]);
    assert_eq!(json_str(&recovered, "public_key_hex"), ZERO_SEED_PUBLIC);
}

#[test]
fn verify_reports_key_mismatch() {
    let digest = "22".repeat(32);
    let signed = run_json(&["sign", &digest, ZERO_SEED_SECRET]);
    let signature = json_str(&signed, "signature_hex").to_string();

    let output = run_cli(&["verify", &digest, &signature, GENERATOR]);
    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout is utf8");
    assert_eq!(stdout.trim(), "Input public key and recovered public key do not match");
}

#[test]
fn verify_reports_malleable_and_bad_recovery_id() {
    let digest = "33".repeat(32);
    let signed = run_json(&["sign", &digest, ZERO_SEED_SECRET, "--nonce-seed", "cli"]);
    let signature = hex::decode(json_str(&signed, "signature_hex")).expect("signature hex");

    let mut high_s = signature.clone();
    high_s[32] |= 0x80;
    let output = run_cli(&["verify", &digest, &hex::encode(&high_s), ZERO_SEED_PUBLIC]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).expect("stdout is utf8");
    assert_eq!(stdout.trim(), "Signature fails malleability requirement");

    let mut bad_recovery = signature;
    bad_recovery[64] = 9;
    let bad_recovery = hex::encode(&bad_recovery);
    let output = run_cli(&["--json", "verify", &digest, &bad_recovery, ZERO_SEED_PUBLIC]);
    assert_eq!(output.status.code(), Some(1));
    let value: Value = serde_json::from_slice(&output.stdout).expect("stdout is valid json");
    assert_eq!(value["valid"], false);
    assert_eq!(
        json_str(&value, "reason"),
        "Signature recovery byte is invalid, must be 0 to 3 (got 9)"
    );

    let output = run_cli(&["verify", &digest, &"00".repeat(64), ZERO_SEED_PUBLIC]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).expect("stdout is utf8");
    assert_eq!(stdout.trim(), "Signature must be 65 bytes, got 64");
}

#[test]
fn zero_count_is_reported_as_invalid_input() {
    for args in [&["generate", "--count", "0"][..], &["chain", "abc", "--count", "0"]] {
        let output = run_cli(args);
        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("[InvalidInput] count must be >= 1"), "{}", stderr);
    }

    let output = run_cli(&["from-seed", "--raw", "short"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[InvalidInput] raw seed must be 32 bytes, got 5"), "{}", stderr);
}

#[test]
fn ecdh_is_symmetric() {
    let ab = run_json(&["ecdh", GENERATOR, ZERO_SEED_SECRET]);
    let ba = run_json(&["ecdh", ZERO_SEED_PUBLIC, SECRET_ONE]);

    // G * k == (k * G) * 1
    assert_eq!(json_str(&ab, "shared_point_hex"), ZERO_SEED_PUBLIC);
    assert_eq!(json_str(&ab, "shared_point_hex"), json_str(&ba, "shared_point_hex"));
}

#[test]
fn invalid_inputs_fail_without_panicking() {
    let zero_key = "00".repeat(33);
    for args in [
        vec!["uncompress", zero_key.as_str()],
        vec!["pubkey", ZERO_SEED],
        vec!["ecdh", zero_key.as_str(), SECRET_ONE],
        vec!["from-seed", "--raw", "short"],
        vec!["sign", "abcd", SECRET_ONE],
    ] {
        let output = run_cli(&args);
        assert_eq!(output.status.code(), Some(1), "args {:?}: {:?}", args, output);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Error"), "args {:?}: {}", args, stderr);
    }

    let output = run_cli(&["validate", &zero_key]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).expect("stdout is utf8");
    assert!(stdout.contains("code -3"), "{}", stdout);
}
