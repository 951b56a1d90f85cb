//! Tests for operator key file parsing

use alloy::primitives::address;
use std::path::Path;

use crate::error::ProvisionerError;
use crate::services::key_store::{FileKeyStore, parse_key_file_address};
use crate::traits::KeyStore;

const KEYSTORE: &str = r#"{
    "address": "90f8bf6a479f320ead074411a4b0e7944ea8c9c1",
    "crypto": {
        "cipher": "aes-128-ctr",
        "ciphertext": "00",
        "cipherparams": { "iv": "00" },
        "kdf": "scrypt",
        "kdfparams": { "dklen": 32, "n": 262144, "p": 1, "r": 8, "salt": "00" },
        "mac": "00"
    },
    "id": "3198bc9c-6672-5ab3-d995-4942343ae5b6",
    "version": 3
}"#;

#[test]
fn test_address_without_prefix() {
    let address = parse_key_file_address(Path::new("op.json"), KEYSTORE).unwrap();
    assert_eq!(address, address!("0x90f8bf6a479f320ead074411a4b0e7944ea8c9c1"));
}

#[test]
fn test_address_with_prefix() {
    let content = r#"{"address": "0x90F8bf6A479f320ead074411a4B0e7944Ea8c9C1"}"#;
    let address = parse_key_file_address(Path::new("op.json"), content).unwrap();
    assert_eq!(address, address!("0x90f8bf6a479f320ead074411a4b0e7944ea8c9c1"));
}

#[test]
fn test_missing_address_field() {
    let result = parse_key_file_address(Path::new("op.json"), r#"{"version": 3}"#);
    match result {
        Err(ProvisionerError::KeyFile { path, message }) => {
            assert_eq!(path, Path::new("op.json"));
            assert!(message.contains("address"));
        }
        other => panic!("expected key file error, got {other:?}"),
    }
}

#[test]
fn test_invalid_address_value() {
    let result = parse_key_file_address(Path::new("op.json"), r#"{"address": "zz"}"#);
    assert!(matches!(result, Err(ProvisionerError::KeyFile { .. })));
}

#[test]
fn test_invalid_json() {
    let result = parse_key_file_address(Path::new("op.json"), "not json");
    assert!(matches!(result, Err(ProvisionerError::KeyFile { .. })));
}

#[tokio::test]
async fn test_file_key_store_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("operator-1.json");
    tokio::fs::write(&path, KEYSTORE).await.unwrap();

    let address = FileKeyStore::new().read_operator_address(&path).await.unwrap();

    assert_eq!(address, address!("0x90f8bf6a479f320ead074411a4b0e7944ea8c9c1"));
}

#[tokio::test]
async fn test_file_key_store_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = FileKeyStore::new()
        .read_operator_address(&dir.path().join("absent.json"))
        .await;
    assert!(matches!(result, Err(ProvisionerError::KeyFile { .. })));
}
