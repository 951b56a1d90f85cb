//! Operator key files
//!
//! Key files are Ethereum JSON keystores; only the `address` field is read.
//! Keystores usually store the address without a `0x` prefix.

use alloy::primitives::Address;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

use crate::error::{ProvisionerError, ProvisionerResult};
use crate::traits::KeyStore;

#[derive(Debug, Deserialize)]
struct KeyFileContent {
    address: Option<String>,
}

/// Parse the operator address out of key file content
pub fn parse_key_file_address(path: &Path, content: &str) -> ProvisionerResult<Address> {
    let key_file: KeyFileContent =
        serde_json::from_str(content).map_err(|e| ProvisionerError::key_file(path, e.to_string()))?;

    let raw = key_file
        .address
        .ok_or_else(|| ProvisionerError::key_file(path, "missing address field"))?;

    raw.trim()
        .parse()
        .map_err(|_| ProvisionerError::key_file(path, format!("invalid address {raw}")))
}

/// Key store reading key files from the local file system
#[derive(Debug, Default, Clone, Copy)]
pub struct FileKeyStore;

impl FileKeyStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KeyStore for FileKeyStore {
    async fn read_operator_address(&self, key_file: &Path) -> ProvisionerResult<Address> {
        let content = tokio::fs::read_to_string(key_file)
            .await
            .map_err(|e| ProvisionerError::key_file(key_file, e.to_string()))?;
        parse_key_file_address(key_file, &content)
    }
}
