//! Provisioner-specific error types

use alloy::primitives::{Address, TxHash};
use shared::{ProvisioningStep, SharedError};
use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by the chain client
///
/// The sortition pool lookup distinguishes "no pool registered for the
/// application" from every other failure, so the provisioner can decide
/// between creating a pool and aborting without inspecting messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("No sortition pool found for application {application}")]
    PoolNotFound { application: Address },

    #[error("Chain call {operation} failed: {message}")]
    Rpc { operation: String, message: String },

    #[error("Transaction {tx_hash} for {operation} reverted")]
    Reverted { operation: String, tx_hash: TxHash },
}

impl ChainError {
    pub fn rpc(operation: &str, error: impl std::fmt::Display) -> Self {
        ChainError::Rpc {
            operation: operation.to_string(),
            message: error.to_string(),
        }
    }
}

pub type ChainResult<T> = Result<T, ChainError>;

#[derive(Error, Debug)]
pub enum ProvisionerError {
    #[error("Chain operation failed: {0}")]
    Chain(#[from] ChainError),

    #[error("Sortition pool for application {application} is unavailable")]
    PoolUnavailable { application: Address },

    #[error("Key file {} is invalid: {message}", path.display())]
    KeyFile { path: PathBuf, message: String },

    #[error("Contract artifact {contract} is invalid: {message}")]
    Artifact { contract: String, message: String },

    #[error("Configuration error: {field}")]
    ConfigurationError { field: String },

    #[error("Client config template {} is invalid: {message}", path.display())]
    ConfigTemplate { path: PathBuf, message: String },

    #[error("File system operation failed: {operation} on {}", path.display())]
    FileSystemError {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Shared component error")]
    SharedError(#[from] SharedError),

    #[error("TOML serialization error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
}

impl ProvisionerError {
    pub fn config(field: impl Into<String>) -> Self {
        ProvisionerError::ConfigurationError { field: field.into() }
    }

    pub fn file_system(operation: &str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProvisionerError::FileSystemError {
            operation: operation.to_string(),
            path: path.into(),
            source,
        }
    }

    pub fn key_file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ProvisionerError::KeyFile {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn artifact(contract: &str, message: impl Into<String>) -> Self {
        ProvisionerError::Artifact {
            contract: contract.to_string(),
            message: message.into(),
        }
    }
}

pub type ProvisionerResult<T> = Result<T, ProvisionerError>;

/// A provisioning run aborted by the error of one step
#[derive(Error, Debug)]
#[error("{step} step failed: {error}")]
pub struct ProvisioningFailure {
    pub step: ProvisioningStep,
    #[source]
    pub error: ProvisionerError,
}

/// Attach the running step to a step's error
pub trait AtStep<T> {
    fn at_step(self, step: ProvisioningStep) -> Result<T, ProvisioningFailure>;
}

impl<T> AtStep<T> for ProvisionerResult<T> {
    fn at_step(self, step: ProvisioningStep) -> Result<T, ProvisioningFailure> {
        self.map_err(|error| ProvisioningFailure { step, error })
    }
}
