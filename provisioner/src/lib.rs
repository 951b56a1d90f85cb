//! Provisioning library for keep-tecdsa init containers
//!
//! Prepares operator accounts before the keep-tecdsa client starts: ensures
//! the application's sortition pool exists, funds, bonds, stakes and
//! authorizes each operator, and writes the client configuration file.

pub mod cli;
pub mod context;
pub mod core;
pub mod error;
pub mod provisioner;
pub mod services;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use context::{ChainClientOptions, ProvisioningContext};
pub use error::{AtStep, ChainError, ChainResult, ProvisionerError, ProvisionerResult, ProvisioningFailure};
pub use provisioner::Provisioner;
pub use traits::{ChainClient, ConfigWriter, KeyStore, MockChainClient, MockConfigWriter, MockKeyStore};
pub use types::{
    ClientConfigUpdate, ContractAddresses, OperatorAccount, OperatorReport, ProvisioningAmounts, ProvisioningReport,
    SortitionPoolRef, StepOutcome,
};
