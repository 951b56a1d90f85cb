//! Domain types shared by the provisioner and its services

use alloy::primitives::{Address, U256};
use std::path::PathBuf;

use crate::core::amounts::{ether, format_amount};

/// An operator account resolved from its key file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorAccount {
    pub address: Address,
    pub key_file: PathBuf,
}

/// Sortition pool registered for an application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortitionPoolRef {
    pub application: Address,
    pub pool: Address,
}

/// Deployment addresses of the contracts the provisioner talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    pub keep_factory: Address,
    pub keep_bonding: Address,
    pub token_staking: Address,
    pub keep_token: Address,
}

/// Amounts used by the funding, bonding and staking steps (all in wei)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisioningAmounts {
    /// Operators holding at least this much native token are considered funded
    pub funding_threshold: U256,
    pub funding_transfer: U256,
    pub bonding_deposit: U256,
    pub stake: U256,
}

impl Default for ProvisioningAmounts {
    fn default() -> Self {
        Self {
            funding_threshold: ether(1),
            funding_transfer: ether(10),
            bonding_deposit: ether(50),
            stake: format_amount(20_000_000, 18),
        }
    }
}

/// Result of a step that checks on-chain state before mutating it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Applied,
    Skipped,
}

impl StepOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, StepOutcome::Applied)
    }
}

/// Per-operator summary of a provisioning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorReport {
    pub operator: OperatorAccount,
    pub funding: StepOutcome,
    pub staking: StepOutcome,
}

/// Summary of a complete provisioning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningReport {
    pub sortition_pool: SortitionPoolRef,
    pub operators: Vec<OperatorReport>,
    pub config_path: PathBuf,
}

/// Runtime values written over the client configuration template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfigUpdate {
    pub ethereum_url: String,
    pub key_files: Vec<String>,
    pub keep_factory: Address,
    pub sanctioned_applications: Vec<Address>,
    pub data_dir: String,
}
