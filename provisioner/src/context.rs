//! Process-wide provisioning context
//!
//! Built once at startup from the parsed arguments and the contract
//! artifacts, then only ever read.

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use shared::SharedError;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::{Args, env_vars};
use crate::error::{ProvisionerError, ProvisionerResult};
use crate::types::{ContractAddresses, ProvisioningAmounts};

/// Transaction submission settings for the chain client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainClientOptions {
    pub confirmations: u64,
    pub receipt_timeout: Duration,
    pub gas_limit: u64,
}

impl Default for ChainClientOptions {
    fn default() -> Self {
        Self {
            confirmations: 3,
            receipt_timeout: Duration::from_secs(480),
            gas_limit: 4_712_388,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningContext {
    pub contract_owner: Address,
    pub authorizer: Address,
    pub purse: Address,
    pub network_id: String,
    pub rpc_url: String,
    pub ws_url: String,
    pub application: Address,
    pub operator_key_files: Vec<PathBuf>,
    pub data_dir: String,
    pub contracts: ContractAddresses,
    pub amounts: ProvisioningAmounts,
}

impl ProvisioningContext {
    pub fn from_args(args: &Args, contracts: ContractAddresses) -> ProvisionerResult<Self> {
        let operator_key_files = args.operator_key_files();
        if operator_key_files.is_empty() {
            return Err(SharedError::MissingConfig {
                field: env_vars::OPERATOR_KEY_FILE_1.to_string(),
            }
            .into());
        }

        Ok(Self {
            contract_owner: args.contract_owner,
            authorizer: args.contract_owner,
            purse: args.contract_owner,
            network_id: args.eth_network_id.clone(),
            rpc_url: args.eth_rpc_url.clone(),
            ws_url: args.eth_ws_url.clone(),
            application: args.application,
            operator_key_files,
            data_dir: args.data_dir.clone(),
            contracts,
            amounts: ProvisioningAmounts::default(),
        })
    }
}

impl ChainClientOptions {
    pub fn from_args(args: &Args) -> Self {
        Self {
            confirmations: args.confirmations,
            receipt_timeout: Duration::from_secs(args.receipt_timeout_secs),
            gas_limit: args.gas_limit,
        }
    }
}

/// Parse the owner's private key and check it signs for the owner address
pub fn owner_signer(private_key: &str, owner: Address) -> ProvisionerResult<PrivateKeySigner> {
    let signer: PrivateKeySigner = private_key
        .trim()
        .parse()
        .map_err(|_| ProvisionerError::config(env_vars::CONTRACT_OWNER_PRIVATE_KEY))?;

    if signer.address() != owner {
        return Err(SharedError::InvalidConfig {
            field: env_vars::CONTRACT_OWNER_ADDRESS.to_string(),
            value: format!("{owner} (private key belongs to {})", signer.address()),
        }
        .into());
    }

    Ok(signer)
}
