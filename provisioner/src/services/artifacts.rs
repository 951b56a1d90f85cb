//! Truffle contract artifacts
//!
//! Each contract ships as `<ContractName>.json` holding the ABI and a
//! `networks` map from network id to deployment record. Only the deployment
//! address is taken from it; the ABI is checked for the functions the
//! provisioner calls so a stale artifact fails before any transaction.

use alloy::json_abi::JsonAbi;
use alloy::primitives::Address;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{ProvisionerError, ProvisionerResult};
use crate::types::ContractAddresses;
use shared::{ProvisioningStep, step_debug};

pub const KEEP_FACTORY: &str = "BondedECDSAKeepFactory";
pub const KEEP_BONDING: &str = "KeepBonding";
pub const TOKEN_STAKING: &str = "TokenStaking";
pub const KEEP_TOKEN: &str = "KeepToken";

/// Contract name paired with the functions the provisioner needs from it
const REQUIRED_FUNCTIONS: &[(&str, &[&str])] = &[
    (KEEP_FACTORY, &["getSortitionPool", "createSortitionPool"]),
    (KEEP_BONDING, &["deposit", "authorizeSortitionPoolContract"]),
    (TOKEN_STAKING, &["balanceOf", "authorizeOperatorContract"]),
    (KEEP_TOKEN, &["approveAndCall"]),
];

#[derive(Debug, Deserialize)]
struct NetworkDeployment {
    address: String,
}

#[derive(Debug, Deserialize)]
pub struct ContractArtifact {
    pub abi: JsonAbi,
    #[serde(default)]
    networks: HashMap<String, NetworkDeployment>,
}

impl ContractArtifact {
    pub fn parse(contract: &str, content: &str) -> ProvisionerResult<Self> {
        serde_json::from_str(content).map_err(|e| ProvisionerError::artifact(contract, e.to_string()))
    }

    /// Deployment address for a network id
    pub fn address(&self, contract: &str, network_id: &str) -> ProvisionerResult<Address> {
        let deployment = self
            .networks
            .get(network_id)
            .ok_or_else(|| ProvisionerError::artifact(contract, format!("no deployment for network {network_id}")))?;

        deployment
            .address
            .parse()
            .map_err(|_| ProvisionerError::artifact(contract, format!("invalid address {}", deployment.address)))
    }

    /// Fail unless the ABI declares every named function
    pub fn require_functions(&self, contract: &str, functions: &[&str]) -> ProvisionerResult<()> {
        let missing: Vec<&str> = functions
            .iter()
            .copied()
            .filter(|name| self.abi.function(name).is_none())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ProvisionerError::artifact(
                contract,
                format!("ABI is missing {}", missing.join(", ")),
            ))
        }
    }
}

/// Loads artifacts from a directory
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn artifact_path(&self, contract: &str) -> PathBuf {
        self.dir.join(format!("{contract}.json"))
    }

    pub async fn load(&self, contract: &str) -> ProvisionerResult<ContractArtifact> {
        let path = self.artifact_path(contract);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ProvisionerError::file_system("read artifact", &path, e))?;
        ContractArtifact::parse(contract, &content)
    }

    /// Resolve and validate the deployment address of one contract
    pub async fn contract_address(&self, contract: &str, network_id: &str) -> ProvisionerResult<Address> {
        let artifact = self.load(contract).await?;

        let functions = REQUIRED_FUNCTIONS
            .iter()
            .find(|(name, _)| *name == contract)
            .map(|(_, functions)| *functions)
            .unwrap_or_default();
        artifact.require_functions(contract, functions)?;

        let address = artifact.address(contract, network_id)?;
        step_debug!(ProvisioningStep::Startup, "📄 {} deployed at {} on network {}", contract, address, network_id);
        Ok(address)
    }

    /// Resolve every contract the provisioner talks to
    pub async fn contract_addresses(&self, network_id: &str) -> ProvisionerResult<ContractAddresses> {
        Ok(ContractAddresses {
            keep_factory: self.contract_address(KEEP_FACTORY, network_id).await?,
            keep_bonding: self.contract_address(KEEP_BONDING, network_id).await?,
            token_staking: self.contract_address(TOKEN_STAKING, network_id).await?,
            keep_token: self.contract_address(KEEP_TOKEN, network_id).await?,
        })
    }
}
