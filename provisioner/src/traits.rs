//! Trait definitions with mockall annotations for testing
//!
//! The provisioner only talks to the chain, the key files and the client
//! configuration through these traits, so every step can be driven by mocks.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use std::path::{Path, PathBuf};

use crate::error::{ChainResult, ProvisionerResult};
use crate::types::ClientConfigUpdate;

/// Chain client abstraction over RPC connectivity and contract calls
///
/// Every mutating call resolves once the transaction receipt is available
/// and returns the transaction hash.
#[mockall::automock]
#[async_trait::async_trait]
pub trait ChainClient: Send + Sync {
    /// Native-token balance of an account, in wei
    async fn native_balance(&self, account: Address) -> ChainResult<U256>;

    /// Transfer native token between two accounts
    async fn transfer(&self, from: Address, to: Address, amount: U256) -> ChainResult<TxHash>;

    /// Deposit bonding value for an operator on the bonding contract
    async fn deposit_bonding_value(
        &self,
        from: Address,
        operator: Address,
        amount: U256,
    ) -> ChainResult<TxHash>;

    /// Amount of tokens staked on an operator
    async fn staked_balance(&self, operator: Address) -> ChainResult<U256>;

    /// Delegate stake through the token's `approveAndCall` into the staking contract
    ///
    /// # Parameters
    /// - `owner`: Token owner sending the transaction
    /// - `amount`: Stake amount in the token's smallest unit
    /// - `delegation`: Packed `owner || operator || authorizer` payload
    async fn delegate_stake(&self, owner: Address, amount: U256, delegation: Bytes) -> ChainResult<TxHash>;

    /// Authorize an operator contract on the staking contract
    async fn authorize_operator_contract(
        &self,
        authorizer: Address,
        operator: Address,
        operator_contract: Address,
    ) -> ChainResult<TxHash>;

    /// Authorize a sortition pool on the bonding contract
    async fn authorize_sortition_pool_contract(
        &self,
        authorizer: Address,
        operator: Address,
        pool: Address,
    ) -> ChainResult<TxHash>;

    /// Look up the sortition pool of an application
    ///
    /// # Returns
    /// The pool address, or `ChainError::PoolNotFound` when the factory has
    /// no pool registered for the application
    async fn get_sortition_pool(&self, application: Address) -> ChainResult<Address>;

    /// Create a sortition pool for an application
    async fn create_sortition_pool(&self, owner: Address, application: Address) -> ChainResult<TxHash>;
}

/// Access to operator key files
#[mockall::automock]
#[async_trait::async_trait]
pub trait KeyStore: Send + Sync {
    /// Read the operator address stored in a key file
    async fn read_operator_address(&self, key_file: &Path) -> ProvisionerResult<Address>;
}

/// Producer of the client configuration file
#[mockall::automock]
#[async_trait::async_trait]
pub trait ConfigWriter: Send + Sync {
    /// Render the template with the runtime values and persist it
    ///
    /// # Returns
    /// Path of the written configuration file
    async fn write_client_config(&self, update: &ClientConfigUpdate) -> ProvisionerResult<PathBuf>;
}
