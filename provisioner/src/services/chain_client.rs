//! alloy-backed chain client
//!
//! Sends every transaction from the local owner wallet over HTTP, waits for
//! the configured number of confirmations and rejects reverted receipts.

use alloy::network::{EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use alloy::sol_types::Revert;
use async_trait::async_trait;
use url::Url;

use crate::context::ChainClientOptions;
use crate::error::{ChainError, ChainResult, ProvisionerError, ProvisionerResult};
use crate::traits::ChainClient;
use crate::types::ContractAddresses;

sol! {
    #[sol(rpc)]
    interface BondedECDSAKeepFactory {
        function getSortitionPool(address _application) external view returns (address);
        function createSortitionPool(address _application) external returns (address);
    }

    #[sol(rpc)]
    interface KeepBonding {
        function deposit(address operator) external payable;
        function authorizeSortitionPoolContract(address _operator, address _poolAddress) external;
    }

    #[sol(rpc)]
    interface TokenStaking {
        function balanceOf(address _address) external view returns (uint256);
        function authorizeOperatorContract(address _operator, address _operatorContract) external;
    }

    #[sol(rpc)]
    interface KeepToken {
        function approveAndCall(address _spender, uint256 _value, bytes _extraData) external returns (bool);
    }
}

/// Revert reason of `getSortitionPool` for an application without a pool
pub const POOL_NOT_FOUND_REASON: &str = "No pool found for the application";

/// Map a failed `getSortitionPool` call onto the structured error
///
/// The ABI-encoded revert reason is checked first. Nodes that only report
/// the reason in the error message are matched on the message text.
pub fn classify_pool_lookup_error(application: Address, error: &alloy::contract::Error) -> ChainError {
    let revert_reason = error.as_decoded_error::<Revert>().map(|revert| revert.reason);
    classify_pool_lookup_failure(application, revert_reason.as_deref(), &error.to_string())
}

/// Classify a pool lookup failure from its decoded revert reason and message
pub fn classify_pool_lookup_failure(application: Address, revert_reason: Option<&str>, message: &str) -> ChainError {
    let not_found = match revert_reason {
        Some(reason) => reason == POOL_NOT_FOUND_REASON,
        None => message.contains(POOL_NOT_FOUND_REASON),
    };

    if not_found {
        ChainError::PoolNotFound { application }
    } else {
        ChainError::Rpc {
            operation: "getSortitionPool".to_string(),
            message: message.to_string(),
        }
    }
}

pub struct RealChainClient {
    provider: DynProvider,
    contracts: ContractAddresses,
    options: ChainClientOptions,
}

impl RealChainClient {
    /// Connect to an HTTP endpoint with the owner's signer as wallet
    pub fn connect(
        rpc_url: &str,
        signer: PrivateKeySigner,
        contracts: ContractAddresses,
        options: ChainClientOptions,
    ) -> ProvisionerResult<Self> {
        let url = Url::parse(rpc_url).map_err(|e| ProvisionerError::config(format!("invalid RPC URL {rpc_url}: {e}")))?;

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();

        Ok(Self {
            provider,
            contracts,
            options,
        })
    }

    /// Wait for the receipt and turn a reverted status into an error
    async fn confirm(&self, operation: &str, pending: PendingTransactionBuilder<alloy::network::Ethereum>) -> ChainResult<TxHash> {
        let receipt = pending
            .with_required_confirmations(self.options.confirmations)
            .with_timeout(Some(self.options.receipt_timeout))
            .get_receipt()
            .await
            .map_err(|e| ChainError::rpc(operation, e))?;

        let tx_hash = receipt.transaction_hash();
        if !receipt.status() {
            return Err(ChainError::Reverted {
                operation: operation.to_string(),
                tx_hash,
            });
        }
        Ok(tx_hash)
    }
}

#[async_trait]
impl ChainClient for RealChainClient {
    async fn native_balance(&self, account: Address) -> ChainResult<U256> {
        self.provider
            .get_balance(account)
            .await
            .map_err(|e| ChainError::rpc("eth_getBalance", e))
    }

    async fn transfer(&self, from: Address, to: Address, amount: U256) -> ChainResult<TxHash> {
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_value(amount)
            .with_gas_limit(self.options.gas_limit);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ChainError::rpc("eth_sendTransaction", e))?;
        self.confirm("eth_sendTransaction", pending).await
    }

    async fn deposit_bonding_value(&self, from: Address, operator: Address, amount: U256) -> ChainResult<TxHash> {
        let bonding = KeepBonding::new(self.contracts.keep_bonding, self.provider.clone());
        let pending = bonding
            .deposit(operator)
            .from(from)
            .value(amount)
            .gas(self.options.gas_limit)
            .send()
            .await
            .map_err(|e| ChainError::rpc("KeepBonding.deposit", e))?;
        self.confirm("KeepBonding.deposit", pending).await
    }

    async fn staked_balance(&self, operator: Address) -> ChainResult<U256> {
        let staking = TokenStaking::new(self.contracts.token_staking, self.provider.clone());
        staking
            .balanceOf(operator)
            .call()
            .await
            .map_err(|e| ChainError::rpc("TokenStaking.balanceOf", e))
    }

    async fn delegate_stake(&self, owner: Address, amount: U256, delegation: Bytes) -> ChainResult<TxHash> {
        let token = KeepToken::new(self.contracts.keep_token, self.provider.clone());
        let pending = token
            .approveAndCall(self.contracts.token_staking, amount, delegation)
            .from(owner)
            .gas(self.options.gas_limit)
            .send()
            .await
            .map_err(|e| ChainError::rpc("KeepToken.approveAndCall", e))?;
        self.confirm("KeepToken.approveAndCall", pending).await
    }

    async fn authorize_operator_contract(
        &self,
        authorizer: Address,
        operator: Address,
        operator_contract: Address,
    ) -> ChainResult<TxHash> {
        let staking = TokenStaking::new(self.contracts.token_staking, self.provider.clone());
        let pending = staking
            .authorizeOperatorContract(operator, operator_contract)
            .from(authorizer)
            .gas(self.options.gas_limit)
            .send()
            .await
            .map_err(|e| ChainError::rpc("TokenStaking.authorizeOperatorContract", e))?;
        self.confirm("TokenStaking.authorizeOperatorContract", pending).await
    }

    async fn authorize_sortition_pool_contract(
        &self,
        authorizer: Address,
        operator: Address,
        pool: Address,
    ) -> ChainResult<TxHash> {
        let bonding = KeepBonding::new(self.contracts.keep_bonding, self.provider.clone());
        let pending = bonding
            .authorizeSortitionPoolContract(operator, pool)
            .from(authorizer)
            .gas(self.options.gas_limit)
            .send()
            .await
            .map_err(|e| ChainError::rpc("KeepBonding.authorizeSortitionPoolContract", e))?;
        self.confirm("KeepBonding.authorizeSortitionPoolContract", pending).await
    }

    async fn get_sortition_pool(&self, application: Address) -> ChainResult<Address> {
        let factory = BondedECDSAKeepFactory::new(self.contracts.keep_factory, self.provider.clone());
        factory
            .getSortitionPool(application)
            .call()
            .await
            .map_err(|e| classify_pool_lookup_error(application, &e))
    }

    async fn create_sortition_pool(&self, owner: Address, application: Address) -> ChainResult<TxHash> {
        let factory = BondedECDSAKeepFactory::new(self.contracts.keep_factory, self.provider.clone());
        let pending = factory
            .createSortitionPool(application)
            .from(owner)
            .gas(self.options.gas_limit)
            .send()
            .await
            .map_err(|e| ChainError::rpc("BondedECDSAKeepFactory.createSortitionPool", e))?;
        self.confirm("BondedECDSAKeepFactory.createSortitionPool", pending).await
    }
}
