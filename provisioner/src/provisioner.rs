//! Main provisioner implementation
//!
//! Runs the provisioning sequence against injected services: ensure the
//! sortition pool exists, fund, bond, stake and authorize every operator,
//! then write the client configuration. Each step is awaited before the
//! next starts and the first error aborts the run; nothing already committed
//! on chain is rolled back.

use alloy::primitives::Address;
use alloy::primitives::utils::format_ether;
use std::path::{Path, PathBuf};

use shared::{ProvisioningStep, logging, step_debug, step_info, step_warn};

use crate::context::ProvisioningContext;
use crate::core::{delegation_payload, is_funded};
use crate::error::{AtStep, ChainError, ProvisionerError, ProvisionerResult, ProvisioningFailure};
use crate::traits::{ChainClient, ConfigWriter, KeyStore};
use crate::types::{
    ClientConfigUpdate, OperatorAccount, OperatorReport, ProvisioningReport, SortitionPoolRef, StepOutcome,
};

pub struct Provisioner<C, K, W>
where
    C: ChainClient,
    K: KeyStore,
    W: ConfigWriter,
{
    context: ProvisioningContext,

    /// Injected services
    chain: C,
    key_store: K,
    config_writer: W,
}

impl<C, K, W> Provisioner<C, K, W>
where
    C: ChainClient,
    K: KeyStore,
    W: ConfigWriter,
{
    pub fn new(context: ProvisioningContext, chain: C, key_store: K, config_writer: W) -> Self {
        Self {
            context,
            chain,
            key_store,
            config_writer,
        }
    }

    /// Run the whole provisioning sequence
    ///
    /// The returned failure names the step that aborted the run.
    pub async fn run(&self) -> Result<ProvisioningReport, ProvisioningFailure> {
        step_info!(
            ProvisioningStep::SortitionPool,
            "🏊 Ensuring sortition pool for application {}",
            self.context.application
        );
        let sortition_pool = self
            .ensure_sortition_pool()
            .await
            .at_step(ProvisioningStep::SortitionPool)?;

        let mut operators = Vec::with_capacity(self.context.operator_key_files.len());
        for key_file in &self.context.operator_key_files {
            let operator = self.resolve_operator(key_file).await.at_step(ProvisioningStep::KeyFile)?;
            operators.push(self.provision_operator(operator, &sortition_pool).await?);
        }

        let accounts: Vec<OperatorAccount> = operators.iter().map(|r| r.operator.clone()).collect();
        let config_path = self
            .write_client_config(&sortition_pool, &accounts)
            .await
            .at_step(ProvisioningStep::ClientConfig)?;

        Ok(ProvisioningReport {
            sortition_pool,
            operators,
            config_path,
        })
    }

    async fn provision_operator(
        &self,
        operator: OperatorAccount,
        pool: &SortitionPoolRef,
    ) -> Result<OperatorReport, ProvisioningFailure> {
        step_info!(
            ProvisioningStep::KeyFile,
            "👷 Provisioning operator {} from {}",
            operator.address,
            operator.key_file.display()
        );

        let funding = self.fund_operator(&operator).await.at_step(ProvisioningStep::Funding)?;
        self.deposit_bonding_value(&operator)
            .await
            .at_step(ProvisioningStep::BondingDeposit)?;
        let staking = self.stake_operator(&operator).await.at_step(ProvisioningStep::Staking)?;
        self.authorize_operator_contract(&operator)
            .await
            .at_step(ProvisioningStep::OperatorAuthorization)?;
        self.authorize_sortition_pool_contract(&operator, pool)
            .await
            .at_step(ProvisioningStep::PoolAuthorization)?;

        Ok(OperatorReport {
            operator,
            funding,
            staking,
        })
    }

    /// Look up the application's sortition pool, creating it when absent
    pub async fn ensure_sortition_pool(&self) -> ProvisionerResult<SortitionPoolRef> {
        let application = self.context.application;

        let pool = match self.chain.get_sortition_pool(application).await {
            Ok(pool) => {
                step_info!(
                    ProvisioningStep::SortitionPool,
                    "Sortition pool already exists for application {}",
                    application
                );
                pool
            }
            Err(ChainError::PoolNotFound { .. }) => {
                step_warn!(
                    ProvisioningStep::SortitionPool,
                    "No sortition pool for application {}, creating one",
                    application
                );
                let tx_hash = self
                    .chain
                    .create_sortition_pool(self.context.contract_owner, application)
                    .await?;
                step_info!(
                    ProvisioningStep::SortitionPool,
                    "Created sortition pool for application {} in {}",
                    application,
                    tx_hash
                );
                self.chain.get_sortition_pool(application).await?
            }
            Err(other) => return Err(other.into()),
        };

        if pool == Address::ZERO {
            return Err(ProvisionerError::PoolUnavailable { application });
        }

        step_info!(ProvisioningStep::SortitionPool, "Sortition pool contract address: {}", pool);
        Ok(SortitionPoolRef { application, pool })
    }

    /// Read an operator address from its key file
    pub async fn resolve_operator(&self, key_file: &Path) -> ProvisionerResult<OperatorAccount> {
        let address = self.key_store.read_operator_address(key_file).await?;
        step_debug!(
            ProvisioningStep::KeyFile,
            "🔑 Operator {} read from {}",
            address,
            key_file.display()
        );
        Ok(OperatorAccount {
            address,
            key_file: key_file.to_path_buf(),
        })
    }

    /// Transfer the funding amount from the purse unless already funded
    pub async fn fund_operator(&self, operator: &OperatorAccount) -> ProvisionerResult<StepOutcome> {
        let amounts = &self.context.amounts;
        let balance = self.chain.native_balance(operator.address).await?;

        if is_funded(balance, amounts.funding_threshold) {
            step_info!(
                ProvisioningStep::Funding,
                "Operator {} already funded ({} ether), skipping",
                operator.address,
                format_ether(balance)
            );
            return Ok(StepOutcome::Skipped);
        }

        step_info!(
            ProvisioningStep::Funding,
            "Funding operator {} with {} ether from purse {}",
            operator.address,
            format_ether(amounts.funding_transfer),
            self.context.purse
        );
        let tx_hash = self
            .chain
            .transfer(self.context.purse, operator.address, amounts.funding_transfer)
            .await?;
        logging::log_success(ProvisioningStep::Funding, &format!("Operator {} funded in {tx_hash}", operator.address));
        Ok(StepOutcome::Applied)
    }

    /// Deposit bonding value for the operator
    ///
    /// Sent on every run; repeated runs add to the operator's unbonded value.
    pub async fn deposit_bonding_value(&self, operator: &OperatorAccount) -> ProvisionerResult<()> {
        let amount = self.context.amounts.bonding_deposit;
        let tx_hash = self
            .chain
            .deposit_bonding_value(self.context.purse, operator.address, amount)
            .await?;
        step_info!(
            ProvisioningStep::BondingDeposit,
            "Deposited {} ether bonding value for operator {} in {}",
            format_ether(amount),
            operator.address,
            tx_hash
        );
        Ok(())
    }

    /// Delegate stake to the operator unless it already has stake
    pub async fn stake_operator(&self, operator: &OperatorAccount) -> ProvisionerResult<StepOutcome> {
        let staked = self.chain.staked_balance(operator.address).await?;

        if !staked.is_zero() {
            step_info!(
                ProvisioningStep::Staking,
                "Operator {} already staked, skipping",
                operator.address
            );
            return Ok(StepOutcome::Skipped);
        }

        let amount = self.context.amounts.stake;
        step_info!(
            ProvisioningStep::Staking,
            "Staking {} tokens on operator {}",
            format_ether(amount),
            operator.address
        );

        let delegation = delegation_payload(self.context.contract_owner, operator.address, self.context.authorizer);
        let tx_hash = self
            .chain
            .delegate_stake(self.context.contract_owner, amount, delegation)
            .await?;
        logging::log_success(ProvisioningStep::Staking, &format!("Operator {} staked in {tx_hash}", operator.address));
        Ok(StepOutcome::Applied)
    }

    /// Authorize the keep factory as operator contract
    ///
    /// No pre-check; the staking contract rejects a repeated authorization.
    pub async fn authorize_operator_contract(&self, operator: &OperatorAccount) -> ProvisionerResult<()> {
        let operator_contract = self.context.contracts.keep_factory;
        step_info!(
            ProvisioningStep::OperatorAuthorization,
            "Authorizing operator contract {} for operator {}",
            operator_contract,
            operator.address
        );
        let tx_hash = self
            .chain
            .authorize_operator_contract(self.context.authorizer, operator.address, operator_contract)
            .await?;
        logging::log_success(ProvisioningStep::OperatorAuthorization, &format!("Authorized in {tx_hash}"));
        Ok(())
    }

    /// Authorize the sortition pool on the bonding contract
    pub async fn authorize_sortition_pool_contract(
        &self,
        operator: &OperatorAccount,
        pool: &SortitionPoolRef,
    ) -> ProvisionerResult<()> {
        step_info!(
            ProvisioningStep::PoolAuthorization,
            "Authorizing sortition pool contract {} for operator {}",
            pool.pool,
            operator.address
        );
        let tx_hash = self
            .chain
            .authorize_sortition_pool_contract(self.context.authorizer, operator.address, pool.pool)
            .await?;
        logging::log_success(ProvisioningStep::PoolAuthorization, &format!("Authorized in {tx_hash}"));
        Ok(())
    }

    /// Write the client configuration for the provisioned operators
    pub async fn write_client_config(
        &self,
        pool: &SortitionPoolRef,
        operators: &[OperatorAccount],
    ) -> ProvisionerResult<PathBuf> {
        let update = ClientConfigUpdate {
            ethereum_url: self.context.ws_url.clone(),
            key_files: operators
                .iter()
                .map(|op| op.key_file.to_string_lossy().into_owned())
                .collect(),
            keep_factory: self.context.contracts.keep_factory,
            sanctioned_applications: vec![pool.application],
            data_dir: self.context.data_dir.clone(),
        };

        let path = self.config_writer.write_client_config(&update).await?;
        logging::log_success(
            ProvisioningStep::ClientConfig,
            &format!("keep-tecdsa config written to {}", path.display()),
        );
        Ok(path)
    }
}
