//! Test helpers and builder patterns for provisioner tests
//!
//! `ProvisionerBuilder::fresh_chain` describes a chain where the pool
//! exists, operators hold neither native token nor stake, and every
//! transaction succeeds. Tests override the expectations they care about.

use alloy::primitives::{Address, U256};
use provisioner::{
    MockChainClient, MockConfigWriter, MockKeyStore, OperatorAccount, Provisioner, ProvisioningContext, ProvisioningReport,
    SortitionPoolRef,
};
use std::path::PathBuf;

use super::fixtures::TestFixtures;

/// Builder pattern for creating test provisioners with sensible defaults
pub struct ProvisionerBuilder {
    context: ProvisioningContext,
    chain: MockChainClient,
    key_store: MockKeyStore,
    config_writer: MockConfigWriter,
    fresh_chain_defaults: bool,
}

impl ProvisionerBuilder {
    /// Create a builder with strict mocks: any call without an expectation panics
    pub fn new() -> Self {
        Self {
            context: TestFixtures::context(),
            chain: MockChainClient::new(),
            key_store: MockKeyStore::new(),
            config_writer: MockConfigWriter::new(),
            fresh_chain_defaults: false,
        }
    }

    /// Create a builder whose mocks accept every call of a full run
    ///
    /// The defaults are added in `build`, after the test's own expectations.
    /// mockall matches expectations in creation order and skips saturated
    /// ones, so anything set through `with_*` takes precedence.
    pub fn fresh_chain() -> Self {
        Self {
            fresh_chain_defaults: true,
            ..Self::new()
        }
    }

    fn add_fresh_chain_defaults(&mut self) {
        self.key_store
            .expect_read_operator_address()
            .returning(|path| Ok(TestFixtures::operator_for(path)))
            .times(0..);

        self.chain
            .expect_get_sortition_pool()
            .returning(|_| Ok(TestFixtures::POOL))
            .times(0..);
        self.chain
            .expect_native_balance()
            .returning(|_| Ok(U256::ZERO))
            .times(0..);
        self.chain
            .expect_transfer()
            .returning(|_, _, _| Ok(TestFixtures::tx_hash(1)))
            .times(0..);
        self.chain
            .expect_deposit_bonding_value()
            .returning(|_, _, _| Ok(TestFixtures::tx_hash(2)))
            .times(0..);
        self.chain
            .expect_staked_balance()
            .returning(|_| Ok(U256::ZERO))
            .times(0..);
        self.chain
            .expect_delegate_stake()
            .returning(|_, _, _| Ok(TestFixtures::tx_hash(3)))
            .times(0..);
        self.chain
            .expect_authorize_operator_contract()
            .returning(|_, _, _| Ok(TestFixtures::tx_hash(4)))
            .times(0..);
        self.chain
            .expect_authorize_sortition_pool_contract()
            .returning(|_, _, _| Ok(TestFixtures::tx_hash(5)))
            .times(0..);

        self.config_writer
            .expect_write_client_config()
            .returning(|_| Ok(PathBuf::from(TestFixtures::CONFIG_PATH)))
            .times(0..);
    }

    /// Replace the operator key files
    pub fn with_key_files(mut self, key_files: Vec<PathBuf>) -> Self {
        self.context.operator_key_files = key_files;
        self
    }

    /// Configure the chain client mock with a setup function
    pub fn with_chain<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockChainClient),
    {
        setup(&mut self.chain);
        self
    }

    /// Configure the key store mock with a setup function
    pub fn with_key_store<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockKeyStore),
    {
        setup(&mut self.key_store);
        self
    }

    /// Configure the config writer mock with a setup function
    pub fn with_config_writer<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockConfigWriter),
    {
        setup(&mut self.config_writer);
        self
    }

    /// Build the provisioner with all configured mocks
    pub fn build(mut self) -> TestProvisioner {
        if self.fresh_chain_defaults {
            self.add_fresh_chain_defaults();
        }
        Provisioner::new(self.context, self.chain, self.key_store, self.config_writer)
    }
}

impl Default for ProvisionerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for test provisioner with all mocks
pub type TestProvisioner = Provisioner<MockChainClient, MockKeyStore, MockConfigWriter>;

/// Helper functions for common test operations
pub struct TestHelpers;

impl TestHelpers {
    /// Operator account for the first fixture key file
    pub fn first_operator() -> OperatorAccount {
        OperatorAccount {
            address: TestFixtures::OPERATOR_1,
            key_file: PathBuf::from(TestFixtures::KEY_FILE_1),
        }
    }

    pub fn sortition_pool() -> SortitionPoolRef {
        SortitionPoolRef {
            application: TestFixtures::APPLICATION,
            pool: TestFixtures::POOL,
        }
    }

    /// Provisioner whose chain reports the given balances for every operator
    pub fn provisioner_with_balances(native: U256, staked: U256) -> TestProvisioner {
        ProvisionerBuilder::fresh_chain()
            .with_chain(move |chain| {
                chain.expect_native_balance().returning(move |_| Ok(native));
                chain.expect_staked_balance().returning(move |_| Ok(staked));
            })
            .build()
    }

    /// Assert every operator in a report is in fixture order
    pub fn assert_operators(report: &ProvisioningReport, expected: &[Address]) {
        let operators: Vec<Address> = report.operators.iter().map(|r| r.operator.address).collect();
        assert_eq!(operators, expected);
    }
}
