//! Core types used throughout the provisioning workspace

use std::fmt;

/// Stage of the provisioning sequence that emitted a log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProvisioningStep {
    /// Process startup and configuration loading
    Startup,
    /// Sortition pool lookup or creation
    SortitionPool,
    /// Reading an operator address from its key file
    KeyFile,
    /// Native-token transfer from the purse
    Funding,
    /// Bonding value deposit
    BondingDeposit,
    /// Token delegation to the operator
    Staking,
    /// Operator contract authorization
    OperatorAuthorization,
    /// Sortition pool contract authorization
    PoolAuthorization,
    /// Client configuration file generation
    ClientConfig,
}

impl ProvisioningStep {
    /// Every step in execution order
    pub const ALL: [ProvisioningStep; 9] = [
        ProvisioningStep::Startup,
        ProvisioningStep::SortitionPool,
        ProvisioningStep::KeyFile,
        ProvisioningStep::Funding,
        ProvisioningStep::BondingDeposit,
        ProvisioningStep::Staking,
        ProvisioningStep::OperatorAuthorization,
        ProvisioningStep::PoolAuthorization,
        ProvisioningStep::ClientConfig,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProvisioningStep::Startup => "startup",
            ProvisioningStep::SortitionPool => "sortition_pool",
            ProvisioningStep::KeyFile => "key_file",
            ProvisioningStep::Funding => "funding",
            ProvisioningStep::BondingDeposit => "bonding_deposit",
            ProvisioningStep::Staking => "staking",
            ProvisioningStep::OperatorAuthorization => "operator_authorization",
            ProvisioningStep::PoolAuthorization => "pool_authorization",
            ProvisioningStep::ClientConfig => "client_config",
        }
    }
}

impl fmt::Display for ProvisioningStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
