//! Test fixtures and data for provisioner tests

use alloy::primitives::{Address, B256, TxHash, address};
use provisioner::{ContractAddresses, ProvisioningAmounts, ProvisioningContext};
use std::path::PathBuf;

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const OWNER: Address = address!("0x90f8bf6a479f320ead074411a4b0e7944ea8c9c1");
    pub const APPLICATION: Address = address!("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    pub const POOL: Address = address!("0x5050505050505050505050505050505050505050");

    pub const OPERATOR_1: Address = address!("0x0000000000000000000000000000000000000001");
    pub const OPERATOR_2: Address = address!("0x0000000000000000000000000000000000000002");
    pub const OPERATOR_3: Address = address!("0x0000000000000000000000000000000000000003");

    pub const KEY_FILE_1: &'static str = "/mnt/keep-tecdsa/keyfile/operator-1.json";
    pub const KEY_FILE_2: &'static str = "/mnt/keep-tecdsa/keyfile/operator-2.json";
    pub const KEY_FILE_3: &'static str = "/mnt/keep-tecdsa/keyfile/operator-3.json";

    pub const WS_URL: &'static str = "ws://eth-ws-node:8546";
    pub const DATA_DIR: &'static str = "/mnt/keep-tecdsa/data";
    pub const CONFIG_PATH: &'static str = "./keep-tecdsa-config.toml";

    pub fn contracts() -> ContractAddresses {
        ContractAddresses {
            keep_factory: address!("0x0000000000000000000000000000000000000f01"),
            keep_bonding: address!("0x0000000000000000000000000000000000000f02"),
            token_staking: address!("0x0000000000000000000000000000000000000f03"),
            keep_token: address!("0x0000000000000000000000000000000000000f04"),
        }
    }

    pub fn key_files() -> Vec<PathBuf> {
        vec![
            PathBuf::from(Self::KEY_FILE_1),
            PathBuf::from(Self::KEY_FILE_2),
            PathBuf::from(Self::KEY_FILE_3),
        ]
    }

    /// Operator address stored in each fixture key file
    pub fn operator_for(key_file: &std::path::Path) -> Address {
        match key_file.to_str() {
            Some(Self::KEY_FILE_1) => Self::OPERATOR_1,
            Some(Self::KEY_FILE_2) => Self::OPERATOR_2,
            Some(Self::KEY_FILE_3) => Self::OPERATOR_3,
            other => panic!("unexpected key file {other:?}"),
        }
    }

    pub fn operators() -> Vec<Address> {
        vec![Self::OPERATOR_1, Self::OPERATOR_2, Self::OPERATOR_3]
    }

    pub fn context() -> ProvisioningContext {
        ProvisioningContext {
            contract_owner: Self::OWNER,
            authorizer: Self::OWNER,
            purse: Self::OWNER,
            network_id: "1101".to_string(),
            rpc_url: "http://eth-tx-node:8545".to_string(),
            ws_url: Self::WS_URL.to_string(),
            application: Self::APPLICATION,
            operator_key_files: Self::key_files(),
            data_dir: Self::DATA_DIR.to_string(),
            contracts: Self::contracts(),
            amounts: ProvisioningAmounts::default(),
        }
    }

    pub fn tx_hash(n: u8) -> TxHash {
        B256::repeat_byte(n)
    }
}
