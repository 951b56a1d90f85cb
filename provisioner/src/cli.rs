//! Command line and environment inputs
//!
//! Every argument can be supplied through the environment variable the
//! init-container manifest already sets, so the binary runs without flags.

use alloy::primitives::Address;
use clap::Parser;
use std::path::PathBuf;

/// Environment variable names read by the provisioner
pub mod env_vars {
    pub const ETH_RPC_URL: &str = "ETH_RPC_URL";
    pub const ETH_WS_URL: &str = "ETH_WS_URL";
    pub const ETH_NETWORK_ID: &str = "ETH_NETWORK_ID";
    pub const CONTRACT_OWNER_ADDRESS: &str = "CONTRACT_OWNER_ETH_ACCOUNT_ADDRESS";
    pub const CONTRACT_OWNER_PRIVATE_KEY: &str = "CONTRACT_OWNER_ETH_ACCOUNT_PRIVATE_KEY";
    pub const OPERATOR_KEY_FILE_1: &str = "KEEP_TECDSA_ETH_KEYFILE_1";
    pub const OPERATOR_KEY_FILE_2: &str = "KEEP_TECDSA_ETH_KEYFILE_2";
    pub const OPERATOR_KEY_FILE_3: &str = "KEEP_TECDSA_ETH_KEYFILE_3";
    pub const APPLICATION_ADDRESS: &str = "TBTC_SYSTEM_CONTRACT_ADDRESS";
    pub const DATA_DIR: &str = "KEEP_DATA_DIR";
    pub const ARTIFACTS_DIR: &str = "KEEP_CONTRACT_ARTIFACTS_DIR";
    pub const CONFIG_TEMPLATE: &str = "KEEP_TECDSA_CONFIG_TEMPLATE";
    pub const CONFIG_OUTPUT: &str = "KEEP_TECDSA_CONFIG_OUTPUT";
    pub const TX_CONFIRMATIONS: &str = "ETH_TX_CONFIRMATIONS";
    pub const TX_RECEIPT_TIMEOUT_SECS: &str = "ETH_TX_RECEIPT_TIMEOUT_SECS";
    pub const DEFAULT_GAS: &str = "ETH_DEFAULT_GAS";
    pub const LOG_LEVEL: &str = "RUST_LOG_LEVEL";
}

/// Provision keep-tecdsa operators and write the client configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "provision-keep-tecdsa")]
#[command(about = "Funds, stakes and authorizes keep-tecdsa operators, then writes the client config")]
pub struct Args {
    /// HTTP JSON-RPC endpoint used for every chain call
    #[arg(long, env = env_vars::ETH_RPC_URL)]
    pub eth_rpc_url: String,

    /// WebSocket endpoint written into the client configuration
    #[arg(long, env = env_vars::ETH_WS_URL)]
    pub eth_ws_url: String,

    /// Network id used to pick deployment addresses out of the artifacts
    #[arg(long, env = env_vars::ETH_NETWORK_ID)]
    pub eth_network_id: String,

    /// Contract owner; also acts as authorizer and purse
    #[arg(long, env = env_vars::CONTRACT_OWNER_ADDRESS)]
    pub contract_owner: Address,

    /// Private key of the contract owner
    #[arg(long, env = env_vars::CONTRACT_OWNER_PRIVATE_KEY, hide_env_values = true)]
    pub contract_owner_private_key: String,

    #[arg(long, env = env_vars::OPERATOR_KEY_FILE_1)]
    pub operator_key_file_1: Option<PathBuf>,

    #[arg(long, env = env_vars::OPERATOR_KEY_FILE_2)]
    pub operator_key_file_2: Option<PathBuf>,

    #[arg(long, env = env_vars::OPERATOR_KEY_FILE_3)]
    pub operator_key_file_3: Option<PathBuf>,

    /// Application the sortition pool is created for
    #[arg(long, env = env_vars::APPLICATION_ADDRESS)]
    pub application: Address,

    /// Data directory of the keep-tecdsa client
    #[arg(long, env = env_vars::DATA_DIR)]
    pub data_dir: String,

    /// Directory holding the `<Contract>.json` artifacts
    #[arg(long, env = env_vars::ARTIFACTS_DIR, default_value = ".")]
    pub artifacts_dir: PathBuf,

    #[arg(long, env = env_vars::CONFIG_TEMPLATE, default_value = "./keep-tecdsa-config-template.toml")]
    pub config_template: PathBuf,

    #[arg(long, env = env_vars::CONFIG_OUTPUT, default_value = "./keep-tecdsa-config.toml")]
    pub config_output: PathBuf,

    /// Block confirmations awaited for every transaction
    #[arg(long, env = env_vars::TX_CONFIRMATIONS, default_value = "3")]
    pub confirmations: u64,

    /// Receipt polling timeout in seconds
    #[arg(long, env = env_vars::TX_RECEIPT_TIMEOUT_SECS, default_value = "480")]
    pub receipt_timeout_secs: u64,

    /// Gas limit applied to every transaction
    #[arg(long, env = env_vars::DEFAULT_GAS, default_value = "4712388")]
    pub gas_limit: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = env_vars::LOG_LEVEL, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Configured operator key files in slot order
    pub fn operator_key_files(&self) -> Vec<PathBuf> {
        [
            &self.operator_key_file_1,
            &self.operator_key_file_2,
            &self.operator_key_file_3,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "0x1111111111111111111111111111111111111111";
    const APPLICATION: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    fn base_args() -> Vec<&'static str> {
        vec![
            "provision-keep-tecdsa",
            "--eth-rpc-url",
            "http://eth-tx-node:8545",
            "--eth-ws-url",
            "ws://eth-ws-node:8546",
            "--eth-network-id",
            "1101",
            "--contract-owner",
            OWNER,
            "--contract-owner-private-key",
            "0x4f3edf983ac636a65a842ce7c78d9aa706d3b113bce9c46f30d7d21715b23b1d",
            "--application",
            APPLICATION,
            "--data-dir",
            "/mnt/keep-tecdsa/data",
        ]
    }

    #[test]
    fn test_defaults_applied() {
        let args = Args::try_parse_from(base_args()).unwrap();

        assert_eq!(args.artifacts_dir, PathBuf::from("."));
        assert_eq!(args.config_template, PathBuf::from("./keep-tecdsa-config-template.toml"));
        assert_eq!(args.config_output, PathBuf::from("./keep-tecdsa-config.toml"));
        assert_eq!(args.confirmations, 3);
        assert_eq!(args.receipt_timeout_secs, 480);
        assert_eq!(args.gas_limit, 4_712_388);
        assert_eq!(args.contract_owner, OWNER.parse::<Address>().unwrap());
    }

    #[test]
    fn test_operator_key_files_keep_slot_order() {
        let mut argv = base_args();
        argv.extend(["--operator-key-file-3", "/keys/3", "--operator-key-file-1", "/keys/1"]);
        let args = Args::try_parse_from(argv).unwrap();

        assert_eq!(
            args.operator_key_files(),
            vec![PathBuf::from("/keys/1"), PathBuf::from("/keys/3")]
        );
    }

    #[test]
    fn test_invalid_address_rejected() {
        let mut argv = base_args();
        let idx = argv.iter().position(|a| *a == APPLICATION).unwrap();
        argv[idx] = "not-an-address";
        assert!(Args::try_parse_from(argv).is_err());
    }
}
