//! Service-specific tests
//!
//! Each service has its own test file; file-backed services run against
//! temporary directories.

mod key_store;

// Common test utilities for services
pub mod common {
    use alloy::primitives::{Address, address};

    use crate::types::ClientConfigUpdate;

    pub const FACTORY: Address = address!("0x0000000000000000000000000000000000000f01");
    pub const APPLICATION: Address = address!("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");

    /// Template shipped with the init container image
    pub const TEMPLATE: &str = include_str!("../../../templates/keep-tecdsa-config-template.toml");

    pub fn sample_update() -> ClientConfigUpdate {
        ClientConfigUpdate {
            ethereum_url: "ws://eth-ws-node:8546".to_string(),
            key_files: vec![
                "/mnt/keys/operator-1.json".to_string(),
                "/mnt/keys/operator-2.json".to_string(),
                "/mnt/keys/operator-3.json".to_string(),
            ],
            keep_factory: FACTORY,
            sanctioned_applications: vec![APPLICATION],
            data_dir: "/mnt/keep-tecdsa/persistence".to_string(),
        }
    }
}
