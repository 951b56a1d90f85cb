//! Service implementations
//!
//! Production implementations of the service traits. These perform the
//! actual RPC and file I/O.

pub mod artifacts;
pub mod chain_client;
pub mod config_writer;
pub mod key_store;

#[cfg(test)]
mod tests;

pub use artifacts::ArtifactStore;
pub use chain_client::RealChainClient;
pub use config_writer::TomlConfigWriter;
pub use key_store::FileKeyStore;
