//! Entry point of the keep-tecdsa provisioning init container
//!
//! Exits with status 0 once every operator is provisioned and the client
//! configuration is written, and with status 1 on the first failure.

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use std::process::ExitCode;

use provisioner::{
    ChainClientOptions, Provisioner, ProvisioningContext, ProvisioningFailure, ProvisioningReport,
    cli::Args,
    context::owner_signer,
    services::{ArtifactStore, FileKeyStore, RealChainClient, TomlConfigWriter},
};
use shared::{ProvisioningStep, logging, step_info};

async fn provision(args: Args) -> anyhow::Result<ProvisioningReport> {
    let signer = owner_signer(&args.contract_owner_private_key, args.contract_owner)?;

    logging::log_progress(
        ProvisioningStep::Startup,
        "Loading contract artifacts",
        &args.artifacts_dir.display().to_string(),
    );
    let contracts = ArtifactStore::new(&args.artifacts_dir)
        .contract_addresses(&args.eth_network_id)
        .await
        .with_context(|| format!("loading contract artifacts for network {}", args.eth_network_id))?;

    let context = ProvisioningContext::from_args(&args, contracts)?;

    let chain = RealChainClient::connect(
        &context.rpc_url,
        signer,
        contracts,
        ChainClientOptions::from_args(&args),
    )?;
    let key_store = FileKeyStore::new();
    let config_writer = TomlConfigWriter::new(&args.config_template, &args.config_output);

    let provisioner = Provisioner::new(context, chain, key_store, config_writer);
    Ok(provisioner.run().await?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Variables already set in the environment win over the .env file
    let _ = dotenv::dotenv();

    // Missing or malformed inputs are fatal like any other failure
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };
    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup("keep-tecdsa provisioning");

    match provision(args).await {
        Ok(report) => {
            step_info!(
                ProvisioningStep::ClientConfig,
                "Provisioned {} operators against sortition pool {}",
                report.operators.len(),
                report.sortition_pool.pool
            );
            logging::log_success(ProvisioningStep::ClientConfig, "keep-tecdsa provisioning complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let step = err
                .downcast_ref::<ProvisioningFailure>()
                .map_or(ProvisioningStep::Startup, |failure| failure.step);
            logging::log_error(step, "keep-tecdsa provisioning", &format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
