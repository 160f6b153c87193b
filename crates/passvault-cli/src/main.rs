use anyhow::Result;
use clap::Parser;
use passvault_cli::config::{DEFAULT_LOG_FILTER, ENV_LOG};
use passvault_cli::{PassVaultCli, run};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(ENV_LOG)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    run(PassVaultCli::parse()).await
}
