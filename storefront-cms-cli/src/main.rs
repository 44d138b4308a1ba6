//! Storefront CMS CLI - entry point for the `storefront-cms` binary.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use storefront_cms_app::{AppState, StorageBackend};
use storefront_cms_cli::{commands, Cli};

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = cli.app_config()?;
    if config.backend == StorageBackend::Memory {
        tracing::warn!("Using the memory backend: changes are discarded on exit");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let state = AppState::from_config(&config).await?;
        commands::execute(cli.command, &state, cli.format).await
    })
}
