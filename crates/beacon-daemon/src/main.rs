use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use beacon_core::config::BeaconConfig;
use beacon_daemon::{CatalogFile, Cli, Daemon};
use beacon_observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = BeaconConfig::load(cli.config.as_deref(), Some(&cli.overrides())).context("loading configuration")?;
    init_tracing(&config.observability);

    let catalog = CatalogFile::load(&cli.catalog)?;
    let daemon = Daemon::build(config, &catalog)?;

    if cli.once {
        let report = daemon.run_once().await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        if cli.status_page {
            println!("{}", daemon.status_page_json()?);
        }
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown requested");
        }
        trigger.cancel();
    });

    daemon.run_until(shutdown, cli.status_page).await;
    Ok(())
}
