use clap::Parser;
use pkg_ferry::core::catalog;
use pkg_ferry::utils::{logger, validation::Validate};
use pkg_ferry::{
    CliConfig, DropboxStore, DuplicateReconciler, EntryDispatcher, ExecRestart, RunDriver,
    TokioClock,
};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting pkg-ferry");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let token = match std::fs::read_to_string(&config.auth) {
        Ok(token) => token.trim().to_string(),
        Err(e) => {
            tracing::error!("❌ Could not read token file {}: {}", config.auth, e);
            eprintln!("❌ Could not read token file {}: {}", config.auth, e);
            std::process::exit(1);
        }
    };

    let entries = match &config.catalog {
        Some(path) => catalog::read_catalog(Path::new(path), &config.destination),
        None => {
            let url = config
                .catalog_url
                .as_deref()
                .expect("validation guarantees a catalog source");
            let client = reqwest::Client::new();
            catalog::fetch_catalog(&client, url, &config.destination).await
        }
    };
    let entries = match entries {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("❌ Could not load catalog: {}", e);
            eprintln!("❌ Could not load catalog: {}", e);
            std::process::exit(1);
        }
    };

    let store = Arc::new(DropboxStore::new(token));
    let clock = Arc::new(TokioClock);
    let process = Arc::new(ExecRestart);

    let dispatcher = EntryDispatcher::new(store.clone(), clock, process, config.clone());
    let reconciler = DuplicateReconciler::new(store);
    let driver = RunDriver::new(dispatcher, reconciler, config);

    let report = driver.run(&entries).await?;

    println!("✅ Run complete");
    println!(
        "📦 Transferred: {} | Skipped: {} (present: {}, no link: {}, demo: {}, refused: {})",
        report.transferred,
        report.skipped(),
        report.skipped_present,
        report.skipped_no_link,
        report.skipped_demo,
        report.skipped_refused
    );

    Ok(())
}
