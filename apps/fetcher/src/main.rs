mod config;
mod main_lib;

use anyhow::Context;
use config::Config;
use main_lib::{build_resolver, init_tracing, run_cycle};
use quoteboard_market_data::SnapshotWriter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env().context("Invalid configuration")?;
    let resolver = build_resolver(&config)?;
    let writer = SnapshotWriter::new(&config.output_dir);

    let started = chrono::Utc::now();
    let (snapshot, paths) = run_cycle(&resolver, &config.instruments(), &writer).await?;

    tracing::info!(
        "Resolved {}/{} instruments in {} ms; wrote {} and {}",
        snapshot.resolved_count(),
        snapshot.entries().len(),
        (chrono::Utc::now() - started).num_milliseconds(),
        paths.commodities.display(),
        paths.pairs.display()
    );
    Ok(())
}
