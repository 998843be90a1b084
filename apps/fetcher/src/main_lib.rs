use anyhow::Context;
use quoteboard_market_data::{
    Instrument, QuoteResolver, QuoteSnapshot, SnapshotPaths, SnapshotWriter,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

/// Install the global subscriber. The filter comes from `RUST_LOG` (default
/// `info`) and `QB_LOG_FORMAT=json` switches to JSON lines. Records from the
/// `log` facade are forwarded.
pub fn init_tracing() {
    let log_format = std::env::var("QB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_resolver(config: &Config) -> anyhow::Result<QuoteResolver> {
    let resolver = QuoteResolver::from_config(&config.resolver)
        .context("Failed to build provider chains")?;

    for (label, chain) in [
        ("commodity", &config.resolver.provider_order.commodity),
        ("fx", &config.resolver.provider_order.fx),
    ] {
        let ids: Vec<&str> = chain.iter().map(|p| p.id()).collect();
        tracing::info!("{} chain: {}", label, ids.join(" -> "));
    }
    Ok(resolver)
}

/// Resolve every instrument and write both snapshot files.
pub async fn run_cycle(
    resolver: &QuoteResolver,
    instruments: &[Instrument],
    writer: &SnapshotWriter,
) -> anyhow::Result<(QuoteSnapshot, SnapshotPaths)> {
    tracing::info!("Refreshing {} instruments", instruments.len());

    let snapshot = resolver.resolve_all(instruments).await;
    let unresolved = snapshot.unresolved();
    if !unresolved.is_empty() {
        tracing::warn!("Unresolved: {}", unresolved.join(", "));
    }

    let paths = writer.write(&snapshot).with_context(|| {
        format!(
            "Failed to write snapshot to {}",
            writer.output_dir().display()
        )
    })?;
    Ok((snapshot, paths))
}
