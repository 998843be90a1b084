//! Quote resolver: ordered provider fallback.
//!
//! For each instrument the resolver walks the chain configured for the
//! instrument's kind:
//! - Skip providers whose capabilities exclude the kind
//! - Call the provider once, bounded by the configured timeout
//! - Validate the returned price
//! - On any failure, log and try the next provider
//!
//! Exhausting the chain is not an error: the instrument resolves to `None`
//! and is written as `null`.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use log::{debug, info, warn};

use super::{FetchDiagnostics, QuoteValidator, SkipReason};
use crate::config::ResolverConfig;
use crate::errors::{ConfigError, MarketDataError};
use crate::models::{Instrument, InstrumentKind, ProviderId, Quote, QuoteSnapshot, SnapshotEntry};
use crate::provider::{MarketDataProvider, ProviderFactory};

/// Resolves instruments to prices through per-kind provider chains.
pub struct QuoteResolver {
    commodity_chain: Vec<Arc<dyn MarketDataProvider>>,
    fx_chain: Vec<Arc<dyn MarketDataProvider>>,
    timeout: Duration,
    validator: QuoteValidator,
}

impl QuoteResolver {
    /// Create a resolver from explicit chains.
    pub fn new(
        commodity_chain: Vec<Arc<dyn MarketDataProvider>>,
        fx_chain: Vec<Arc<dyn MarketDataProvider>>,
        timeout: Duration,
    ) -> Self {
        Self {
            commodity_chain,
            fx_chain,
            timeout,
            validator: QuoteValidator::new(),
        }
    }

    /// Validate the configuration and build every provider it names.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let providers = ProviderFactory::build_all(config)?;

        let chain = |kind: InstrumentKind| -> Vec<Arc<dyn MarketDataProvider>> {
            config
                .provider_order
                .chain(kind)
                .iter()
                .filter_map(|p| providers.get(p).cloned())
                .collect()
        };

        Ok(Self::new(
            chain(InstrumentKind::Commodity),
            chain(InstrumentKind::FxPair),
            config.timeout,
        ))
    }

    /// Providers tried for an instrument kind, in order.
    pub fn chain(&self, kind: InstrumentKind) -> &[Arc<dyn MarketDataProvider>] {
        match kind {
            InstrumentKind::Commodity => &self.commodity_chain,
            InstrumentKind::FxPair => &self.fx_chain,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve one instrument. `None` means every provider failed.
    pub async fn resolve(&self, instrument: &Instrument) -> Option<Quote> {
        self.resolve_with_diagnostics(instrument).await.0
    }

    /// Resolve one instrument and report what each provider did.
    pub async fn resolve_with_diagnostics(
        &self,
        instrument: &Instrument,
    ) -> (Option<Quote>, FetchDiagnostics) {
        let mut diagnostics = FetchDiagnostics::new();
        let chain = self.chain(instrument.kind());

        if chain.is_empty() {
            warn!("No providers configured for {} instruments", instrument.kind());
            return (None, diagnostics);
        }

        for provider in chain {
            let provider_id: ProviderId = Cow::Borrowed(provider.id());

            if !provider.capabilities().supports(instrument.kind()) {
                debug!(
                    "Provider '{}' does not handle {} instruments, skipping",
                    provider_id,
                    instrument.kind()
                );
                diagnostics.record_skip(provider_id, SkipReason::InstrumentKindMismatch);
                continue;
            }

            debug!("Fetching {} from provider '{}'", instrument, provider_id);

            let result = match tokio::time::timeout(
                self.timeout,
                provider.get_latest_quote(instrument),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(MarketDataError::Timeout {
                    provider: provider_id.to_string(),
                }),
            };

            match result.and_then(|quote| self.validator.validate(&quote).map(|()| quote)) {
                Ok(quote) => {
                    debug!(
                        "Resolved {} = {} from '{}'",
                        instrument, quote.price, provider_id
                    );
                    diagnostics.record_success(provider_id);
                    return (Some(quote), diagnostics);
                }
                Err(e) => {
                    if e.is_unsupported() {
                        debug!("{}, trying next provider", e);
                    } else {
                        warn!(
                            "Provider '{}' failed for {}: {}, trying next provider",
                            provider_id, instrument, e
                        );
                    }
                    diagnostics.record_error(provider_id, e.to_string());
                }
            }
        }

        warn!(
            "No price for {} ({}), recording null",
            instrument,
            diagnostics.summary()
        );
        (None, diagnostics)
    }

    /// Resolve every instrument concurrently and assemble a snapshot.
    ///
    /// Each instrument's chain runs on its own; a failed instrument does not
    /// affect the others.
    pub async fn resolve_all(&self, instruments: &[Instrument]) -> QuoteSnapshot {
        let entries = join_all(instruments.iter().map(|instrument| async move {
            SnapshotEntry {
                instrument: instrument.clone(),
                quote: self.resolve(instrument).await,
            }
        }))
        .await;

        let snapshot = QuoteSnapshot::new(Utc::now(), entries);
        info!(
            "Resolved {} of {} instruments",
            snapshot.resolved_count(),
            snapshot.entries().len()
        );
        snapshot
    }
}
