#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quoteboard_market_data::{
    Instrument, InstrumentKind, MarketDataError, MarketDataProvider, ProviderCapabilities, Quote,
};
use rust_decimal::Decimal;

/// Scripted provider: answers every instrument the same way.
pub struct ScriptedProvider {
    id: &'static str,
    price: Option<Decimal>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn ok(id: &'static str, price: Decimal) -> Arc<Self> {
        Arc::new(Self {
            id,
            price: Some(price),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(id: &'static str) -> Arc<Self> {
        Arc::new(Self {
            id,
            price: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for ScriptedProvider {
    fn id(&self) -> &'static str {
        self.id
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            instrument_kinds: &[InstrumentKind::Commodity, InstrumentKind::FxPair],
        }
    }

    async fn get_latest_quote(&self, instrument: &Instrument) -> Result<Quote, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.price {
            Some(price) => Ok(Quote::new(price, self.id)),
            None => Err(MarketDataError::NoData {
                provider: self.id.to_string(),
                symbol: instrument.id().to_string(),
            }),
        }
    }
}

pub fn as_chain(providers: &[&Arc<ScriptedProvider>]) -> Vec<Arc<dyn MarketDataProvider>> {
    providers
        .iter()
        .map(|p| (*p).clone() as Arc<dyn MarketDataProvider>)
        .collect()
}

pub fn test_timeout() -> Duration {
    Duration::from_secs(5)
}
