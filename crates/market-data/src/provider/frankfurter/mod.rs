//! Frankfurter provider (`api.frankfurter.app`).
//!
//! Keyless reference rates published by the European Central Bank. Unknown
//! currencies come back as HTTP 404, which surfaces as a provider error.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{Instrument, InstrumentKind, Quote};
use crate::provider::http::{build_client, build_url, decimal_from_f64, get_text, parse_json};
use crate::provider::{MarketDataProvider, ProviderCapabilities};

const PROVIDER_ID: &str = "FRANKFURTER";

const BASE_URL: &str = "https://api.frankfurter.app/latest";

#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    rates: HashMap<String, f64>,
}

pub struct FrankfurterProvider {
    client: Client,
}

impl FrankfurterProvider {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
        }
    }

    fn parse_rate(body: &str, quote: &str) -> Result<Decimal, MarketDataError> {
        let response: LatestResponse = parse_json(PROVIDER_ID, body)?;
        let rate = response
            .rates
            .get(quote)
            .ok_or_else(|| MarketDataError::NoData {
                provider: PROVIDER_ID.to_string(),
                symbol: quote.to_string(),
            })?;
        decimal_from_f64(PROVIDER_ID, *rate)
    }
}

#[async_trait]
impl MarketDataProvider for FrankfurterProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            instrument_kinds: &[InstrumentKind::FxPair],
        }
    }

    async fn get_latest_quote(&self, instrument: &Instrument) -> Result<Quote, MarketDataError> {
        let (base, quote) =
            instrument
                .legs()
                .ok_or_else(|| MarketDataError::UnsupportedInstrument {
                    provider: PROVIDER_ID.to_string(),
                    instrument: instrument.id().to_string(),
                })?;

        let url = build_url(PROVIDER_ID, BASE_URL, &[("from", base), ("to", quote)])?;
        let body = get_text(&self.client, PROVIDER_ID, url, None).await?;
        let rate = Self::parse_rate(&body, quote)?;

        Ok(Quote::new(rate, PROVIDER_ID).with_currency(quote.to_string()))
    }
}
