//! Twelve Data provider.
//!
//! Uses the `/price` endpoint, which returns the latest price for any symbol
//! Twelve Data knows: metals (`XAU/USD`), commodities and FX pairs. The
//! instrument identifier is sent unchanged as the symbol.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{Instrument, InstrumentKind, Quote};
use crate::provider::http::{build_client, build_url, get_text, parse_json, RawNumber};
use crate::provider::{MarketDataProvider, ProviderCapabilities};

const PROVIDER_ID: &str = "TWELVE_DATA";

const BASE_URL: &str = "https://api.twelvedata.com/price";

/// Response from `/price`. Errors come back with HTTP 200 and
/// `status: "error"`.
#[derive(Debug, Deserialize)]
struct PriceResponse {
    price: Option<RawNumber>,
    status: Option<String>,
    code: Option<u16>,
    message: Option<String>,
}

pub struct TwelveDataProvider {
    client: Client,
    api_key: String,
}

impl TwelveDataProvider {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            api_key,
        }
    }

    fn parse_price(body: &str, symbol: &str) -> Result<Decimal, MarketDataError> {
        let response: PriceResponse = parse_json(PROVIDER_ID, body)?;

        if response.status.as_deref() == Some("error") {
            if response.code == Some(429) {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: response
                    .message
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        response
            .price
            .ok_or_else(|| MarketDataError::NoData {
                provider: PROVIDER_ID.to_string(),
                symbol: symbol.to_string(),
            })?
            .to_decimal(PROVIDER_ID)
    }
}

#[async_trait]
impl MarketDataProvider for TwelveDataProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            instrument_kinds: &[InstrumentKind::Commodity, InstrumentKind::FxPair],
        }
    }

    async fn get_latest_quote(&self, instrument: &Instrument) -> Result<Quote, MarketDataError> {
        let symbol = instrument.id();
        let url = build_url(
            PROVIDER_ID,
            BASE_URL,
            &[("symbol", symbol), ("apikey", self.api_key.as_str())],
        )?;

        let body = get_text(&self.client, PROVIDER_ID, url, Some(&self.api_key)).await?;
        let price = Self::parse_price(&body, symbol)?;

        let quote = Quote::new(price, PROVIDER_ID);
        Ok(match instrument.legs() {
            Some((_, quote_currency)) => quote.with_currency(quote_currency.to_string()),
            None => quote,
        })
    }
}
