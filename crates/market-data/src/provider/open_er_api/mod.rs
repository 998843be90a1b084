//! ExchangeRate-API open access provider (`open.er-api.com`).
//!
//! Keyless, daily-refreshed FX rates. One request returns every rate for a
//! base currency; the quote leg is picked out of the table.

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

const PROVIDER_ID: &str = "OPEN_ER_API";

const BASE_URL: &str = "https://open.er-api.com/v6/latest/";

#[derive(Debug, Deserialize)]
struct LatestResponse {
    result: String,
    #[serde(default)]
    rates: HashMap<String, f64>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

pub struct OpenErApiProvider {
    client: Client,
}

impl OpenErApiProvider {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
        }
    }

    fn parse_rate(body: &str, quote: &str) -> Result<Decimal, MarketDataError> {
        let response: LatestResponse = parse_json(PROVIDER_ID, body)?;

        if response.result != "success" {
            let error_type = response.error_type.unwrap_or_else(|| response.result.clone());
            if error_type == "rate-limited" {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: error_type,
            });
        }

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
impl MarketDataProvider for OpenErApiProvider {
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

        let url = build_url(PROVIDER_ID, &format!("{}{}", BASE_URL, base), &[])?;
        let body = get_text(&self.client, PROVIDER_ID, url, None).await?;
        let rate = Self::parse_rate(&body, quote)?;

        Ok(Quote::new(rate, PROVIDER_ID).with_currency(quote.to_string()))
    }
}
