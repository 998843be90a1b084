//! Metal Price API provider for precious metals.
//!
//! This provider fetches real-time precious metal prices from the Metal Price API.
//! It supports the following metals:
//! - XAU (Gold)
//! - XAG (Silver)
//! - XPT (Platinum)
//! - XPD (Palladium)
//!
//! Instruments must be written as `METAL/CURRENCY` (e.g. `XAU/USD`). Anything
//! else, oil included, is rejected as unsupported so the resolver moves on.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{Instrument, InstrumentKind, Quote};
use crate::provider::http::{
    build_client, build_url, decimal_from_f64, get_text, invert_rate, parse_json,
};
use crate::provider::{MarketDataProvider, ProviderCapabilities};

/// Supported metal symbols
const SUPPORTED_METALS: &[&str] = &["XAU", "XAG", "XPT", "XPD"];

/// Provider ID constant
const PROVIDER_ID: &str = "METAL_PRICE_API";

const BASE_URL: &str = "https://api.metalpriceapi.com/v1/latest";

/// API response from Metal Price API
#[derive(Debug, Deserialize)]
struct MetalPriceResponse {
    /// Whether the request was successful
    success: bool,
    /// Rates for requested metals (1 base currency = rate troy ounces).
    /// Newer responses also carry `{BASE}{METAL}` keys holding the price
    /// of one ounce directly.
    #[serde(default)]
    rates: HashMap<String, f64>,
    error: Option<MetalPriceError>,
}

#[derive(Debug, Deserialize)]
struct MetalPriceError {
    #[serde(default)]
    statuscode: Option<u16>,
    #[serde(default)]
    message: Option<String>,
}

/// Metal Price API provider for precious metals market data.
///
/// # Example
///
/// ```ignore
/// use quoteboard_market_data::provider::metal_price_api::MetalPriceApiProvider;
///
/// let provider = MetalPriceApiProvider::new("your_api_key".to_string(), timeout);
/// ```
pub struct MetalPriceApiProvider {
    client: Client,
    api_key: String,
}

impl MetalPriceApiProvider {
    /// Create a new Metal Price API provider with the given API key.
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            api_key,
        }
    }

    /// Check if the given symbol is a supported metal.
    fn is_supported_metal(symbol: &str) -> bool {
        SUPPORTED_METALS.contains(&symbol)
    }

    /// Split an instrument into (metal, quote currency).
    fn metal_and_currency(instrument: &Instrument) -> Result<(&str, &str), MarketDataError> {
        instrument
            .legs()
            .filter(|(metal, _)| Self::is_supported_metal(metal))
            .ok_or_else(|| MarketDataError::UnsupportedInstrument {
                provider: PROVIDER_ID.to_string(),
                instrument: instrument.id().to_string(),
            })
    }

    fn parse_price(body: &str, metal: &str, currency: &str) -> Result<Decimal, MarketDataError> {
        let response: MetalPriceResponse = parse_json(PROVIDER_ID, body)?;

        if !response.success {
            let error = response.error;
            if error.as_ref().and_then(|e| e.statuscode) == Some(429) {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: error
                    .and_then(|e| e.message)
                    .unwrap_or_else(|| "API request failed".to_string()),
            });
        }

        // Direct price of one ounce, when present.
        if let Some(direct) = response.rates.get(&format!("{}{}", currency, metal)) {
            return decimal_from_f64(PROVIDER_ID, *direct);
        }

        // API returns: 1 base_currency = rate troy ounces of metal
        // Price per troy ounce = 1 / rate
        let rate = response
            .rates
            .get(metal)
            .ok_or_else(|| MarketDataError::NoData {
                provider: PROVIDER_ID.to_string(),
                symbol: metal.to_string(),
            })?;

        invert_rate(PROVIDER_ID, decimal_from_f64(PROVIDER_ID, *rate)?)
    }
}

#[async_trait]
impl MarketDataProvider for MetalPriceApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            instrument_kinds: &[InstrumentKind::Commodity],
        }
    }

    async fn get_latest_quote(&self, instrument: &Instrument) -> Result<Quote, MarketDataError> {
        let (metal, currency) = Self::metal_and_currency(instrument)?;

        let url = build_url(
            PROVIDER_ID,
            BASE_URL,
            &[
                ("api_key", self.api_key.as_str()),
                ("base", currency),
                ("currencies", metal),
            ],
        )?;

        let body = get_text(&self.client, PROVIDER_ID, url, Some(&self.api_key)).await?;
        let price = Self::parse_price(&body, metal, currency)?;

        Ok(Quote::new(price, PROVIDER_ID).with_currency(currency.to_string()))
    }
}
