//! Alpha Vantage provider.
//!
//! - Crude oil via the `WTI` / `BRENT` commodity endpoints (daily series,
//!   most recent numeric value wins)
//! - Currency pairs and metals quoted against a currency via
//!   `CURRENCY_EXCHANGE_RATE`
//!
//! Alpha Vantage reports most failures with HTTP 200 and an
//! `Error Message`, `Note` or `Information` field, so every response is
//! checked for those before the payload is read.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{Instrument, InstrumentKind, Quote};
use crate::provider::http::{build_client, build_url, decimal_from_str, get_text, parse_json};
use crate::provider::{MarketDataProvider, ProviderCapabilities};

const PROVIDER_ID: &str = "ALPHA_VANTAGE";

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Error fields Alpha Vantage may put on any response.
#[derive(Debug, Default, Deserialize)]
struct ApiNotices {
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

/// Response from the commodity endpoints (`WTI`, `BRENT`).
#[derive(Debug, Deserialize)]
struct CommodityResponse {
    #[serde(flatten)]
    notices: ApiNotices,
    data: Option<Vec<CommodityPoint>>,
}

#[derive(Debug, Deserialize)]
struct CommodityPoint {
    date: String,
    /// Numeric string, or "." when the day has no value
    value: String,
}

/// Response from `CURRENCY_EXCHANGE_RATE`.
#[derive(Debug, Deserialize)]
struct ExchangeRateResponse {
    #[serde(flatten)]
    notices: ApiNotices,
    #[serde(rename = "Realtime Currency Exchange Rate")]
    rate: Option<ExchangeRate>,
}

#[derive(Debug, Deserialize)]
struct ExchangeRate {
    #[serde(rename = "5. Exchange Rate")]
    exchange_rate: String,
}

/// What to ask Alpha Vantage for a given instrument.
#[derive(Debug, PartialEq, Eq)]
enum Request<'a> {
    Commodity { function: &'static str },
    ExchangeRate { from: &'a str, to: &'a str },
}

pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
}

impl AlphaVantageProvider {
    /// Create a new Alpha Vantage provider with the given API key.
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            api_key,
        }
    }

    fn request_for(instrument: &Instrument) -> Result<Request<'_>, MarketDataError> {
        if let Some((from, to)) = instrument.legs() {
            return Ok(Request::ExchangeRate { from, to });
        }

        match instrument.id() {
            "OIL" | "WTI" => Ok(Request::Commodity { function: "WTI" }),
            "BRENT" => Ok(Request::Commodity { function: "BRENT" }),
            _ => Err(MarketDataError::UnsupportedInstrument {
                provider: PROVIDER_ID.to_string(),
                instrument: instrument.id().to_string(),
            }),
        }
    }

    /// Check for API-level errors in the response.
    fn check_api_error(notices: &ApiNotices) -> Result<(), MarketDataError> {
        if let Some(ref msg) = notices.error_message {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: msg.clone(),
            });
        }

        // "Note" and "Information" usually indicate rate limiting
        for msg in [&notices.note, &notices.information].into_iter().flatten() {
            if msg.contains("API call frequency")
                || msg.contains("rate limit")
                || msg.contains("requests per day")
            {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            warn!("Alpha Vantage notice: {}", msg);
        }

        Ok(())
    }

    fn parse_commodity(body: &str, function: &str) -> Result<Decimal, MarketDataError> {
        let response: CommodityResponse = parse_json(PROVIDER_ID, body)?;
        Self::check_api_error(&response.notices)?;

        let no_data = || MarketDataError::NoData {
            provider: PROVIDER_ID.to_string(),
            symbol: function.to_string(),
        };

        // Dates are YYYY-MM-DD, so string order is date order.
        let (date, price) = response
            .data
            .ok_or_else(no_data)?
            .into_iter()
            .filter_map(|point| {
                decimal_from_str(PROVIDER_ID, &point.value)
                    .ok()
                    .map(|price| (point.date, price))
            })
            .max_by(|a, b| a.0.cmp(&b.0))
            .ok_or_else(no_data)?;

        debug!("Alpha Vantage: {} = {} as of {}", function, price, date);
        Ok(price)
    }

    fn parse_exchange_rate(body: &str, from: &str, to: &str) -> Result<Decimal, MarketDataError> {
        let response: ExchangeRateResponse = parse_json(PROVIDER_ID, body)?;
        Self::check_api_error(&response.notices)?;

        let rate = response.rate.ok_or_else(|| MarketDataError::NoData {
            provider: PROVIDER_ID.to_string(),
            symbol: format!("{}/{}", from, to),
        })?;

        decimal_from_str(PROVIDER_ID, &rate.exchange_rate)
    }
}

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            instrument_kinds: &[InstrumentKind::Commodity, InstrumentKind::FxPair],
        }
    }

    async fn get_latest_quote(&self, instrument: &Instrument) -> Result<Quote, MarketDataError> {
        match Self::request_for(instrument)? {
            Request::Commodity { function } => {
                let url = build_url(
                    PROVIDER_ID,
                    BASE_URL,
                    &[
                        ("function", function),
                        ("interval", "daily"),
                        ("apikey", self.api_key.as_str()),
                    ],
                )?;
                let body = get_text(&self.client, PROVIDER_ID, url, Some(&self.api_key)).await?;
                let price = Self::parse_commodity(&body, function)?;
                Ok(Quote::new(price, PROVIDER_ID).with_currency("USD"))
            }
            Request::ExchangeRate { from, to } => {
                let url = build_url(
                    PROVIDER_ID,
                    BASE_URL,
                    &[
                        ("function", "CURRENCY_EXCHANGE_RATE"),
                        ("from_currency", from),
                        ("to_currency", to),
                        ("apikey", self.api_key.as_str()),
                    ],
                )?;
                let body = get_text(&self.client, PROVIDER_ID, url, Some(&self.api_key)).await?;
                let price = Self::parse_exchange_rate(&body, from, to)?;
                Ok(Quote::new(price, PROVIDER_ID).with_currency(to.to_string()))
            }
        }
    }
}
