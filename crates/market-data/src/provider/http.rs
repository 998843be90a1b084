//! HTTP and parsing helpers shared by the providers.

use std::str::FromStr;
use std::time::Duration;

use log::debug;
use reqwest::{Client, StatusCode, Url};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::errors::MarketDataError;

/// Decimal places kept for prices derived from floating point rates.
const DERIVED_PRICE_DP: u32 = 8;

/// Build an HTTP client with the per-call timeout applied.
pub(crate) fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Build a URL with query parameters.
pub(crate) fn build_url(
    provider: &str,
    base: &str,
    params: &[(&str, &str)],
) -> Result<Url, MarketDataError> {
    Url::parse_with_params(base, params).map_err(|e| MarketDataError::ProviderError {
        provider: provider.to_string(),
        message: format!("Failed to build URL: {}", e),
    })
}

/// GET a URL and return the body of a 2xx response.
///
/// `secret` is masked when the URL is logged.
pub(crate) async fn get_text(
    client: &Client,
    provider: &str,
    url: Url,
    secret: Option<&str>,
) -> Result<String, MarketDataError> {
    let logged = match secret {
        Some(secret) if !secret.is_empty() => url.as_str().replace(secret, "***"),
        _ => url.as_str().to_string(),
    };
    debug!("{} request: {}", provider, logged);

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            MarketDataError::Timeout {
                provider: provider.to_string(),
            }
        } else {
            MarketDataError::ProviderError {
                provider: provider.to_string(),
                message: redact(&e.to_string(), secret),
            }
        }
    })?;

    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(MarketDataError::RateLimited {
            provider: provider.to_string(),
        });
    }

    if !status.is_success() {
        return Err(MarketDataError::ProviderError {
            provider: provider.to_string(),
            message: format!("HTTP {}", status),
        });
    }

    response.text().await.map_err(|e| {
        if e.is_timeout() {
            MarketDataError::Timeout {
                provider: provider.to_string(),
            }
        } else {
            MarketDataError::ProviderError {
                provider: provider.to_string(),
                message: redact(&e.to_string(), secret),
            }
        }
    })
}

fn redact(message: &str, secret: Option<&str>) -> String {
    match secret {
        Some(secret) if !secret.is_empty() => message.replace(secret, "***"),
        _ => message.to_string(),
    }
}

/// Parse a JSON body, mapping failures to `MalformedResponse`.
pub(crate) fn parse_json<T: DeserializeOwned>(
    provider: &str,
    body: &str,
) -> Result<T, MarketDataError> {
    serde_json::from_str(body).map_err(|e| MarketDataError::MalformedResponse {
        provider: provider.to_string(),
        message: e.to_string(),
    })
}

/// A numeric field some APIs send as a string and others as a number.
/// Numbers keep their original digits.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawNumber {
    Number(serde_json::Number),
    Text(String),
}

impl RawNumber {
    pub(crate) fn to_decimal(&self, provider: &str) -> Result<Decimal, MarketDataError> {
        match self {
            Self::Number(n) => decimal_from_str(provider, &n.to_string()),
            Self::Text(s) => decimal_from_str(provider, s),
        }
    }
}

/// Parse a decimal string price.
pub(crate) fn decimal_from_str(provider: &str, raw: &str) -> Result<Decimal, MarketDataError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| MarketDataError::InvalidPrice {
            provider: provider.to_string(),
            value: raw.to_string(),
        })
}

/// Convert a floating point rate to a decimal.
///
/// Non-finite values are rejected. The conversion goes through the shortest
/// string representation so `1.0845` does not pick up binary noise.
pub(crate) fn decimal_from_f64(provider: &str, value: f64) -> Result<Decimal, MarketDataError> {
    let invalid = || MarketDataError::InvalidPrice {
        provider: provider.to_string(),
        value: value.to_string(),
    };
    if !value.is_finite() {
        return Err(invalid());
    }
    Decimal::from_str(&value.to_string())
        .map(|d| d.round_dp(DERIVED_PRICE_DP).normalize())
        .map_err(|_| invalid())
}

/// Price of one unit of an asset given a rate quoted the other way round
/// (`1 USD = rate XAU` becomes `1 XAU = 1/rate USD`).
pub(crate) fn invert_rate(provider: &str, rate: Decimal) -> Result<Decimal, MarketDataError> {
    if rate <= Decimal::ZERO {
        return Err(MarketDataError::InvalidPrice {
            provider: provider.to_string(),
            value: rate.to_string(),
        });
    }
    Decimal::ONE
        .checked_div(rate)
        .map(|p| p.round_dp(DERIVED_PRICE_DP).normalize())
        .ok_or_else(|| MarketDataError::InvalidPrice {
            provider: provider.to_string(),
            value: rate.to_string(),
        })
}
