//! Error types for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: failures of a single provider call. The resolver
//!   logs them and moves on to the next provider in the chain.
//! - [`ConfigError`]: invalid or incomplete configuration, fatal at startup.
//! - [`SnapshotError`]: failures writing or reading snapshot files.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching a price from one provider.
///
/// None of these abort a refresh cycle. Every variant means "this provider
/// could not price this instrument right now", and the resolver falls through
/// to the next provider.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider cannot price this instrument at all (e.g. a metals-only
    /// API asked for oil).
    #[error("Unsupported instrument for {provider}: {instrument}")]
    UnsupportedInstrument {
        /// The provider that rejected the instrument
        provider: String,
        /// The instrument identifier
        instrument: String,
    },

    /// The response was well formed but carried no price for the symbol.
    #[error("No data from {provider} for {symbol}")]
    NoData {
        /// The provider that returned no data
        provider: String,
        /// The provider-side symbol that was requested
        symbol: String,
    },

    /// The provider returned a price that is not a finite positive number.
    #[error("Invalid price from {provider}: {value}")]
    InvalidPrice {
        /// The provider that returned the value
        provider: String,
        /// The offending value, as received
        value: String,
    },

    /// The provider rate limited the request (HTTP 429 or an API-level note).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// Transport failure, non-2xx status, or an API-level error message.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The response body could not be parsed.
    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse {
        /// The provider that sent the body
        provider: String,
        /// The parser error
        message: String,
    },
}

impl MarketDataError {
    /// Whether the provider never handles this instrument, as opposed to a
    /// failure of this particular call.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedInstrument { .. })
    }
}

/// Configuration errors. Any of these stops the process before work starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing API key for {provider}: set {env_var}")]
    MissingApiKey { provider: String, env_var: String },

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("No providers configured for {0}")]
    EmptyProviderOrder(String),

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("Invalid instrument '{id}': {reason}")]
    InvalidInstrument { id: String, reason: String },
}

/// Errors writing or reading snapshot files.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
