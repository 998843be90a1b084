//! Market data provider trait definitions.
//!
//! This module defines the core `MarketDataProvider` trait that all
//! price providers implement.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{Instrument, Quote};

use super::capabilities::ProviderCapabilities;

/// Trait for market data providers.
///
/// Implement this trait to add support for a new price source. The resolver
/// only ever calls `get_latest_quote`; it never retries a provider within one
/// resolution, so implementations should not retry internally either.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use quoteboard_market_data::provider::{MarketDataProvider, ProviderCapabilities};
///
/// struct MyProvider {
///     api_key: String,
/// }
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     fn capabilities(&self) -> ProviderCapabilities {
///         ProviderCapabilities {
///             instrument_kinds: &[InstrumentKind::FxPair],
///         }
///     }
///
///     // ... implement get_latest_quote
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "TWELVE_DATA", "FRANKFURTER", etc.
    /// Used for logging, diagnostics and as the `source` of written prices.
    fn id(&self) -> &'static str;

    /// Describes which instruments this provider can price.
    fn capabilities(&self) -> ProviderCapabilities;

    /// Fetch the latest price for an instrument.
    ///
    /// # Returns
    ///
    /// The latest quote on success. Any failure, including "the response had
    /// no price", is a `MarketDataError`; the resolver treats all of them as
    /// "try the next provider".
    async fn get_latest_quote(&self, instrument: &Instrument) -> Result<Quote, MarketDataError>;
}
