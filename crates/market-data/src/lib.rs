//! Quoteboard Market Data Crate
//!
//! This crate resolves commodity and FX prices through ordered provider
//! chains and writes them as static JSON snapshots for the Quoteboard
//! dashboard.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Two instrument kinds: commodities (metals, oil) and currency pairs
//! - Multiple providers: Twelve Data, Metal Price API, Alpha Vantage,
//!   Open ER API, Frankfurter
//! - Per-kind fallback chains with a timeout on every provider call
//! - Snapshot files that mark unresolved instruments as `null`
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  ResolverConfig  | --> |  ProviderFactory |  (keys, timeout, order)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  QuoteResolver   |  (ordered fallback per kind)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Provider      |  (Twelve Data, Frankfurter, etc.)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  QuoteSnapshot   |  (one cycle, quote or null)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  SnapshotWriter  |  (commodities.json, pairs.json)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Instrument`] - Priced symbol and its kind
//! - [`Quote`] - A price from one provider
//! - [`QuoteSnapshot`] - Results of one refresh cycle
//! - [`ResolverConfig`] - Keys, timeout and provider order
//! - [`QuoteResolver`] - The fallback chain
//!
//! # Type Aliases
//!
//! - [`ProviderId`] - Provider identifier (e.g., "TWELVE_DATA", "FRANKFURTER")
//! - [`Currency`] - Currency code (ISO 4217)

pub mod config;
pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;
pub mod store;

pub use config::{ProviderOrder, ResolverConfig, DEFAULT_TIMEOUT};

pub use errors::{ConfigError, MarketDataError, SnapshotError};

// Re-export all public types from models
pub use models::{
    default_commodities, default_pairs, CommoditiesDocument, Currency, Instrument,
    InstrumentKind, PairsDocument, PriceEntry, ProviderId, Quote, QuoteSnapshot, SnapshotEntry,
    DEFAULT_COMMODITIES, DEFAULT_PAIRS,
};

// Re-export provider types
pub use provider::alpha_vantage::AlphaVantageProvider;
pub use provider::frankfurter::FrankfurterProvider;
pub use provider::metal_price_api::MetalPriceApiProvider;
pub use provider::open_er_api::OpenErApiProvider;
pub use provider::twelve_data::TwelveDataProvider;
pub use provider::{MarketDataProvider, ProviderCapabilities, ProviderFactory, ProviderKind};

// Re-export registry types
pub use registry::{
    FetchDiagnostics, ProviderAttempt, QuoteResolver, QuoteValidator, SkipReason, MAX_PRICE,
};

pub use store::{read_commodities, read_pairs, SnapshotPaths, SnapshotWriter};
