//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - Provider capabilities
//! - Concrete provider implementations (Twelve Data, Metal Price API, etc.)
//! - `ProviderFactory` to build providers from a `ResolverConfig`
//!
//! # Architecture
//!
//! The provider system is designed to be:
//! - **Provider-agnostic**: The resolver only sees the trait
//! - **Extensible**: New providers can be added by implementing `MarketDataProvider`
//! - **Failure-tolerant**: Every provider failure is an error value the resolver
//!   can step over

mod capabilities;
mod factory;
mod http;
mod kind;
mod traits;

pub mod alpha_vantage;
pub mod frankfurter;
pub mod metal_price_api;
pub mod open_er_api;
pub mod twelve_data;

// Re-exports
pub use capabilities::ProviderCapabilities;
pub use factory::ProviderFactory;
pub use kind::ProviderKind;
pub use traits::MarketDataProvider;
