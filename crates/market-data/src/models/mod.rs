//! Market data models
//!
//! This module contains the core data types:
//! - `types` - Type aliases for common identifiers (ProviderId, Currency)
//! - `instrument` - Instrument identity, kinds and the default catalog
//! - `quote` - A single provider price (Quote)
//! - `snapshot` - One refresh cycle's results and the documents written to disk

mod instrument;
mod quote;
mod snapshot;
mod types;

pub use instrument::{
    default_commodities, default_pairs, Instrument, InstrumentKind, DEFAULT_COMMODITIES,
    DEFAULT_PAIRS,
};
pub use quote::Quote;
pub use snapshot::{CommoditiesDocument, PairsDocument, PriceEntry, QuoteSnapshot, SnapshotEntry};
pub use types::{Currency, ProviderId};
