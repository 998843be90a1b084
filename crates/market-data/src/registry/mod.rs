//! Provider orchestration.
//!
//! This module provides:
//! - Ordered fallback across provider chains (`QuoteResolver`)
//! - Quote data validation
//! - Per-resolution diagnostics of which providers were tried

mod quote_resolver;
mod skip_reason;
mod validator;

pub use quote_resolver::QuoteResolver;
pub use skip_reason::{FetchDiagnostics, ProviderAttempt, SkipReason};
pub use validator::{QuoteValidator, MAX_PRICE};
