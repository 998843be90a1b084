//! Provider capabilities.

use crate::models::InstrumentKind;

/// Describes which instruments a provider can price.
///
/// Used by the resolver to skip providers that were placed in a chain they
/// cannot serve, without spending a network call on them.
#[derive(Clone, Debug)]
pub struct ProviderCapabilities {
    /// Instrument kinds this provider supports.
    pub instrument_kinds: &'static [InstrumentKind],
}

impl ProviderCapabilities {
    pub fn supports(&self, kind: InstrumentKind) -> bool {
        self.instrument_kinds.contains(&kind)
    }
}
