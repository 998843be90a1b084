use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::errors::ConfigError;

use super::alpha_vantage::AlphaVantageProvider;
use super::frankfurter::FrankfurterProvider;
use super::metal_price_api::MetalPriceApiProvider;
use super::open_er_api::OpenErApiProvider;
use super::twelve_data::TwelveDataProvider;
use super::{MarketDataProvider, ProviderKind};

pub struct ProviderFactory;

impl ProviderFactory {
    /// Build one provider from configuration.
    pub fn build(
        kind: ProviderKind,
        config: &ResolverConfig,
    ) -> Result<Arc<dyn MarketDataProvider>, ConfigError> {
        let timeout = config.timeout;
        let key = || {
            config
                .api_key(kind)
                .map(str::to_string)
                .ok_or_else(|| ConfigError::MissingApiKey {
                    provider: kind.id().to_string(),
                    env_var: kind.api_key_env().unwrap_or_default().to_string(),
                })
        };

        let provider: Arc<dyn MarketDataProvider> = match kind {
            ProviderKind::TwelveData => Arc::new(TwelveDataProvider::new(key()?, timeout)),
            ProviderKind::MetalPriceApi => Arc::new(MetalPriceApiProvider::new(key()?, timeout)),
            ProviderKind::AlphaVantage => Arc::new(AlphaVantageProvider::new(key()?, timeout)),
            ProviderKind::OpenErApi => Arc::new(OpenErApiProvider::new(timeout)),
            ProviderKind::Frankfurter => Arc::new(FrankfurterProvider::new(timeout)),
        };
        Ok(provider)
    }

    /// Build every provider named in any chain, once each.
    pub fn build_all(
        config: &ResolverConfig,
    ) -> Result<HashMap<ProviderKind, Arc<dyn MarketDataProvider>>, ConfigError> {
        let mut providers = HashMap::new();
        let order = &config.provider_order;
        for kind in order.commodity.iter().chain(order.fx.iter()) {
            if !providers.contains_key(kind) {
                providers.insert(*kind, Self::build(*kind, config)?);
            }
        }
        Ok(providers)
    }
}
