//! Resolver configuration.
//!
//! The resolver never reads the environment. Callers build a
//! [`ResolverConfig`] (the fetcher binary does so from environment variables)
//! and pass it in at construction.

use std::collections::HashMap;
use std::time::Duration;

use crate::errors::ConfigError;
use crate::models::InstrumentKind;
use crate::provider::ProviderKind;

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Ordered provider chains, one per instrument kind. The first provider in a
/// chain that answers wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderOrder {
    pub commodity: Vec<ProviderKind>,
    pub fx: Vec<ProviderKind>,
}

impl ProviderOrder {
    pub fn chain(&self, kind: InstrumentKind) -> &[ProviderKind] {
        match kind {
            InstrumentKind::Commodity => &self.commodity,
            InstrumentKind::FxPair => &self.fx,
        }
    }

    /// Default chains given the keys at hand.
    ///
    /// Twelve Data always leads both chains. Metal Price API and Alpha
    /// Vantage are appended to the commodity chain only when their keys are
    /// present; the keyless FX sources always back up Twelve Data.
    pub fn default_for_keys(keys: &HashMap<ProviderKind, String>) -> Self {
        let mut commodity = vec![ProviderKind::TwelveData];
        for optional in [ProviderKind::MetalPriceApi, ProviderKind::AlphaVantage] {
            if keys.contains_key(&optional) {
                commodity.push(optional);
            }
        }

        Self {
            commodity,
            fx: vec![
                ProviderKind::TwelveData,
                ProviderKind::OpenErApi,
                ProviderKind::Frankfurter,
            ],
        }
    }
}

/// Everything the resolver needs to know.
#[derive(Clone, Debug)]
pub struct ResolverConfig {
    /// API keys by provider. Keyless providers have no entry.
    pub provider_keys: HashMap<ProviderKind, String>,

    /// Upper bound on a single provider call.
    pub timeout: Duration,

    /// Provider chain per instrument kind.
    pub provider_order: ProviderOrder,
}

impl ResolverConfig {
    /// Config with the default chains for the given keys.
    pub fn with_keys(provider_keys: HashMap<ProviderKind, String>) -> Self {
        let provider_order = ProviderOrder::default_for_keys(&provider_keys);
        Self {
            provider_keys,
            timeout: DEFAULT_TIMEOUT,
            provider_order,
        }
    }

    pub fn api_key(&self, provider: ProviderKind) -> Option<&str> {
        self.provider_keys
            .get(&provider)
            .map(String::as_str)
            .filter(|k| !k.is_empty())
    }

    /// Check the configuration before any work starts.
    ///
    /// Fails on an empty chain, a zero timeout, or a keyed provider in any
    /// chain whose key is missing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout("timeout must be positive".to_string()));
        }

        for kind in [InstrumentKind::Commodity, InstrumentKind::FxPair] {
            let chain = self.provider_order.chain(kind);
            if chain.is_empty() {
                return Err(ConfigError::EmptyProviderOrder(kind.to_string()));
            }

            for provider in chain {
                if let Some(env_var) = provider.api_key_env() {
                    if self.api_key(*provider).is_none() {
                        return Err(ConfigError::MissingApiKey {
                            provider: provider.id().to_string(),
                            env_var: env_var.to_string(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(entries: &[(ProviderKind, &str)]) -> HashMap<ProviderKind, String> {
        entries
            .iter()
            .map(|(k, v)| (*k, v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_order_only_twelve_data_key() {
        let config = ResolverConfig::with_keys(keys(&[(ProviderKind::TwelveData, "td")]));
        assert_eq!(config.provider_order.commodity, vec![ProviderKind::TwelveData]);
        assert_eq!(
            config.provider_order.fx,
            vec![
                ProviderKind::TwelveData,
                ProviderKind::OpenErApi,
                ProviderKind::Frankfurter
            ]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_order_with_optional_keys() {
        let config = ResolverConfig::with_keys(keys(&[
            (ProviderKind::TwelveData, "td"),
            (ProviderKind::AlphaVantage, "av"),
            (ProviderKind::MetalPriceApi, "mp"),
        ]));
        assert_eq!(
            config.provider_order.chain(InstrumentKind::Commodity),
            &[
                ProviderKind::TwelveData,
                ProviderKind::MetalPriceApi,
                ProviderKind::AlphaVantage
            ]
        );
    }

    #[test]
    fn test_missing_twelve_data_key_is_fatal() {
        let config = ResolverConfig::with_keys(HashMap::new());
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingApiKey {
                provider: "TWELVE_DATA".to_string(),
                env_var: "TWELVE_DATA_API_KEY".to_string(),
            })
        );
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let config = ResolverConfig::with_keys(keys(&[(ProviderKind::TwelveData, "")]));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingApiKey { .. })
        ));
    }

    #[test]
    fn test_explicit_chain_requires_keys() {
        let mut config = ResolverConfig::with_keys(keys(&[(ProviderKind::TwelveData, "td")]));
        config.provider_order.commodity = vec![ProviderKind::MetalPriceApi];
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingApiKey {
                provider: "METAL_PRICE_API".to_string(),
                env_var: "METAL_PRICE_API_KEY".to_string(),
            })
        );
    }

    #[test]
    fn test_keyless_chain_needs_no_keys() {
        let config = ResolverConfig {
            provider_keys: HashMap::new(),
            timeout: DEFAULT_TIMEOUT,
            provider_order: ProviderOrder {
                commodity: vec![ProviderKind::TwelveData],
                fx: vec![ProviderKind::Frankfurter],
            },
        };
        // Twelve Data still needs its key for the commodity chain.
        assert!(config.validate().is_err());

        let config = ResolverConfig {
            provider_order: ProviderOrder {
                commodity: vec![ProviderKind::OpenErApi],
                fx: vec![ProviderKind::Frankfurter],
            },
            ..config
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_chain_and_zero_timeout() {
        let mut config = ResolverConfig::with_keys(keys(&[(ProviderKind::TwelveData, "td")]));
        config.provider_order.fx.clear();
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyProviderOrder("fx_pair".to_string()))
        );

        let mut config = ResolverConfig::with_keys(keys(&[(ProviderKind::TwelveData, "td")]));
        config.timeout = Duration::ZERO;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTimeout(_))));
    }
}
