use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use quoteboard_market_data::{
    default_commodities, default_pairs, ConfigError, Instrument, InstrumentKind, ProviderKind,
    ResolverConfig, DEFAULT_TIMEOUT,
};

const DEFAULT_OUTPUT_DIR: &str = "dist/data";

pub struct Config {
    pub resolver: ResolverConfig,
    pub output_dir: PathBuf,
    pub commodities: Vec<Instrument>,
    pub pairs: Vec<Instrument>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let provider_keys: HashMap<ProviderKind, String> = ProviderKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let env_var = kind.api_key_env()?;
                var(env_var).map(|key| (kind, key))
            })
            .collect();

        let mut resolver = ResolverConfig::with_keys(provider_keys);

        if let Some(raw) = var("QB_COMMODITY_PROVIDERS") {
            resolver.provider_order.commodity = ProviderKind::parse_list(&raw)?;
        }
        if let Some(raw) = var("QB_FX_PROVIDERS") {
            resolver.provider_order.fx = ProviderKind::parse_list(&raw)?;
        }

        resolver.timeout = match var("QB_TIMEOUT_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?,
            None => DEFAULT_TIMEOUT,
        };

        resolver.validate()?;

        let output_dir = var("QB_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let commodities = match var("QB_COMMODITIES") {
            Some(raw) => Instrument::parse_list(InstrumentKind::Commodity, &raw)?,
            None => default_commodities(),
        };
        let pairs = match var("QB_PAIRS") {
            Some(raw) => Instrument::parse_list(InstrumentKind::FxPair, &raw)?,
            None => default_pairs(),
        };

        Ok(Self {
            resolver,
            output_dir,
            commodities,
            pairs,
        })
    }

    /// Every configured instrument, commodities first.
    pub fn instruments(&self) -> Vec<Instrument> {
        self.commodities
            .iter()
            .chain(self.pairs.iter())
            .cloned()
            .collect()
    }
}
