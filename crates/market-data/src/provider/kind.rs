use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

/// The providers this crate ships with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderKind {
    TwelveData,
    MetalPriceApi,
    AlphaVantage,
    OpenErApi,
    Frankfurter,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 5] = [
        Self::TwelveData,
        Self::MetalPriceApi,
        Self::AlphaVantage,
        Self::OpenErApi,
        Self::Frankfurter,
    ];

    /// Provider id used in configuration, logs and snapshot `source` fields.
    pub fn id(&self) -> &'static str {
        match self {
            Self::TwelveData => "TWELVE_DATA",
            Self::MetalPriceApi => "METAL_PRICE_API",
            Self::AlphaVantage => "ALPHA_VANTAGE",
            Self::OpenErApi => "OPEN_ER_API",
            Self::Frankfurter => "FRANKFURTER",
        }
    }

    /// Environment variable holding the API key, for keyed providers.
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::TwelveData => Some("TWELVE_DATA_API_KEY"),
            Self::MetalPriceApi => Some("METAL_PRICE_API_KEY"),
            Self::AlphaVantage => Some("ALPHA_VANTAGE_API_KEY"),
            Self::OpenErApi | Self::Frankfurter => None,
        }
    }

    /// Parse a comma-separated provider list such as `"TWELVE_DATA,FRANKFURTER"`.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, ConfigError> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::from_str)
            .collect()
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == normalized)
            .ok_or_else(|| ConfigError::UnknownProvider(s.to_string()))
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
