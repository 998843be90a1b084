use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Commodities priced on every cycle unless configured otherwise.
pub const DEFAULT_COMMODITIES: &[&str] = &["XAU/USD", "XAG/USD", "OIL"];

/// Currency pairs priced on every cycle unless configured otherwise.
pub const DEFAULT_PAIRS: &[&str] = &[
    "EUR/USD", "GBP/USD", "USD/JPY", "USD/CHF", "AUD/USD", "USD/CAD",
];

/// How an instrument is resolved. Each kind has its own provider chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    Commodity,
    FxPair,
}

impl InstrumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commodity => "commodity",
            Self::FxPair => "fx_pair",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A priced symbol: a commodity (`XAU/USD`, `OIL`) or a currency pair
/// (`EUR/USD`).
///
/// Identifiers are trimmed and upper-cased on construction. FX pairs must be
/// written as `BASE/QUOTE`; commodities may be bare symbols.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Instrument {
    id: Arc<str>,
    kind: InstrumentKind,
}

impl Instrument {
    /// Parse an instrument of the given kind.
    pub fn parse(kind: InstrumentKind, raw: &str) -> Result<Self, ConfigError> {
        let id = raw.trim().to_ascii_uppercase();
        let invalid = |reason: &str| ConfigError::InvalidInstrument {
            id: raw.to_string(),
            reason: reason.to_string(),
        };

        if id.is_empty() {
            return Err(invalid("empty identifier"));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(invalid("identifier contains whitespace"));
        }

        if id.contains('/') {
            if split_legs(&id).is_none() {
                return Err(invalid("expected BASE/QUOTE"));
            }
        } else if kind == InstrumentKind::FxPair {
            return Err(invalid("currency pairs must be written as BASE/QUOTE"));
        }

        Ok(Self {
            id: Arc::from(id),
            kind,
        })
    }

    pub fn commodity(raw: &str) -> Result<Self, ConfigError> {
        Self::parse(InstrumentKind::Commodity, raw)
    }

    pub fn fx_pair(raw: &str) -> Result<Self, ConfigError> {
        Self::parse(InstrumentKind::FxPair, raw)
    }

    /// Parse a comma-separated list, skipping empty items.
    ///
    /// Two entries that share a snapshot key (`XAU/USD` and `XAUUSD`) are
    /// rejected, since only one of them could be written.
    pub fn parse_list(kind: InstrumentKind, raw: &str) -> Result<Vec<Self>, ConfigError> {
        let mut seen: HashMap<String, Self> = HashMap::new();
        let mut instruments = Vec::new();

        for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let instrument = Self::parse(kind, item)?;
            if let Some(previous) = seen.get(&instrument.snapshot_key()) {
                return Err(ConfigError::InvalidInstrument {
                    id: item.to_string(),
                    reason: format!("duplicates {}", previous),
                });
            }
            seen.insert(instrument.snapshot_key(), instrument.clone());
            instruments.push(instrument);
        }

        Ok(instruments)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    /// Base and quote legs for `BASE/QUOTE` identifiers.
    pub fn legs(&self) -> Option<(&str, &str)> {
        split_legs(&self.id)
    }

    /// Key used for this instrument in the snapshot files.
    ///
    /// Pairs keep their slash (`EUR/USD`); commodities drop it (`XAUUSD`).
    pub fn snapshot_key(&self) -> String {
        match self.kind {
            InstrumentKind::FxPair => self.id.to_string(),
            InstrumentKind::Commodity => self.id.replace('/', ""),
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

fn split_legs(id: &str) -> Option<(&str, &str)> {
    let (base, quote) = id.split_once('/')?;
    let valid = |leg: &str| !leg.is_empty() && leg.chars().all(|c| c.is_ascii_alphanumeric());
    (valid(base) && valid(quote)).then_some((base, quote))
}

fn catalog(kind: InstrumentKind, ids: &[&'static str]) -> Vec<Instrument> {
    ids.iter()
        .map(|id| Instrument {
            id: Arc::from(*id),
            kind,
        })
        .collect()
}

/// The built-in commodity list.
pub fn default_commodities() -> Vec<Instrument> {
    catalog(InstrumentKind::Commodity, DEFAULT_COMMODITIES)
}

/// The built-in currency pair list.
pub fn default_pairs() -> Vec<Instrument> {
    catalog(InstrumentKind::FxPair, DEFAULT_PAIRS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        let pair = Instrument::fx_pair(" eur/usd ").unwrap();
        assert_eq!(pair.id(), "EUR/USD");
        assert_eq!(pair.kind(), InstrumentKind::FxPair);
        assert_eq!(pair.legs(), Some(("EUR", "USD")));
    }

    #[test]
    fn test_commodity_without_legs() {
        let oil = Instrument::commodity("OIL").unwrap();
        assert_eq!(oil.legs(), None);
        assert_eq!(oil.snapshot_key(), "OIL");
    }

    #[test]
    fn test_snapshot_key() {
        let gold = Instrument::commodity("XAU/USD").unwrap();
        assert_eq!(gold.snapshot_key(), "XAUUSD");

        let pair = Instrument::fx_pair("USD/JPY").unwrap();
        assert_eq!(pair.snapshot_key(), "USD/JPY");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(Instrument::fx_pair("EURUSD").is_err());
        assert!(Instrument::fx_pair("EUR/").is_err());
        assert!(Instrument::commodity("").is_err());
        assert!(Instrument::commodity("XAU USD").is_err());
        assert!(Instrument::commodity("/USD").is_err());
    }

    #[test]
    fn test_parse_list() {
        let pairs = Instrument::parse_list(InstrumentKind::FxPair, "EUR/USD, gbp/usd,,").unwrap();
        let ids: Vec<_> = pairs.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["EUR/USD", "GBP/USD"]);

        let err = Instrument::parse_list(InstrumentKind::FxPair, "EUR/USD,JPY").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInstrument { .. }));
    }

    #[test]
    fn test_parse_list_rejects_colliding_keys() {
        let err = Instrument::parse_list(InstrumentKind::Commodity, "XAU/USD, XAUUSD").unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidInstrument {
                id: "XAUUSD".to_string(),
                reason: "duplicates XAU/USD".to_string(),
            }
        );

        assert!(Instrument::parse_list(InstrumentKind::FxPair, "EUR/USD,eur/usd").is_err());
        assert!(Instrument::parse_list(InstrumentKind::Commodity, "XAU/USD,XAG/USD,OIL").is_ok());
    }

    #[test]
    fn test_default_catalog_is_well_formed() {
        for instrument in default_commodities().into_iter().chain(default_pairs()) {
            let reparsed = Instrument::parse(instrument.kind(), instrument.id()).unwrap();
            assert_eq!(reparsed, instrument);
        }
        assert_eq!(default_commodities().len(), 3);
        assert_eq!(default_pairs().len(), 6);
    }
}
