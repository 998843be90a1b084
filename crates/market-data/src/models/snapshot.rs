use std::collections::BTreeMap;

use chrono::{DateTime, SubsecRound, Utc};
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::instrument::{Instrument, InstrumentKind};
use super::quote::Quote;
use crate::registry::QuoteValidator;

/// Result of one refresh cycle: every requested instrument with its resolved
/// quote, or `None` when all providers failed.
#[derive(Clone, Debug)]
pub struct QuoteSnapshot {
    generated_at: DateTime<Utc>,
    entries: Vec<SnapshotEntry>,
}

/// One instrument in a snapshot.
#[derive(Clone, Debug)]
pub struct SnapshotEntry {
    pub instrument: Instrument,
    pub quote: Option<Quote>,
}

impl QuoteSnapshot {
    /// Build a snapshot. The timestamp is truncated to milliseconds so it
    /// survives a round trip through the JSON files unchanged.
    ///
    /// Quotes that fail validation are replaced by `None`.
    pub fn new(generated_at: DateTime<Utc>, entries: Vec<SnapshotEntry>) -> Self {
        let validator = QuoteValidator::new();
        let entries = entries
            .into_iter()
            .map(|mut entry| {
                if let Some(Err(e)) = entry.quote.as_ref().map(|q| validator.validate(q)) {
                    warn!("Dropping {} from snapshot: {}", entry.instrument, e);
                    entry.quote = None;
                }
                entry
            })
            .collect();

        Self {
            generated_at: generated_at.trunc_subsecs(3),
            entries,
        }
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    /// Resolved price for an instrument identifier, if any.
    pub fn price(&self, instrument_id: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|e| e.instrument.id() == instrument_id)
            .and_then(|e| e.quote.as_ref())
            .map(|q| q.price)
    }

    pub fn resolved_count(&self) -> usize {
        self.entries.iter().filter(|e| e.quote.is_some()).count()
    }

    /// Identifiers of instruments no provider could price.
    pub fn unresolved(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.quote.is_none())
            .map(|e| e.instrument.id())
            .collect()
    }

    fn prices_for(&self, kind: InstrumentKind) -> BTreeMap<String, Option<PriceEntry>> {
        self.entries
            .iter()
            .filter(|e| e.instrument.kind() == kind)
            .map(|e| {
                (
                    e.instrument.snapshot_key(),
                    e.quote.as_ref().map(PriceEntry::from),
                )
            })
            .collect()
    }

    /// Document written to `commodities.json`.
    pub fn commodities_document(&self) -> CommoditiesDocument {
        CommoditiesDocument {
            generated_at: self.generated_at,
            commodities: self.prices_for(InstrumentKind::Commodity),
        }
    }

    /// Document written to `pairs.json`.
    pub fn pairs_document(&self) -> PairsDocument {
        PairsDocument {
            generated_at: self.generated_at,
            pairs: self.prices_for(InstrumentKind::FxPair),
        }
    }
}

/// Price of one instrument as stored in a snapshot file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl From<&Quote> for PriceEntry {
    fn from(quote: &Quote) -> Self {
        Self {
            price: quote.price.normalize(),
            source: Some(quote.source.to_string()),
            currency: quote.currency.as_ref().map(|c| c.to_string()),
        }
    }
}

/// `commodities.json`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommoditiesDocument {
    pub generated_at: DateTime<Utc>,
    pub commodities: BTreeMap<String, Option<PriceEntry>>,
}

/// `pairs.json`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairsDocument {
    pub generated_at: DateTime<Utc>,
    pub pairs: BTreeMap<String, Option<PriceEntry>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sample() -> QuoteSnapshot {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 6, 0, 0).unwrap();
        QuoteSnapshot::new(
            at,
            vec![
                SnapshotEntry {
                    instrument: Instrument::commodity("XAU/USD").unwrap(),
                    quote: Some(Quote::new(dec!(2345.10), "TWELVE_DATA")),
                },
                SnapshotEntry {
                    instrument: Instrument::commodity("OIL").unwrap(),
                    quote: None,
                },
                SnapshotEntry {
                    instrument: Instrument::fx_pair("EUR/USD").unwrap(),
                    quote: Some(Quote::new(dec!(1.0845), "FRANKFURTER")),
                },
            ],
        )
    }

    #[test]
    fn test_documents_split_by_kind() {
        let snapshot = sample();

        let commodities = snapshot.commodities_document();
        assert_eq!(commodities.commodities.len(), 2);
        assert_eq!(
            commodities.commodities["XAUUSD"].as_ref().map(|p| p.price),
            Some(dec!(2345.1))
        );
        assert_eq!(commodities.commodities["OIL"], None);

        let pairs = snapshot.pairs_document();
        assert_eq!(pairs.pairs.len(), 1);
        assert_eq!(pairs.generated_at, commodities.generated_at);
    }

    #[test]
    fn test_counts() {
        let snapshot = sample();
        assert_eq!(snapshot.resolved_count(), 2);
        assert_eq!(snapshot.unresolved(), vec!["OIL"]);
        assert_eq!(snapshot.price("EUR/USD"), Some(dec!(1.0845)));
        assert_eq!(snapshot.price("OIL"), None);
        assert_eq!(snapshot.price("GBP/USD"), None);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample().commodities_document()).unwrap();
        assert_eq!(json["generated_at"], "2026-10-18T06:00:00Z");
        assert_eq!(json["commodities"]["XAUUSD"]["price"], 2345.1);
        assert_eq!(json["commodities"]["XAUUSD"]["source"], "TWELVE_DATA");
        assert!(json["commodities"]["OIL"].is_null());
    }

    #[test]
    fn test_currency_written_when_known() {
        let snapshot = QuoteSnapshot::new(
            Utc::now(),
            vec![SnapshotEntry {
                instrument: Instrument::fx_pair("USD/JPY").unwrap(),
                quote: Some(Quote::new(dec!(157.3), "TWELVE_DATA").with_currency("JPY")),
            }],
        );
        let json = serde_json::to_value(snapshot.pairs_document()).unwrap();
        assert_eq!(json["pairs"]["USD/JPY"]["currency"], "JPY");

        let json = serde_json::to_value(sample().commodities_document()).unwrap();
        assert!(json["commodities"]["XAUUSD"].get("currency").is_none());
    }

    #[test]
    fn test_invalid_prices_become_null() {
        let snapshot = QuoteSnapshot::new(
            Utc::now(),
            vec![
                SnapshotEntry {
                    instrument: Instrument::fx_pair("EUR/USD").unwrap(),
                    quote: Some(Quote::new(Decimal::ZERO, "A")),
                },
                SnapshotEntry {
                    instrument: Instrument::fx_pair("GBP/USD").unwrap(),
                    quote: Some(Quote::new(dec!(-1.27), "B")),
                },
                SnapshotEntry {
                    instrument: Instrument::commodity("OIL").unwrap(),
                    quote: Some(Quote::new(dec!(82.37), "C")),
                },
            ],
        );

        assert_eq!(snapshot.unresolved(), vec!["EUR/USD", "GBP/USD"]);
        assert_eq!(snapshot.pairs_document().pairs["EUR/USD"], None);
        assert_eq!(snapshot.price("OIL"), Some(dec!(82.37)));
    }

    #[test]
    fn test_high_precision_price_round_trips() {
        let price: Decimal = "1.12345678901234567".parse().unwrap();
        let snapshot = QuoteSnapshot::new(
            Utc::now(),
            vec![SnapshotEntry {
                instrument: Instrument::fx_pair("EUR/USD").unwrap(),
                quote: Some(Quote::new(price, "TWELVE_DATA")),
            }],
        );

        let text = serde_json::to_string(&snapshot.pairs_document()).unwrap();
        assert!(text.contains("\"price\":1.12345678901234567"));

        let read_back: PairsDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(read_back.pairs["EUR/USD"].as_ref().map(|p| p.price), Some(price));
    }

    #[test]
    fn test_price_entry_parses_bare_price() {
        let entry: PriceEntry = serde_json::from_str(r#"{"price": 82.37}"#).unwrap();
        assert_eq!(entry.price, dec!(82.37));
        assert_eq!(entry.source, None);
        assert_eq!(entry.currency, None);
    }

    #[test]
    fn test_generated_at_truncated_to_millis() {
        let at = Utc.timestamp_nanos(1_760_767_200_123_456_789);
        let snapshot = QuoteSnapshot::new(at, Vec::new());
        assert_eq!(snapshot.generated_at().timestamp_subsec_nanos(), 123_000_000);
    }
}
