use rust_decimal::Decimal;

use super::types::{Currency, ProviderId};

/// A price returned by one provider for one instrument.
#[derive(Clone, Debug, PartialEq)]
pub struct Quote {
    /// Spot price or exchange rate
    pub price: Decimal,

    /// Quote currency, when the provider reports it
    pub currency: Option<Currency>,

    /// Provider that supplied the price (TWELVE_DATA, FRANKFURTER, etc.)
    pub source: ProviderId,
}

impl Quote {
    pub fn new(price: Decimal, source: impl Into<ProviderId>) -> Self {
        Self {
            price,
            currency: None,
            source: source.into(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<Currency>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_new() {
        let quote = Quote::new(dec!(2345.10), "TWELVE_DATA");
        assert_eq!(quote.price, dec!(2345.10));
        assert_eq!(quote.source, "TWELVE_DATA");
        assert!(quote.currency.is_none());
    }

    #[test]
    fn test_quote_with_currency() {
        let quote = Quote::new(dec!(1.0845), "FRANKFURTER").with_currency("USD".to_string());
        assert_eq!(quote.currency.as_deref(), Some("USD"));
    }
}
