//! Quote data validation.
//!
//! A price is only accepted when it is strictly positive and below a sanity
//! ceiling. Decimals cannot hold NaN or infinity; providers reject non-finite
//! floats while converting, before a quote ever reaches the validator.

use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::Quote;

/// Sanity ceiling for any price.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Quote data validator.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuoteValidator;

impl QuoteValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a quote. Zero, negative and above-ceiling prices are rejected.
    pub fn validate(&self, quote: &Quote) -> Result<(), MarketDataError> {
        let invalid = || MarketDataError::InvalidPrice {
            provider: quote.source.to_string(),
            value: quote.price.to_string(),
        };

        if quote.price <= Decimal::ZERO {
            return Err(invalid());
        }

        if quote.price > MAX_PRICE {
            return Err(invalid());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_price_passes() {
        let validator = QuoteValidator::new();
        assert!(validator.validate(&Quote::new(dec!(82.37), "A")).is_ok());
        assert!(validator.validate(&Quote::new(dec!(0.0001), "A")).is_ok());
    }

    #[test]
    fn test_zero_and_negative_rejected() {
        let validator = QuoteValidator::new();
        let err = validator.validate(&Quote::new(Decimal::ZERO, "A")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid price from A: 0");
        assert!(validator.validate(&Quote::new(dec!(-1.5), "A")).is_err());
    }

    #[test]
    fn test_ceiling() {
        let validator = QuoteValidator::new();
        assert_eq!(MAX_PRICE, Decimal::from(1_000_000_000i64));
        assert!(validator.validate(&Quote::new(MAX_PRICE, "A")).is_ok());
        assert!(validator
            .validate(&Quote::new(Decimal::from(1_000_000_001i64), "A"))
            .is_err());
    }
}
