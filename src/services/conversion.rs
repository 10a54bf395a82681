//! Currency conversion
//!
//! Every conversion goes through the base unit: multiply by the source rate,
//! then divide by the target rate. There is no pairwise rate table to keep in
//! sync.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{FinanceError, FinanceResult};
use crate::models::Currency;

/// What to do when a conversion names a code missing from the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionPolicy {
    /// Fail with `UnknownCurrency`
    #[default]
    Strict,
    /// Return the amount unconverted
    Lenient,
}

impl ConversionPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "lenient" => Some(Self::Lenient),
            _ => None,
        }
    }
}

/// Converts amounts using a borrowed rate table
#[derive(Debug, Clone, Copy)]
pub struct Converter<'a> {
    currencies: &'a [Currency],
    policy: ConversionPolicy,
}

impl<'a> Converter<'a> {
    pub fn new(currencies: &'a [Currency], policy: ConversionPolicy) -> Self {
        Self { currencies, policy }
    }

    /// Rate of `code`; the first entry wins when codes are duplicated
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.currencies
            .iter()
            .find(|c| c.has_code(code))
            .map(|c| c.conversion_rate)
    }

    /// Convert `amount` from one currency code to another
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> FinanceResult<f64> {
        if from.trim().eq_ignore_ascii_case(to.trim()) {
            return Ok(amount);
        }

        match (self.rate(from), self.rate(to)) {
            (Some(from_rate), Some(to_rate)) => {
                let in_base = amount * from_rate;
                Ok(in_base / to_rate)
            }
            (from_rate, _) => {
                let missing = if from_rate.is_none() { from } else { to };
                match self.policy {
                    ConversionPolicy::Strict => Err(FinanceError::UnknownCurrency {
                        code: missing.trim().to_ascii_uppercase(),
                    }),
                    ConversionPolicy::Lenient => {
                        warn!(
                            currency = missing,
                            amount, "Unknown currency, leaving amount unconverted"
                        );
                        Ok(amount)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<Currency> {
        vec![
            Currency::new("USD", "US Dollar", 1.0),
            Currency::new("ARS", "Argentine Peso", 0.001),
            Currency::new("EUR", "Euro", 1.1),
            Currency::new("BTC", "Bitcoin", 60000.0),
        ]
    }

    #[test]
    fn test_identity_is_exact() {
        let currencies = table();
        let converter = Converter::new(&currencies, ConversionPolicy::Strict);
        for currency in &currencies {
            for amount in [0.1, 1.0 / 3.0, 12345.678, 1e-9] {
                assert_eq!(
                    converter.convert(amount, &currency.code, &currency.code).unwrap(),
                    amount
                );
            }
        }
    }

    #[test]
    fn test_identity_holds_for_unknown_codes() {
        let currencies = table();
        let converter = Converter::new(&currencies, ConversionPolicy::Strict);
        assert_eq!(converter.convert(7.5, "XYZ", "xyz").unwrap(), 7.5);
    }

    #[test]
    fn test_two_hop_formula() {
        let currencies = table();
        let converter = Converter::new(&currencies, ConversionPolicy::Strict);
        let x = 250.0;
        for a in &currencies {
            for b in &currencies {
                let expected = if a.code == b.code {
                    x
                } else {
                    x * a.conversion_rate / b.conversion_rate
                };
                assert_eq!(converter.convert(x, &a.code, &b.code).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let currencies = table();
        let converter = Converter::new(&currencies, ConversionPolicy::Strict);
        let x = 987.65;
        for a in &currencies {
            for b in &currencies {
                let there = converter.convert(x, &a.code, &b.code).unwrap();
                let back = converter.convert(there, &b.code, &a.code).unwrap();
                assert!((back - x).abs() < 1e-9 * x, "{} -> {}", a.code, b.code);
            }
        }
    }

    #[test]
    fn test_to_anchor_multiplies_by_rate() {
        let currencies = table();
        let converter = Converter::new(&currencies, ConversionPolicy::Strict);
        assert_eq!(converter.convert(42.0, "USD", "USD").unwrap(), 42.0);
        assert_eq!(converter.convert(1000.0, "ARS", "USD").unwrap(), 1000.0 * 0.001);
        assert_eq!(converter.convert(2.0, "BTC", "USD").unwrap(), 120000.0);
    }

    #[test]
    fn test_strict_rejects_unknown() {
        let currencies = table();
        let converter = Converter::new(&currencies, ConversionPolicy::Strict);

        let err = converter.convert(10.0, "GBP", "USD").unwrap_err();
        assert!(matches!(err, FinanceError::UnknownCurrency { ref code } if code == "GBP"));

        let err = converter.convert(10.0, "USD", "jpy").unwrap_err();
        assert!(matches!(err, FinanceError::UnknownCurrency { ref code } if code == "JPY"));
    }

    #[test]
    fn test_lenient_returns_amount_unconverted() {
        let currencies = table();
        let converter = Converter::new(&currencies, ConversionPolicy::Lenient);
        assert_eq!(converter.convert(10.0, "GBP", "EUR").unwrap(), 10.0);
        assert_eq!(converter.convert(10.0, "EUR", "GBP").unwrap(), 10.0);
    }

    #[test]
    fn test_duplicate_codes_use_first_match() {
        let currencies = vec![
            Currency::new("USD", "US Dollar", 1.0),
            Currency::new("EUR", "Euro", 1.1),
            Currency::new("EUR", "Euro (old)", 1.5),
        ];
        let converter = Converter::new(&currencies, ConversionPolicy::Strict);
        assert_eq!(converter.rate("EUR"), Some(1.1));
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(ConversionPolicy::parse("Strict"), Some(ConversionPolicy::Strict));
        assert_eq!(ConversionPolicy::parse("lenient"), Some(ConversionPolicy::Lenient));
        assert_eq!(ConversionPolicy::parse("loose"), None);
    }
}
