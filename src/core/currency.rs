//! Currency conversion abstractions

use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Currencies the business case can be reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(alias = "usd")]
    USD,
    #[serde(alias = "eur")]
    EUR,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            _ => Err(Error::config(format!("unknown currency '{s}'"))),
        }
    }
}

/// Source of exchange rates, each expressed against USD.
pub trait CurrencyRateProvider: Send + Sync {
    /// Units of `currency` per one USD.
    fn rate(&self, currency: Currency) -> Result<f64>;

    /// Multiplier turning an amount in `from` into an amount in `to`.
    /// Fails for any currency missing from the table, even when `from == to`.
    fn get_rate(&self, from: Currency, to: Currency) -> Result<f64> {
        let (to_rate, from_rate) = (self.rate(to)?, self.rate(from)?);
        if from == to {
            return Ok(1.0);
        }
        Ok(to_rate / from_rate)
    }
}

/// Immutable rate table keyed by currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Currency, f64>", into = "BTreeMap<Currency, f64>")]
pub struct FixedRateTable {
    rates: BTreeMap<Currency, f64>,
}

impl FixedRateTable {
    /// Builds a table, rejecting rates that are not finite and positive.
    /// USD is always the base and is pinned to 1.0 when absent.
    pub fn new(mut rates: BTreeMap<Currency, f64>) -> Result<Self> {
        for (currency, rate) in &rates {
            if !rate.is_finite() || *rate <= 0.0 {
                return Err(Error::config(format!(
                    "rate for {currency} must be a positive number, got {rate}"
                )));
            }
        }
        match rates.get(&Currency::USD) {
            Some(usd) if (*usd - 1.0).abs() > f64::EPSILON => {
                return Err(Error::config(format!(
                    "USD is the base currency and must have rate 1.0, got {usd}"
                )));
            }
            Some(_) => {}
            None => {
                rates.insert(Currency::USD, 1.0);
            }
        }
        Ok(Self { rates })
    }
}

impl Default for FixedRateTable {
    fn default() -> Self {
        Self {
            rates: BTreeMap::from([(Currency::USD, 1.0), (Currency::EUR, 0.92)]),
        }
    }
}

impl TryFrom<BTreeMap<Currency, f64>> for FixedRateTable {
    type Error = Error;

    fn try_from(rates: BTreeMap<Currency, f64>) -> Result<Self> {
        Self::new(rates)
    }
}

impl From<FixedRateTable> for BTreeMap<Currency, f64> {
    fn from(table: FixedRateTable) -> Self {
        table.rates
    }
}

impl CurrencyRateProvider for FixedRateTable {
    fn rate(&self, currency: Currency) -> Result<f64> {
        self.rates
            .get(&currency)
            .copied()
            .ok_or_else(|| Error::config(format!("no exchange rate configured for {currency}")))
    }
}

/// Converts `amount` from one currency to another.
///
/// Both currencies must be in the provider's table.
pub fn convert(
    provider: &dyn CurrencyRateProvider,
    amount: f64,
    from: Currency,
    to: Currency,
) -> Result<f64> {
    let rate = provider.get_rate(from, to)?;
    let converted = amount * rate;
    debug!("Converted {amount} from {from} to {to} at rate {rate}: {converted}");
    Ok(converted)
}
