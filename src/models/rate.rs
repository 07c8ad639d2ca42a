//! Live exchange rates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quote for a currency pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    /// Currency pair, e.g. "GBPUSD".
    #[serde(alias = "symbol")]
    pub pair: String,
    /// Best bid.
    pub bid: Decimal,
    /// Best ask.
    pub ask: Decimal,
    /// Change over the last 24h, in percent.
    #[serde(default, alias = "change")]
    pub change_percent: Decimal,
    /// Quote time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Rate {
    /// Mid price.
    pub fn mid(&self) -> Decimal {
        (self.bid + self.ask) / Decimal::TWO
    }

    /// Ask minus bid.
    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }

    /// Size of one pip: 0.01 for JPY quotes, 0.0001 otherwise.
    pub fn pip_size(&self) -> Decimal {
        if self.pair.to_ascii_uppercase().ends_with("JPY") {
            Decimal::new(1, 2)
        } else {
            Decimal::new(1, 4)
        }
    }

    /// Spread expressed in pips.
    pub fn spread_pips(&self) -> Decimal {
        self.spread() / self.pip_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rate(pair: &str, bid: Decimal, ask: Decimal) -> Rate {
        Rate {
            pair: pair.to_string(),
            bid,
            ask,
            change_percent: Decimal::ZERO,
            timestamp: None,
        }
    }

    #[test]
    fn test_mid_and_spread() {
        let eurusd = rate("EURUSD", dec!(1.0850), dec!(1.0852));
        assert_eq!(eurusd.mid(), dec!(1.0851));
        assert_eq!(eurusd.spread(), dec!(0.0002));
        assert_eq!(eurusd.spread_pips(), dec!(2));
    }

    #[test]
    fn test_jpy_pip_size() {
        let usdjpy = rate("usdjpy", dec!(151.20), dec!(151.23));
        assert_eq!(usdjpy.pip_size(), dec!(0.01));
        assert_eq!(usdjpy.spread_pips(), dec!(3));
    }
}
