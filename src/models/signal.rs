//! Trading signals.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Recommended trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[serde(alias = "buy", alias = "Buy", alias = "LONG", alias = "long")]
    Buy,
    #[serde(alias = "sell", alias = "Sell", alias = "SHORT", alias = "short")]
    Sell,
    #[default]
    #[serde(alias = "hold", alias = "Hold", alias = "NEUTRAL", alias = "neutral")]
    Hold,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Hold => write!(f, "HOLD"),
        }
    }
}

/// A model-generated signal for a currency pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    /// Signal ID.
    #[serde(default, alias = "_id")]
    pub id: String,
    /// Currency pair, e.g. "EURUSD".
    #[serde(alias = "symbol")]
    pub pair: String,
    /// Recommended direction.
    #[serde(default, alias = "signal", alias = "action")]
    pub direction: Direction,
    /// Model confidence in percent (0-100).
    #[serde(default)]
    pub confidence: f64,
    /// Suggested entry price.
    #[serde(default, alias = "entry", skip_serializing_if = "Option::is_none")]
    pub entry_price: Option<Decimal>,
    /// Take-profit level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<Decimal>,
    /// Stop-loss level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<Decimal>,
    /// Chart timeframe the signal was computed on, e.g. "1h".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    /// Generation time.
    #[serde(default, alias = "timestamp", skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    /// Short explanation from the model.
    #[serde(default, alias = "reason", skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl Signal {
    /// A non-hold signal at or above `min_confidence`.
    pub fn is_actionable(&self, min_confidence: f64) -> bool {
        self.direction != Direction::Hold && self.confidence >= min_confidence
    }

    /// Reward over risk, from entry, take-profit and stop-loss.
    pub fn risk_reward(&self) -> Option<Decimal> {
        let entry = self.entry_price?;
        let reward = (self.take_profit? - entry).abs();
        let risk = (entry - self.stop_loss?).abs();
        if risk.is_zero() {
            return None;
        }
        Some(reward / risk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn create_test_signal() -> Signal {
        serde_json::from_value(json!({
            "_id": "s1",
            "pair": "EURUSD",
            "signal": "buy",
            "confidence": 82.5,
            "entryPrice": "1.0850",
            "takeProfit": "1.0910",
            "stopLoss": "1.0820",
            "timeframe": "1h",
            "timestamp": "2024-05-01T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_parses_backend_shape() {
        let signal = create_test_signal();
        assert_eq!(signal.id, "s1");
        assert_eq!(signal.direction, Direction::Buy);
        assert_eq!(signal.entry_price, Some(dec!(1.0850)));
        assert!(signal.generated_at.is_some());
    }

    #[test]
    fn test_risk_reward() {
        let signal = create_test_signal();
        // reward 0.0060, risk 0.0030
        assert_eq!(signal.risk_reward(), Some(dec!(2)));
    }

    #[test]
    fn test_risk_reward_needs_all_levels() {
        let mut signal = create_test_signal();
        signal.stop_loss = None;
        assert_eq!(signal.risk_reward(), None);
    }

    #[test]
    fn test_actionable() {
        let mut signal = create_test_signal();
        assert!(signal.is_actionable(80.0));
        assert!(!signal.is_actionable(90.0));
        signal.direction = Direction::Hold;
        assert!(!signal.is_actionable(0.0));
    }

    #[test]
    fn test_missing_direction_defaults_to_hold() {
        let signal: Signal = serde_json::from_value(json!({"symbol": "USDJPY"})).unwrap();
        assert_eq!(signal.pair, "USDJPY");
        assert_eq!(signal.direction, Direction::Hold);
        assert_eq!(signal.direction.to_string(), "HOLD");
    }
}
