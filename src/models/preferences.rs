//! User preferences kept on the device and on the backend.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Color scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" | "auto" => Ok(Self::System),
            other => Err(crate::Error::invalid_input(format!("unknown theme: {other}"))),
        }
    }
}

/// Push notification settings stored on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPreferences {
    /// Master switch.
    pub enabled: bool,
    /// Notify on new signals.
    pub signal_alerts: bool,
    /// Notify on high-impact news.
    pub news_alerts: bool,
    /// Notify on large rate moves.
    pub rate_alerts: bool,
    /// Minimum signal confidence (percent) worth a notification.
    pub min_confidence: f64,
    /// Minimum 24h move (percent) worth a rate alert.
    pub rate_change_percent: f64,
    /// Pairs to watch. Empty means all.
    pub pairs: Vec<String>,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            enabled: true,
            signal_alerts: true,
            news_alerts: true,
            rate_alerts: false,
            min_confidence: 70.0,
            rate_change_percent: 0.5,
            pairs: Vec::new(),
        }
    }
}

impl NotificationPreferences {
    /// Reject values the backend would refuse.
    pub fn validate(&self) -> crate::Result<()> {
        if !(0.0..=100.0).contains(&self.min_confidence) {
            return Err(crate::Error::invalid_input(
                "min_confidence must be between 0 and 100",
            ));
        }
        if self.rate_change_percent < 0.0 {
            return Err(crate::Error::invalid_input(
                "rate_change_percent must not be negative",
            ));
        }
        Ok(())
    }

    /// Whether alerts for `pair` are wanted.
    pub fn watches(&self, pair: &str) -> bool {
        self.pairs.is_empty() || self.pairs.iter().any(|p| p.eq_ignore_ascii_case(pair))
    }
}

/// Local copy of the alert thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignalThresholds {
    pub min_confidence: f64,
    pub rate_change_percent: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self::from(&NotificationPreferences::default())
    }
}

impl From<&NotificationPreferences> for SignalThresholds {
    fn from(prefs: &NotificationPreferences) -> Self {
        Self {
            min_confidence: prefs.min_confidence,
            rate_change_percent: prefs.rate_change_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parsing() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("auto".parse::<Theme>().unwrap(), Theme::System);
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.to_string(), "light");
    }

    #[test]
    fn test_preferences_validation() {
        let mut prefs = NotificationPreferences::default();
        assert!(prefs.validate().is_ok());
        prefs.min_confidence = 120.0;
        assert!(prefs.validate().is_err());
    }

    #[test]
    fn test_watches() {
        let mut prefs = NotificationPreferences::default();
        assert!(prefs.watches("EURUSD"));
        prefs.pairs = vec!["GBPUSD".to_string()];
        assert!(prefs.watches("gbpusd"));
        assert!(!prefs.watches("EURUSD"));
    }

    #[test]
    fn test_thresholds_follow_preferences() {
        let prefs = NotificationPreferences {
            min_confidence: 85.0,
            rate_change_percent: 1.2,
            ..Default::default()
        };
        let thresholds = SignalThresholds::from(&prefs);
        assert_eq!(thresholds.min_confidence, 85.0);
        assert_eq!(thresholds.rate_change_percent, 1.2);
    }
}
