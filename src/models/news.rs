//! News items and their AI analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Market sentiment of a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    #[serde(alias = "positive", alias = "Bullish")]
    Bullish,
    #[serde(alias = "negative", alias = "Bearish")]
    Bearish,
    #[default]
    #[serde(alias = "Neutral")]
    Neutral,
}

/// Expected market impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    #[default]
    #[serde(alias = "Low")]
    Low,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "High")]
    High,
}

/// A news story relevant to forex markets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, alias = "description")]
    pub summary: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(default)]
    pub impact: Impact,
    /// Currency pairs the story mentions.
    #[serde(default, alias = "currencies")]
    pub pairs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl NewsItem {
    /// Whether the story concerns `pair` (case-insensitive).
    pub fn mentions(&self, pair: &str) -> bool {
        self.pairs.iter().any(|p| p.eq_ignore_ascii_case(pair))
    }
}

/// AI analysis of one news story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsAnalysis {
    #[serde(default)]
    pub news_id: String,
    #[serde(default, alias = "analysis")]
    pub summary: String,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(default)]
    pub impact: Impact,
    #[serde(default)]
    pub affected_pairs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}
