//! News and AI analysis endpoints.

use super::{PredictrixApi, finish, path_id};
use crate::api::{ApiRequest, ApiResult};
use crate::error::Result;
use crate::models::{NewsAnalysis, NewsItem};
use serde::Deserialize;

/// Page size when the caller does not pick one.
const DEFAULT_NEWS_LIMIT: usize = 20;

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default, alias = "data", alias = "articles")]
    news: Vec<NewsItem>,
}

#[derive(Debug, Deserialize)]
struct AnalysisResponse {
    #[serde(alias = "data")]
    analysis: NewsAnalysis,
}

impl PredictrixApi {
    /// Recent market news, newest first.
    pub async fn fetch_news(&self, limit: Option<usize>) -> ApiResult<Vec<NewsItem>> {
        let limit = limit.unwrap_or(DEFAULT_NEWS_LIMIT).max(1);
        let request = ApiRequest::get("/news").query("limit", limit);
        let result: Result<NewsResponse> = self.call(request).await;
        finish("fetch_news", result.map(|r| r.news))
    }

    /// AI analysis of one story.
    pub async fn news_analysis(&self, news_id: &str) -> ApiResult<NewsAnalysis> {
        let result: Result<NewsAnalysis> = async {
            let id = path_id("news id", news_id)?;
            let response: AnalysisResponse = self
                .call(ApiRequest::get(format!("/news/{}/analysis", id)))
                .await?;
            let mut analysis = response.analysis;
            if analysis.news_id.is_empty() {
                analysis.news_id = id;
            }
            Ok(analysis)
        }
        .await;
        finish("news_analysis", result)
    }
}
