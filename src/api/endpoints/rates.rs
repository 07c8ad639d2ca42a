//! Live rate endpoints.

use super::signals::normalize_pair;
use super::{PredictrixApi, finish};
use crate::api::{ApiRequest, ApiResult};
use crate::error::Result;
use crate::models::Rate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RatesResponse {
    #[serde(default, alias = "data")]
    rates: Vec<Rate>,
}

impl PredictrixApi {
    /// Current quotes. An empty `pairs` asks for every tracked pair.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_rates(&self, pairs: &[&str]) -> ApiResult<Vec<Rate>> {
        let result: Result<Vec<Rate>> = async {
            let mut request = ApiRequest::get("/rates");
            if !pairs.is_empty() {
                let symbols = pairs
                    .iter()
                    .map(|p| normalize_pair(p))
                    .collect::<Result<Vec<_>>>()?;
                request = request.query("pairs", symbols.join(","));
            }
            let response: RatesResponse = self.call(request).await?;
            Ok(response.rates)
        }
        .await;
        finish("fetch_rates", result)
    }
}
