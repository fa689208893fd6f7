//! `reqwest`-backed [`MarketDataService`] implementation.
//!
//! On `wasm32` reqwest rides on the browser `fetch` API, so the same client serves the CSR bundle
//! and native tests.

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::ApiConfig,
    error::{ApiError, ApiOperation},
    service::{MarketApiFuture, MarketDataService},
    types::{Asset, ChartPoint, ChartRange, DcaRecommendation, DcaStrategy, SavedStrategy, TokenPrice},
};

#[derive(Debug, Clone)]
/// HTTP client for the analytics service.
pub struct MarketApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl Default for MarketApiClient {
    fn default() -> Self {
        Self::new(ApiConfig::from_build_env())
    }
}

impl MarketApiClient {
    /// Creates a client for `config`.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn chart_url(&self, symbol: &str) -> String {
        self.segment_url(&["assets", symbol, "chart"])
    }

    fn token_price_url(&self, token_id: &str) -> String {
        self.segment_url(&["token", "price", token_id])
    }

    /// Appends each segment percent-encoded, so a `/` inside an id stays within its segment.
    fn segment_url(&self, segments: &[&str]) -> String {
        let Ok(mut url) = reqwest::Url::parse(self.config.base_url()) else {
            // Unparseable base; the request itself reports the transport error.
            return self.config.endpoint(&segments.join("/"));
        };
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }

    async fn get_json<T>(
        &self,
        operation: ApiOperation,
        url: String,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|err| transport_error(operation, err))?;
        read_response(operation, response).await
    }

    async fn post_json<B, T>(
        &self,
        operation: ApiOperation,
        url: String,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| transport_error(operation, err))?;
        read_response(operation, response).await
    }
}

impl MarketDataService for MarketApiClient {
    fn list_assets(&self) -> MarketApiFuture<'_, Result<Vec<Asset>, ApiError>> {
        Box::pin(self.get_json(ApiOperation::ListAssets, self.config.endpoint("assets"), &[]))
    }

    fn chart_series<'a>(
        &'a self,
        symbol: &'a str,
        range: ChartRange,
    ) -> MarketApiFuture<'a, Result<Vec<ChartPoint>, ApiError>> {
        Box::pin(async move {
            self.get_json(
                ApiOperation::ChartSeries,
                self.chart_url(symbol),
                &[("range", range.as_query())],
            )
            .await
        })
    }

    fn analyze_strategy<'a>(
        &'a self,
        strategy: &'a DcaStrategy,
    ) -> MarketApiFuture<'a, Result<DcaRecommendation, ApiError>> {
        Box::pin(self.post_json(
            ApiOperation::AnalyzeStrategy,
            self.config.endpoint("dca/analyze"),
            strategy,
        ))
    }

    fn saved_strategies(&self) -> MarketApiFuture<'_, Result<Vec<SavedStrategy>, ApiError>> {
        Box::pin(self.get_json(
            ApiOperation::ListSavedStrategies,
            self.config.endpoint("strategies"),
            &[],
        ))
    }

    fn save_strategy<'a>(
        &'a self,
        strategy: &'a DcaStrategy,
    ) -> MarketApiFuture<'a, Result<SavedStrategy, ApiError>> {
        Box::pin(self.post_json(
            ApiOperation::SaveStrategy,
            self.config.endpoint("strategies"),
            strategy,
        ))
    }

    fn token_price<'a>(
        &'a self,
        token_id: &'a str,
    ) -> MarketApiFuture<'a, Result<TokenPrice, ApiError>> {
        Box::pin(self.get_json(ApiOperation::TokenPrice, self.token_price_url(token_id), &[]))
    }
}

async fn read_response<T>(operation: ApiOperation, response: reqwest::Response) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    check_status(operation, response.status().as_u16())?;
    let body = response
        .text()
        .await
        .map_err(|err| transport_error(operation, err))?;
    decode_body(operation, &body)
}

fn transport_error(operation: ApiOperation, err: reqwest::Error) -> ApiError {
    ApiError::Transport {
        operation,
        message: err.to_string(),
    }
}

fn check_status(operation: ApiOperation, status: u16) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ApiError::Status { operation, status })
    }
}

fn decode_body<T>(operation: ApiOperation, body: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|err| ApiError::Decode {
        operation,
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn non_success_status_maps_to_status_error() {
        assert_eq!(check_status(ApiOperation::ListAssets, 204), Ok(()));
        assert_eq!(
            check_status(ApiOperation::ChartSeries, 404),
            Err(ApiError::Status {
                operation: ApiOperation::ChartSeries,
                status: 404,
            })
        );
        assert!(check_status(ApiOperation::ChartSeries, 302).is_err());
    }

    #[test]
    fn decode_failure_keeps_operation() {
        let err = decode_body::<Vec<Asset>>(ApiOperation::ListAssets, "{\"detail\":\"boom\"}")
            .unwrap_err();
        assert_eq!(err.operation(), ApiOperation::ListAssets);
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn decodes_asset_listing() {
        let assets: Vec<Asset> = decode_body(
            ApiOperation::ListAssets,
            r#"[{"symbol":"BTC-USD","name":"Bitcoin","current_price":64000.5,"change_24h":-1.25,"volume_24h":1200000.0}]"#,
        )
        .unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].symbol, "BTC-USD");
        assert_eq!(assets[0].change_24h, -1.25);
    }

    #[test]
    fn urls_encode_symbols_as_single_segments() {
        let client = MarketApiClient::new(ApiConfig::new("http://localhost:8000/"));
        assert_eq!(
            client.chart_url("BTC-USD"),
            "http://localhost:8000/assets/BTC-USD/chart"
        );
        assert_eq!(
            client.token_price_url("wrapped/eth coin"),
            "http://localhost:8000/token/price/wrapped%2Feth%20coin"
        );
    }

    #[test]
    fn urls_keep_a_base_path_prefix() {
        let client = MarketApiClient::new(ApiConfig::new("http://api.local:9000/v1"));
        assert_eq!(
            client.chart_url("ETH USD"),
            "http://api.local:9000/v1/assets/ETH%20USD/chart"
        );
    }
}
