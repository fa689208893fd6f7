//! Service contract panels use to reach the analytics backend.

use std::{future::Future, pin::Pin};

use crate::{
    error::{ApiError, ApiOperation},
    types::{Asset, ChartPoint, ChartRange, DcaRecommendation, DcaStrategy, SavedStrategy, TokenPrice},
};

/// Object-safe boxed future used by [`MarketDataService`].
pub type MarketApiFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Analytics backend operations.
pub trait MarketDataService {
    /// Lists supported assets with their latest snapshot.
    fn list_assets(&self) -> MarketApiFuture<'_, Result<Vec<Asset>, ApiError>>;

    /// Loads the chart series for `symbol` over `range`.
    fn chart_series<'a>(
        &'a self,
        symbol: &'a str,
        range: ChartRange,
    ) -> MarketApiFuture<'a, Result<Vec<ChartPoint>, ApiError>>;

    /// Requests a recommendation for `strategy`.
    fn analyze_strategy<'a>(
        &'a self,
        strategy: &'a DcaStrategy,
    ) -> MarketApiFuture<'a, Result<DcaRecommendation, ApiError>>;

    /// Lists strategies previously saved on the service.
    fn saved_strategies(&self) -> MarketApiFuture<'_, Result<Vec<SavedStrategy>, ApiError>>;

    /// Analyzes and stores `strategy`.
    fn save_strategy<'a>(
        &'a self,
        strategy: &'a DcaStrategy,
    ) -> MarketApiFuture<'a, Result<SavedStrategy, ApiError>>;

    /// Fetches a spot quote for `token_id`.
    fn token_price<'a>(
        &'a self,
        token_id: &'a str,
    ) -> MarketApiFuture<'a, Result<TokenPrice, ApiError>>;
}

#[derive(Debug, Clone, Default)]
/// Service that rejects every call; used where no backend is configured.
pub struct UnavailableMarketDataService {
    reason: String,
}

impl UnavailableMarketDataService {
    /// Creates a service failing with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn reject<T>(&self, operation: ApiOperation) -> MarketApiFuture<'_, Result<T, ApiError>>
    where
        T: 'static,
    {
        let reason = if self.reason.is_empty() {
            "analytics service unavailable".to_string()
        } else {
            self.reason.clone()
        };
        Box::pin(async move { Err(ApiError::Unavailable { operation, reason }) })
    }
}

impl MarketDataService for UnavailableMarketDataService {
    fn list_assets(&self) -> MarketApiFuture<'_, Result<Vec<Asset>, ApiError>> {
        self.reject(ApiOperation::ListAssets)
    }

    fn chart_series<'a>(
        &'a self,
        _symbol: &'a str,
        _range: ChartRange,
    ) -> MarketApiFuture<'a, Result<Vec<ChartPoint>, ApiError>> {
        self.reject(ApiOperation::ChartSeries)
    }

    fn analyze_strategy<'a>(
        &'a self,
        _strategy: &'a DcaStrategy,
    ) -> MarketApiFuture<'a, Result<DcaRecommendation, ApiError>> {
        self.reject(ApiOperation::AnalyzeStrategy)
    }

    fn saved_strategies(&self) -> MarketApiFuture<'_, Result<Vec<SavedStrategy>, ApiError>> {
        self.reject(ApiOperation::ListSavedStrategies)
    }

    fn save_strategy<'a>(
        &'a self,
        _strategy: &'a DcaStrategy,
    ) -> MarketApiFuture<'a, Result<SavedStrategy, ApiError>> {
        self.reject(ApiOperation::SaveStrategy)
    }

    fn token_price<'a>(
        &'a self,
        _token_id: &'a str,
    ) -> MarketApiFuture<'a, Result<TokenPrice, ApiError>> {
        self.reject(ApiOperation::TokenPrice)
    }
}
