//! Error model for analytics service calls.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Service operation a failure is attributed to.
pub enum ApiOperation {
    /// `GET /assets`.
    ListAssets,
    /// `GET /assets/{symbol}/chart`.
    ChartSeries,
    /// `POST /dca/analyze`.
    AnalyzeStrategy,
    /// `GET /strategies`.
    ListSavedStrategies,
    /// `POST /strategies`.
    SaveStrategy,
    /// `GET /token/price/{id}`.
    TokenPrice,
}

impl ApiOperation {
    /// User-facing failure text shown inline by panels.
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::ListAssets => "Failed to fetch assets",
            Self::ChartSeries => "Failed to load chart data",
            Self::AnalyzeStrategy => "Failed to analyze DCA strategy",
            Self::ListSavedStrategies => "Failed to load saved strategies",
            Self::SaveStrategy => "Failed to save strategy",
            Self::TokenPrice => "Failed to fetch token price",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// A failed analytics call.
pub enum ApiError {
    /// The request never produced a response.
    #[error("{}: transport error: {message}", operation.failure_message())]
    Transport {
        /// Failed operation.
        operation: ApiOperation,
        /// Transport diagnostic.
        message: String,
    },
    /// The service answered with a non-2xx status.
    #[error("{}: HTTP {status}", operation.failure_message())]
    Status {
        /// Failed operation.
        operation: ApiOperation,
        /// HTTP status code.
        status: u16,
    },
    /// The response body did not match the expected model.
    #[error("{}: invalid response: {message}", operation.failure_message())]
    Decode {
        /// Failed operation.
        operation: ApiOperation,
        /// Decoder diagnostic.
        message: String,
    },
    /// The call was rejected before reaching the network.
    #[error("{}: {reason}", operation.failure_message())]
    Unavailable {
        /// Failed operation.
        operation: ApiOperation,
        /// Why the call could not be made.
        reason: String,
    },
}

impl ApiError {
    /// Operation the error belongs to.
    pub const fn operation(&self) -> ApiOperation {
        match self {
            Self::Transport { operation, .. }
            | Self::Status { operation, .. }
            | Self::Decode { operation, .. }
            | Self::Unavailable { operation, .. } => *operation,
        }
    }

    /// Short message suitable for inline display.
    pub const fn user_message(&self) -> &'static str {
        self.operation().failure_message()
    }
}
