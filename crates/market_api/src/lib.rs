//! Typed REST boundary for the DCA analytics service consumed by desktop panels.
//!
//! The service itself (price history, sentiment, strategy recommendation) lives outside this
//! workspace. This crate owns the request/response models, endpoint configuration, and the
//! [`MarketDataService`] contract panels depend on, plus the `reqwest`-backed
//! [`MarketApiClient`] implementation used in the browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod client;
pub mod config;
mod datetime;
pub mod error;
pub mod service;
pub mod types;

pub use client::MarketApiClient;
pub use config::{ApiConfig, DEFAULT_API_BASE_URL};
pub use error::{ApiError, ApiOperation};
pub use service::{MarketApiFuture, MarketDataService, UnavailableMarketDataService};
pub use types::{
    Asset, ChartPoint, ChartRange, DcaFrequency, DcaRecommendation, DcaStrategy, SavedStrategy,
    TokenPrice,
};
