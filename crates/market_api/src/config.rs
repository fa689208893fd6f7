//! Endpoint configuration for the analytics service.

/// Base URL used when no build-time override is provided.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Connection settings for [`crate::MarketApiClient`].
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl ApiConfig {
    /// Creates a config rooted at `base_url`; trailing slashes are dropped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        Self { base_url }
    }

    /// Reads `MARKET_API_BASE_URL` at compile time, falling back to [`DEFAULT_API_BASE_URL`].
    ///
    /// The browser bundle has no process environment, so the override is baked in by the build.
    pub fn from_build_env() -> Self {
        Self::new(option_env!("MARKET_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL))
    }

    /// Returns the normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
