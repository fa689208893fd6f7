//! Request/response models for the analytics service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::datetime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Tradable asset with its latest market snapshot.
pub struct Asset {
    /// Ticker symbol understood by the service (for example `BTC-USD`).
    pub symbol: String,
    /// Human-readable name.
    pub name: String,
    /// Last close in USD.
    pub current_price: f64,
    /// Percent change against the previous close.
    pub change_24h: f64,
    /// Traded volume for the latest session.
    pub volume_24h: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One sample of a chart series.
///
/// Moving averages are `0.0` until enough history exists to compute them.
pub struct ChartPoint {
    /// Sample date (`YYYY-MM-DD`).
    pub date: String,
    /// Close price.
    pub price: f64,
    /// 50-period simple moving average.
    pub sma50: f64,
    /// 200-period simple moving average.
    pub sma200: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
/// Chart lookback window.
pub enum ChartRange {
    /// One day.
    #[serde(rename = "1D")]
    OneDay,
    /// One week.
    #[serde(rename = "1W")]
    OneWeek,
    /// One month.
    #[default]
    #[serde(rename = "1M")]
    OneMonth,
    /// Three months.
    #[serde(rename = "3M")]
    ThreeMonths,
    /// One year.
    #[serde(rename = "1Y")]
    OneYear,
}

impl ChartRange {
    /// All ranges in display order.
    pub const ALL: [ChartRange; 5] = [
        Self::OneDay,
        Self::OneWeek,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::OneYear,
    ];

    /// Query-string token for the `range` parameter.
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::OneDay => "1D",
            Self::OneWeek => "1W",
            Self::OneMonth => "1M",
            Self::ThreeMonths => "3M",
            Self::OneYear => "1Y",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Purchase cadence of a DCA plan.
pub enum DcaFrequency {
    /// Every day.
    Daily,
    /// Every week.
    Weekly,
    /// Every month.
    #[default]
    Monthly,
}

impl DcaFrequency {
    /// All frequencies in display order.
    pub const ALL: [DcaFrequency; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    /// Wire token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }

    /// Days between purchases as the service counts them.
    pub const fn interval_days(self) -> i64 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
            Self::Monthly => 30,
        }
    }

    /// Parses a wire token.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|freq| freq.as_str() == token)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// DCA plan submitted for analysis or saving.
pub struct DcaStrategy {
    /// Asset symbol.
    pub asset: String,
    /// USD amount per purchase.
    pub amount: f64,
    /// Purchase cadence.
    pub frequency: DcaFrequency,
    /// Plan start.
    #[serde(with = "datetime::utc")]
    pub start_date: DateTime<Utc>,
    /// Optional plan end; omitted from the payload when absent.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "datetime::utc_option"
    )]
    pub end_date: Option<DateTime<Utc>>,
    /// Whether the service should apply its model-based adjustments.
    pub ai_enhanced: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Analysis result for a [`DcaStrategy`].
pub struct DcaRecommendation {
    /// Asset symbol.
    pub asset: String,
    /// Suggested limit price for the next purchase.
    pub optimal_entry_price: f64,
    /// Sentiment label.
    pub sentiment: String,
    /// Confidence in `0.0..=1.0`.
    pub confidence: f64,
    /// Next scheduled purchase.
    #[serde(with = "datetime::utc")]
    pub next_dca_date: DateTime<Utc>,
    /// Volatility-adjusted purchase amount.
    pub suggested_amount: f64,
    /// Observed market conditions.
    #[serde(default)]
    pub market_conditions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Strategy plus recommendation stored by the service.
pub struct SavedStrategy {
    /// Service-assigned identifier.
    pub id: String,
    /// Creation time.
    #[serde(with = "datetime::utc")]
    pub created_at: DateTime<Utc>,
    /// Submitted plan.
    pub strategy: DcaStrategy,
    /// Recommendation computed when saving.
    pub recommendation: DcaRecommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Spot price quote for a token.
pub struct TokenPrice {
    /// Quoted price.
    pub price: f64,
    /// Quote time in unix seconds.
    pub timestamp: i64,
    /// Token symbol.
    pub symbol: String,
    /// Quote confidence in `0.0..=1.0`.
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn strategy_payload_omits_missing_end_date_and_uses_iso_dates() {
        let strategy = DcaStrategy {
            asset: "BTC-USD".to_string(),
            amount: 100.0,
            frequency: DcaFrequency::Weekly,
            start_date: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
            end_date: None,
            ai_enhanced: true,
        };

        let value = serde_json::to_value(&strategy).unwrap();

        assert_eq!(
            value,
            json!({
                "asset": "BTC-USD",
                "amount": 100.0,
                "frequency": "weekly",
                "start_date": "2025-01-02T03:04:05.000Z",
                "ai_enhanced": true,
            })
        );
    }

    #[test]
    fn saved_strategy_accepts_mixed_timestamp_styles() {
        let raw = json!({
            "id": "strategy_1",
            "created_at": "2025-01-02T10:00:00.250000",
            "strategy": {
                "asset": "ETH-USD",
                "amount": 50.0,
                "frequency": "monthly",
                "start_date": "2025-01-02T09:59:59+00:00",
                "end_date": null,
                "ai_enhanced": false
            },
            "recommendation": {
                "asset": "ETH-USD",
                "optimal_entry_price": 3100.5,
                "sentiment": "neutral",
                "confidence": 0.5,
                "next_dca_date": "2025-02-01T10:00:00.250000",
                "suggested_amount": 42.0,
                "market_conditions": ["price above 50-day average"]
            }
        });

        let saved: SavedStrategy = serde_json::from_value(raw).unwrap();

        assert_eq!(saved.id, "strategy_1");
        assert_eq!(saved.strategy.frequency, DcaFrequency::Monthly);
        assert_eq!(saved.strategy.end_date, None);
        assert_eq!(
            saved.recommendation.next_dca_date,
            Utc.with_ymd_and_hms(2025, 2, 1, 10, 0, 0).unwrap()
                + chrono::Duration::milliseconds(250)
        );
    }

    #[test]
    fn chart_range_serializes_to_query_tokens() {
        for range in ChartRange::ALL {
            assert_eq!(
                serde_json::to_value(range).unwrap(),
                json!(range.as_query())
            );
        }
    }

    #[test]
    fn frequency_tokens_round_trip_through_from_token() {
        assert_eq!(DcaFrequency::from_token("daily"), Some(DcaFrequency::Daily));
        assert_eq!(DcaFrequency::from_token("yearly"), None);
        assert_eq!(DcaFrequency::Monthly.interval_days(), 30);
    }
}
