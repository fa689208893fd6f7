//! Form model and display formatting for the strategy panel.

use chrono::{DateTime, Utc};
use market_api::{Asset, DcaFrequency, DcaStrategy};
use thiserror::Error;

/// Smallest accepted contribution per period, in USD.
pub const MIN_AMOUNT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Reasons the form cannot be submitted.
pub enum FormError {
    /// No asset has been selected yet (asset list still loading or empty).
    #[error("Select an asset first")]
    MissingAsset,
    /// The amount field is not a finite number.
    #[error("Amount must be a number")]
    InvalidAmount,
    /// The amount is below [`MIN_AMOUNT`].
    #[error("Amount must be at least $1")]
    AmountTooSmall,
}

#[derive(Debug, Clone, PartialEq)]
/// Raw form state as edited by the user.
pub struct StrategyForm {
    /// Selected asset symbol; empty until the asset list arrives.
    pub asset: String,
    /// Amount input text.
    pub amount: String,
    /// Contribution cadence.
    pub frequency: DcaFrequency,
    /// Whether the service should apply its enhanced analysis.
    pub ai_enhanced: bool,
}

impl Default for StrategyForm {
    fn default() -> Self {
        Self {
            asset: String::new(),
            amount: "100".to_string(),
            frequency: DcaFrequency::Monthly,
            ai_enhanced: true,
        }
    }
}

impl StrategyForm {
    /// Selects the first asset unless the current selection is still listed.
    pub fn preselect(&mut self, assets: &[Asset]) {
        if assets.iter().any(|asset| asset.symbol == self.asset) {
            return;
        }
        self.asset = assets
            .first()
            .map(|asset| asset.symbol.clone())
            .unwrap_or_default();
    }

    /// Parses and validates the amount field.
    pub fn parsed_amount(&self) -> Result<f64, FormError> {
        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .map_err(|_| FormError::InvalidAmount)?;
        if !amount.is_finite() {
            return Err(FormError::InvalidAmount);
        }
        if amount < MIN_AMOUNT {
            return Err(FormError::AmountTooSmall);
        }
        Ok(amount)
    }

    /// Builds the request payload starting at `start_date`, open-ended.
    pub fn to_strategy(&self, start_date: DateTime<Utc>) -> Result<DcaStrategy, FormError> {
        if self.asset.trim().is_empty() {
            return Err(FormError::MissingAsset);
        }
        Ok(DcaStrategy {
            asset: self.asset.clone(),
            amount: self.parsed_amount()?,
            frequency: self.frequency,
            start_date,
            end_date: None,
            ai_enhanced: self.ai_enhanced,
        })
    }
}

/// Formats `value` as dollars with two decimals.
pub fn format_usd(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${value:.2}")
    }
}

/// Formats a `0.0..=1.0` confidence as a percentage with one decimal.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

/// Formats a recommendation or history date.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn asset(symbol: &str) -> Asset {
        Asset {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            current_price: 1.0,
            change_24h: 0.0,
            volume_24h: 0.0,
        }
    }

    #[test]
    fn preselect_picks_first_asset_and_keeps_valid_choice() {
        let mut form = StrategyForm::default();
        form.preselect(&[asset("BTC-USD"), asset("ETH-USD")]);
        assert_eq!(form.asset, "BTC-USD");

        form.asset = "ETH-USD".to_string();
        form.preselect(&[asset("BTC-USD"), asset("ETH-USD")]);
        assert_eq!(form.asset, "ETH-USD");

        form.preselect(&[]);
        assert_eq!(form.asset, "");
    }

    #[test]
    fn amount_must_be_a_number_of_at_least_one_dollar() {
        let mut form = StrategyForm::default();
        assert_eq!(form.parsed_amount(), Ok(100.0));

        form.amount = " 1 ".to_string();
        assert_eq!(form.parsed_amount(), Ok(1.0));

        form.amount = "0.99".to_string();
        assert_eq!(form.parsed_amount(), Err(FormError::AmountTooSmall));

        form.amount = "abc".to_string();
        assert_eq!(form.parsed_amount(), Err(FormError::InvalidAmount));

        form.amount = "inf".to_string();
        assert_eq!(form.parsed_amount(), Err(FormError::InvalidAmount));
    }

    #[test]
    fn strategy_payload_requires_asset_and_is_open_ended() {
        let start = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
        let mut form = StrategyForm::default();
        assert_eq!(form.to_strategy(start), Err(FormError::MissingAsset));

        form.asset = "SOL-USD".to_string();
        form.frequency = DcaFrequency::Weekly;
        form.ai_enhanced = false;
        let strategy = form.to_strategy(start).unwrap();
        assert_eq!(strategy.asset, "SOL-USD");
        assert_eq!(strategy.amount, 100.0);
        assert_eq!(strategy.frequency, DcaFrequency::Weekly);
        assert_eq!(strategy.start_date, start);
        assert_eq!(strategy.end_date, None);
        assert!(!strategy.ai_enhanced);
    }

    #[test]
    fn display_formatting() {
        assert_eq!(format_usd(64000.456), "$64000.46");
        assert_eq!(format_usd(-3.5), "-$3.50");
        assert_eq!(format_confidence(0.8234), "82.3%");
        assert_eq!(
            format_date(Utc.with_ymd_and_hms(2025, 2, 3, 0, 0, 0).unwrap()),
            "Feb 3, 2025"
        );
    }
}
