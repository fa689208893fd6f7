//! SVG geometry for the price chart.

use market_api::ChartPoint;

/// Chart viewbox width.
pub const CHART_WIDTH: f64 = 560.0;
/// Chart viewbox height.
pub const CHART_HEIGHT: f64 = 240.0;
const PADDING: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
/// Value range covered by the vertical axis.
pub struct PriceBounds {
    /// Lowest plotted value.
    pub min: f64,
    /// Highest plotted value.
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Plotted series.
pub enum Series {
    /// Close price.
    Price,
    /// 50-period moving average.
    Sma50,
    /// 200-period moving average.
    Sma200,
}

impl Series {
    /// Every series, back to front.
    pub const ALL: [Series; 3] = [Self::Sma200, Self::Sma50, Self::Price];

    fn value(self, point: &ChartPoint) -> f64 {
        match self {
            Self::Price => point.price,
            Self::Sma50 => point.sma50,
            Self::Sma200 => point.sma200,
        }
    }

    /// Legend label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Price => "Price",
            Self::Sma50 => "50 SMA",
            Self::Sma200 => "200 SMA",
        }
    }

    /// Stroke color.
    pub const fn stroke(self) -> &'static str {
        match self {
            Self::Price => "#000000",
            Self::Sma50 => "#2563eb",
            Self::Sma200 => "#dc2626",
        }
    }
}

/// Returns the bounds of every plottable value, ignoring moving averages that are not yet defined.
pub fn price_bounds(points: &[ChartPoint]) -> Option<PriceBounds> {
    let mut values = points
        .iter()
        .flat_map(|point| Series::ALL.map(|series| series.value(point)))
        .filter(|value| value.is_finite() && *value > 0.0);
    let first = values.next()?;
    let (min, max) = values.fold((first, first), |(min, max), v| (min.min(v), max.max(v)));
    Some(PriceBounds { min, max })
}

/// Builds the `points` attribute of an SVG polyline for `series`.
///
/// Samples where the series is `0` (not enough history) are skipped; x positions stay tied to the
/// sample index so every series shares the same time axis.
pub fn polyline(points: &[ChartPoint], series: Series, bounds: PriceBounds) -> String {
    let steps = points.len().saturating_sub(1).max(1) as f64;
    let plot_width = CHART_WIDTH - 2.0 * PADDING;
    let plot_height = CHART_HEIGHT - 2.0 * PADDING;
    let span = bounds.max - bounds.min;

    points
        .iter()
        .enumerate()
        .filter_map(|(idx, point)| {
            let value = series.value(point);
            if !value.is_finite() || value <= 0.0 {
                return None;
            }
            let x = PADDING + plot_width * idx as f64 / steps;
            let y = if span > 0.0 {
                PADDING + plot_height * (bounds.max - value) / span
            } else {
                PADDING + plot_height / 2.0
            };
            Some(format!("{x:.1},{y:.1}"))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats a 24h change with an explicit sign.
pub fn format_change(change: f64) -> String {
    if change > 0.0 {
        format!("+{change:.2}%")
    } else {
        format!("{change:.2}%")
    }
}

/// Window title for the selected symbol.
pub fn window_title(symbol: Option<&str>) -> String {
    match symbol {
        Some(symbol) if !symbol.is_empty() => format!("Market Chart - {symbol}"),
        _ => "Market Chart".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn point(price: f64, sma50: f64, sma200: f64) -> ChartPoint {
        ChartPoint {
            date: "2025-01-01".to_string(),
            price,
            sma50,
            sma200,
        }
    }

    #[test]
    fn bounds_ignore_undefined_moving_averages() {
        let points = vec![point(100.0, 0.0, 0.0), point(120.0, 110.0, 0.0)];
        assert_eq!(
            price_bounds(&points),
            Some(PriceBounds {
                min: 100.0,
                max: 120.0
            })
        );
        assert_eq!(price_bounds(&[]), None);
    }

    #[test]
    fn polyline_spans_the_plot_and_inverts_y() {
        let points = vec![point(100.0, 0.0, 0.0), point(200.0, 0.0, 0.0)];
        let bounds = price_bounds(&points).unwrap();
        assert_eq!(
            polyline(&points, Series::Price, bounds),
            "8.0,232.0 552.0,8.0"
        );
    }

    #[test]
    fn polyline_skips_zero_samples_but_keeps_time_axis() {
        let points = vec![
            point(100.0, 0.0, 0.0),
            point(150.0, 0.0, 0.0),
            point(200.0, 150.0, 0.0),
        ];
        let bounds = price_bounds(&points).unwrap();
        assert_eq!(polyline(&points, Series::Sma50, bounds), "552.0,120.0");
        assert_eq!(polyline(&points, Series::Sma200, bounds), "");
    }

    #[test]
    fn flat_series_is_centered() {
        let points = vec![point(5.0, 0.0, 0.0)];
        let bounds = price_bounds(&points).unwrap();
        assert_eq!(polyline(&points, Series::Price, bounds), "8.0,120.0");
    }

    #[test]
    fn change_and_title_formatting() {
        assert_eq!(format_change(1.234), "+1.23%");
        assert_eq!(format_change(-0.5), "-0.50%");
        assert_eq!(format_change(0.0), "0.00%");
        assert_eq!(window_title(Some("ETH-USD")), "Market Chart - ETH-USD");
        assert_eq!(window_title(None), "Market Chart");
    }
}
