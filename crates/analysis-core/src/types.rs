use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Daily OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Copy of `bars` in ascending date order. Upstream order is not trusted.
pub fn sorted_by_date(bars: &[PriceBar]) -> Vec<PriceBar> {
    let mut sorted = bars.to_vec();
    sorted.sort_by_key(|b| b.date);
    sorted
}

/// Point-in-time fundamentals. `None` means the provider value was missing
/// or unparsable, never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundamentalSnapshot {
    pub fifty_day_moving_average: Option<f64>,
    pub two_hundred_day_moving_average: Option<f64>,
    pub price_to_earnings: Option<f64>,
    pub short_percent_of_float: Option<f64>,
}

/// Short interest figures as reported by the provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortInterest {
    pub short_percent_float: Option<f64>,
    pub short_percent_outstanding: Option<f64>,
    /// Days to cover
    pub short_ratio: Option<f64>,
    pub shares_short: Option<i64>,
    pub shares_short_prior_month: Option<i64>,
}

impl ShortInterest {
    /// Month-over-month change in shares sold short
    pub fn change(&self) -> Option<i64> {
        Some(self.shares_short? - self.shares_short_prior_month?)
    }

    pub fn change_percent(&self) -> Option<f64> {
        let prior = self.shares_short_prior_month?;
        if prior == 0 {
            return None;
        }
        Some(self.change()? as f64 / prior as f64 * 100.0)
    }
}

/// Latest price and day-over-day move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    pub current_price: f64,
    pub previous_close: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub day_high: f64,
    pub day_low: f64,
}

/// Recommendation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalStrength {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl SignalStrength {
    /// Bands are inclusive on their lower bound.
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 30 => SignalStrength::StrongBuy,
            s if s >= 10 => SignalStrength::Buy,
            s if s >= -10 => SignalStrength::Hold,
            s if s >= -30 => SignalStrength::Sell,
            _ => SignalStrength::StrongSell,
        }
    }

    /// Human-readable label for the signal
    pub fn to_label(&self) -> &'static str {
        match self {
            SignalStrength::StrongBuy => "Strong Buy",
            SignalStrength::Buy => "Buy",
            SignalStrength::Hold => "Hold",
            SignalStrength::Sell => "Sell",
            SignalStrength::StrongSell => "Strong Sell",
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, SignalStrength::StrongBuy | SignalStrength::Buy)
    }

    pub fn is_sell(&self) -> bool {
        matches!(self, SignalStrength::Sell | SignalStrength::StrongSell)
    }

    /// Buy-family trades long; everything else, Hold included, brackets short.
    pub fn direction(&self) -> TradeDirection {
        if self.is_buy() {
            TradeDirection::Long
        } else {
            TradeDirection::Short
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    Long,
    Short,
}

impl TradeDirection {
    /// +1 for long, -1 for short
    pub fn sign(&self) -> f64 {
        match self {
            TradeDirection::Long => 1.0,
            TradeDirection::Short => -1.0,
        }
    }
}

/// Holding horizon
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFrame {
    Short,
    #[default]
    Medium,
    Long,
}

impl TimeFrame {
    pub fn to_label(&self) -> &'static str {
        match self {
            TimeFrame::Short => "Short-term",
            TimeFrame::Medium => "Medium-term",
            TimeFrame::Long => "Long-term",
        }
    }
}

/// Trading recommendation with bracketed price levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub category: SignalStrength,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
    /// `None` when entry and stop coincide (zero risk)
    pub risk_reward_ratio: Option<f64>,
    pub confidence_score: i32,
    pub time_frame: TimeFrame,
    pub strategy_label: String,
    pub technical_narrative: String,
    pub fundamental_narrative: String,
}

/// Indicator readings behind a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub latest_price: f64,
    pub rsi: f64,
    pub atr: f64,
    /// True when the RSI is the neutral default for a short window
    pub rsi_degraded: bool,
    /// True when the ATR is the unit default for a short window
    pub atr_degraded: bool,
}

/// Recommendation plus the context it was computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationReport {
    pub symbol: String,
    pub last_updated: DateTime<Utc>,
    pub indicators: IndicatorSnapshot,
    pub price_summary: PriceSummary,
    pub recommendation: Recommendation,
}
