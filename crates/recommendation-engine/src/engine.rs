use analysis_core::{
    sorted_by_date, AnalysisError, FundamentalSnapshot, IndicatorSnapshot, PriceBar, Recommendation,
    RecommendationReport,
};
use chrono::{DateTime, Utc};
use technical_analysis::{
    atr, atr_is_degraded, price_summary, rsi, rsi_is_degraded, trailing_window, ATR_PERIOD,
    RSI_PERIOD,
};

use crate::levels::price_levels;
use crate::rules::RuleInputs;
use crate::score_card::score;

/// Bars fed to the RSI and ATR: 14 deltas plus the bar they start from
pub const INDICATOR_WINDOW: usize = 15;

pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Score the series and fundamentals into a recommendation.
    ///
    /// Bars may arrive in any order. Short histories degrade to the default
    /// indicator readings; only an empty series is rejected.
    pub fn evaluate(
        &self,
        series: &[PriceBar],
        fundamentals: &FundamentalSnapshot,
    ) -> Result<Recommendation, AnalysisError> {
        let sorted = sorted_by_date(series);
        let indicators = self.indicators(&sorted)?;
        Ok(self.recommend(&indicators, fundamentals))
    }

    /// [`evaluate`](Self::evaluate) plus the indicator readings and price
    /// summary, stamped with the caller's reference time.
    pub fn evaluate_at(
        &self,
        symbol: &str,
        series: &[PriceBar],
        fundamentals: &FundamentalSnapshot,
        as_of: DateTime<Utc>,
    ) -> Result<RecommendationReport, AnalysisError> {
        let sorted = sorted_by_date(series);
        let indicators = self.indicators(&sorted)?;
        let price_summary = price_summary(&sorted)
            .ok_or_else(|| AnalysisError::InsufficientData("Empty price series".to_string()))?;
        let recommendation = self.recommend(&indicators, fundamentals);

        if indicators.rsi_degraded || indicators.atr_degraded {
            tracing::warn!(
                symbol,
                bars = sorted.len(),
                "Short price history, indicators fall back to defaults"
            );
        }

        Ok(RecommendationReport {
            symbol: symbol.to_string(),
            last_updated: as_of,
            indicators,
            price_summary,
            recommendation,
        })
    }

    fn indicators(&self, sorted: &[PriceBar]) -> Result<IndicatorSnapshot, AnalysisError> {
        let latest = sorted.last().ok_or_else(|| {
            AnalysisError::InsufficientData("Need at least one bar for a recommendation".to_string())
        })?;

        let window = trailing_window(sorted, INDICATOR_WINDOW);
        let closes: Vec<f64> = window.iter().map(|b| b.close).collect();

        Ok(IndicatorSnapshot {
            latest_price: latest.close,
            rsi: rsi(&closes, RSI_PERIOD),
            atr: atr(window, ATR_PERIOD),
            rsi_degraded: rsi_is_degraded(closes.len(), RSI_PERIOD),
            atr_degraded: atr_is_degraded(window.len(), ATR_PERIOD),
        })
    }

    fn recommend(&self, indicators: &IndicatorSnapshot, fundamentals: &FundamentalSnapshot) -> Recommendation {
        let card = score(&RuleInputs {
            rsi: indicators.rsi,
            fundamentals,
        });
        let category = card.category();
        let levels = price_levels(indicators.latest_price, indicators.atr, category.direction());

        tracing::debug!(
            score = card.score,
            category = category.to_label(),
            rsi = indicators.rsi,
            atr = indicators.atr,
            "recommendation scored"
        );

        Recommendation {
            category,
            entry_price: levels.entry_price,
            stop_loss: levels.stop_loss,
            take_profit_1: levels.take_profit_1,
            take_profit_2: levels.take_profit_2,
            risk_reward_ratio: levels.risk_reward_ratio,
            confidence_score: card.score,
            time_frame: card.time_frame,
            strategy_label: card.strategy_label().to_string(),
            technical_narrative: card.technical_narrative(),
            fundamental_narrative: card.fundamental_narrative(),
        }
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for `RecommendationEngine::new().evaluate(..)`
pub fn evaluate(series: &[PriceBar], fundamentals: &FundamentalSnapshot) -> Result<Recommendation, AnalysisError> {
    RecommendationEngine::new().evaluate(series, fundamentals)
}
