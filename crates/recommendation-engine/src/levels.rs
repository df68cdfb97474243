use analysis_core::{round_to, TradeDirection};

pub const STOP_LOSS_ATR_MULTIPLE: f64 = 2.0;
pub const TAKE_PROFIT_1_ATR_MULTIPLE: f64 = 3.0;
pub const TAKE_PROFIT_2_ATR_MULTIPLE: f64 = 5.0;

/// Entry, stop and targets bracketed around the latest price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceLevels {
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
    pub risk_reward_ratio: Option<f64>,
}

/// Stop and targets are ATR multiples from the entry, rounded to cents.
/// The ratio uses the rounded levels and is `None` when the stop equals the entry.
pub fn price_levels(latest_price: f64, atr: f64, direction: TradeDirection) -> PriceLevels {
    let sign = direction.sign();
    let level = |multiple: f64| round_to(latest_price + sign * multiple * atr, 2);

    let entry_price = latest_price;
    let stop_loss = level(-STOP_LOSS_ATR_MULTIPLE);
    let take_profit_1 = level(TAKE_PROFIT_1_ATR_MULTIPLE);
    let take_profit_2 = level(TAKE_PROFIT_2_ATR_MULTIPLE);

    PriceLevels {
        entry_price,
        stop_loss,
        take_profit_1,
        take_profit_2,
        risk_reward_ratio: risk_reward(entry_price, stop_loss, take_profit_1),
    }
}

pub fn risk_reward(entry: f64, stop: f64, target: f64) -> Option<f64> {
    let risk = (entry - stop).abs();
    if risk == 0.0 || !risk.is_finite() {
        return None;
    }
    let reward = (target - entry).abs();
    Some(round_to(reward / risk, 1))
}
