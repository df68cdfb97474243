use analysis_core::{PriceBar, PriceSummary};

pub const RSI_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;

/// Reading returned when the RSI window is too short
pub const NEUTRAL_RSI: f64 = 50.0;
/// Reading returned when the ATR window is too short
pub const DEFAULT_ATR: f64 = 1.0;

/// Last `len` items of a chronologically ordered slice (all of it if shorter).
pub fn trailing_window<T>(items: &[T], len: usize) -> &[T] {
    &items[items.len().saturating_sub(len)..]
}

/// Relative Strength Index over the whole slice.
///
/// Gains and losses are plain sums across the window, not Wilder-smoothed.
/// Fewer than `period` closes yields [`NEUTRAL_RSI`]; a window without any
/// losses yields 100.
pub fn rsi(closes: &[f64], period: usize) -> f64 {
    if rsi_is_degraded(closes.len(), period) {
        return NEUTRAL_RSI;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;

    for w in closes.windows(2) {
        let change = w[1] - w[0];
        if change >= 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }

    if losses == 0.0 {
        return 100.0;
    }

    let rs = gains / losses;
    100.0 - 100.0 / (1.0 + rs)
}

pub fn rsi_is_degraded(len: usize, period: usize) -> bool {
    len < period
}

/// True range of `bar` against the previous close
pub fn true_range(bar: &PriceBar, prev_close: f64) -> f64 {
    let high_low = bar.high - bar.low;
    let high_close = (bar.high - prev_close).abs();
    let low_close = (bar.low - prev_close).abs();
    high_low.max(high_close).max(low_close)
}

/// Average True Range over the whole slice.
///
/// Cumulative running mean: `atr_i = (atr_{i-1} * (i - 1) + tr_i) / i`.
/// Fewer than `period` bars yields [`DEFAULT_ATR`].
pub fn atr(bars: &[PriceBar], period: usize) -> f64 {
    if atr_is_degraded(bars.len(), period) {
        return DEFAULT_ATR;
    }

    let mut atr = 0.0;
    for i in 1..bars.len() {
        let tr = true_range(&bars[i], bars[i - 1].close);
        atr = (atr * (i - 1) as f64 + tr) / i as f64;
    }

    atr
}

pub fn atr_is_degraded(len: usize, period: usize) -> bool {
    len < period
}

/// Latest price and day-over-day move of an ascending series
pub fn price_summary(bars: &[PriceBar]) -> Option<PriceSummary> {
    let latest = bars.last()?;
    let previous_close = bars.len().checked_sub(2).map(|i| bars[i].close);

    let (change, change_percent) = match previous_close {
        Some(prev) if prev != 0.0 => {
            let change = latest.close - prev;
            (Some(change), Some(change / prev * 100.0))
        }
        _ => (None, None),
    };

    Some(PriceSummary {
        current_price: latest.close,
        previous_close,
        change,
        change_percent,
        day_high: latest.high,
        day_low: latest.low,
    })
}
