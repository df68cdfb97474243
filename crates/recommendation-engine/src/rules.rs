//! Scoring rules.
//!
//! Each rule is a pure function of the indicator readings and fundamentals.
//! [`RULES`] fixes the evaluation order; the score does not depend on it, but
//! narrative order and the winning time frame do.

use analysis_core::{FundamentalSnapshot, TimeFrame};

/// Everything a rule may look at
#[derive(Debug, Clone, Copy)]
pub struct RuleInputs<'a> {
    pub rsi: f64,
    pub fundamentals: &'a FundamentalSnapshot,
}

/// Which narrative a rule writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Narrative {
    Technical,
    Fundamental,
}

/// Effect of one rule firing
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub rule: &'static str,
    pub delta: i32,
    pub narrative: Narrative,
    pub fragment: &'static str,
    pub time_frame: Option<TimeFrame>,
    pub strategy: Option<&'static str>,
}

impl RuleOutcome {
    fn technical(rule: &'static str, delta: i32, fragment: &'static str) -> Self {
        Self {
            rule,
            delta,
            narrative: Narrative::Technical,
            fragment,
            time_frame: None,
            strategy: None,
        }
    }

    fn fundamental(rule: &'static str, delta: i32, fragment: &'static str) -> Self {
        Self {
            narrative: Narrative::Fundamental,
            ..Self::technical(rule, delta, fragment)
        }
    }

    fn with_time_frame(mut self, time_frame: TimeFrame) -> Self {
        self.time_frame = Some(time_frame);
        self
    }

    fn with_strategy(mut self, strategy: &'static str) -> Self {
        self.strategy = Some(strategy);
        self
    }
}

pub type Rule = fn(&RuleInputs) -> Option<RuleOutcome>;

pub const SHORT_SQUEEZE_STRATEGY: &str = "Short Squeeze Potential";

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const PE_CHEAP: f64 = 15.0;
pub const PE_EXPENSIVE: f64 = 30.0;
pub const SHORT_FLOAT_HIGH: f64 = 20.0;
pub const SHORT_FLOAT_LOW: f64 = 5.0;

/// Rules in evaluation order
pub const RULES: &[Rule] = &[moving_average_cross, rsi_extremes, pe_ratio, short_interest];

/// Golden/death cross of the 50- and 200-day averages.
/// A missing average counts as "not above".
pub fn moving_average_cross(inputs: &RuleInputs) -> Option<RuleOutcome> {
    let f = inputs.fundamentals;
    let golden = matches!(
        (f.fifty_day_moving_average, f.two_hundred_day_moving_average),
        (Some(ma50), Some(ma200)) if ma50 > ma200
    );

    if golden {
        Some(
            RuleOutcome::technical("moving_average_cross", 20, "Golden Cross (50 MA above 200 MA).")
                .with_time_frame(TimeFrame::Medium),
        )
    } else {
        Some(RuleOutcome::technical(
            "moving_average_cross",
            -20,
            "Death Cross (50 MA below 200 MA).",
        ))
    }
}

pub fn rsi_extremes(inputs: &RuleInputs) -> Option<RuleOutcome> {
    if inputs.rsi < RSI_OVERSOLD {
        Some(
            RuleOutcome::technical("rsi", 15, "Oversold (RSI below 30).")
                .with_time_frame(TimeFrame::Short),
        )
    } else if inputs.rsi > RSI_OVERBOUGHT {
        Some(RuleOutcome::technical("rsi", -15, "Overbought (RSI above 70)."))
    } else {
        None
    }
}

pub fn pe_ratio(inputs: &RuleInputs) -> Option<RuleOutcome> {
    let pe = inputs.fundamentals.price_to_earnings?;
    if pe < PE_CHEAP {
        Some(
            RuleOutcome::fundamental("pe_ratio", 10, "P/E ratio below industry average.")
                .with_time_frame(TimeFrame::Long),
        )
    } else if pe > PE_EXPENSIVE {
        Some(RuleOutcome::fundamental("pe_ratio", -10, "P/E ratio above industry average."))
    } else {
        None
    }
}

pub fn short_interest(inputs: &RuleInputs) -> Option<RuleOutcome> {
    let short_float = inputs.fundamentals.short_percent_of_float?;
    if short_float > SHORT_FLOAT_HIGH {
        Some(
            RuleOutcome::fundamental(
                "short_interest",
                15,
                "High short interest (potential for short squeeze).",
            )
            .with_time_frame(TimeFrame::Short)
            .with_strategy(SHORT_SQUEEZE_STRATEGY),
        )
    } else if short_float < SHORT_FLOAT_LOW {
        Some(RuleOutcome::fundamental("short_interest", 5, "Low short interest."))
    } else {
        None
    }
}
