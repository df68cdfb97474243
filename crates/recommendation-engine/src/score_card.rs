use analysis_core::{SignalStrength, TimeFrame};

use crate::rules::{Narrative, RuleInputs, RuleOutcome, RULES};

/// Running total of fired rules
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreCard {
    pub score: i32,
    pub time_frame: TimeFrame,
    pub strategy: Option<&'static str>,
    technical: Vec<&'static str>,
    fundamental: Vec<&'static str>,
}

impl ScoreCard {
    /// Fold one outcome in. A later time frame or strategy replaces an earlier one.
    pub fn apply(mut self, outcome: RuleOutcome) -> Self {
        self.score += outcome.delta;
        match outcome.narrative {
            Narrative::Technical => self.technical.push(outcome.fragment),
            Narrative::Fundamental => self.fundamental.push(outcome.fragment),
        }
        if let Some(time_frame) = outcome.time_frame {
            self.time_frame = time_frame;
        }
        if let Some(strategy) = outcome.strategy {
            self.strategy = Some(strategy);
        }
        self
    }

    pub fn category(&self) -> SignalStrength {
        SignalStrength::from_score(self.score)
    }

    /// Strategy set by a rule, else the default for the category and horizon
    pub fn strategy_label(&self) -> &'static str {
        self.strategy
            .unwrap_or_else(|| default_strategy(self.category(), self.time_frame))
    }

    pub fn technical_narrative(&self) -> String {
        self.technical.join(" ")
    }

    pub fn fundamental_narrative(&self) -> String {
        self.fundamental.join(" ")
    }
}

pub fn default_strategy(category: SignalStrength, time_frame: TimeFrame) -> &'static str {
    if category.is_buy() {
        match time_frame {
            TimeFrame::Short => "Momentum Trade",
            TimeFrame::Medium => "Swing Trade",
            TimeFrame::Long => "Value Investment",
        }
    } else if category.is_sell() {
        "Avoid or Consider Short Position"
    } else {
        "Wait for Better Entry"
    }
}

/// Run every rule in order and fold the results
pub fn score(inputs: &RuleInputs) -> ScoreCard {
    RULES
        .iter()
        .filter_map(|rule| rule(inputs))
        .inspect(|outcome| {
            tracing::debug!(rule = outcome.rule, delta = outcome.delta, "rule fired");
        })
        .fold(ScoreCard::default(), ScoreCard::apply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::FundamentalSnapshot;

    fn snapshot(ma50: f64, ma200: f64, pe: Option<f64>, spf: Option<f64>) -> FundamentalSnapshot {
        FundamentalSnapshot {
            fifty_day_moving_average: Some(ma50),
            two_hundred_day_moving_average: Some(ma200),
            price_to_earnings: pe,
            short_percent_of_float: spf,
        }
    }

    #[test]
    fn test_all_bullish_rules() {
        let f = snapshot(110.0, 100.0, Some(12.0), Some(25.0));
        let card = score(&RuleInputs { rsi: 25.0, fundamentals: &f });

        assert_eq!(card.score, 60);
        assert_eq!(card.category(), SignalStrength::StrongBuy);
        assert_eq!(card.time_frame, TimeFrame::Short);
        assert_eq!(card.strategy_label(), "Short Squeeze Potential");
        assert_eq!(
            card.technical_narrative(),
            "Golden Cross (50 MA above 200 MA). Oversold (RSI below 30)."
        );
        assert_eq!(
            card.fundamental_narrative(),
            "P/E ratio below industry average. High short interest (potential for short squeeze)."
        );
    }

    #[test]
    fn test_later_rule_wins_time_frame() {
        // Oversold sets Short, then the cheap P/E sets Long
        let f = snapshot(90.0, 100.0, Some(12.0), Some(2.0));
        let card = score(&RuleInputs { rsi: 20.0, fundamentals: &f });

        assert_eq!(card.score, -20 + 15 + 10 + 5);
        assert_eq!(card.category(), SignalStrength::Buy);
        assert_eq!(card.time_frame, TimeFrame::Long);
        assert_eq!(card.strategy_label(), "Value Investment");
    }

    #[test]
    fn test_default_strategies() {
        let f = snapshot(110.0, 100.0, None, None);

        let momentum = score(&RuleInputs { rsi: 20.0, fundamentals: &f });
        assert_eq!(momentum.strategy_label(), "Momentum Trade");

        let swing = score(&RuleInputs { rsi: 50.0, fundamentals: &f });
        assert_eq!(swing.category(), SignalStrength::Buy);
        assert_eq!(swing.strategy_label(), "Swing Trade");

        let hold = score(&RuleInputs { rsi: 80.0, fundamentals: &f });
        assert_eq!(hold.score, 5);
        assert_eq!(hold.category(), SignalStrength::Hold);
        assert_eq!(hold.strategy_label(), "Wait for Better Entry");
    }

    #[test]
    fn test_absent_fundamentals_only_technical_rules() {
        let f = FundamentalSnapshot::default();
        let card = score(&RuleInputs { rsi: 80.0, fundamentals: &f });

        assert_eq!(card.score, -35);
        assert_eq!(card.category(), SignalStrength::StrongSell);
        assert_eq!(card.time_frame, TimeFrame::Medium);
        assert_eq!(card.strategy_label(), "Avoid or Consider Short Position");
        assert_eq!(card.fundamental_narrative(), "");
    }
}
