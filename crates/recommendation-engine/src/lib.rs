pub mod engine;
pub mod levels;
pub mod rules;
pub mod score_card;


pub use engine::{evaluate, RecommendationEngine, INDICATOR_WINDOW};
pub use levels::{price_levels, risk_reward, PriceLevels};
pub use rules::{Narrative, Rule, RuleInputs, RuleOutcome, RULES};
pub use score_card::{default_strategy, score, ScoreCard};
