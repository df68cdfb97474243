//! Option chain records
//!
//! Provider values that could not be parsed are `None`; they are never
//! replaced by zero.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    Call,
    Put,
}

impl ContractType {
    /// Letter used in contract names
    pub fn code(&self) -> char {
        match self {
            ContractType::Call => 'C',
            ContractType::Put => 'P',
        }
    }
}

/// A single option contract as supplied by the chain provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionContract {
    pub strike: Option<f64>,
    pub contract_type: ContractType,
    pub expiration_date: NaiveDate,
    pub last_price: Option<f64>,
    pub change: Option<f64>,
    pub percent_change: Option<f64>,
    pub volume: Option<i64>,
    pub open_interest: Option<i64>,
    pub implied_volatility: Option<f64>,
    pub in_the_money: bool,
}

impl OptionContract {
    /// e.g. `AAPL 2024-12-20 C180.00`
    pub fn contract_name(&self, symbol: &str) -> String {
        let strike = self
            .strike
            .map(|s| format!("{:.2}", s))
            .unwrap_or_else(|| "?".to_string());
        format!("{} {} {}{}", symbol, self.expiration_date, self.contract_type.code(), strike)
    }

    /// Volume over open interest, when both are present and positive
    pub fn volume_to_open_interest(&self) -> Option<f64> {
        match (self.volume, self.open_interest) {
            (Some(volume), Some(oi)) if volume > 0 && oi > 0 => Some(volume as f64 / oi as f64),
            _ => None,
        }
    }
}

/// Calls and puts sharing one expiration date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpirationGroup {
    pub expiration_date: NaiveDate,
    pub calls: Vec<OptionContract>,
    pub puts: Vec<OptionContract>,
}

/// Full chain for one underlying
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionChain {
    pub symbol: String,
    /// Provider timestamp, if it sent one
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    pub expirations: Vec<ExpirationGroup>,
}

/// Contract with the classifier's derived annotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedContract {
    #[serde(flatten)]
    pub contract: OptionContract,
    pub contract_name: String,
    /// Negative once the contract has expired
    pub days_to_expiration: i64,
    pub volume_to_open_interest_ratio: Option<f64>,
    pub is_unusual: bool,
    pub unusual_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedChain {
    pub symbol: String,
    pub last_updated: DateTime<Utc>,
    pub calls: Vec<ClassifiedContract>,
    pub puts: Vec<ClassifiedContract>,
    /// Flagged calls and puts, highest ratio first
    pub unusual_activity: Vec<ClassifiedContract>,
}
