use analysis_core::AnalysisError;
use chrono::{DateTime, NaiveDate, Utc};
use options_flow::{ContractType, ExpirationGroup, OptionChain, OptionContract};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::{flag, integer, number};

/// One contract as the provider sends it; every field may be text or a number
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractPayload {
    #[serde(default)]
    pub strike_price: Option<Value>,
    #[serde(default)]
    pub last_price: Option<Value>,
    #[serde(default)]
    pub change: Option<Value>,
    #[serde(default)]
    pub percent_change: Option<Value>,
    #[serde(default)]
    pub volume: Option<Value>,
    #[serde(default)]
    pub open_interest: Option<Value>,
    #[serde(default)]
    pub implied_volatility: Option<Value>,
    #[serde(default)]
    pub in_the_money: Option<Value>,
}

impl ContractPayload {
    fn to_contract(&self, contract_type: ContractType, expiration_date: NaiveDate) -> OptionContract {
        OptionContract {
            strike: number(self.strike_price.as_ref()),
            contract_type,
            expiration_date,
            last_price: number(self.last_price.as_ref()),
            change: number(self.change.as_ref()),
            percent_change: number(self.percent_change.as_ref()),
            volume: integer(self.volume.as_ref()),
            open_interest: integer(self.open_interest.as_ref()),
            implied_volatility: number(self.implied_volatility.as_ref()),
            in_the_money: flag(self.in_the_money.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpirationPayload {
    pub expiration_date: String,
    #[serde(default)]
    pub calls: Vec<ContractPayload>,
    #[serde(default)]
    pub puts: Vec<ContractPayload>,
}

/// OPTION_CHAIN response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionChainPayload {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub options: Vec<ExpirationPayload>,
}

impl OptionChainPayload {
    pub fn parse(body: &str) -> Result<Self, AnalysisError> {
        serde_json::from_str(body).map_err(|e| AnalysisError::ParseError(e.to_string()))
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Typed chain for `symbol`. Provider order is preserved; an expiration
    /// with an unparsable date is dropped with its contracts.
    pub fn into_chain(self, symbol: &str) -> Result<OptionChain, AnalysisError> {
        if self.options.is_empty() {
            return Err(AnalysisError::InvalidData(
                "Options data not found or API limit reached".to_string(),
            ));
        }

        let last_updated = self.last_updated.as_deref().and_then(|raw| {
            DateTime::parse_from_rfc3339(raw.trim())
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| tracing::warn!(%raw, error = %e, "ignoring unparsable lastUpdated"))
                .ok()
        });

        let mut expirations = Vec::with_capacity(self.options.len());
        for group in &self.options {
            let Ok(date) = NaiveDate::parse_from_str(group.expiration_date.trim(), "%Y-%m-%d") else {
                tracing::warn!(
                    symbol,
                    expiration = %group.expiration_date,
                    "skipping expiration with unparsable date"
                );
                continue;
            };
            expirations.push(ExpirationGroup {
                expiration_date: date,
                calls: group.calls.iter().map(|c| c.to_contract(ContractType::Call, date)).collect(),
                puts: group.puts.iter().map(|p| p.to_contract(ContractType::Put, date)).collect(),
            });
        }

        Ok(OptionChain {
            symbol: symbol.to_string(),
            last_updated,
            expirations,
        })
    }
}
