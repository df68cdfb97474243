//! Cross-symbol unusual options screener
//!
//! Pools the flagged contracts of several classified chains into one ranked list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::contracts::{ClassifiedChain, ClassifiedContract, ContractType};

/// One screener row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnusualOption {
    pub symbol: String,
    pub contract_name: String,
    pub contract_type: ContractType,
    pub strike: Option<f64>,
    pub expiration_date: NaiveDate,
    pub last_price: Option<f64>,
    pub change: Option<f64>,
    pub percent_change: Option<f64>,
    pub volume: Option<i64>,
    pub open_interest: Option<i64>,
    pub volume_to_open_interest_ratio: f64,
}

impl UnusualOption {
    fn from_classified(symbol: &str, classified: &ClassifiedContract) -> Option<Self> {
        let ratio = classified.volume_to_open_interest_ratio.filter(|_| classified.is_unusual)?;
        let c = &classified.contract;
        Some(Self {
            symbol: symbol.to_string(),
            contract_name: classified.contract_name.clone(),
            contract_type: c.contract_type,
            strike: c.strike,
            expiration_date: c.expiration_date,
            last_price: c.last_price,
            change: c.change,
            percent_change: c.percent_change,
            volume: c.volume,
            open_interest: c.open_interest,
            volume_to_open_interest_ratio: ratio,
        })
    }
}

/// Most unusual first; equal ratios keep chain order. `limit` caps the row count.
pub fn screen_unusual(chains: &[ClassifiedChain], limit: Option<usize>) -> Vec<UnusualOption> {
    let mut rows: Vec<UnusualOption> = chains
        .iter()
        .flat_map(|chain| {
            chain
                .unusual_activity
                .iter()
                .filter_map(move |c| UnusualOption::from_classified(&chain.symbol, c))
        })
        .collect();

    rows.sort_by(|a, b| {
        b.volume_to_open_interest_ratio
            .partial_cmp(&a.volume_to_open_interest_ratio)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(limit) = limit {
        rows.truncate(limit);
    }

    tracing::debug!(chains = chains.len(), rows = rows.len(), "unusual options screened");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::contracts::{ExpirationGroup, OptionChain, OptionContract};
    use chrono::{TimeZone, Utc};

    fn chain(symbol: &str, flows: &[(ContractType, f64, i64, i64)]) -> ClassifiedChain {
        let exp = NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();
        let contract = |&(kind, strike, volume, oi): &(ContractType, f64, i64, i64)| OptionContract {
            strike: Some(strike),
            contract_type: kind,
            expiration_date: exp,
            last_price: Some(2.0),
            change: Some(0.5),
            percent_change: Some(33.3),
            volume: Some(volume),
            open_interest: Some(oi),
            implied_volatility: None,
            in_the_money: false,
        };
        let raw = OptionChain {
            symbol: symbol.to_string(),
            last_updated: None,
            expirations: vec![ExpirationGroup {
                expiration_date: exp,
                calls: flows.iter().filter(|f| f.0 == ContractType::Call).map(contract).collect(),
                puts: flows.iter().filter(|f| f.0 == ContractType::Put).map(contract).collect(),
            }],
        };
        classify(&raw, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_pools_and_ranks_across_symbols() {
        let chains = vec![
            chain("AAPL", &[(ContractType::Call, 180.0, 15000, 5000), (ContractType::Call, 185.0, 10, 500)]),
            chain("GME", &[(ContractType::Put, 15.0, 4200, 750)]),
            chain("TSLA", &[(ContractType::Call, 250.0, 12000, 3000)]),
        ];

        let rows = screen_unusual(&chains, None);
        let symbols: Vec<&str> = rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["GME", "TSLA", "AAPL"]);
        assert_eq!(rows[0].contract_name, "GME 2024-12-20 P15.00");
        assert_eq!(rows[0].volume_to_open_interest_ratio, 5.6);
    }

    #[test]
    fn test_limit_truncates() {
        let chains = vec![
            chain("NVDA", &[(ContractType::Call, 500.0, 9500, 1800)]),
            chain("AMZN", &[(ContractType::Put, 140.0, 7200, 1500)]),
            chain("MSFT", &[(ContractType::Put, 350.0, 8500, 2200)]),
        ];

        let rows = screen_unusual(&chains, Some(2));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].symbol, "NVDA");
        assert_eq!(rows[1].symbol, "AMZN");
    }

    #[test]
    fn test_empty_input() {
        assert!(screen_unusual(&[], Some(10)).is_empty());
    }
}
