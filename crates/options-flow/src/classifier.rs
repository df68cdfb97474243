use analysis_core::round_half_up;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::contracts::{ClassifiedChain, ClassifiedContract, OptionChain, OptionContract};

/// Volume must exceed open interest by this factor to be flagged
pub const UNUSUAL_RATIO_THRESHOLD: f64 = 1.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Whole days from `as_of` to midnight UTC of the expiration date, half-up rounded
pub fn days_to_expiration(expiration: NaiveDate, as_of: DateTime<Utc>) -> i64 {
    let expires_at = Utc.from_utc_datetime(&expiration.and_time(chrono::NaiveTime::MIN));
    let millis = (expires_at - as_of).num_milliseconds() as f64;
    round_half_up(millis / MILLIS_PER_DAY) as i64
}

fn classify_contract(symbol: &str, contract: &OptionContract, as_of: DateTime<Utc>) -> ClassifiedContract {
    let ratio = contract.volume_to_open_interest();
    let is_unusual = ratio.is_some_and(|r| r > UNUSUAL_RATIO_THRESHOLD);
    let unusual_reason = ratio
        .filter(|_| is_unusual)
        .map(|r| format!("Volume/OI ratio: {:.2}", r));

    ClassifiedContract {
        contract: contract.clone(),
        contract_name: contract.contract_name(symbol),
        days_to_expiration: days_to_expiration(contract.expiration_date, as_of),
        volume_to_open_interest_ratio: ratio,
        is_unusual,
        unusual_reason,
    }
}

/// Annotate every contract and pool the flagged ones.
///
/// Calls and puts keep their traversal order and are never filtered.
/// `unusual_activity` is stable-sorted by ratio, highest first, so ties keep
/// the order they were met in (per expiration: calls, then puts).
pub fn classify(chain: &OptionChain, as_of: DateTime<Utc>) -> ClassifiedChain {
    let mut calls = Vec::new();
    let mut puts = Vec::new();
    let mut unusual = Vec::new();

    for group in &chain.expirations {
        for (contracts, out) in [(&group.calls, &mut calls), (&group.puts, &mut puts)] {
            for contract in contracts {
                let classified = classify_contract(&chain.symbol, contract, as_of);
                if classified.is_unusual {
                    unusual.push(classified.clone());
                }
                out.push(classified);
            }
        }
    }

    unusual.sort_by(|a, b| {
        let ra = a.volume_to_open_interest_ratio.unwrap_or(0.0);
        let rb = b.volume_to_open_interest_ratio.unwrap_or(0.0);
        rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
    });

    tracing::debug!(
        symbol = %chain.symbol,
        calls = calls.len(),
        puts = puts.len(),
        unusual = unusual.len(),
        "options chain classified"
    );

    ClassifiedChain {
        symbol: chain.symbol.clone(),
        last_updated: chain.last_updated.unwrap_or(as_of),
        calls,
        puts,
        unusual_activity: unusual,
    }
}

/// [`classify`] against the current wall clock, read once
pub fn classify_now(chain: &OptionChain) -> ClassifiedChain {
    classify(chain, Utc::now())
}

/// Chain-wide volume and open interest totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSummary {
    pub symbol: String,
    pub total_call_volume: i64,
    pub total_put_volume: i64,
    pub total_call_open_interest: i64,
    pub total_put_open_interest: i64,
    /// Put volume over call volume; `None` without call volume
    pub put_call_ratio: Option<f64>,
    pub unusual_count: usize,
}

pub fn summarize(chain: &ClassifiedChain) -> ChainSummary {
    fn totals(contracts: &[ClassifiedContract]) -> (i64, i64) {
        contracts.iter().fold((0, 0), |(vol, oi), c| {
            (
                vol + c.contract.volume.unwrap_or_default().max(0),
                oi + c.contract.open_interest.unwrap_or_default().max(0),
            )
        })
    }

    let (call_volume, call_oi) = totals(&chain.calls);
    let (put_volume, put_oi) = totals(&chain.puts);

    let put_call_ratio = if call_volume > 0 {
        Some(put_volume as f64 / call_volume as f64)
    } else {
        None
    };

    ChainSummary {
        symbol: chain.symbol.clone(),
        total_call_volume: call_volume,
        total_put_volume: put_volume,
        total_call_open_interest: call_oi,
        total_put_open_interest: put_oi,
        put_call_ratio,
        unusual_count: chain.unusual_activity.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::{ContractType, ExpirationGroup};
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn contract(kind: ContractType, strike: f64, expiration: NaiveDate, volume: i64, oi: i64) -> OptionContract {
        OptionContract {
            strike: Some(strike),
            contract_type: kind,
            expiration_date: expiration,
            last_price: Some(1.0),
            change: Some(0.1),
            percent_change: Some(10.0),
            volume: Some(volume),
            open_interest: Some(oi),
            implied_volatility: Some(0.35),
            in_the_money: false,
        }
    }

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 10, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_days_to_expiration() {
        assert_eq!(days_to_expiration(date(2024, 12, 20), as_of()), 10);
        assert_eq!(days_to_expiration(date(2024, 12, 1), as_of()), -9);

        let afternoon = Utc.with_ymd_and_hms(2024, 12, 10, 15, 0, 0).unwrap();
        assert_eq!(days_to_expiration(date(2024, 12, 20), afternoon), 9);

        let noon = Utc.with_ymd_and_hms(2024, 12, 10, 12, 0, 0).unwrap();
        assert_eq!(days_to_expiration(date(2024, 12, 20), noon), 10);
    }

    #[test]
    fn test_flags_ratio_above_one() {
        let exp = date(2024, 12, 20);
        let chain = OptionChain {
            symbol: "AAPL".to_string(),
            last_updated: None,
            expirations: vec![ExpirationGroup {
                expiration_date: exp,
                calls: vec![
                    contract(ContractType::Call, 180.0, exp, 300, 100),
                    contract(ContractType::Call, 185.0, exp, 100, 100),
                ],
                puts: vec![contract(ContractType::Put, 170.0, exp, 300, 0)],
            }],
        };

        let out = classify(&chain, as_of());

        let flagged = &out.calls[0];
        assert!(flagged.is_unusual);
        assert_relative_eq!(flagged.volume_to_open_interest_ratio.unwrap(), 3.0);
        assert!(flagged.unusual_reason.as_deref().unwrap().contains("3.00"));
        assert_eq!(flagged.days_to_expiration, 10);
        assert_eq!(flagged.contract_name, "AAPL 2024-12-20 C180.00");

        // Ratio of exactly one is not unusual
        assert!(!out.calls[1].is_unusual);
        assert_eq!(out.calls[1].volume_to_open_interest_ratio, Some(1.0));
        assert_eq!(out.calls[1].unusual_reason, None);

        // Zero open interest: kept in the list, never flagged
        assert_eq!(out.puts.len(), 1);
        assert!(!out.puts[0].is_unusual);
        assert_eq!(out.puts[0].volume_to_open_interest_ratio, None);

        assert_eq!(out.unusual_activity.len(), 1);
        assert_eq!(out.last_updated, as_of());
    }

    #[test]
    fn test_unusual_sorted_descending_and_stable() {
        let e1 = date(2024, 12, 20);
        let e2 = date(2025, 1, 17);
        let chain = OptionChain {
            symbol: "GME".to_string(),
            last_updated: None,
            expirations: vec![
                ExpirationGroup {
                    expiration_date: e1,
                    calls: vec![contract(ContractType::Call, 20.0, e1, 300, 100)],
                    puts: vec![contract(ContractType::Put, 15.0, e1, 560, 100)],
                },
                ExpirationGroup {
                    expiration_date: e2,
                    calls: vec![
                        contract(ContractType::Call, 25.0, e2, 400, 100),
                        contract(ContractType::Call, 30.0, e2, 600, 200),
                    ],
                    puts: vec![],
                },
            ],
        };

        let out = classify(&chain, as_of());
        let ratios: Vec<f64> = out
            .unusual_activity
            .iter()
            .map(|c| c.volume_to_open_interest_ratio.unwrap())
            .collect();
        assert_eq!(ratios, vec![5.6, 4.0, 3.0, 3.0]);

        // The two 3.0 entries keep traversal order
        assert_eq!(out.unusual_activity[2].contract.strike, Some(20.0));
        assert_eq!(out.unusual_activity[3].contract.strike, Some(30.0));

        // Input order untouched in the per-type lists
        let call_strikes: Vec<f64> = out.calls.iter().filter_map(|c| c.contract.strike).collect();
        assert_eq!(call_strikes, vec![20.0, 25.0, 30.0]);
    }

    #[test]
    fn test_expired_contracts_are_annotated_not_dropped() {
        let past = date(2024, 11, 15);
        let chain = OptionChain {
            symbol: "TSLA".to_string(),
            last_updated: None,
            expirations: vec![ExpirationGroup {
                expiration_date: past,
                calls: vec![contract(ContractType::Call, 250.0, past, 50, 10)],
                puts: vec![],
            }],
        };

        let out = classify(&chain, as_of());
        assert_eq!(out.calls[0].days_to_expiration, -25);
        assert!(out.calls[0].is_unusual);
    }

    #[test]
    fn test_provider_timestamp_wins() {
        let stamp = Utc.with_ymd_and_hms(2024, 12, 9, 20, 0, 0).unwrap();
        let chain = OptionChain {
            symbol: "MSFT".to_string(),
            last_updated: Some(stamp),
            expirations: vec![],
        };
        let out = classify(&chain, as_of());
        assert_eq!(out.last_updated, stamp);
        assert!(out.calls.is_empty() && out.unusual_activity.is_empty());
    }

    #[test]
    fn test_summary() {
        let exp = date(2024, 12, 20);
        let mut missing_oi = contract(ContractType::Put, 95.0, exp, 40, 0);
        missing_oi.open_interest = None;
        let chain = OptionChain {
            symbol: "SPY".to_string(),
            last_updated: None,
            expirations: vec![ExpirationGroup {
                expiration_date: exp,
                calls: vec![
                    contract(ContractType::Call, 100.0, exp, 200, 100),
                    contract(ContractType::Call, 105.0, exp, 100, 400),
                ],
                puts: vec![contract(ContractType::Put, 90.0, exp, 110, 50), missing_oi],
            }],
        };

        let summary = summarize(&classify(&chain, as_of()));
        assert_eq!(summary.total_call_volume, 300);
        assert_eq!(summary.total_put_volume, 150);
        assert_eq!(summary.total_call_open_interest, 500);
        assert_eq!(summary.total_put_open_interest, 50);
        assert_relative_eq!(summary.put_call_ratio.unwrap(), 0.5);
        assert_eq!(summary.unusual_count, 2);
    }
}
