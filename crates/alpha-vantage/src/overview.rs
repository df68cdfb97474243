use analysis_core::{AnalysisError, FundamentalSnapshot, ShortInterest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::{integer, number};

/// OVERVIEW response. Fields are kept raw and coerced on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyOverview {
    #[serde(rename = "Symbol", default)]
    pub symbol: Option<String>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "50DayMovingAverage", default)]
    pub fifty_day_moving_average: Option<Value>,
    #[serde(rename = "200DayMovingAverage", default)]
    pub two_hundred_day_moving_average: Option<Value>,
    #[serde(rename = "PERatio", default)]
    pub pe_ratio: Option<Value>,
    #[serde(rename = "ShortPercentFloat", default)]
    pub short_percent_float: Option<Value>,
    #[serde(rename = "ShortPercentOutstanding", default)]
    pub short_percent_outstanding: Option<Value>,
    #[serde(rename = "ShortRatio", default)]
    pub short_ratio: Option<Value>,
    #[serde(rename = "SharesShort", default)]
    pub shares_short: Option<Value>,
    #[serde(rename = "SharesShortPriorMonth", default)]
    pub shares_short_prior_month: Option<Value>,
}

impl CompanyOverview {
    /// Parse a raw OVERVIEW body.
    ///
    /// The provider answers unknown symbols and rate limits with an object
    /// that has no `Symbol`; both are rejected.
    pub fn parse(body: &str) -> Result<Self, AnalysisError> {
        let overview: CompanyOverview =
            serde_json::from_str(body).map_err(|e| AnalysisError::ParseError(e.to_string()))?;
        if overview.symbol().is_none() {
            return Err(AnalysisError::InvalidData(
                "Stock not found or API limit reached".to_string(),
            ));
        }
        Ok(overview)
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn fundamentals(&self) -> FundamentalSnapshot {
        FundamentalSnapshot {
            fifty_day_moving_average: number(self.fifty_day_moving_average.as_ref()),
            two_hundred_day_moving_average: number(self.two_hundred_day_moving_average.as_ref()),
            price_to_earnings: number(self.pe_ratio.as_ref()),
            short_percent_of_float: number(self.short_percent_float.as_ref()),
        }
    }

    pub fn short_interest(&self) -> ShortInterest {
        ShortInterest {
            short_percent_float: number(self.short_percent_float.as_ref()),
            short_percent_outstanding: number(self.short_percent_outstanding.as_ref()),
            short_ratio: number(self.short_ratio.as_ref()),
            shares_short: integer(self.shares_short.as_ref()),
            shares_short_prior_month: integer(self.shares_short_prior_month.as_ref()),
        }
    }
}
