use std::collections::BTreeMap;

use analysis_core::{AnalysisError, PriceBar};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::number;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesMetadata {
    #[serde(rename = "2. Symbol", default)]
    pub symbol: Option<String>,
    #[serde(rename = "3. Last Refreshed", default)]
    pub last_refreshed: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyBarValues {
    #[serde(rename = "1. open", default)]
    pub open: Option<Value>,
    #[serde(rename = "2. high", default)]
    pub high: Option<Value>,
    #[serde(rename = "3. low", default)]
    pub low: Option<Value>,
    #[serde(rename = "4. close", default)]
    pub close: Option<Value>,
    #[serde(rename = "5. volume", default)]
    pub volume: Option<Value>,
}

impl DailyBarValues {
    fn to_bar(&self, date: NaiveDate) -> Option<PriceBar> {
        Some(PriceBar {
            date,
            open: number(self.open.as_ref())?,
            high: number(self.high.as_ref())?,
            low: number(self.low.as_ref())?,
            close: number(self.close.as_ref())?,
            volume: number(self.volume.as_ref()).unwrap_or(0.0),
        })
    }
}

/// TIME_SERIES_DAILY response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTimeSeries {
    #[serde(rename = "Meta Data", default)]
    pub meta: Option<SeriesMetadata>,
    #[serde(rename = "Time Series (Daily)", default)]
    pub series: Option<BTreeMap<String, DailyBarValues>>,
}

impl DailyTimeSeries {
    pub fn parse(body: &str) -> Result<Self, AnalysisError> {
        let parsed: DailyTimeSeries =
            serde_json::from_str(body).map_err(|e| AnalysisError::ParseError(e.to_string()))?;
        if parsed.series.is_none() {
            return Err(AnalysisError::InvalidData(
                "Stock time series not found or API limit reached".to_string(),
            ));
        }
        Ok(parsed)
    }

    pub fn symbol(&self) -> Option<&str> {
        self.meta.as_ref()?.symbol.as_deref()
    }

    /// Bars in ascending date order. Entries with a bad date or a missing
    /// price are skipped; a missing volume reads as zero.
    pub fn price_bars(&self) -> Vec<PriceBar> {
        let Some(series) = &self.series else {
            return Vec::new();
        };

        let mut bars = Vec::with_capacity(series.len());
        for (key, values) in series {
            let Ok(date) = NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d") else {
                tracing::warn!(date = %key, "skipping bar with unparsable date");
                continue;
            };
            match values.to_bar(date) {
                Some(bar) => bars.push(bar),
                None => {
                    tracing::warn!(%date, "skipping bar with missing price fields");
                }
            }
        }
        bars.sort_by_key(|b| b.date);
        bars
    }
}
