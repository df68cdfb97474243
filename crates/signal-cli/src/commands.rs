use alpha_vantage::{CompanyOverview, DailyTimeSeries, OptionChainPayload};
use analysis_core::{RecommendationReport, ShortInterest};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use options_flow::{classify, screen_unusual, summarize, ChainSummary, ClassifiedChain, UnusualOption};
use recommendation_engine::RecommendationEngine;
use serde::Serialize;

/// `recommend` output: the engine report plus the overview's company facts
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSignal {
    #[serde(flatten)]
    pub report: RecommendationReport,
    pub company_name: Option<String>,
    pub short_interest: ShortInterest,
    pub short_interest_change: Option<i64>,
    pub short_interest_change_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainWithSummary {
    pub chain: ClassifiedChain,
    pub summary: ChainSummary,
}

pub fn recommend(
    overview_body: &str,
    series_body: &str,
    symbol: Option<&str>,
    as_of: DateTime<Utc>,
) -> Result<StockSignal> {
    let overview = CompanyOverview::parse(overview_body).context("Failed to read company overview")?;
    let series = DailyTimeSeries::parse(series_body).context("Failed to read daily time series")?;

    let symbol = symbol
        .or_else(|| overview.symbol())
        .or_else(|| series.symbol())
        .context("No symbol in flags or payloads")?
        .to_string();

    let bars = series.price_bars();
    tracing::info!(symbol = %symbol, bars = bars.len(), "evaluating recommendation");

    let report = RecommendationEngine::new()
        .evaluate_at(&symbol, &bars, &overview.fundamentals(), as_of)
        .with_context(|| format!("Failed to evaluate {}", symbol))?;

    let short_interest = overview.short_interest();
    Ok(StockSignal {
        report,
        company_name: overview.name.clone(),
        short_interest_change: short_interest.change(),
        short_interest_change_percent: short_interest.change_percent(),
        short_interest,
    })
}

fn load_chain(
    body: &str,
    symbol: Option<&str>,
    fallback_symbol: Option<&str>,
    as_of: DateTime<Utc>,
) -> Result<ClassifiedChain> {
    let payload = OptionChainPayload::parse(body).context("Failed to read option chain")?;
    let symbol = symbol
        .or_else(|| payload.symbol())
        .or(fallback_symbol)
        .context("No symbol in flags, payload or SIGNAL_SYMBOL")?
        .to_uppercase();

    let chain = payload
        .into_chain(&symbol)
        .with_context(|| format!("Failed to load option chain for {}", symbol))?;
    Ok(classify(&chain, as_of))
}

pub fn options(
    body: &str,
    symbol: Option<&str>,
    fallback_symbol: Option<&str>,
    as_of: DateTime<Utc>,
) -> Result<ClassifiedChain> {
    let classified = load_chain(body, symbol, fallback_symbol, as_of)?;
    tracing::info!(
        symbol = %classified.symbol,
        unusual = classified.unusual_activity.len(),
        "option chain classified"
    );
    Ok(classified)
}

pub fn options_with_summary(
    body: &str,
    symbol: Option<&str>,
    fallback_symbol: Option<&str>,
    as_of: DateTime<Utc>,
) -> Result<ChainWithSummary> {
    let chain = options(body, symbol, fallback_symbol, as_of)?;
    let summary = summarize(&chain);
    Ok(ChainWithSummary { chain, summary })
}

/// Chains without a symbol of their own fall back to `fallback_symbol`
pub fn screen(
    bodies: &[String],
    limit: usize,
    fallback_symbol: Option<&str>,
    as_of: DateTime<Utc>,
) -> Result<Vec<UnusualOption>> {
    let chains = bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            load_chain(body, None, fallback_symbol, as_of)
                .with_context(|| format!("Chain #{} could not be screened", i + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    let rows = screen_unusual(&chains, Some(limit));
    tracing::info!(chains = chains.len(), rows = rows.len(), "screen complete");
    Ok(rows)
}
