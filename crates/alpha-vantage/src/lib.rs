//! Alpha Vantage payload adapters.
//!
//! Turns OVERVIEW, TIME_SERIES_DAILY and OPTION_CHAIN responses into the
//! typed records the engines consume. Every numeric field may arrive as
//! text, a JSON number, or a placeholder; placeholders become absent values.

pub mod options;
pub mod overview;
pub mod time_series;
mod value;

pub use options::{ContractPayload, ExpirationPayload, OptionChainPayload};
pub use overview::CompanyOverview;
pub use time_series::{DailyBarValues, DailyTimeSeries, SeriesMetadata};
