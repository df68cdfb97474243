use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub pretty_json: bool,
    pub unusual_screen_limit: usize,
    /// Used when neither the flags nor the payload name a symbol
    pub default_symbol: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            pretty_json: true,
            unusual_screen_limit: 10,
            default_symbol: None,
        }
    }
}

impl CliConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            pretty_json: match lookup("SIGNAL_PRETTY_JSON") {
                Some(v) => v
                    .trim()
                    .parse()
                    .with_context(|| format!("SIGNAL_PRETTY_JSON must be true or false, got {:?}", v))?,
                None => defaults.pretty_json,
            },
            unusual_screen_limit: match lookup("UNUSUAL_SCREEN_LIMIT") {
                Some(v) => v
                    .trim()
                    .parse()
                    .with_context(|| format!("UNUSUAL_SCREEN_LIMIT must be a count, got {:?}", v))?,
                None => defaults.unusual_screen_limit,
            },
            default_symbol: lookup("SIGNAL_SYMBOL")
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty()),
        })
    }
}
