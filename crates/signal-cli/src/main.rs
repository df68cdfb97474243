//! signal-cli: run stock recommendations and options-flow screens over saved
//! Alpha Vantage payloads.
//!
//! Usage:
//!   cargo run -p signal-cli -- recommend --overview ibm_overview.json --series ibm_daily.json
//!   cargo run -p signal-cli -- options --chain aapl_chain.json --summary
//!   cargo run -p signal-cli -- screen --chain aapl.json --chain gme.json --limit 5

mod args;
mod commands;
mod config;

use anyhow::{Context, Result};
use args::Command;
use chrono::Utc;
use config::CliConfig;
use serde::Serialize;
use std::path::Path;

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signal_cli=info,recommendation_engine=warn,options_flow=warn".into()),
        )
        .init();

    let config = CliConfig::from_env()?;
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let command = match args::parse(&raw) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}\n\n{}", e, args::USAGE);
            std::process::exit(1);
        }
    };

    let as_of = Utc::now();
    let fallback = config.default_symbol.as_deref();

    match command {
        Command::Recommend { overview, series, symbol } => {
            let signal = commands::recommend(&read(&overview)?, &read(&series)?, symbol.as_deref(), as_of)?;
            print(&signal, config.pretty_json)
        }
        Command::Options { chain, symbol, summary } => {
            let body = read(&chain)?;
            if summary {
                let out = commands::options_with_summary(&body, symbol.as_deref(), fallback, as_of)?;
                print(&out, config.pretty_json)
            } else {
                let out = commands::options(&body, symbol.as_deref(), fallback, as_of)?;
                print(&out, config.pretty_json)
            }
        }
        Command::Screen { chains, limit } => {
            let bodies = chains.iter().map(|p| read(p)).collect::<Result<Vec<_>>>()?;
            let limit = limit.unwrap_or(config.unusual_screen_limit);
            let rows = commands::screen(&bodies, limit, fallback, as_of)?;
            print(&rows, config.pretty_json)
        }
    }
}
