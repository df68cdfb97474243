use anyhow::{bail, Context, Result};
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage:
  signal-cli recommend --overview FILE --series FILE [--symbol S]
  signal-cli options --chain FILE [--symbol S] [--summary]
  signal-cli screen --chain FILE [--chain FILE ...] [--limit N]

Environment:
  SIGNAL_PRETTY_JSON     Pretty-print output (default: true)
  UNUSUAL_SCREEN_LIMIT   Screener rows when --limit is absent (default: 10)
  SIGNAL_SYMBOL          Fallback symbol for payloads without one";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Recommend {
        overview: PathBuf,
        series: PathBuf,
        symbol: Option<String>,
    },
    Options {
        chain: PathBuf,
        symbol: Option<String>,
        summary: bool,
    },
    Screen {
        chains: Vec<PathBuf>,
        limit: Option<usize>,
    },
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .filter(|v| !v.starts_with("--"))
}

fn flag_values(args: &[String], name: &str) -> Vec<PathBuf> {
    args.iter()
        .enumerate()
        .filter(|(_, a)| *a == name)
        .filter_map(|(i, _)| args.get(i + 1))
        .filter(|v| !v.starts_with("--"))
        .map(PathBuf::from)
        .collect()
}

fn required(args: &[String], name: &str) -> Result<PathBuf> {
    flag_value(args, name)
        .map(PathBuf::from)
        .with_context(|| format!("missing {} FILE", name))
}

fn symbol(args: &[String]) -> Option<String> {
    flag_value(args, "--symbol").map(|s| s.trim().to_uppercase())
}

/// Parse everything after the program name
pub fn parse(args: &[String]) -> Result<Command> {
    let Some(command) = args.first() else {
        bail!("no command given");
    };
    let rest = &args[1..];

    match command.as_str() {
        "recommend" => Ok(Command::Recommend {
            overview: required(rest, "--overview")?,
            series: required(rest, "--series")?,
            symbol: symbol(rest),
        }),
        "options" => Ok(Command::Options {
            chain: required(rest, "--chain")?,
            symbol: symbol(rest),
            summary: rest.iter().any(|a| a == "--summary"),
        }),
        "screen" => {
            let chains = flag_values(rest, "--chain");
            if chains.is_empty() {
                bail!("missing --chain FILE");
            }
            let limit = flag_value(rest, "--limit")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("--limit must be a count")?;
            Ok(Command::Screen { chains, limit })
        }
        other => bail!("unknown command {:?}", other),
    }
}
