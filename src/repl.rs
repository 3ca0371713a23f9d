//! Interactive query loop.
//!
//! Queries look like `Meso V1 -q radiant -r`: the first two tokens
//! name the relic, the rest are flags. The loop runs until the literal
//! token `exit` or end of input.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

use crate::cache::CacheStore;
use crate::catalog::{Catalog, QualityTier};
use crate::error::Result;
use crate::fetcher::OrderSource;
use crate::valuation::expected_value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub relic_name: String,
    pub quality: QualityTier,
    pub refresh: bool,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Exit,
    Query(Query),
    Invalid(String),
}

/// Tokenize one input line. Flag problems are warnings on the query,
/// not hard failures; `-q` validates the proposed tier against the
/// closed enumeration before accepting it.
pub fn parse_query(line: &str) -> ParsedLine {
    let line = line.trim();
    if line == "exit" {
        return ParsedLine::Exit;
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return ParsedLine::Invalid("expected '<relic name> <code>', e.g. 'Meso V1'".into());
    }

    let mut query = Query {
        relic_name: format!("{} {}", tokens[0], tokens[1]),
        quality: QualityTier::Intact,
        refresh: false,
        warnings: Vec::new(),
    };

    let mut flags = tokens[2..].iter();
    while let Some(flag) = flags.next() {
        match *flag {
            "-r" => query.refresh = true,
            "-q" => match flags.next() {
                Some(value) => match value.parse::<QualityTier>() {
                    Ok(quality) => query.quality = quality,
                    Err(_) => query.warnings.push(format!(
                        "'{value}' is not a quality; using '{}'. Valid: intact, exceptional, flawless, radiant",
                        query.quality
                    )),
                },
                None => query
                    .warnings
                    .push("'-q' must be followed by a quality".into()),
            },
            other => query.warnings.push(format!("ignoring unknown flag '{other}'")),
        }
    }

    ParsedLine::Query(query)
}

fn print_banner() {
    println!("Void relic price checker. Prices pulled from warframe.market.");
    println!("Query: <relic name> <code>, e.g. 'Meso V1'.");
    println!("Flags: -q <intact|exceptional|flawless|radiant> (default intact), -r to force refresh.");
    println!("Type 'exit' to quit.");
}

/// Run the interactive loop to completion. Per-query failures are
/// reported and the loop continues; only I/O on stdin itself is fatal.
pub async fn run(
    catalog: &Catalog,
    cache: &mut CacheStore,
    source: &mut impl OrderSource,
) -> Result<()> {
    print_banner();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\nWhich relic? ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let query = match parse_query(&line) {
            ParsedLine::Exit => break,
            ParsedLine::Invalid(reason) => {
                println!("Invalid query: {reason}");
                continue;
            }
            ParsedLine::Query(query) => query,
        };

        for warning in &query.warnings {
            println!("Warning: {warning}");
        }

        let Some(relic) = catalog.find_relic(&query.relic_name) else {
            println!("Invalid query: no relic matches '{}'", query.relic_name);
            continue;
        };

        match expected_value(relic, query.quality, catalog, query.refresh, cache, source).await {
            Ok(valuation) => {
                println!(
                    "\nExpected value of {} ({}): {:.1} platinum",
                    relic.name, query.quality, valuation.expected_value
                );
                if !valuation.no_data.is_empty() {
                    println!("No price data for: {}", valuation.no_data.join(", "));
                }
            }
            Err(err) => {
                error!(error = %err, relic = %relic.name, "query failed");
                println!("Query failed: {err}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(line: &str) -> Query {
        match parse_query(line) {
            ParsedLine::Query(q) => q,
            other => panic!("expected query, got {other:?}"),
        }
    }

    #[test]
    fn exit_token_is_recognized() {
        assert_eq!(parse_query("exit"), ParsedLine::Exit);
        assert_eq!(parse_query("  exit  "), ParsedLine::Exit);
    }

    #[test]
    fn too_few_tokens_is_invalid() {
        assert!(matches!(parse_query(""), ParsedLine::Invalid(_)));
        assert!(matches!(parse_query("Meso"), ParsedLine::Invalid(_)));
    }

    #[test]
    fn defaults_are_intact_without_refresh() {
        let q = query("Meso V1");
        assert_eq!(q.relic_name, "Meso V1");
        assert_eq!(q.quality, QualityTier::Intact);
        assert!(!q.refresh);
        assert!(q.warnings.is_empty());
    }

    #[test]
    fn refresh_flag_is_parsed() {
        assert!(query("Meso V1 -r").refresh);
    }

    #[test]
    fn quality_flag_selects_tier() {
        let q = query("Meso V1 -q radiant");
        assert_eq!(q.quality, QualityTier::Radiant);
        assert!(q.warnings.is_empty());
    }

    #[test]
    fn invalid_quality_warns_and_keeps_default() {
        let q = query("Meso V1 -q shiny");
        assert_eq!(q.quality, QualityTier::Intact);
        assert_eq!(q.warnings.len(), 1);
    }

    #[test]
    fn dangling_quality_flag_warns() {
        let q = query("Meso V1 -q");
        assert_eq!(q.quality, QualityTier::Intact);
        assert_eq!(q.warnings.len(), 1);
    }

    #[test]
    fn flags_combine() {
        let q = query("Axi A1 -r -q flawless");
        assert_eq!(q.relic_name, "Axi A1");
        assert!(q.refresh);
        assert_eq!(q.quality, QualityTier::Flawless);
    }
}
