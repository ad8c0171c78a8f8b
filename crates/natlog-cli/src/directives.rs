//! `%` directive lines: search-option overrides inside a query stream.
//!
//! A directive is `%<key> <value>` and rewrites one field of the working
//! [`SearchOptions`]. Overrides persist across the queries that follow,
//! until another directive changes them. The core crates never see these
//! lines; they are purely a front-end concern.

use std::str::FromStr;

use natlog_search::{CostPolicy, FrontierStrategy, SearchOptions};

/// Apply one `%` line to the working options.
pub fn apply(options: &mut SearchOptions, line: &str) -> Result<(), String> {
    let body = line.trim_start_matches('%').trim();
    let (key, value) = match body.split_once(char::is_whitespace) {
        Some((key, value)) => (key, value.trim()),
        None => (body, ""),
    };
    match key {
        "policy" => options.policy = parse_policy(value)?,
        "strategy" => options.strategy = parse_strategy(value)?,
        "maxticks" => options.max_ticks = parse(value)?,
        "threshold" => options.cost_threshold = parse(value)?,
        "stoponfirst" => options.stop_on_first = parse(value)?,
        "checkfringe" => options.check_fringe = parse(value)?,
        "cyclememory" => options.cycle_memory = parse(value)?,
        "truth" => options.initial_truth = parse(value)?,
        other => return Err(format!("unknown directive: {other:?}")),
    }
    Ok(())
}

pub fn parse_policy(value: &str) -> Result<CostPolicy, String> {
    match value {
        "strict" => Ok(CostPolicy::Strict),
        "intermediate" => Ok(CostPolicy::Intermediate),
        "soft" => Ok(CostPolicy::Soft),
        other => Err(format!("unknown policy: {other:?}")),
    }
}

pub fn parse_strategy(value: &str) -> Result<FrontierStrategy, String> {
    match value {
        "ucs" => Ok(FrontierStrategy::Ucs),
        "fifo" => Ok(FrontierStrategy::Fifo),
        other => Err(format!("unknown strategy: {other:?}")),
    }
}

fn parse<T: FromStr>(value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("bad directive value: {value:?}"))
}
