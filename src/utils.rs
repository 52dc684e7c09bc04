// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::LedgerError;
use crate::models::Kind;
use crate::store::TransactionFilter;
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_kind(s: &str) -> Result<Kind> {
    s.parse::<Kind>().map_err(|e| anyhow!(e))
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn fmt_rate(d: &Decimal) -> String {
    format!("{:.1}%", d.round_dp(1))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Build a filter from the shared `--type/--category/--from/--to/--limit` args.
pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    Ok(TransactionFilter {
        kind: opt_str(sub, "type").map(parse_kind).transpose()?,
        category: opt_str(sub, "category").map(|s| s.trim().to_string()),
        start_date: opt_str(sub, "from").map(parse_date).transpose()?,
        end_date: opt_str(sub, "to").map(parse_date).transpose()?,
        limit: sub.try_get_one::<usize>("limit").ok().flatten().copied(),
    })
}

/// Optional string argument; `None` also when the command does not define it.
pub fn opt_str<'a>(sub: &'a clap::ArgMatches, name: &str) -> Option<&'a str> {
    sub.try_get_one::<String>(name)
        .ok()
        .flatten()
        .map(|s| s.as_str())
}

/// Render a ledger error for the terminal. Validation failures become one
/// bullet per rule; storage details stay out of the message.
pub fn describe_ledger_error(err: &LedgerError) -> String {
    match err {
        LedgerError::Validation(kinds) => {
            let mut msg = String::from("Could not save:");
            for k in kinds {
                msg.push_str("\n  - ");
                msg.push_str(&k.to_string());
            }
            msg
        }
        LedgerError::Storage(_) => "Storage error, the change was not applied".to_string(),
        other => other.to_string(),
    }
}

/// Lift a ledger result into the command layer, keeping the original error
/// as the source so `--verbose` can still log it.
pub fn surface<T>(r: Result<T, LedgerError>) -> Result<T> {
    r.map_err(|e| {
        let msg = describe_ledger_error(&e);
        anyhow::Error::new(e).context(msg)
    })
}
