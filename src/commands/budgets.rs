// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, opt_str, parse_decimal, pretty_table, surface};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let cat = sub.get_one::<String>("category").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let month = sub.get_one::<String>("month").unwrap();
    let budget = surface(store::set_budget(conn, cat, amount, month))?;
    println!(
        "Budget set for {} / {} = {}",
        budget.month_year,
        budget.category,
        fmt_money(&budget.amount, &db::currency(conn)?)
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let budgets = surface(store::list_budgets(conn, opt_str(sub, "month")))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &budgets)? {
        return Ok(());
    }
    let ccy = db::currency(conn)?;
    let data = budgets
        .iter()
        .map(|b| {
            vec![
                b.month_year.clone(),
                b.category.clone(),
                fmt_money(&b.amount, &ccy),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Category", "Budget"], data));
    Ok(())
}
