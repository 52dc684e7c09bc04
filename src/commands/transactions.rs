// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{Transaction, TransactionInput};
use crate::store;
use crate::utils::{
    filter_from_args, fmt_money, maybe_print_json, opt_str, parse_date, parse_decimal,
    pretty_table, surface,
};
use anyhow::{Result, bail};
use chrono::Local;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            add(conn, sub)?;
        }
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<i64> {
    let date = match opt_str(sub, "date") {
        Some(d) => parse_date(d)?,
        None => Local::now().date_naive(),
    };
    let input = TransactionInput {
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        kind: sub.get_one::<String>("type").unwrap().clone(),
        category: sub.get_one::<String>("category").unwrap().clone(),
        description: opt_str(sub, "description").map(String::from),
        date,
    };
    let id = surface(store::add_transaction(conn, &input))?;
    println!(
        "Recorded {} {} in '{}' on {} (id {})",
        input.kind.trim().to_lowercase(),
        fmt_money(&input.amount, &db::currency(conn)?),
        input.category.trim(),
        input.date,
        id
    );
    Ok(id)
}

/// Fields not given on the command line keep their stored value.
/// `--description ""` clears the description.
pub fn edit(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let Some(current) = surface(store::get_transaction(conn, id))? else {
        bail!("Transaction {} not found", id);
    };
    let input = TransactionInput {
        amount: match opt_str(sub, "amount") {
            Some(a) => parse_decimal(a)?,
            None => current.amount,
        },
        kind: opt_str(sub, "type")
            .map(String::from)
            .unwrap_or_else(|| current.kind.to_string()),
        category: opt_str(sub, "category")
            .map(String::from)
            .unwrap_or(current.category),
        description: match opt_str(sub, "description") {
            Some(d) => Some(d.to_string()),
            None => current.description,
        },
        date: match opt_str(sub, "date") {
            Some(d) => parse_date(d)?,
            None => current.date,
        },
    };
    if !surface(store::update_transaction(conn, id, &input))? {
        bail!("Transaction {} not found", id);
    }
    println!("Updated transaction {}", id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if !surface(store::delete_transaction(conn, id))? {
        bail!("Transaction {} not found", id);
    }
    println!("Removed transaction {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No transactions found");
        return Ok(());
    }
    println!("{}", transactions_table(&data, &db::currency(conn)?));
    Ok(())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let filter = filter_from_args(sub)?;
    surface(store::get_transactions(conn, &filter))
}

pub fn transactions_table(rows: &[Transaction], ccy: &str) -> comfy_table::Table {
    let data: Vec<Vec<String>> = rows
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.date.format("%d/%m/%Y").to_string(),
                t.kind.to_string(),
                format!("{} {}", t.icon.as_deref().unwrap_or_default(), t.category)
                    .trim()
                    .to_string(),
                fmt_money(&t.amount, ccy),
                t.description.clone().unwrap_or_else(|| "-".into()),
            ]
        })
        .collect();
    pretty_table(
        &["ID", "Date", "Type", "Category", "Amount", "Description"],
        data,
    )
}
