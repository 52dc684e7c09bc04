// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregation::{
    CategoryBreakdown, MonthlySummary, Summary, category_analysis, monthly_summary, summarize,
};
use crate::commands::transactions::transactions_table;
use crate::db;
use crate::models::{Kind, Transaction};
use crate::store::{self, TransactionFilter};
use crate::utils::{
    fmt_money, fmt_rate, maybe_print_json, opt_str, parse_date, parse_kind, pretty_table, surface,
};
use anyhow::Result;
use comfy_table::Table;
use rusqlite::Connection;
use serde::Serialize;

const RECENT_ROWS: usize = 10;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("monthly", sub)) => monthly(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("dashboard", sub)) => dashboard(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn ranged(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let filter = TransactionFilter::between(
        opt_str(sub, "from").map(parse_date).transpose()?,
        opt_str(sub, "to").map(parse_date).transpose()?,
    );
    surface(store::get_transactions(conn, &filter))
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let s = summarize(&ranged(conn, sub)?);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        println!("{}", summary_table(&s, &db::currency(conn)?));
    }
    Ok(())
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let rows = monthly_summary(&ranged(conn, sub)?);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    if rows.is_empty() {
        println!("No transactions found");
    } else {
        println!("{}", monthly_table(&rows, &db::currency(conn)?));
    }
    Ok(())
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind = parse_kind(sub.get_one::<String>("type").unwrap())?;
    let rows = category_analysis(&ranged(conn, sub)?, kind);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    if rows.is_empty() {
        println!("No {} transactions found", kind);
    } else {
        println!("{}", category_table(&rows, &db::currency(conn)?));
    }
    Ok(())
}

#[derive(Serialize)]
pub struct Dashboard {
    pub summary: Summary,
    pub monthly: Vec<MonthlySummary>,
    pub expenses_by_category: Vec<CategoryBreakdown>,
    pub recent: Vec<Transaction>,
}

pub fn build_dashboard(conn: &Connection) -> Result<Dashboard> {
    let all = surface(store::get_transactions(conn, &TransactionFilter::default()))?;
    let recent = surface(store::get_transactions(
        conn,
        &TransactionFilter::latest(RECENT_ROWS),
    ))?;
    Ok(Dashboard {
        summary: summarize(&all),
        monthly: monthly_summary(&all),
        expenses_by_category: category_analysis(&all, Kind::Expense),
        recent,
    })
}

fn dashboard(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let dash = build_dashboard(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &dash)? {
        return Ok(());
    }
    let ccy = db::currency(conn)?;
    println!("{}", summary_table(&dash.summary, &ccy));
    if dash.recent.is_empty() {
        println!("Welcome to FinanceFlow! Add your first transaction with `financeflow tx add`.");
        return Ok(());
    }
    println!("{}", monthly_table(&dash.monthly, &ccy));
    if !dash.expenses_by_category.is_empty() {
        println!("{}", category_table(&dash.expenses_by_category, &ccy));
    }
    println!("Latest transactions");
    println!("{}", transactions_table(&dash.recent, &ccy));
    Ok(())
}

fn summary_table(s: &Summary, ccy: &str) -> Table {
    pretty_table(
        &["Balance", "Income", "Expense", "Savings rate"],
        vec![vec![
            fmt_money(&s.balance, ccy),
            fmt_money(&s.total_income, ccy),
            fmt_money(&s.total_expense, ccy),
            fmt_rate(&s.savings_rate),
        ]],
    )
}

fn monthly_table(rows: &[MonthlySummary], ccy: &str) -> Table {
    let data = rows
        .iter()
        .map(|r| {
            vec![
                r.month.clone(),
                fmt_money(&r.income, ccy),
                fmt_money(&r.expense, ccy),
                fmt_money(&r.balance, ccy),
                fmt_rate(&r.savings_rate),
            ]
        })
        .collect();
    pretty_table(
        &["Month", "Income", "Expense", "Balance", "Savings rate"],
        data,
    )
}

fn category_table(rows: &[CategoryBreakdown], ccy: &str) -> Table {
    let data = rows
        .iter()
        .map(|r| {
            vec![
                format!("{} {}", r.icon.as_deref().unwrap_or_default(), r.category)
                    .trim()
                    .to_string(),
                fmt_money(&r.total_amount, ccy),
                r.transaction_count.to_string(),
            ]
        })
        .collect();
    pretty_table(&["Category", "Total", "Transactions"], data)
}
