// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Durable storage for transactions, categories and budgets.
//!
//! Every mutation runs inside an immediate SQLite transaction so the
//! category check and the write land together or not at all.

use crate::errors::{ErrorKind, LedgerError, LedgerResult};
use crate::models::{Budget, Category, Kind, Transaction, TransactionInput};
use crate::validation::validate;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};
use rust_decimal::Decimal;

// Fixed width so TEXT ordering matches time ordering.
const CREATED_AT_WRITE: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";
const CREATED_AT_READ: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

pub const DEFAULT_COLOR: &str = "#6b7280";
pub const DEFAULT_ICON: &str = "💰";

/// Conjunctive filters for [`get_transactions`]. Dates are inclusive.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<Kind>,
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn between(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start_date: start,
            end_date: end,
            ..Self::default()
        }
    }

    pub fn latest(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }
}

pub fn add_transaction(conn: &mut Connection, input: &TransactionInput) -> LedgerResult<i64> {
    let kind = checked_kind(input)?;
    let category = input.category.trim();
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    check_category(&tx, category, kind)?;
    let created_at = Utc::now().format(CREATED_AT_WRITE).to_string();
    tx.execute(
        "INSERT INTO transactions(amount, type, category, description, date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            input.amount.to_string(),
            kind.as_str(),
            category,
            clean_description(input.description.as_deref()),
            input.date.to_string(),
            created_at
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;
    tracing::debug!(id, %kind, category, amount = %input.amount, "transaction added");
    Ok(id)
}

/// Replace every mutable field of `id`. `Ok(false)` when the id does not exist.
pub fn update_transaction(
    conn: &mut Connection,
    id: i64,
    input: &TransactionInput,
) -> LedgerResult<bool> {
    let kind = checked_kind(input)?;
    let category = input.category.trim();
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let exists = tx
        .query_row(
            "SELECT 1 FROM transactions WHERE id=?1",
            params![id],
            |r| r.get::<_, i64>(0),
        )
        .optional()?
        .is_some();
    if !exists {
        tracing::debug!(id, "update skipped, no such transaction");
        return Ok(false);
    }
    check_category(&tx, category, kind)?;
    tx.execute(
        "UPDATE transactions SET amount=?1, type=?2, category=?3, description=?4, date=?5
         WHERE id=?6",
        params![
            input.amount.to_string(),
            kind.as_str(),
            category,
            clean_description(input.description.as_deref()),
            input.date.to_string(),
            id
        ],
    )?;
    tx.commit()?;
    tracing::debug!(id, %kind, category, "transaction updated");
    Ok(true)
}

pub fn delete_transaction(conn: &Connection, id: i64) -> LedgerResult<bool> {
    let removed = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    tracing::debug!(id, removed, "transaction delete");
    Ok(removed > 0)
}

pub fn get_transaction(conn: &Connection, id: i64) -> LedgerResult<Option<Transaction>> {
    let sql = format!("{} WHERE t.id=?1", SELECT_TRANSACTIONS);
    let row = conn
        .query_row(&sql, params![id], transaction_from_row)
        .optional()?;
    Ok(row)
}

const SELECT_TRANSACTIONS: &str = "SELECT t.id, t.amount, t.type, t.category, t.description, t.date, t.created_at, c.color, c.icon
     FROM transactions t LEFT JOIN categories c ON t.category=c.name";

/// Most recent first: date, then creation time, then id, all descending.
pub fn get_transactions(
    conn: &Connection,
    filter: &TransactionFilter,
) -> LedgerResult<Vec<Transaction>> {
    let mut sql = format!("{} WHERE 1=1", SELECT_TRANSACTIONS);
    let mut args: Vec<Value> = Vec::new();

    if let Some(kind) = filter.kind {
        sql.push_str(" AND t.type=?");
        args.push(Value::Text(kind.as_str().into()));
    }
    if let Some(cat) = filter.category.as_deref() {
        sql.push_str(" AND t.category=?");
        args.push(Value::Text(cat.trim().into()));
    }
    if let Some(start) = filter.start_date {
        sql.push_str(" AND t.date>=?");
        args.push(Value::Text(start.to_string()));
    }
    if let Some(end) = filter.end_date {
        sql.push_str(" AND t.date<=?");
        args.push(Value::Text(end.to_string()));
    }
    sql.push_str(" ORDER BY t.date DESC, t.created_at DESC, t.id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        args.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(args.iter()), transaction_from_row)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

/// All categories, optionally of one kind, ordered by (kind, name).
pub fn list_categories(conn: &Connection, kind: Option<Kind>) -> LedgerResult<Vec<Category>> {
    let mut data = Vec::new();
    match kind {
        Some(k) => {
            let mut stmt = conn.prepare(
                "SELECT id, name, type, color, icon FROM categories WHERE type=?1 ORDER BY type, name",
            )?;
            for row in stmt.query_map(params![k.as_str()], category_from_row)? {
                data.push(row?);
            }
        }
        None => {
            let mut stmt = conn
                .prepare("SELECT id, name, type, color, icon FROM categories ORDER BY type, name")?;
            for row in stmt.query_map([], category_from_row)? {
                data.push(row?);
            }
        }
    }
    Ok(data)
}

pub fn find_category(conn: &Connection, name: &str) -> LedgerResult<Option<Category>> {
    let cat = conn
        .query_row(
            "SELECT id, name, type, color, icon FROM categories WHERE name=?1",
            params![name.trim()],
            category_from_row,
        )
        .optional()?;
    Ok(cat)
}

/// Create a user category. Categories are additive only.
pub fn add_category(
    conn: &mut Connection,
    name: &str,
    kind: &str,
    color: Option<&str>,
    icon: Option<&str>,
) -> LedgerResult<Category> {
    let name = name.trim();
    let mut errors = Vec::new();
    if name.is_empty() {
        errors.push(ErrorKind::MissingCategory);
    }
    let parsed = kind.parse::<Kind>();
    if parsed.is_err() {
        errors.push(ErrorKind::InvalidKind);
    }
    let kind = match parsed {
        Ok(k) if errors.is_empty() => k,
        _ => return Err(LedgerError::Validation(errors)),
    };
    let color = color.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_COLOR);
    let icon = icon.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_ICON);

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    if find_category(&tx, name)?.is_some() {
        return Err(LedgerError::Validation(vec![ErrorKind::DuplicateCategory(
            name.to_string(),
        )]));
    }
    tx.execute(
        "INSERT INTO categories(name, type, color, icon) VALUES (?1, ?2, ?3, ?4)",
        params![name, kind.as_str(), color, icon],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;
    tracing::debug!(id, name, %kind, "category added");
    Ok(Category {
        id,
        name: name.to_string(),
        kind,
        color: color.to_string(),
        icon: icon.to_string(),
    })
}

/// Upsert the budget of `category` for `month_year` (YYYY-MM).
pub fn set_budget(
    conn: &mut Connection,
    category: &str,
    amount: Decimal,
    month_year: &str,
) -> LedgerResult<Budget> {
    let category = category.trim();
    let month_year = month_year.trim();
    let mut errors = Vec::new();
    if amount < Decimal::ZERO {
        errors.push(ErrorKind::NegativeBudget);
    }
    if !is_month(month_year) {
        errors.push(ErrorKind::InvalidMonth(month_year.to_string()));
    }
    if !errors.is_empty() {
        return Err(LedgerError::Validation(errors));
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    if find_category(&tx, category)?.is_none() {
        return Err(LedgerError::Validation(vec![ErrorKind::UnknownCategory(
            category.to_string(),
        )]));
    }
    tx.execute(
        "INSERT INTO budgets(category, amount, month_year) VALUES (?1, ?2, ?3)
         ON CONFLICT(category, month_year) DO UPDATE SET amount=excluded.amount",
        params![category, amount.to_string(), month_year],
    )?;
    let id: i64 = tx.query_row(
        "SELECT id FROM budgets WHERE category=?1 AND month_year=?2",
        params![category, month_year],
        |r| r.get(0),
    )?;
    tx.commit()?;
    tracing::debug!(id, category, month_year, "budget set");
    Ok(Budget {
        id,
        category: category.to_string(),
        amount,
        month_year: month_year.to_string(),
    })
}

pub fn list_budgets(conn: &Connection, month_year: Option<&str>) -> LedgerResult<Vec<Budget>> {
    let map = |r: &Row<'_>| -> rusqlite::Result<Budget> {
        Ok(Budget {
            id: r.get(0)?,
            category: r.get(1)?,
            amount: decimal_column(r, 2)?,
            month_year: r.get(3)?,
        })
    };
    let mut data = Vec::new();
    if let Some(m) = month_year {
        let mut stmt = conn.prepare(
            "SELECT id, category, amount, month_year FROM budgets WHERE month_year=?1 ORDER BY category",
        )?;
        for row in stmt.query_map(params![m.trim()], map)? {
            data.push(row?);
        }
    } else {
        let mut stmt = conn.prepare(
            "SELECT id, category, amount, month_year FROM budgets ORDER BY month_year DESC, category",
        )?;
        for row in stmt.query_map([], map)? {
            data.push(row?);
        }
    }
    Ok(data)
}

fn checked_kind(input: &TransactionInput) -> LedgerResult<Kind> {
    let errors = validate(input.amount, &input.kind, &input.category, input.date);
    if !errors.is_empty() {
        tracing::warn!(?errors, "transaction rejected");
        return Err(LedgerError::Validation(errors));
    }
    input
        .kind
        .parse::<Kind>()
        .map_err(|_| LedgerError::Validation(vec![ErrorKind::InvalidKind]))
}

fn check_category(conn: &Connection, name: &str, kind: Kind) -> LedgerResult<()> {
    let violation = match find_category(conn, name)? {
        None => ErrorKind::UnknownCategory(name.to_string()),
        Some(cat) if cat.kind != kind => ErrorKind::CategoryKindMismatch {
            category: cat.name,
            expected: kind,
            actual: cat.kind,
        },
        Some(_) => return Ok(()),
    };
    tracing::warn!(%violation, "transaction rejected");
    Err(LedgerError::Validation(vec![violation]))
}

/// Blank descriptions become NULL; anything else is stored as given.
fn clean_description(desc: Option<&str>) -> Option<&str> {
    desc.filter(|s| !s.trim().is_empty())
}

fn is_month(s: &str) -> bool {
    s.len() == 7 && NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d").is_ok()
}

fn transaction_from_row(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        amount: decimal_column(r, 1)?,
        kind: kind_column(r, 2)?,
        category: r.get(3)?,
        description: r.get(4)?,
        date: r.get::<_, NaiveDate>(5)?,
        created_at: created_at_column(r, 6)?,
        color: r.get(7)?,
        icon: r.get(8)?,
    })
}

fn category_from_row(r: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: r.get(0)?,
        name: r.get(1)?,
        kind: kind_column(r, 2)?,
        color: r.get(3)?,
        icon: r.get(4)?,
    })
}

fn decimal_column(r: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = r.get(idx)?;
    raw.parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn kind_column(r: &Row<'_>, idx: usize) -> rusqlite::Result<Kind> {
    let raw: String = r.get(idx)?;
    raw.parse::<Kind>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

fn created_at_column(r: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = r.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, CREATED_AT_READ)
        .map(|n| n.and_utc())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
