// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DB_ENV: &str = "FINANCEFLOW_DB";
pub const DEFAULT_CURRENCY: &str = "R$";

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "FinanceFlow", "financeflow"));

/// (name, kind, color, icon)
pub const SEED_CATEGORIES: [(&str, &str, &str, &str); 13] = [
    ("Salary", "income", "#22c55e", "💼"),
    ("Freelance", "income", "#10b981", "👨‍💻"),
    ("Investments", "income", "#059669", "📈"),
    ("Gift", "income", "#65a30d", "🎁"),
    ("Other Income", "income", "#16a34a", "💰"),
    ("Food", "expense", "#ef4444", "🍕"),
    ("Transport", "expense", "#f97316", "🚗"),
    ("Housing", "expense", "#dc2626", "🏠"),
    ("Leisure", "expense", "#eab308", "🎮"),
    ("Health", "expense", "#d97706", "🏥"),
    ("Education", "expense", "#9333ea", "📚"),
    ("Shopping", "expense", "#ec4899", "🛍️"),
    ("Other Expenses", "expense", "#6b7280", "💸"),
];

/// Resolve the database file: explicit path, then `FINANCEFLOW_DB`, then the
/// platform data dir.
pub fn db_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    if let Some(p) = std::env::var_os(DB_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("financeflow.sqlite"))
}

pub fn open_or_init(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    conn.busy_timeout(Duration::from_secs(5))?;
    init_schema(&conn)?;
    seed_categories(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    seed_categories(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        color TEXT NOT NULL,
        icon TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        amount TEXT NOT NULL CHECK(CAST(amount AS REAL) > 0),
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        category TEXT NOT NULL,
        description TEXT,
        date TEXT NOT NULL,
        created_at TEXT NOT NULL,
        FOREIGN KEY(category) REFERENCES categories(name)
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    CREATE TABLE IF NOT EXISTS budgets(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        category TEXT NOT NULL,
        amount TEXT NOT NULL CHECK(CAST(amount AS REAL) >= 0),
        month_year TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE(category, month_year),
        FOREIGN KEY(category) REFERENCES categories(name)
    );
    "#,
    )?;
    tracing::debug!("schema ensured");
    Ok(())
}

/// Insert the fixed seed set; existing names are left untouched.
pub fn seed_categories(conn: &Connection) -> rusqlite::Result<usize> {
    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO categories(name, type, color, icon) VALUES (?1, ?2, ?3, ?4)",
    )?;
    let mut inserted = 0;
    for (name, kind, color, icon) in SEED_CATEGORIES {
        inserted += stmt.execute(params![name, kind, color, icon])?;
    }
    if inserted > 0 {
        tracing::debug!(inserted, "seeded default categories");
    }
    Ok(inserted)
}

pub fn get_setting(conn: &Connection, key: &str) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM settings WHERE key=?1",
        params![key],
        |r| r.get(0),
    )
    .optional()
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Display prefix for money amounts.
pub fn currency(conn: &Connection) -> rusqlite::Result<String> {
    Ok(get_setting(conn, "currency")?.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
}
