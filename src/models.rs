// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Income or expense classification shared by transactions and categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Kind::Income),
            "expense" => Ok(Kind::Expense),
            other => Err(format!("unknown kind '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub kind: Kind,
    pub color: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub kind: Kind,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    // Joined from the category row at read time.
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Caller-supplied fields for add/update. `kind` stays raw text until validated.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    pub amount: Decimal,
    pub kind: String,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl TransactionInput {
    pub fn new(
        amount: Decimal,
        kind: impl Into<String>,
        category: impl Into<String>,
        description: Option<&str>,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            kind: kind.into(),
            category: category.into(),
            description: description.map(|s| s.to_string()),
            date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub amount: Decimal,
    pub month_year: String, // YYYY-MM
}
