// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over a set of transactions: period summary, monthly
//! rollup and per-category breakdown. Nothing here touches storage.

use crate::models::{Kind, Transaction};
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub savings_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub month: String, // YYYY-MM
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub savings_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub total_amount: Decimal,
    pub transaction_count: usize,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Totals over the whole set. The savings rate is `balance / income * 100`
/// and is zero when there is no income; negative balances give negative rates.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let (total_income, total_expense) = split_totals(transactions.iter());
    let balance = total_income.saturating_sub(total_expense);
    let savings_rate = if total_income > Decimal::ZERO {
        rate(balance, total_income)
    } else {
        Decimal::ZERO
    };
    Summary {
        total_income,
        total_expense,
        balance,
        savings_rate,
    }
}

/// One row per calendar month, oldest first.
///
/// A month without income divides by one instead of zero, so its rate is
/// `balance * 100`. Existing reports depend on that number; it is not the
/// same rule as [`summarize`].
pub fn monthly_summary(transactions: &[Transaction]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();
    for t in transactions {
        let entry = months
            .entry((t.date.year(), t.date.month()))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.kind {
            Kind::Income => entry.0 = entry.0.saturating_add(t.amount),
            Kind::Expense => entry.1 = entry.1.saturating_add(t.amount),
        }
    }

    months
        .into_iter()
        .map(|((year, month), (income, expense))| {
            let balance = income.saturating_sub(expense);
            let denominator = if income.is_zero() { Decimal::ONE } else { income };
            MonthlySummary {
                month: format!("{:04}-{:02}", year, month),
                income,
                expense,
                balance,
                savings_rate: rate(balance, denominator).round_dp(1),
            }
        })
        .collect()
}

/// Per-category totals for one kind, largest first. Equal totals keep the
/// order in which their categories first appear in `transactions`.
pub fn category_analysis(transactions: &[Transaction], kind: Kind) -> Vec<CategoryBreakdown> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<CategoryBreakdown> = Vec::new();

    for t in transactions.iter().filter(|t| t.kind == kind) {
        let i = *index.entry(t.category.as_str()).or_insert_with(|| {
            rows.push(CategoryBreakdown {
                category: t.category.clone(),
                total_amount: Decimal::ZERO,
                transaction_count: 0,
                color: None,
                icon: None,
            });
            rows.len() - 1
        });
        let row = &mut rows[i];
        row.total_amount = row.total_amount.saturating_add(t.amount);
        row.transaction_count += 1;
        if row.color.is_none() {
            row.color = t.color.clone();
        }
        if row.icon.is_none() {
            row.icon = t.icon.clone();
        }
    }

    for row in rows.iter_mut() {
        row.total_amount = row.total_amount.round_dp(2);
    }
    rows.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
    rows
}

fn split_totals<'a>(iter: impl Iterator<Item = &'a Transaction>) -> (Decimal, Decimal) {
    iter.fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), t| match t.kind {
        Kind::Income => (inc.saturating_add(t.amount), exp),
        Kind::Expense => (inc, exp.saturating_add(t.amount)),
    })
}

/// `balance / denominator * 100`, clamped to the `Decimal` range.
/// `denominator` is always positive here.
fn rate(balance: Decimal, denominator: Decimal) -> Decimal {
    balance
        .checked_div(denominator)
        .and_then(|r| r.checked_mul(HUNDRED))
        .unwrap_or(if balance.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}
