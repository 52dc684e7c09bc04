// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Input checks run before any ledger mutation. Pure: no I/O.

use crate::errors::ErrorKind;
use crate::models::Kind;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

/// Largest amount a single transaction may carry: 1,000,000,000,000,000.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Check a transaction against today's local date. Returns every violated
/// rule, in rule order, or an empty vector when the input is valid.
pub fn validate(amount: Decimal, kind: &str, category: &str, date: NaiveDate) -> Vec<ErrorKind> {
    validate_at(amount, kind, category, date, Local::now().date_naive())
}

/// Same as [`validate`] with an explicit "today".
pub fn validate_at(
    amount: Decimal,
    kind: &str,
    category: &str,
    date: NaiveDate,
    today: NaiveDate,
) -> Vec<ErrorKind> {
    let mut errors = Vec::new();
    if amount <= Decimal::ZERO {
        errors.push(ErrorKind::AmountNotPositive);
    } else if amount > MAX_AMOUNT {
        errors.push(ErrorKind::AmountTooLarge);
    }
    if kind.parse::<Kind>().is_err() {
        errors.push(ErrorKind::InvalidKind);
    }
    if category.trim().is_empty() {
        errors.push(ErrorKind::MissingCategory);
    }
    if date > today {
        errors.push(ErrorKind::FutureDate);
    }
    errors
}
