// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Days, Local, NaiveDate};
use financeflow::errors::ErrorKind;
use financeflow::validation::{validate, validate_at};
use rust_decimal_macros::dec;

#[test]
fn negative_amount_is_the_only_violation() {
    let today = Local::now().date_naive();
    assert_eq!(
        validate(dec!(-5), "income", "Salary", today),
        vec![ErrorKind::AmountNotPositive]
    );
}

#[test]
fn every_rule_is_reported_together() {
    let tomorrow = Local::now().date_naive().checked_add_days(Days::new(1)).unwrap();
    assert_eq!(
        validate(dec!(0), "bogus", "", tomorrow),
        vec![
            ErrorKind::AmountNotPositive,
            ErrorKind::InvalidKind,
            ErrorKind::MissingCategory,
            ErrorKind::FutureDate,
        ]
    );
}

#[test]
fn valid_input_has_no_violations() {
    let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
    let yesterday = NaiveDate::from_ymd_opt(2024, 5, 9).unwrap();
    assert!(validate_at(dec!(0.01), "expense", "Food", yesterday, today).is_empty());
}

#[test]
fn future_is_strictly_after_today() {
    let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
    let next = NaiveDate::from_ymd_opt(2024, 5, 11).unwrap();
    assert!(validate_at(dec!(1), "income", "Gift", today, today).is_empty());
    assert_eq!(
        validate_at(dec!(1), "income", "Gift", next, today),
        vec![ErrorKind::FutureDate]
    );
}
