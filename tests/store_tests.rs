// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use financeflow::db;
use financeflow::errors::{ErrorKind, LedgerError};
use financeflow::models::{Kind, TransactionInput};
use financeflow::store::{self, TransactionFilter};
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;
use std::thread;

fn setup() -> Connection {
    db::open_in_memory().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap()
}

#[test]
fn seeding_twice_keeps_thirteen_categories() {
    let conn = setup();
    assert_eq!(db::seed_categories(&conn).unwrap(), 0);
    db::init_schema(&conn).unwrap();
    let all = store::list_categories(&conn, None).unwrap();
    assert_eq!(all.len(), 13);
    assert_eq!(store::list_categories(&conn, Some(Kind::Income)).unwrap().len(), 5);
    assert_eq!(store::list_categories(&conn, Some(Kind::Expense)).unwrap().len(), 8);
}

#[test]
fn categories_ordered_by_kind_then_name() {
    let conn = setup();
    let names: Vec<String> = store::list_categories(&conn, None)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names.first().map(String::as_str), Some("Education"));
    assert_eq!(names[7], "Transport");
    assert_eq!(names[8], "Freelance");
    assert_eq!(names.last().map(String::as_str), Some("Salary"));
}

#[test]
fn added_transaction_is_newest_row() {
    let mut conn = setup();
    let older = store::add_transaction(
        &mut conn,
        &TransactionInput::new(dec!(10), "expense", "Food", None, date("2024-01-01")),
    )
    .unwrap();
    let id = store::add_transaction(
        &mut conn,
        &TransactionInput::new(
            dec!(4500.75),
            "income",
            "Salary",
            Some("March salary"),
            date("2024-03-01"),
        ),
    )
    .unwrap();
    assert_ne!(id, older);

    let rows = store::get_transactions(&conn, &TransactionFilter::latest(1)).unwrap();
    assert_eq!(rows.len(), 1);
    let t = &rows[0];
    assert_eq!(t.id, id);
    assert_eq!(t.amount, dec!(4500.75));
    assert_eq!(t.kind, Kind::Income);
    assert_eq!(t.category, "Salary");
    assert_eq!(t.description.as_deref(), Some("March salary"));
    assert_eq!(t.date, date("2024-03-01"));
    assert_eq!(t.icon.as_deref(), Some("💼"));
    assert_eq!(t.color.as_deref(), Some("#22c55e"));
}

#[test]
fn invalid_input_writes_nothing() {
    let mut conn = setup();
    let err = store::add_transaction(
        &mut conn,
        &TransactionInput::new(dec!(0), "bogus", " ", None, date("2024-01-01")),
    )
    .unwrap_err();
    assert_eq!(
        err.violations(),
        [
            ErrorKind::AmountNotPositive,
            ErrorKind::InvalidKind,
            ErrorKind::MissingCategory
        ]
    );
    assert_eq!(count(&conn), 0);
}

#[test]
fn oversized_amount_is_rejected() {
    let mut conn = setup();
    let huge = Decimal::from_i128_with_scale(10i128.pow(27), 0);
    let err = store::add_transaction(
        &mut conn,
        &TransactionInput::new(huge, "expense", "Housing", None, date("2024-01-01")),
    )
    .unwrap_err();
    assert_eq!(err.violations(), [ErrorKind::AmountTooLarge]);
    assert_eq!(count(&conn), 0);
}

#[test]
fn description_is_stored_as_given() {
    let mut conn = setup();
    let padded = store::add_transaction(
        &mut conn,
        &TransactionInput::new(dec!(5), "expense", "Food", Some("  padded  "), date("2024-01-01")),
    )
    .unwrap();
    let blank = store::add_transaction(
        &mut conn,
        &TransactionInput::new(dec!(5), "expense", "Food", Some("   "), date("2024-01-01")),
    )
    .unwrap();
    let t = store::get_transaction(&conn, padded).unwrap().unwrap();
    assert_eq!(t.description.as_deref(), Some("  padded  "));
    let t = store::get_transaction(&conn, blank).unwrap().unwrap();
    assert_eq!(t.description, None);
}

#[test]
fn category_must_match_kind() {
    let mut conn = setup();
    let err = store::add_transaction(
        &mut conn,
        &TransactionInput::new(dec!(20), "expense", "Salary", None, date("2024-01-01")),
    )
    .unwrap_err();
    assert!(matches!(
        err.violations(),
        [ErrorKind::CategoryKindMismatch { expected: Kind::Expense, actual: Kind::Income, .. }]
    ));

    let err = store::add_transaction(
        &mut conn,
        &TransactionInput::new(dec!(20), "expense", "Yachts", None, date("2024-01-01")),
    )
    .unwrap_err();
    assert_eq!(err.violations(), [ErrorKind::UnknownCategory("Yachts".into())]);
    assert_eq!(count(&conn), 0);
}

#[test]
fn update_missing_id_changes_nothing() {
    let mut conn = setup();
    store::add_transaction(
        &mut conn,
        &TransactionInput::new(dec!(30), "expense", "Transport", None, date("2024-02-02")),
    )
    .unwrap();
    let before = store::get_transactions(&conn, &TransactionFilter::default()).unwrap();
    let updated = store::update_transaction(
        &mut conn,
        9999,
        &TransactionInput::new(dec!(99), "income", "Gift", None, date("2024-02-03")),
    )
    .unwrap();
    assert!(!updated);
    let after = store::get_transactions(&conn, &TransactionFilter::default()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn update_replaces_fields_and_keeps_identity() {
    let mut conn = setup();
    let id = store::add_transaction(
        &mut conn,
        &TransactionInput::new(dec!(30), "expense", "Transport", Some("bus"), date("2024-02-02")),
    )
    .unwrap();
    let original = store::get_transaction(&conn, id).unwrap().unwrap();

    let ok = store::update_transaction(
        &mut conn,
        id,
        &TransactionInput::new(dec!(80), "income", "Freelance", None, date("2024-02-05")),
    )
    .unwrap();
    assert!(ok);

    let t = store::get_transaction(&conn, id).unwrap().unwrap();
    assert_eq!(t.id, id);
    assert_eq!(t.created_at, original.created_at);
    assert_eq!(t.amount, dec!(80));
    assert_eq!(t.kind, Kind::Income);
    assert_eq!(t.category, "Freelance");
    assert_eq!(t.description, None);
    assert_eq!(t.date, date("2024-02-05"));
}

#[test]
fn update_is_validated_like_add() {
    let mut conn = setup();
    let id = store::add_transaction(
        &mut conn,
        &TransactionInput::new(dec!(30), "expense", "Food", None, date("2024-02-02")),
    )
    .unwrap();
    let err = store::update_transaction(
        &mut conn,
        id,
        &TransactionInput::new(dec!(-1), "expense", "Food", None, date("2024-02-02")),
    )
    .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert_eq!(
        store::get_transaction(&conn, id).unwrap().unwrap().amount,
        dec!(30)
    );
}

#[test]
fn delete_twice() {
    let mut conn = setup();
    let id = store::add_transaction(
        &mut conn,
        &TransactionInput::new(dec!(5), "expense", "Leisure", None, date("2024-04-04")),
    )
    .unwrap();
    assert!(store::delete_transaction(&conn, id).unwrap());
    assert!(!store::delete_transaction(&conn, id).unwrap());
    assert!(store::get_transaction(&conn, id).unwrap().is_none());
}

#[test]
fn ids_are_never_reused() {
    let mut conn = setup();
    let input = TransactionInput::new(dec!(5), "expense", "Leisure", None, date("2024-04-04"));
    let first = store::add_transaction(&mut conn, &input).unwrap();
    store::delete_transaction(&conn, first).unwrap();
    let second = store::add_transaction(&mut conn, &input).unwrap();
    assert!(second > first);
}

#[test]
fn date_range_filter_is_inclusive() {
    let mut conn = setup();
    for d in ["2024-01-05", "2024-02-10", "2024-03-20"] {
        store::add_transaction(
            &mut conn,
            &TransactionInput::new(dec!(10), "expense", "Food", None, date(d)),
        )
        .unwrap();
    }
    let filter = TransactionFilter::between(Some(date("2024-02-01")), Some(date("2024-02-28")));
    let rows = store::get_transactions(&conn, &filter).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, date("2024-02-10"));
}

#[test]
fn filters_combine_and_limit_applies_last() {
    let mut conn = setup();
    let rows = [
        (dec!(10), "expense", "Food", "2024-01-01"),
        (dec!(20), "expense", "Food", "2024-01-03"),
        (dec!(30), "expense", "Transport", "2024-01-04"),
        (dec!(40), "income", "Salary", "2024-01-05"),
        (dec!(50), "expense", "Food", "2024-01-02"),
    ];
    for (amount, kind, cat, d) in rows {
        store::add_transaction(&mut conn, &TransactionInput::new(amount, kind, cat, None, date(d)))
            .unwrap();
    }
    let filter = TransactionFilter {
        kind: Some(Kind::Expense),
        category: Some("Food".into()),
        limit: Some(2),
        ..TransactionFilter::default()
    };
    let got: Vec<_> = store::get_transactions(&conn, &filter)
        .unwrap()
        .into_iter()
        .map(|t| t.date.to_string())
        .collect();
    assert_eq!(got, ["2024-01-03", "2024-01-02"]);
}

#[test]
fn oversized_limit_returns_everything() {
    let mut conn = setup();
    for d in ["2024-01-01", "2024-01-02", "2024-01-03"] {
        store::add_transaction(
            &mut conn,
            &TransactionInput::new(dec!(1), "expense", "Food", None, date(d)),
        )
        .unwrap();
    }
    let rows = store::get_transactions(&conn, &TransactionFilter::latest(usize::MAX)).unwrap();
    assert_eq!(rows.len(), 3);
}

#[test]
fn same_day_rows_newest_first() {
    let mut conn = setup();
    let a = store::add_transaction(
        &mut conn,
        &TransactionInput::new(dec!(1), "expense", "Food", None, date("2024-05-05")),
    )
    .unwrap();
    let b = store::add_transaction(
        &mut conn,
        &TransactionInput::new(dec!(2), "expense", "Food", None, date("2024-05-05")),
    )
    .unwrap();
    let ids: Vec<i64> = store::get_transactions(&conn, &TransactionFilter::default())
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, [b, a]);
}

#[test]
fn user_categories_are_additive() {
    let mut conn = setup();
    let cat = store::add_category(&mut conn, " Pets ", "expense", None, Some("🐶")).unwrap();
    assert_eq!(cat.name, "Pets");
    assert_eq!(cat.color, store::DEFAULT_COLOR);
    assert_eq!(store::list_categories(&conn, None).unwrap().len(), 14);

    let dup = store::add_category(&mut conn, "Pets", "expense", None, None).unwrap_err();
    assert_eq!(dup.violations(), [ErrorKind::DuplicateCategory("Pets".into())]);

    let bad = store::add_category(&mut conn, "", "other", None, None).unwrap_err();
    assert_eq!(
        bad.violations(),
        [ErrorKind::MissingCategory, ErrorKind::InvalidKind]
    );

    store::add_transaction(
        &mut conn,
        &TransactionInput::new(dec!(12), "expense", "Pets", None, date("2024-01-01")),
    )
    .unwrap();
}

#[test]
fn budgets_upsert_per_category_and_month() {
    let mut conn = setup();
    store::set_budget(&mut conn, "Food", dec!(500), "2024-03").unwrap();
    store::set_budget(&mut conn, "Food", dec!(650), "2024-03").unwrap();
    store::set_budget(&mut conn, "Housing", dec!(0), "2024-04").unwrap();

    let march = store::list_budgets(&conn, Some("2024-03")).unwrap();
    assert_eq!(march.len(), 1);
    assert_eq!(march[0].amount, dec!(650));

    let all = store::list_budgets(&conn, None).unwrap();
    assert_eq!(all[0].month_year, "2024-04");

    let err = store::set_budget(&mut conn, "Food", dec!(-1), "2024-13").unwrap_err();
    assert_eq!(
        err.violations(),
        [ErrorKind::NegativeBudget, ErrorKind::InvalidMonth("2024-13".into())]
    );
    let err = store::set_budget(&mut conn, "Boats", dec!(1), "2024-03").unwrap_err();
    assert_eq!(err.violations(), [ErrorKind::UnknownCategory("Boats".into())]);
}

#[test]
fn file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("ledger.sqlite");
    {
        let mut conn = db::open_or_init(&path).unwrap();
        store::add_transaction(
            &mut conn,
            &TransactionInput::new(dec!(7.25), "expense", "Health", None, date("2024-06-01")),
        )
        .unwrap();
    }
    let conn = db::open_or_init(&path).unwrap();
    assert_eq!(count(&conn), 1);
    assert_eq!(store::list_categories(&conn, None).unwrap().len(), 13);
}

#[test]
fn concurrent_adds_get_distinct_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");
    db::open_or_init(&path).unwrap();

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let path = path.clone();
            thread::spawn(move || {
                let mut conn = db::open_or_init(&path).unwrap();
                (0..25)
                    .map(|_| {
                        store::add_transaction(
                            &mut conn,
                            &TransactionInput::new(
                                dec!(1),
                                "expense",
                                "Food",
                                None,
                                date("2024-01-01"),
                            ),
                        )
                        .unwrap()
                    })
                    .collect::<Vec<i64>>()
            })
        })
        .collect();
    let ids: Vec<i64> = workers
        .into_iter()
        .flat_map(|w| w.join().unwrap())
        .collect();

    let unique: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(ids.len(), 200);
    assert_eq!(unique.len(), 200);
    let conn = db::open_or_init(&path).unwrap();
    assert_eq!(count(&conn), 200);
}
