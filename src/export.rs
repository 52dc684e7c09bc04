// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::LedgerResult;
use crate::models::Transaction;
use serde::Serialize;
use std::io::Write;

pub const CSV_HEADER: [&str; 5] = ["date", "type", "category", "amount", "description"];

#[derive(Serialize)]
struct ExportRow<'a> {
    date: String,
    #[serde(rename = "type")]
    kind: &'a str,
    category: &'a str,
    amount: String,
    description: &'a str,
}

impl<'a> From<&'a Transaction> for ExportRow<'a> {
    fn from(t: &'a Transaction) -> Self {
        Self {
            date: t.date.to_string(),
            kind: t.kind.as_str(),
            category: &t.category,
            amount: t.amount.to_string(),
            description: t.description.as_deref().unwrap_or_default(),
        }
    }
}

/// Header row plus one record per transaction, in the given order.
pub fn write_csv<W: Write>(out: W, rows: &[Transaction]) -> LedgerResult<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(CSV_HEADER)?;
    for t in rows {
        let row = ExportRow::from(t);
        wtr.write_record([
            row.date.as_str(),
            row.kind,
            row.category,
            row.amount.as_str(),
            row.description,
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(mut out: W, rows: &[Transaction]) -> LedgerResult<()> {
    let items: Vec<ExportRow<'_>> = rows.iter().map(ExportRow::from).collect();
    serde_json::to_writer_pretty(&mut out, &items)?;
    writeln!(out)?;
    Ok(())
}
