// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::query_rows;
use crate::export::{write_csv, write_json};
use crate::utils::{opt_str, surface};
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use std::fs::File;
use std::io::{self, BufWriter, Write};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }
    let rows = query_rows(conn, sub)?;

    let out: Box<dyn Write> = match opt_str(sub, "out") {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Create {}", path))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    match fmt.as_str() {
        "csv" => surface(write_csv(out, &rows))?,
        _ => surface(write_json(out, &rows))?,
    }
    if let Some(path) = opt_str(sub, "out") {
        eprintln!("Exported {} transactions to {}", rows.len(), path);
    }
    Ok(())
}
