// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use anyhow::{Result, bail};
use rusqlite::Connection;

const KNOWN_KEYS: [&str; 1] = ["currency"];

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = known_key(sub.get_one::<String>("key").unwrap())?;
            let value = match key {
                "currency" => db::currency(conn)?,
                _ => db::get_setting(conn, key)?.unwrap_or_default(),
            };
            println!("{}", value);
        }
        Some(("set", sub)) => {
            let key = known_key(sub.get_one::<String>("key").unwrap())?;
            let value = sub.get_one::<String>("value").unwrap().trim();
            if value.is_empty() {
                bail!("Value for '{}' cannot be empty", key);
            }
            db::set_setting(conn, key, value)?;
            tracing::debug!(key, value, "setting changed");
            println!("{} = {}", key, value);
        }
        _ => {}
    }
    Ok(())
}

fn known_key(key: &str) -> Result<&'static str> {
    let key = key.trim();
    match KNOWN_KEYS.iter().find(|k| **k == key) {
        Some(k) => Ok(k),
        None => bail!("Unknown setting '{}' (known: {})", key, KNOWN_KEYS.join(", ")),
    }
}
