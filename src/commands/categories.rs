// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{maybe_print_json, opt_str, parse_kind, pretty_table, surface};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let kind = sub.get_one::<String>("type").unwrap();
            let cat = surface(store::add_category(
                conn,
                name,
                kind,
                opt_str(sub, "color"),
                opt_str(sub, "icon"),
            ))?;
            println!("Added {} category {} '{}'", cat.kind, cat.icon, cat.name);
        }
        Some(("list", sub)) => {
            let kind = opt_str(sub, "type").map(parse_kind).transpose()?;
            let cats = surface(store::list_categories(conn, kind))?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let data = cats
                    .into_iter()
                    .map(|c| vec![c.kind.to_string(), format!("{} {}", c.icon, c.name), c.color])
                    .collect();
                println!("{}", pretty_table(&["Type", "Category", "Color"], data));
            }
        }
        _ => {}
    }
    Ok(())
}
