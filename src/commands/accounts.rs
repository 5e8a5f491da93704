// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::AccountKind;
use crate::utils::{normalize_currency, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let kind: AccountKind = sub.get_one::<String>("type").unwrap().parse()?;
            let ccy = normalize_currency(sub.get_one::<String>("currency").unwrap())?;
            conn.execute(
                "INSERT INTO accounts(name, type, currency) VALUES (?1, ?2, ?3)",
                params![name, kind.to_string(), ccy],
            )?;
            println!("Added account '{}' ({}, {})", name, kind, ccy);
        }
        Some(("list", _)) => {
            let data: Vec<Vec<String>> = db::accounts(conn)?
                .into_iter()
                .map(|a| vec![a.name, a.kind.to_string(), a.currency])
                .collect();
            println!("{}", pretty_table(&["Name", "Type", "Currency"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            conn.execute("DELETE FROM accounts WHERE name=?1", params![name])?;
            println!("Removed account '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
