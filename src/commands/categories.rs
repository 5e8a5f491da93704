// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::CategoryKind;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let kind: CategoryKind = sub.get_one::<String>("kind").unwrap().parse()?;
            conn.execute(
                "INSERT INTO categories(name, kind) VALUES (?1, ?2)",
                params![name, kind.to_string()],
            )?;
            println!("Added {} category '{}'", kind, name);
        }
        Some(("list", _)) => {
            let data: Vec<Vec<String>> = db::categories(conn)?
                .into_iter()
                .map(|c| vec![c.name, c.kind.to_string()])
                .collect();
            println!("{}", pretty_table(&["Name", "Kind"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            conn.execute("DELETE FROM categories WHERE name=?1", params![name])?;
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
