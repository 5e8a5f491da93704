// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pfdash::commands::{accounts, categories};
use pfdash::config::Settings;
use pfdash::models::{AccountKind, CategoryKind};
use pfdash::{cli, db};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["pfdash"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("account", m)) => accounts::handle(conn, m),
        Some(("category", m)) => categories::handle(conn, m),
        _ => panic!("unexpected subcommand"),
    }
}

#[test]
fn registered_accounts_close_the_registry() {
    let conn = setup();
    run(&conn, &["account", "add", "--name", "sella", "--currency", "eur"]).unwrap();
    run(
        &conn,
        &["account", "add", "--name", "generali_SAV", "--type", "savings", "--currency", "EUR"],
    )
    .unwrap();

    let settings = Settings::load(&conn).unwrap();
    assert!(!settings.registry.is_open());
    let sella = settings.registry.get("sella").unwrap();
    assert_eq!(sella.kind, AccountKind::Bank);
    assert_eq!(sella.currency, "EUR");
    let excluded: Vec<String> = settings.registry.excluded_from_breakdown().into_iter().collect();
    assert_eq!(excluded, vec!["generali_SAV".to_string()]);

    run(&conn, &["account", "rm", "--name", "generali_SAV"]).unwrap();
    assert_eq!(db::accounts(&conn).unwrap().len(), 1);
}

#[test]
fn account_type_and_duplicate_names_are_rejected() {
    let conn = setup();
    assert!(run(&conn, &["account", "add", "--name", "x", "--type", "crypto", "--currency", "EUR"]).is_err());
    run(&conn, &["account", "add", "--name", "x", "--currency", "EUR"]).unwrap();
    assert!(run(&conn, &["account", "add", "--name", "x", "--currency", "GBP"]).is_err());
}

#[test]
fn categories_are_stored_with_kind() {
    let conn = setup();
    run(&conn, &["category", "add", "--name", "salary", "--kind", "income"]).unwrap();
    run(&conn, &["category", "add", "--name", "needs", "--kind", "expense"]).unwrap();
    assert!(run(&conn, &["category", "add", "--name", "odd", "--kind", "other"]).is_err());

    let cats = db::categories(&conn).unwrap();
    let names: Vec<&str> = cats.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["needs", "salary"]);
    assert_eq!(cats[1].kind, CategoryKind::Income);
}
