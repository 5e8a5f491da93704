// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pfdash::config::Settings;
use pfdash::models::RawRow;
use pfdash::wealth::total_wealth;
use pfdash::{cli, commands::fx, db, normalize};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn convert(conn: &Connection, amount: &str, from: &str) -> anyhow::Result<Decimal> {
    let matches = cli::build_cli().get_matches_from([
        "pfdash", "fx", "convert", "--amount", amount, "--from", from,
    ]);
    let Some(("fx", fx_m)) = matches.subcommand() else {
        panic!("no fx subcommand");
    };
    let Some(("convert", sub)) = fx_m.subcommand() else {
        panic!("no convert subcommand");
    };
    fx::convert_amount(conn, sub)
}

#[test]
fn fresh_database_reports_in_eur_with_seeded_gbp_rate() {
    let conn = setup();
    let settings = Settings::load(&conn).unwrap();
    assert_eq!(settings.rates.reporting(), "EUR");
    assert_eq!(settings.rates.rate("GBP"), Some(Decimal::new(119, 2)));
    assert_eq!(settings.rates.rate("EUR"), Some(Decimal::ONE));
    assert!(settings.registry.is_open());
}

#[test]
fn convert_uses_stored_rate() {
    let conn = setup();
    let res = convert(&conn, "100", "gbp").unwrap();
    assert_eq!(format!("{:.2}", res), "119.00");

    db::set_fx_rate(&conn, "GBP", Decimal::new(115, 2)).unwrap();
    let res = convert(&conn, "100", "GBP").unwrap();
    assert_eq!(format!("{:.2}", res), "115.00");
}

#[test]
fn convert_without_rate_fails() {
    let conn = setup();
    assert!(convert(&conn, "10", "USD").is_err());
    db::set_fx_rate(&conn, "USD", Decimal::new(92, 2)).unwrap();
    assert_eq!(convert(&conn, "10", "USD").unwrap(), Decimal::new(920, 2));
}

#[test]
fn base_currency_setting_round_trips() {
    let conn = setup();
    db::set_base_currency(&conn, "GBP").unwrap();
    assert_eq!(db::get_base_currency(&conn).unwrap(), "GBP");
    let settings = Settings::load(&conn).unwrap();
    assert_eq!(settings.rates.reporting(), "GBP");
    assert_eq!(settings.rates.rate("GBP"), Some(Decimal::ONE));
}

#[test]
fn rates_stay_with_the_base_they_were_set_for() {
    let conn = setup();
    let ledger = normalize(vec![RawRow {
        date: "01/01/2024".into(),
        account: "revolut_GBP".into(),
        category: "salary".into(),
        description: String::new(),
        currency: "GBP".into(),
        amount_in: "100".into(),
        amount_out: String::new(),
    }])
    .unwrap();

    db::set_base_currency(&conn, "USD").unwrap();
    let settings = Settings::load(&conn).unwrap();
    assert_eq!(settings.rates.rate("GBP"), None);
    assert!(matches!(
        total_wealth(&ledger, &settings.rates),
        Err(pfdash::Error::Validation(_))
    ));

    db::set_fx_rate(&conn, "GBP", Decimal::new(127, 2)).unwrap();
    let usd = Settings::load(&conn).unwrap();
    assert_eq!(total_wealth(&ledger, &usd.rates).unwrap().total, Decimal::new(12700, 2));

    db::set_base_currency(&conn, "EUR").unwrap();
    let eur = Settings::load(&conn).unwrap();
    assert_eq!(total_wealth(&ledger, &eur.rates).unwrap().total, Decimal::new(11900, 2));
}
