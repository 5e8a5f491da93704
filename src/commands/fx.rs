// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::db::{self, set_base_currency, set_fx_rate};
use crate::utils::{normalize_currency, parse_decimal, pretty_table};
use anyhow::{bail, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-base", sub)) => {
            let ccy = normalize_currency(sub.get_one::<String>("currency").unwrap())?;
            set_base_currency(conn, &ccy)?;
            println!("Base currency set to {}", ccy);
            if db::fx_rates(conn, &ccy)?.is_empty() {
                println!("No rates into {} configured yet; add them with `fx set-rate`", ccy);
            }
        }
        Some(("set-rate", sub)) => {
            let ccy = normalize_currency(sub.get_one::<String>("currency").unwrap())?;
            let rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
            if rate <= Decimal::ZERO {
                bail!("Rate must be positive, got {}", rate);
            }
            set_fx_rate(conn, &ccy, rate)?;
            println!("1 {} = {} {}", ccy, rate, Settings::load(conn)?.rates.reporting());
        }
        Some(("list", _)) => list_rates(conn)?,
        Some(("convert", sub)) => {
            let res = convert_amount(conn, sub)?;
            println!("{:.4}", res);
        }
        _ => {}
    }
    Ok(())
}

fn list_rates(conn: &Connection) -> Result<()> {
    let settings = Settings::load(conn)?;
    let base = settings.rates.reporting().to_string();
    let data: Vec<Vec<String>> = settings
        .rates
        .rates()
        .map(|(ccy, rate)| vec![ccy.to_string(), base.clone(), rate.to_string()])
        .collect();
    println!("{}", pretty_table(&["From", "To", "Rate"], data));
    Ok(())
}

/// Converts `--amount` in `--from` into the base currency.
pub fn convert_amount(conn: &Connection, sub: &clap::ArgMatches) -> Result<Decimal> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let from = normalize_currency(sub.get_one::<String>("from").unwrap())?;
    let settings = Settings::load(conn)?;
    Ok(settings.rates.convert(amount, &from)?)
}
