// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

use crate::fx::DEFAULT_REPORTING_CURRENCY;
use crate::models::{Account, Category};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Pfdash", "pfdash"));

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.to_path_buf())
}

pub fn db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("pfdash.sqlite"))
}

pub fn default_ledger_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("ledger.csv"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn = Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS accounts(
        name TEXT PRIMARY KEY,
        type TEXT NOT NULL,
        currency TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS categories(
        name TEXT PRIMARY KEY,
        kind TEXT NOT NULL
    );

    -- multiplier converting one unit of currency into base
    CREATE TABLE IF NOT EXISTS fx_rates(
        base TEXT NOT NULL,
        currency TEXT NOT NULL,
        rate TEXT NOT NULL,
        PRIMARY KEY(base, currency)
    );
    INSERT OR IGNORE INTO fx_rates(base, currency, rate) VALUES ('EUR', 'GBP', '1.19');
    "#,
    )?;
    Ok(())
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn get_base_currency(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, "base_currency")?.unwrap_or_else(|| DEFAULT_REPORTING_CURRENCY.to_string()))
}

pub fn set_base_currency(conn: &Connection, ccy: &str) -> Result<()> {
    set_setting(conn, "base_currency", ccy)
}

/// Rates into `base`. Rates stored against another base are not returned.
pub fn fx_rates(conn: &Connection, base: &str) -> Result<Vec<(String, Decimal)>> {
    let mut stmt =
        conn.prepare("SELECT currency, rate FROM fx_rates WHERE base=?1 ORDER BY currency")?;
    let rows = stmt.query_map(params![base], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?;
    let mut out = Vec::new();
    for row in rows {
        let (ccy, s) = row?;
        let rate = s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid rate '{}' for {}", s, ccy))?;
        out.push((ccy, rate));
    }
    Ok(out)
}

/// Stores `rate` as the multiplier from `ccy` into the current base currency.
pub fn set_fx_rate(conn: &Connection, ccy: &str, rate: Decimal) -> Result<()> {
    let base = get_base_currency(conn)?;
    conn.execute(
        "INSERT INTO fx_rates(base, currency, rate) VALUES (?1, ?2, ?3)
         ON CONFLICT(base, currency) DO UPDATE SET rate=excluded.rate",
        params![base, ccy, rate.to_string()],
    )?;
    Ok(())
}

pub fn accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare("SELECT name, type, currency FROM accounts ORDER BY name")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (name, kind, currency) = row?;
        out.push(Account {
            kind: kind
                .parse()
                .with_context(|| format!("Account '{}' has an invalid type", name))?,
            name,
            currency,
        });
    }
    Ok(out)
}

pub fn categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT name, kind FROM categories ORDER BY name")?;
    let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?;
    let mut out = Vec::new();
    for row in rows {
        let (name, kind) = row?;
        out.push(Category {
            kind: kind
                .parse()
                .with_context(|| format!("Category '{}' has an invalid kind", name))?,
            name,
        });
    }
    Ok(out)
}
