// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result as AnyResult;
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{Error, Result};

pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap());
static CCY_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3}$").unwrap());

/// Parses a day-first `DD/MM/YYYY` date. Other shapes are rejected, not guessed.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    if !DATE_SHAPE.is_match(s) {
        return Err(Error::parse(format!(
            "Invalid date '{}', expected DD/MM/YYYY",
            s
        )));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| Error::parse(format!("Invalid date '{}': {}", s, e)))
}

pub fn fmt_date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_| Error::parse(format!("Invalid decimal '{}'", s.trim())))
}

/// Largest amount a single transaction leg may carry (10^12).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Parses one leg of a transaction. Blank means the leg does not apply.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    if s.trim().is_empty() {
        return Ok(Decimal::ZERO);
    }
    let d = parse_decimal(s)?;
    if d.is_sign_negative() && !d.is_zero() {
        return Err(Error::parse(format!(
            "Invalid amount '{}', amounts must not be negative",
            s.trim()
        )));
    }
    check_amount(d)
}

/// Amounts are whole cents no larger than [`MAX_AMOUNT`], which keeps every
/// sum and share the engines compute inside `Decimal` range.
pub fn check_amount(d: Decimal) -> Result<Decimal> {
    if d.normalize().scale() > 2 {
        return Err(Error::parse(format!(
            "Invalid amount '{}', at most two decimal places",
            d
        )));
    }
    if d.abs() > MAX_AMOUNT {
        return Err(Error::parse(format!(
            "Invalid amount '{}', larger than {}",
            d, MAX_AMOUNT
        )));
    }
    Ok(d)
}

pub fn normalize_currency(s: &str) -> Result<String> {
    let ccy = s.trim().to_uppercase();
    if !CCY_SHAPE.is_match(&ccy) {
        return Err(Error::validation(format!(
            "Invalid currency '{}', expected a three-letter code",
            s.trim()
        )));
    }
    Ok(ccy)
}

pub fn month_label(month: u32) -> &'static str {
    MONTHS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?")
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{:.2} {}", d.round_dp(2), ccy)
}

/// Renders a fraction as a percentage with two decimals.
pub fn fmt_pct(share: &Decimal) -> String {
    format!("{:.2}%", (share * Decimal::ONE_HUNDRED).round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> AnyResult<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
