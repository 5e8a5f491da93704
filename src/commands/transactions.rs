// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::ledger::{Ledger, LedgerFilter, View};
use crate::models::{TransactionInput, TxId};
use crate::store::{Backend, LedgerStore};
use crate::utils::{fmt_date, maybe_print_json, parse_amount, pretty_table};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

pub fn handle<B: Backend>(
    store: &mut LedgerStore<B>,
    settings: &Settings,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            add(store, settings, sub)?;
        }
        Some(("list", sub)) => list(store.ledger(), sub)?,
        Some(("edit", sub)) => {
            edit(store, settings, sub)?;
        }
        Some(("rm", sub)) => {
            remove(store, sub)?;
        }
        _ => {}
    }
    Ok(())
}

/// Overlays whichever field flags were given on top of `base`.
fn apply_fields(sub: &clap::ArgMatches, mut base: TransactionInput) -> Result<TransactionInput> {
    let text = |id: &str| sub.get_one::<String>(id).map(|s| s.trim().to_string());
    if let Some(v) = text("date") {
        base.date = v;
    }
    if let Some(v) = text("account") {
        base.account = v;
    }
    if let Some(v) = text("category") {
        base.category = v;
    }
    if let Some(v) = text("description") {
        base.description = Some(v);
    }
    if let Some(v) = text("currency") {
        base.currency = v;
    }
    if let Some(v) = text("in") {
        base.amount_in = Some(parse_amount(&v).context("Invalid income amount")?);
    }
    if let Some(v) = text("out") {
        base.amount_out = Some(parse_amount(&v).context("Invalid expense amount")?);
    }
    Ok(base)
}

fn selected_rows(sub: &clap::ArgMatches) -> Vec<usize> {
    sub.get_many::<usize>("rows")
        .map(|v| v.copied().collect())
        .unwrap_or_default()
}

/// The filtered view that `--rows` positions were read from.
fn selection_view(ledger: &Ledger, sub: &clap::ArgMatches) -> View {
    ledger.filter(&LedgerFilter {
        account: sub
            .get_one::<String>("view-account")
            .map(|s| s.trim().to_string()),
        year: sub.get_one::<i32>("view-year").copied(),
    })
}

pub fn add<B: Backend>(
    store: &mut LedgerStore<B>,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<TxId> {
    let input = apply_fields(sub, TransactionInput::default())?;
    let account = input.account.clone();
    let id = store.insert(input, &settings.registry)?;
    info!(id = %id, "transaction added");
    println!("Added new transaction {} for account {}", id, account.to_uppercase());
    Ok(id)
}

pub fn edit<B: Backend>(
    store: &mut LedgerStore<B>,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<TxId> {
    let view = selection_view(store.ledger(), sub);
    let id = view.select_one(&selected_rows(sub))?;
    let current = store
        .ledger()
        .get(id)
        .with_context(|| format!("Transaction {} vanished from the ledger", id))?;
    let input = apply_fields(sub, TransactionInput::from(current))?;
    store.update(id, input, &settings.registry)?;
    println!("Updated transaction {}", id);
    Ok(id)
}

pub fn remove<B: Backend>(store: &mut LedgerStore<B>, sub: &clap::ArgMatches) -> Result<Vec<TxId>> {
    let view = selection_view(store.ledger(), sub);
    let ids = view.select_many(&selected_rows(sub))?;
    store.delete(&ids)?;
    println!(
        "Removed transaction(s): {}",
        ids.iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(ids)
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.row.to_string(),
                    r.date.clone(),
                    r.account.clone(),
                    r.category.clone(),
                    r.description.clone(),
                    r.currency.clone(),
                    r.amount_in.clone(),
                    r.amount_out.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["#", "Date", "Account", "Category", "Description", "CCY", "In", "Out"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub row: usize,
    pub id: TxId,
    pub date: String,
    pub account: String,
    pub category: String,
    pub description: String,
    pub currency: String,
    pub amount_in: String,
    pub amount_out: String,
}

/// Rows of the filtered view, newest first, with their view positions.
pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Vec<TransactionRow> {
    let view = ledger.filter(&LedgerFilter {
        account: sub.get_one::<String>("account").map(|s| s.trim().to_string()),
        year: sub.get_one::<i32>("year").copied(),
    });
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    view.rows()
        .iter()
        .take(limit)
        .enumerate()
        .map(|(row, t)| TransactionRow {
            row,
            id: t.id,
            date: fmt_date(t.date),
            account: t.account.clone(),
            category: t.category.clone(),
            description: t.description.clone(),
            currency: t.currency.clone(),
            amount_in: format!("{:.2}", t.amount_in),
            amount_out: format!("{:.2}", t.amount_out),
        })
        .collect()
}
