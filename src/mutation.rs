// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Insert, edit and delete, each producing a new ledger.
//!
//! Rows are addressed by [`TxId`]. Positions picked from a filtered display
//! are turned into ids by [`crate::ledger::View`] first.

use rust_decimal::Decimal;
use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::models::{AccountRegistry, Transaction, TransactionInput, TxId};
use crate::utils::{check_amount, normalize_currency, parse_date};

pub fn insert(
    ledger: &Ledger,
    input: TransactionInput,
    registry: &AccountRegistry,
) -> Result<(Ledger, TxId)> {
    let mut next = ledger.clone();
    let id = next.allocate_id();
    let tx = build(ledger, id, input, registry)?;
    debug!(id = %id, account = %tx.account, "inserting transaction");
    next.rows_mut().push(tx);
    next.sort_for_display();
    Ok((next, id))
}

pub fn update(
    ledger: &Ledger,
    id: TxId,
    input: TransactionInput,
    registry: &AccountRegistry,
) -> Result<Ledger> {
    if !ledger.contains(id) {
        return Err(Error::validation(format!("Transaction {} not found", id)));
    }
    let tx = build(ledger, id, input, registry)?;
    debug!(id = %id, "updating transaction");
    let mut next = ledger.clone();
    if let Some(row) = next.rows_mut().iter_mut().find(|r| r.id == id) {
        *row = tx;
    }
    next.sort_for_display();
    Ok(next)
}

pub fn delete(ledger: &Ledger, ids: &[TxId]) -> Result<Ledger> {
    if ids.is_empty() {
        return Err(Error::validation(
            "Please select one or more rows to be deleted",
        ));
    }
    let targets: BTreeSet<TxId> = ids.iter().copied().collect();
    if let Some(missing) = targets.iter().find(|id| !ledger.contains(**id)) {
        return Err(Error::validation(format!(
            "Transaction {} not found",
            missing
        )));
    }
    debug!(count = targets.len(), "deleting transactions");
    let mut next = ledger.clone();
    next.rows_mut().retain(|t| !targets.contains(&t.id));
    Ok(next)
}

/// Turns submitted fields into a row with the given id, applying defaults and
/// the same parsing rules as ledger loading.
fn build(
    ledger: &Ledger,
    id: TxId,
    input: TransactionInput,
    registry: &AccountRegistry,
) -> Result<Transaction> {
    let date = parse_date(&input.date)?;
    let account = input.account.trim().to_string();
    if account.is_empty() {
        return Err(Error::validation("Account is required"));
    }
    let currency = normalize_currency(&input.currency)?;
    let amount_in = input.amount_in.unwrap_or(Decimal::ZERO);
    let amount_out = input.amount_out.unwrap_or(Decimal::ZERO);
    if amount_in < Decimal::ZERO || amount_out < Decimal::ZERO {
        return Err(Error::validation("Amounts must not be negative"));
    }
    let amount_in = check_amount(amount_in)?;
    let amount_out = check_amount(amount_out)?;
    if !amount_in.is_zero() && !amount_out.is_zero() {
        warn!(id = %id, "transaction has both an income and an expense amount");
    }

    if !registry.is_open() {
        let registered = registry
            .get(&account)
            .ok_or_else(|| Error::validation(format!("Account '{}' not found", account)))?;
        if registered.currency != currency {
            return Err(Error::validation(format!(
                "Account '{}' holds {}, not {}",
                account, registered.currency, currency
            )));
        }
    }
    if let Some(existing) = ledger
        .iter()
        .find(|t| t.account == account && t.id != id)
        .map(|t| t.currency.as_str())
    {
        if existing != currency {
            return Err(Error::validation(format!(
                "Account '{}' holds {}, not {}",
                account, existing, currency
            )));
        }
    }

    Ok(Transaction {
        id,
        date,
        account,
        category: input.category.trim().to_string(),
        description: input.description.unwrap_or_default().trim().to_string(),
        currency,
        amount_in,
        amount_out,
    })
}
