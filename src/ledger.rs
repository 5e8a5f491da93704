// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The canonical transaction set and its filtered views.
//!
//! A [`Ledger`] is always kept newest-first, which is the order rows are
//! displayed in. Anything that accumulates over time (running balances,
//! period roll-ups) re-sorts oldest-first on its own; the two orders are not
//! interchangeable.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{RawRow, Transaction, TxId};
use crate::utils::{check_amount, normalize_currency, parse_amount, parse_date};

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    rows: Vec<Transaction>,
    next_id: u64,
}

/// Two ledgers are equal when they hold the same rows; the id counter is
/// bookkeeping and does not take part.
impl PartialEq for Ledger {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl Eq for Ledger {}

/// Parses raw rows into a ledger.
///
/// Ids are handed out in input order starting at 1. Fails on the first row
/// whose date or amounts do not parse, and when an account carries rows in
/// more than one currency.
pub fn normalize(rows: impl IntoIterator<Item = RawRow>) -> Result<Ledger> {
    let mut out = Vec::new();
    for (idx, raw) in rows.into_iter().enumerate() {
        let line = idx + 1;
        let date = parse_date(&raw.date).map_err(|e| at_row(line, e))?;
        let amount_in = parse_amount(&raw.amount_in).map_err(|e| at_row(line, e))?;
        let amount_out = parse_amount(&raw.amount_out).map_err(|e| at_row(line, e))?;
        let currency = normalize_currency(&raw.currency).map_err(|e| at_row(line, e))?;
        if !amount_in.is_zero() && !amount_out.is_zero() {
            warn!(row = line, "transaction has both an income and an expense amount");
        }
        out.push(Transaction {
            id: TxId(line as u64),
            date,
            account: raw.account.trim().to_string(),
            category: raw.category.trim().to_string(),
            description: raw.description.trim().to_string(),
            currency,
            amount_in,
            amount_out,
        });
    }
    let ledger = Ledger::from_transactions(out)?;
    debug!(rows = ledger.len(), "ledger normalized");
    Ok(ledger)
}

fn at_row(line: usize, e: Error) -> Error {
    match e {
        Error::Parse(m) => Error::Parse(format!("row {}: {}", line, m)),
        Error::Validation(m) => Error::Validation(format!("row {}: {}", line, m)),
        other => other,
    }
}

impl Ledger {
    /// Builds a ledger from already-typed rows, checking the
    /// one-currency-per-account rule and restoring display order.
    pub fn from_transactions(rows: Vec<Transaction>) -> Result<Self> {
        for t in &rows {
            check_amount(t.amount_in)?;
            check_amount(t.amount_out)?;
        }
        check_single_currency(&rows)?;
        let next_id = rows.iter().map(|t| t.id.0).max().unwrap_or(0) + 1;
        let mut ledger = Ledger { rows, next_id };
        ledger.sort_for_display();
        Ok(ledger)
    }

    pub(crate) fn sort_for_display(&mut self) {
        self.rows
            .sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    }

    pub(crate) fn allocate_id(&mut self) -> TxId {
        // Ids start at 1, also for a default (empty) ledger.
        let id = TxId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        id
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Transaction> {
        &mut self.rows
    }

    /// Rows newest first.
    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: TxId) -> Option<&Transaction> {
        self.rows.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TxId) -> bool {
        self.get(id).is_some()
    }

    pub fn accounts(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|t| t.account.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn currency_of(&self, account: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|t| t.account == account)
            .map(|t| t.currency.as_str())
    }

    /// Distinct years, ascending, optionally for one account only.
    pub fn years(&self, account: Option<&str>) -> Vec<i32> {
        self.rows
            .iter()
            .filter(|t| account.is_none_or(|a| t.account == a))
            .map(|t| t.year())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct months of `year`, ascending.
    pub fn months(&self, year: i32) -> Vec<u32> {
        self.rows
            .iter()
            .filter(|t| t.year() == year)
            .map(|t| t.month())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn categories(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|t| t.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn filter(&self, filter: &LedgerFilter) -> View {
        View {
            rows: self
                .rows
                .iter()
                .filter(|t| filter.matches(t))
                .cloned()
                .collect(),
        }
    }
}

fn check_single_currency(rows: &[Transaction]) -> Result<()> {
    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
    for t in rows {
        match seen.get(t.account.as_str()) {
            Some(ccy) if *ccy != t.currency => {
                return Err(Error::validation(format!(
                    "Account '{}' mixes currencies {} and {}",
                    t.account, ccy, t.currency
                )));
            }
            Some(_) => {}
            None => {
                seen.insert(&t.account, &t.currency);
            }
        }
    }
    Ok(())
}

/// Row filter applied to the ledger before display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerFilter {
    pub account: Option<String>,
    pub year: Option<i32>,
}

impl LedgerFilter {
    pub fn matches(&self, t: &Transaction) -> bool {
        self.account.as_deref().is_none_or(|a| t.account == a)
            && self.year.is_none_or(|y| t.year() == y)
    }
}

/// A filtered, display-ordered projection of a ledger.
///
/// Positions in a view are what a user selects from; they are only
/// meaningful for this view and must go through [`View::resolve`] before
/// addressing the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct View {
    rows: Vec<Transaction>,
}

impl View {
    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn resolve(&self, positions: &[usize]) -> Result<Vec<TxId>> {
        positions
            .iter()
            .map(|&p| {
                self.rows.get(p).map(|t| t.id).ok_or_else(|| {
                    Error::validation(format!(
                        "Row {} is not in the current view ({} rows)",
                        p,
                        self.rows.len()
                    ))
                })
            })
            .collect()
    }

    /// Resolves a selection that must name exactly one row.
    pub fn select_one(&self, positions: &[usize]) -> Result<TxId> {
        if positions.len() != 1 {
            return Err(Error::validation(
                "Please select one and only one row for editing",
            ));
        }
        Ok(self.resolve(positions)?[0])
    }

    /// Resolves a selection that must name at least one row.
    pub fn select_many(&self, positions: &[usize]) -> Result<Vec<TxId>> {
        if positions.is_empty() {
            return Err(Error::validation(
                "Please select one or more rows to be deleted",
            ));
        }
        self.resolve(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(date: &str, account: &str, ccy: &str, amount_in: &str, amount_out: &str) -> RawRow {
        RawRow {
            date: date.into(),
            account: account.into(),
            category: "misc".into(),
            description: String::new(),
            currency: ccy.into(),
            amount_in: amount_in.into(),
            amount_out: amount_out.into(),
        }
    }

    #[test]
    fn ledger_is_newest_first_with_ids_in_input_order() {
        let ledger = normalize(vec![
            raw("05/01/2024", "sella", "EUR", "10", ""),
            raw("10/03/2024", "sella", "EUR", "", "2"),
            raw("01/02/2023", "sella", "EUR", "1", "0"),
        ])
        .unwrap();
        let ids: Vec<u64> = ledger.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(ledger.years(None), vec![2023, 2024]);
        assert_eq!(ledger.months(2024), vec![1, 3]);
    }

    #[test]
    fn bad_rows_are_reported_with_their_position() {
        let err = normalize(vec![
            raw("05/01/2024", "sella", "EUR", "10", ""),
            raw("2024-01-06", "sella", "EUR", "10", ""),
        ])
        .unwrap_err();
        match err {
            Error::Parse(m) => assert!(m.starts_with("row 2:"), "{}", m),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn select_one_requires_exactly_one_position() {
        let ledger = normalize(vec![
            raw("05/01/2024", "a", "EUR", "1", ""),
            raw("06/01/2024", "a", "EUR", "1", ""),
        ])
        .unwrap();
        let view = ledger.filter(&LedgerFilter::default());
        assert!(view.select_one(&[]).is_err());
        assert!(view.select_one(&[0, 1]).is_err());
        assert!(view.select_one(&[5]).is_err());
        assert_eq!(view.select_one(&[1]).unwrap(), TxId(1));
        assert!(view.select_many(&[]).is_err());
    }
}
