// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Category shares of monthly income across all spending accounts.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::fx::RateTable;
use crate::ledger::Ledger;

/// One category's income and expense in a period, relative to the period's
/// total income. Amounts are in the reporting currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub year: i32,
    pub month: u32,
    pub category: String,
    pub amount_in: Decimal,
    pub amount_out: Decimal,
    pub total_income: Decimal,
    pub pcg_in: Decimal,
    pub pcg_out: Decimal,
    pub pcg_in_out: Decimal,
    /// Set when the period had no income; all shares are then zero.
    pub undefined: bool,
}

/// Computes category shares for every period of `year`.
///
/// Rows of `excluded` accounts are skipped. Results are ordered by month,
/// then category name. Zero-contribution categories are kept; see
/// [`contributing`] for the display filter.
pub fn category_breakdown(
    ledger: &Ledger,
    rates: &RateTable,
    excluded: &BTreeSet<String>,
    year: i32,
) -> Result<Vec<CategoryShare>> {
    let mut groups: BTreeMap<(u32, &str), (Decimal, Decimal)> = BTreeMap::new();
    for t in ledger
        .iter()
        .filter(|t| t.year() == year && !excluded.contains(&t.account))
    {
        let amount_in = rates.convert(t.amount_in, &t.currency)?;
        let amount_out = rates.convert(t.amount_out, &t.currency)?;
        let entry = groups
            .entry((t.month(), t.category.as_str()))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 = sum(entry.0, amount_in)?;
        entry.1 = sum(entry.1, amount_out)?;
    }

    let mut income: BTreeMap<u32, Decimal> = BTreeMap::new();
    for ((month, _), (amount_in, _)) in &groups {
        let total = income.entry(*month).or_insert(Decimal::ZERO);
        *total = sum(*total, *amount_in)?;
    }

    groups
        .into_iter()
        .map(|((month, category), (amount_in, amount_out))| {
            let total_income = income.get(&month).copied().unwrap_or(Decimal::ZERO);
            let (pcg_in, pcg_out, undefined) = if total_income.is_zero() {
                (Decimal::ZERO, Decimal::ZERO, true)
            } else {
                let pcg_out = if amount_out.is_zero() {
                    Decimal::ZERO
                } else {
                    -share(amount_out, total_income)?
                };
                (share(amount_in, total_income)?, pcg_out, false)
            };
            Ok(CategoryShare {
                year,
                month,
                category: category.to_string(),
                amount_in,
                amount_out,
                total_income,
                pcg_in,
                pcg_out,
                pcg_in_out: pcg_in + pcg_out,
                undefined,
            })
        })
        .collect()
}

fn sum(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| Error::validation("Category total is out of range"))
}

fn share(part: Decimal, total: Decimal) -> Result<Decimal> {
    part.checked_div(total).ok_or_else(|| {
        Error::validation(format!("Share of {} in {} is out of range", part, total))
    })
}

pub fn for_month(shares: Vec<CategoryShare>, month: u32) -> Vec<CategoryShare> {
    shares.into_iter().filter(|s| s.month == month).collect()
}

/// Display filter: categories with a non-zero net share, largest first.
pub fn contributing(shares: Vec<CategoryShare>) -> Vec<CategoryShare> {
    let mut out: Vec<_> = shares
        .into_iter()
        .filter(|s| !s.pcg_in_out.is_zero())
        .collect();
    out.sort_by(|a, b| b.pcg_in_out.cmp(&a.pcg_in_out));
    out
}
