// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-account running balances and their monthly roll-ups.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::ledger::Ledger;
use crate::models::TxId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceRow {
    pub id: TxId,
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub category: String,
    pub description: String,
    pub amount_in: Decimal,
    pub amount_out: Decimal,
    pub net: Decimal,
    pub running_balance: Decimal,
}

/// One account's rows, oldest first, with running balances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccountLedger {
    pub account: String,
    pub currency: Option<String>,
    pub rows: Vec<BalanceRow>,
}

impl AccountLedger {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn latest(&self) -> Option<&BalanceRow> {
        self.rows.last()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    pub year: i32,
    pub month: u32,
    pub account: String,
    pub currency: String,
    pub amount_in: Decimal,
    pub amount_out: Decimal,
    pub net: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryNet {
    pub year: i32,
    pub month: u32,
    pub account: String,
    pub currency: String,
    pub category: String,
    pub net: Decimal,
}

/// Share of a period's money movement that was income vs expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InOutShare {
    pub year: i32,
    pub month: u32,
    pub pcg_in: Decimal,
    pub pcg_out: Decimal,
    pub undefined: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountBalance {
    pub account: String,
    pub currency: String,
    pub balance: Decimal,
    pub as_of: NaiveDate,
}

/// Rows of `account`, oldest first, with cumulative net balance.
///
/// The accumulator is kept at full precision and each emitted balance is
/// rounded to cents, so rounding never compounds across rows. An account
/// with no rows yields an empty ledger.
pub fn account_ledger(ledger: &Ledger, account: &str) -> AccountLedger {
    let mut txs: Vec<_> = ledger.iter().filter(|t| t.account == account).collect();
    txs.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    let mut running = Decimal::ZERO;
    let rows = txs
        .iter()
        .map(|t| {
            let net = t.net();
            running += net;
            BalanceRow {
                id: t.id,
                date: t.date,
                year: t.year(),
                month: t.month(),
                category: t.category.clone(),
                description: t.description.clone(),
                amount_in: t.amount_in,
                amount_out: t.amount_out,
                net,
                running_balance: running.round_dp(2),
            }
        })
        .collect();

    AccountLedger {
        account: account.to_string(),
        currency: txs.first().map(|t| t.currency.clone()),
        rows,
    }
}

/// Monthly roll-up of an account ledger, oldest period first.
///
/// The period balance is the running balance of the last row in the period,
/// not an aggregate of the balances inside it.
pub fn period_summary(acct: &AccountLedger) -> Vec<PeriodSummary> {
    let Some(currency) = acct.currency.as_ref() else {
        return Vec::new();
    };
    let mut out: Vec<PeriodSummary> = Vec::new();
    for row in &acct.rows {
        match out.last_mut() {
            Some(p) if p.year == row.year && p.month == row.month => {
                p.amount_in += row.amount_in;
                p.amount_out += row.amount_out;
                p.net += row.net;
                p.balance = row.running_balance;
            }
            _ => out.push(PeriodSummary {
                year: row.year,
                month: row.month,
                account: acct.account.clone(),
                currency: currency.clone(),
                amount_in: row.amount_in,
                amount_out: row.amount_out,
                net: row.net,
                balance: row.running_balance,
            }),
        }
    }
    out
}

/// Net movement per (period, category) for one account.
pub fn balance_by_category(acct: &AccountLedger) -> Vec<CategoryNet> {
    let Some(currency) = acct.currency.as_ref() else {
        return Vec::new();
    };
    let mut groups: BTreeMap<(i32, u32, &str), Decimal> = BTreeMap::new();
    for row in &acct.rows {
        *groups
            .entry((row.year, row.month, row.category.as_str()))
            .or_insert(Decimal::ZERO) += row.net;
    }
    groups
        .into_iter()
        .map(|((year, month, category), net)| CategoryNet {
            year,
            month,
            account: acct.account.clone(),
            currency: currency.clone(),
            category: category.to_string(),
            net,
        })
        .collect()
}

/// Income and expense as fractions of everything that moved in each period.
/// A period with no movement at all gets zero shares and `undefined` set.
pub fn in_out_split(periods: &[PeriodSummary]) -> Vec<InOutShare> {
    periods
        .iter()
        .map(|p| {
            let total = p.amount_in + p.amount_out;
            if total.is_zero() {
                InOutShare {
                    year: p.year,
                    month: p.month,
                    pcg_in: Decimal::ZERO,
                    pcg_out: Decimal::ZERO,
                    undefined: true,
                }
            } else {
                InOutShare {
                    year: p.year,
                    month: p.month,
                    pcg_in: p.amount_in / total,
                    pcg_out: p.amount_out / total,
                    undefined: false,
                }
            }
        })
        .collect()
}

/// Latest running balance of every account in the ledger.
pub fn account_balances(ledger: &Ledger) -> Vec<AccountBalance> {
    ledger
        .accounts()
        .iter()
        .filter_map(|name| {
            let acct = account_ledger(ledger, name);
            let latest = acct.latest()?;
            Some(AccountBalance {
                account: acct.account.clone(),
                currency: acct.currency.clone()?,
                balance: latest.running_balance,
                as_of: latest.date,
            })
        })
        .collect()
}
