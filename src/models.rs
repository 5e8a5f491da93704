// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::utils::{fmt_date, parse_amount};

/// Surrogate row identity, assigned once when a row enters the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(pub u64);

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TxId,
    pub date: NaiveDate,
    pub account: String,
    pub category: String,
    pub description: String,
    pub currency: String,
    pub amount_in: Decimal,
    pub amount_out: Decimal,
}

impl Transaction {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn net(&self) -> Decimal {
        self.amount_in - self.amount_out
    }

    /// Same business content, ignoring the surrogate id.
    pub fn same_entry(&self, other: &Transaction) -> bool {
        self.date == other.date
            && self.account == other.account
            && self.category == other.category
            && self.description == other.description
            && self.currency == other.currency
            && self.amount_in == other.amount_in
            && self.amount_out == other.amount_out
    }
}

/// One row of the ledger file, exactly as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub date: String,
    pub account: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub currency: String,
    #[serde(rename = "in", default)]
    pub amount_in: String,
    #[serde(rename = "out", default)]
    pub amount_out: String,
}

impl From<&Transaction> for RawRow {
    fn from(t: &Transaction) -> Self {
        RawRow {
            date: fmt_date(t.date),
            account: t.account.clone(),
            category: t.category.clone(),
            description: t.description.clone(),
            currency: t.currency.clone(),
            amount_in: t.amount_in.to_string(),
            amount_out: t.amount_out.to_string(),
        }
    }
}

/// Fields of a transaction as submitted for insert or edit. Optional fields
/// take their defaults when the record is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionInput {
    pub date: String,
    pub account: String,
    pub category: String,
    pub description: Option<String>,
    pub currency: String,
    pub amount_in: Option<Decimal>,
    pub amount_out: Option<Decimal>,
}

impl TransactionInput {
    pub fn from_raw(raw: RawRow) -> Result<Self> {
        Ok(TransactionInput {
            amount_in: Some(parse_amount(&raw.amount_in)?),
            amount_out: Some(parse_amount(&raw.amount_out)?),
            date: raw.date,
            account: raw.account,
            category: raw.category,
            description: Some(raw.description),
            currency: raw.currency,
        })
    }
}

impl From<&Transaction> for TransactionInput {
    fn from(t: &Transaction) -> Self {
        TransactionInput {
            date: fmt_date(t.date),
            account: t.account.clone(),
            category: t.category.clone(),
            description: Some(t.description.clone()),
            currency: t.currency.clone(),
            amount_in: Some(t.amount_in),
            amount_out: Some(t.amount_out),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Bank,
    /// Holds transfers between own accounts; kept out of spending analysis.
    Savings,
}

impl FromStr for AccountKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "bank" => Ok(AccountKind::Bank),
            "savings" => Ok(AccountKind::Savings),
            other => Err(Error::validation(format!(
                "Unknown account type '{}', expected bank|savings",
                other
            ))),
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::Bank => f.write_str("bank"),
            AccountKind::Savings => f.write_str("savings"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub kind: AccountKind,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl FromStr for CategoryKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(CategoryKind::Income),
            "expense" => Ok(CategoryKind::Expense),
            other => Err(Error::validation(format!(
                "Unknown category kind '{}', expected income|expense",
                other
            ))),
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKind::Income => f.write_str("income"),
            CategoryKind::Expense => f.write_str("expense"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub kind: CategoryKind,
}

/// The fixed set of accounts a ledger may reference. Empty means any
/// non-empty account name is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountRegistry {
    accounts: BTreeMap<String, Account>,
}

impl AccountRegistry {
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Self {
        AccountRegistry {
            accounts: accounts
                .into_iter()
                .map(|a| (a.name.clone(), a))
                .collect(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Accounts left out of the category breakdown.
    pub fn excluded_from_breakdown(&self) -> std::collections::BTreeSet<String> {
        self.accounts
            .values()
            .filter(|a| a.kind == AccountKind::Savings)
            .map(|a| a.name.clone())
            .collect()
    }
}
