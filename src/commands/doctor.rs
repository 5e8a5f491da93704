// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::db;
use crate::ledger::Ledger;
use crate::models::Category;
use crate::utils::{fmt_date, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub kind: &'static str,
    pub detail: String,
}

pub fn handle(ledger: &Ledger, conn: &Connection) -> Result<()> {
    let settings = Settings::load(conn)?;
    let categories = db::categories(conn)?;
    let issues = diagnose(ledger, &settings, &categories);
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = issues.into_iter().map(|i| vec![i.kind.to_string(), i.detail]).collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn diagnose(ledger: &Ledger, settings: &Settings, categories: &[Category]) -> Vec<Issue> {
    let mut issues = Vec::new();

    for account in ledger.accounts() {
        let ccy = ledger.currency_of(&account).unwrap_or_default().to_string();
        if !settings.registry.is_open() {
            match settings.registry.get(&account) {
                None => issues.push(Issue {
                    kind: "unregistered_account",
                    detail: account.clone(),
                }),
                Some(a) if a.currency != ccy => issues.push(Issue {
                    kind: "account_currency_mismatch",
                    detail: format!("{} registered as {}, ledger uses {}", account, a.currency, ccy),
                }),
                Some(_) => {}
            }
        }
    }

    let currencies: BTreeSet<&str> = ledger.iter().map(|t| t.currency.as_str()).collect();
    for ccy in currencies {
        if settings.rates.rate(ccy).is_none() {
            issues.push(Issue {
                kind: "missing_fx",
                detail: format!("{} -> {}", ccy, settings.rates.reporting()),
            });
        }
    }

    if !categories.is_empty() {
        let known: BTreeSet<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        for cat in ledger.categories() {
            if !known.contains(cat.as_str()) {
                issues.push(Issue {
                    kind: "unregistered_category",
                    detail: cat,
                });
            }
        }
    }

    for t in ledger.iter() {
        let both = !t.amount_in.is_zero() && !t.amount_out.is_zero();
        let neither = t.amount_in.is_zero() && t.amount_out.is_zero();
        if both || neither {
            issues.push(Issue {
                kind: if both { "both_legs_set" } else { "no_amount" },
                detail: format!("#{} {} {}", t.id, fmt_date(t.date), t.account),
            });
        }
    }

    issues
}
