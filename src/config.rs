// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use std::path::PathBuf;

use crate::db;
use crate::fx::RateTable;
use crate::models::AccountRegistry;
use crate::summary::BudgetRule;

/// Everything the ledger commands need from the settings database.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub rates: RateTable,
    pub registry: AccountRegistry,
    pub budget_rule: BudgetRule,
    pub ledger_path: Option<PathBuf>,
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Self> {
        let base = db::get_base_currency(conn)?;
        let mut rates = RateTable::new(&base);
        for (ccy, rate) in db::fx_rates(conn, &base)? {
            rates.set(&ccy, rate);
        }
        Ok(Settings {
            rates,
            registry: AccountRegistry::new(db::accounts(conn)?),
            budget_rule: BudgetRule::default(),
            ledger_path: db::get_setting(conn, "ledger_path")?.map(PathBuf::from),
        })
    }

    /// `--ledger` wins over the stored path, which wins over the data dir.
    pub fn resolve_ledger_path(&self, cli_override: Option<&str>) -> Result<PathBuf> {
        if let Some(p) = cli_override {
            return Ok(PathBuf::from(p.trim()));
        }
        match &self.ledger_path {
            Some(p) => Ok(p.clone()),
            None => db::default_ledger_path(),
        }
    }
}
