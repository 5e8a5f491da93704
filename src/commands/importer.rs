// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::models::{TransactionInput, TxId};
use crate::store::{read_rows, Backend, LedgerStore};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

pub fn handle<B: Backend>(
    store: &mut LedgerStore<B>,
    settings: &Settings,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            import_transactions(store, settings, sub)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Appends every row of a ledger-format CSV in a single commit.
pub fn import_transactions<B: Backend>(
    store: &mut LedgerStore<B>,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<Vec<TxId>> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let rows = read_rows(Path::new(path)).with_context(|| format!("Open CSV {}", path))?;
    let inputs = rows
        .into_iter()
        .map(TransactionInput::from_raw)
        .collect::<crate::error::Result<Vec<_>>>()
        .with_context(|| format!("Invalid row in {}", path))?;
    let ids = store.insert_all(inputs, &settings.registry)?;
    info!(count = ids.len(), path, "import committed");
    println!("Imported {} transactions from {}", ids.len(), path);
    Ok(ids)
}
