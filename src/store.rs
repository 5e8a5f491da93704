// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ownership of the ledger and its backing file.

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::ledger::{normalize, Ledger};
use crate::models::{AccountRegistry, RawRow, TransactionInput, TxId};
use crate::mutation;

pub const LEDGER_COLUMNS: [&str; 7] = [
    "date",
    "account",
    "category",
    "description",
    "currency",
    "in",
    "out",
];

/// Where a ledger is read from and written to.
pub trait Backend {
    fn load(&self) -> Result<Vec<RawRow>>;
    fn save(&self, ledger: &Ledger) -> Result<()>;
    fn describe(&self) -> String;
}

/// A CSV file on disk. Saves go to a sibling temp file that is then renamed
/// over the target, so a failed write leaves the old file intact.
#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
}

impl CsvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for CsvFile {
    fn load(&self) -> Result<Vec<RawRow>> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "ledger file not found, starting empty");
            return Ok(Vec::new());
        }
        read_rows(&self.path)
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        let target = self.describe();
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| Error::persistence(&target, e))?;
        }
        let tmp = self.path.with_extension("csv.tmp");
        write_rows(&tmp, ledger).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            e
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| Error::persistence(&target, e))?;
        debug!(path = %target, rows = ledger.len(), "ledger written");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Reads ledger rows from a CSV file with a header line.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let target = path.display().to_string();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::persistence(&target, e))?;
    let headers = rdr
        .headers()
        .map_err(|e| Error::persistence(&target, e))?
        .clone();
    if headers.iter().any(|h| h == "year" || h == "month") {
        warn!(path = %target, "ignoring stored year/month columns, they are derived from date");
    }
    let mut rows = Vec::new();
    for rec in rdr.deserialize::<RawRow>() {
        rows.push(rec.map_err(|e| Error::parse(format!("{}: {}", target, e)))?);
    }
    Ok(rows)
}

/// Writes a ledger as CSV, newest first.
pub fn write_rows(path: &Path, ledger: &Ledger) -> Result<()> {
    let target = path.display().to_string();
    let mut wtr = csv::Writer::from_path(path).map_err(|e| Error::persistence(&target, e))?;
    wtr.write_record(LEDGER_COLUMNS)
        .map_err(|e| Error::persistence(&target, e))?;
    for t in ledger.iter() {
        let r = RawRow::from(t);
        wtr.write_record([
            &r.date,
            &r.account,
            &r.category,
            &r.description,
            &r.currency,
            &r.amount_in,
            &r.amount_out,
        ])
        .map_err(|e| Error::persistence(&target, e))?;
    }
    wtr.flush().map_err(|e| Error::persistence(&target, e))?;
    Ok(())
}

/// Keeps the ledger in memory. Can be told to fail saves.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    rows: RefCell<Vec<RawRow>>,
    fail_saves: Cell<bool>,
}

impl MemoryBackend {
    pub fn new(rows: Vec<RawRow>) -> Self {
        MemoryBackend {
            rows: RefCell::new(rows),
            fail_saves: Cell::new(false),
        }
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    pub fn saved_rows(&self) -> Vec<RawRow> {
        self.rows.borrow().clone()
    }
}

impl Backend for MemoryBackend {
    fn load(&self) -> Result<Vec<RawRow>> {
        Ok(self.rows.borrow().clone())
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        if self.fail_saves.get() {
            return Err(Error::persistence(
                self.describe(),
                "backend refused the write",
            ));
        }
        *self.rows.borrow_mut() = ledger.iter().map(RawRow::from).collect();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// The session's ledger together with the store it is persisted to.
#[derive(Debug)]
pub struct LedgerStore<B: Backend> {
    backend: B,
    ledger: Ledger,
}

impl<B: Backend> LedgerStore<B> {
    pub fn open(backend: B) -> Result<Self> {
        let ledger = normalize(backend.load()?)?;
        info!(source = %backend.describe(), rows = ledger.len(), "ledger loaded");
        Ok(LedgerStore { backend, ledger })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Persists `next` and, only if that succeeds, makes it the current
    /// ledger.
    pub fn commit(&mut self, next: Ledger) -> Result<()> {
        self.backend.save(&next)?;
        self.ledger = next;
        info!(dest = %self.backend.describe(), rows = self.ledger.len(), "ledger committed");
        Ok(())
    }

    pub fn insert(&mut self, input: TransactionInput, registry: &AccountRegistry) -> Result<TxId> {
        let (next, id) = mutation::insert(&self.ledger, input, registry)?;
        self.commit(next)?;
        Ok(id)
    }

    /// Inserts every record and commits once; nothing is kept if any record
    /// is rejected.
    pub fn insert_all(
        &mut self,
        inputs: impl IntoIterator<Item = TransactionInput>,
        registry: &AccountRegistry,
    ) -> Result<Vec<TxId>> {
        let mut next = self.ledger.clone();
        let mut ids = Vec::new();
        for (idx, input) in inputs.into_iter().enumerate() {
            let (ledger, id) = mutation::insert(&next, input, registry).map_err(|e| match e {
                Error::Parse(m) => Error::Parse(format!("record {}: {}", idx + 1, m)),
                Error::Validation(m) => Error::Validation(format!("record {}: {}", idx + 1, m)),
                other => other,
            })?;
            next = ledger;
            ids.push(id);
        }
        self.commit(next)?;
        Ok(ids)
    }

    pub fn update(
        &mut self,
        id: TxId,
        input: TransactionInput,
        registry: &AccountRegistry,
    ) -> Result<()> {
        let next = mutation::update(&self.ledger, id, input, registry)?;
        self.commit(next)
    }

    pub fn delete(&mut self, ids: &[TxId]) -> Result<()> {
        let next = mutation::delete(&self.ledger, ids)?;
        self.commit(next)
    }
}
