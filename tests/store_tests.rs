// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pfdash::models::{AccountRegistry, RawRow, TransactionInput};
use pfdash::{Backend, CsvFile, Error, LedgerStore, MemoryBackend};
use rust_decimal::Decimal;
use std::fs;
use tempfile::tempdir;

fn raw(date: &str, account: &str, i: &str, o: &str) -> RawRow {
    RawRow {
        date: date.into(),
        account: account.into(),
        category: "misc".into(),
        description: "seed".into(),
        currency: "EUR".into(),
        amount_in: i.into(),
        amount_out: o.into(),
    }
}

fn spend(date: &str, amount: i64) -> TransactionInput {
    TransactionInput {
        date: date.into(),
        account: "sella".into(),
        category: "wants".into(),
        description: Some("coffee".into()),
        currency: "EUR".into(),
        amount_in: None,
        amount_out: Some(Decimal::new(amount, 0)),
    }
}

#[test]
fn failed_save_leaves_session_ledger_unchanged() {
    let backend = MemoryBackend::new(vec![raw("01/01/2024", "sella", "100", "")]);
    let mut store = LedgerStore::open(backend).unwrap();
    let before = store.ledger().clone();

    store.backend().fail_saves(true);
    let err = store
        .insert(spend("02/01/2024", 5), &AccountRegistry::default())
        .unwrap_err();
    assert!(matches!(err, Error::Persistence { .. }));
    assert_eq!(store.ledger(), &before);
    assert_eq!(store.backend().saved_rows().len(), 1);

    store.backend().fail_saves(false);
    store
        .insert(spend("02/01/2024", 5), &AccountRegistry::default())
        .unwrap();
    assert_eq!(store.ledger().len(), 2);
    assert_eq!(store.backend().saved_rows().len(), 2);
}

#[test]
fn rejected_import_commits_nothing() {
    let mut store = LedgerStore::open(MemoryBackend::default()).unwrap();
    let bad = spend("32/01/2024", 1);
    let err = store
        .insert_all(
            vec![spend("01/01/2024", 1), bad],
            &AccountRegistry::default(),
        )
        .unwrap_err();
    match err {
        Error::Parse(msg) => assert!(msg.starts_with("record 2:"), "{msg}"),
        other => panic!("unexpected error {other:?}"),
    }
    assert!(store.ledger().is_empty());
    assert!(store.backend().saved_rows().is_empty());
}

#[test]
fn csv_file_round_trips_through_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("ledger.csv");

    let mut store = LedgerStore::open(CsvFile::new(&path)).unwrap();
    assert!(store.ledger().is_empty(), "missing file loads empty");
    store
        .insert(spend("03/02/2024", 12), &AccountRegistry::default())
        .unwrap();
    store
        .insert(spend("01/02/2024", 3), &AccountRegistry::default())
        .unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "date,account,category,description,currency,in,out"
    );
    assert!(lines.next().unwrap().starts_with("03/02/2024,sella,wants,coffee,EUR,"));
    assert!(!path.with_extension("csv.tmp").exists());

    let reopened = LedgerStore::open(CsvFile::new(&path)).unwrap();
    assert_eq!(reopened.ledger().len(), 2);
    let totals: Decimal = reopened.ledger().iter().map(|t| t.amount_out).sum();
    assert_eq!(totals, Decimal::new(15, 0));
}

#[test]
fn stored_year_and_month_columns_are_ignored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("legacy.csv");
    fs::write(
        &path,
        "date,year,month,account,category,description,currency,in,out\n\
         15/03/2024,1999,12,sella,salary,,EUR,100,\n",
    )
    .unwrap();
    let store = LedgerStore::open(CsvFile::new(&path)).unwrap();
    let t = &store.ledger().rows()[0];
    assert_eq!((t.year(), t.month()), (2024, 3));
    assert_eq!(t.amount_out, Decimal::ZERO);
}

#[test]
fn malformed_file_date_fails_to_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(
        &path,
        "date,account,category,description,currency,in,out\n2024-03-15,sella,salary,,EUR,1,\n",
    )
    .unwrap();
    let backend = CsvFile::new(&path);
    assert_eq!(backend.describe(), path.display().to_string());
    assert!(matches!(LedgerStore::open(backend), Err(Error::Parse(_))));
}
