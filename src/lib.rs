// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod balance;
pub mod breakdown;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod fx;
pub mod ledger;
pub mod models;
pub mod mutation;
pub mod store;
pub mod summary;
pub mod utils;
pub mod wealth;

pub use error::{Error, Result};
pub use ledger::{normalize, Ledger, LedgerFilter, View};
pub use store::{Backend, CsvFile, LedgerStore, MemoryBackend};
