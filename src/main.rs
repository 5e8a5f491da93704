// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::process::ExitCode;
use std::str::FromStr;
use tracing::{debug, error};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use pfdash::config::Settings;
use pfdash::{cli, commands, db, CsvFile, LedgerStore};

fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();
    let level = matches
        .get_one::<String>("log-level")
        .and_then(|s| LevelFilter::from_str(s).ok())
        .unwrap_or(LevelFilter::WARN);
    init_logger(level);
    debug!("Log level set to {}", level.to_string().to_lowercase());

    match main_inner(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn main_inner(matches: &clap::ArgMatches) -> Result<()> {
    let conn = db::open_or_init()?;
    let settings = Settings::load(&conn)?;
    let open_store = || -> Result<LedgerStore<CsvFile>> {
        let path = settings.resolve_ledger_path(matches.get_one::<String>("ledger").map(|s| s.as_str()))?;
        LedgerStore::open(CsvFile::new(&path))
            .with_context(|| format!("Load ledger {}", path.display()))
    };

    match matches.subcommand() {
        Some(("init", _)) => {
            let ledger = settings.resolve_ledger_path(matches.get_one::<String>("ledger").map(|s| s.as_str()))?;
            // `init --ledger` remembers the path for later runs.
            if matches.get_one::<String>("ledger").is_some() {
                db::set_setting(&conn, "ledger_path", &ledger.to_string_lossy())?;
            }
            println!("Database initialized at {}", db::db_path()?.display());
            println!("Ledger file: {}", ledger.display());
        }
        Some(("account", sub)) => commands::accounts::handle(&conn, sub)?,
        Some(("category", sub)) => commands::categories::handle(&conn, sub)?,
        Some(("fx", sub)) => commands::fx::handle(&conn, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut open_store()?, &settings, sub)?,
        Some(("report", sub)) => commands::reports::handle(open_store()?.ledger(), &settings, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut open_store()?, &settings, sub)?,
        Some(("export", sub)) => commands::exporter::handle(open_store()?.ledger(), sub)?,
        Some(("doctor", _)) => commands::doctor::handle(open_store()?.ledger(), &conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

/// Initializes the tracing subscriber.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        // Without RUST_LOG only this crate logs, at the requested level.
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
