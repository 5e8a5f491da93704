// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pfdash::config::Settings;
use pfdash::models::{Account, AccountKind, AccountRegistry, Category, CategoryKind, RawRow};
use pfdash::{cli, commands::doctor, commands::reports, normalize, Ledger};
use rust_decimal::Decimal;
use std::str::FromStr;

fn row(date: &str, account: &str, category: &str, ccy: &str, i: &str, o: &str) -> RawRow {
    RawRow {
        date: date.into(),
        account: account.into(),
        category: category.into(),
        description: String::new(),
        currency: ccy.into(),
        amount_in: i.into(),
        amount_out: o.into(),
    }
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn sample() -> Ledger {
    normalize(vec![
        row("05/12/2023", "sella", "salary", "EUR", "900", ""),
        row("05/01/2024", "sella", "salary", "EUR", "1000", ""),
        row("08/01/2024", "sella", "needs", "EUR", "", "450"),
        row("10/01/2024", "sella", "wants", "EUR", "", "350"),
        row("12/01/2024", "sella", "savings", "EUR", "", "100"),
        row("15/01/2024", "sella", "transfer", "EUR", "50", ""),
        row("16/01/2024", "sella", "transfer", "EUR", "", "50"),
        row("02/02/2024", "revolut_GBP", "wants", "GBP", "", "10"),
    ])
    .unwrap()
}

/// Runs `pfdash report <args>` and hands the leaf matches to `f`.
fn with_report<T>(args: &[&str], f: impl FnOnce(&clap::ArgMatches) -> T) -> T {
    let mut argv = vec!["pfdash", "report"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("report", report_m)) = matches.subcommand() else {
        panic!("no report subcommand");
    };
    let Some((_, sub)) = report_m.subcommand() else {
        panic!("no report kind");
    };
    f(sub)
}

#[test]
fn categories_default_to_latest_month_and_hide_zero_net() {
    let ledger = sample();
    let settings = Settings::default();
    // February has spending but no income, so every share is zero.
    let latest = with_report(&["categories"], |m| {
        reports::category_rows(&ledger, &settings, m).unwrap()
    });
    assert!(latest.is_empty());
    let latest = with_report(&["categories", "--all"], |m| {
        reports::category_rows(&ledger, &settings, m).unwrap()
    });
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].month, 2);
    assert!(latest[0].undefined);
    assert_eq!(latest[0].amount_out, dec("11.90"));

    let jan = with_report(&["categories", "--month", "1"], |m| {
        reports::category_rows(&ledger, &settings, m).unwrap()
    });
    let names: Vec<&str> = jan.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(names, vec!["salary", "savings", "wants", "needs"]);

    let all = with_report(&["categories", "--month", "1", "--all"], |m| {
        reports::category_rows(&ledger, &settings, m).unwrap()
    });
    assert_eq!(all.len(), 5);
    let transfer = all.iter().find(|s| s.category == "transfer").unwrap();
    assert_eq!(transfer.pcg_in_out, Decimal::ZERO);
    assert_eq!(transfer.total_income, dec("1050"));
}

#[test]
fn categories_of_a_year_without_rows_are_empty() {
    let ledger = sample();
    let rows = with_report(&["categories", "--year", "2019"], |m| {
        reports::category_rows(&ledger, &Settings::default(), m).unwrap()
    });
    assert!(rows.is_empty());
}

#[test]
fn periods_carry_split_and_closing_balance() {
    let ledger = sample();
    let rows = with_report(&["periods", "--account", "sella"], |m| {
        reports::period_rows(&ledger, m)
    });
    assert_eq!(rows.len(), 1, "latest year only");
    let jan = &rows[0];
    assert_eq!((jan.summary.year, jan.summary.month), (2024, 1));
    assert_eq!(jan.summary.amount_in, dec("1050"));
    assert_eq!(jan.summary.amount_out, dec("950"));
    assert_eq!(jan.summary.balance, dec("1000"));
    assert_eq!(jan.split.pcg_in + jan.split.pcg_out, Decimal::ONE);

    let older = with_report(&["periods", "--account", "sella", "--year", "2023"], |m| {
        reports::period_rows(&ledger, m)
    });
    assert_eq!(older.len(), 1);
    assert_eq!(older[0].summary.balance, dec("900"));
}

#[test]
fn balance_rows_filter_by_year_but_keep_running_total() {
    let ledger = sample();
    let rows = with_report(&["balance", "--account", "sella", "--year", "2024"], |m| {
        reports::balance_rows(&ledger, m)
    });
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].running_balance, dec("1900"));
    assert_eq!(rows.last().unwrap().running_balance, dec("1000"));
}

#[test]
fn by_category_rows_net_within_month() {
    let ledger = sample();
    let rows = with_report(&["by-category", "--account", "sella", "--month", "1"], |m| {
        reports::category_net_rows(&ledger, m)
    });
    let transfer = rows.iter().find(|c| c.category == "transfer").unwrap();
    assert_eq!(transfer.net, Decimal::ZERO);
    let needs = rows.iter().find(|c| c.category == "needs").unwrap();
    assert_eq!(needs.net, dec("-450"));
}

#[test]
fn summary_compares_buckets_with_rule() {
    let ledger = sample();
    let s = with_report(&["summary", "--account", "sella"], |m| {
        reports::summary_for(&ledger, &Settings::default(), m)
    })
    .unwrap();
    assert_eq!((s.year, s.month), (2024, 1));
    assert_eq!(s.income, dec("1050"));
    assert_eq!(s.needs.spent, dec("450"));
    assert!(!s.needs.over_target());
    assert!(s.wants.over_target(), "350 of 1050 is above 30%");
    assert!(!s.savings.over_target());

    let none = with_report(&["summary", "--account", "nobody"], |m| {
        reports::summary_for(&ledger, &Settings::default(), m)
    });
    assert!(none.is_none());
}

#[test]
fn doctor_flags_registry_and_rate_gaps() {
    let ledger = normalize(vec![
        row("01/01/2024", "sella", "salary", "EUR", "10", "5"),
        row("02/01/2024", "chase", "fun", "USD", "", ""),
    ])
    .unwrap();
    let settings = Settings {
        registry: AccountRegistry::new(vec![Account {
            name: "sella".into(),
            kind: AccountKind::Bank,
            currency: "GBP".into(),
        }]),
        ..Settings::default()
    };
    let categories = vec![Category {
        name: "salary".into(),
        kind: CategoryKind::Income,
    }];
    let kinds: Vec<&str> = doctor::diagnose(&ledger, &settings, &categories)
        .iter()
        .map(|i| i.kind)
        .collect();
    for expected in [
        "unregistered_account",
        "account_currency_mismatch",
        "missing_fx",
        "unregistered_category",
        "both_legs_set",
        "no_amount",
    ] {
        assert!(kinds.contains(&expected), "missing {expected} in {kinds:?}");
    }
}

#[test]
fn doctor_is_quiet_on_a_clean_ledger() {
    let issues = doctor::diagnose(&sample(), &Settings::default(), &[]);
    assert!(issues.is_empty(), "{issues:?}");
}
