// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::balance::{
    account_balances, account_ledger, balance_by_category, in_out_split, period_summary,
    BalanceRow, CategoryNet, InOutShare, PeriodSummary,
};
use crate::breakdown::{category_breakdown, contributing, for_month, CategoryShare};
use crate::config::Settings;
use crate::ledger::Ledger;
use crate::summary::{monthly_summary, MonthlySummary};
use crate::utils::{fmt_date, fmt_money, fmt_pct, maybe_print_json, month_label, pretty_table};
use crate::wealth::total_wealth;
use anyhow::Result;
use serde::Serialize;

pub fn handle(ledger: &Ledger, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balance", sub)) => balance(ledger, sub)?,
        Some(("periods", sub)) => periods(ledger, sub)?,
        Some(("by-category", sub)) => by_category(ledger, sub)?,
        Some(("categories", sub)) => categories(ledger, settings, sub)?,
        Some(("balances", sub)) => balances(ledger, sub)?,
        Some(("wealth", sub)) => wealth(ledger, settings, sub)?,
        Some(("summary", sub)) => summary(ledger, settings, sub)?,
        _ => {}
    }
    Ok(())
}

fn account_arg(sub: &clap::ArgMatches) -> String {
    sub.get_one::<String>("account")
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// `--year` if given, otherwise the latest year with data.
fn year_or_latest(ledger: &Ledger, sub: &clap::ArgMatches, account: Option<&str>) -> Option<i32> {
    sub.get_one::<i32>("year")
        .copied()
        .or_else(|| ledger.years(account).last().copied())
}

fn month_or_latest(ledger: &Ledger, sub: &clap::ArgMatches, year: i32) -> Option<u32> {
    sub.get_one::<u32>("month")
        .copied()
        .or_else(|| ledger.months(year).last().copied())
}

fn print_or_empty<T: Serialize>(
    sub: &clap::ArgMatches,
    data: &[T],
    headers: &[&str],
    render: impl Fn(&T) -> Vec<String>,
) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No matching transactions.");
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(headers, data.iter().map(render).collect())
    );
    Ok(())
}

pub fn balance_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Vec<BalanceRow> {
    let account = account_arg(sub);
    let year = sub.get_one::<i32>("year").copied();
    account_ledger(ledger, &account)
        .rows
        .into_iter()
        .filter(|r| year.is_none_or(|y| r.year == y))
        .collect()
}

fn balance(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let data = balance_rows(ledger, sub);
    print_or_empty(
        sub,
        &data,
        &["Date", "Category", "Description", "In", "Out", "Balance"],
        |r| {
            vec![
                fmt_date(r.date),
                r.category.clone(),
                r.description.clone(),
                format!("{:.2}", r.amount_in),
                format!("{:.2}", r.amount_out),
                format!("{:.2}", r.running_balance),
            ]
        },
    )
}

#[derive(Debug, Serialize)]
pub struct PeriodRow {
    #[serde(flatten)]
    pub summary: PeriodSummary,
    pub split: InOutShare,
}

/// Period summaries of one account for the selected (or latest) year.
pub fn period_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Vec<PeriodRow> {
    let account = account_arg(sub);
    let Some(year) = year_or_latest(ledger, sub, Some(account.as_str())) else {
        return Vec::new();
    };
    let summaries: Vec<PeriodSummary> = period_summary(&account_ledger(ledger, &account))
        .into_iter()
        .filter(|p| p.year == year)
        .collect();
    let splits = in_out_split(&summaries);
    summaries
        .into_iter()
        .zip(splits)
        .map(|(summary, split)| PeriodRow { summary, split })
        .collect()
}

fn periods(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let data = period_rows(ledger, sub);
    print_or_empty(
        sub,
        &data,
        &["Month", "In", "Out", "Net", "Balance", "In %", "Out %"],
        |r| {
            let p = &r.summary;
            vec![
                format!("{} {}", month_label(p.month), p.year),
                format!("{:.2}", p.amount_in),
                format!("{:.2}", p.amount_out),
                format!("{:.2}", p.net),
                fmt_money(&p.balance, &p.currency),
                fmt_pct(&r.split.pcg_in),
                fmt_pct(&r.split.pcg_out),
            ]
        },
    )
}

pub fn category_net_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Vec<CategoryNet> {
    let account = account_arg(sub);
    let Some(year) = year_or_latest(ledger, sub, Some(account.as_str())) else {
        return Vec::new();
    };
    let month = sub.get_one::<u32>("month").copied();
    balance_by_category(&account_ledger(ledger, &account))
        .into_iter()
        .filter(|c| c.year == year && month.is_none_or(|m| c.month == m))
        .collect()
}

fn by_category(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let data = category_net_rows(ledger, sub);
    print_or_empty(sub, &data, &["Month", "Category", "Net"], |c| {
        vec![
            format!("{} {}", month_label(c.month), c.year),
            c.category.clone(),
            fmt_money(&c.net, &c.currency),
        ]
    })
}

/// Category shares for the selected (or latest) month; zero-contribution
/// categories are dropped unless `--all` is set.
pub fn category_rows(
    ledger: &Ledger,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<Vec<CategoryShare>> {
    let Some(year) = year_or_latest(ledger, sub, None) else {
        return Ok(Vec::new());
    };
    let Some(month) = month_or_latest(ledger, sub, year) else {
        return Ok(Vec::new());
    };
    let shares = category_breakdown(
        ledger,
        &settings.rates,
        &settings.registry.excluded_from_breakdown(),
        year,
    )?;
    let shares = for_month(shares, month);
    if sub.get_flag("all") {
        Ok(shares)
    } else {
        Ok(contributing(shares))
    }
}

fn categories(ledger: &Ledger, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let data = category_rows(ledger, settings, sub)?;
    let as_json = sub.get_flag("json") || sub.get_flag("jsonl");
    if !as_json && data.iter().any(|s| s.undefined) {
        println!("No income recorded for this month; shares shown as 0.");
    }
    let ccy = settings.rates.reporting().to_string();
    print_or_empty(
        sub,
        &data,
        &["Category", "In", "Out", "In %", "Out %", "Net %"],
        |s| {
            vec![
                s.category.clone(),
                fmt_money(&s.amount_in, &ccy),
                fmt_money(&s.amount_out, &ccy),
                fmt_pct(&s.pcg_in),
                fmt_pct(&s.pcg_out),
                fmt_pct(&s.pcg_in_out),
            ]
        },
    )
}

fn balances(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let data = account_balances(ledger);
    print_or_empty(sub, &data, &["Account", "CCY", "Balance", "As of"], |b| {
        vec![
            b.account.to_uppercase(),
            b.currency.clone(),
            format!("{:.2}", b.balance),
            fmt_date(b.as_of),
        ]
    })
}

fn wealth(ledger: &Ledger, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let snapshot = total_wealth(ledger, &settings.rates)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &snapshot)? {
        return Ok(());
    }
    let mut rows: Vec<Vec<String>> = snapshot
        .accounts
        .iter()
        .map(|b| vec![b.account.to_uppercase(), fmt_money(&b.balance, &b.currency)])
        .collect();
    rows.push(vec![
        "Total Wealth".to_string(),
        fmt_money(&snapshot.total, &snapshot.currency),
    ]);
    println!("{}", pretty_table(&["Account", "Balance"], rows));
    Ok(())
}

pub fn summary_for(
    ledger: &Ledger,
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Option<MonthlySummary> {
    let account = account_arg(sub);
    let year = year_or_latest(ledger, sub, Some(account.as_str()))?;
    let acct = account_ledger(ledger, &account);
    let month = sub
        .get_one::<u32>("month")
        .copied()
        .or_else(|| acct.rows.iter().filter(|r| r.year == year).map(|r| r.month).max())?;
    monthly_summary(&acct, year, month, &settings.budget_rule)
}

fn summary(ledger: &Ledger, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let Some(s) = summary_for(ledger, settings, sub) else {
        if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &None::<MonthlySummary>)? {
            println!("No matching transactions.");
        }
        return Ok(());
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    println!(
        "Monthly Summary, {} - {}, {}",
        s.account.to_uppercase(),
        month_label(s.month),
        s.year
    );
    let bucket = |name: &str, b: &crate::summary::BucketShare| {
        vec![
            name.to_string(),
            fmt_money(&b.spent, &s.currency),
            fmt_pct(&b.share),
            fmt_pct(&b.target),
            if b.over_target() { "over" } else { "ok" }.to_string(),
        ]
    };
    let rows = vec![
        bucket("Needs", &s.needs),
        bucket("Wants", &s.wants),
        bucket("Savings", &s.savings),
    ];
    println!("Balance: {}", fmt_money(&s.balance, &s.currency));
    println!("Total income: {}", fmt_money(&s.income, &s.currency));
    println!("Total expenses: {}", fmt_money(&s.expenses, &s.currency));
    println!(
        "{}",
        pretty_table(&["Bucket", "Spent", "Of income", "Target", "Status"], rows)
    );
    Ok(())
}
