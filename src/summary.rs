// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::balance::AccountLedger;

/// Target fractions of income for the three spending buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetRule {
    pub needs: Decimal,
    pub wants: Decimal,
    pub savings: Decimal,
}

impl Default for BudgetRule {
    /// The 50/30/20 rule.
    fn default() -> Self {
        BudgetRule {
            needs: Decimal::new(50, 2),
            wants: Decimal::new(30, 2),
            savings: Decimal::new(20, 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketShare {
    pub spent: Decimal,
    pub share: Decimal,
    pub target: Decimal,
}

impl BucketShare {
    fn new(spent: Decimal, income: Decimal, target: Decimal) -> Self {
        let share = if income > Decimal::ZERO {
            (spent / income).abs()
        } else {
            Decimal::ZERO
        };
        BucketShare {
            spent,
            share,
            target,
        }
    }

    pub fn over_target(&self) -> bool {
        self.share > self.target
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub account: String,
    pub currency: String,
    pub balance: Decimal,
    pub income: Decimal,
    pub expenses: Decimal,
    pub needs: BucketShare,
    pub wants: BucketShare,
    pub savings: BucketShare,
}

/// Needs/wants/savings spending of one account in one month, against `rule`.
/// `None` when the account has no rows in that month.
pub fn monthly_summary(
    acct: &AccountLedger,
    year: i32,
    month: u32,
    rule: &BudgetRule,
) -> Option<MonthlySummary> {
    let rows: Vec<_> = acct
        .rows
        .iter()
        .filter(|r| r.year == year && r.month == month)
        .collect();
    let last = rows.last()?;
    let spent_on = |category: &str| -> Decimal {
        rows.iter()
            .filter(|r| r.category.eq_ignore_ascii_case(category))
            .map(|r| r.amount_out)
            .sum()
    };
    let income: Decimal = rows.iter().map(|r| r.amount_in).sum();
    Some(MonthlySummary {
        year,
        month,
        account: acct.account.clone(),
        currency: acct.currency.clone().unwrap_or_default(),
        balance: last.running_balance,
        income,
        expenses: rows.iter().map(|r| r.amount_out).sum(),
        needs: BucketShare::new(spent_on("needs"), income, rule.needs),
        wants: BucketShare::new(spent_on("wants"), income, rule.wants),
        savings: BucketShare::new(spent_on("savings"), income, rule.savings),
    })
}
