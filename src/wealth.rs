// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::balance::{account_balances, AccountBalance};
use crate::error::{Error, Result};
use crate::fx::RateTable;
use crate::ledger::Ledger;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WealthSnapshot {
    pub total: Decimal,
    pub currency: String,
    pub accounts: Vec<AccountBalance>,
}

/// Sums every account's latest balance in the reporting currency.
pub fn total_wealth(ledger: &Ledger, rates: &RateTable) -> Result<WealthSnapshot> {
    let accounts = account_balances(ledger);
    let mut total = Decimal::ZERO;
    for a in &accounts {
        let converted = rates.convert(a.balance, &a.currency)?;
        total = total
            .checked_add(converted)
            .ok_or_else(|| Error::validation("Total wealth is out of range"))?;
    }
    Ok(WealthSnapshot {
        total: total.round_dp(2),
        currency: rates.reporting().to_string(),
        accounts,
    })
}
