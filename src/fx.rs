// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{Error, Result};

pub const DEFAULT_REPORTING_CURRENCY: &str = "EUR";

/// GBP -> EUR multiplier used when no rate has been configured.
pub const DEFAULT_GBP_EUR: Decimal = Decimal::from_parts(119, 0, 0, false, 2);

/// Fixed conversion multipliers into a single reporting currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateTable {
    reporting: String,
    rates: BTreeMap<String, Decimal>,
}

impl Default for RateTable {
    fn default() -> Self {
        let mut t = RateTable::new(DEFAULT_REPORTING_CURRENCY);
        t.set("GBP", DEFAULT_GBP_EUR);
        t
    }
}

impl RateTable {
    pub fn new(reporting: &str) -> Self {
        RateTable {
            reporting: reporting.to_uppercase(),
            rates: BTreeMap::new(),
        }
    }

    pub fn reporting(&self) -> &str {
        &self.reporting
    }

    /// `rate` converts one unit of `ccy` into the reporting currency.
    pub fn set(&mut self, ccy: &str, rate: Decimal) {
        self.rates.insert(ccy.to_uppercase(), rate);
    }

    pub fn rate(&self, ccy: &str) -> Option<Decimal> {
        if ccy.eq_ignore_ascii_case(&self.reporting) {
            return Some(Decimal::ONE);
        }
        self.rates.get(&ccy.to_uppercase()).copied()
    }

    pub fn rates(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.rates.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn convert(&self, amount: Decimal, ccy: &str) -> Result<Decimal> {
        let rate = self.rate(ccy).ok_or_else(|| {
            Error::validation(format!(
                "No conversion rate from {} to {} configured",
                ccy, self.reporting
            ))
        })?;
        amount.checked_mul(rate).ok_or_else(|| {
            Error::validation(format!(
                "{} {} is out of range once converted to {}",
                amount, ccy, self.reporting
            ))
        })
    }
}
