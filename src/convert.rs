//! Currency / medal conversion.
//!
//! Two paths exist. The rental path (investment) trades currency for medals at
//! the lending rate. The payout path (recovery) exchanges medals back to
//! currency at `lending_rate * 50 / exchange_rate` per medal.

use crate::error::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Reference block size of the payout convention.
pub const PAYOUT_REFERENCE_BLOCK: f64 = 50.0;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, Display,
)]
pub enum Unit {
    #[serde(rename = "円", alias = "currency", alias = "yen")]
    #[strum(to_string = "円", serialize = "currency", serialize = "yen")]
    Currency,
    #[serde(rename = "枚", alias = "medal", alias = "medals")]
    #[strum(to_string = "枚", serialize = "medal", serialize = "medals")]
    Medal,
}

/// Validated lending / exchange rate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    lending_rate: f64,
    exchange_rate: f64,
}

impl Rates {
    pub fn new(lending_rate: f64, exchange_rate: f64) -> LedgerResult<Self> {
        if !lending_rate.is_finite() || lending_rate <= 0.0 {
            return Err(LedgerError::InvalidRate {
                name: "lending rate",
                value: lending_rate,
            });
        }
        if !exchange_rate.is_finite() || exchange_rate <= 0.0 {
            return Err(LedgerError::InvalidRate {
                name: "exchange rate",
                value: exchange_rate,
            });
        }
        Ok(Self {
            lending_rate,
            exchange_rate,
        })
    }

    pub fn lending_rate(&self) -> f64 {
        self.lending_rate
    }

    pub fn exchange_rate(&self) -> f64 {
        self.exchange_rate
    }

    /// Currency paid per medal at exchange.
    pub fn payout_per_medal(&self) -> f64 {
        self.lending_rate * PAYOUT_REFERENCE_BLOCK / self.exchange_rate
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amount {
    pub value: f64,
    pub unit: Unit,
}

impl Amount {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Medals obtained at rental.
    pub fn invested_medals(&self, rates: &Rates) -> f64 {
        match self.unit {
            Unit::Medal => self.value,
            Unit::Currency => self.value / rates.lending_rate,
        }
    }

    /// Currency spent at rental.
    pub fn invested_currency(&self, rates: &Rates) -> f64 {
        match self.unit {
            Unit::Currency => self.value,
            Unit::Medal => self.value * rates.lending_rate,
        }
    }

    /// Medals held at payout.
    pub fn recovered_medals(&self, rates: &Rates) -> f64 {
        match self.unit {
            Unit::Medal => self.value,
            Unit::Currency => self.value / rates.payout_per_medal(),
        }
    }

    /// Currency received at payout, floored when exchanged from medals.
    pub fn recovered_currency(&self, rates: &Rates) -> f64 {
        match self.unit {
            Unit::Currency => self.value,
            Unit::Medal => (self.value * rates.payout_per_medal()).floor(),
        }
    }
}

/// Session balance in currency: recovery minus investment.
pub fn profit_yen(investment: &Amount, recovery: &Amount, rates: &Rates) -> i64 {
    let diff = recovery.recovered_currency(rates) - investment.invested_currency(rates);
    diff.round() as i64
}

/// Session balance in medals, floored.
pub fn medal_diff(investment: &Amount, recovery: &Amount, rates: &Rates) -> i64 {
    (recovery.recovered_medals(rates) - investment.invested_medals(rates)).floor() as i64
}
