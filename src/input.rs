//! Raw form input and its parsed, immutable counterpart.

use crate::accuracy::{CalcMode, DetailTally, SimpleTally};
use crate::config::RateDefaults;
use crate::convert::{self, Amount, Rates, Unit};
use crate::error::{LedgerError, LedgerResult};
use crate::loss::MinorLossCounts;
use crate::stats::BonusCounters;
use serde::{Deserialize, Deserializer, Serialize};

/// One form submission, numeric fields kept as the text the user typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionInput {
    pub date: String,
    pub machine_name: String,
    pub memo: String,
    /// Player joined a machine already in progress.
    pub mid_start: bool,
    pub calc_mode: CalcMode,

    #[serde(deserialize_with = "lenient_text")]
    pub total_games: String,
    #[serde(deserialize_with = "lenient_text")]
    pub big_count: String,
    #[serde(deserialize_with = "lenient_text")]
    pub reg_count: String,
    #[serde(deserialize_with = "lenient_text")]
    pub start_total_games: String,
    #[serde(deserialize_with = "lenient_text")]
    pub start_big_count: String,
    #[serde(deserialize_with = "lenient_text")]
    pub start_reg_count: String,

    #[serde(deserialize_with = "lenient_text")]
    pub investment: String,
    pub investment_unit: Unit,
    #[serde(deserialize_with = "lenient_text")]
    pub recovery: String,
    pub recovery_unit: Unit,
    #[serde(deserialize_with = "lenient_text")]
    pub lending_rate: String,
    #[serde(deserialize_with = "lenient_text")]
    pub exchange_rate: String,

    #[serde(deserialize_with = "lenient_text")]
    pub tech_attempt_count: String,
    #[serde(deserialize_with = "lenient_text")]
    pub tech_miss_count: String,

    #[serde(deserialize_with = "lenient_text")]
    pub mid_success: String,
    #[serde(deserialize_with = "lenient_text")]
    pub mid_not_watermelon: String,
    #[serde(deserialize_with = "lenient_text")]
    pub mid_miss: String,
    #[serde(deserialize_with = "lenient_text")]
    pub right_success: String,
    #[serde(deserialize_with = "lenient_text")]
    pub right_miss: String,

    #[serde(deserialize_with = "lenient_text")]
    pub watermelon_loss_count: String,
    #[serde(deserialize_with = "lenient_text")]
    pub cherry_loss_count: String,
    #[serde(deserialize_with = "lenient_text")]
    pub other_loss_count: String,
}

impl Default for SessionInput {
    fn default() -> Self {
        let defaults = RateDefaults::default();
        Self {
            date: String::new(),
            machine_name: String::new(),
            memo: String::new(),
            mid_start: false,
            calc_mode: CalcMode::Detail,
            total_games: String::new(),
            big_count: String::new(),
            reg_count: String::new(),
            start_total_games: "0".to_string(),
            start_big_count: "0".to_string(),
            start_reg_count: "0".to_string(),
            investment: String::new(),
            investment_unit: Unit::Currency,
            recovery: String::new(),
            recovery_unit: Unit::Medal,
            lending_rate: defaults.lending_rate.to_string(),
            exchange_rate: defaults.exchange_rate.to_string(),
            tech_attempt_count: String::new(),
            tech_miss_count: String::new(),
            mid_success: String::new(),
            mid_not_watermelon: String::new(),
            mid_miss: String::new(),
            right_success: String::new(),
            right_miss: String::new(),
            watermelon_loss_count: "0".to_string(),
            cherry_loss_count: "0".to_string(),
            other_loss_count: "0".to_string(),
        }
    }
}

/// Investment and recovery of one session with the rates it was played at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoneyFlow {
    pub investment: Amount,
    pub recovery: Amount,
    pub lending_rate: f64,
    pub exchange_rate: f64,
}

impl MoneyFlow {
    pub fn rates(&self) -> LedgerResult<Rates> {
        Rates::new(self.lending_rate, self.exchange_rate)
    }

    pub fn profit_yen(&self) -> LedgerResult<i64> {
        Ok(convert::profit_yen(&self.investment, &self.recovery, &self.rates()?))
    }

    pub fn medal_diff(&self) -> LedgerResult<i64> {
        Ok(convert::medal_diff(&self.investment, &self.recovery, &self.rates()?))
    }
}

/// Parsed values of one submission. Calculators take the slices they need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionValues {
    pub mid_start: bool,
    pub calc_mode: CalcMode,
    pub end: BonusCounters,
    pub start: BonusCounters,
    pub money: MoneyFlow,
    pub simple: SimpleTally,
    pub detail: DetailTally,
    pub minor: MinorLossCounts,
}

impl SessionInput {
    /// Blank fields read as zero, blank rates as the configured defaults.
    /// Rates are not range-checked here; see [`crate::convert::Rates::new`].
    pub fn parse(&self, rate_defaults: &RateDefaults) -> LedgerResult<SessionValues> {
        Ok(SessionValues {
            mid_start: self.mid_start,
            calc_mode: self.calc_mode,
            end: BonusCounters {
                games: parse_count("totalGames", &self.total_games)?,
                big: parse_count("bigCount", &self.big_count)?,
                reg: parse_count("regCount", &self.reg_count)?,
            },
            start: BonusCounters {
                games: parse_count("startTotalGames", &self.start_total_games)?,
                big: parse_count("startBigCount", &self.start_big_count)?,
                reg: parse_count("startRegCount", &self.start_reg_count)?,
            },
            money: self.money_flow(rate_defaults)?,
            simple: SimpleTally {
                attempts: parse_count("techAttemptCount", &self.tech_attempt_count)?,
                misses: parse_count("techMissCount", &self.tech_miss_count)?,
            },
            detail: DetailTally {
                mid_success: parse_count("midSuccess", &self.mid_success)?,
                mid_not_watermelon: parse_count("midNotWatermelon", &self.mid_not_watermelon)?,
                mid_miss: parse_count("midMiss", &self.mid_miss)?,
                right_success: parse_count("rightSuccess", &self.right_success)?,
                right_miss: parse_count("rightMiss", &self.right_miss)?,
            },
            minor: MinorLossCounts {
                watermelon: parse_count("watermelonLossCount", &self.watermelon_loss_count)?,
                cherry: parse_count("cherryLossCount", &self.cherry_loss_count)?,
                other: parse_amount("otherLossCount", &self.other_loss_count)?,
            },
        })
    }

    /// Only the money fields, so a chart never trips over unrelated counters.
    pub fn money_flow(&self, rate_defaults: &RateDefaults) -> LedgerResult<MoneyFlow> {
        Ok(MoneyFlow {
            investment: Amount::new(
                parse_amount("investment", &self.investment)?,
                self.investment_unit,
            ),
            recovery: Amount::new(parse_amount("recovery", &self.recovery)?, self.recovery_unit),
            lending_rate: parse_rate(
                "lendingRate",
                &self.lending_rate,
                rate_defaults.lending_rate,
            )?,
            exchange_rate: parse_rate(
                "exchangeRate",
                &self.exchange_rate,
                rate_defaults.exchange_rate,
            )?,
        })
    }
}

/// Integral counter. `"12"` and `"12.0"` are accepted, `"12.5"` is not.
pub fn parse_count(field: &'static str, raw: &str) -> LedgerResult<i64> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(0);
    }
    if let Ok(v) = s.parse::<i64>() {
        return Ok(v);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(v as i64),
        _ => Err(LedgerError::InvalidNumber {
            field,
            value: raw.to_string(),
        }),
    }
}

pub fn parse_amount(field: &'static str, raw: &str) -> LedgerResult<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(LedgerError::InvalidNumber {
            field,
            value: raw.to_string(),
        }),
    }
}

fn parse_rate(field: &'static str, raw: &str, default: f64) -> LedgerResult<f64> {
    if raw.trim().is_empty() {
        return Ok(default);
    }
    parse_amount(field, raw)
}

/// Accepts a string, a number or null for a text field.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_text(deserializer)?.unwrap_or_default())
}

/// Like `lenient_text`, but null stays `None`. Also used for record ids,
/// which older stores wrote as millisecond timestamps.
pub(crate) fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(i) => i.to_string(),
        Raw::Float(f) => f.to_string(),
    }))
}
