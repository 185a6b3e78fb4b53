//! Date filtering, chart series and totals over persisted records.
//!
//! Everything here is recomputed from scratch on each call.

use crate::config::RateDefaults;
use crate::error::LedgerResult;
use crate::valuation::DerivedRecord;
use serde::{Deserialize, Serialize};

/// Inclusive `YYYY-MM-DD` bounds compared as strings. `None` is unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRange {
    pub fn new(start: Option<String>, end: Option<String>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: &str) -> bool {
        if let Some(start) = &self.start {
            if date < start.as_str() {
                return false;
            }
        }
        if let Some(end) = &self.end {
            if date > end.as_str() {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: String,
    pub per_session_medal_diff: i64,
    pub cumulative_medal_diff: i64,
    pub loss: f64,
    pub display_date: String,
}

/// Keeps the input order.
pub fn filter_by_date<'a>(records: &'a [DerivedRecord], range: &DateRange) -> Vec<&'a DerivedRecord> {
    records.iter().filter(|r| range.contains(r.date())).collect()
}

pub fn filter_by_machine<'a>(
    records: &[&'a DerivedRecord],
    machine_name: &str,
) -> Vec<&'a DerivedRecord> {
    records
        .iter()
        .copied()
        .filter(|r| r.machine_name() == machine_name)
        .collect()
}

/// `2024-03-01` becomes `03/01`.
pub fn display_date(date: &str) -> String {
    date.split('-').skip(1).collect::<Vec<_>>().join("/")
}

/// Builds a chronological series from records given newest first.
///
/// Each session's medal diff is recomputed from its stored money fields.
pub fn chart_series(
    records: &[&DerivedRecord],
    rate_defaults: &RateDefaults,
) -> LedgerResult<Vec<ChartPoint>> {
    let mut cumulative = 0i64;
    let mut points = Vec::with_capacity(records.len());

    for record in records.iter().rev() {
        let diff = record.input.money_flow(rate_defaults)?.medal_diff()?;
        cumulative = cumulative.saturating_add(diff);

        points.push(ChartPoint {
            date: record.date().to_string(),
            per_session_medal_diff: diff,
            cumulative_medal_diff: cumulative,
            loss: record.total_loss,
            display_date: display_date(record.date()),
        });
    }

    Ok(points)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub records: usize,
    pub profit_yen: i64,
    pub loss: f64,
    pub games: i64,
    pub big: i64,
    pub reg: i64,
}

impl Totals {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a DerivedRecord>,
    {
        records.into_iter().fold(Totals::default(), |mut acc, r| {
            let personal = &r.stats.personal;
            acc.records += 1;
            acc.profit_yen = acc.profit_yen.saturating_add(r.profit_yen);
            acc.loss += r.total_loss;
            acc.games = acc.games.saturating_add(personal.games);
            acc.big = acc.big.saturating_add(personal.big);
            acc.reg = acc.reg.saturating_add(personal.reg);
            acc
        })
    }

    pub fn for_machine<'a, I>(records: I, machine_name: &str) -> Self
    where
        I: IntoIterator<Item = &'a DerivedRecord>,
    {
        Self::from_records(
            records
                .into_iter()
                .filter(|r| r.machine_name() == machine_name),
        )
    }
}
