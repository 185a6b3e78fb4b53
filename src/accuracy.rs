//! Technical-intervention accuracy.

use crate::machines::DetailFields;
use crate::stats::Percent;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CalcMode {
    /// Attempt / miss tally.
    Simple,
    /// Per reel-stage breakdown.
    #[default]
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimpleTally {
    pub attempts: i64,
    pub misses: i64,
}

/// Per-stage outcomes of the detail form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetailTally {
    pub mid_success: i64,
    /// Mid-first stop rescued by a non-watermelon outcome. Recorded only.
    pub mid_not_watermelon: i64,
    pub mid_miss: i64,
    pub right_success: i64,
    pub right_miss: i64,
}

/// Sums over the stages a machine enables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageTotals {
    pub success: i64,
    pub miss: i64,
    pub rescued: i64,
}

impl StageTotals {
    pub fn required_attempts(&self) -> i64 {
        self.success.saturating_add(self.miss)
    }
}

impl DetailTally {
    /// Disabled stages contribute nothing, whatever was typed into them.
    pub fn enabled_totals(&self, fields: DetailFields) -> StageTotals {
        let mut totals = StageTotals::default();
        if fields.mid {
            totals.success = totals.success.saturating_add(self.mid_success);
            totals.miss = totals.miss.saturating_add(self.mid_miss);
            totals.rescued = totals.rescued.saturating_add(self.mid_not_watermelon);
        }
        if fields.right {
            totals.success = totals.success.saturating_add(self.right_success);
            totals.miss = totals.miss.saturating_add(self.right_miss);
        }
        totals
    }
}

pub fn simple_accuracy(tally: SimpleTally) -> Option<Percent> {
    if tally.attempts > 0 {
        let hits = tally.attempts.saturating_sub(tally.misses) as f64;
        Some(Percent(hits / tally.attempts as f64 * 100.0))
    } else {
        None
    }
}

pub fn detail_accuracy(tally: DetailTally, fields: DetailFields) -> Option<Percent> {
    let totals = tally.enabled_totals(fields);
    let required = totals.required_attempts();
    if required > 0 {
        Some(Percent(totals.success as f64 / required as f64 * 100.0))
    } else {
        None
    }
}

/// Success rate for the selected mode, `None` when nothing was attempted.
pub fn tech_accuracy(
    mode: CalcMode,
    simple: SimpleTally,
    detail: DetailTally,
    fields: DetailFields,
) -> Option<Percent> {
    match mode {
        CalcMode::Simple => simple_accuracy(simple),
        CalcMode::Detail => detail_accuracy(detail, fields),
    }
}
