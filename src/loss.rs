//! Medal loss from missed interventions and missed minor roles.

use crate::accuracy::{CalcMode, DetailTally, SimpleTally};
use crate::machines::{DetailFields, MachineProfile};
use serde::Serialize;

/// Counters are passed through unclamped, so negative values act as corrections.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MinorLossCounts {
    pub watermelon: i64,
    pub cherry: i64,
    /// Already in medals.
    pub other: f64,
}

/// Per-miss medal costs taken from a machine profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossRates {
    pub tech_loss_per_miss: f64,
    pub watermelon_loss: f64,
    pub cherry_loss: f64,
}

impl From<&MachineProfile> for LossRates {
    fn from(profile: &MachineProfile) -> Self {
        Self {
            tech_loss_per_miss: profile.tech_loss_per_miss,
            watermelon_loss: profile.watermelon_loss,
            cherry_loss: profile.cherry_loss,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LossBreakdown {
    pub tech: f64,
    pub watermelon: f64,
    pub cherry: f64,
    pub other: f64,
    pub misses: i64,
}

impl LossBreakdown {
    pub fn total(&self) -> f64 {
        self.tech + self.watermelon + self.cherry + self.other
    }

    pub fn summary(&self) -> LossSummary {
        LossSummary {
            total: self.total(),
            misses: self.misses,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LossSummary {
    pub total: f64,
    pub misses: i64,
}

/// Technical misses counted for the selected mode, gated like the accuracy.
pub fn tech_misses(
    mode: CalcMode,
    simple: SimpleTally,
    detail: DetailTally,
    fields: DetailFields,
) -> i64 {
    match mode {
        CalcMode::Simple => simple.misses,
        CalcMode::Detail => detail.enabled_totals(fields).miss,
    }
}

pub fn loss_breakdown(
    mode: CalcMode,
    simple: SimpleTally,
    detail: DetailTally,
    minor: MinorLossCounts,
    fields: DetailFields,
    rates: LossRates,
) -> LossBreakdown {
    let misses = tech_misses(mode, simple, detail, fields);

    LossBreakdown {
        tech: misses as f64 * rates.tech_loss_per_miss,
        watermelon: minor.watermelon as f64 * rates.watermelon_loss,
        cherry: minor.cherry as f64 * rates.cherry_loss,
        other: minor.other,
        misses,
    }
}

pub fn calculate_loss(
    mode: CalcMode,
    simple: SimpleTally,
    detail: DetailTally,
    minor: MinorLossCounts,
    profile: &MachineProfile,
) -> LossSummary {
    loss_breakdown(
        mode,
        simple,
        detail,
        minor,
        profile.detail_fields,
        LossRates::from(profile),
    )
    .summary()
}
