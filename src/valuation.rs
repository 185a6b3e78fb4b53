//! Turns one form submission into an immutable, persistable record.

use crate::accuracy::tech_accuracy;
use crate::config::RateDefaults;
use crate::error::LedgerResult;
use crate::input::{lenient_optional_text, SessionInput, SessionValues};
use crate::loss::{loss_breakdown, LossBreakdown, LossRates};
use crate::machines::MachineRegistry;
use crate::stats::{personal_stats, SessionStats};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A valuated session. Never edited in place; see [`DerivedRecord::revise`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedRecord {
    /// Assigned by the store.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_text"
    )]
    pub id: Option<String>,
    #[serde(flatten)]
    pub input: SessionInput,
    pub profit_yen: i64,
    /// Medals.
    pub total_loss: f64,
    pub total_misses: i64,
    pub stats: SessionStats,
}

impl DerivedRecord {
    pub fn date(&self) -> &str {
        &self.input.date
    }

    pub fn machine_name(&self) -> &str {
        &self.input.machine_name
    }

    /// Recomputes everything from a fresh form, keeping the record's id.
    pub fn revise(&self, input: SessionInput, valuator: &Valuator) -> LedgerResult<DerivedRecord> {
        let mut record = valuator.evaluate(input)?;
        record.id = self.id.clone();
        Ok(record)
    }
}

/// Everything derived from a form, before it is merged into a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Valuation {
    pub stats: SessionStats,
    pub loss: LossBreakdown,
    pub profit_yen: i64,
    pub medal_diff: i64,
}

pub struct Valuator<'a> {
    registry: &'a MachineRegistry,
    rate_defaults: RateDefaults,
}

impl<'a> Valuator<'a> {
    pub fn new(registry: &'a MachineRegistry, rate_defaults: RateDefaults) -> Self {
        Self {
            registry,
            rate_defaults,
        }
    }

    pub fn registry(&self) -> &MachineRegistry {
        self.registry
    }

    pub fn rate_defaults(&self) -> &RateDefaults {
        &self.rate_defaults
    }

    /// Derived values for a form, e.g. for a live preview while typing.
    pub fn preview(&self, input: &SessionInput) -> LedgerResult<Valuation> {
        let values = input.parse(&self.rate_defaults)?;
        self.valuate(&input.machine_name, &values)
    }

    pub fn evaluate(&self, input: SessionInput) -> LedgerResult<DerivedRecord> {
        let valuation = self.preview(&input)?;
        let summary = valuation.loss.summary();

        Ok(DerivedRecord {
            id: None,
            input,
            profit_yen: valuation.profit_yen,
            total_loss: summary.total,
            total_misses: summary.misses,
            stats: valuation.stats,
        })
    }

    fn valuate(&self, machine_name: &str, values: &SessionValues) -> LedgerResult<Valuation> {
        let profile = self.registry.resolve(machine_name);
        let fields = profile.detail_fields;

        let accuracy = tech_accuracy(values.calc_mode, values.simple, values.detail, fields);
        let personal = personal_stats(values.end, values.start, values.mid_start, accuracy);

        let loss = loss_breakdown(
            values.calc_mode,
            values.simple,
            values.detail,
            values.minor,
            fields,
            LossRates::from(profile),
        );

        let profit_yen = values.money.profit_yen()?;
        let medal_diff = values.money.medal_diff()?;

        debug!(
            "Valuated '{}': {} games, profit {} yen, loss {} medals",
            machine_name,
            personal.games,
            profit_yen,
            loss.total()
        );

        Ok(Valuation {
            stats: SessionStats { personal },
            loss,
            profit_yen,
            medal_diff,
        })
    }
}

/// Evaluates a form against `registry` with the default rates.
pub fn evaluate(input: SessionInput, registry: &MachineRegistry) -> LedgerResult<DerivedRecord> {
    Valuator::new(registry, RateDefaults::default()).evaluate(input)
}
