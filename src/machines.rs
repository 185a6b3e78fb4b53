//! Machine configuration registry.
//!
//! Every machine-specific constant lives here. Calculators never branch on a
//! machine name; they receive the fields of a resolved [`MachineProfile`].

use crate::error::{LedgerError, LedgerResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, info};

/// Name of the profile every unknown machine resolves to.
pub const FALLBACK_MACHINE: &str = "その他";

/// Gross behavioral family, decides which detail form a front end shows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, Display,
)]
pub enum MachineSection {
    #[serde(rename = "versusRevise")]
    #[strum(serialize = "versusRevise")]
    VersusRevise,
    #[serde(rename = "hanabi")]
    #[strum(serialize = "hanabi")]
    Hanabi,
    #[serde(rename = "other")]
    #[strum(serialize = "other")]
    Other,
}

/// Refines which input fields are relevant inside a section.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, Display,
)]
pub enum DetailVariant {
    #[serde(rename = "versusRevise")]
    #[strum(serialize = "versusRevise")]
    VersusRevise,
    #[serde(rename = "hanabi")]
    #[strum(serialize = "hanabi")]
    Hanabi,
    #[serde(rename = "lHanabi")]
    #[strum(serialize = "lHanabi")]
    LHanabi,
    #[serde(rename = "other")]
    #[strum(serialize = "other")]
    Other,
}

/// Reel stages whose sub-forms are meaningful for a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailFields {
    /// Middle reel stopped first.
    pub mid: bool,
    /// Right reel stopped first.
    pub right: bool,
}

impl DetailFields {
    pub fn any(&self) -> bool {
        self.mid || self.right
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MachineProfile {
    pub machine_section: MachineSection,
    pub detail_variant: DetailVariant,
    /// Max payout of one REG bonus.
    pub reg_max: u32,
    /// Medals lost per failed technical intervention.
    pub tech_loss_per_miss: f64,
    pub watermelon_loss: f64,
    pub cherry_loss: f64,
    pub watermelon_name: String,
    pub cherry_name: String,
    pub detail_fields: DetailFields,
}

impl MachineProfile {
    fn validate(&self, machine_name: &str) -> LedgerResult<()> {
        let invalid = |msg: String| {
            Err(LedgerError::Config(format!(
                "Invalid machine config \"{}\": {}",
                machine_name, msg
            )))
        };

        for (key, value) in [
            ("watermelonName", &self.watermelon_name),
            ("cherryName", &self.cherry_name),
        ] {
            if value.trim().is_empty() {
                return invalid(format!("\"{}\" must be a non-empty string", key));
            }
        }

        for (key, value) in [
            ("techLossPerMiss", self.tech_loss_per_miss),
            ("watermelonLoss", self.watermelon_loss),
            ("cherryLoss", self.cherry_loss),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return invalid(format!(
                    "\"{}\" must be a positive finite number (got {})",
                    key, value
                ));
            }
        }

        Ok(())
    }
}

/// Validated, ordered table of machine profiles.
///
/// Insertion order is significant: the first entry is the default selection.
#[derive(Debug, Clone)]
pub struct MachineRegistry {
    entries: Vec<(String, MachineProfile)>,
    index: HashMap<String, usize>,
    fallback: usize,
}

static BUILTIN: Lazy<MachineRegistry> = Lazy::new(|| {
    MachineRegistry::from_entries(builtin_entries())
        .unwrap_or_else(|e| panic!("❌ Built-in machine table is invalid: {}", e))
});

impl MachineRegistry {
    /// The process-wide registry built from the embedded table.
    ///
    /// Panics on first access if the embedded table violates an invariant.
    pub fn builtin() -> &'static MachineRegistry {
        &BUILTIN
    }

    pub fn from_entries(entries: Vec<(String, MachineProfile)>) -> LedgerResult<Self> {
        if entries.is_empty() {
            return Err(LedgerError::Config("machine table is empty".to_string()));
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (i, (name, profile)) in entries.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(LedgerError::Config(
                    "machine names must be non-empty".to_string(),
                ));
            }
            profile.validate(name)?;
            if index.insert(name.clone(), i).is_some() {
                return Err(LedgerError::Config(format!(
                    "duplicate machine name \"{}\"",
                    name
                )));
            }
        }

        let fallback = *index.get(FALLBACK_MACHINE).ok_or_else(|| {
            LedgerError::Config(format!(
                "fallback machine \"{}\" is missing",
                FALLBACK_MACHINE
            ))
        })?;

        info!("Machine registry ready: {} profiles", entries.len());
        Ok(Self {
            entries,
            index,
            fallback,
        })
    }

    /// Loads a table from a JSON object keyed by machine name.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let content = fs::read_to_string(&path)?;
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content)?;

        let mut entries = Vec::with_capacity(raw.len());
        for (name, value) in raw {
            let profile: MachineProfile = serde_json::from_value(value).map_err(|e| {
                LedgerError::Config(format!("Invalid machine config \"{}\": {}", name, e))
            })?;
            entries.push((name, profile));
        }

        Self::from_entries(entries)
    }

    /// Exact profile for a known name, the fallback profile otherwise.
    pub fn resolve(&self, machine_name: &str) -> &MachineProfile {
        match self.index.get(machine_name) {
            Some(&i) => &self.entries[i].1,
            None => {
                debug!(
                    "Unknown machine '{}', resolving to '{}'",
                    machine_name, FALLBACK_MACHINE
                );
                &self.entries[self.fallback].1
            }
        }
    }

    pub fn contains(&self, machine_name: &str) -> bool {
        self.index.contains_key(machine_name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn default_machine(&self) -> &str {
        &self.entries[0].0
    }

    pub fn fallback_name(&self) -> &str {
        &self.entries[self.fallback].0
    }

    pub fn fallback(&self) -> &MachineProfile {
        &self.entries[self.fallback].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MachineProfile)> {
        self.entries.iter().map(|(name, p)| (name.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry(
    name: &str,
    section: MachineSection,
    variant: DetailVariant,
    reg_max: u32,
    [tech_loss_per_miss, watermelon_loss, cherry_loss]: [f64; 3],
    [watermelon_name, cherry_name]: [&str; 2],
    detail_fields: DetailFields,
) -> (String, MachineProfile) {
    (
        name.to_string(),
        MachineProfile {
            machine_section: section,
            detail_variant: variant,
            reg_max,
            tech_loss_per_miss,
            watermelon_loss,
            cherry_loss,
            watermelon_name: watermelon_name.to_string(),
            cherry_name: cherry_name.to_string(),
            detail_fields,
        },
    )
}

fn builtin_entries() -> Vec<(String, MachineProfile)> {
    use DetailVariant as V;
    use MachineSection as S;

    vec![
        entry(
            "バーサスリヴァイズ",
            S::VersusRevise,
            V::VersusRevise,
            112,
            [11.0, 12.0, 2.0],
            ["スイカ", "チェリー"],
            DetailFields { mid: true, right: true },
        ),
        entry(
            "新ハナビ",
            S::Hanabi,
            V::Hanabi,
            71,
            [13.0, 15.0, 4.0],
            ["氷", "チェリー"],
            DetailFields { mid: true, right: true },
        ),
        // Only the right-first stop is a meaningful intervention here.
        entry(
            "Lハナビ",
            S::Hanabi,
            V::LHanabi,
            71,
            [13.0, 15.0, 4.0],
            ["氷", "チェリー"],
            DetailFields { mid: false, right: true },
        ),
        entry(
            FALLBACK_MACHINE,
            S::Other,
            V::Other,
            0,
            [10.0, 15.0, 4.0],
            ["小役", "小役"],
            DetailFields { mid: false, right: false },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_default_is_first_entry() {
        let reg = MachineRegistry::builtin();
        assert_eq!(reg.default_machine(), "バーサスリヴァイズ");
        assert_eq!(reg.fallback_name(), FALLBACK_MACHINE);
        assert_eq!(reg.len(), 4);
    }

    #[test]
    fn variant_names_round_trip_through_strum() {
        use std::str::FromStr;
        assert_eq!(DetailVariant::LHanabi.to_string(), "lHanabi");
        assert_eq!(
            DetailVariant::from_str("lHanabi").unwrap(),
            DetailVariant::LHanabi
        );
        assert!(MachineSection::from_str("pachinko").is_err());
    }
}
