//! Personal performance statistics.
//!
//! Pure counter arithmetic. Knows nothing about money or machines.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Display placeholder for a ratio whose denominator is zero.
pub const NOT_APPLICABLE: &str = "-";

/// Cumulative game and bonus counters as shown on the machine's data counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BonusCounters {
    pub games: i64,
    pub big: i64,
    pub reg: i64,
}

/// Games per bonus, rendered with one decimal place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    Value(f64),
    NotApplicable,
}

impl Ratio {
    pub fn value(&self) -> Option<f64> {
        match self {
            Ratio::Value(v) => Some(*v),
            Ratio::NotApplicable => None,
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Value(v) => write!(f, "{:.1}", v),
            Ratio::NotApplicable => f.write_str(NOT_APPLICABLE),
        }
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ratio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == NOT_APPLICABLE {
            return Ok(Ratio::NotApplicable);
        }
        s.parse::<f64>()
            .map(Ratio::Value)
            .map_err(serde::de::Error::custom)
    }
}

/// A percentage rendered with one decimal place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percent(pub f64);

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<f64>()
            .map(Percent)
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalStats {
    pub games: i64,
    pub big: i64,
    pub reg: i64,
    pub big_prob: Ratio,
    pub reg_prob: Ratio,
    pub combined_prob: Ratio,
    /// `None` when no attempt was recorded.
    pub tech_accuracy: Option<Percent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub personal: PersonalStats,
}

pub fn calc_prob(games: i64, count: i64) -> Ratio {
    if count > 0 {
        Ratio::Value(games as f64 / count as f64)
    } else {
        Ratio::NotApplicable
    }
}

/// The player's own share of the counters, saturating at the `i64` bounds.
///
/// Start counters only apply to a mid-session start; otherwise the whole
/// session is attributed to the player.
pub fn personal_counts(end: BonusCounters, start: BonusCounters, mid_start: bool) -> BonusCounters {
    let start = if mid_start {
        start
    } else {
        BonusCounters::default()
    };

    BonusCounters {
        games: end.games.saturating_sub(start.games).max(0),
        big: end.big.saturating_sub(start.big).max(0),
        reg: end.reg.saturating_sub(start.reg).max(0),
    }
}

pub fn personal_stats(
    end: BonusCounters,
    start: BonusCounters,
    mid_start: bool,
    tech_accuracy: Option<Percent>,
) -> PersonalStats {
    let own = personal_counts(end, start, mid_start);

    PersonalStats {
        games: own.games,
        big: own.big,
        reg: own.reg,
        big_prob: calc_prob(own.games, own.big),
        reg_prob: calc_prob(own.games, own.reg),
        combined_prob: calc_prob(own.games, own.big.saturating_add(own.reg)),
        tech_accuracy,
    }
}
