use crate::error::LedgerResult;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LedgerConfig {
    #[command(flatten)]
    pub rates: RateDefaults,
    #[command(flatten)]
    pub store: StoreParams,
}

/// Rates assumed when a form leaves them blank.
#[derive(Args, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateDefaults {
    /// Currency spent per rented medal.
    #[arg(long = "default-lending-rate", id = "default_lending_rate", default_value_t = 20.0)]
    pub lending_rate: f64,
    /// Medals per reference block at exchange.
    #[arg(long = "default-exchange-rate", id = "default_exchange_rate", default_value_t = 50.0)]
    pub exchange_rate: f64,
}

impl Default for RateDefaults {
    fn default() -> Self {
        Self {
            lending_rate: 20.0,
            exchange_rate: 50.0,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreParams {
    #[arg(long, default_value = "data/records.json")]
    pub records: String,

    /// Machine table override (JSON object keyed by machine name).
    #[arg(long)]
    pub machines: Option<String>,
}

impl Default for StoreParams {
    fn default() -> Self {
        Self {
            records: "data/records.json".to_string(),
            machines: None,
        }
    }
}

impl LedgerConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Values typed on the command line win over values from the file.
    pub fn merge_from_cli(&mut self, cli: &LedgerConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(rates.lending_rate, "default_lending_rate");
        update_if_present!(rates.exchange_rate, "default_exchange_rate");
        update_if_present!(store.records, "records");
        update_if_present!(store.machines, "machines");
    }
}
