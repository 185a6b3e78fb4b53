use crate::reports;
use clap::Args;
use slotledger::accuracy::CalcMode;
use slotledger::config::LedgerConfig;
use slotledger::convert::Unit;
use slotledger::error::{LedgerError, LedgerResult};
use slotledger::input::SessionInput;
use slotledger::machines::MachineRegistry;
use slotledger::store::RecordStore;
use slotledger::valuation::Valuator;
use std::fs;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Start from a form saved as JSON; flags below override its fields.
    #[arg(short, long)]
    pub input: Option<String>,

    /// Replace the record with this id instead of adding a new one.
    #[arg(long)]
    pub replace: Option<String>,

    /// Print the valuation without storing it.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    #[arg(long)]
    pub date: Option<String>,
    #[arg(short, long)]
    pub machine: Option<String>,
    #[arg(long)]
    pub memo: Option<String>,
    #[arg(long, default_value_t = false)]
    pub mid_start: bool,
    /// simple | detail
    #[arg(long)]
    pub mode: Option<String>,

    #[arg(long)]
    pub games: Option<String>,
    #[arg(long)]
    pub big: Option<String>,
    #[arg(long)]
    pub reg: Option<String>,
    #[arg(long)]
    pub start_games: Option<String>,
    #[arg(long)]
    pub start_big: Option<String>,
    #[arg(long)]
    pub start_reg: Option<String>,

    #[arg(long)]
    pub investment: Option<String>,
    /// 円 | 枚 (or currency | medal)
    #[arg(long)]
    pub investment_unit: Option<String>,
    #[arg(long)]
    pub recovery: Option<String>,
    #[arg(long)]
    pub recovery_unit: Option<String>,
    #[arg(long)]
    pub lending_rate: Option<String>,
    #[arg(long)]
    pub exchange_rate: Option<String>,

    #[arg(long)]
    pub attempts: Option<String>,
    #[arg(long)]
    pub misses: Option<String>,
    #[arg(long)]
    pub mid_success: Option<String>,
    #[arg(long)]
    pub mid_not_watermelon: Option<String>,
    #[arg(long)]
    pub mid_miss: Option<String>,
    #[arg(long)]
    pub right_success: Option<String>,
    #[arg(long)]
    pub right_miss: Option<String>,

    #[arg(long)]
    pub watermelon: Option<String>,
    #[arg(long)]
    pub cherry: Option<String>,
    #[arg(long)]
    pub other: Option<String>,
}

impl AddArgs {
    fn build_input(&self, registry: &MachineRegistry) -> LedgerResult<SessionInput> {
        let mut input = match &self.input {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => SessionInput::default(),
        };

        macro_rules! overlay {
            ($($flag:ident => $field:ident),* $(,)?) => {
                $(
                    if let Some(value) = &self.$flag {
                        input.$field = value.clone();
                    }
                )*
            };
        }

        overlay!(
            date => date,
            machine => machine_name,
            memo => memo,
            games => total_games,
            big => big_count,
            reg => reg_count,
            start_games => start_total_games,
            start_big => start_big_count,
            start_reg => start_reg_count,
            investment => investment,
            recovery => recovery,
            lending_rate => lending_rate,
            exchange_rate => exchange_rate,
            attempts => tech_attempt_count,
            misses => tech_miss_count,
            mid_success => mid_success,
            mid_not_watermelon => mid_not_watermelon,
            mid_miss => mid_miss,
            right_success => right_success,
            right_miss => right_miss,
            watermelon => watermelon_loss_count,
            cherry => cherry_loss_count,
            other => other_loss_count,
        );

        if self.mid_start {
            input.mid_start = true;
        }
        if let Some(mode) = &self.mode {
            input.calc_mode = CalcMode::from_str(mode)
                .map_err(|_| LedgerError::Config(format!("unknown calc mode '{}'", mode)))?;
        }
        if let Some(unit) = &self.investment_unit {
            input.investment_unit = parse_unit(unit)?;
        }
        if let Some(unit) = &self.recovery_unit {
            input.recovery_unit = parse_unit(unit)?;
        }

        if input.date.trim().is_empty() {
            input.date = chrono::Local::now().format("%Y-%m-%d").to_string();
        }
        if input.machine_name.trim().is_empty() {
            input.machine_name = registry.default_machine().to_string();
        }
        if !registry.contains(&input.machine_name) {
            warn!(
                "Unknown machine '{}': valuating with the '{}' profile",
                input.machine_name,
                registry.fallback_name()
            );
        }

        Ok(input)
    }
}

fn parse_unit(raw: &str) -> LedgerResult<Unit> {
    Unit::from_str(raw).map_err(|_| LedgerError::Config(format!("unknown unit '{}'", raw)))
}

pub fn run(
    args: AddArgs,
    registry: &MachineRegistry,
    config: &LedgerConfig,
    store: &mut impl RecordStore,
) -> LedgerResult<()> {
    let input = args.build_input(registry)?;
    let valuator = Valuator::new(registry, config.rates);

    let valuation = valuator.preview(&input)?;
    let profile = registry.resolve(&input.machine_name);
    reports::print_valuation(&input, &valuation, profile);

    if args.dry_run {
        info!("Dry run: nothing stored.");
        return Ok(());
    }

    match &args.replace {
        Some(id) => {
            let existing = store
                .list()?
                .into_iter()
                .find(|r| r.id.as_deref() == Some(id.as_str()))
                .ok_or_else(|| LedgerError::RecordNotFound(id.clone()))?;
            let revised = existing.revise(input, &valuator)?;
            store.update(id, revised)?;
            println!("Updated record {}", id);
        }
        None => {
            let record = valuator.evaluate(input)?;
            let id = store.create(record)?;
            println!("Stored record {}", id);
        }
    }

    Ok(())
}
