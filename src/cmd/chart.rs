use super::list::ListArgs;
use crate::reports;
use clap::Args;
use slotledger::config::LedgerConfig;
use slotledger::error::LedgerResult;
use slotledger::store::RecordStore;
use slotledger::timeline::chart_series;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ChartArgs {
    #[command(flatten)]
    pub filter: ListArgs,

    /// Also write the series to this CSV file.
    #[arg(long)]
    pub csv: Option<String>,
}

pub fn run(args: ChartArgs, config: &LedgerConfig, store: &impl RecordStore) -> LedgerResult<()> {
    let records = store.list()?;
    let selected = args.filter.select(&records);
    let series = chart_series(&selected, &config.rates)?;

    reports::print_chart(&series);

    if let Some(path) = &args.csv {
        let mut writer = csv::Writer::from_path(path)?;
        for point in &series {
            writer.serialize(point)?;
        }
        writer.flush()?;
        info!("💾 Wrote {} chart points to {}", series.len(), path);
    }

    Ok(())
}
