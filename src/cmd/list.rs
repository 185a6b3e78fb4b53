use crate::reports;
use clap::Args;
use slotledger::error::LedgerResult;
use slotledger::store::RecordStore;
use slotledger::timeline::{filter_by_date, filter_by_machine, DateRange};
use slotledger::valuation::DerivedRecord;

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// First date to include (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<String>,
    /// Last date to include (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<String>,
    #[arg(short, long)]
    pub machine: Option<String>,
}

impl ListArgs {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.from.clone(), self.to.clone())
    }

    /// Records in range, newest first, optionally restricted to one machine.
    pub fn select<'a>(&self, records: &'a [DerivedRecord]) -> Vec<&'a DerivedRecord> {
        let in_range = filter_by_date(records, &self.range());
        match &self.machine {
            Some(name) => filter_by_machine(&in_range, name),
            None => in_range,
        }
    }
}

pub fn run(args: ListArgs, store: &impl RecordStore) -> LedgerResult<()> {
    let records = store.list()?;
    let selected = args.select(&records);
    reports::print_records(&selected);
    Ok(())
}
