use super::list::ListArgs;
use crate::reports;
use slotledger::error::LedgerResult;
use slotledger::machines::MachineRegistry;
use slotledger::store::RecordStore;
use slotledger::timeline::Totals;

pub fn run(args: ListArgs, registry: &MachineRegistry, store: &impl RecordStore) -> LedgerResult<()> {
    let records = store.list()?;
    let selected = args.select(&records);

    // Registry order first, then names no longer in the table.
    let mut names: Vec<String> = registry.names().into_iter().map(str::to_string).collect();
    for record in &selected {
        if !names.iter().any(|n| n == record.machine_name()) {
            names.push(record.machine_name().to_string());
        }
    }

    let per_machine: Vec<(String, Totals)> = names
        .into_iter()
        .map(|name| {
            let totals = Totals::for_machine(selected.iter().copied(), &name);
            (name, totals)
        })
        .filter(|(_, totals)| totals.records > 0)
        .collect();

    let overall = Totals::from_records(selected.iter().copied());
    reports::print_totals(&per_machine, &overall);
    Ok(())
}
