use clap::Args;
use slotledger::error::LedgerResult;
use slotledger::store::RecordStore;

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    pub id: String,
}

pub fn run(args: DeleteArgs, store: &mut impl RecordStore) -> LedgerResult<()> {
    store.delete(&args.id)?;
    println!("Deleted record {}", args.id);
    Ok(())
}
