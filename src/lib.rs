//! Record valuation and statistics for a personal slot-machine play log.

pub mod accuracy;
pub mod config;
pub mod convert;
pub mod error;
pub mod input;
pub mod loss;
pub mod machines;
pub mod stats;
pub mod store;
pub mod timeline;
pub mod valuation;

pub use accuracy::CalcMode;
pub use convert::{Rates, Unit};
pub use error::{LedgerError, LedgerResult};
pub use input::SessionInput;
pub use machines::{MachineProfile, MachineRegistry, FALLBACK_MACHINE};
pub use timeline::{ChartPoint, DateRange, Totals};
pub use valuation::{evaluate, DerivedRecord, Valuator};
