mod tables;

pub use self::tables::{
    chart as print_chart, machines as print_machines, records as print_records,
    totals as print_totals, valuation as print_valuation,
};
