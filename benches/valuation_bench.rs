use criterion::{criterion_group, criterion_main, Criterion};
use slotledger::accuracy::CalcMode;
use slotledger::config::RateDefaults;
use slotledger::input::SessionInput;
use slotledger::machines::MachineRegistry;
use slotledger::timeline::{chart_series, filter_by_date, DateRange, Totals};
use slotledger::valuation::{DerivedRecord, Valuator};
use std::hint::black_box;

fn session(day: usize) -> SessionInput {
    let names = ["バーサスリヴァイズ", "新ハナビ", "Lハナビ", "その他"];
    SessionInput {
        date: format!("2024-{:02}-{:02}", day / 28 % 12 + 1, day % 28 + 1),
        machine_name: names[day % names.len()].to_string(),
        calc_mode: if day % 2 == 0 {
            CalcMode::Simple
        } else {
            CalcMode::Detail
        },
        total_games: (2000 + day * 7 % 3000).to_string(),
        big_count: (day % 13).to_string(),
        reg_count: (day % 9).to_string(),
        investment: ((day % 20) * 1000).to_string(),
        recovery: (day * 37 % 1500).to_string(),
        tech_attempt_count: "20".to_string(),
        tech_miss_count: (day % 5).to_string(),
        mid_success: "5".to_string(),
        mid_miss: "2".to_string(),
        right_success: "4".to_string(),
        right_miss: "1".to_string(),
        ..Default::default()
    }
}

fn history(valuator: &Valuator, len: usize) -> Vec<DerivedRecord> {
    let mut records: Vec<DerivedRecord> = (0..len)
        .map(|day| valuator.evaluate(session(day)))
        .collect::<Result<_, _>>()
        .expect("bench sessions are valid");
    records.sort_by(|a, b| b.date().cmp(a.date()));
    records
}

fn bench_valuation(c: &mut Criterion) {
    let registry = MachineRegistry::builtin();
    let valuator = Valuator::new(registry, RateDefaults::default());
    let input = session(3);

    c.bench_function("evaluate_one_session", |b| {
        b.iter(|| valuator.evaluate(black_box(input.clone())))
    });

    let records = history(&valuator, 1000);
    let range = DateRange::new(Some("2024-03-01".into()), Some("2024-09-30".into()));
    let rates = RateDefaults::default();

    c.bench_function("chart_series_1000", |b| {
        b.iter(|| {
            let selected = filter_by_date(black_box(&records), &range);
            chart_series(&selected, &rates)
        })
    });

    c.bench_function("totals_1000", |b| {
        b.iter(|| Totals::from_records(black_box(&records)))
    });
}

criterion_group!(benches, bench_valuation);
criterion_main!(benches);
