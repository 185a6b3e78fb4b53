use proptest::prelude::*;
use slotledger::accuracy::{tech_accuracy, CalcMode, DetailTally, SimpleTally};
use slotledger::config::RateDefaults;
use slotledger::convert::{medal_diff, Amount, Rates, Unit};
use slotledger::input::SessionInput;
use slotledger::machines::{DetailFields, MachineRegistry};
use slotledger::stats::{calc_prob, personal_counts, BonusCounters, Ratio};
use slotledger::timeline::{chart_series, filter_by_date, DateRange};
use slotledger::valuation::{evaluate, DerivedRecord};

// --- STRATEGIES ---

prop_compose! {
    fn arb_counters()(
        games in 0i64..20_000,
        big in 0i64..100,
        reg in 0i64..100
    ) -> BonusCounters {
        BonusCounters { games, big, reg }
    }
}

prop_compose! {
    fn arb_detail()(
        mid_success in 0i64..50,
        mid_not_watermelon in 0i64..50,
        mid_miss in 0i64..50,
        right_success in 0i64..50,
        right_miss in 0i64..50
    ) -> DetailTally {
        DetailTally { mid_success, mid_not_watermelon, mid_miss, right_success, right_miss }
    }
}

prop_compose! {
    fn arb_input()(
        machine in prop::sample::select(vec!["バーサスリヴァイズ", "新ハナビ", "Lハナビ", "その他", "謎の台"]),
        simple_mode in any::<bool>(),
        end in arb_counters(),
        investment in 0u32..100_000,
        recovery in 0u32..5_000,
        misses in 0u32..20,
        day in 1u32..29
    ) -> SessionInput {
        SessionInput {
            date: format!("2024-05-{:02}", day),
            machine_name: machine.to_string(),
            calc_mode: if simple_mode { CalcMode::Simple } else { CalcMode::Detail },
            total_games: end.games.to_string(),
            big_count: end.big.to_string(),
            reg_count: end.reg.to_string(),
            investment: investment.to_string(),
            recovery: recovery.to_string(),
            tech_attempt_count: (misses * 2).to_string(),
            tech_miss_count: misses.to_string(),
            right_miss: misses.to_string(),
            ..Default::default()
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_calc_prob_domain(games in 0i64..1_000_000, count in -10i64..1_000) {
        match calc_prob(games, count) {
            Ratio::Value(v) => {
                prop_assert!(count > 0);
                prop_assert!((v - games as f64 / count as f64).abs() < 1e-9);
            }
            Ratio::NotApplicable => prop_assert!(count <= 0),
        }
    }

    #[test]
    fn test_mid_start_adjustment(end in arb_counters(), start in arb_counters()) {
        let own = personal_counts(end, start, true);
        prop_assert_eq!(own.games, (end.games - start.games).max(0));
        prop_assert_eq!(own.big, (end.big - start.big).max(0));
        prop_assert_eq!(own.reg, (end.reg - start.reg).max(0));
        prop_assert_eq!(personal_counts(end, start, false), end);
    }

    #[test]
    fn test_accuracy_bounded(
        detail in arb_detail(),
        mid in any::<bool>(),
        right in any::<bool>()
    ) {
        let fields = DetailFields { mid, right };
        match tech_accuracy(CalcMode::Detail, SimpleTally::default(), detail, fields) {
            Some(p) => prop_assert!((0.0..=100.0).contains(&p.0)),
            None => prop_assert_eq!(detail.enabled_totals(fields).required_attempts(), 0),
        }
    }

    #[test]
    fn test_evaluation_is_pure(input in arb_input()) {
        let registry = MachineRegistry::builtin();
        let a = evaluate(input.clone(), registry).unwrap();
        let b = evaluate(input, registry).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn test_medal_diff_matches_currency_at_equal_exchange(
        investment in 0u32..100_000,
        recovery in 0u32..10_000
    ) {
        let rates = Rates::new(20.0, 50.0).unwrap();
        let inv = Amount::new(investment as f64, Unit::Currency);
        let rec = Amount::new(recovery as f64, Unit::Medal);
        let yen = rec.recovered_currency(&rates) - inv.invested_currency(&rates);
        prop_assert_eq!(medal_diff(&inv, &rec, &rates), (yen / 20.0).floor() as i64);
    }

    #[test]
    fn test_chart_is_chronological(inputs in prop::collection::vec(arb_input(), 0..30)) {
        let registry = MachineRegistry::builtin();
        let mut records: Vec<DerivedRecord> = inputs
            .into_iter()
            .map(|i| evaluate(i, registry).unwrap())
            .collect();
        records.sort_by(|a, b| b.date().cmp(a.date()));

        let selected = filter_by_date(&records, &DateRange::default());
        let series = chart_series(&selected, &RateDefaults::default()).unwrap();
        prop_assert_eq!(series.len(), records.len());
        prop_assert!(series.windows(2).all(|w| w[0].date <= w[1].date));

        let mut running = 0;
        for point in &series {
            running += point.per_session_medal_diff;
            prop_assert_eq!(point.cumulative_medal_diff, running);
        }
    }
}
