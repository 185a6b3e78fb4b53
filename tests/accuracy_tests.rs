mod common;

use rstest::rstest;
use slotledger::accuracy::{
    detail_accuracy, simple_accuracy, tech_accuracy, CalcMode, DetailTally, SimpleTally,
};
use slotledger::config::RateDefaults;
use slotledger::machines::{DetailFields, MachineRegistry};
use slotledger::stats::Percent;

fn sample_detail() -> DetailTally {
    DetailTally {
        mid_success: 5,
        mid_not_watermelon: 0,
        mid_miss: 2,
        right_success: 4,
        right_miss: 1,
    }
}

#[rstest]
#[case(20, 3, Some("85.0"))]
#[case(3, 1, Some("66.7"))]
#[case(10, 0, Some("100.0"))]
#[case(0, 0, None)]
#[case(0, 5, None)]
fn test_simple_accuracy(#[case] attempts: i64, #[case] misses: i64, #[case] expected: Option<&str>) {
    let result = simple_accuracy(SimpleTally { attempts, misses });
    assert_eq!(result.map(|p| p.to_string()).as_deref(), expected);
}

#[rstest]
#[case::both_stages(true, true, Some("75.0"))]
#[case::right_only(false, true, Some("80.0"))]
#[case::mid_only(true, false, Some("71.4"))]
#[case::no_stages(false, false, None)]
fn test_detail_accuracy_is_gated(
    #[case] mid: bool,
    #[case] right: bool,
    #[case] expected: Option<&str>,
) {
    let result = detail_accuracy(sample_detail(), DetailFields { mid, right });
    assert_eq!(result.map(|p| p.to_string()).as_deref(), expected);
}

#[rstest]
#[case("新ハナビ", Some(75.0))]
#[case("Lハナビ", Some(80.0))]
#[case("その他", None)]
#[case("未登録の台", None)]
fn test_detail_mode_follows_machine_profile(#[case] machine: &str, #[case] expected: Option<f64>) {
    let fields = MachineRegistry::builtin().resolve(machine).detail_fields;
    let result = tech_accuracy(
        CalcMode::Detail,
        SimpleTally::default(),
        sample_detail(),
        fields,
    );
    assert_eq!(result, expected.map(Percent));
}

#[test]
fn test_mode_selects_the_tally() {
    let values = common::sample_input()
        .parse(&RateDefaults::default())
        .unwrap();
    let fields = MachineRegistry::builtin().resolve("Lハナビ").detail_fields;

    let simple = tech_accuracy(CalcMode::Simple, values.simple, values.detail, fields);
    let detail = tech_accuracy(CalcMode::Detail, values.simple, values.detail, fields);
    assert_eq!(simple, Some(Percent(85.0)));
    assert_eq!(detail, Some(Percent(80.0)));
}

#[test]
fn test_accuracy_is_pure() {
    let fields = DetailFields { mid: true, right: true };
    let first = detail_accuracy(sample_detail(), fields);
    for _ in 0..3 {
        assert_eq!(detail_accuracy(sample_detail(), fields), first);
    }
}

#[test]
fn test_stage_sums_saturate() {
    let tally = DetailTally {
        mid_success: i64::MAX,
        right_success: 1,
        right_miss: 1,
        ..Default::default()
    };
    let fields = DetailFields { mid: true, right: true };
    let totals = tally.enabled_totals(fields);
    assert_eq!(totals.success, i64::MAX);
    assert_eq!(totals.required_attempts(), i64::MAX);
    assert_eq!(detail_accuracy(tally, fields), Some(Percent(100.0)));
    assert!(simple_accuracy(SimpleTally { attempts: 1, misses: i64::MIN }).is_some());
}
